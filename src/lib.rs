//! Heartline — onboarding flow and app-state core.

pub mod appstate;
pub mod config;
pub mod error;
pub mod gate;
pub mod onboarding;
pub mod store;
