//! Onboarding system — the step-gated flow that builds a profile.
//!
//! A new session walks four steps: phone entry, code verification, basic
//! info, preferences. Each step validates its input and carries a growing
//! draft forward; the final step promotes the draft to a profile and
//! completes onboarding in the app-state store. Until then nothing is
//! persisted, so an abandoned flow disappears with the session.

pub mod draft;
pub mod flow;
pub mod model;
pub mod routes;
pub mod state;

pub use flow::OnboardingFlow;
pub use model::{Gender, Profile};
pub use routes::{OnboardingRouteState, OnboardingStatus, onboarding_routes};
pub use state::OnboardingStep;
