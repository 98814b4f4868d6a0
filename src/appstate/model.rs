//! App-state data model — the persisted record and the in-memory snapshot.

use serde::{Deserialize, Serialize};

use crate::onboarding::model::Profile;

/// What actually lands in durable storage. One JSON blob under a single
/// settings key; the `loading` flag is runtime-only and never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredAppState {
    pub onboarded: bool,
    #[serde(default)]
    pub profile: Option<Profile>,
}

/// Point-in-time view of the store handed to readers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppStateSnapshot {
    pub onboarded: bool,
    pub profile: Option<Profile>,
    /// True from construction until the initial durable read settles.
    pub loading: bool,
}

/// State-change notifications fanned out to subscribers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AppStateEvent {
    /// Initial load finished (whatever the outcome).
    Loaded { onboarded: bool },
    /// Onboarding completed with a full profile.
    OnboardingCompleted,
    /// Onboarding state was cleared.
    OnboardingReset,
}

/// Settings-table keys used by the app-state store.
pub mod storage_keys {
    /// Key for the app-state JSON blob in the settings table.
    pub const APP_STATE: &str = "app_state_v1";
    /// Default user ID (single-user device).
    pub const DEFAULT_USER: &str = "default";
}
