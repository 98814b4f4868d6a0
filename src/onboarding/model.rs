//! Profile and onboarding data models.

use serde::{Deserialize, Serialize};

/// Who the user wants to meet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Man,
    Woman,
    Everyone,
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Man => write!(f, "man"),
            Self::Woman => write!(f, "woman"),
            Self::Everyone => write!(f, "everyone"),
        }
    }
}

/// Fallback relationship intent when the user never touches the selector.
pub const DEFAULT_LOOKING_FOR: &str = "Relationship";

/// The finalized user record produced by completing onboarding.
///
/// Does not exist until the preferences step succeeds; created exactly once
/// per completion, overwritten wholesale on re-completion, deleted on reset.
/// Persisted as part of the app-state record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub phone: String,
    pub name: String,
    /// Date of birth as an ISO 8601 string, carried verbatim from input.
    #[serde(default)]
    pub dob: Option<String>,
    pub city: String,
    /// Nullable in the stored record; the completion path always sets it.
    #[serde(default)]
    pub gender: Option<Gender>,
    /// Free-form label, defaults to [`DEFAULT_LOOKING_FOR`].
    pub looking_for: String,
}

impl Profile {
    /// Whether the record satisfies the completion requirement: a profile is
    /// only considered complete once a gender selection is present.
    pub fn is_complete(&self) -> bool {
        self.gender.is_some()
    }
}
