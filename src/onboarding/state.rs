//! Onboarding step machine — tracks which step the flow is on.

use serde::{Deserialize, Serialize};

/// The steps of the onboarding flow.
///
/// Progresses linearly and forward-only:
/// Phone → Otp → BasicInfo → Preferences → Done.
/// There is no backward transition and no resume; an abandoned flow always
/// restarts at `Phone`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStep {
    Phone,
    Otp,
    BasicInfo,
    Preferences,
    Done,
}

impl OnboardingStep {
    /// Check if a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: OnboardingStep) -> bool {
        use OnboardingStep::*;
        matches!(
            (self, target),
            (Phone, Otp) | (Otp, BasicInfo) | (BasicInfo, Preferences) | (Preferences, Done)
        )
    }

    /// Whether this step is terminal (the flow has produced a profile).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Get the next step in the linear progression, if any.
    pub fn next(&self) -> Option<OnboardingStep> {
        use OnboardingStep::*;
        match self {
            Phone => Some(Otp),
            Otp => Some(BasicInfo),
            BasicInfo => Some(Preferences),
            Preferences => Some(Done),
            Done => None,
        }
    }
}

impl Default for OnboardingStep {
    fn default() -> Self {
        Self::Phone
    }
}

impl std::fmt::Display for OnboardingStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Phone => "phone",
            Self::Otp => "otp",
            Self::BasicInfo => "basic_info",
            Self::Preferences => "preferences",
            Self::Done => "done",
        };
        write!(f, "{s}")
    }
}
