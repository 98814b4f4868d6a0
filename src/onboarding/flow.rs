//! Onboarding flow engine — holds the current step and its draft.
//!
//! The flow is the only owner of in-progress drafts. Each submission checks
//! that the flow is on the right step, runs the pure gate from
//! [`super::draft`], and advances on success. A failed gate leaves the
//! position and draft untouched. Nothing is persisted until the final step
//! promotes the draft to a profile and hands it to the app-state store.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::appstate::store::AppStateStore;
use crate::error::FlowError;

use super::draft::{self, BasicInfoDraft, PhoneDraft};
use super::model::Gender;
use super::state::OnboardingStep;

/// Where the flow currently is, with the draft that position carries.
#[derive(Debug, Clone)]
enum FlowPosition {
    Phone,
    Otp { draft: PhoneDraft },
    BasicInfo { draft: PhoneDraft },
    Preferences { draft: BasicInfoDraft },
    Done,
}

impl FlowPosition {
    fn step(&self) -> OnboardingStep {
        match self {
            FlowPosition::Phone => OnboardingStep::Phone,
            FlowPosition::Otp { .. } => OnboardingStep::Otp,
            FlowPosition::BasicInfo { .. } => OnboardingStep::BasicInfo,
            FlowPosition::Preferences { .. } => OnboardingStep::Preferences,
            FlowPosition::Done => OnboardingStep::Done,
        }
    }
}

/// A single onboarding run from phone entry to a completed profile.
pub struct OnboardingFlow {
    store: Arc<AppStateStore>,
    expected_code: String,
    flow_id: Uuid,
    state: RwLock<FlowPosition>,
}

impl OnboardingFlow {
    pub fn new(store: Arc<AppStateStore>, expected_code: impl Into<String>) -> Arc<Self> {
        let flow_id = Uuid::new_v4();
        debug!(flow_id = %flow_id, "onboarding flow started");
        Arc::new(Self {
            store,
            expected_code: expected_code.into(),
            flow_id,
            state: RwLock::new(FlowPosition::Phone),
        })
    }

    /// The step the flow is currently waiting on.
    pub async fn step(&self) -> OnboardingStep {
        self.state.read().await.step()
    }

    pub async fn is_complete(&self) -> bool {
        self.state.read().await.step().is_terminal()
    }

    /// Phone step: validate and advance to code verification.
    pub async fn submit_phone(&self, phone: &str) -> Result<OnboardingStep, FlowError> {
        let mut state = self.state.write().await;
        match &*state {
            FlowPosition::Phone => {}
            other => {
                return Err(FlowError::StepMismatch {
                    expected: OnboardingStep::Phone,
                    current: other.step(),
                });
            }
        }
        let draft = draft::submit_phone(phone)?;
        *state = FlowPosition::Otp { draft };
        debug!(flow_id = %self.flow_id, step = %OnboardingStep::Otp, "advanced");
        Ok(OnboardingStep::Otp)
    }

    /// Code step: verify against the expected demo code.
    pub async fn submit_code(&self, code: &str) -> Result<OnboardingStep, FlowError> {
        let mut state = self.state.write().await;
        let draft = match &*state {
            FlowPosition::Otp { draft } => draft.clone(),
            other => {
                return Err(FlowError::StepMismatch {
                    expected: OnboardingStep::Otp,
                    current: other.step(),
                });
            }
        };
        let draft = draft::verify_code(draft, code, &self.expected_code)?;
        *state = FlowPosition::BasicInfo { draft };
        debug!(flow_id = %self.flow_id, step = %OnboardingStep::BasicInfo, "advanced");
        Ok(OnboardingStep::BasicInfo)
    }

    /// Basic-info step: collect name, city and date of birth.
    pub async fn submit_basic_info(
        &self,
        name: &str,
        city: &str,
        dob: Option<String>,
    ) -> Result<OnboardingStep, FlowError> {
        let mut state = self.state.write().await;
        let draft = match &*state {
            FlowPosition::BasicInfo { draft } => draft.clone(),
            other => {
                return Err(FlowError::StepMismatch {
                    expected: OnboardingStep::BasicInfo,
                    current: other.step(),
                });
            }
        };
        let draft = draft::submit_basic_info(draft, name, city, dob)?;
        *state = FlowPosition::Preferences { draft };
        debug!(flow_id = %self.flow_id, step = %OnboardingStep::Preferences, "advanced");
        Ok(OnboardingStep::Preferences)
    }

    /// Final step: promote the draft to a profile and complete onboarding.
    ///
    /// The flow lock is released before the store call so a slow durable
    /// write never blocks status reads.
    pub async fn submit_preferences(
        &self,
        gender: Option<Gender>,
        looking_for: Option<String>,
    ) -> Result<OnboardingStep, FlowError> {
        let profile = {
            let mut state = self.state.write().await;
            let draft = match &*state {
                FlowPosition::Preferences { draft } => draft.clone(),
                other => {
                    return Err(FlowError::StepMismatch {
                        expected: OnboardingStep::Preferences,
                        current: other.step(),
                    });
                }
            };
            let profile = draft::submit_preferences(draft, gender, looking_for)?;
            *state = FlowPosition::Done;
            profile
        };
        info!(flow_id = %self.flow_id, name = %profile.name, "onboarding complete");
        self.store.complete_onboarding(profile).await;
        Ok(OnboardingStep::Done)
    }

    /// Throw away any accumulated draft and return to the first step.
    pub async fn restart(&self) {
        let mut state = self.state.write().await;
        debug!(flow_id = %self.flow_id, from = %state.step(), "flow restarted");
        *state = FlowPosition::Phone;
    }
}
