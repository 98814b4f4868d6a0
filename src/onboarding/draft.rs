//! Draft accumulation — pure step transitions over immutable draft values.
//!
//! Each onboarding step is a function from the previous step's draft plus the
//! user's input to the next draft, `Result`-gated by that step's validation.
//! Drafts are plain values owned by the active flow: they are never persisted,
//! so abandoning a flow mid-way has no side effect. Gates check trimmed
//! lengths but the carried values stay exactly as entered.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

use super::model::{DEFAULT_LOOKING_FOR, Gender, Profile};

/// Minimum phone length (after trimming) accepted by the phone gate.
pub const MIN_PHONE_LEN: usize = 8;

/// Length of the verification code.
pub const CODE_LEN: usize = 6;

/// The demo verification code. No SMS is ever sent; verification compares
/// against this constant (or a configured override).
pub const DEMO_CODE: &str = "123456";

/// Draft after the phone step: exactly what the code step needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneDraft {
    pub phone: String,
}

/// Draft after the basic-info step: everything the preferences step needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicInfoDraft {
    pub phone: String,
    pub name: String,
    pub city: String,
    /// ISO 8601 date string, carried verbatim from the picker.
    pub dob: Option<String>,
}

/// Phone gate: at least [`MIN_PHONE_LEN`] characters after trimming.
pub fn submit_phone(phone: &str) -> Result<PhoneDraft, ValidationError> {
    if phone.trim().chars().count() < MIN_PHONE_LEN {
        return Err(ValidationError::PhoneTooShort(MIN_PHONE_LEN));
    }
    Ok(PhoneDraft {
        phone: phone.to_string(),
    })
}

/// Code gate: a [`CODE_LEN`]-character code equal to the expected demo code.
///
/// The draft passes through unchanged — verification adds no fields.
pub fn verify_code(
    draft: PhoneDraft,
    code: &str,
    expected: &str,
) -> Result<PhoneDraft, ValidationError> {
    if code.chars().count() != CODE_LEN {
        return Err(ValidationError::CodeLength(CODE_LEN));
    }
    if code != expected {
        return Err(ValidationError::CodeMismatch);
    }
    Ok(draft)
}

/// Basic-info gate: name and city longer than one character (trimmed) and a
/// selected date of birth.
pub fn submit_basic_info(
    draft: PhoneDraft,
    name: &str,
    city: &str,
    dob: Option<String>,
) -> Result<BasicInfoDraft, ValidationError> {
    if name.trim().chars().count() <= 1 {
        return Err(ValidationError::NameTooShort);
    }
    if city.trim().chars().count() <= 1 {
        return Err(ValidationError::CityTooShort);
    }
    if dob.is_none() {
        return Err(ValidationError::DobMissing);
    }
    Ok(BasicInfoDraft {
        phone: draft.phone,
        name: name.to_string(),
        city: city.to_string(),
        dob,
    })
}

/// Preferences gate: a gender selection must be made. `looking_for` falls
/// back to [`DEFAULT_LOOKING_FOR`] when absent.
///
/// This is the promotion point: the accumulated draft becomes a [`Profile`].
pub fn submit_preferences(
    draft: BasicInfoDraft,
    gender: Option<Gender>,
    looking_for: Option<String>,
) -> Result<Profile, ValidationError> {
    let Some(gender) = gender else {
        return Err(ValidationError::GenderRequired);
    };
    Ok(Profile {
        phone: draft.phone,
        name: draft.name,
        dob: draft.dob,
        city: draft.city,
        gender: Some(gender),
        looking_for: looking_for.unwrap_or_else(|| DEFAULT_LOOKING_FOR.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_gate_boundaries() {
        assert_eq!(
            submit_phone("1234567"),
            Err(ValidationError::PhoneTooShort(MIN_PHONE_LEN))
        );
        assert!(submit_phone("12345678").is_ok());
        assert!(submit_phone("9999999999").is_ok());
    }

    #[test]
    fn phone_gate_trims_but_carries_raw_input() {
        // Seven digits padded with spaces still fails the trimmed check.
        assert!(submit_phone("  1234567  ").is_err());

        // Eight digits padded with spaces passes, and the raw value is kept.
        let draft = submit_phone(" 12345678 ").unwrap();
        assert_eq!(draft.phone, " 12345678 ");
    }

    #[test]
    fn code_gate_checks_length_then_match() {
        let draft = PhoneDraft {
            phone: "9999999999".into(),
        };

        assert_eq!(
            verify_code(draft.clone(), "123", DEMO_CODE),
            Err(ValidationError::CodeLength(CODE_LEN))
        );
        assert_eq!(
            verify_code(draft.clone(), "000000", DEMO_CODE),
            Err(ValidationError::CodeMismatch)
        );

        let verified = verify_code(draft.clone(), DEMO_CODE, DEMO_CODE).unwrap();
        // Verification adds nothing: the draft passes through unchanged.
        assert_eq!(verified, draft);
    }

    #[test]
    fn code_gate_respects_configured_expected_code() {
        let draft = PhoneDraft {
            phone: "12345678".into(),
        };
        assert!(verify_code(draft.clone(), "654321", "654321").is_ok());
        assert_eq!(
            verify_code(draft, DEMO_CODE, "654321"),
            Err(ValidationError::CodeMismatch)
        );
    }

    #[test]
    fn basic_info_gate_boundaries() {
        let draft = || PhoneDraft {
            phone: "9999999999".into(),
        };
        let dob = || Some("2000-01-01T00:00:00.000Z".to_string());

        assert_eq!(
            submit_basic_info(draft(), "", "Pune", dob()),
            Err(ValidationError::NameTooShort)
        );
        assert_eq!(
            submit_basic_info(draft(), "A", "Pune", dob()),
            Err(ValidationError::NameTooShort)
        );
        assert_eq!(
            submit_basic_info(draft(), "Ava", "a", dob()),
            Err(ValidationError::CityTooShort)
        );
        assert_eq!(
            submit_basic_info(draft(), "Ava", "Pune", None),
            Err(ValidationError::DobMissing)
        );

        // Two-character name and city are the smallest accepted values.
        let accepted = submit_basic_info(draft(), "Al", "NY", dob()).unwrap();
        assert_eq!(accepted.name, "Al");
        assert_eq!(accepted.city, "NY");
    }

    #[test]
    fn basic_info_carries_forward_exact_fields() {
        let draft = PhoneDraft {
            phone: "9999999999".into(),
        };
        let out = submit_basic_info(
            draft,
            "Ava",
            "Pune",
            Some("2000-01-01T00:00:00.000Z".to_string()),
        )
        .unwrap();
        assert_eq!(out.phone, "9999999999");
        assert_eq!(out.name, "Ava");
        assert_eq!(out.city, "Pune");
        assert_eq!(out.dob.as_deref(), Some("2000-01-01T00:00:00.000Z"));
    }

    #[test]
    fn preferences_gate_requires_gender() {
        let draft = BasicInfoDraft {
            phone: "9999999999".into(),
            name: "Ava".into(),
            city: "Pune".into(),
            dob: Some("2000-01-01T00:00:00.000Z".into()),
        };
        assert_eq!(
            submit_preferences(draft, None, None),
            Err(ValidationError::GenderRequired)
        );
    }

    #[test]
    fn preferences_defaults_looking_for() {
        let draft = BasicInfoDraft {
            phone: "9999999999".into(),
            name: "Ava".into(),
            city: "Pune".into(),
            dob: None,
        };
        let profile = submit_preferences(draft, Some(Gender::Woman), None).unwrap();
        assert_eq!(profile.looking_for, DEFAULT_LOOKING_FOR);
    }

    #[test]
    fn full_accumulation_produces_expected_profile() {
        let draft = submit_phone("9999999999").unwrap();
        let draft = verify_code(draft, DEMO_CODE, DEMO_CODE).unwrap();
        let draft = submit_basic_info(
            draft,
            "Ava",
            "Pune",
            Some("2000-01-01T00:00:00.000Z".to_string()),
        )
        .unwrap();
        let profile = submit_preferences(
            draft,
            Some(Gender::Woman),
            Some("Relationship".to_string()),
        )
        .unwrap();

        assert_eq!(
            profile,
            Profile {
                phone: "9999999999".into(),
                name: "Ava".into(),
                dob: Some("2000-01-01T00:00:00.000Z".into()),
                city: "Pune".into(),
                gender: Some(Gender::Woman),
                looking_for: "Relationship".into(),
            }
        );
        assert!(profile.is_complete());
    }
}
