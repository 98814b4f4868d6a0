//! Error types for Heartline.

use crate::onboarding::state::OnboardingStep;

/// Top-level error type for the client core.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Flow error: {0}")]
    Flow(#[from] FlowError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Durable-storage errors.
///
/// These never reach the app-state store's callers — the store swallows them
/// after logging — but the storage backends themselves report precisely.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Per-step validation gate failures.
///
/// Each variant is one unmet gate; the step cannot advance until the user
/// corrects the input. No recovery beyond correction is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("phone number must be at least {0} characters")]
    PhoneTooShort(usize),

    #[error("verification code must be {0} characters")]
    CodeLength(usize),

    #[error("verification code does not match")]
    CodeMismatch,

    #[error("name must be longer than one character")]
    NameTooShort,

    #[error("city must be longer than one character")]
    CityTooShort,

    #[error("date of birth is required")]
    DobMissing,

    #[error("select who you want to meet")]
    GenderRequired,
}

/// Flow sequencing errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FlowError {
    #[error("flow is at step {current}, expected {expected}")]
    StepMismatch {
        expected: OnboardingStep,
        current: OnboardingStep,
    },

    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
}

/// Result type alias for the client core.
pub type Result<T> = std::result::Result<T, Error>;
