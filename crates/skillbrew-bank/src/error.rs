//! Error types for the skill bank.
//!
//! Validation findings are never errors — they are issues in a
//! [`crate::validator::ValidationReport`]. These variants cover the truly
//! exceptional conditions: I/O failures, corrupt sidecar files, and lookups
//! of skills that are not in the bank.

/// Bank-specific errors.
#[derive(Debug, thiserror::Error)]
pub enum BankError {
    #[error("skill not found in bank: `{0}`")]
    NotFound(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Core(#[from] skillbrew_core::CoreError),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, BankError>;
