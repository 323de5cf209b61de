//! Error types for skillbrew-core.

use std::path::PathBuf;

/// Core errors — workspace and persistence failures.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("workspace not initialized at `{0}` — run `skillbrew init` first")]
    NotInitialized(PathBuf),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, CoreError>;
