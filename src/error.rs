//! Error types for the card-match engine
//!
//! Gameplay itself never fails: rejected selections and empty-history undos
//! are reported as outcomes. These errors cover building inputs (ranks,
//! suits, layouts) and explicit invariant checks.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CardMatchError {
    #[error("Invalid rank: {0} (expected 1-13)")]
    InvalidRank(u8),

    #[error("Invalid suit: {0}")]
    InvalidSuit(String),

    #[error("Invalid layout: {0}")]
    InvalidLayout(String),

    #[error("Invariant violated: {0}")]
    InvariantViolation(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for CardMatchError {
    fn from(err: serde_json::Error) -> Self {
        CardMatchError::SerializationError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CardMatchError>;
