use crate::{PatternId, StoreError};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GenerationError {
    #[error("no supply pattern available")]
    NoPatternAvailable,
    #[error("{} slot {} has no eligible card", .pattern, .slot + 1)]
    SlotUnfillable { pattern: PatternId, slot: usize },
    #[error("supply failed consistency check: {0}")]
    Inconsistent(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl GenerationError {
    /// Whether a fresh draw might succeed where this attempt failed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, GenerationError::SlotUnfillable { .. })
    }
}
