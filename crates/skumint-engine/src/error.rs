use skumint_core::{InventoryId, StorageError, TemplateError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors surfaced by the identifier engine.
#[derive(Debug, Clone, Error)]
pub enum EngineError {
    #[error("inventory {0} not found")]
    InventoryNotFound(InventoryId),
    #[error(transparent)]
    Template(#[from] TemplateError),
    /// An element kind this build does not recognize reached the renderer.
    /// Unreachable as long as format writers validate kinds.
    #[error("unknown id element kind")]
    UnknownElementKind,
    /// A `Sequence` element was rendered without a resolved ordinal.
    #[error("no sequence ordinal was resolved for this render")]
    MissingOrdinal,
    #[error("invalid date/time pattern '{pattern}': {reason}")]
    DateTimePattern { pattern: String, reason: String },
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<StorageError> for EngineError {
    fn from(value: StorageError) -> Self {
        match value {
            StorageError::InventoryNotFound(id) => Self::InventoryNotFound(id),
            other => Self::Storage(other.to_string()),
        }
    }
}
