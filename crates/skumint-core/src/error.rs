use crate::ids::InventoryId;
use thiserror::Error;

/// Errors arising from a stored custom id format document.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TemplateError {
    /// The stored document is non-empty but unusable: it failed to parse,
    /// contains zero elements, or carries a token width the engine refuses
    /// to expand into a pattern.
    #[error("corrupt custom id format: {0}")]
    Corrupt(String),
}

/// Errors surfaced by a [`CatalogRepository`](crate::repository::CatalogRepository).
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("inventory {0} not found")]
    InventoryNotFound(InventoryId),
    /// The unique (inventory, identifier) index rejected an insert.
    #[error("identifier '{0}' already exists in this inventory")]
    Conflict(String),
    #[error("storage backend failure: {0}")]
    Backend(String),
}
