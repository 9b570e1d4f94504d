//! Core types and traits for the skumint custom identifier engine.
//!
//! This crate provides the stored id format model, the identifier
//! newtypes, and the collaborator traits shared by the engine and the
//! storage backends.

pub mod custom_id;
pub mod error;
pub mod ids;
pub mod repository;
pub mod template;

pub use custom_id::CustomId;
pub use error::{StorageError, TemplateError};
pub use ids::{InventoryId, ItemId};
pub use repository::CatalogRepository;
pub use template::{IdElement, IdFormat, MAX_TOKEN_WIDTH};
