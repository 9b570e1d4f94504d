use crate::error::StorageError;
use crate::ids::{InventoryId, ItemId};
use async_trait::async_trait;

/// Storage-side collaborator the engine reads from.
///
/// The engine never writes through this trait: item creation, and the
/// unique (inventory, identifier) index that ultimately guarantees
/// identifier uniqueness, live with the owning application.
#[async_trait]
pub trait CatalogRepository: Send + Sync + 'static {
    /// Raw custom id format document stored on the inventory.
    ///
    /// `Ok(None)` means the inventory exists but has no format configured;
    /// a missing inventory is `Err(StorageError::InventoryNotFound)`.
    async fn id_format_document(
        &self,
        inventory: InventoryId,
    ) -> Result<Option<String>, StorageError>;

    /// Current number of items in the inventory.
    ///
    /// An unknown inventory counts as zero items, mirroring a relational
    /// `COUNT(*)` over an empty result set.
    async fn item_count(&self, inventory: InventoryId) -> Result<u64, StorageError>;

    /// Whether an item other than `excluded` already uses `candidate` as
    /// its custom identifier in this inventory.
    ///
    /// The comparison is exact (case-sensitive); an unknown inventory has
    /// no items and therefore no duplicates.
    async fn custom_id_exists(
        &self,
        inventory: InventoryId,
        candidate: &str,
        excluded: Option<ItemId>,
    ) -> Result<bool, StorageError>;
}
