//! In-memory catalog backend.
//!
//! Keeps the same observable contract as the relational store it stands in
//! for: reads are point-in-time snapshots, and inserting a duplicate
//! (inventory, identifier) pair is rejected the way a unique index would
//! reject it.

use async_trait::async_trait;
use dashmap::DashMap;
use skumint_core::{CatalogRepository, CustomId, InventoryId, ItemId, StorageError};

#[derive(Debug, Clone)]
struct ItemRecord {
    id: ItemId,
    custom_id: CustomId,
}

#[derive(Debug, Default)]
struct InventoryState {
    id_format: Option<String>,
    items: Vec<ItemRecord>,
}

/// Dashmap-backed [`CatalogRepository`] for tests and in-process embedding.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    inventories: DashMap<InventoryId, InventoryState>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an inventory, optionally with a stored id format document.
    pub fn create_inventory(&self, id_format: Option<&str>) -> InventoryId {
        let id = InventoryId::random();
        self.inventories.insert(
            id,
            InventoryState {
                id_format: id_format.map(str::to_string),
                items: Vec::new(),
            },
        );
        id
    }

    /// Replaces the stored id format document for an inventory.
    pub fn set_id_format(
        &self,
        inventory: InventoryId,
        id_format: Option<&str>,
    ) -> Result<(), StorageError> {
        let mut state = self
            .inventories
            .get_mut(&inventory)
            .ok_or(StorageError::InventoryNotFound(inventory))?;
        state.id_format = id_format.map(str::to_string);
        Ok(())
    }

    /// Inserts an item, enforcing the unique (inventory, identifier) pair.
    pub fn insert_item(
        &self,
        inventory: InventoryId,
        custom_id: CustomId,
    ) -> Result<ItemId, StorageError> {
        let mut state = self
            .inventories
            .get_mut(&inventory)
            .ok_or(StorageError::InventoryNotFound(inventory))?;
        if state.items.iter().any(|item| item.custom_id == custom_id) {
            return Err(StorageError::Conflict(custom_id.into_string()));
        }
        let id = ItemId::random();
        state.items.push(ItemRecord { id, custom_id });
        Ok(id)
    }

    /// Removes an item; `true` if it existed.
    pub fn remove_item(&self, inventory: InventoryId, item: ItemId) -> bool {
        let Some(mut state) = self.inventories.get_mut(&inventory) else {
            return false;
        };
        let before = state.items.len();
        state.items.retain(|record| record.id != item);
        state.items.len() != before
    }

    /// The custom identifier currently stored for an item.
    pub fn custom_id(&self, inventory: InventoryId, item: ItemId) -> Option<CustomId> {
        let state = self.inventories.get(&inventory)?;
        state
            .items
            .iter()
            .find(|record| record.id == item)
            .map(|record| record.custom_id.clone())
    }
}

#[async_trait]
impl CatalogRepository for InMemoryCatalog {
    async fn id_format_document(
        &self,
        inventory: InventoryId,
    ) -> Result<Option<String>, StorageError> {
        let state = self
            .inventories
            .get(&inventory)
            .ok_or(StorageError::InventoryNotFound(inventory))?;
        Ok(state.id_format.clone())
    }

    async fn item_count(&self, inventory: InventoryId) -> Result<u64, StorageError> {
        Ok(self
            .inventories
            .get(&inventory)
            .map(|state| state.items.len() as u64)
            .unwrap_or(0))
    }

    async fn custom_id_exists(
        &self,
        inventory: InventoryId,
        candidate: &str,
        excluded: Option<ItemId>,
    ) -> Result<bool, StorageError> {
        let Some(state) = self.inventories.get(&inventory) else {
            return Ok(false);
        };
        Ok(state
            .items
            .iter()
            .any(|item| item.custom_id.as_str() == candidate && Some(item.id) != excluded))
    }
}
