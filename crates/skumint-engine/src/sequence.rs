//! Sequence ordinal resolution.

use crate::error::Result;
use skumint_core::{CatalogRepository, InventoryId};

/// Computes the next sequence ordinal for an inventory: the current item
/// count plus one.
///
/// This is a read-then-compute with no atomicity: two concurrent calls for
/// the same inventory can observe the same count and produce the same
/// ordinal. The engine takes no lock and does not retry; the storage
/// layer's unique (inventory, identifier) index is what finally rejects
/// the loser, and callers should treat that rejection as an expected,
/// retryable conflict.
pub async fn next_ordinal<S: CatalogRepository>(
    repository: &S,
    inventory: InventoryId,
) -> Result<u64> {
    let count = repository.item_count(inventory).await?;
    Ok(count + 1)
}
