use tracing::info;

use crate::domain::DomainError;
use crate::models::Receipt;
use crate::store::{ReceiptId, ReceiptStore};

/// Record a receipt and return its newly assigned id
pub fn store_receipt(store: &ReceiptStore, receipt: Receipt) -> ReceiptId {
    let item_count = receipt.items.len();
    let id = store.insert(receipt);
    info!(receipt_id = %id, item_count, "Stored receipt");
    id
}

/// Points for a previously stored receipt
pub fn score_receipt(store: &ReceiptStore, id: &str) -> Result<u64, DomainError> {
    let points = store
        .points(id)
        .ok_or_else(|| DomainError::ReceiptNotFound(id.to_string()))?;

    info!(receipt_id = %id, points, "Scored receipt");
    Ok(points)
}
