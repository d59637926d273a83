// Receipt operations shared by the HTTP handlers: storing a submitted
// receipt and scoring a stored one through the points cache

pub mod receipts;

// An unknown id is the only failure; malformed receipt fields score zero instead
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("No receipt found for id {0}")]
    ReceiptNotFound(String),
}

pub use receipts::{score_receipt, store_receipt};
