// Receipt endpoints plus the liveness probe. Bodies are decoded here and
// everything else is delegated to `crate::domain`.

pub mod receipts;

pub use receipts::{get_points_handler, health_check, process_receipt_handler};
