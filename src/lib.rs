pub mod api;
pub mod config;
pub mod domain;
pub mod models;
pub mod scoring;
pub mod store;

// Re-export commonly used types
pub use models::{Item, PointsResponse, ProcessReceiptResponse, Receipt};

pub use scoring::{calculate_breakdown, calculate_points, strip_non_alphanumeric_chars, PointsBreakdown};

pub use store::{ReceiptId, ReceiptStore, StoreStats};

pub use config::{ConfigError, LogFormat, ServerConfig};
