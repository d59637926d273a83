use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::models::Receipt;
use crate::scoring::calculate_points;

/// Opaque receipt identifier: a hyphenated v4 UUID
pub type ReceiptId = String;

/// Snapshot of store sizes and points cache effectiveness
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreStats {
    pub receipts: usize,
    pub cached_points: usize,
    pub cache_hits: u64,
    pub cache_misses: u64,
}

/// In-memory receipt registry with a memoized points cache
///
/// Entries live for the lifetime of the process and are never mutated or
/// removed. Every id in the points cache is also in the registry.
#[derive(Default)]
pub struct ReceiptStore {
    /// Receipt id to stored receipt
    receipts: RwLock<HashMap<ReceiptId, Arc<Receipt>>>,
    /// Receipt id to previously computed points
    points: RwLock<HashMap<ReceiptId, u64>>,
    cache_hits: AtomicU64,
    cache_misses: AtomicU64,
}

impl ReceiptStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a receipt under a freshly generated v4 UUID and return the id
    pub fn insert(&self, receipt: Receipt) -> ReceiptId {
        let id = Uuid::new_v4().to_string();
        self.receipts.write().insert(id.clone(), Arc::new(receipt));
        id
    }

    pub fn get(&self, id: &str) -> Option<Arc<Receipt>> {
        self.receipts.read().get(id).cloned()
    }

    /// Points for a stored receipt, computed on first request and cached
    ///
    /// Returns `None` when no receipt has been stored under `id`.
    pub fn points(&self, id: &str) -> Option<u64> {
        let cached = self.points.read().get(id).copied();
        if let Some(points) = cached {
            self.cache_hits.fetch_add(1, Ordering::Relaxed);
            return Some(points);
        }

        let receipt = self.get(id)?;
        self.cache_misses.fetch_add(1, Ordering::Relaxed);

        let points = calculate_points(&receipt);
        debug!(receipt_id = %id, points, "Computed points");

        // A racing caller may have filled the entry; both values are identical
        let mut cache = self.points.write();
        Some(*cache.entry(id.to_string()).or_insert(points))
    }

    pub fn len(&self) -> usize {
        self.receipts.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.receipts.read().is_empty()
    }

    pub fn stats(&self) -> StoreStats {
        StoreStats {
            receipts: self.len(),
            cached_points: self.points.read().len(),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            cache_misses: self.cache_misses.load(Ordering::Relaxed),
        }
    }
}
