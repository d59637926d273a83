use serde::{Deserialize, Serialize};

use crate::store::ReceiptId;

/// Response body for `POST /receipts/process`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessReceiptResponse {
    pub id: ReceiptId,
}

/// Response body for `GET /receipts/{id}/points`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsResponse {
    pub points: u64,
}
