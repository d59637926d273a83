use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, Path, State},
    Json,
};
use tracing::info;

use crate::api::error::{ApiError, ApiResult};
use crate::api::server::AppState;
use crate::domain;
use crate::models::{PointsResponse, ProcessReceiptResponse, Receipt};

/// Store a receipt and return its id
///
/// The body is decoded as JSON regardless of `Content-Type`; a body that cannot
/// be read or decoded into a receipt is rejected with a 400.
#[tracing::instrument(skip(state, body))]
pub async fn process_receipt_handler(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<Json<ProcessReceiptResponse>> {
    let body = body.map_err(|e| ApiError::InvalidReceipt(e.body_text()))?;
    info!(body_len = body.len(), "Processing receipt");

    let receipt: Receipt = serde_json::from_slice(&body)?;
    let id = domain::store_receipt(&state.store, receipt);

    Ok(Json(ProcessReceiptResponse { id }))
}

#[tracing::instrument(skip(state), fields(receipt_id = %id))]
pub async fn get_points_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> ApiResult<Json<PointsResponse>> {
    let points = domain::score_receipt(&state.store, &id)?;
    Ok(Json(PointsResponse { points }))
}

pub async fn health_check() -> &'static str {
    "OK"
}
