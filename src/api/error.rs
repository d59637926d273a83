use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;
use tracing::warn;

use crate::domain::DomainError;

pub const INVALID_RECEIPT_MESSAGE: &str = "The receipt is invalid";
pub const RECEIPT_NOT_FOUND_MESSAGE: &str = "No receipt found for that id";

/// Errors surfaced over HTTP
///
/// Clients only ever see the fixed plain-text message for each variant; the
/// carried detail goes to the logs. Panics are turned into 500s by the router's
/// `CatchPanicLayer`, so no variant maps to a server error.
#[derive(Debug)]
pub enum ApiError {
    InvalidReceipt(String),
    ReceiptNotFound(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::InvalidReceipt(msg) => write!(f, "Invalid receipt: {}", msg),
            ApiError::ReceiptNotFound(id) => write!(f, "Receipt not found: {}", id),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Unknown ids are a 400, not a 404, to match existing clients
        let message = match &self {
            ApiError::InvalidReceipt(_) => INVALID_RECEIPT_MESSAGE,
            ApiError::ReceiptNotFound(_) => RECEIPT_NOT_FOUND_MESSAGE,
        };

        warn!(error = %self, "Request rejected");

        (StatusCode::BAD_REQUEST, message).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::ReceiptNotFound(id) => ApiError::ReceiptNotFound(id),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::InvalidReceipt(format!("JSON error: {}", err))
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_text(response: Response) -> String {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(body.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_invalid_receipt_response() {
        let response = ApiError::InvalidReceipt("EOF while parsing".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(response).await, "The receipt is invalid");
    }

    #[tokio::test]
    async fn test_not_found_response() {
        let response: Response =
            ApiError::from(DomainError::ReceiptNotFound("abc".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(response).await, "No receipt found for that id");
    }

    #[tokio::test]
    async fn test_json_error_detail_is_not_exposed() {
        let err = serde_json::from_str::<serde_json::Value>("{\"retailer\": ").unwrap_err();
        let api_err = ApiError::from(err);
        assert!(api_err.to_string().starts_with("Invalid receipt: JSON error"));

        let response = api_err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(response).await, "The receipt is invalid");
    }

    #[test]
    fn test_display() {
        let err = ApiError::ReceiptNotFound("abc".to_string());
        assert_eq!(err.to_string(), "Receipt not found: abc");
    }
}
