#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        Router,
    };
    use receipt_processor::api::server::{create_app, AppState};
    use receipt_processor::models::{PointsResponse, ProcessReceiptResponse};
    use receipt_processor::store::ReceiptStore;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_app() -> Router {
        create_app(AppState::default())
    }

    fn test_receipt_body() -> Value {
        json!({
            "retailer": "test retailer",
            "purchaseDate": "2023-10-07",
            "purchaseTime": "15:00",
            "items": [
                { "shortDescription": "test description", "price": "1.00" },
                { "shortDescription": "test description", "price": "1.00" }
            ],
            "total": "2.00"
        })
    }

    async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    async fn post_receipt(app: &Router, body: impl Into<Body>) -> axum::response::Response {
        app.clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/receipts/process")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(body.into())
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn get_points(app: &Router, id: &str) -> axum::response::Response {
        app.clone()
            .oneshot(
                Request::builder()
                    .uri(format!("/receipts/{}/points", id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn process(app: &Router, body: &Value) -> String {
        let response = post_receipt(app, body.to_string()).await;
        assert_eq!(response.status(), StatusCode::OK);

        let parsed: ProcessReceiptResponse =
            serde_json::from_slice(&body_bytes(response).await).unwrap();
        parsed.id
    }

    async fn points(app: &Router, id: &str) -> u64 {
        let response = get_points(app, id).await;
        assert_eq!(response.status(), StatusCode::OK);

        let parsed: PointsResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
        parsed.points
    }

    #[tokio::test]
    async fn test_health_check() {
        let response = test_app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(&body_bytes(response).await[..], b"OK");
    }

    #[tokio::test]
    async fn test_process_then_points() {
        let app = test_app();

        let id = process(&app, &test_receipt_body()).await;
        assert!(!id.is_empty());

        assert_eq!(points(&app, &id).await, 108);
        // second read is served from the points cache
        assert_eq!(points(&app, &id).await, 108);
    }

    #[tokio::test]
    async fn test_process_response_shape() {
        let app = test_app();
        let response = post_receipt(&app, test_receipt_body().to_string()).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        let object = body.as_object().unwrap();
        assert_eq!(object.len(), 1);

        let id = object["id"].as_str().unwrap();
        assert_eq!(id.len(), 36);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit() || c == '-'));
    }

    #[tokio::test]
    async fn test_descriptions_divisible_by_three() {
        let app = test_app();
        let mut body = test_receipt_body();
        body["items"] = json!([
            { "shortDescription": "divisible by three", "price": "1.00" },
            { "shortDescription": "divisible by three", "price": "1.00" }
        ]);

        let id = process(&app, &body).await;
        assert_eq!(points(&app, &id).await, 110);
    }

    #[tokio::test]
    async fn test_corner_market_receipt() {
        let app = test_app();
        let body = json!({
            "retailer": "M&M Corner Market",
            "purchaseDate": "2022-03-20",
            "purchaseTime": "14:33",
            "items": [
                { "shortDescription": "Gatorade", "price": "2.25" },
                { "shortDescription": "Gatorade", "price": "2.25" },
                { "shortDescription": "Gatorade", "price": "2.25" },
                { "shortDescription": "Gatorade", "price": "2.25" }
            ],
            "total": "9.00"
        });

        let id = process(&app, &body).await;
        assert_eq!(points(&app, &id).await, 109);
    }

    #[tokio::test]
    async fn test_unknown_id() {
        let response = get_points(&test_app(), "3f2e5b1c-9a0d-4c4e-8f6a-2b7d9e1c0a55").await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(&body_bytes(response).await[..], b"No receipt found for that id");
    }

    #[tokio::test]
    async fn test_ids_are_not_shared_between_apps() {
        let id = process(&test_app(), &test_receipt_body()).await;

        let response = get_points(&test_app(), &id).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_invalid_json() {
        let app = test_app();

        for body in ["", "not json", "{\"retailer\": ", "[1, 2, 3]", "null"] {
            let response = post_receipt(&app, body.to_string()).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body {:?}", body);
            assert_eq!(&body_bytes(response).await[..], b"The receipt is invalid");
        }
    }

    #[tokio::test]
    async fn test_missing_field_is_invalid() {
        let app = test_app();
        let mut body = test_receipt_body();
        body.as_object_mut().unwrap().remove("total");

        let response = post_receipt(&app, body.to_string()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(&body_bytes(response).await[..], b"The receipt is invalid");
    }

    #[tokio::test]
    async fn test_content_type_not_required() {
        let app = test_app();
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/receipts/process")
                    .body(Body::from(test_receipt_body().to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unparseable_values_still_accepted() {
        let app = test_app();
        let body = json!({
            "retailer": "",
            "purchaseDate": "someday",
            "purchaseTime": "noon",
            "items": [{ "shortDescription": "abc", "price": "free" }],
            "total": "lots"
        });

        let id = process(&app, &body).await;
        // only the zero-value date's odd day scores
        assert_eq!(points(&app, &id).await, 6);
    }

    #[tokio::test]
    async fn test_huge_prices_score_without_error() {
        let app = test_app();
        let mut body = test_receipt_body();
        body["items"] = json!([
            { "shortDescription": "abc", "price": "45000000000000000000" },
            { "shortDescription": "abc", "price": "45000000000000000000" },
            { "shortDescription": "abc", "price": "45000000000000000000" }
        ]);

        let id = process(&app, &body).await;
        assert_eq!(points(&app, &id).await, u64::MAX);
        assert_eq!(points(&app, &id).await, u64::MAX);
    }

    #[tokio::test]
    async fn test_handlers_share_the_given_store() {
        let store = Arc::new(ReceiptStore::new());
        let app = create_app(AppState::new(store.clone()));

        let id = process(&app, &test_receipt_body()).await;
        assert_eq!(store.len(), 1);
        assert!(store.get(&id).is_some());

        assert_eq!(points(&app, &id).await, 108);
        let stats = store.stats();
        assert_eq!(stats.cached_points, 1);
        assert_eq!(stats.cache_misses, 1);
    }

    #[tokio::test]
    async fn test_concurrent_requests() {
        let app = test_app();

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let app = app.clone();
                tokio::spawn(async move {
                    let id = process(&app, &test_receipt_body()).await;
                    points(&app, &id).await
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.await.unwrap(), 108);
        }
    }
}
