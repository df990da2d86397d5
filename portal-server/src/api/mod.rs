//! HTTP API
//!
//! One router per resource, merged in [`build_app`]. Health routes are
//! public; everything under `/api` authenticates through the
//! [`crate::auth::VendorContext`] extractor.

pub mod actions;
pub mod dashboard;
pub mod health;
pub mod orders;

use axum::{Router, middleware};
use std::time::Duration;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;

use crate::core::ServerState;

/// HTTP access-log middleware
async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    let status = response.status();

    tracing::info!(target: "http_access", "{} {} {}", method, uri, status);

    response
}

/// Build the full application router
pub fn build_app(state: ServerState) -> Router {
    let request_timeout = Duration::from_millis(state.config.request_timeout_ms);

    Router::new()
        .merge(health::router())
        .merge(orders::router())
        .merge(actions::router())
        .merge(dashboard::router())
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(request_timeout))
        .layer(middleware::from_fn(log_request))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use chrono::{Duration, Utc};
    use http::{Request, StatusCode};
    use serde_json::{Value, json};
    use shared::models::{ActionType, OrderActionRequest, OrderStatus, PurchaseOrder, RequestStatus};
    use tower::Service;

    fn seed_order(state: &ServerState, id: &str, status: OrderStatus) {
        state
            .store
            .put_order(&PurchaseOrder {
                id: id.to_string(),
                vendor_id: "vendor-1".to_string(),
                plant_id: "plant-1".to_string(),
                order_date: Utc::now(),
                expected_delivery_date: Utc::now() + Duration::days(14),
                actual_delivery_date: None,
                status,
            })
            .unwrap();
    }

    fn seed_cancel_action(state: &ServerState, id: &str, order_id: &str) {
        state
            .store
            .put_action(&OrderActionRequest {
                id: id.to_string(),
                purchase_order_id: order_id.to_string(),
                vendor_id: "vendor-1".to_string(),
                action_type: ActionType::Cancel,
                message: "Customer cancelled".to_string(),
                status: RequestStatus::Pending,
                created_at: Utc::now(),
                resolved_at: None,
                resolved_by: None,
                vendor_response: None,
            })
            .unwrap();
    }

    fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }
        match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn send(app: &mut Router, req: Request<Body>) -> (StatusCode, Value) {
        let response = app.call(req).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_health_is_public() {
        let state = ServerState::for_tests();
        let mut app = build_app(state);

        let (status, body) = send(&mut app, request("GET", "/health", None, None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_protected_route_requires_token() {
        let state = ServerState::for_tests();
        let mut app = build_app(state);

        let (status, body) = send(&mut app, request("GET", "/api/orders", None, None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], 1001);
    }

    #[tokio::test]
    async fn test_order_listing_and_pending_flags() {
        let state = ServerState::for_tests();
        seed_order(&state, "po-1", OrderStatus::Pending);
        seed_order(&state, "po-2", OrderStatus::Shipped);
        seed_cancel_action(&state, "act-1", "po-1");
        let token = state
            .jwt_service
            .generate_token("user-1", "vendor-1", "acme-user")
            .unwrap();
        let mut app = build_app(state);

        let (status, body) =
            send(&mut app, request("GET", "/api/orders", Some(&token), None)).await;
        assert_eq!(status, StatusCode::OK);
        let entries = body["data"].as_array().unwrap();
        assert_eq!(entries.len(), 2);
        let flagged: Vec<bool> = entries
            .iter()
            .map(|e| e["has_pending_action"].as_bool().unwrap())
            .collect();
        assert!(flagged.contains(&true));
    }

    #[tokio::test]
    async fn test_status_update_walk() {
        let state = ServerState::for_tests();
        seed_order(&state, "po-1", OrderStatus::Pending);
        let token = state
            .jwt_service
            .generate_token("user-1", "vendor-1", "acme-user")
            .unwrap();
        let mut app = build_app(state);

        // Skipping a step is refused
        let (status, body) = send(
            &mut app,
            request(
                "PUT",
                "/api/orders/po-1",
                Some(&token),
                Some(json!({"status": "SHIPPED"})),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["code"], 4002);

        // The single allowed next step succeeds
        let (status, body) = send(
            &mut app,
            request(
                "PUT",
                "/api/orders/po-1",
                Some(&token),
                Some(json!({"status": "CONFIRMED"})),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], "CONFIRMED");

        // Selectable set now offers CONFIRMED and SHIPPED only
        let (status, body) = send(
            &mut app,
            request("GET", "/api/orders/po-1/statuses", Some(&token), None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], json!(["CONFIRMED", "SHIPPED"]));
    }

    #[tokio::test]
    async fn test_resolve_cancel_end_to_end() {
        let state = ServerState::for_tests();
        seed_order(&state, "po-1", OrderStatus::Confirmed);
        seed_cancel_action(&state, "act-1", "po-1");
        let token = state
            .jwt_service
            .generate_token("user-1", "vendor-1", "acme-user")
            .unwrap();
        let store = state.store.clone();
        let mut app = build_app(state);

        // Reject without a reason is refused up front
        let (status, body) = send(
            &mut app,
            request(
                "POST",
                "/api/actions/act-1/resolve",
                Some(&token),
                Some(json!({"decision": "REJECT", "vendor_response": "  "})),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], 5003);

        // Approval cancels the order and records the default response
        let (status, body) = send(
            &mut app,
            request(
                "POST",
                "/api/actions/act-1/resolve",
                Some(&token),
                Some(json!({"decision": "APPROVE"})),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["request"]["status"], "APPROVED");
        assert_eq!(body["data"]["request"]["vendor_response"], "Approved");
        assert_eq!(body["data"]["order"]["status"], "CANCELLED");
        assert_eq!(
            store.get_order("po-1").unwrap().unwrap().status,
            OrderStatus::Cancelled
        );

        // A second resolution attempt observes the conflict
        let (status, body) = send(
            &mut app,
            request(
                "POST",
                "/api/actions/act-1/resolve",
                Some(&token),
                Some(json!({"decision": "APPROVE"})),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["code"], 5002);
    }

    #[tokio::test]
    async fn test_cross_vendor_access_denied() {
        let state = ServerState::for_tests();
        seed_order(&state, "po-1", OrderStatus::Pending);
        let token = state
            .jwt_service
            .generate_token("user-9", "vendor-9", "other-user")
            .unwrap();
        let mut app = build_app(state);

        let (status, body) = send(
            &mut app,
            request("GET", "/api/orders/po-1", Some(&token), None),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["code"], 2001);
    }

    #[tokio::test]
    async fn test_dashboard_empty_vendor() {
        let state = ServerState::for_tests();
        let token = state
            .jwt_service
            .generate_token("user-1", "vendor-1", "acme-user")
            .unwrap();
        let mut app = build_app(state);

        let (status, body) = send(
            &mut app,
            request("GET", "/api/dashboard", Some(&token), None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["total_orders"], 0);
        assert_eq!(body["data"]["pending_actions"], 0);
        assert_eq!(body["data"]["on_time_delivery_rate"], 0.0);
    }
}
