//! HTTP handlers

pub mod addresses;
pub mod customers;
pub mod health;

pub use health::health;

#[cfg(test)]
pub(crate) mod test_support {
    use crate::storage::Database;
    use crate::{build_router, AppState};
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        Router,
    };
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;

    pub async fn test_app() -> (Router, Arc<Database>) {
        let db = Arc::new(Database::new("sqlite::memory:", 1).await.unwrap());
        let app = build_router(AppState { db: db.clone() });
        (app, db)
    }

    pub async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => request
                .header("content-type", "application/json")
                .body(Body::from(json.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    pub async fn create_customer(app: &Router, first: &str, city: &str, state: &str) -> Value {
        let (status, body) = send(
            app,
            "POST",
            "/customers",
            Some(serde_json::json!({
                "FirstName": first,
                "LastName": "Simpson",
                "PhoneNumber": "555-0100",
                "City": city,
                "State": state,
                "PinCode": "62701",
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body
    }
}
