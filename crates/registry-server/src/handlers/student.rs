//! Student endpoints
//!
//! - `POST /api/students` - create
//! - `GET /api/students` - list
//! - `GET /api/students/{id}` - get by id

use axum::body::Bytes;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::{debug, info, instrument};

use registry_core::{Student, StudentPayload};

use super::AppState;
use crate::response::{ApiError, CreatedId};

/// Create a student from a JSON body
#[instrument(skip_all)]
pub async fn create(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<CreatedId>), ApiError> {
    let payload = decode_payload(&body)?;

    let new = state.validator.validate(payload).map_err(|errors| {
        debug!(fields = ?errors.fields(), "validation failed");
        errors
    })?;

    let id = state.store.create_student(&new).await?;

    debug!(email = %new.email, "stored student");
    info!(id, "student created");
    Ok((StatusCode::CREATED, Json(CreatedId { id })))
}

/// Fetch one student by id
#[instrument(skip_all)]
pub async fn get_by_id(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<Student>, ApiError> {
    let Path(id) = id.map_err(ApiError::BadPath)?;
    let id: i64 = id.parse().map_err(ApiError::InvalidId)?;

    info!(id, "fetching student");
    let student = state.store.get_student(id).await?;
    Ok(Json(student))
}

/// List every student
#[instrument(skip_all)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Student>>, ApiError> {
    let students = state.store.list_students().await?;

    info!(count = students.len(), "listed students");
    Ok(Json(students))
}

/// Decode a create body, telling an empty body apart from a malformed one
fn decode_payload(body: &[u8]) -> Result<StudentPayload, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        debug!("empty body received");
        return Err(ApiError::EmptyBody);
    }

    serde_json::from_slice(body).map_err(ApiError::MalformedBody)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Request};
    use axum::Router;
    use registry_core::MemoryStore;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::response::ErrorEnvelope;

    fn app() -> Router {
        crate::router(AppState::new(Arc::new(MemoryStore::new())))
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn post(body: impl Into<Body>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/students")
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.into())
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn envelope(value: Value) -> ErrorEnvelope {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn test_create_returns_id() {
        let app = app();
        let body = json!({"name": "Ada", "email": "ada@example.com", "age": 36}).to_string();

        let (status, value) = send(&app, post(body)).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(value, json!({"id": 1}));
    }

    #[tokio::test]
    async fn test_create_empty_body_is_decode_error() {
        let app = app();
        let (status, value) = send(&app, post(Body::empty())).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let envelope = envelope(value);
        assert_eq!(envelope.status, "Error");
        assert_eq!(envelope.error, "request body is empty");
    }

    #[tokio::test]
    async fn test_create_malformed_body() {
        let app = app();
        let (status, value) = send(&app, post("{\"name\": ")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(envelope(value).error.starts_with("invalid request body:"));
    }

    #[tokio::test]
    async fn test_create_wrong_field_type() {
        let app = app();
        let body = json!({"name": "Ada", "email": "a@b.c", "age": "old"}).to_string();
        let (status, value) = send(&app, post(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(envelope(value).error.starts_with("invalid request body:"));
    }

    #[tokio::test]
    async fn test_create_reports_all_missing_fields() {
        let app = app();
        let (status, value) = send(&app, post(json!({"age": 20}).to_string())).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let message = envelope(value).error;
        assert!(message.contains("field name is required"));
        assert!(message.contains("field email is required"));
        assert!(!message.contains("age"));
    }

    #[tokio::test]
    async fn test_create_zero_age_accepted() {
        let app = app();
        let body = json!({"name": "Baby", "email": "baby@example.com", "age": 0}).to_string();
        let (status, _) = send(&app, post(body)).await;

        assert_eq!(status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_create_duplicate_email_conflicts() {
        let app = app();
        let body = json!({"name": "Ada", "email": "ada@example.com", "age": 36}).to_string();
        send(&app, post(body.clone())).await;

        let (status, value) = send(&app, post(body)).await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert!(envelope(value).error.contains("already exists"));
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let app = app();
        let body = json!({"name": "Ada", "email": "ada@example.com", "age": 36}).to_string();
        send(&app, post(body)).await;

        let (status, value) = send(&app, get("/api/students/1")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            value,
            json!({"id": 1, "name": "Ada", "email": "ada@example.com", "age": 36})
        );
    }

    #[tokio::test]
    async fn test_get_bad_id() {
        let app = app();
        let (status, value) = send(&app, get("/api/students/abc")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(envelope(value).error.starts_with("invalid id format:"));
    }

    #[tokio::test]
    async fn test_get_undecodable_id_is_json_error() {
        let app = app();
        let (status, value) = send(&app, get("/api/students/%FF")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let envelope = envelope(value);
        assert_eq!(envelope.status, "Error");
        assert!(envelope.error.starts_with("invalid id format:"));
    }

    #[tokio::test]
    async fn test_get_id_with_surrounding_space_rejected() {
        let app = app();
        let body = json!({"name": "Ada", "email": "ada@example.com", "age": 36}).to_string();
        send(&app, post(body)).await;

        let (status, value) = send(&app, get("/api/students/%201")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(envelope(value).error.starts_with("invalid id format:"));
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_not_found() {
        let app = app();
        let (status, value) = send(&app, get("/api/students/77")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(envelope(value).error, "student with id 77 not found");
    }

    #[tokio::test]
    async fn test_list_empty_is_array() {
        let app = app();
        let (status, value) = send(&app, get("/api/students")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(value, json!([]));
    }

    #[tokio::test]
    async fn test_list_after_creates() {
        let app = app();
        for i in 0..3 {
            let body = json!({"name": format!("s{i}"), "email": format!("s{i}@example.com"), "age": i})
                .to_string();
            send(&app, post(body)).await;
        }

        let (status, value) = send(&app, get("/api/students")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(value.as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_decode_whitespace_body_is_empty() {
        assert!(matches!(decode_payload(b"  \n"), Err(ApiError::EmptyBody)));
    }
}
