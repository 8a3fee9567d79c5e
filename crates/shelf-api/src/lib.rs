//! # shelf-api
//!
//! The narrow request/response interface between a transport layer and a
//! Shelf store. This crate owns two things the store itself never does:
//!
//! - the **validation gate**: confirming a payload is declared and encoded
//!   as JSON before the store is invoked ([`parse_payload`]);
//! - the **outcome mapping**: translating typed store results into an HTTP
//!   status code and a JSON body ([`ResourceApi`], [`ApiError`]).
//!
//! No routing or framework binding lives here; a transport (HTTP server,
//! CLI, test harness) calls [`ResourceApi`] and writes the returned
//! `(StatusCode, Value)` pair out however it likes.

pub use http::StatusCode;
use serde_json::{Value, json};
use thiserror::Error;

use shelf_core::{Fields, StoreError};
use shelf_storage::{DynStore, UpdateMode};

/// The media type the gate accepts for create/update payloads.
pub const JSON_MEDIA_TYPE: &str = "application/json";

// -------------------------
// API errors
// -------------------------

/// High-level API errors to be mapped to HTTP-style responses.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }
    pub fn unsupported_media_type(msg: impl Into<String>) -> Self {
        Self::UnsupportedMediaType(msg.into())
    }
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The `{"error": "<message>"}` body for this error.
    pub fn body(&self) -> Value {
        let message = match self {
            ApiError::BadRequest(msg)
            | ApiError::NotFound(msg)
            | ApiError::UnsupportedMediaType(msg)
            | ApiError::Internal(msg) => msg,
        };
        json!({ "error": message })
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { resource_type, .. } => {
                ApiError::not_found(format!("{resource_type} not found"))
            }
            StoreError::Validation { message } => ApiError::bad_request(message),
            // Seed misuse is a construction-time error; a live transport
            // should never see it as anything but a server fault.
            StoreError::Conflict { .. } => ApiError::internal(err.to_string()),
        }
    }
}

// -------------------------
// Validation gate
// -------------------------

fn media_type_is_json(content_type: &str) -> bool {
    // Parameters such as "; charset=utf-8" are tolerated.
    content_type
        .split(';')
        .next()
        .map(str::trim)
        .is_some_and(|mt| mt.eq_ignore_ascii_case(JSON_MEDIA_TYPE))
}

/// Checks the declared content type and parses the body into a field map.
///
/// This runs before any store operation: a payload that fails here never
/// reaches the store, so the store stays free of transport concerns.
///
/// # Errors
///
/// - `UnsupportedMediaType` when the content type is missing or not
///   `application/json`;
/// - `BadRequest` when the body is not valid JSON or not a JSON object.
pub fn parse_payload(content_type: Option<&str>, body: &[u8]) -> Result<Fields, ApiError> {
    match content_type {
        Some(ct) if media_type_is_json(ct) => {}
        Some(ct) => {
            return Err(ApiError::unsupported_media_type(format!(
                "expected {JSON_MEDIA_TYPE}, got {ct}"
            )));
        }
        None => {
            return Err(ApiError::unsupported_media_type(format!(
                "missing content type, expected {JSON_MEDIA_TYPE}"
            )));
        }
    }

    match serde_json::from_slice::<Fields>(body) {
        Ok(fields) => Ok(fields),
        Err(_) => {
            if serde_json::from_slice::<Value>(body).is_ok() {
                Err(ApiError::bad_request("request body must be a JSON object"))
            } else {
                Err(ApiError::bad_request("malformed JSON body"))
            }
        }
    }
}

// -------------------------
// Resource API
// -------------------------

/// A ready-to-serialize response: status code plus JSON body.
pub type ApiResponse = (StatusCode, Value);

fn failure(err: ApiError) -> ApiResponse {
    (err.status_code(), err.body())
}

fn record_body(record: &shelf_core::Record) -> Result<Value, ApiError> {
    serde_json::to_value(record).map_err(|e| ApiError::internal(e.to_string()))
}

/// The request/response surface a transport layer drives.
///
/// Every method returns a `(StatusCode, Value)` pair following the mapping:
///
/// | operation | success | failure |
/// |---|---|---|
/// | `list` | 200, array of records | — |
/// | `get` | 200, record | 404 |
/// | `create` | 201, created record | 400 / 415 |
/// | `update` | 200, updated record | 400 / 404 / 415 |
/// | `delete` | 200, `{"message": "deleted"}` | 404 |
///
/// Failure bodies are always `{"error": "<message>"}`.
#[derive(Clone)]
pub struct ResourceApi {
    store: DynStore,
}

impl ResourceApi {
    pub fn new(store: DynStore) -> Self {
        Self { store }
    }

    /// Access to the underlying store, for callers that need it directly.
    pub fn store(&self) -> &DynStore {
        &self.store
    }

    pub async fn list(&self) -> ApiResponse {
        let records = self.store.list().await;
        match serde_json::to_value(&records) {
            Ok(body) => (StatusCode::OK, body),
            Err(e) => failure(ApiError::internal(e.to_string())),
        }
    }

    pub async fn get(&self, id: u64) -> ApiResponse {
        match self.store.get(id).await {
            Ok(record) => match record_body(&record) {
                Ok(body) => (StatusCode::OK, body),
                Err(e) => failure(e),
            },
            Err(e) => failure(e.into()),
        }
    }

    pub async fn create(&self, content_type: Option<&str>, body: &[u8]) -> ApiResponse {
        let fields = match parse_payload(content_type, body) {
            Ok(fields) => fields,
            Err(e) => return failure(e),
        };
        match self.store.create(&fields).await {
            Ok(record) => match record_body(&record) {
                Ok(body) => (StatusCode::CREATED, body),
                Err(e) => failure(e),
            },
            Err(e) => failure(e.into()),
        }
    }

    pub async fn update(
        &self,
        id: u64,
        content_type: Option<&str>,
        body: &[u8],
        mode: UpdateMode,
    ) -> ApiResponse {
        let fields = match parse_payload(content_type, body) {
            Ok(fields) => fields,
            Err(e) => return failure(e),
        };
        match self.store.update(id, &fields, mode).await {
            Ok(record) => match record_body(&record) {
                Ok(body) => (StatusCode::OK, body),
                Err(e) => failure(e),
            },
            Err(e) => failure(e.into()),
        }
    }

    pub async fn delete(&self, id: u64) -> ApiResponse {
        match self.store.delete(id).await {
            Ok(()) => (StatusCode::OK, json!({ "message": "deleted" })),
            Err(e) => failure(e.into()),
        }
    }
}
