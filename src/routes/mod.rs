//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the JSON API that view layers call into. Every route
//! is a thin translation onto one `TicketStore` operation. Store errors and
//! requests that fail to decode both become `{code, message}` JSON bodies
//! here and nowhere else.

pub mod auth;
pub mod dashboard;
pub mod tickets;

use axum::Router;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::{ErrorCode, FieldErrors, StoreError};
use crate::state::AppState;

/// Build the full API router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/demo", post(auth::demo_login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))
        .route("/api/dashboard", get(dashboard::dashboard))
        .route("/api/stats", get(dashboard::stats))
        .route("/api/categories", get(dashboard::categories))
        .route("/api/search", get(tickets::get_search).put(tickets::set_search))
        .route("/api/tickets", get(tickets::list_tickets).post(tickets::create_ticket))
        .route(
            "/api/tickets/{id}",
            get(tickets::get_ticket)
                .patch(tickets::update_ticket)
                .delete(tickets::delete_ticket),
        )
        .route("/api/tickets/{id}/close", post(tickets::close_ticket))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

// =============================================================================
// ERROR MAPPING
// =============================================================================

/// Handler rejection: a store error, or a request axum could not decode.
#[derive(Debug)]
pub enum ApiError {
    Store(StoreError),
    BadRequest { status: StatusCode, code: &'static str, message: String },
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

impl From<FieldErrors> for ApiError {
    fn from(errors: FieldErrors) -> Self {
        Self::Store(StoreError::Validation(errors))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest { status: rejection.status(), code: "E_INVALID_BODY", message: rejection.body_text() }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest { status: rejection.status(), code: "E_INVALID_QUERY", message: rejection.body_text() }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest { status: rejection.status(), code: "E_INVALID_PATH", message: rejection.body_text() }
    }
}

pub(crate) fn store_error_to_status(err: &StoreError) -> StatusCode {
    match err {
        StoreError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        StoreError::NotFound(_) => StatusCode::NOT_FOUND,
        StoreError::IdsExhausted { .. } => StatusCode::INSUFFICIENT_STORAGE,
        StoreError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = match self {
            Self::Store(err) => err,
            Self::BadRequest { status, code, message } => {
                tracing::debug!(%status, code, %message, "request rejected");
                let body = serde_json::json!({ "code": code, "message": message, "retryable": false });
                return (status, Json(body)).into_response();
            }
        };

        let status = store_error_to_status(&err);
        match &err {
            StoreError::Validation(fields) => tracing::debug!(fields = fields.len(), "request failed validation"),
            _ if status.is_server_error() => {
                tracing::error!(error = %err, code = err.error_code(), "store operation failed");
            }
            _ => {}
        }

        let mut body = serde_json::json!({
            "code": err.error_code(),
            "message": err.to_string(),
            "retryable": err.retryable(),
        });
        if let StoreError::Validation(fields) = &err {
            body["fields"] = serde_json::json!(fields);
        }
        (status, Json(body)).into_response()
    }
}

// =============================================================================
// EXTRACTORS
// =============================================================================

/// `Json` whose rejection is an `ApiError` body.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// `Query` whose rejection is an `ApiError` body.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

/// `Path` whose rejection is an `ApiError` body.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

// =============================================================================
// TEST SUPPORT
// =============================================================================


#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
