//! API Handlers

pub mod auth;
pub mod customers;
pub mod finance;
pub mod health;
pub mod parts;
pub mod quotes;
pub mod service_orders;
pub mod vehicles;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::Json;

use crate::api::dto::ApiResponse;
use crate::domain::{DomainError, RepositoryProvider};

/// Application state for API handlers
#[derive(Clone)]
pub struct AppState {
    pub repos: Arc<dyn RepositoryProvider>,
}

/// Map a domain error to the HTTP status + response envelope.
pub(crate) fn error_response(e: DomainError) -> (StatusCode, Json<ApiResponse<()>>) {
    let status = match &e {
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::Conflict(_) => StatusCode::CONFLICT,
        DomainError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        DomainError::Forbidden(_) => StatusCode::FORBIDDEN,
    };
    (status, Json(ApiResponse::error(e.to_string())))
}
