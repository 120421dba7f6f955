//! Authentication API handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Extension, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::common::ValidatedJson;
use crate::api::dto::ApiResponse;
use crate::auth::{create_token, hash_password, verify_password, AuthenticatedUser, JwtConfig};
use crate::domain::RepositoryProvider;

/// Auth state for authentication handlers
#[derive(Clone)]
pub struct AuthHandlerState {
    pub repos: Arc<dyn RepositoryProvider>,
    pub jwt_config: JwtConfig,
}

/// Login request
#[derive(Debug, Deserialize, ToSchema)]
#[schema(example = json!({
    "username": "admin",
    "password": "secret123"
}))]
pub struct LoginRequest {
    /// Username
    pub username: String,
    /// Password
    pub password: String,
}

/// Successful login response
///
/// Carries the JWT for subsequent requests, passed in the
/// `Authorization: Bearer <token>` header.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    /// JWT access token
    pub token: String,
    /// Token type (always `Bearer`)
    pub token_type: String,
    /// Token lifetime in seconds
    pub expires_in: i64,
    /// The authenticated user
    pub user: UserInfo,
}

/// User account details
#[derive(Debug, Serialize, ToSchema)]
pub struct UserInfo {
    /// Unique user ID (UUID)
    pub id: String,
    /// Username
    pub username: String,
    /// Email address
    pub email: String,
    /// `admin` or `operator`
    pub role: String,
}

/// Request to change the current user's password
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ChangePasswordRequest {
    /// Current password
    pub current_password: String,
    /// New password (at least 8 characters)
    #[validate(length(min = 8, message = "must be at least 8 characters"))]
    pub new_password: String,
}

/// Log in
///
/// Returns a JWT on successful authentication. Disabled accounts get 401.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated; returns a JWT", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid credentials or disabled account")
    )
)]
pub async fn login(
    State(state): State<AuthHandlerState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    let user = state
        .repos
        .users()
        .find_by_username(&request.username)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(e.to_string())),
            )
        })?;

    let Some(user) = user else {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::error("Invalid credentials")),
        ));
    };

    if !user.is_active {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::error("Account is disabled")),
        ));
    }

    let password_ok = verify_password(&request.password, &user.password_hash).unwrap_or(false);
    if !password_ok {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::error("Invalid credentials")),
        ));
    }

    let role = user.role.to_string();
    let token = create_token(&user.id, &user.username, &role, &state.jwt_config).map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!("Failed to create token: {}", e))),
        )
    })?;

    // Best effort; a failed timestamp update must not block the login
    let _ = state.repos.users().record_login(&user.id, Utc::now()).await;

    Ok(Json(ApiResponse::success(LoginResponse {
        token,
        token_type: "Bearer".to_string(),
        expires_in: state.jwt_config.expiration_hours * 3600,
        user: UserInfo {
            id: user.id,
            username: user.username,
            email: user.email,
            role,
        },
    })))
}

/// Current user
///
/// Returns the account behind the presented token.
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "Authentication",
    responses(
        (status = 200, description = "The authenticated user", body = ApiResponse<UserInfo>),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_current_user(
    State(state): State<AuthHandlerState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<UserInfo>>, (StatusCode, Json<ApiResponse<()>>)> {
    let user = state
        .repos
        .users()
        .find_by_id(&auth_user.user_id)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(e.to_string())),
            )
        })?;

    let Some(user) = user else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("User not found")),
        ));
    };

    Ok(Json(ApiResponse::success(UserInfo {
        id: user.id,
        username: user.username,
        email: user.email,
        role: user.role.to_string(),
    })))
}

/// Change password
///
/// Requires the current password; the new one must be at least 8
/// characters.
#[utoipa::path(
    put,
    path = "/api/v1/auth/change-password",
    tag = "Authentication",
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed"),
        (status = 401, description = "Current password is wrong"),
        (status = 422, description = "New password too short")
    ),
    security(("bearer_auth" = []))
)]
pub async fn change_password(
    State(state): State<AuthHandlerState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<ChangePasswordRequest>,
) -> Result<Json<ApiResponse<String>>, (StatusCode, Json<ApiResponse<()>>)> {
    let user = state
        .repos
        .users()
        .find_by_id(&auth_user.user_id)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(e.to_string())),
            )
        })?;

    let Some(user) = user else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("User not found")),
        ));
    };

    let current_ok =
        verify_password(&request.current_password, &user.password_hash).unwrap_or(false);
    if !current_ok {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::error("Current password is wrong")),
        ));
    }

    let new_hash = hash_password(&request.new_password).map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!("Failed to hash password: {}", e))),
        )
    })?;

    state
        .repos
        .users()
        .update_password(&user.id, &new_hash)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(e.to_string())),
            )
        })?;

    Ok(Json(ApiResponse::success("Password changed".to_string())))
}
