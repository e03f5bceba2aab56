//! Authentication handlers.

use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Extension, Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::UserRole;
use crate::errors::AppResult;
use crate::services::LoginResponse;

/// User login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    #[schema(example = "planner")]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "SecurePass123!")]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VerifyTokenResponse {
    #[schema(example = "Token is valid")]
    pub message: String,
    pub username: String,
    pub role: UserRole,
}

/// Public authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

/// Routes that only need a valid token
pub fn session_routes() -> Router<AppState> {
    Router::new().route("/verify-token", get(verify_token))
}

/// Login and get JWT token
#[utoipa::path(
    post,
    path = "/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let response = state
        .auth_service
        .login(payload.username, payload.password)
        .await?;

    Ok(Json(response))
}

/// Echo the identity carried by the bearer token
#[utoipa::path(
    get,
    path = "/verify-token",
    tag = "Authentication",
    responses(
        (status = 200, description = "Token is valid", body = VerifyTokenResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Unknown role")
    ),
    security(("bearer_auth" = []))
)]
pub async fn verify_token(Extension(user): Extension<CurrentUser>) -> Json<VerifyTokenResponse> {
    Json(VerifyTokenResponse {
        message: "Token is valid".to_string(),
        username: user.username,
        role: user.role,
    })
}
