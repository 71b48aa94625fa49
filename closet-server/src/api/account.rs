//! Registration, login, sessions and profile management

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Extension, Json,
};
use closet_common::api::{
    validate_email, validate_registration, ApiResponse, ProfileRecord, SessionRecord, UserRecord,
};
use closet_common::Error;
use serde::Deserialize;
use tracing::info;

use crate::api::{ApiError, AuthUser};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub username: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[serde(default)]
    pub current_password: String,
    #[serde(default)]
    pub new_password: String,
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<SessionRecord>>), ApiError> {
    let Json(req) = payload?;
    validate_registration(&req.username, &req.email, &req.password)?;

    let user = state
        .store
        .create_user(req.username.trim(), req.email.trim(), &req.password)
        .await?;
    let token = state
        .store
        .create_session(user.id, state.session_ttl_seconds)
        .await?;

    info!("Registered user {} ({})", user.username, user.id);

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            SessionRecord {
                token,
                user: user.into(),
            },
            "User registered successfully",
        )),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<SessionRecord>>, ApiError> {
    let Json(req) = payload?;
    if req.username.trim().is_empty() || req.password.is_empty() {
        return Err(Error::Validation("Username and password are required".to_string()).into());
    }

    let user = state
        .store
        .verify_credentials(req.username.trim(), &req.password)
        .await?;
    let token = state
        .store
        .create_session(user.id, state.session_ttl_seconds)
        .await?;

    Ok(Json(ApiResponse::with_message(
        SessionRecord {
            token,
            user: user.into(),
        },
        "Login successful",
    )))
}

/// GET /api/auth/me
pub async fn me(Extension(auth): Extension<AuthUser>) -> Json<ApiResponse<UserRecord>> {
    Json(ApiResponse::ok(auth.user.into()))
}

/// POST /api/auth/logout
///
/// Revokes only the token used for this request.
pub async fn logout(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.store.delete_session(&auth.token).await?;
    Ok(Json(ApiResponse::message("Logged out successfully")))
}

/// GET /api/users/profile
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<ApiResponse<ProfileRecord>>, ApiError> {
    let user = state.store.get_user(auth.user.id).await?;
    let stats = state.store.user_stats(auth.user.id).await?;

    Ok(Json(ApiResponse::ok(ProfileRecord {
        user: user.into(),
        stats: stats.into(),
    })))
}

/// PUT /api/users/profile
///
/// Blank fields are treated as absent.
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    payload: Result<Json<UpdateProfileRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<UserRecord>>, ApiError> {
    let Json(req) = payload?;
    let username = req.username.as_deref().map(str::trim).filter(|s| !s.is_empty());
    let email = req.email.as_deref().map(str::trim).filter(|s| !s.is_empty());

    if let Some(email) = email {
        validate_email(email)?;
    }

    let user = state
        .store
        .update_profile(auth.user.id, username, email)
        .await?;

    Ok(Json(ApiResponse::with_message(
        user.into(),
        "Profile updated successfully",
    )))
}

/// PUT /api/users/change-password
pub async fn change_password(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    payload: Result<Json<ChangePasswordRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let Json(req) = payload?;
    if req.current_password.is_empty() || req.new_password.is_empty() {
        return Err(
            Error::Validation("Current and new password are required".to_string()).into(),
        );
    }

    state
        .store
        .change_password(auth.user.id, &req.current_password, &req.new_password)
        .await?;

    Ok(Json(ApiResponse::message("Password updated successfully")))
}

/// DELETE /api/users
///
/// Removes the account with its sessions, items and outfits.
pub async fn delete_account(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.store.delete_user(auth.user.id).await?;
    info!("Deleted user {} ({})", auth.user.username, auth.user.id);
    Ok(Json(ApiResponse::message("Account deleted successfully")))
}
