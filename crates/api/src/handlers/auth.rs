//! Handlers for account endpoints (register, login, logout, current user).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use inkpost_core::account::{Credentials, RegistrationInput};
use inkpost_core::error::CoreError;
use inkpost_db::models::access_token::CreateAccessToken;
use inkpost_db::models::user::{CreateUser, User, UserResponse};
use serde::Serialize;

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::extract::JsonBody;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Successful authentication response returned by register and login.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    /// Always `"Bearer"`.
    pub token_type: &'static str,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/register
pub async fn register(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> AppResult<(StatusCode, Json<TokenResponse>)> {
    let mut input = RegistrationInput::parse(&body);
    if let Some(email) = input.email_to_verify() {
        if state.store.find_user_by_email(email).await?.is_some() {
            input.reject_taken_email();
        }
    }
    let registration = input.finish()?;

    let password_hash = hash_password(&registration.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    let user = state
        .store
        .create_user(&CreateUser::new(registration, password_hash))
        .await?;

    tracing::info!(user_id = user.id, "User registered");
    let response = issue_token(&state, &user).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/login
///
/// Unknown email and wrong password are indistinguishable to the client.
pub async fn login(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> AppResult<Json<TokenResponse>> {
    let credentials = Credentials::parse(&body)?;

    let user = state
        .store
        .find_user_by_email(&credentials.email)
        .await?
        .ok_or_else(invalid_credentials)?;

    let password_valid = verify_password(&credentials.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::info!(user_id = user.id, "Login rejected: wrong password");
        return Err(invalid_credentials());
    }

    tracing::info!(user_id = user.id, "User logged in");
    let response = issue_token(&state, &user).await?;
    Ok(Json(response))
}

/// POST /api/logout
///
/// Revokes only the token presented with this request.
pub async fn logout(State(state): State<AppState>, user: AuthUser) -> AppResult<StatusCode> {
    state.store.revoke_access_token(&user.jti).await?;
    tracing::info!(user_id = user.user_id, "User logged out");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/user
pub async fn me(State(state): State<AppState>, user: AuthUser) -> AppResult<Json<UserResponse>> {
    let user = state
        .store
        .find_user(user.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthenticated("User no longer exists".into()))
        })?;
    Ok(Json(UserResponse::from(&user)))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthenticated("Invalid credentials".into()))
}

/// Sign a token, record its `jti`, and build the response.
async fn issue_token(state: &AppState, user: &User) -> AppResult<TokenResponse> {
    let issued = generate_access_token(user.id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let expires_at = issued
        .claims
        .expires_at()
        .ok_or_else(|| AppError::InternalError("Token expiry out of range".into()))?;

    state
        .store
        .create_access_token(&CreateAccessToken {
            user_id: user.id,
            jti: issued.claims.jti.clone(),
            expires_at,
        })
        .await?;

    Ok(TokenResponse {
        access_token: issued.token,
        token_type: "Bearer",
        expires_in: state.config.jwt.expires_in_secs(),
        user: UserResponse::from(user),
    })
}
