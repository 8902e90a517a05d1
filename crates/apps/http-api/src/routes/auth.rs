use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use user_feature::UserService;

use crate::decode::decode_credentials;
use crate::error::ApiError;
use crate::types::AuthResponse;
use crate::AppState;

/// `POST /auth/register`
pub async fn register(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let credentials = decode_credentials(&body)?;
    let user = UserService::register(&state.pool, credentials).await?;
    let token = state.sessions.issue(user.id)?;

    Ok((StatusCode::CREATED, Json(AuthResponse::new(&user, token))))
}

/// `POST /auth/login`
pub async fn login(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<AuthResponse>, ApiError> {
    let credentials = decode_credentials(&body)?;
    let user = UserService::login(&state.pool, credentials).await?;
    let token = state.sessions.issue(user.id)?;

    Ok(Json(AuthResponse::new(&user, token)))
}
