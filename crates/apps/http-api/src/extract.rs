use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Multipart, Request},
    http::{header, request::Parts},
};
use domain::User;
use todo_feature::TodoInput;
use user_feature::UserService;

use crate::decode::{decode_json_todo, decode_multipart_todo};
use crate::error::ApiError;
use crate::AppState;

/// The user identified by the request's `Authorization: Bearer` token
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(bearer_token)
            .ok_or_else(ApiError::unauthenticated)?;

        let user = UserService::authenticate(&state.pool, &state.sessions, token).await?;
        Ok(CurrentUser(user))
    }
}

/// Token from an `Authorization` value. The scheme name is case-insensitive.
fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();

    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// Todo fields from either a JSON or a multipart body
pub struct TodoForm(pub TodoInput);

impl FromRequest<AppState> for TodoForm {
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|ct| ct.starts_with("multipart/form-data"));

        let input = if is_multipart {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| ApiError::MalformedBody(e.body_text()))?;
            decode_multipart_todo(multipart).await?
        } else {
            let body = Bytes::from_request(req, state)
                .await
                .map_err(|e| ApiError::MalformedBody(e.body_text()))?;
            decode_json_todo(&body)?
        };

        Ok(TodoForm(input))
    }
}
