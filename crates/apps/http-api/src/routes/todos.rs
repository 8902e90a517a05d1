use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use todo_feature::TodoService;

use crate::error::ApiError;
use crate::extract::{CurrentUser, TodoForm};
use crate::types::{MessageBody, TodoResponse};
use crate::AppState;

/// A path id that is not an integer names no todo
fn todo_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::NotFound("todo not found".to_string()))
}

/// `GET /todos`
pub async fn list(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<TodoResponse>>, ApiError> {
    let todos = TodoService::list_for_user(&state.pool, user.id).await?;

    Ok(Json(
        todos
            .into_iter()
            .map(|todo| TodoResponse::from_todo(todo, &state.media_url))
            .collect(),
    ))
}

/// `POST /todos`
pub async fn create(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    TodoForm(input): TodoForm,
) -> Result<(StatusCode, Json<TodoResponse>), ApiError> {
    let todo = TodoService::create(&state.pool, &state.photos, user.id, input).await?;

    Ok((
        StatusCode::CREATED,
        Json(TodoResponse::from_todo(todo, &state.media_url)),
    ))
}

/// `GET /todos/{id}`
pub async fn get(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<TodoResponse>, ApiError> {
    let todo = TodoService::get(&state.pool, user.id, todo_id(&id)?).await?;

    Ok(Json(TodoResponse::from_todo(todo, &state.media_url)))
}

/// `PATCH /todos/{id}`
pub async fn update(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
    TodoForm(input): TodoForm,
) -> Result<Json<TodoResponse>, ApiError> {
    let id = todo_id(&id)?;
    let todo = TodoService::update(&state.pool, &state.photos, user.id, id, input).await?;

    Ok(Json(TodoResponse::from_todo(todo, &state.media_url)))
}

/// `DELETE /todos/{id}`
pub async fn delete(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<MessageBody>, ApiError> {
    TodoService::delete(&state.pool, &state.photos, user.id, todo_id(&id)?).await?;

    Ok(Json(MessageBody {
        message: "todo deleted".to_string(),
    }))
}
