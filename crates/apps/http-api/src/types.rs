use domain::{Todo, User};
use serde::Serialize;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;

/// Body of every error response
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: String,
}

/// Returned by register and login
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub id: i64,
    pub username: String,
    pub token: String,
}

impl AuthResponse {
    pub fn new(user: &User, token: String) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            token,
        }
    }
}

/// JSON representation of a Todo
#[derive(Debug, Serialize)]
pub struct TodoResponse {
    pub id: i64,
    pub title: String,
    pub is_completed: bool,
    pub details: String,
    pub photo: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub alarm_time: Option<String>,
    pub repeat_days: Vec<String>,
    pub due_date: Option<String>,
}

impl TodoResponse {
    /// `media_url` is the public prefix of the upload directory
    pub fn from_todo(todo: Todo, media_url: &str) -> Self {
        Self {
            id: todo.id,
            title: todo.title,
            is_completed: todo.is_completed,
            details: todo.details,
            photo: todo
                .photo
                .map(|path| format!("{}/{}", media_url.trim_end_matches('/'), path)),
            created_at: todo.created_at.format(&Rfc3339).ok(),
            updated_at: todo.updated_at.format(&Rfc3339).ok(),
            alarm_time: todo
                .alarm_time
                .and_then(|t| t.format(format_description!("[hour]:[minute]")).ok()),
            repeat_days: todo.repeat_days.into_vec(),
            due_date: todo
                .due_date
                .and_then(|d| d.format(format_description!("[year]-[month]-[day]")).ok()),
        }
    }
}
