//! Request body decoders.
//!
//! JSON and multipart bodies each decode independently into the same
//! [`TodoInput`]; everything after that is encoding-agnostic.

use axum::extract::multipart::{Multipart, MultipartError};
use serde_json::{Map, Value};
use todo_feature::input::{is_truthy_text, parse_repeat_days};
use todo_feature::{Field, PhotoUpload, TodoInput};
use user_feature::Credentials;

use crate::error::ApiError;

fn parse_object(body: &[u8]) -> Result<Map<String, Value>, ApiError> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(fields)) => Ok(fields),
        Ok(_) => Err(ApiError::MalformedBody("expected a JSON object".to_string())),
        Err(_) => Err(ApiError::MalformedBody("invalid JSON".to_string())),
    }
}

/// Username and password from a JSON body. Missing or non-string values read as empty.
pub fn decode_credentials(body: &[u8]) -> Result<Credentials, ApiError> {
    let fields = parse_object(body)?;
    let text = |key: &str| {
        fields
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };

    Ok(Credentials {
        username: text("username"),
        password: text("password"),
    })
}

/// Todo fields from a JSON body
pub fn decode_json_todo(body: &[u8]) -> Result<TodoInput, ApiError> {
    let mut fields = parse_object(body)?;

    Ok(TodoInput {
        title: text_field(fields.remove("title")),
        details: text_field(fields.remove("details")),
        is_completed: match fields.remove("is_completed") {
            None => Field::Absent,
            Some(value) => Field::Value(is_truthy(&value)),
        },
        alarm_time: text_field(fields.remove("alarm_time")),
        repeat_days: days_field(fields.remove("repeat_days"))?,
        due_date: text_field(fields.remove("due_date")),
        photo: None,
    })
}

fn text_field(value: Option<Value>) -> Field<String> {
    match value {
        None => Field::Absent,
        Some(Value::Null) => Field::Null,
        Some(Value::String(s)) => Field::Value(s),
        Some(other) => Field::Value(other.to_string()),
    }
}

fn days_field(value: Option<Value>) -> Result<Field<Vec<String>>, ApiError> {
    match value {
        None => Ok(Field::Absent),
        Some(Value::Null) => Ok(Field::Null),
        Some(Value::String(s)) => Ok(Field::Value(parse_repeat_days(&s))),
        Some(Value::Array(items)) => Ok(Field::Value(
            items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => s,
                    other => other.to_string(),
                })
                .collect(),
        )),
        Some(_) => Err(ApiError::Validation(
            "repeat_days must be a list of day names".to_string(),
        )),
    }
}

/// Truthiness of a JSON value: false, 0, "", null and empty containers are false
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

fn malformed(err: MultipartError) -> ApiError {
    ApiError::MalformedBody(err.body_text())
}

/// Todo fields from a multipart form. Every field is text except `photo`.
pub async fn decode_multipart_todo(mut multipart: Multipart) -> Result<TodoInput, ApiError> {
    let mut input = TodoInput::default();

    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == "photo" {
            let file_name = field.file_name().map(str::to_string);
            let content_type = field.content_type().map(str::to_string);
            let bytes = field.bytes().await.map_err(malformed)?;

            // Browsers send an empty part when no file was chosen
            if !bytes.is_empty() {
                input.photo = Some(PhotoUpload {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            continue;
        }

        let text = field.text().await.map_err(malformed)?;
        match name.as_str() {
            "title" => input.title = Field::Value(text),
            "details" => input.details = Field::Value(text),
            "is_completed" => input.is_completed = Field::Value(is_truthy_text(&text)),
            "alarm_time" => input.alarm_time = Field::Value(text),
            "repeat_days" => input.repeat_days = Field::Value(parse_repeat_days(&text)),
            "due_date" => input.due_date = Field::Value(text),
            _ => {}
        }
    }

    Ok(input)
}
