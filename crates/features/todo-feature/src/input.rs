//! Parsed todo input shared by every request encoding.
//!
//! Transport decoders only decide, per field, whether a key was absent, null,
//! or carried a value. Validation and conversion into repository values
//! happens here, once, for both create and update.

use domain::{NewTodo, RepeatDays, TodoChanges};
use time::macros::format_description;
use time::{Date, Time};

use crate::error::TodoFeatureError;

pub const MAX_TITLE_LEN: usize = 200;
pub const MAX_REPEAT_DAYS_LEN: usize = 100;

/// A field of a partial input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Field<T> {
    #[default]
    Absent,
    Null,
    Value(T),
}

impl<T> Field<T> {
    pub fn is_present(&self) -> bool {
        !matches!(self, Field::Absent)
    }

    /// `None` when absent, `Some(None)` when null
    pub fn into_option(self) -> Option<Option<T>> {
        match self {
            Field::Absent => None,
            Field::Null => Some(None),
            Field::Value(v) => Some(Some(v)),
        }
    }
}

/// An uploaded photo file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoUpload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl PhotoUpload {
    /// Only a named file declared as `image/*` is accepted
    fn validate(&self) -> Result<(), TodoFeatureError> {
        let is_image = self
            .content_type
            .as_deref()
            .is_some_and(|ct| ct.trim().to_ascii_lowercase().starts_with("image/"));

        if self.file_name.is_none() || !is_image {
            return Err(TodoFeatureError::Validation(
                "photo must be an image file".to_string(),
            ));
        }
        Ok(())
    }
}

/// Todo fields as submitted by the client
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TodoInput {
    pub title: Field<String>,
    pub details: Field<String>,
    pub is_completed: Field<bool>,
    pub alarm_time: Field<String>,
    pub repeat_days: Field<Vec<String>>,
    pub due_date: Field<String>,
    pub photo: Option<PhotoUpload>,
}

impl TodoInput {
    /// Validate for creation. The photo is returned separately, unsaved.
    pub fn into_new_todo(
        self,
        user_id: Option<i64>,
    ) -> Result<(NewTodo, Option<PhotoUpload>), TodoFeatureError> {
        if let Some(photo) = &self.photo {
            photo.validate()?;
        }

        let todo = NewTodo {
            user_id,
            title: validate_title(self.title)?,
            details: match self.details {
                Field::Value(details) => details,
                _ => String::new(),
            },
            photo: None,
            alarm_time: match self.alarm_time {
                Field::Value(raw) => parse_alarm_time(&raw),
                _ => None,
            },
            repeat_days: match self.repeat_days {
                Field::Value(days) => validate_repeat_days(days)?,
                _ => RepeatDays::default(),
            },
            due_date: match self.due_date {
                Field::Value(raw) => parse_due_date(&raw)?,
                _ => None,
            },
        };

        Ok((todo, self.photo))
    }

    /// Validate for a partial update; absent fields produce no change
    pub fn into_changes(self) -> Result<(TodoChanges, Option<PhotoUpload>), TodoFeatureError> {
        if let Some(photo) = &self.photo {
            photo.validate()?;
        }

        let title = if self.title.is_present() {
            Some(validate_title(self.title)?)
        } else {
            None
        };

        let due_date = match self.due_date {
            Field::Absent => None,
            Field::Null => Some(None),
            Field::Value(raw) => Some(parse_due_date(&raw)?),
        };

        let repeat_days = match self.repeat_days {
            Field::Absent => None,
            Field::Null => Some(RepeatDays::default()),
            Field::Value(days) => Some(validate_repeat_days(days)?),
        };

        let changes = TodoChanges {
            title,
            is_completed: self.is_completed.into_option().map(|v| v.unwrap_or(false)),
            details: self.details.into_option().map(Option::unwrap_or_default),
            photo: None,
            alarm_time: self
                .alarm_time
                .into_option()
                .map(|raw| raw.as_deref().and_then(parse_alarm_time)),
            repeat_days,
            due_date,
        };

        Ok((changes, self.photo))
    }
}

fn validate_title(title: Field<String>) -> Result<String, TodoFeatureError> {
    let title = match title {
        Field::Value(title) => title.trim().to_string(),
        _ => String::new(),
    };

    if title.is_empty() {
        return Err(TodoFeatureError::Validation("title is required".to_string()));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(TodoFeatureError::Validation(format!(
            "title must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(title)
}

fn validate_repeat_days(days: Vec<String>) -> Result<RepeatDays, TodoFeatureError> {
    let days = RepeatDays::new(days);
    if days.to_stored().len() > MAX_REPEAT_DAYS_LEN {
        return Err(TodoFeatureError::Validation(
            "repeat_days is too long".to_string(),
        ));
    }
    Ok(days)
}

/// Parse an `HH:MM` alarm time. Anything else, out-of-range values included,
/// yields `None` rather than an error.
pub fn parse_alarm_time(raw: &str) -> Option<Time> {
    Time::parse(raw, format_description!("[hour]:[minute]")).ok()
}

/// Parse a `YYYY-MM-DD` due date. Blank clears the date.
pub fn parse_due_date(raw: &str) -> Result<Option<Date>, TodoFeatureError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    Date::parse(raw, format_description!("[year]-[month]-[day]"))
        .map(Some)
        .map_err(|_| TodoFeatureError::Validation("due_date must be YYYY-MM-DD".to_string()))
}

/// Interpret repeat days sent as text: a JSON array of strings, or failing
/// that a comma-separated list
pub fn parse_repeat_days(raw: &str) -> Vec<String> {
    if let Ok(days) = serde_json::from_str::<Vec<String>>(raw) {
        return days;
    }

    raw.split(',')
        .map(str::trim)
        .filter(|day| !day.is_empty())
        .map(str::to_string)
        .collect()
}

/// Boolean reading of a form field
pub fn is_truthy_text(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}
