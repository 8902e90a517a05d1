//! Weekday recurrence for todos.
//!
//! Callers only ever see a list of day names. The serialized text form lives
//! in the `todos.repeat_days` column and is produced and consumed here alone.

/// Ordered list of weekday names a todo repeats on, e.g. `["Mon", "Wed"]`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepeatDays(Vec<String>);

impl RepeatDays {
    pub fn new(days: Vec<String>) -> Self {
        Self(days)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }

    /// Column text for this list. An empty list is stored as the empty string.
    pub fn to_stored(&self) -> String {
        if self.0.is_empty() {
            return String::new();
        }
        serde_json::to_string(&self.0).unwrap_or_default()
    }

    /// Decode column text. Unset or malformed text decodes to an empty list.
    pub fn from_stored(stored: &str) -> Self {
        if stored.trim().is_empty() {
            return Self::default();
        }
        Self(serde_json::from_str::<Vec<String>>(stored).unwrap_or_default())
    }
}

impl From<Vec<String>> for RepeatDays {
    fn from(days: Vec<String>) -> Self {
        Self(days)
    }
}
