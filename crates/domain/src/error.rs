use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Conflict: {0}")]
    Conflict(String),
}

impl DomainError {
    /// Map a unique-constraint violation to `Conflict`, pass everything else through
    pub(crate) fn from_insert(err: sqlx::Error, what: impl Into<String>) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                DomainError::Conflict(what.into())
            }
            _ => DomainError::Database(err),
        }
    }
}
