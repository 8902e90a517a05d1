use thiserror::Error;

#[derive(Error, Debug)]
pub enum UserFeatureError {
    #[error("Domain error: {0}")]
    Domain(#[from] domain::DomainError),

    #[error("{0}")]
    Validation(String),

    #[error("username already exists")]
    UsernameTaken(String),

    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("authentication required")]
    Unauthenticated,

    #[error("User not found: {0}")]
    NotFound(i64),

    #[error("Password hashing error: {0}")]
    Hashing(String),

    #[error("Session lifetime out of range")]
    SessionLifetime,

    #[error("Session token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}
