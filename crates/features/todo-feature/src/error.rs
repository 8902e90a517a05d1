use thiserror::Error;

#[derive(Error, Debug)]
pub enum TodoFeatureError {
    #[error("Domain error: {0}")]
    Domain(#[from] domain::DomainError),

    #[error("{0}")]
    Validation(String),

    #[error("todo not found")]
    NotFound(i64),

    #[error("Photo storage error: {0}")]
    Storage(#[from] std::io::Error),
}
