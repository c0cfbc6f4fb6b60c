use thiserror::Error;

#[derive(Error, Debug)]
pub enum AutopulseError {
    #[error("Article not found: {0}")]
    ArticleNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Store error: {0}")]
    Store(String),

    /// A form submission is missing required fields.
    #[error("{0}")]
    Validation(String),

    /// The whole import was rejected; nothing was changed.
    #[error("Import rejected: {0}")]
    ImportRejected(String),

    #[error("Error generating article: {0}")]
    AiGeneration(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, AutopulseError>;
