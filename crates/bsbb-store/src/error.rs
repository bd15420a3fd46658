use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("slot I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("a business with id \"{0}\" already exists")]
    DuplicateId(String),

    #[error("invalid slot key \"{0}\": only ASCII letters, digits, '-' and '_' are allowed")]
    InvalidKey(String),
}
