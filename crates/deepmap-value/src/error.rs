use thiserror::Error;

/// Errors produced while building values from external representations.
#[derive(Debug, Error)]
pub enum ValueError {
    #[error("number has no f64 representation: {0}")]
    InvalidNumber(String),

    #[error("timestamp out of range: {0} ms")]
    DateOutOfRange(i64),

    #[error("invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for value results.
pub type ValueResult<T> = Result<T, ValueError>;
