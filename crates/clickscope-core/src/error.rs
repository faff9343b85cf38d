use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid stored timestamp: {0}")]
    InvalidTimestamp(String),
}
