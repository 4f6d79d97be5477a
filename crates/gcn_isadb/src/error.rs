use thiserror::Error;

#[derive(Debug, Error)]
pub enum IsaDbError {
    #[error("Invalid options: {0}")]
    InvalidOptions(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Invalid record '{name}': {reason}")]
    InvalidRecord { name: String, reason: String },
}
