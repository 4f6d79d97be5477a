use gcn_isadb::IsaDbError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FuzzerError {
    #[error("Invalid fuzzer options: {0}")]
    InvalidOptions(String),
    #[error("Opcode database error: {0}")]
    IsaDb(#[from] IsaDbError),
}
