use thiserror::Error;

/// Error type that captures storage, decoding, and validation failures.
#[derive(Debug, Error)]
pub enum FinanceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Corrupt data under `{key}`: {reason}")]
    CorruptData { key: String, reason: String },
    #[error("Invalid amount `{value}` on transaction {id}")]
    InvalidAmount { id: String, value: String },
    #[error("Transaction {id} uses unknown category `{category}`")]
    UnknownCategory { id: String, category: String },
    #[error("{total} is not representable: {value}")]
    TotalOverflow { total: &'static str, value: f64 },
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl FinanceError {
    pub fn corrupt(key: impl Into<String>, reason: impl ToString) -> Self {
        FinanceError::CorruptData {
            key: key.into(),
            reason: reason.to_string(),
        }
    }

    /// Whether the failure points at stored data rather than the caller or environment.
    pub fn is_data_integrity(&self) -> bool {
        matches!(
            self,
            FinanceError::CorruptData { .. }
                | FinanceError::InvalidAmount { .. }
                | FinanceError::UnknownCategory { .. }
                | FinanceError::TotalOverflow { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, FinanceError>;
