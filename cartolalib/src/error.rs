//! Единый тип ошибок публичного API.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransactionError {
    #[error("Invalid key: {key} is not a transaction field")]
    InvalidKey { key: String },

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid kind: {0}")]
    InvalidKind(String),

    #[error("Invalid balance: {0}")]
    InvalidBalance(String),

    #[error("Invalid charge: {0}")]
    InvalidCharge(String),

    #[error("Invalid deposit: {0}")]
    InvalidDeposit(String),

    #[error("Invalid usd: {0}")]
    InvalidUsd(String),

    #[error("Invalid description: {0}")]
    InvalidDescription(String),

    #[error("Invalid interest rate: {0}")]
    InvalidInterestRate(String),

    #[error("Invalid dues: {0}")]
    InvalidDues(String),

    #[error("{field} is not set")]
    MissingField { field: &'static str },

    #[error("record #{index}: {source}")]
    Record {
        index: usize,
        #[source]
        source: Box<TransactionError>,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl TransactionError {
    /// Имя поля, к которому относится ошибка валидации (если есть).
    pub fn field(&self) -> Option<&str> {
        match self {
            TransactionError::InvalidKey { key } => Some(key.as_str()),
            TransactionError::InvalidDate(_) => Some("date"),
            TransactionError::InvalidKind(_) => Some("kind"),
            TransactionError::InvalidBalance(_) => Some("balance"),
            TransactionError::InvalidCharge(_) => Some("charge"),
            TransactionError::InvalidDeposit(_) => Some("deposit"),
            TransactionError::InvalidUsd(_) => Some("usd"),
            TransactionError::InvalidDescription(_) => Some("description"),
            TransactionError::InvalidInterestRate(_) => Some("interest_rate"),
            TransactionError::InvalidDues(_) => Some("dues"),
            TransactionError::MissingField { field } => Some(*field),
            TransactionError::Record { source, .. } => source.field(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, TransactionError>;
