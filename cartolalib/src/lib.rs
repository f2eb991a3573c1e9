//! cartolalib — проверка и нормализация транзакций банковской выписки.

pub mod batch;
pub mod builder;
pub mod config;
pub mod error;
pub mod model;
pub mod traits;
pub mod validate;

pub mod formats {
    pub mod csv;
    pub mod json;
}

pub use builder::TransactionBuilder;
pub use error::{Result, TransactionError};
pub use model::{Dues, TransactionInput, TransactionKind, TransactionRecord};
