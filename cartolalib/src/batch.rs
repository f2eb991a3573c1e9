//! Пакетная сборка: много входов → канонические записи.

use crate::{
    builder::TransactionBuilder,
    config::ValidationConfig,
    error::{Result, TransactionError},
    model::{TransactionInput, TransactionRecord},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatchMode {
    /// Первая ошибка прерывает пакет.
    #[default]
    FailFast,
    /// Ошибки собираются, пакет идёт дальше.
    Collect,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub records: Vec<TransactionRecord>,
    pub rejected: Vec<(usize, TransactionError)>,
}

pub fn build_one(input: &TransactionInput, config: &ValidationConfig) -> Result<TransactionRecord> {
    TransactionBuilder::from_input_with_config(input, config.clone())?.build()
}

pub fn build_all(
    inputs: &[TransactionInput],
    config: &ValidationConfig,
    mode: BatchMode,
) -> Result<BatchReport> {
    config.validate()?;
    let mut report = BatchReport::default();

    for (index, input) in inputs.iter().enumerate() {
        match build_one(input, config) {
            Ok(rec) => report.records.push(rec),
            Err(e) if mode == BatchMode::FailFast => {
                return Err(TransactionError::Record {
                    index,
                    source: Box::new(e),
                })
            }
            Err(e) => {
                tracing::warn!(index, error = %e, "transaction rejected");
                report.rejected.push((index, e));
            }
        }
    }

    tracing::info!(
        total = inputs.len(),
        built = report.records.len(),
        rejected = report.rejected.len(),
        "batch finished"
    );
    Ok(report)
}
