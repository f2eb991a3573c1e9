//! Настройки валидации.

use crate::{
    error::{Result, TransactionError},
    model::TransactionKind,
};
use serde::{Deserialize, Serialize};
use std::io::Read;

pub const DEFAULT_MIN_YEAR: i32 = 1000;
pub const DEFAULT_MAX_YEAR: i32 = 3000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Нижняя граница года (включительно).
    pub min_year: i32,
    /// Верхняя граница года (включительно).
    pub max_year: i32,
    /// Тип, подставляемый при сборке из полного входа без `kind`.
    /// По умолчанию `None`: вход без `kind` не подменяется на `normal`,
    /// а `build` падает с `MissingField { field: "kind" }`. Чтобы вернуть
    /// прежнее поведение, задайте `Some(TransactionKind::Normal)`.
    pub default_kind: Option<TransactionKind>,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_year: DEFAULT_MIN_YEAR,
            max_year: DEFAULT_MAX_YEAR,
            default_kind: None,
        }
    }
}

impl ValidationConfig {
    pub fn validate(&self) -> Result<()> {
        if self.min_year > self.max_year {
            return Err(TransactionError::Parse(format!(
                "min_year {} is greater than max_year {}",
                self.min_year, self.max_year
            )));
        }
        Ok(())
    }

    /// Читает JSON-конфиг; отсутствующие поля берутся по умолчанию.
    pub fn from_reader<R: Read>(r: R) -> Result<Self> {
        let cfg: ValidationConfig = serde_json::from_reader(r)?;
        cfg.validate()?;
        Ok(cfg)
    }
}
