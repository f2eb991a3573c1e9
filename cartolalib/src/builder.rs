//! Пошаговая сборка транзакции: поля задаются по одному (каждое
//! проверяется сразу), полнота проверяется только в [`TransactionBuilder::build`].
//!
//! Builder не синхронизирован внутри: один владелец на экземпляр.

use crate::{
    config::ValidationConfig,
    error::{Result, TransactionError},
    model::{check_keys, Dues, TransactionInput, TransactionKind, TransactionRecord},
    validate,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionBuilder {
    config: ValidationConfig,
    date: Option<NaiveDate>,
    kind: Option<TransactionKind>,
    balance: Option<Decimal>,
    charge: Option<Decimal>,
    deposit: Option<Decimal>,
    description: Option<String>,
    extended_description: Option<String>,
    dues: Option<Dues>,
    interest_rate: Option<Decimal>,
    serial: Option<String>,
    usd: Option<Decimal>,
}

/// Сохраняет значение только после успешной проверки.
fn store<T: Clone>(slot: &mut Option<T>, field: &str, checked: Result<T>) -> Result<T> {
    let v = checked?;
    tracing::trace!(field, "field set");
    *slot = Some(v.clone());
    Ok(v)
}

impl TransactionBuilder {
    /// Пустой builder: ни одно поле не задано.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ValidationConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn from_input(input: &TransactionInput) -> Result<Self> {
        Self::from_input_with_config(input, ValidationConfig::default())
    }

    /// Полный вход: проверка ключей, затем обязательные поля, затем
    /// необязательные со значениями по умолчанию. Останавливается на первой ошибке.
    pub fn from_input_with_config(input: &TransactionInput, config: ValidationConfig) -> Result<Self> {
        check_keys(input)?;
        let mut b = Self::with_config(config);

        if let Some(v) = input.get("date") {
            b.set_date(v.clone())?;
        }
        match input.get("kind") {
            Some(v) => {
                b.set_kind(v.clone())?;
            }
            None => b.kind = b.config.default_kind,
        }
        if let Some(v) = input.get("balance") {
            b.set_balance(v.clone())?;
        }
        if let Some(v) = input.get("charge") {
            b.set_charge(v.clone())?;
        }
        if let Some(v) = input.get("deposit") {
            b.set_deposit(v.clone())?;
        }
        if let Some(v) = input.get("description") {
            b.set_description(v.clone())?;
        }

        b.set_extended_description(input.get("extendedDescription").cloned().unwrap_or(Value::Null));
        b.set_dues(input.get("dues").cloned().unwrap_or_else(|| Dues::default().into()))?;
        b.set_interest_rate(input.get("interestRate").cloned().unwrap_or_else(|| 0.into()))?;
        b.set_serial(input.get("serial").cloned().unwrap_or(Value::Null));
        b.set_usd(input.get("usd").cloned().unwrap_or_else(|| 0.into()))?;

        Ok(b)
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn set_date(&mut self, v: impl Into<Value>) -> Result<NaiveDate> {
        let checked = validate::date(&v.into(), &self.config);
        store(&mut self.date, "date", checked)
    }

    pub fn kind(&self) -> Option<TransactionKind> {
        self.kind
    }

    pub fn set_kind(&mut self, v: impl Into<Value>) -> Result<TransactionKind> {
        store(&mut self.kind, "kind", validate::kind(&v.into()))
    }

    pub fn balance(&self) -> Option<Decimal> {
        self.balance
    }

    pub fn set_balance(&mut self, v: impl Into<Value>) -> Result<Decimal> {
        store(&mut self.balance, "balance", validate::balance(&v.into()))
    }

    pub fn charge(&self) -> Option<Decimal> {
        self.charge
    }

    pub fn set_charge(&mut self, v: impl Into<Value>) -> Result<Decimal> {
        store(&mut self.charge, "charge", validate::charge(&v.into()))
    }

    pub fn deposit(&self) -> Option<Decimal> {
        self.deposit
    }

    pub fn set_deposit(&mut self, v: impl Into<Value>) -> Result<Decimal> {
        store(&mut self.deposit, "deposit", validate::deposit(&v.into()))
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn set_description(&mut self, v: impl Into<Value>) -> Result<String> {
        store(&mut self.description, "description", validate::description(&v.into()))
    }

    pub fn extended_description(&self) -> Option<&str> {
        self.extended_description.as_deref()
    }

    /// Любое значение принимается.
    pub fn set_extended_description(&mut self, v: impl Into<Value>) -> String {
        let s = validate::extended_description(&v.into());
        self.extended_description = Some(s.clone());
        s
    }

    pub fn dues(&self) -> Option<Dues> {
        self.dues
    }

    pub fn set_dues(&mut self, v: impl Into<Value>) -> Result<Dues> {
        store(&mut self.dues, "dues", validate::dues(&v.into()))
    }

    pub fn interest_rate(&self) -> Option<Decimal> {
        self.interest_rate
    }

    pub fn set_interest_rate(&mut self, v: impl Into<Value>) -> Result<Decimal> {
        store(&mut self.interest_rate, "interest_rate", validate::interest_rate(&v.into()))
    }

    pub fn serial(&self) -> Option<&str> {
        self.serial.as_deref()
    }

    /// Любое значение принимается.
    pub fn set_serial(&mut self, v: impl Into<Value>) -> String {
        let s = validate::serial(&v.into());
        self.serial = Some(s.clone());
        s
    }

    pub fn usd(&self) -> Option<Decimal> {
        self.usd
    }

    pub fn set_usd(&mut self, v: impl Into<Value>) -> Result<Decimal> {
        store(&mut self.usd, "usd", validate::usd(&v.into()))
    }

    /// Частичное обновление: задаются только присутствующие поля, в фиксированном
    /// порядке. Отсутствующие не трогаются, значения по умолчанию не подставляются.
    pub fn set(&mut self, partial: &TransactionInput) -> Result<&mut Self> {
        check_keys(partial)?;

        if let Some(v) = partial.get("kind") {
            self.set_kind(v.clone())?;
        }
        if let Some(v) = partial.get("balance") {
            self.set_balance(v.clone())?;
        }
        if let Some(v) = partial.get("deposit") {
            self.set_deposit(v.clone())?;
        }
        if let Some(v) = partial.get("charge") {
            self.set_charge(v.clone())?;
        }
        if let Some(v) = partial.get("description") {
            self.set_description(v.clone())?;
        }
        if let Some(v) = partial.get("extendedDescription") {
            self.set_extended_description(v.clone());
        }
        if let Some(v) = partial.get("date") {
            self.set_date(v.clone())?;
        }
        if let Some(v) = partial.get("dues") {
            self.set_dues(v.clone())?;
        }
        if let Some(v) = partial.get("interestRate") {
            self.set_interest_rate(v.clone())?;
        }
        if let Some(v) = partial.get("serial") {
            self.set_serial(v.clone());
        }
        if let Some(v) = partial.get("usd") {
            self.set_usd(v.clone())?;
        }
        Ok(self)
    }

    /// Проверяет полноту и собирает запись. Состояние не меняется.
    pub fn build(&self) -> Result<TransactionRecord> {
        fn required<T>(v: Option<T>, field: &'static str) -> Result<T> {
            v.ok_or_else(|| {
                tracing::debug!(field, "build failed: required field is not set");
                TransactionError::MissingField { field }
            })
        }

        let date = required(self.date, "date")?;
        let kind = required(self.kind, "kind")?;
        let balance = required(self.balance, "balance")?;
        let deposit = required(self.deposit, "deposit")?;
        let charge = required(self.charge, "charge")?;
        let description = required(self.description.clone(), "description")?;
        let current = required(self.dues.map(|d| d.current), "dues.current")?;
        let total = required(self.dues.map(|d| d.total), "dues.total")?;
        let interest_rate = required(self.interest_rate, "interest_rate")?;

        Ok(TransactionRecord {
            date,
            kind,
            balance,
            charge,
            deposit,
            description,
            extended_description: self.extended_description.clone().unwrap_or_default(),
            dues: Dues { current, total },
            interest_rate,
            serial: self.serial.clone().unwrap_or_default(),
            usd: self.usd.unwrap_or(Decimal::ZERO),
        })
    }
}
