//! Доменные модели: сырой вход и канонический выход.

use crate::error::{Result, TransactionError};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::fmt;
use std::str::FromStr;

/// Сырой, непроверенный вход: имя поля → значение.
pub type TransactionInput = Map<String, Value>;

pub const RECOGNIZED_KEYS: [&str; 11] = [
    "date",
    "kind",
    "balance",
    "charge",
    "deposit",
    "description",
    "extendedDescription",
    "serial",
    "dues",
    "usd",
    "interestRate",
];

/// Отклоняет первый ключ, которого нет в [`RECOGNIZED_KEYS`].
pub fn check_keys(input: &TransactionInput) -> Result<()> {
    match input.keys().find(|k| !RECOGNIZED_KEYS.contains(&k.as_str())) {
        Some(key) => {
            tracing::debug!(%key, "unrecognized transaction key");
            Err(TransactionError::InvalidKey { key: key.clone() })
        }
        None => Ok(()),
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Normal,
    DueCash,
    DueCommerce,
    DueFixed,
    DueAdvance,
    TotalDue,
}

impl TransactionKind {
    pub const ALL: [TransactionKind; 6] = [
        TransactionKind::Normal,
        TransactionKind::DueCash,
        TransactionKind::DueCommerce,
        TransactionKind::DueFixed,
        TransactionKind::DueAdvance,
        TransactionKind::TotalDue,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Normal => "normal",
            TransactionKind::DueCash => "due_cash",
            TransactionKind::DueCommerce => "due_commerce",
            TransactionKind::DueFixed => "due_fixed",
            TransactionKind::DueAdvance => "due_advance",
            TransactionKind::TotalDue => "total_due",
        }
    }
}

impl FromStr for TransactionKind {
    type Err = TransactionError;

    fn from_str(s: &str) -> Result<Self> {
        TransactionKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| TransactionError::InvalidKind(format!("unknown transaction kind: {s:?}")))
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Рассрочка: номер текущего платежа и общее число платежей.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Dues {
    pub current: u32,
    pub total: u32,
}

impl Default for Dues {
    fn default() -> Self {
        Self { current: 1, total: 1 }
    }
}

impl From<Dues> for Value {
    fn from(d: Dues) -> Self {
        json!({ "current": d.current, "total": d.total })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionRecord {
    #[serde(with = "date_format")]
    pub date: NaiveDate,
    pub kind: TransactionKind,
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub charge: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub deposit: Decimal,
    pub description: String,
    pub extended_description: String,
    pub dues: Dues,
    #[serde(with = "rust_decimal::serde::float")]
    pub interest_rate: Decimal,
    pub serial: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub usd: Decimal,
}

impl TransactionRecord {
    /// Дата в виде `dd/mm/yyyy`.
    pub fn date_string(&self) -> String {
        self.date.format(date_format::FORMAT).to_string()
    }
}

pub mod date_format {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%d/%m/%Y";

    pub fn serialize<S: Serializer>(date: &NaiveDate, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDate, D::Error> {
        let s = String::deserialize(d)?;
        NaiveDate::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom)
    }
}
