//! Валидаторы полей. Чистые функции: сырое значение на входе,
//! нормализованное значение или ошибка на выходе.

use crate::{
    config::ValidationConfig,
    error::{Result, TransactionError},
    model::{Dues, TransactionKind},
};
use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::{prelude::ToPrimitive, Decimal};
use serde_json::Value;
use std::str::FromStr;
use std::sync::OnceLock;

fn date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?P<day>[0-9]{1,2})/(?P<month>[0-9]{1,2})/(?P<year>[0-9]{4})$")
            .expect("date pattern is valid")
    })
}

fn number_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[+-]?[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?$")
            .expect("number pattern is valid")
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberError {
    /// Значение не является числом.
    NotANumber,
    /// Число корректно, но не помещается в `Decimal`.
    OutOfRange,
}

/// Число из JSON-числа или числовой строки (допускается экспоненциальная запись).
pub fn parse_number(v: &Value) -> std::result::Result<Decimal, NumberError> {
    let s = match v {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return Err(NumberError::NotANumber),
    };
    if !number_re().is_match(&s) {
        return Err(NumberError::NotANumber);
    }
    let digits = s.strip_prefix('+').unwrap_or(&s);
    let parsed = if digits.contains(['e', 'E']) {
        Decimal::from_scientific(digits)
    } else {
        Decimal::from_str(digits)
    };
    parsed.map_err(|_| NumberError::OutOfRange)
}

fn number_error(e: NumberError, field: &str) -> String {
    match e {
        NumberError::NotANumber => format!("{field} is not a number"),
        NumberError::OutOfRange => format!("{field} is out of range"),
    }
}

fn reject(err: TransactionError, v: &Value) -> TransactionError {
    tracing::debug!(value = %v, error = %err, "field rejected");
    err
}

pub fn date(v: &Value, cfg: &ValidationConfig) -> Result<NaiveDate> {
    let bad = |msg: String| reject(TransactionError::InvalidDate(msg), v);

    let s = v
        .as_str()
        .ok_or_else(|| bad("date must be a dd/mm/yyyy string".into()))?;
    let caps = date_re()
        .captures(s)
        .ok_or_else(|| bad(format!("{s:?} does not match dd/mm/yyyy")))?;

    // группы гарантированно числовые
    let day: u32 = caps["day"].parse().map_err(|_| bad(format!("bad day in {s:?}")))?;
    let month: u32 = caps["month"].parse().map_err(|_| bad(format!("bad month in {s:?}")))?;
    let year: i32 = caps["year"].parse().map_err(|_| bad(format!("bad year in {s:?}")))?;

    if year < cfg.min_year || year > cfg.max_year {
        return Err(bad(format!(
            "year {year} out of range [{}, {}]",
            cfg.min_year, cfg.max_year
        )));
    }
    if !(1..=12).contains(&month) {
        return Err(bad(format!("month {month} out of range [1, 12]")));
    }
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| bad(format!("day {day} out of range for {month:02}/{year}")))
}

pub fn kind(v: &Value) -> Result<TransactionKind> {
    match v.as_str() {
        Some("") => Err(reject(TransactionError::InvalidKind("kind can't be empty".into()), v)),
        Some(s) => s.parse().map_err(|e| reject(e, v)),
        None => Err(reject(TransactionError::InvalidKind("kind must be a string".into()), v)),
    }
}

pub fn balance(v: &Value) -> Result<Decimal> {
    parse_number(v)
        .map_err(|e| reject(TransactionError::InvalidBalance(number_error(e, "balance")), v))
}

fn non_negative(
    v: &Value,
    field: &str,
    err: fn(String) -> TransactionError,
) -> Result<Decimal> {
    let n = parse_number(v).map_err(|e| reject(err(number_error(e, field)), v))?;
    if n.is_zero() {
        return Ok(Decimal::ZERO);
    }
    if n.is_sign_negative() {
        return Err(reject(err(format!("{field} cannot be negative")), v));
    }
    Ok(n)
}

pub fn charge(v: &Value) -> Result<Decimal> {
    non_negative(v, "charge", TransactionError::InvalidCharge)
}

pub fn deposit(v: &Value) -> Result<Decimal> {
    non_negative(v, "deposit", TransactionError::InvalidDeposit)
}

pub fn usd(v: &Value) -> Result<Decimal> {
    non_negative(v, "usd", TransactionError::InvalidUsd)
}

pub fn interest_rate(v: &Value) -> Result<Decimal> {
    non_negative(v, "interest rate", TransactionError::InvalidInterestRate)
}

pub fn description(v: &Value) -> Result<String> {
    let s = v.as_str().ok_or_else(|| {
        reject(TransactionError::InvalidDescription("description is not a string".into()), v)
    })?;
    if s.trim().is_empty() {
        return Err(reject(
            TransactionError::InvalidDescription("description can't be empty".into()),
            v,
        ));
    }
    Ok(s.to_string())
}

/// Без проверки: строка как есть, `null` → пустая строка, остальное → JSON-текст.
fn free_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

pub fn extended_description(v: &Value) -> String {
    free_text(v)
}

pub fn serial(v: &Value) -> String {
    free_text(v)
}

pub fn dues(v: &Value) -> Result<Dues> {
    let bad = |msg: String| reject(TransactionError::InvalidDues(msg), v);

    let obj = v
        .as_object()
        .ok_or_else(|| bad("dues must be an object with current and total".into()))?;
    let part = |name: &str| -> Result<i64> {
        obj.get(name)
            .and_then(|n| parse_number(n).ok())
            .and_then(|n| n.trunc().to_i64())
            .ok_or_else(|| bad(format!("{name} due is not a number")))
    };
    let current = part("current")?;
    let total = part("total")?;

    if current > total || current < 1 {
        return Err(bad(format!(
            "current due {current} can't be bigger than total dues {total} or smaller than 1"
        )));
    }
    if total < 0 {
        return Err(bad(format!("total dues {total} can't be negative")));
    }
    let to_u32 = |n: i64| u32::try_from(n).map_err(|_| bad(format!("{n} dues is too large")));
    Ok(Dues {
        current: to_u32(current)?,
        total: to_u32(total)?,
    })
}
