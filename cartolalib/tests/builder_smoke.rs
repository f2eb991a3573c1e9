use cartolalib::{
    config::ValidationConfig,
    model::{Dues, TransactionInput, TransactionKind, TransactionRecord},
    TransactionBuilder, TransactionError,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::{json, Value};

fn input(v: Value) -> TransactionInput {
    serde_json::from_value(v).expect("object input")
}

fn good() -> TransactionInput {
    input(json!({
        "date": "01/06/2014",
        "kind": "normal",
        "balance": 0,
        "charge": 15000,
        "deposit": 0,
        "description": "Giro cajero automatico"
    }))
}

#[test]
fn builds_atm_withdrawal_with_defaults() {
    let rec = TransactionBuilder::from_input(&good())
        .expect("valid keys")
        .build()
        .expect("build");

    let expected = TransactionRecord {
        date: NaiveDate::from_ymd_opt(2014, 6, 1).unwrap(),
        kind: TransactionKind::Normal,
        balance: Decimal::ZERO,
        charge: Decimal::new(15000, 0),
        deposit: Decimal::ZERO,
        description: "Giro cajero automatico".into(),
        extended_description: String::new(),
        dues: Dues { current: 1, total: 1 },
        interest_rate: Decimal::ZERO,
        serial: String::new(),
        usd: Decimal::ZERO,
    };
    assert_eq!(rec, expected);
    assert_eq!(rec.date_string(), "01/06/2014");
}

#[test]
fn record_serializes_with_canonical_keys() {
    let rec = TransactionBuilder::from_input(&good()).unwrap().build().unwrap();
    let v = serde_json::to_value(&rec).expect("serialize");

    assert_eq!(v["date"], "01/06/2014");
    assert_eq!(v["kind"], "normal");
    assert_eq!(v["charge"].as_f64(), Some(15000.0));
    assert_eq!(v["extended_description"], "");
    assert_eq!(v["dues"], json!({ "current": 1, "total": 1 }));
    assert_eq!(v["interest_rate"].as_f64(), Some(0.0));
    assert_eq!(v["serial"], "");
    assert_eq!(v["usd"].as_f64(), Some(0.0));

    let back: TransactionRecord = serde_json::from_value(v).expect("deserialize");
    assert_eq!(back, rec);
}

#[test]
fn build_is_repeatable() {
    let b = TransactionBuilder::from_input(&good()).unwrap();
    let first = b.build().expect("first build");
    let second = b.build().expect("second build");
    assert_eq!(first, second);
}

#[test]
fn missing_kind_is_reported_at_build() {
    let mut raw = good();
    raw.remove("kind");

    let b = TransactionBuilder::from_input(&raw).expect("construction succeeds");
    let err = b.build().unwrap_err();
    assert!(matches!(err, TransactionError::MissingField { field: "kind" }));
    assert_eq!(err.to_string(), "kind is not set");
}

#[test]
fn configured_default_kind_fills_missing_kind() {
    let mut raw = good();
    raw.remove("kind");
    let cfg = ValidationConfig {
        default_kind: Some(TransactionKind::Normal),
        ..ValidationConfig::default()
    };

    let rec = TransactionBuilder::from_input_with_config(&raw, cfg)
        .unwrap()
        .build()
        .expect("build");
    assert_eq!(rec.kind, TransactionKind::Normal);
}

#[test]
fn each_missing_required_field_is_named() {
    for (key, field) in [
        ("date", "date"),
        ("balance", "balance"),
        ("deposit", "deposit"),
        ("charge", "charge"),
        ("description", "description"),
    ] {
        let mut raw = good();
        raw.remove(key);
        let err = TransactionBuilder::from_input(&raw).unwrap().build().unwrap_err();
        assert!(
            matches!(err, TransactionError::MissingField { field: f } if f == field),
            "{key}: {err}"
        );
    }
}

#[test]
fn unknown_key_rejected_on_construction() {
    let mut raw = good();
    raw.insert("type".into(), json!("normal"));

    let err = TransactionBuilder::from_input(&raw).unwrap_err();
    assert!(matches!(err, TransactionError::InvalidKey { ref key } if key == "type"));
}

#[test]
fn unknown_key_rejected_on_set() {
    let mut b = TransactionBuilder::new();
    let err = b.set(&input(json!({ "amount": 10 }))).unwrap_err();
    assert!(matches!(err, TransactionError::InvalidKey { .. }));
}

#[test]
fn construction_stops_at_first_invalid_field() {
    let mut raw = good();
    raw.insert("charge".into(), json!(-1));

    let err = TransactionBuilder::from_input(&raw).unwrap_err();
    assert!(matches!(err, TransactionError::InvalidCharge(_)));
    assert_eq!(err.field(), Some("charge"));
}

#[test]
fn empty_builder_reports_date_first() {
    let b = TransactionBuilder::new();
    assert_eq!(b.date(), None);
    assert_eq!(b.kind(), None);
    assert!(matches!(
        b.build(),
        Err(TransactionError::MissingField { field: "date" })
    ));
}

#[test]
fn empty_builder_needs_dues_and_interest_rate() {
    let mut b = TransactionBuilder::new();
    b.set(&good()).expect("set");
    assert!(matches!(
        b.build(),
        Err(TransactionError::MissingField { field: "dues.current" })
    ));

    b.set_dues(Dues { current: 2, total: 6 }).expect("dues");
    assert!(matches!(
        b.build(),
        Err(TransactionError::MissingField { field: "interest_rate" })
    ));

    b.set_interest_rate("1.5").expect("interest rate");
    let rec = b.build().expect("build");
    assert_eq!(rec.dues, Dues { current: 2, total: 6 });
    assert_eq!(rec.interest_rate, Decimal::new(15, 1));
    assert_eq!(rec.usd, Decimal::ZERO);
}

#[test]
fn failed_setter_keeps_previous_value() {
    let mut b = TransactionBuilder::from_input(&good()).unwrap();

    assert!(b.set_charge("abc").is_err());
    assert_eq!(b.charge(), Some(Decimal::new(15000, 0)));

    assert!(b.set_date("31/04/2014").is_err());
    assert_eq!(b.date(), NaiveDate::from_ymd_opt(2014, 6, 1));
}

#[test]
fn setters_return_normalized_values() {
    let mut b = TransactionBuilder::new();
    assert_eq!(
        b.set_date("1/6/2014").unwrap(),
        NaiveDate::from_ymd_opt(2014, 6, 1).unwrap()
    );
    assert_eq!(b.set_kind("due_cash").unwrap(), TransactionKind::DueCash);
    assert_eq!(b.set_balance("-2500.75").unwrap(), Decimal::new(-250075, 2));
    assert_eq!(b.set_usd(12.5).unwrap(), Decimal::new(125, 1));
    assert_eq!(b.set_serial(42), "42");
    assert_eq!(b.set_extended_description("Compra en cuotas"), "Compra en cuotas");
    assert_eq!(b.serial(), Some("42"));
}

#[test]
fn partial_set_leaves_absent_fields_untouched() {
    let mut b = TransactionBuilder::from_input(&good()).unwrap();
    b.set(&input(json!({ "deposit": "300", "serial": "A-1" })))
        .expect("partial set");

    let rec = b.build().unwrap();
    assert_eq!(rec.deposit, Decimal::new(300, 0));
    assert_eq!(rec.serial, "A-1");
    assert_eq!(rec.charge, Decimal::new(15000, 0));
    assert_eq!(rec.description, "Giro cajero automatico");
}

#[test]
fn partial_set_applies_fields_before_the_failing_one() {
    let mut b = TransactionBuilder::from_input(&good()).unwrap();
    let err = b
        .set(&input(json!({ "kind": "due_fixed", "date": "29/02/2014" })))
        .unwrap_err();

    assert!(matches!(err, TransactionError::InvalidDate(_)));
    assert_eq!(b.kind(), Some(TransactionKind::DueFixed));
    assert_eq!(b.date(), NaiveDate::from_ymd_opt(2014, 6, 1));
}

#[test]
fn fields_stay_mutable_after_build() {
    let mut b = TransactionBuilder::from_input(&good()).unwrap();
    let before = b.build().unwrap();
    b.set_description("Pago PAC").unwrap();
    let after = b.build().unwrap();

    assert_ne!(before, after);
    assert_eq!(after.description, "Pago PAC");
}
