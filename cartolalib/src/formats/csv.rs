//! Простой CSV. Заголовки входа — имена полей транзакции, рассрочка в двух
//! колонках `dues_current`, `dues_total`. Пустая ячейка = поле не задано.
//! Заголовки выхода (`extended_description`, `interest_rate`) тоже принимаются.
//!
//! Выход:
//! date,kind,balance,charge,deposit,description,extended_description,dues_current,dues_total,interest_rate,serial,usd

use crate::{
    error::Result,
    model::{TransactionInput, TransactionRecord},
};
use csv::{ReaderBuilder, WriterBuilder};
use serde_json::{Map, Value};
use std::io::{BufRead, Write};

#[derive(serde::Serialize)]
struct CsvOutRow<'a> {
    date: String,
    kind: &'a str,
    balance: String,
    charge: String,
    deposit: String,
    description: &'a str,
    extended_description: &'a str,
    dues_current: u32,
    dues_total: u32,
    interest_rate: String,
    serial: &'a str,
    usd: String,
}

pub struct Csv;

impl crate::traits::ReadFormat for Csv {
    fn read<R: BufRead>(r: R) -> Result<Vec<TransactionInput>> {
        let mut rdr = ReaderBuilder::new().trim(csv::Trim::Headers).from_reader(r);
        let headers = rdr.headers()?.clone();
        let mut inputs = Vec::new();

        for rec in rdr.records() {
            let rec = rec?;
            let mut input = TransactionInput::new();
            let mut dues = Map::new();

            for (name, cell) in headers.iter().zip(rec.iter()) {
                if cell.trim().is_empty() {
                    continue;
                }
                let value = Value::String(cell.to_string());
                match name {
                    "dues_current" => {
                        dues.insert("current".into(), value);
                    }
                    "dues_total" => {
                        dues.insert("total".into(), value);
                    }
                    // колонки выхода читаются обратно под именами входа
                    "extended_description" => {
                        input.insert("extendedDescription".into(), value);
                    }
                    "interest_rate" => {
                        input.insert("interestRate".into(), value);
                    }
                    other => {
                        input.insert(other.to_string(), value);
                    }
                }
            }
            if !dues.is_empty() {
                input.insert("dues".into(), Value::Object(dues));
            }
            inputs.push(input);
        }
        Ok(inputs)
    }
}

impl crate::traits::WriteFormat for Csv {
    fn write<W: Write>(mut w: W, records: &[TransactionRecord]) -> Result<()> {
        let mut wrt = WriterBuilder::new().from_writer(&mut w);

        for t in records {
            let out = CsvOutRow {
                date: t.date_string(),
                kind: t.kind.as_str(),
                balance: t.balance.to_string(),
                charge: t.charge.to_string(),
                deposit: t.deposit.to_string(),
                description: &t.description,
                extended_description: &t.extended_description,
                dues_current: t.dues.current,
                dues_total: t.dues.total,
                interest_rate: t.interest_rate.to_string(),
                serial: &t.serial,
                usd: t.usd.to_string(),
            };
            wrt.serialize(out)?;
        }
        wrt.flush()?;
        Ok(())
    }
}
