//! JSON: на входе массив объектов или JSON Lines, на выходе массив записей.

use crate::{
    error::{Result, TransactionError},
    model::{TransactionInput, TransactionRecord},
};
use std::io::{BufRead, Write};

pub struct Json;

impl crate::traits::ReadFormat for Json {
    fn read<R: BufRead>(mut r: R) -> Result<Vec<TransactionInput>> {
        let mut text = String::new();
        r.read_to_string(&mut text)?;

        if text.trim_start().starts_with('[') {
            return Ok(serde_json::from_str(&text)?);
        }

        let mut inputs = Vec::new();
        for (n, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let input: TransactionInput = serde_json::from_str(line)
                .map_err(|e| TransactionError::Parse(format!("line {}: {e}", n + 1)))?;
            inputs.push(input);
        }
        Ok(inputs)
    }
}

impl crate::traits::WriteFormat for Json {
    fn write<W: Write>(mut w: W, records: &[TransactionRecord]) -> Result<()> {
        serde_json::to_writer_pretty(&mut w, records)?;
        writeln!(w)?;
        Ok(())
    }
}
