//! Унифицированные трэйты чтения/записи на основе std::io::{BufRead, Write}.

use crate::{
    error::Result,
    model::{TransactionInput, TransactionRecord},
};
use std::io::{BufRead, Write};

pub trait ReadFormat {
    fn read<R: BufRead>(r: R) -> Result<Vec<TransactionInput>>;
}

pub trait WriteFormat {
    fn write<W: Write>(w: W, records: &[TransactionRecord]) -> Result<()>;
}

pub trait Format: ReadFormat + WriteFormat {}
impl<T: ReadFormat + WriteFormat> Format for T {}
