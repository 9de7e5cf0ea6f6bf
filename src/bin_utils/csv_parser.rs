use std::{io::Read, str::FromStr};

use crate::account::AccountNumber;
use csv::{DeserializeRecordsIntoIter, Trim};
use rust_decimal::Decimal;
use serde::Deserialize;

/// One row of the operations file.
///
/// `op` is kept as a plain string so that unknown transaction kinds reach
/// [`crate::transaction::TransactionKind`] parsing instead of failing here.
#[derive(Debug, Deserialize)]
pub struct Operation {
    pub op: String,
    pub client: String,
    pub account: Option<AccountNumber>,
    /// Kept as text, see [`Operation::amount`].
    pub amount: Option<String>,
    pub name: Option<String>,
    pub birth_date: Option<String>,
    pub address: Option<String>,
}

impl Operation {
    /// Parses the amount column as written, preserving every digit and the scale.
    ///
    /// Letting serde infer the column goes through `f64`, which drops both.
    pub fn amount(&self) -> Result<Option<Decimal>, rust_decimal::Error> {
        match self.amount.as_deref().map(str::trim) {
            Some(amount) if !amount.is_empty() => Decimal::from_str(amount).map(Some),
            _ => Ok(None),
        }
    }
}

/// Parses operation list in CSV format, yielding the line number with every row.
pub struct CsvOperationParser<R> {
    iter: DeserializeRecordsIntoIter<R, Operation>,
}

impl<R> CsvOperationParser<R>
where
    R: Read,
{
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(source);

        Self {
            iter: reader.into_deserialize(),
        }
    }
}

impl<R> Iterator for CsvOperationParser<R>
where
    R: Read,
{
    type Item = (u64, Result<Operation, csv::Error>);

    fn next(&mut self) -> Option<Self::Item> {
        let curr_line = self.iter.reader().position().line();
        self.iter.next().map(|row| (curr_line, row))
    }
}
