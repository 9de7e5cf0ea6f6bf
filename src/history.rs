use std::fmt;

use chrono::{DateTime, Local};
use rust_decimal::Decimal;

use crate::transaction::TransactionKind;

pub const TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub timestamp: DateTime<Local>,
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:\t{:.2} ({})",
            self.kind,
            self.amount,
            self.timestamp.format(TIMESTAMP_FORMAT)
        )
    }
}

/// Append-only log of the transactions registered on one account.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub(crate) fn record(&mut self, kind: TransactionKind, amount: Decimal) {
        self.record_at(kind, amount, Local::now());
    }

    pub(crate) fn record_at(
        &mut self,
        kind: TransactionKind,
        amount: Decimal,
        timestamp: DateTime<Local>,
    ) {
        self.entries.push(HistoryEntry {
            kind,
            amount,
            timestamp,
        });
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HistoryEntry> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count_of(&self, kind: TransactionKind) -> usize {
        self.entries.iter().filter(|entry| entry.kind == kind).count()
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a HistoryEntry;
    type IntoIter = std::slice::Iter<'a, HistoryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
