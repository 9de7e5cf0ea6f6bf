use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::account::{Account, AccountError, AccountNumber};

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionKind::Deposit => f.write_str("Deposit"),
            TransactionKind::Withdrawal => f.write_str("Withdrawal"),
        }
    }
}

impl FromStr for TransactionKind {
    type Err = TransactionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "deposit" => Ok(TransactionKind::Deposit),
            "withdrawal" | "withdraw" => Ok(TransactionKind::Withdrawal),
            _ => Err(TransactionError::Unrecognized {
                kind: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Error)]
pub enum TransactionError {
    #[error("Unrecognized transaction `{kind}`")]
    Unrecognized { kind: String },
    #[error("Client {client} does not own account {account}")]
    NotAccountOwner {
        client: String,
        account: AccountNumber,
    },
    #[error(transparent)]
    Rejected(#[from] AccountError),
}

/// A monetary movement, built for a single registration and dropped afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transaction {
    Deposit { amount: Decimal },
    Withdrawal { amount: Decimal },
}

impl Transaction {
    pub fn new(kind: TransactionKind, amount: Decimal) -> Self {
        match kind {
            TransactionKind::Deposit => Transaction::Deposit { amount },
            TransactionKind::Withdrawal => Transaction::Withdrawal { amount },
        }
    }

    /// Builds a transaction from an untyped kind name, e.g. one read from user input.
    pub fn parse(kind: &str, amount: Decimal) -> Result<Self, TransactionError> {
        Ok(Self::new(kind.parse()?, amount))
    }

    pub fn kind(&self) -> TransactionKind {
        match self {
            Transaction::Deposit { .. } => TransactionKind::Deposit,
            Transaction::Withdrawal { .. } => TransactionKind::Withdrawal,
        }
    }

    pub fn amount(&self) -> Decimal {
        match self {
            Transaction::Deposit { amount } | Transaction::Withdrawal { amount } => *amount,
        }
    }

    /// Applies the movement to `account` and, only when the account accepts it,
    /// appends a copy of it to the account history.
    pub fn register_on(&self, account: &mut Account) -> Result<(), AccountError> {
        match self {
            Transaction::Deposit { amount } => account.deposit(*amount)?,
            Transaction::Withdrawal { amount } => account.withdraw(*amount)?,
        }
        account.history_mut().record(self.kind(), self.amount());
        tracing::trace!(
            account = account.number(),
            kind = %self.kind(),
            amount = %self.amount(),
            "transaction recorded"
        );
        Ok(())
    }
}
