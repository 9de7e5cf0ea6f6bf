use std::fmt;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    config::CurrentAccountLimits,
    history::{History, HistoryEntry},
    transaction::TransactionKind,
};

pub type AccountNumber = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountKind {
    /// No limits besides a non-negative balance
    Basic,
    /// Withdrawals are capped per transaction and over the account lifetime
    Current(CurrentAccountLimits),
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountKind::Basic => f.write_str("basic"),
            AccountKind::Current(_) => f.write_str("current"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccountError {
    #[error("Invalid amount {amount}, it must be greater than zero")]
    InvalidAmount { amount: Decimal },
    #[error("Insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds {
        requested: Decimal,
        available: Decimal,
    },
    #[error("Withdrawal of {amount} exceeds the per-transaction ceiling of {ceiling}")]
    ExceedsCeiling { amount: Decimal, ceiling: Decimal },
    #[error("Maximum number of withdrawals ({limit}) reached")]
    ExceedsWithdrawalLimit { limit: usize },
}

#[derive(Debug, Clone)]
pub struct Account {
    number: AccountNumber,
    branch: String,
    owner: String,
    kind: AccountKind,
    balance: Decimal,
    history: History,
}

impl Account {
    pub fn new(
        number: AccountNumber,
        branch: impl Into<String>,
        owner: impl Into<String>,
        kind: AccountKind,
    ) -> Self {
        Self {
            number,
            branch: branch.into(),
            owner: owner.into(),
            kind,
            balance: Decimal::ZERO,
            history: History::default(),
        }
    }

    pub fn number(&self) -> AccountNumber {
        self.number
    }

    pub fn branch(&self) -> &str {
        &self.branch
    }

    /// Identifier of the client that opened the account.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn kind(&self) -> AccountKind {
        self.kind
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub(crate) fn history_mut(&mut self) -> &mut History {
        &mut self.history
    }

    pub fn withdrawals_made(&self) -> usize {
        self.history.count_of(TransactionKind::Withdrawal)
    }

    /// Only moves the balance, recording into history is up to the caller.
    pub fn deposit(&mut self, amount: Decimal) -> Result<(), AccountError> {
        if amount <= Decimal::ZERO {
            return Err(AccountError::InvalidAmount { amount });
        }
        self.balance += amount;
        Ok(())
    }

    /// Only moves the balance, recording into history is up to the caller.
    ///
    /// Checks run in order: non-positive amount, then for current accounts
    /// the ceiling and the lifetime withdrawal count, then available funds.
    pub fn withdraw(&mut self, amount: Decimal) -> Result<(), AccountError> {
        if amount <= Decimal::ZERO {
            return Err(AccountError::InvalidAmount { amount });
        }
        if let AccountKind::Current(limits) = self.kind {
            if amount > limits.withdrawal_ceiling {
                return Err(AccountError::ExceedsCeiling {
                    amount,
                    ceiling: limits.withdrawal_ceiling,
                });
            }
            if self.withdrawals_made() >= limits.max_withdrawals {
                return Err(AccountError::ExceedsWithdrawalLimit {
                    limit: limits.max_withdrawals,
                });
            }
        }
        self.withdraw_from_balance(amount)
    }

    fn withdraw_from_balance(&mut self, amount: Decimal) -> Result<(), AccountError> {
        if amount > self.balance {
            return Err(AccountError::InsufficientFunds {
                requested: amount,
                available: self.balance,
            });
        }
        self.balance -= amount;
        Ok(())
    }

    pub fn statement(&self) -> Statement<'_> {
        Statement { account: self }
    }
}

/// Read-only view over an account history and its current balance.
#[derive(Debug, Clone, Copy)]
pub struct Statement<'a> {
    account: &'a Account,
}

impl<'a> Statement<'a> {
    pub fn account_number(&self) -> AccountNumber {
        self.account.number
    }

    pub fn balance(&self) -> Decimal {
        self.account.balance
    }

    /// Can be called any number of times, every call starts from the first entry.
    pub fn entries(&self) -> std::slice::Iter<'a, HistoryEntry> {
        self.account.history.iter()
    }
}

impl fmt::Display for Statement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "================ STATEMENT {}/{} ================",
            self.account.branch, self.account.number
        )?;
        if self.account.history.is_empty() {
            writeln!(f, "No transactions recorded.")?;
        }
        for entry in self.entries() {
            writeln!(f, "{entry}")?;
        }
        writeln!(f)?;
        writeln!(f, "Balance:\t{:.2}", self.balance())?;
        write!(f, "==================================================")
    }
}
