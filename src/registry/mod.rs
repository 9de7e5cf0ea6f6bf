use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    account::{Account, AccountNumber},
    client::Client,
    transaction::{Transaction, TransactionError},
};

pub mod in_memory_registry;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Client with identifier {id} already exists")]
    DuplicateIdentifier { id: String },
    #[error("Invalid client identifier `{id}`, expected {len} digits")]
    InvalidIdentifier { id: String, len: usize },
    #[error("Client {id} not found")]
    ClientNotFound { id: String },
    #[error("Account {number} not found")]
    AccountNotFound { number: AccountNumber },
}

#[derive(Debug, Error)]
pub enum BankError {
    #[error(transparent)]
    RegistryErr(#[from] RegistryError),
    #[error(transparent)]
    TransactionErr(#[from] TransactionError),
}

pub trait TransactionRegistry {
    fn perform(
        &mut self,
        client_id: &str,
        number: AccountNumber,
        transaction: Transaction,
    ) -> Result<(), BankError>;

    fn deposit(
        &mut self,
        client_id: &str,
        number: AccountNumber,
        amount: Decimal,
    ) -> Result<(), BankError> {
        self.perform(client_id, number, Transaction::Deposit { amount })
    }

    fn withdraw(
        &mut self,
        client_id: &str,
        number: AccountNumber,
        amount: Decimal,
    ) -> Result<(), BankError> {
        self.perform(client_id, number, Transaction::Withdrawal { amount })
    }
}

pub fn find_client<'a>(id: &str, clients: &'a [Client]) -> Option<&'a Client> {
    clients.iter().find(|client| client.id() == id)
}

pub fn find_account(number: AccountNumber, accounts: &[Account]) -> Option<&Account> {
    accounts.iter().find(|account| account.number() == number)
}

/// Like [`find_account`], but only among the accounts listed on `client`.
pub fn find_account_for_client<'a>(
    client: &Client,
    number: AccountNumber,
    accounts: &'a [Account],
) -> Option<&'a Account> {
    if client.accounts().contains(&number) {
        find_account(number, accounts)
    } else {
        None
    }
}

pub fn find_account_for_client_mut<'a>(
    client: &Client,
    number: AccountNumber,
    accounts: &'a mut [Account],
) -> Option<&'a mut Account> {
    if !client.accounts().contains(&number) {
        return None;
    }
    accounts
        .iter_mut()
        .find(|account| account.number() == number)
}
