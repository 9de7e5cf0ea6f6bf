use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info};

use crate::{
    account::{Account, AccountKind, AccountNumber, Statement},
    client::{Client, IDENTIFIER_LEN, is_valid_identifier},
    config::BankConfig,
    transaction::Transaction,
};

use super::{
    BankError, RegistryError, TransactionRegistry, find_account, find_account_for_client,
    find_account_for_client_mut, find_client,
};

/// One line of the account listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountSummary {
    pub branch: String,
    pub account: AccountNumber,
    pub client: String,
    pub holder: String,
    pub kind: String,
    pub balance: Decimal,
    pub withdrawals: usize,
}

impl fmt::Display for AccountSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Branch:\t{}", self.branch)?;
        writeln!(f, "Account:\t{}", self.account)?;
        write!(f, "Holder:\t{}", self.holder)
    }
}

/// Owns every client and account for the lifetime of the process.
#[derive(Debug, Default)]
pub struct InMemoryRegistry {
    config: BankConfig,
    clients: Vec<Client>,
    accounts: Vec<Account>,
}

impl InMemoryRegistry {
    pub fn new(config: BankConfig) -> Self {
        Self {
            config,
            clients: Vec::new(),
            accounts: Vec::new(),
        }
    }

    pub fn config(&self) -> &BankConfig {
        &self.config
    }

    pub fn create_client(
        &mut self,
        id: &str,
        name: &str,
        birth_date: &str,
        address: &str,
    ) -> Result<&Client, RegistryError> {
        if !is_valid_identifier(id) {
            return Err(RegistryError::InvalidIdentifier {
                id: id.to_string(),
                len: IDENTIFIER_LEN,
            });
        }
        if find_client(id, &self.clients).is_some() {
            return Err(RegistryError::DuplicateIdentifier { id: id.to_string() });
        }
        let index = self.clients.len();
        self.clients.push(Client::new(id, name, birth_date, address));
        info!(client = id, "client created");
        Ok(&self.clients[index])
    }

    /// Accounts are numbered sequentially starting at 1 and never removed.
    pub fn next_account_number(&self) -> AccountNumber {
        self.accounts.len() as AccountNumber + 1
    }

    pub fn create_account(
        &mut self,
        client_id: &str,
        kind: AccountKind,
    ) -> Result<&Account, RegistryError> {
        let number = self.next_account_number();
        let Some(client) = self
            .clients
            .iter_mut()
            .find(|client| client.id() == client_id)
        else {
            return Err(RegistryError::ClientNotFound {
                id: client_id.to_string(),
            });
        };
        client.add_account(number);

        let index = self.accounts.len();
        self.accounts.push(Account::new(
            number,
            self.config.branch.as_str(),
            client_id,
            kind,
        ));
        info!(client = client_id, account = number, %kind, "account created");
        Ok(&self.accounts[index])
    }

    /// Opens a current account with the configured limits.
    pub fn open_current_account(&mut self, client_id: &str) -> Result<&Account, RegistryError> {
        let kind = AccountKind::Current(self.config.current_account);
        self.create_account(client_id, kind)
    }

    pub fn find_client(&self, id: &str) -> Option<&Client> {
        find_client(id, &self.clients)
    }

    pub fn find_account(&self, number: AccountNumber) -> Option<&Account> {
        find_account(number, &self.accounts)
    }

    pub fn statement(&self, number: AccountNumber) -> Result<Statement<'_>, RegistryError> {
        self.find_account(number)
            .map(Account::statement)
            .ok_or(RegistryError::AccountNotFound { number })
    }

    /// Statement of one of the accounts listed on the client.
    pub fn client_statement(
        &self,
        client_id: &str,
        number: AccountNumber,
    ) -> Result<Statement<'_>, RegistryError> {
        let client = self
            .find_client(client_id)
            .ok_or_else(|| RegistryError::ClientNotFound {
                id: client_id.to_string(),
            })?;
        find_account_for_client(client, number, &self.accounts)
            .map(Account::statement)
            .ok_or(RegistryError::AccountNotFound { number })
    }

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn account_summaries(&self) -> impl Iterator<Item = AccountSummary> + '_ {
        self.accounts.iter().map(|account| AccountSummary {
            branch: account.branch().to_string(),
            account: account.number(),
            client: account.owner().to_string(),
            holder: find_client(account.owner(), &self.clients)
                .map(|client| client.name().to_string())
                .unwrap_or_default(),
            kind: account.kind().to_string(),
            balance: account.balance(),
            withdrawals: account.withdrawals_made(),
        })
    }
}

impl TransactionRegistry for InMemoryRegistry {
    fn perform(
        &mut self,
        client_id: &str,
        number: AccountNumber,
        transaction: Transaction,
    ) -> Result<(), BankError> {
        let client = find_client(client_id, &self.clients).ok_or_else(|| {
            RegistryError::ClientNotFound {
                id: client_id.to_string(),
            }
        })?;
        // a client only reaches the accounts opened for it
        let account = find_account_for_client_mut(client, number, &mut self.accounts)
            .ok_or(RegistryError::AccountNotFound { number })?;

        match client.perform_transaction(account, transaction, self.config.ownership) {
            Ok(()) => {
                debug!(
                    client = client_id,
                    account = number,
                    kind = %transaction.kind(),
                    amount = %transaction.amount(),
                    balance = %account.balance(),
                    "transaction registered"
                );
                Ok(())
            }
            Err(err) => {
                debug!(
                    client = client_id,
                    account = number,
                    kind = %transaction.kind(),
                    amount = %transaction.amount(),
                    error = %err,
                    "transaction rejected"
                );
                Err(err.into())
            }
        }
    }
}
