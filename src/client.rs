use crate::{
    account::{Account, AccountNumber},
    config::OwnershipPolicy,
    transaction::{Transaction, TransactionError},
};

/// Number of digits in a national ID used as client identifier.
pub const IDENTIFIER_LEN: usize = 11;

pub fn is_valid_identifier(id: &str) -> bool {
    id.len() == IDENTIFIER_LEN && id.bytes().all(|b| b.is_ascii_digit())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    id: String,
    name: String,
    birth_date: String,
    address: String,
    accounts: Vec<AccountNumber>,
}

impl Client {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        birth_date: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            birth_date: birth_date.into(),
            address: address.into(),
            accounts: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn birth_date(&self) -> &str {
        &self.birth_date
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Numbers of the accounts opened for this client, in opening order.
    pub fn accounts(&self) -> &[AccountNumber] {
        &self.accounts
    }

    pub(crate) fn add_account(&mut self, number: AccountNumber) {
        self.accounts.push(number);
    }

    pub fn owns(&self, account: &Account) -> bool {
        account.owner() == self.id && self.accounts.contains(&account.number())
    }

    /// The only way a transaction reaches an account.
    ///
    /// With [`OwnershipPolicy::Unchecked`] any account handed in is accepted.
    pub fn perform_transaction(
        &self,
        account: &mut Account,
        transaction: Transaction,
        policy: OwnershipPolicy,
    ) -> Result<(), TransactionError> {
        if policy == OwnershipPolicy::Enforced && !self.owns(account) {
            return Err(TransactionError::NotAccountOwner {
                client: self.id.clone(),
                account: account.number(),
            });
        }
        transaction.register_on(account)?;
        Ok(())
    }
}
