//! Replays a CSV file of operations against an in-memory registry, the way a
//! teller session would, and prints the resulting accounts.

use std::io::{Read, Write};

use crate::{
    account::{AccountKind, AccountNumber},
    config::BankConfig,
    registry::{BankError, TransactionRegistry, in_memory_registry::InMemoryRegistry},
    transaction::{Transaction, TransactionKind},
};
use anyhow::Result;
use csv_parser::{CsvOperationParser, Operation};
use csv_printer::print_report;
use thiserror::Error;
pub mod csv_parser;
pub mod csv_printer;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Report {
    /// CSV listing of every account
    #[default]
    Accounts,
    /// Text statement of every account
    Statements,
    /// Branch, number and holder of every account
    Listing,
}

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("Malformed row: {0}")]
    Parse(#[from] csv::Error),
    #[error("Invalid amount `{value}`: {source}")]
    InvalidAmount {
        value: String,
        source: rust_decimal::Error,
    },
    #[error("Field `{field}` is required for `{op}`")]
    MissingField { op: String, field: &'static str },
    #[error(transparent)]
    Bank(#[from] BankError),
}

pub struct Service<'w, R, W: 'w> {
    pub input: R,
    pub output: &'w mut W,
    pub config: BankConfig,
    pub report: Report,
    pub error_printer: Box<dyn FnMut(u64, OperationError)>,
}

impl<'w, R, W> Service<'w, R, W>
where
    R: Read,
    W: Write + 'w,
{
    pub fn run(mut self) -> Result<()> {
        let parser = CsvOperationParser::new(self.input);

        let mut registry = InMemoryRegistry::new(self.config);

        for (line, row) in parser {
            let result = row
                .map_err(OperationError::from)
                .and_then(|operation| execute(&mut registry, operation));
            if let Err(err) = result {
                (self.error_printer)(line, err);
            }
        }

        print_report(self.output, self.report, &registry)
    }
}

fn required<T>(value: Option<T>, op: &str, field: &'static str) -> Result<T, OperationError> {
    value.ok_or_else(|| OperationError::MissingField {
        op: op.to_string(),
        field,
    })
}

fn execute(registry: &mut InMemoryRegistry, operation: Operation) -> Result<(), OperationError> {
    let amount = operation
        .amount()
        .map_err(|source| OperationError::InvalidAmount {
            value: operation.amount.clone().unwrap_or_default(),
            source,
        })?;
    let Operation {
        op,
        client,
        account,
        name,
        birth_date,
        address,
        ..
    } = operation;

    match op.as_str() {
        "client" => {
            let name = required(name, &op, "name")?;
            let birth_date = required(birth_date, &op, "birth_date")?;
            let address = required(address, &op, "address")?;
            registry
                .create_client(&client, &name, &birth_date, &address)
                .map_err(BankError::from)?;
        }
        "account" => {
            registry
                .open_current_account(&client)
                .map_err(BankError::from)?;
        }
        "basic_account" => {
            registry
                .create_account(&client, AccountKind::Basic)
                .map_err(BankError::from)?;
        }
        kind => {
            let kind: TransactionKind = kind.parse().map_err(BankError::from)?;
            let number: AccountNumber = required(account, &op, "account")?;
            let amount = required(amount, &op, "amount")?;
            registry.perform(&client, number, Transaction::new(kind, amount))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::{
        account::AccountError,
        registry::RegistryError,
        transaction::TransactionError,
    };

    use super::*;

    fn run(input: &str, report: Report) -> (String, Vec<(u64, OperationError)>) {
        let mut output = Vec::new();
        let errors = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        let sink = errors.clone();
        let service = Service {
            input: input.as_bytes(),
            output: &mut output,
            config: BankConfig::default(),
            report,
            error_printer: Box::new(move |line, err| sink.borrow_mut().push((line, err))),
        };
        service.run().unwrap();
        let errors = errors.take();
        (String::from_utf8(output).unwrap(), errors)
    }

    #[test]
    fn reports_rejected_operations() {
        let input = "\
op,client,account,amount,name,birth_date,address
client,12345678901,,,Ana,01-01-1990,Rua A
client,12345678901,,,Ana,01-01-1990,Rua A
client,98765432100,,,Bia
account,12345678901
account,00000000000
transfer,12345678901,1,10
deposit,12345678901,1
withdrawal,12345678901,1,10
";
        let (output, errors) = run(input, Report::Accounts);
        assert_eq!(errors.len(), 6);
        assert!(matches!(
            errors[0].1,
            OperationError::Bank(BankError::RegistryErr(
                RegistryError::DuplicateIdentifier { .. }
            ))
        ));
        assert!(matches!(
            errors[1].1,
            OperationError::MissingField {
                field: "birth_date",
                ..
            }
        ));
        assert!(matches!(
            errors[2].1,
            OperationError::Bank(BankError::RegistryErr(RegistryError::ClientNotFound { .. }))
        ));
        assert!(matches!(
            errors[3].1,
            OperationError::Bank(BankError::TransactionErr(
                TransactionError::Unrecognized { .. }
            ))
        ));
        assert!(matches!(
            errors[4].1,
            OperationError::MissingField {
                field: "amount",
                ..
            }
        ));
        assert!(matches!(
            errors[5].1,
            OperationError::Bank(BankError::TransactionErr(TransactionError::Rejected(
                AccountError::InsufficientFunds { .. }
            )))
        ));

        assert_eq!(
            output,
            "branch,account,client,holder,kind,balance,withdrawals\n\
             0001,1,12345678901,Ana,current,0,0\n"
        );
    }

    #[test]
    fn statements_report() {
        let input = "\
op,client,account,amount,name,birth_date,address
client,12345678901,,,Ana,01-01-1990,Rua A
account,12345678901
basic_account,12345678901
deposit,12345678901,1,150.00
withdraw,12345678901,1,50.00
";
        let (output, errors) = run(input, Report::Statements);
        assert!(errors.is_empty());
        assert!(output.contains("STATEMENT 0001/1"));
        assert!(output.contains("Deposit:\t150.00 ("));
        assert!(output.contains("Withdrawal:\t50.00 ("));
        assert!(output.contains("Balance:\t100.00"));
        assert!(output.contains("STATEMENT 0001/2"));
        assert!(output.contains("No transactions recorded."));
    }

    #[test]
    fn malformed_amount_is_reported() {
        let input = "\
op,client,account,amount,name,birth_date,address
client,12345678901,,,Ana,01-01-1990,Rua A
account,12345678901
deposit,12345678901,1,12.5O
deposit,12345678901,1,1000.10
";
        let (output, errors) = run(input, Report::Accounts);
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            &errors[0].1,
            OperationError::InvalidAmount { value, .. } if value == "12.5O"
        ));
        assert!(output.ends_with("0001,1,12345678901,Ana,current,1000.10,0\n"));
    }
}
