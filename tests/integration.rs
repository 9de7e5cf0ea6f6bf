use std::{cell::RefCell, rc::Rc, str::from_utf8};

use tiny_bank::{
    account::AccountError,
    bin_utils::{OperationError, Report, Service},
    config::{BankConfig, OwnershipPolicy},
    registry::{BankError, RegistryError},
    transaction::TransactionError,
};

const TEST_FILE: &str = include_str!("operations.csv");

fn replay(config: BankConfig, report: Report) -> (String, Vec<OperationError>) {
    let mut output = Vec::new();
    let errors = Rc::new(RefCell::new(Vec::new()));
    let sink = errors.clone();
    let service = Service {
        input: TEST_FILE.as_bytes(),
        output: &mut output,
        config,
        report,
        error_printer: Box::new(move |line, err| {
            eprintln!("Error at line {line}: {err}");
            sink.borrow_mut().push(err);
        }),
    };
    service.run().unwrap();
    let output = from_utf8(&output).unwrap().to_owned();
    (output, errors.take())
}

fn rejection(err: &OperationError) -> Option<&AccountError> {
    match err {
        OperationError::Bank(BankError::TransactionErr(TransactionError::Rejected(err))) => {
            Some(err)
        }
        _ => None,
    }
}

#[test]
fn process_operations() {
    let (output, errors) = replay(BankConfig::default(), Report::Accounts);

    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(
        lines,
        vec![
            "branch,account,client,holder,kind,balance,withdrawals",
            "0001,1,12345678901,Ana Souza,current,0.00,2",
            "0001,2,98765432100,Bruno Lima,current,700.00,3",
            "0001,3,98765432100,Bruno Lima,basic,30.00,1",
        ]
    );

    assert_eq!(errors.len(), 7);
    assert!(matches!(
        errors[0],
        OperationError::Bank(BankError::RegistryErr(
            RegistryError::DuplicateIdentifier { .. }
        ))
    ));
    assert!(matches!(
        rejection(&errors[1]),
        Some(AccountError::ExceedsCeiling { .. })
    ));
    assert!(matches!(
        rejection(&errors[2]),
        Some(AccountError::InsufficientFunds { .. })
    ));
    assert!(matches!(
        rejection(&errors[3]),
        Some(AccountError::ExceedsWithdrawalLimit { limit: 3 })
    ));
    assert!(matches!(
        rejection(&errors[4]),
        Some(AccountError::InvalidAmount { .. })
    ));
    assert!(matches!(
        errors[5],
        OperationError::Bank(BankError::TransactionErr(
            TransactionError::Unrecognized { .. }
        ))
    ));
    // Bruno depositing on Ana's account
    assert!(matches!(
        errors[6],
        OperationError::Bank(BankError::RegistryErr(RegistryError::AccountNotFound {
            number: 1
        }))
    ));
}

#[test]
fn statements_follow_history() {
    let (output, _) = replay(BankConfig::default(), Report::Statements);

    let first = output.split("STATEMENT 0001/2").next().unwrap();
    assert!(first.contains("STATEMENT 0001/1"));
    assert_eq!(first.matches("Deposit:\t1000.00 (").count(), 1);
    assert_eq!(first.matches("Withdrawal:\t500.00 (").count(), 2);
    assert!(first.contains("Balance:\t0.00"));
    assert!(output.contains("Balance:\t700.00"));
    assert!(output.contains("Balance:\t30.00"));
}

#[test]
fn accounts_stay_with_their_owner_under_both_policies() {
    let enforced = BankConfig {
        ownership: OwnershipPolicy::Enforced,
        ..Default::default()
    };
    for config in [BankConfig::default(), enforced] {
        let (output, errors) = replay(config, Report::Accounts);
        assert!(output.contains("0001,1,12345678901,Ana Souza,current,0.00,2"));
        let foreign: Vec<_> = errors
            .iter()
            .filter(|err| {
                matches!(
                    err,
                    OperationError::Bank(BankError::RegistryErr(
                        RegistryError::AccountNotFound { .. }
                    )) | OperationError::Bank(BankError::TransactionErr(
                        TransactionError::NotAccountOwner { .. }
                    ))
                )
            })
            .collect();
        assert_eq!(foreign.len(), 1);
    }
}

#[test]
fn listing_report() {
    let (output, _) = replay(BankConfig::default(), Report::Listing);
    assert!(output.contains("Branch:\t0001\nAccount:\t1\nHolder:\tAna Souza"));
    assert!(output.contains("Account:\t3\nHolder:\tBruno Lima"));
}
