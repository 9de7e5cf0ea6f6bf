use std::{fs::File, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use rust_decimal::Decimal;
use tiny_bank::{
    bin_utils::{OperationError, Report, Service},
    config::{BankConfig, CurrentAccountLimits, OwnershipPolicy},
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Replay banking operations from a CSV file and print the resulting accounts
#[derive(Parser, Debug)]
#[command(name = "tiny-bank")]
struct Args {
    /// CSV file with `op,client,account,amount,name,birth_date,address` rows
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// What to print once every operation was replayed
    #[arg(long, value_enum, default_value_t = Report::Accounts)]
    report: Report,

    /// Branch code assigned to new accounts
    #[arg(long, default_value = "0001")]
    branch: String,

    /// Largest single withdrawal on a current account
    #[arg(long, default_value = "500.00")]
    withdrawal_ceiling: Decimal,

    /// Withdrawals allowed over the lifetime of a current account
    #[arg(long, default_value_t = 3)]
    max_withdrawals: usize,

    /// Reject transactions on accounts the client does not own
    #[arg(long)]
    enforce_ownership: bool,
}

impl Args {
    fn to_config(&self) -> BankConfig {
        BankConfig::new(
            self.branch.as_str(),
            CurrentAccountLimits {
                withdrawal_ceiling: self.withdrawal_ceiling,
                max_withdrawals: self.max_withdrawals,
            },
            if self.enforce_ownership {
                OwnershipPolicy::Enforced
            } else {
                OwnershipPolicy::Unchecked
            },
        )
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tiny_bank=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let file = File::open(&args.input)
        .with_context(|| format!("Failed to open `{}`", args.input.display()))?;

    let service = Service {
        input: file,
        output: &mut std::io::stdout(),
        config: args.to_config(),
        report: args.report,
        error_printer: Box::new(|line, err| match err {
            OperationError::Bank(err) => {
                // business rejections, not technical errors
                info!(line, "{err}")
            }
            err => warn!(line, "{err}"),
        }),
    };
    service.run()
}
