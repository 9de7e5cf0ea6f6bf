use std::io::Write;

use anyhow::Context;
use csv::Writer;

use crate::registry::in_memory_registry::InMemoryRegistry;

use super::Report;

const SEPARATOR: &str = "==================================================";

/// Writes the requested view of every account in the registry, in opening order.
pub fn print_report<W>(
    output: &mut W,
    report: Report,
    registry: &InMemoryRegistry,
) -> anyhow::Result<()>
where
    W: Write,
{
    match report {
        Report::Accounts => {
            let mut writer = Writer::from_writer(&mut *output);
            for summary in registry.account_summaries() {
                let account = summary.account;
                writer
                    .serialize(summary)
                    .with_context(|| format!("Failed to write account {account} to CSV"))?;
            }
            writer.flush().context("Failed to flush CSV writer")?;
        }
        Report::Statements => {
            for account in registry.accounts() {
                writeln!(output, "{}\n", account.statement()).with_context(|| {
                    format!("Failed to write statement of account {}", account.number())
                })?;
            }
        }
        Report::Listing => {
            if registry.accounts().is_empty() {
                writeln!(output, "No accounts opened.")?;
            }
            for summary in registry.account_summaries() {
                writeln!(output, "{SEPARATOR}\n{summary}")?;
            }
        }
    }
    output.flush()?;
    Ok(())
}
