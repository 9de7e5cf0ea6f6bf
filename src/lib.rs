/// Account balance management and the withdrawal rules of each account kind.
/// Accounts only move their balance, recording is left to [`transaction`].
pub mod account;

/// Clients and the single entry point through which a transaction reaches an account.
pub mod client;

/// Branch code, current account limits and the ownership policy.
pub mod config;

/// Append-only transaction log kept by every account.
pub mod history;

/// Deposits and withdrawals, and how they register on an account.
pub mod transaction;

/// Lookups over clients and accounts, plus the "in memory" registry that owns them.
///
/// NOTE: the registry is the canonical owner of accounts, clients only keep
/// the numbers of the accounts opened for them.
pub mod registry;

/// Batch driver used by the binary and by integration tests.
pub mod bin_utils;
