use rust_decimal::Decimal;

pub const DEFAULT_BRANCH: &str = "0001";

/// Limits applied to every withdrawal on a current account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentAccountLimits {
    /// Largest amount a single withdrawal may take
    pub withdrawal_ceiling: Decimal,
    /// Withdrawals allowed over the whole lifetime of the account
    pub max_withdrawals: usize,
}

impl Default for CurrentAccountLimits {
    fn default() -> Self {
        Self {
            withdrawal_ceiling: Decimal::new(50000, 2),
            max_withdrawals: 3,
        }
    }
}

/// Whether a client has to own an account before transacting on it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OwnershipPolicy {
    /// Any client may register transactions on any account it is handed.
    #[default]
    Unchecked,
    /// Account owner and the client's account list must both match.
    Enforced,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankConfig {
    pub branch: String,
    pub current_account: CurrentAccountLimits,
    pub ownership: OwnershipPolicy,
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            branch: DEFAULT_BRANCH.to_string(),
            current_account: CurrentAccountLimits::default(),
            ownership: OwnershipPolicy::default(),
        }
    }
}

impl BankConfig {
    pub fn new(
        branch: impl Into<String>,
        current_account: CurrentAccountLimits,
        ownership: OwnershipPolicy,
    ) -> Self {
        let branch = branch.into();
        let branch = if branch.trim().is_empty() {
            tracing::warn!("Empty branch code, using default ({DEFAULT_BRANCH})");
            DEFAULT_BRANCH.to_string()
        } else {
            branch
        };
        Self {
            branch,
            current_account,
            ownership,
        }
    }
}
