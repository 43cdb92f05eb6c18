use crate::error::{LedgerError, Result};
use std::ops::RangeInclusive;

pub const DEFAULT_ACCOUNTS: u32 = 10_000;
pub const DEFAULT_INITIAL_BALANCE: RangeInclusive<i64> = 100..=1000;
pub const DEFAULT_AMOUNT: RangeInclusive<i64> = 1..=100;

/// Parameters of the synthetic ledger workload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchConfig {
    /// Number of accounts, with ids `0..accounts`.
    pub accounts: u32,
    /// Range the opening balance of each account is drawn from.
    pub initial_balance: RangeInclusive<i64>,
    /// Range every deposit, withdrawal and transfer amount is drawn from.
    pub amount: RangeInclusive<i64>,
    /// Seed for the workload generator. `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            accounts: DEFAULT_ACCOUNTS,
            initial_balance: DEFAULT_INITIAL_BALANCE,
            amount: DEFAULT_AMOUNT,
            seed: None,
        }
    }
}

impl BenchConfig {
    pub fn with_accounts(mut self, accounts: u32) -> Self {
        self.accounts = accounts;
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Checks the configuration before any work is generated from it.
    pub fn validate(&self) -> Result<()> {
        if self.accounts == 0 {
            return Err(LedgerError::ConfigError(
                "accounts must be greater than zero".to_string(),
            ));
        }
        if self.initial_balance.is_empty() || *self.initial_balance.start() < 0 {
            return Err(LedgerError::ConfigError(format!(
                "invalid initial balance range {:?}",
                self.initial_balance
            )));
        }
        if self.amount.is_empty() || *self.amount.start() <= 0 {
            return Err(LedgerError::ConfigError(format!(
                "invalid amount range {:?}",
                self.amount
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_reference_workload() {
        let config = BenchConfig::default();
        assert_eq!(config.accounts, 10_000);
        assert_eq!(config.initial_balance, 100..=1000);
        assert_eq!(config.amount, 1..=100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(matches!(
            BenchConfig::default().with_accounts(0).validate(),
            Err(LedgerError::ConfigError(_))
        ));

        let config = BenchConfig {
            amount: 0..=10,
            ..BenchConfig::default()
        };
        assert!(config.validate().is_err());

        #[allow(clippy::reversed_empty_ranges)]
        let config = BenchConfig {
            initial_balance: 10..=1,
            ..BenchConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
