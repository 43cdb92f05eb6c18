use super::account::{Balance, CustomerId};
use thiserror::Error;

/// Why a ledger operation was refused.
///
/// A refused operation leaves every balance and the transaction log untouched.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum Rejection {
    #[error("account {0} already exists")]
    DuplicateAccount(CustomerId),
    #[error("account {0} does not exist")]
    UnknownAccount(CustomerId),
    #[error("account {account} has {balance}, cannot debit {requested}")]
    InsufficientFunds {
        account: CustomerId,
        balance: Balance,
        requested: Balance,
    },
    #[error("balance of account {account} would overflow")]
    Overflow { account: CustomerId },
}

pub type Outcome = std::result::Result<(), Rejection>;

/// Result of a batch deposit. Entries are applied independently.
#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub struct BatchReport {
    pub applied: usize,
    /// Ids of entries refused, either unknown or overflowing, in input order.
    pub skipped: Vec<CustomerId>,
}
