use super::account::{Balance, CustomerId};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
    Transfer,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransactionKind::Deposit => "deposit",
            TransactionKind::Withdrawal => "withdrawal",
            TransactionKind::Transfer => "transfer",
        };
        f.write_str(name)
    }
}

/// One entry of the append-only transaction log.
///
/// A transfer is recorded once, against the sender. The account id is a weak
/// reference: it is not cleared when the account is later deleted.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
pub struct TransactionRecord {
    pub account: CustomerId,
    pub kind: TransactionKind,
    pub amount: Balance,
}

impl TransactionRecord {
    pub fn new(account: CustomerId, kind: TransactionKind, amount: Balance) -> Self {
        Self {
            account,
            kind,
            amount,
        }
    }
}
