use super::account::{Amount, Balance, CustomerId};
use crate::error::LedgerError;
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum OperationType {
    Create,
    Delete,
    Update,
    Deposit,
    Withdraw,
    Transfer,
}

/// Raw row of an operation script, before validation.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct OperationRow {
    pub op: OperationType,
    pub account: CustomerId,
    pub counterparty: Option<CustomerId>,
    /// Parsed from the field text so no digits are lost.
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub amount: Option<Decimal>,
}

/// A validated request against the ledger.
///
/// Balances set by `Create` and `Update` may be any value; amounts moved by
/// `Deposit`, `Withdraw` and `Transfer` are strictly positive.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Operation {
    Create { id: CustomerId, balance: Balance },
    Delete { id: CustomerId },
    Update { id: CustomerId, balance: Balance },
    Deposit { id: CustomerId, amount: Amount },
    Withdraw { id: CustomerId, amount: Amount },
    Transfer {
        sender: CustomerId,
        receiver: CustomerId,
        amount: Amount,
    },
}

impl Operation {
    /// The account the operation is submitted against.
    pub fn account(&self) -> CustomerId {
        match *self {
            Operation::Create { id, .. }
            | Operation::Delete { id }
            | Operation::Update { id, .. }
            | Operation::Deposit { id, .. }
            | Operation::Withdraw { id, .. } => id,
            Operation::Transfer { sender, .. } => sender,
        }
    }
}

fn required_amount(row: &OperationRow) -> Result<Decimal, LedgerError> {
    row.amount.ok_or_else(|| {
        LedgerError::ValidationError(format!(
            "{:?} on account {} is missing an amount",
            row.op, row.account
        ))
    })
}

impl TryFrom<OperationRow> for Operation {
    type Error = LedgerError;

    fn try_from(row: OperationRow) -> Result<Self, Self::Error> {
        let id = row.account;
        let operation = match row.op {
            OperationType::Create => Operation::Create {
                id,
                balance: row.amount.unwrap_or_default().into(),
            },
            OperationType::Delete => Operation::Delete { id },
            OperationType::Update => Operation::Update {
                id,
                balance: required_amount(&row)?.into(),
            },
            OperationType::Deposit => Operation::Deposit {
                id,
                amount: Amount::new(required_amount(&row)?)?,
            },
            OperationType::Withdraw => Operation::Withdraw {
                id,
                amount: Amount::new(required_amount(&row)?)?,
            },
            OperationType::Transfer => {
                let receiver = row.counterparty.ok_or_else(|| {
                    LedgerError::ValidationError(format!(
                        "Transfer from account {id} is missing a counterparty"
                    ))
                })?;
                Operation::Transfer {
                    sender: id,
                    receiver,
                    amount: Amount::new(required_amount(&row)?)?,
                }
            }
        };
        Ok(operation)
    }
}
