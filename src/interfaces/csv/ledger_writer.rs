use crate::domain::account::{Account, Balance, CustomerId};
use crate::domain::transaction::{TransactionKind, TransactionRecord};
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct AccountRow {
    account: CustomerId,
    balance: String,
}

#[derive(Serialize)]
struct TransactionRow {
    account: CustomerId,
    kind: TransactionKind,
    amount: String,
}

fn format_balance(balance: Balance) -> String {
    balance.to_string()
}

/// Writes ledger state as CSV.
///
/// Every table is written with its own header line. Balances are written
/// normalized, without trailing zeros.
pub struct LedgerWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> LedgerWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::WriterBuilder::new()
                .has_headers(false)
                .flexible(true)
                .from_writer(sink),
        }
    }

    /// Writes `account,balance` rows in the order given.
    pub fn write_accounts<I>(&mut self, accounts: I) -> Result<()>
    where
        I: IntoIterator<Item = Account>,
    {
        self.writer.write_record(["account", "balance"])?;
        for account in accounts {
            self.writer.serialize(AccountRow {
                account: account.id,
                balance: format_balance(account.balance),
            })?;
        }
        self.writer.flush()?;
        Ok(())
    }

    /// Writes `account,kind,amount` rows in log order.
    pub fn write_transactions<'a, I>(&mut self, transactions: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a TransactionRecord>,
    {
        self.writer.write_record(["account", "kind", "amount"])?;
        for record in transactions {
            self.writer.serialize(TransactionRow {
                account: record.account,
                kind: record.kind,
                amount: format_balance(record.amount),
            })?;
        }
        self.writer.flush()?;
        Ok(())
    }

    #[cfg(test)]
    fn into_inner(self) -> Result<W> {
        self.writer.into_inner().map_err(|e| {
            crate::error::LedgerError::IoError(std::io::Error::other(e.to_string()))
        })
    }
}
