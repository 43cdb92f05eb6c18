use crate::domain::account::{Account, Balance, CustomerId};
use crate::domain::operation::Operation;
use crate::domain::outcome::{BatchReport, Outcome};
use crate::domain::ports::LedgerBox;
use crate::domain::transaction::TransactionRecord;
use crate::error::{LedgerError, Result};
use tracing::debug;

/// Counts of applied and refused operations.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EngineStats {
    pub applied: usize,
    pub rejected: usize,
}

impl EngineStats {
    fn tally(&mut self, outcome: &Outcome) {
        match outcome {
            Ok(()) => self.applied += 1,
            Err(_) => self.rejected += 1,
        }
    }

    fn tally_batch(&mut self, report: &BatchReport) {
        self.applied += report.applied;
        self.rejected += report.skipped.len();
    }
}

/// Final state handed back by [`LedgerEngine::into_results`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerSnapshot {
    pub accounts: Vec<Account>,
    pub transactions: Vec<TransactionRecord>,
    pub stats: EngineStats,
}

/// Applies operations to a ledger.
///
/// `LedgerEngine` owns the ledger port and submits one operation at a time,
/// awaiting each before the next, so a script replays in submission order.
/// Consecutive deposits handed to [`LedgerEngine::process_operations`] are
/// submitted together as one batch deposit.
pub struct LedgerEngine {
    ledger: LedgerBox,
    stats: EngineStats,
}

impl LedgerEngine {
    /// Creates a new `LedgerEngine` over the given ledger port.
    pub fn new(ledger: LedgerBox) -> Self {
        Self {
            ledger,
            stats: EngineStats::default(),
        }
    }

    pub fn stats(&self) -> EngineStats {
        self.stats
    }

    /// Submits a single operation.
    ///
    /// A rejected operation is not an error: it is logged, counted and returned
    /// to the caller as the `Err` side of the outcome.
    pub async fn apply(&mut self, operation: Operation) -> Outcome {
        let outcome = match operation {
            Operation::Create { id, balance } => self.ledger.create_account(id, balance).await,
            Operation::Delete { id } => self.ledger.delete_account(id).await,
            Operation::Update { id, balance } => self.ledger.update_account(id, balance).await,
            Operation::Deposit { id, amount } => self.ledger.deposit(id, amount.into()).await,
            Operation::Withdraw { id, amount } => self.ledger.withdraw(id, amount.into()).await,
            Operation::Transfer {
                sender,
                receiver,
                amount,
            } => {
                self.ledger
                    .transfer(sender, receiver, amount.into())
                    .await
            }
        };
        if let Err(rejection) = &outcome {
            debug!(account = operation.account(), ?operation, %rejection, "operation rejected");
        }
        self.stats.tally(&outcome);
        outcome
    }

    pub async fn apply_batch_deposit(&mut self, deposits: Vec<(CustomerId, Balance)>) -> BatchReport {
        let report = self.ledger.batch_deposit(deposits).await;
        if !report.skipped.is_empty() {
            debug!(skipped = ?report.skipped, "batch deposit skipped refused entries");
        }
        self.stats.tally_batch(&report);
        report
    }

    /// Submits a sequence of operations in order.
    ///
    /// Runs of consecutive deposits are coalesced into batch deposits; every
    /// other operation is applied on its own. Read errors from the source are
    /// passed to `on_error` and processing continues with the next item.
    pub async fn process_operations<I, F>(&mut self, operations: I, mut on_error: F)
    where
        I: IntoIterator<Item = Result<Operation>>,
        F: FnMut(LedgerError),
    {
        let mut pending: Vec<(CustomerId, Balance)> = Vec::new();
        for item in operations {
            match item {
                Ok(Operation::Deposit { id, amount }) => pending.push((id, amount.into())),
                Ok(operation) => {
                    self.flush_deposits(&mut pending).await;
                    let _ = self.apply(operation).await;
                }
                Err(e) => on_error(e),
            }
        }
        self.flush_deposits(&mut pending).await;
    }

    async fn flush_deposits(&mut self, pending: &mut Vec<(CustomerId, Balance)>) {
        if !pending.is_empty() {
            self.apply_batch_deposit(std::mem::take(pending)).await;
        }
    }

    /// Consumes the engine and returns the final accounts, log and counts.
    pub async fn into_results(self) -> LedgerSnapshot {
        LedgerSnapshot {
            accounts: self.ledger.accounts().await,
            transactions: self.ledger.get_transactions().await,
            stats: self.stats,
        }
    }
}
