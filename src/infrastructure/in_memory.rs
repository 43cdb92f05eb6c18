use crate::domain::account::{Account, Balance, CustomerId};
use crate::domain::ledger::Ledger;
use crate::domain::outcome::{BatchReport, Outcome};
use crate::domain::ports::AccountLedger;
use crate::domain::transaction::TransactionRecord;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, trace};

/// A thread-safe ledger shared across tasks.
///
/// Uses `Arc<RwLock<Ledger>>`: every mutation holds the write lock for its whole
/// duration, so readers never see one side of a transfer without the other.
/// Cloning shares the same underlying ledger.
#[derive(Default, Clone)]
pub struct InMemoryLedger {
    ledger: Arc<RwLock<Ledger>>,
}

impl InMemoryLedger {
    /// Creates a new, empty shared ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum of all balances, read under a single lock. `None` on overflow.
    pub async fn total_balance(&self) -> Option<Balance> {
        self.ledger.read().await.total_balance()
    }
}

fn traced(op: &'static str, id: CustomerId, outcome: Outcome) -> Outcome {
    match &outcome {
        Ok(()) => trace!(operation = op, account = id, "applied"),
        Err(rejection) => debug!(operation = op, account = id, %rejection, "rejected"),
    }
    outcome
}

#[async_trait]
impl AccountLedger for InMemoryLedger {
    async fn create_account(&self, id: CustomerId, initial_balance: Balance) -> Outcome {
        let mut ledger = self.ledger.write().await;
        traced("create", id, ledger.create_account(id, initial_balance))
    }

    async fn delete_account(&self, id: CustomerId) -> Outcome {
        let mut ledger = self.ledger.write().await;
        traced("delete", id, ledger.delete_account(id))
    }

    async fn update_account(&self, id: CustomerId, new_balance: Balance) -> Outcome {
        let mut ledger = self.ledger.write().await;
        traced("update", id, ledger.update_account(id, new_balance))
    }

    async fn deposit(&self, id: CustomerId, amount: Balance) -> Outcome {
        let mut ledger = self.ledger.write().await;
        traced("deposit", id, ledger.deposit(id, amount))
    }

    async fn batch_deposit(&self, deposits: Vec<(CustomerId, Balance)>) -> BatchReport {
        let mut ledger = self.ledger.write().await;
        let report = ledger.batch_deposit(deposits);
        debug!(
            applied = report.applied,
            skipped = report.skipped.len(),
            "batch deposit"
        );
        report
    }

    async fn withdraw(&self, id: CustomerId, amount: Balance) -> Outcome {
        let mut ledger = self.ledger.write().await;
        traced("withdraw", id, ledger.withdraw(id, amount))
    }

    async fn transfer(&self, sender: CustomerId, receiver: CustomerId, amount: Balance) -> Outcome {
        let mut ledger = self.ledger.write().await;
        traced("transfer", sender, ledger.transfer(sender, receiver, amount))
    }

    async fn get_balance(&self, id: CustomerId) -> Option<Balance> {
        self.ledger.read().await.get_balance(id)
    }

    async fn get_transactions(&self) -> Vec<TransactionRecord> {
        self.ledger.read().await.get_transactions().to_vec()
    }

    async fn accounts(&self) -> Vec<Account> {
        self.ledger.read().await.accounts()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::outcome::Rejection;
    use crate::domain::transaction::TransactionKind;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_in_memory_ledger_operations() {
        let ledger = InMemoryLedger::new();
        ledger.create_account(1, Balance::from(100)).await.unwrap();
        ledger.create_account(2, Balance::from(50)).await.unwrap();

        ledger.transfer(1, 2, Balance::from(30)).await.unwrap();

        assert_eq!(ledger.get_balance(1).await, Some(Balance::from(70)));
        assert_eq!(ledger.get_balance(2).await, Some(Balance::from(80)));
        assert_eq!(
            ledger.get_transactions().await,
            vec![TransactionRecord::new(
                1,
                TransactionKind::Transfer,
                Balance::from(30)
            )]
        );
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let ledger = InMemoryLedger::new();
        let other = ledger.clone();

        ledger.create_account(1, Balance::new(dec!(1.5))).await.unwrap();

        assert_eq!(other.get_balance(1).await, Some(Balance::new(dec!(1.5))));
        assert_eq!(
            other.create_account(1, Balance::ZERO).await,
            Err(Rejection::DuplicateAccount(1))
        );
    }

    #[tokio::test]
    async fn test_batch_deposit_through_port() {
        let ledger = InMemoryLedger::new();
        ledger.create_account(1, Balance::ZERO).await.unwrap();
        ledger.create_account(2, Balance::ZERO).await.unwrap();

        let report = ledger
            .batch_deposit(vec![
                (1, Balance::from(1)),
                (3, Balance::from(1)),
                (2, Balance::from(1)),
            ])
            .await;

        assert_eq!(report.applied, 2);
        assert_eq!(report.skipped, vec![3]);
        assert_eq!(ledger.get_transactions().await.len(), 2);
    }

    #[tokio::test]
    async fn test_transfer_overflow_is_rejected_across_tasks() {
        let ledger = InMemoryLedger::new();
        ledger.create_account(1, Balance::from(10)).await.unwrap();
        ledger
            .create_account(2, Balance::new(Decimal::MAX))
            .await
            .unwrap();

        let handle = {
            let ledger = ledger.clone();
            tokio::spawn(async move { ledger.transfer(1, 2, Balance::from(5)).await })
        };

        assert_eq!(
            handle.await.unwrap(),
            Err(Rejection::Overflow { account: 2 })
        );
        assert_eq!(ledger.get_balance(1).await, Some(Balance::from(10)));
        assert!(ledger.get_transactions().await.is_empty());
        ledger.deposit(1, Balance::from(1)).await.unwrap();
        assert_eq!(ledger.get_balance(1).await, Some(Balance::from(11)));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_transfers_preserve_total() {
        let ledger = InMemoryLedger::new();
        for id in 0..10 {
            ledger.create_account(id, Balance::from(100)).await.unwrap();
        }

        let mut handles = Vec::new();
        for worker in 0..8u32 {
            let ledger = ledger.clone();
            handles.push(tokio::spawn(async move {
                for i in 0..200u32 {
                    let sender = (worker + i) % 10;
                    let receiver = (worker * 3 + i * 7) % 10;
                    let _ = ledger
                        .transfer(sender, receiver, Balance::from(i64::from(i % 17 + 1)))
                        .await;
                }
            }));
        }

        let observer = {
            let ledger = ledger.clone();
            tokio::spawn(async move {
                for _ in 0..100 {
                    assert_eq!(ledger.total_balance().await, Some(Balance::from(1000)));
                    tokio::task::yield_now().await;
                }
            })
        };

        for handle in handles {
            handle.await.unwrap();
        }
        observer.await.unwrap();

        assert_eq!(ledger.total_balance().await, Some(Balance::from(1000)));
        let accounts = ledger.accounts().await;
        assert!(accounts.iter().all(|a| a.balance >= Balance::ZERO));
    }
}
