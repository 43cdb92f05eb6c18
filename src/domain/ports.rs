use super::account::{Account, Balance, CustomerId};
use super::outcome::{BatchReport, Outcome};
use super::transaction::TransactionRecord;
use async_trait::async_trait;

/// Ledger operations as seen by concurrent callers.
///
/// Implementations must make every mutating call atomic with respect to every
/// other call, including both sides of a transfer.
#[async_trait]
pub trait AccountLedger: Send + Sync {
    async fn create_account(&self, id: CustomerId, initial_balance: Balance) -> Outcome;
    async fn delete_account(&self, id: CustomerId) -> Outcome;
    async fn update_account(&self, id: CustomerId, new_balance: Balance) -> Outcome;
    async fn deposit(&self, id: CustomerId, amount: Balance) -> Outcome;
    async fn batch_deposit(&self, deposits: Vec<(CustomerId, Balance)>) -> BatchReport;
    async fn withdraw(&self, id: CustomerId, amount: Balance) -> Outcome;
    async fn transfer(&self, sender: CustomerId, receiver: CustomerId, amount: Balance) -> Outcome;
    async fn get_balance(&self, id: CustomerId) -> Option<Balance>;
    /// Copy of the transaction log at the time of the call.
    async fn get_transactions(&self) -> Vec<TransactionRecord>;
    /// Copy of all accounts, ordered by id.
    async fn accounts(&self) -> Vec<Account>;
}

pub type LedgerBox = Box<dyn AccountLedger>;
pub type LedgerFactory = Box<dyn Fn() -> LedgerBox + Send + Sync>;
