use super::account::{Account, Balance, CustomerId};
use super::outcome::{BatchReport, Outcome, Rejection};
use super::transaction::{TransactionKind, TransactionRecord};
use std::collections::{HashMap, HashSet};

/// In-memory store of customer accounts plus the append-only transaction log.
///
/// Mutations take `&mut self`, so every operation runs to completion before the
/// next one is admitted. Use [`crate::infrastructure::in_memory::InMemoryLedger`]
/// to share a ledger across tasks.
///
/// `existing` mirrors the key set of `accounts` and is updated together with it.
#[derive(Debug, Default, Clone)]
pub struct Ledger {
    accounts: HashMap<CustomerId, Account>,
    existing: HashSet<CustomerId>,
    transactions: Vec<TransactionRecord>,
}

impl Ledger {
    /// Creates a new, empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens an account with `initial_balance`.
    ///
    /// A second call for the same id is refused and keeps the first balance.
    pub fn create_account(&mut self, id: CustomerId, initial_balance: Balance) -> Outcome {
        if self.existing.contains(&id) {
            return Err(Rejection::DuplicateAccount(id));
        }
        self.accounts.insert(id, Account::new(id, initial_balance));
        self.existing.insert(id);
        Ok(())
    }

    /// Removes an account. Log entries that reference it are kept.
    pub fn delete_account(&mut self, id: CustomerId) -> Outcome {
        if !self.existing.remove(&id) {
            return Err(Rejection::UnknownAccount(id));
        }
        self.accounts.remove(&id);
        Ok(())
    }

    /// Administrative overwrite of a balance. Nothing is appended to the log.
    pub fn update_account(&mut self, id: CustomerId, new_balance: Balance) -> Outcome {
        let account = self.account_mut(id)?;
        account.balance = new_balance;
        Ok(())
    }

    /// Credits `amount` to the account and records a deposit.
    ///
    /// The sign of `amount` is not checked here; see [`super::account::Amount`].
    pub fn deposit(&mut self, id: CustomerId, amount: Balance) -> Outcome {
        let account = self.account_mut(id)?;
        account.balance = account
            .balance
            .checked_add(amount)
            .ok_or(Rejection::Overflow { account: id })?;
        self.record(id, TransactionKind::Deposit, amount);
        Ok(())
    }

    /// Applies a deposit for every pair the ledger accepts.
    ///
    /// Entries are independent: a refused entry is skipped and reported, the rest
    /// of the batch still applies, and nothing is rolled back.
    pub fn batch_deposit<I>(&mut self, deposits: I) -> BatchReport
    where
        I: IntoIterator<Item = (CustomerId, Balance)>,
    {
        let mut report = BatchReport::default();
        for (id, amount) in deposits {
            match self.deposit(id, amount) {
                Ok(()) => report.applied += 1,
                Err(_) => report.skipped.push(id),
            }
        }
        report
    }

    /// Debits `amount` if the balance covers it and records a withdrawal.
    pub fn withdraw(&mut self, id: CustomerId, amount: Balance) -> Outcome {
        let account = self.account_mut(id)?;
        if account.balance < amount {
            return Err(Rejection::InsufficientFunds {
                account: id,
                balance: account.balance,
                requested: amount,
            });
        }
        account.balance = account
            .balance
            .checked_sub(amount)
            .ok_or(Rejection::Overflow { account: id })?;
        self.record(id, TransactionKind::Withdrawal, amount);
        Ok(())
    }

    /// Moves `amount` from `sender` to `receiver`.
    ///
    /// Both new balances are computed before either is written, so an overflow
    /// on the receiver leaves the sender untouched. A single record naming the
    /// sender is appended. `sender == receiver` is allowed and nets to zero.
    pub fn transfer(&mut self, sender: CustomerId, receiver: CustomerId, amount: Balance) -> Outcome {
        let available = self.balance_of(sender)?;
        let credited = self.balance_of(receiver)?;
        if available < amount {
            return Err(Rejection::InsufficientFunds {
                account: sender,
                balance: available,
                requested: amount,
            });
        }

        let debited = available
            .checked_sub(amount)
            .ok_or(Rejection::Overflow { account: sender })?;
        let credited = if sender == receiver {
            debited.checked_add(amount)
        } else {
            credited.checked_add(amount)
        }
        .ok_or(Rejection::Overflow { account: receiver })?;

        self.account_mut(sender)?.balance = debited;
        self.account_mut(receiver)?.balance = credited;
        self.record(sender, TransactionKind::Transfer, amount);
        Ok(())
    }

    /// Current balance, or `None` when the account does not exist.
    pub fn get_balance(&self, id: CustomerId) -> Option<Balance> {
        self.accounts.get(&id).map(|account| account.balance)
    }

    /// The full transaction log in submission order.
    pub fn get_transactions(&self) -> &[TransactionRecord] {
        &self.transactions
    }

    pub fn contains(&self, id: CustomerId) -> bool {
        self.existing.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Snapshot of all accounts, ordered by id.
    pub fn accounts(&self) -> Vec<Account> {
        let mut accounts: Vec<Account> = self.accounts.values().cloned().collect();
        accounts.sort_by_key(|account| account.id);
        accounts
    }

    /// Sum of every account balance, or `None` if it does not fit in a `Decimal`.
    pub fn total_balance(&self) -> Option<Balance> {
        Balance::checked_sum(self.accounts.values().map(|account| account.balance))
    }

    fn account_mut(&mut self, id: CustomerId) -> Result<&mut Account, Rejection> {
        self.accounts
            .get_mut(&id)
            .ok_or(Rejection::UnknownAccount(id))
    }

    fn balance_of(&self, id: CustomerId) -> Result<Balance, Rejection> {
        self.get_balance(id).ok_or(Rejection::UnknownAccount(id))
    }

    fn record(&mut self, account: CustomerId, kind: TransactionKind, amount: Balance) {
        self.transactions
            .push(TransactionRecord::new(account, kind, amount));
    }
}
