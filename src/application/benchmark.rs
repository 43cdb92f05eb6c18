use crate::config::BenchConfig;
use crate::domain::account::{Balance, CustomerId};
use crate::domain::ledger::Ledger;
use crate::error::{LedgerError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::ops::RangeInclusive;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Wall-clock time spent in one phase of the workload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseTiming {
    pub name: &'static str,
    pub calls: usize,
    pub elapsed: Duration,
}

impl PhaseTiming {
    pub fn per_call(&self) -> Duration {
        match u32::try_from(self.calls) {
            Ok(0) | Err(_) => Duration::ZERO,
            Ok(calls) => self.elapsed / calls,
        }
    }
}

/// Summary of a benchmark run.
#[derive(Debug, Clone, Serialize)]
pub struct BenchReport {
    pub seed: u64,
    pub accounts: usize,
    pub transactions: usize,
    pub rejected_withdrawals: usize,
    pub rejected_transfers: usize,
    pub initial_total: Balance,
    pub deposited: Balance,
    pub withdrawn: Balance,
    pub final_total: Balance,
    pub phases: Vec<PhaseTiming>,
}

impl BenchReport {
    pub fn total_elapsed(&self) -> Duration {
        self.phases.iter().map(|phase| phase.elapsed).sum()
    }

    /// Phases ordered by time spent, slowest first.
    pub fn phases_by_cumulative_time(&self) -> Vec<&PhaseTiming> {
        let mut phases: Vec<&PhaseTiming> = self.phases.iter().collect();
        phases.sort_by(|a, b| b.elapsed.cmp(&a.elapsed));
        phases
    }
}

fn draw(rng: &mut StdRng, range: &RangeInclusive<i64>) -> Balance {
    let value: i64 = rng.gen_range(range.clone());
    Balance::from(value)
}

fn overflowed(what: &str) -> LedgerError {
    LedgerError::ValidationError(format!("{what} does not fit in a decimal"))
}

fn timed<T>(phases: &mut Vec<PhaseTiming>, name: &'static str, calls: usize, f: impl FnOnce() -> T) -> T {
    let started = Instant::now();
    let value = f();
    let elapsed = started.elapsed();
    debug!(phase = name, calls, ?elapsed, "phase finished");
    phases.push(PhaseTiming {
        name,
        calls,
        elapsed,
    });
    value
}

/// Runs the reference workload against a fresh ledger.
///
/// Accounts `0..N` are opened with a random balance, then the workload runs
/// one batch deposit covering every account, one withdrawal per account, and
/// one transfer from each account `i` to `(i + 1) % N`. Every amount is drawn
/// from `config.amount`.
pub fn run_benchmark(config: &BenchConfig) -> Result<(Ledger, BenchReport)> {
    config.validate()?;
    let seed = config.seed.unwrap_or_else(|| rand::thread_rng().r#gen());
    let mut rng = StdRng::seed_from_u64(seed);
    let n = config.accounts;
    let calls = n as usize;
    info!(accounts = n, seed, "starting ledger benchmark");

    let mut ledger = Ledger::new();
    let mut phases = Vec::with_capacity(4);

    let opening: Vec<Balance> = (0..n)
        .map(|_| draw(&mut rng, &config.initial_balance))
        .collect();
    timed(&mut phases, "create_accounts", calls, || {
        for (id, balance) in (0..n).zip(opening) {
            let _ = ledger.create_account(id, balance);
        }
    });
    let initial_total = ledger
        .total_balance()
        .ok_or_else(|| overflowed("initial total"))?;

    let deposits: Vec<(CustomerId, Balance)> = (0..n)
        .map(|id| (id, draw(&mut rng, &config.amount)))
        .collect();
    let deposited = Balance::checked_sum(deposits.iter().map(|(_, amount)| *amount))
        .ok_or_else(|| overflowed("deposited total"))?;
    timed(&mut phases, "batch_deposit", calls, || {
        ledger.batch_deposit(deposits)
    });

    let withdrawals: Vec<Balance> = (0..n)
        .map(|_| draw(&mut rng, &config.amount))
        .collect();
    let (withdrawn, rejected_withdrawals) = timed(&mut phases, "withdraw", calls, || {
        let mut withdrawn = Some(Balance::ZERO);
        let mut rejected = 0;
        for (id, amount) in (0..n).zip(withdrawals) {
            match ledger.withdraw(id, amount) {
                Ok(()) => withdrawn = withdrawn.and_then(|total| total.checked_add(amount)),
                Err(_) => rejected += 1,
            }
        }
        (withdrawn, rejected)
    });
    let withdrawn = withdrawn.ok_or_else(|| overflowed("withdrawn total"))?;

    let transfers: Vec<Balance> = (0..n)
        .map(|_| draw(&mut rng, &config.amount))
        .collect();
    let rejected_transfers = timed(&mut phases, "transfer", calls, || {
        (0..n)
            .zip(transfers)
            .filter(|&(id, amount)| ledger.transfer(id, (id + 1) % n, amount).is_err())
            .count()
    });

    let final_total = ledger
        .total_balance()
        .ok_or_else(|| overflowed("final total"))?;
    let report = BenchReport {
        seed,
        accounts: ledger.len(),
        transactions: ledger.get_transactions().len(),
        rejected_withdrawals,
        rejected_transfers,
        initial_total,
        deposited,
        withdrawn,
        final_total,
        phases,
    };
    info!(
        transactions = report.transactions,
        elapsed = ?report.total_elapsed(),
        "ledger benchmark finished"
    );
    Ok((ledger, report))
}
