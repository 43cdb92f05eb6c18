//! Application layer: drives the ledger.
//!
//! `engine` replays operation scripts against any `AccountLedger`; `benchmark`
//! runs the synthetic account workload and times each phase.

pub mod benchmark;
pub mod engine;
