//! Domain layer: accounts, the transaction log and the ledger that owns them.

pub mod account;
pub mod ledger;
pub mod operation;
pub mod outcome;
pub mod ports;
pub mod transaction;
