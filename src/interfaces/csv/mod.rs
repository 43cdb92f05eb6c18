//! CSV adapters: operation scripts in, account snapshots and the transaction log out.

pub mod ledger_writer;
pub mod operation_reader;
