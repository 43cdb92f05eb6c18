use crate::domain::operation::{Operation, OperationRow};
use crate::error::{LedgerError, Result};
use std::io::Read;

/// Reads ledger operations from a CSV source.
///
/// Expects the header `op,account,counterparty,amount`. Whitespace is trimmed
/// and short rows are accepted, so `delete, 4` is a valid row.
pub struct OperationReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> OperationReader<R> {
    /// Creates a new `OperationReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and validates operations.
    ///
    /// A malformed row yields an `Err` for that row only; later rows are still read.
    pub fn operations(self) -> impl Iterator<Item = Result<Operation>> {
        self.reader.into_deserialize::<OperationRow>().map(|result| {
            result
                .map_err(LedgerError::from)
                .and_then(Operation::try_from)
        })
    }
}
