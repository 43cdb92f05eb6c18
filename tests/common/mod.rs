use std::fs::File;
use std::io::Error;
use std::path::Path;

/// Writes an operations script that opens `accounts` accounts, then runs
/// `rounds` passes of deposit, withdrawal and ring transfer over them.
pub fn generate_operations_csv(path: &Path, accounts: u32, rounds: u32) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(["op", "account", "counterparty", "amount"])?;

    for id in 0..accounts {
        wtr.write_record(["create", &id.to_string(), "", "100"])?;
    }
    for round in 0..rounds {
        for id in 0..accounts {
            let amount = (round % 10 + 1).to_string();
            let next = ((id + 1) % accounts).to_string();
            wtr.write_record(["deposit", &id.to_string(), "", &amount])?;
            wtr.write_record(["withdraw", &id.to_string(), "", &amount])?;
            wtr.write_record(["transfer", &id.to_string(), &next, &amount])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
