use clap::{Parser, Subcommand};
use ledgerbench::application::benchmark::{BenchReport, run_benchmark};
use ledgerbench::application::engine::LedgerEngine;
use ledgerbench::config::{BenchConfig, DEFAULT_ACCOUNTS};
use ledgerbench::domain::ports::LedgerBox;
use ledgerbench::infrastructure::in_memory::InMemoryLedger;
use ledgerbench::interfaces::csv::ledger_writer::LedgerWriter;
use ledgerbench::interfaces::csv::operation_reader::OperationReader;
use ledgerbench::observability::{self, LogFormat};
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log output format (filter with RUST_LOG)
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the synthetic account workload and report time per phase
    Bench {
        /// Number of accounts to open
        #[arg(long, env = "LEDGERBENCH_ACCOUNTS", default_value_t = DEFAULT_ACCOUNTS)]
        accounts: u32,

        /// Seed for the workload generator; random when omitted
        #[arg(long, env = "LEDGERBENCH_SEED")]
        seed: Option<u64>,

        /// Number of phases to list, slowest first
        #[arg(long, default_value_t = 10)]
        top: usize,

        /// Print the report as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Apply an operations CSV and print the resulting balances
    Replay {
        /// Input operations CSV file
        input: PathBuf,

        /// Also write the transaction log as CSV to this file
        #[arg(long)]
        transactions: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    observability::init(cli.log_format, "info");

    match cli.command {
        Command::Bench {
            accounts,
            seed,
            top,
            json,
        } => {
            let config = BenchConfig::default()
                .with_accounts(accounts)
                .with_seed(seed);
            let (_, report) = run_benchmark(&config).into_diagnostic()?;

            let stdout = io::stdout();
            let mut out = stdout.lock();
            if json {
                serde_json::to_writer_pretty(&mut out, &report).into_diagnostic()?;
                writeln!(out).into_diagnostic()?;
            } else {
                print_report(&mut out, &report, top).into_diagnostic()?;
            }
        }
        Command::Replay {
            input,
            transactions,
        } => {
            let ledger: LedgerBox = Box::new(InMemoryLedger::new());
            let mut engine = LedgerEngine::new(ledger);

            let file = File::open(input).into_diagnostic()?;
            let reader = OperationReader::new(file);
            engine
                .process_operations(reader.operations(), |e| {
                    warn!(error = %e, "skipping operation");
                    eprintln!("Error reading operation: {}", e);
                })
                .await;

            let snapshot = engine.into_results().await;
            info!(
                applied = snapshot.stats.applied,
                rejected = snapshot.stats.rejected,
                accounts = snapshot.accounts.len(),
                "replay finished"
            );

            let stdout = io::stdout();
            let mut writer = LedgerWriter::new(stdout.lock());
            writer.write_accounts(snapshot.accounts).into_diagnostic()?;

            if let Some(path) = transactions {
                let file = File::create(path).into_diagnostic()?;
                let mut writer = LedgerWriter::new(file);
                writer
                    .write_transactions(&snapshot.transactions)
                    .into_diagnostic()?;
            }
        }
    }

    Ok(())
}

fn print_report(out: &mut impl Write, report: &BenchReport, top: usize) -> io::Result<()> {
    writeln!(
        out,
        "ledger benchmark: {} accounts, seed {}",
        report.accounts, report.seed
    )?;
    writeln!(
        out,
        "transactions: {} (withdrawals refused: {}, transfers refused: {})",
        report.transactions, report.rejected_withdrawals, report.rejected_transfers
    )?;
    writeln!(
        out,
        "total balance: {} -> {} (deposited {}, withdrawn {})",
        report.initial_total, report.final_total, report.deposited, report.withdrawn
    )?;
    writeln!(out, "elapsed: {:?}", report.total_elapsed())?;
    writeln!(out)?;
    writeln!(
        out,
        "{:<18} {:>10} {:>14} {:>12}",
        "phase", "calls", "cumulative", "per call"
    )?;
    for phase in report.phases_by_cumulative_time().into_iter().take(top) {
        writeln!(
            out,
            "{:<18} {:>10} {:>14} {:>12}",
            phase.name,
            phase.calls,
            format!("{:?}", phase.elapsed),
            format!("{:?}", phase.per_call())
        )?;
    }
    Ok(())
}
