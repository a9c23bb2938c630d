use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tracing::info;
use weekend_count::count_weekend_days;

mod logging;

#[derive(Parser)]
#[command(
    name = "weekend-count",
    about = "Count the weekend days between two dates, inclusive",
    after_help = "Example: weekend-count 2023-06-01 2023-06-10"
)]
struct Cli {
    /// First date (YYYY-MM-DD)
    date1: String,

    /// Second date (YYYY-MM-DD), may be earlier than the first
    date2: String,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn run(cli: &Cli) -> Result<u64> {
    let count = count_weekend_days(&cli.date1, &cli.date2)
        .with_context(|| format!("cannot count weekend days between {} and {}", cli.date1, cli.date2))?;
    info!(count, "counted weekend days");
    Ok(count)
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version land here too and are not failures
            let code = if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
            let _ = err.print();
            return code;
        }
    };

    logging::init(cli.verbose);

    match run(&cli) {
        Ok(count) => {
            println!(
                "There are {count} weekend days between {} and {}.",
                cli.date1, cli.date2
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {err:#}");
            eprintln!("{}", Cli::command().render_usage());
            ExitCode::FAILURE
        }
    }
}
