//! Harbor simulator CLI
//!
//! Runs the overloaded-harbor simulation several times and prints the mean
//! turnaround time of the ships.
//!
//! ```bash
//! harbor --docks 3 --amount 10 --tries 20 --seed 42
//! harbor -a 5 -l debug --file
//! ```

use clap::Parser;
use harborsim::{Experiment, HarborConfig};
use log::LevelFilter;
use std::fs::{self, File};
use std::time::{SystemTime, UNIX_EPOCH};

const LOG_DIR: &str = "./logs";

/// Harbor simulator
#[derive(Parser, Debug)]
#[command(name = "harbor")]
#[command(version, about, long_about = None)]
struct Args {
    /// Number of harbor docks
    #[arg(short = 'd', long, default_value = "3")]
    docks: usize,

    /// Number of ships to attend
    #[arg(short = 'a', long, default_value = "3")]
    amount: usize,

    /// Number of harbor simulations
    #[arg(short = 't', long, default_value = "10")]
    tries: usize,

    /// Log level (error, warn, info, debug, trace, off)
    #[arg(short = 'l', long, default_value = "INFO")]
    level: String,

    /// Write the log to a file under ./logs instead of the console
    #[arg(short = 'F', long)]
    file: bool,

    /// Seed for reproducible runs; each run adds its index
    #[arg(long)]
    seed: Option<u64>,

    /// Do not narrate ship movements
    #[arg(short = 'q', long)]
    quiet: bool,
}

fn init_logger(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let level: LevelFilter = args
        .level
        .parse()
        .map_err(|_| format!("unknown log level '{}'", args.level))?;

    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_level(level).format_timestamp(None);

    if args.file {
        fs::create_dir_all(LOG_DIR)?;
        let stamp = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
        let path = format!("{}/harbor-{}.log", LOG_DIR, stamp);
        builder.target(env_logger::Target::Pipe(Box::new(File::create(path)?)));
    }

    builder.init();
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logger(&args)?;

    let mut config = HarborConfig::new()
        .with_ships(args.amount)
        .with_docks(args.docks)
        .with_verbose(!args.quiet);
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let summary = Experiment::new(config, args.tries).run()?;

    println!(
        "The mean of the ships turn around time is {:.4} hours",
        summary.mean_turnaround_hours
    );
    println!(
        "Mean time at a dock: {:.4} hours, longest turnaround: {:.4} hours ({} runs of {} ships)",
        summary.mean_dock_hours,
        summary.max_turnaround_hours,
        summary.runs,
        summary.ships_per_run
    );
    Ok(())
}
