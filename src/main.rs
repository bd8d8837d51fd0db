// Usage:
//   ip-scatter <BUCKETS> [--count N] [--family v4|v6|both] [--seed S] [-v]

use std::io;
use std::process::ExitCode;

use clap::{ArgAction, Parser, ValueEnum};
use ip_scatter::{AddressFamily, Config};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FamilyArg {
    V4,
    V6,
    Both,
}

impl FamilyArg {
    fn families(self) -> Vec<AddressFamily> {
        match self {
            FamilyArg::V4 => vec![AddressFamily::V4],
            FamilyArg::V6 => vec![AddressFamily::V6],
            FamilyArg::Both => vec![AddressFamily::V4, AddressFamily::V6],
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "ip-scatter")]
#[command(about = "Time IP-to-bucket hash candidates and show their scatter", long_about = None)]
struct Args {
    /// Number of buckets to reduce hashes into
    #[arg(value_name = "BUCKETS")]
    buckets: u64,

    /// Addresses generated per family
    #[arg(short = 'n', long, default_value_t = ip_scatter::config::DEFAULT_COUNT)]
    count: usize,

    /// Address families to benchmark
    #[arg(short, long, value_enum, default_value = "both")]
    family: FamilyArg,

    /// Seed for address generation (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Seed for the int31 candidate (drawn from the run RNG if omitted)
    #[arg(long)]
    int31_seed: Option<u32>,

    /// Log more to stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn config(&self) -> Config {
        Config {
            count: self.count,
            families: self.family.families(),
            seed: self.seed,
            int31_seed: self.int31_seed,
            ..Config::new(self.buckets)
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match ip_scatter::run(&args.config(), &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "benchmark failed");
            ExitCode::FAILURE
        }
    }
}
