//! # Multisearch CLI
//!
//! Filters a JSON array of objects with multisearch clauses and prints the
//! matching records as JSON.
//!
//! ## Example Usage
//!
//! ```bash
//! # Records with a favorite number up to 9 that mention "blue" anywhere
//! multisearch people.json -q 'favoriteNumber:<=9' -q blue
//!
//! # Labeled fields, date matching and grouping
//! multisearch people.json -f name=Name -f birthDate='Birth Date' \
//!     --date-field birthDate -q 'birth date:<1993-06-01' -g isEmployed
//!
//! # Suggestion list for a field
//! multisearch people.json --suggest favoriteColor --suggestions favoriteColor
//! ```
//!
//! Logging goes to stderr and is controlled by `MULTISEARCH_LOG` (an
//! `EnvFilter` directive) or `-v`.

mod cli;
mod row;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::cli::Args;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(EnvFilter::try_from_env("MULTISEARCH_LOG").unwrap_or_else(|_| EnvFilter::new(log_level)))
        .init();

    let output = cli::run(&args)?;
    println!("{output}");
    Ok(())
}
