//! CLI tool for scrollgrid - settles a grid against recorded measurements
//! and outputs the layout state and render description as JSON
//!
//! Usage:
//!   scrollgrid_cli <scenario.json>              # Output JSON to stdout
//!   scrollgrid_cli <scenario.json> -o out.json  # Output JSON to file
//!
//! Set `RUST_LOG=scrollgrid=debug` to trace each sizing pass.

#![allow(clippy::exit)]

use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use scrollgrid::sim::{run_scenario, Scenario};
use scrollgrid::{Result, ScrollGridError};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage: scrollgrid_cli <scenario.json> [-o output.json]";

struct Args {
    input: PathBuf,
    output: Option<PathBuf>,
}

impl Args {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self> {
        let input = args.next().ok_or_else(|| ScrollGridError::Config(USAGE.into()))?;
        let output = match args.next().as_deref() {
            None => None,
            Some("-o") => Some(
                args.next()
                    .ok_or_else(|| ScrollGridError::Config("-o needs a path".into()))?,
            ),
            Some(other) => {
                return Err(ScrollGridError::Config(format!(
                    "unexpected argument {other:?}\n{USAGE}"
                )))
            }
        };
        Ok(Self {
            input: input.into(),
            output: output.map(PathBuf::from),
        })
    }
}

fn run(args: &Args) -> Result<()> {
    let data = fs::read_to_string(&args.input)?;
    let scenario = Scenario::from_json(&data)?;

    let report = run_scenario(&scenario);
    for index in &report.rejected_sections {
        tracing::warn!(index, "measurement for a section without a scroller was ignored");
    }
    let json = serde_json::to_string_pretty(&report)?;

    match &args.output {
        Some(path) => {
            fs::write(path, &json)?;
            tracing::info!(path = %path.display(), "report written");
        }
        None => writeln!(io::stdout(), "{json}")?,
    }
    Ok(())
}

fn main() {
    let directives = env::var("RUST_LOG").unwrap_or_else(|_| "scrollgrid=info".to_owned());
    let env_filter = EnvFilter::builder().parse_lossy(directives);
    tracing_subscriber::fmt()
        .compact()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();

    let result = Args::parse(env::args().skip(1)).and_then(|args| run(&args));
    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
