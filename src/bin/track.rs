//! Command-line entry point: reads a JSON problem document, runs the
//! tracking solve, and prints the result.

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use serde::Deserialize;

use index_tracker::data::InputData;
use index_tracker::solver::SolverParams;
use index_tracker::{run, ExtraArguments, TrackResult};

/// Constrained index-tracking portfolio optimization
#[derive(Parser)]
#[command(
    name = "track",
    version,
    about = "Constrained index-tracking portfolio optimization"
)]
struct Cli {
    /// Input document with keys `data`, `solver_params`, `extra_arguments`
    #[arg(default_value = "input.json")]
    input: PathBuf,
}

/// Top-level layout of the input document.
#[derive(Deserialize)]
struct Document {
    data: InputData,
    #[serde(default)]
    solver_params: SolverParams,
    #[serde(default)]
    extra_arguments: ExtraArguments,
}

fn main() {
    let cli = Cli::parse();

    match execute(&cli.input) {
        Ok(rendered) => println!("{rendered}"),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

fn execute(path: &Path) -> Result<String, Box<dyn std::error::Error>> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read '{}': {}", path.display(), e))?;
    let doc: Document = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse '{}': {}", path.display(), e))?;

    let result = run(&doc.data, &doc.solver_params, &doc.extra_arguments)?;
    Ok(render(&result)?)
}

/// Render the result the way downstream consumers expect: JSON with double
/// quotes swapped for single quotes.
fn render(result: &TrackResult) -> serde_json::Result<String> {
    Ok(serde_json::to_string(result)?.replace('"', "'"))
}
