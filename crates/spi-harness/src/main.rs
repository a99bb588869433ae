//! Headless scripted harness runner.
//!
//! Reads a JSON transaction script, drives a freshly reset peripheral
//! through it, and prints a JSON report of the observable outcome.
//!
//! ```json
//! {
//!   "sclk_half_period_ticks": 50,
//!   "transactions": [
//!     { "op": "write", "address": 0, "data": 1 },
//!     { "op": "write", "address": 2, "data": 1 },
//!     { "op": "write", "address": 4, "data": 128 }
//!   ]
//! }
//! ```

use std::fs;
use std::process::ExitCode;

use spi_harness::{Script, run_script};

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    let Some(path) = args.get(1) else {
        eprintln!("Usage: spi-harness <script.json>");
        eprintln!("       Runs the scripted transactions and prints a JSON report");
        return ExitCode::FAILURE;
    };

    match run(path) {
        Ok(report_json) => {
            println!("{report_json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("spi-harness: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(path: &str) -> Result<String, Box<dyn std::error::Error>> {
    let text = fs::read_to_string(path)?;
    let script: Script = serde_json::from_str(&text)?;
    let report = run_script(&script);
    Ok(serde_json::to_string_pretty(&report)?)
}
