//! # stepreport CLI
//!
//! Usage:
//!   stepreport job.json
//!   cat job.json | stepreport
//!
//! Writes `report.pdf` to the working directory.

use std::env;
use std::fs;
use std::io::{self, Read};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    // Read input
    let input = if args.len() > 1 {
        fs::read_to_string(&args[1]).map_err(|e| format!("Failed to read {}: {}", args[1], e))
    } else {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map(|_| buf)
            .map_err(|e| format!("Failed to read stdin: {}", e))
    };
    let input = match input {
        Ok(input) => input,
        Err(e) => {
            eprintln!("✗ {}", e);
            std::process::exit(1);
        }
    };

    match stepreport::build_report_json(&input) {
        Ok(pdf_bytes) => {
            if let Err(e) = fs::write(stepreport::OUTPUT_PATH, &pdf_bytes) {
                eprintln!("✗ Failed to write {}: {}", stepreport::OUTPUT_PATH, e);
                std::process::exit(1);
            }
            eprintln!(
                "✓ Written {} bytes to {}",
                pdf_bytes.len(),
                stepreport::OUTPUT_PATH
            );
        }
        Err(e) => {
            eprintln!("✗ Failed to build report: {}", e);
            std::process::exit(1);
        }
    }
}
