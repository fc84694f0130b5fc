//! Parses an X12 837P file from disk and prints a binding summary.
//!
//! # Usage
//!
//! x12-parse <file.x12>

use std::env;
use std::process;

use log::info;

use x12_document::guides::x222a2;
use x12_host::{parse_file, HostConfig};

fn main() {
    env_logger::init();

    let path = match env::args().nth(1) {
        Some(path) => path,
        None => {
            eprintln!("usage: x12-parse <file.x12>");
            process::exit(2);
        }
    };

    let registry = x222a2::rule_registry();
    let schemas = x222a2::schema_registry();

    let outcome = match parse_file(&path, &registry, &schemas, HostConfig::default()) {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };

    let report = x12_validation::summarize(&outcome.diagnostics);
    info!(
        "{}: {} top-level loop(s), {} diagnostic(s) ({} warning, {} error)",
        path,
        outcome.tree.top_level.len(),
        report.total(),
        report.warning,
        report.error
    );

    println!("top-level loops: {}", outcome.tree.top_level.len());
    println!(
        "diagnostics: {} ({} warning, {} error)",
        report.total(),
        report.warning,
        report.error
    );

    if !report.is_clean() {
        process::exit(1);
    }
}
