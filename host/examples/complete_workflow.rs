//! Parses a file, reports per-segment-type counts, binding diagnostics, and throughput.
//!
//! Run with:
//! cargo run --example complete_workflow -- path/to/file.x12

use std::collections::HashMap;
use std::env;
use std::process;
use std::time::Instant;

use x12_document::guides::x222a2;
use x12_host::{parse_file, HostConfig};

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <file.x12>", args[0]);
        process::exit(1);
    }
    let path = &args[1];

    println!("Parsing X12 file: {path}\n");

    let registry = x222a2::rule_registry();
    let schemas = x222a2::schema_registry();

    let start = Instant::now();
    let outcome = match parse_file(path, &registry, &schemas, HostConfig::default()) {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };
    let duration = start.elapsed();

    let mut segment_counts: HashMap<&str, usize> = HashMap::new();
    let mut total_segments = 0usize;
    for segment in &outcome.tree.header {
        *segment_counts.entry(segment.name.as_str()).or_insert(0) += 1;
        total_segments += 1;
    }
    for loop_id in outcome.tree.walk_preorder() {
        for segment in &outcome.tree.node(loop_id).segments {
            *segment_counts.entry(segment.name.as_str()).or_insert(0) += 1;
            total_segments += 1;
        }
    }
    for segment in &outcome.tree.footer {
        *segment_counts.entry(segment.name.as_str()).or_insert(0) += 1;
        total_segments += 1;
    }

    println!("=== Segment Statistics ===\n");
    let mut segments: Vec<_> = segment_counts.into_iter().collect();
    segments.sort_by_key(|(id, _)| *id);
    for (id, count) in &segments {
        println!("  {id}: {count}");
    }

    let report = x12_validation::summarize(&outcome.diagnostics);
    println!("\n=== Parsing Complete ===\n");
    println!("  Total segments:  {total_segments}");
    println!("  Top-level loops: {}", outcome.tree.top_level.len());
    println!(
        "  Diagnostics:     {} ({} warning, {} error)",
        report.total(),
        report.warning,
        report.error
    );
    println!("  Time:            {:.4}s", duration.as_secs_f64());
}
