//! Reproduce AFL crashes without AFL instrumentation
//!
//! Usage: cargo run --features oracle --bin repro_crash -- <crash_file>

use std::fs;

use lazyseg::fuzz::{initial_values, FuzzOp, Replay};

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <crash_file>", args[0]);
        std::process::exit(1);
    }
    let data = match fs::read(&args[1]) {
        Ok(data) => data,
        Err(err) => {
            eprintln!("Failed to read {}: {}", args[1], err);
            std::process::exit(1);
        }
    };

    eprintln!("Input: {} bytes", data.len());
    eprintln!("Hex: {}", data.iter().map(|b| format!("{:02x}", b)).collect::<Vec<_>>().join(" "));

    let Some((initial, mut remaining)) = initial_values(&data) else {
        eprintln!("Input too short for its header, nothing to replay");
        return;
    };
    eprintln!("Initial ({} elements): {:?}", initial.len(), initial);

    let mut replay = match Replay::new(&initial) {
        Ok(replay) => replay,
        Err(err) => {
            eprintln!("Build failed: {}", err);
            std::process::exit(1);
        }
    };

    while let Some((op, rest)) = FuzzOp::from_bytes(remaining) {
        remaining = rest;

        match op {
            FuzzOp::Query { left, right } => {
                eprintln!(
                    "Op {}: query {}..={}",
                    replay.steps() + 1,
                    replay.index(left),
                    replay.index(right)
                );
            }
            FuzzOp::RangeAdd { left, right, value } => {
                eprintln!(
                    "Op {}: add {} to {}..={}",
                    replay.steps() + 1,
                    value,
                    replay.index(left),
                    replay.index(right)
                );
            }
            FuzzOp::Assign { index, value } => {
                eprintln!(
                    "Op {}: set {} = {}",
                    replay.steps() + 1,
                    replay.index(index),
                    value
                );
            }
        }

        if let Err(divergence) = replay.step(op) {
            eprintln!("  DIVERGENCE: {}", divergence);
            eprintln!("  Model: {:?}", replay.values());
            std::process::exit(2);
        }
        eprintln!("  Model: {:?}", replay.values());
    }

    eprintln!("\n=== Final check ===");
    if let Err(divergence) = replay.verify() {
        eprintln!("  DIVERGENCE: {}", divergence);
        std::process::exit(2);
    }
    eprintln!("\nAll checks passed!");
}
