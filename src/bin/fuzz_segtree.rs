//! AFL fuzz harness for the lazy segment tree
//!
//! Each input describes an initial sequence followed by a script of range
//! queries, range adds and point overwrites. The script runs against sum,
//! min and max trees and a brute-force model in lockstep:
//! 1. Every query and every rejected call must match the model
//! 2. Whole-sequence totals must match after every operation
//! 3. Every element must match once the script is done

use afl::fuzz;
use lazyseg::fuzz::{initial_values, FuzzOp, Replay};

fn main() {
    fuzz!(|data: &[u8]| {
        let Some((initial, mut remaining)) = initial_values(data) else {
            return;
        };
        let Ok(mut replay) = Replay::new(&initial) else {
            return;
        };

        while let Some((op, rest)) = FuzzOp::from_bytes(remaining) {
            remaining = rest;
            if let Err(divergence) = replay.step(op) {
                panic!("Divergence! {}", divergence);
            }
        }

        if let Err(divergence) = replay.verify() {
            panic!("Final divergence! {}", divergence);
        }
    });
}
