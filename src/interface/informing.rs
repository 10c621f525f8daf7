//! # Informational Execution Module
//!
//! This module contains handling behavior for `gpsolve info` and
//! `gpsolve list-partials` requests.
//!
//! #### Authorship
//!
//! - Max Fierro, 4/6/2023 (maxfierro@berkeley.edu)

use crate::arena::loader;
use crate::arena::{Arena, Player};
use crate::interface::cli::{InfoArgs, ListPartialsArgs, Output};
use crate::solver::PartialVariant;
use colored::Colorize;
use std::error::Error;
use std::fs;

/// Loads the arena named by `args.target` and prints its statistics
/// without running any solver.
pub fn print_arena_info(args: &InfoArgs) -> Result<(), Box<dyn Error>> {
    let text = fs::read_to_string(&args.target)?;
    let arena = loader::load_str(&text)?;
    print_info(&arena);
    Ok(())
}

fn print_info(arena: &Arena) {
    let even_count = arena.vertices().filter(|&v| arena.owner(v) == Player::Even).count();
    let odd_count = arena.len() - even_count;
    let max_priorities: Vec<u32> = (0..arena.dimension()).map(|f| arena.max_priority(f)).collect();

    println!("{} {}", "Vertices:".bold(), arena.len());
    println!("{} {} Even / {} Odd", "Owners:".bold(), even_count, odd_count);
    println!("{} {}", "Dimension:".bold(), arena.dimension());
    println!("{} {:?}", "Max priority per dimension:".bold(), max_priorities);
}

/// Lists every [`PartialVariant`] name, noting which have a generalized
/// (multi-dimension) counterpart.
pub fn list_partials(args: &ListPartialsArgs) {
    const GENERALIZED: [PartialVariant; 3] =
        [PartialVariant::PsolB, PartialVariant::PsolQ, PartialVariant::PsolC];

    match args.output.unwrap_or_default() {
        Output::Formatted => {
            for variant in PartialVariant::all() {
                let marker = if GENERALIZED.contains(variant) { " (generalized)" } else { "" };
                println!("{}{}", variant.name(), marker);
            }
        },
        Output::Json => {
            let names: Vec<&str> = PartialVariant::all().iter().map(|v| v.name()).collect();
            let generalized: Vec<&str> = GENERALIZED.iter().map(|v| v.name()).collect();
            let content = serde_json::json!({
                "variants": names,
                "generalized": generalized,
            });
            println!("{content}");
        },
    }
}
