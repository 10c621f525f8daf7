//! # Solving Execution Module
//!
//! This module contains handling behavior for all `gpsolve solve` requests:
//! loading the arena named by the CLI, dispatching to the right solver
//! given `--generalized` and `--partial`, and printing the two winning
//! regions.
//!
//! #### Authorship
//!
//! - Max Fierro, 4/6/2023 (maxfierro@berkeley.edu)

use crate::arena::loader;
use crate::errors::BackwardRequiresSingleDimension;
use crate::interface::cli::{Algorithm, Output, SolveArgs};
use crate::solver::{self, Solution};
use colored::Colorize;
use std::error::Error;
use std::fs;

/// Loads the arena named by `args.target`, solves it according to
/// `args.algorithm`, `args.generalized`, and `args.partial`, and prints the
/// result according to `args.output`.
pub fn solve_by_path(args: &SolveArgs) -> Result<(), Box<dyn Error>> {
    let text = fs::read_to_string(&args.target)?;
    let arena = loader::load_str(&text)?;

    let solution = match args.algorithm.unwrap_or_default() {
        Algorithm::Backward => {
            if arena.dimension() > 1 {
                return Err(Box::new(BackwardRequiresSingleDimension {
                    dimension: arena.dimension(),
                }));
            }
            solver::backward::solve_backward(&arena)
        },
        Algorithm::Zielonka => {
            let generalized = args.generalized || arena.dimension() > 1;
            match (generalized, args.partial) {
                (false, None) => solver::solve_parity(&arena),
                (false, Some(variant)) => solver::solve_parity_with_partial(&arena, variant),
                (true, None) => solver::solve_generalized_parity(&arena),
                (true, Some(variant)) => {
                    solver::solve_generalized_parity_with_partial(&arena, variant)?
                },
            }
        },
    };

    print_solution(solution, args.output.unwrap_or_default());
    Ok(())
}

fn print_solution(solution: Solution, format: Output) {
    // `solve_parity`/`solve_generalized_parity` (and their partial-seeded
    // variants) already report vertex ids translated back to the external
    // labels the arena was loaded with, via `Arena::label` composed across
    // every `subgame` restriction the recursion performed internally. No
    // further translation happens here.
    let (w0, w1) = solution;
    let even: Vec<u32> = w0.into_iter().collect();
    let odd: Vec<u32> = w1.into_iter().collect();

    match format {
        Output::Formatted => {
            println!("{} {:?}", "Won by Even (player 0):".green().bold(), even);
            println!("{} {:?}", "Won by Odd (player 1):".red().bold(), odd);
        },
        Output::Json => {
            let content = serde_json::json!({
                "even": even,
                "odd": odd,
            });
            println!("{content}");
        },
    }
}
