//! # Execution Module
//!
//! The module which aggregates `arena`, `solver`, and `interface` into an
//! entry point for the whole project.
//!
//! #### Authorship
//!
//! - Max Fierro, 4/6/2023 (maxfierro@berkeley.edu)

use clap::Parser;
use std::process;

use crate::interface::cli::{Cli, Commands};

/* MODULES */

mod arena;
mod errors;
mod interface;
mod solver;
mod utils;

/* PROGRAM ENTRY */

fn main() {
    let cli = Cli::parse();
    let ret = match &cli.command {
        Commands::Solve(args) => interface::solving::solve_by_path(args),
        Commands::Info(args) => interface::informing::print_arena_info(args),
        Commands::ListPartials(args) => {
            interface::informing::list_partials(args);
            Ok(())
        },
    };
    if let Err(e) = ret {
        if !cli.quiet {
            eprintln!("{e}");
        }
        process::exit(exitcode::DATAERR)
    }
    process::exit(exitcode::OK)
}
