//! # Command Line Module
//!
//! This module offers UNIX-like CLI tooling in order to facilitate scripting
//! and ergonomic use of `gpsolve`. This uses the
//! [clap](https://docs.rs/clap/latest/clap/) crate to provide standard
//! behavior, which is outlined in [this](https://clig.dev/) great guide.
//!
//! #### Authorship
//!
//! - Max Fierro, 4/6/2023 (maxfierro@berkeley.edu)

use crate::errors::NotFoundError;
use crate::solver::PartialVariant;
use clap::{Args, Parser, Subcommand, ValueEnum};

/* COMMAND LINE INTERFACE */

/// `gpsolve` is a solver for generalized parity games on finite directed
/// graphs: two-player, zero-sum, infinite-duration games in which a
/// vertex's priority vector determines the winner of a play by the parity
/// of the maximum value seen infinitely often, under each of its
/// independent priority functions.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /* REQUIRED COMMANDS */
    /// Available subcommands for the main 'gpsolve' command.
    #[command(subcommand)]
    pub command: Commands,

    /* DEFAULTS PROVIDED */
    /// Send no output to STDOUT during execution.
    #[arg(short, long, group = "out")]
    pub quiet: bool,
}

/// Subcommand choices, specified as `gpsolve <subcommand>`.
#[derive(Subcommand)]
pub enum Commands {
    /// Solve an arena and print its two winning regions.
    Solve(SolveArgs),
    /// Print statistics about an arena without solving it.
    Info(InfoArgs),
    /// List the partial-solver variants accepted by `--partial`.
    ListPartials(ListPartialsArgs),
}

/* ARGUMENT AND OPTION DEFINITIONS */

/// Specifies the way in which an arena is solved. Default behavior:
/// * Uses the classical recursive Zielonka algorithm (no partial-solver
/// pre-pass, see `partial` argument).
/// * Treats the arena as single-dimension unless `generalized` is given or
/// the arena file itself declares more than one priority per vertex.
/// * Formats output aesthetically (see `output` argument).
#[derive(Args)]
pub struct SolveArgs {
    /* REQUIRED ARGUMENTS */
    /// Path to an arena text file.
    pub target: String,

    /* DEFAULTS PROVIDED */
    /// Force generalized (multi-dimension) solving even if the arena
    /// declares only one priority function.
    #[arg(short, long)]
    pub generalized: bool,
    /// Seed the solve with a partial-solver pre-pass of this variant.
    #[arg(short, long, value_parser = parse_partial_variant)]
    pub partial: Option<PartialVariant>,
    /// Choose the solving algorithm. `backward` only accepts
    /// single-dimension arenas.
    #[arg(short, long)]
    pub algorithm: Option<Algorithm>,
    /// Set output in a specific format.
    #[arg(short, long)]
    pub output: Option<Output>,
}

/// Looks up `s` among [`PartialVariant::all`] by its CLI name, returning a
/// [`NotFoundError`] with a "did you mean" suggestion on a miss, rather
/// than leaning on clap's generic possible-values rejection.
fn parse_partial_variant(s: &str) -> Result<PartialVariant, NotFoundError> {
    PartialVariant::all().iter().find(|v| v.name() == s).copied().ok_or_else(|| {
        NotFoundError::PartialVariant {
            requested: s.to_string(),
            available: PartialVariant::all().iter().map(|v| v.name().to_string()).collect(),
        }
    })
}

/// The solving strategy `gpsolve solve` uses.
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum Algorithm {
    /// Classical (generalized) Zielonka recursion. Default.
    Zielonka,
    /// Antichain-based backward safety-game reduction. Single-dimension
    /// arenas only.
    Backward,
}

impl Default for Algorithm {
    fn default() -> Self {
        Algorithm::Zielonka
    }
}

/// Prints arena statistics (vertex count, owner counts, dimension,
/// per-dimension maximum priority) without running any solver.
#[derive(Args)]
pub struct InfoArgs {
    /// Path to an arena text file.
    pub target: String,
}

/// Lists every partial-solver variant name accepted by `--partial`,
/// noting which have a generalized (multi-dimension) counterpart.
#[derive(Args)]
pub struct ListPartialsArgs {
    /// Set output in a specific format.
    #[arg(short, long)]
    pub output: Option<Output>,
}

/* DEFINITIONS */

/// Allows calls to return output in different formats for different
/// purposes, such as scripting or simple human-readable output.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum Output {
    /// Readable and helpful format.
    Formatted,
    /// JSON format.
    Json,
}

impl Default for Output {
    fn default() -> Self {
        Output::Formatted
    }
}
