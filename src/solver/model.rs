//! # Solver Model Module
//!
//! Shared types for the solving engine: the winning-region pair every
//! solver returns, and the enumeration of partial-solver variants exposed
//! through the public surface and the CLI.
//!
//! #### Authorship
//!
//! - Max Fierro, 4/6/2023 (maxfierro@berkeley.edu)

use crate::arena::VertexSet;

/// The two winning regions a solve produces: `.0` is won by `Even`
/// (player 0), `.1` is won by `Odd` (player 1). Every vertex of the arena
/// the solve was run on appears in exactly one of the two.
pub type Solution = (VertexSet, VertexSet);

/// A partial-solver variant, selectable through `solve_parity_with_partial`
/// / `solve_generalized_parity_with_partial` and the CLI's `--partial`
/// flag. Single-dimension arenas accept every variant; only `PsolB`,
/// `PsolQ`, and `PsolC` have generalized (multi-dimension) counterparts,
/// used automatically when the arena's `dimension() > 1`. Parsed from the
/// command line by name (see `interface::cli::parse_partial_variant`)
/// rather than via `clap::ValueEnum`, so an unrecognized name can carry a
/// `NotFoundError` "did you mean" suggestion instead of clap's generic
/// possible-values rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartialVariant {
    /// Fatal attractors seeded at a single vertex.
    Psol,
    /// Fatal attractors seeded at a full color class.
    PsolB,
    /// `PsolB`'s fixpoint re-expressed as Büchi ∩ co-Büchi.
    PsolBBuchiCobuchi,
    /// `PsolB`'s fixpoint re-expressed as Büchi ∩ safety.
    PsolBBuchiSafety,
    /// Layered fatal attractors, descending one priority at a time.
    PsolQ,
    /// Vertex-priority-pair fixpoint (single-dimension case; antichain-based
    /// for the generalized one).
    PsolC,
}

impl PartialVariant {
    /// Every variant name, for CLI listing and "did you mean" suggestions.
    pub fn all() -> &'static [PartialVariant] {
        use PartialVariant::*;
        &[Psol, PsolB, PsolBBuchiCobuchi, PsolBBuchiSafety, PsolQ, PsolC]
    }

    /// The name as it appears on the command line (kebab-case).
    pub fn name(self) -> &'static str {
        match self {
            PartialVariant::Psol => "psol",
            PartialVariant::PsolB => "psol-b",
            PartialVariant::PsolBBuchiCobuchi => "psol-b-buchi-cobuchi",
            PartialVariant::PsolBBuchiSafety => "psol-b-buchi-safety",
            PartialVariant::PsolQ => "psol-q",
            PartialVariant::PsolC => "psol-c",
        }
    }
}
