//! # Solver Module
//!
//! The public solving surface: full solvers for both single-dimension and
//! generalized parity games, and partial-solver-seeded variants of each,
//! dispatching by [`PartialVariant`] name. Everything below this module is
//! an internal algorithm; this is the boundary the CLI calls through.
//!
//! #### Authorship
//!
//! - Max Fierro, 4/6/2023 (maxfierro@berkeley.edu)

pub mod antichain;
pub mod attractor;
pub mod backward;
pub mod buchi;
pub mod model;
pub mod monotone;
pub mod psol;
pub mod psol_b;
pub mod psol_c;
pub mod psol_q;
pub mod zielonka;

use crate::arena::{Arena, VertexSet};
use crate::errors::NoGeneralizedVariant;
pub use model::{PartialVariant, Solution};

/// The single-dimension implementation backing each [`PartialVariant`].
/// Every variant has one of these; not every variant has a generalized
/// counterpart (see [`generalized_partial_fn`]).
fn partial_fn(variant: PartialVariant) -> fn(&Arena) -> Solution {
    match variant {
        PartialVariant::Psol => psol::psol,
        PartialVariant::PsolB => psol_b::psol_b,
        PartialVariant::PsolBBuchiCobuchi => psol_b::psol_b_buchi_cobuchi,
        PartialVariant::PsolBBuchiSafety => psol_b::psol_b_buchi_safety,
        PartialVariant::PsolQ => psol_q::psol_q,
        PartialVariant::PsolC => psol_c::psol_c,
    }
}

/// The generalized (multi-dimension) implementation backing a
/// [`PartialVariant`], when one exists.
fn generalized_partial_fn(variant: PartialVariant) -> Option<fn(&Arena) -> Solution> {
    match variant {
        PartialVariant::PsolB => Some(psol_b::psol_b_generalized),
        PartialVariant::PsolQ => Some(psol_q::psol_q_generalized),
        PartialVariant::PsolC => Some(psol_c::psol_c_generalized),
        PartialVariant::Psol
        | PartialVariant::PsolBBuchiCobuchi
        | PartialVariant::PsolBBuchiSafety => None,
    }
}

/// Solves a single-dimension parity game outright, via plain recursive
/// Zielonka.
pub fn solve_parity(g: &Arena) -> Solution {
    zielonka::solve(g)
}

/// Solves a single-dimension parity game, seeded at every recursion level
/// by one pass of the named partial solver.
pub fn solve_parity_with_partial(g: &Arena, variant: PartialVariant) -> Solution {
    zielonka::zielonka_with_partial(g, partial_fn(variant))
}

/// Solves a generalized (multi-dimension) parity game outright, via
/// `disj_parity_win` over the complemented arena.
pub fn solve_generalized_parity(g: &Arena) -> Solution {
    zielonka::solve_generalized(g)
}

/// Solves a generalized parity game, first running one pass of the named
/// partial solver's generalized counterpart over the whole arena, then
/// falling back to [`solve_generalized_parity`] on whatever it left
/// undecided.
///
/// Unlike [`solve_parity_with_partial`], this does not re-apply the
/// partial solver at every level of the recursion: the generalized
/// partial solvers already internally loop to their own fixpoint (see
/// `psol_b_generalized`, `psol_q_generalized`, `psol_c_generalized`), so a
/// single top-level pass followed by an exact solve on the residual is
/// sound and avoids re-deriving that fixpoint loop at the dispatch layer.
/// See DESIGN.md.
pub fn solve_generalized_parity_with_partial(
    g: &Arena,
    variant: PartialVariant,
) -> Result<Solution, NoGeneralizedVariant> {
    let partial = generalized_partial_fn(variant).ok_or_else(|| NoGeneralizedVariant {
        requested: variant.name().to_string(),
    })?;

    if g.is_empty() {
        return Ok((VertexSet::new(), VertexSet::new()));
    }

    let (p0, p1) = partial(g);
    let decided: VertexSet = p0.union(&p1).copied().collect();
    let rest_local: VertexSet = g.vertices().filter(|v| !decided.contains(&g.label(*v))).collect();

    if rest_local.is_empty() {
        return Ok((p0, p1));
    }

    let rest = g.subgame(&rest_local);
    let (r0, r1) = solve_generalized_parity(&rest);

    let mut w0 = p0;
    let mut w1 = p1;
    w0.extend(r0.iter().map(|&u| rest.label(u)));
    w1.extend(r1.iter().map(|&u| rest.label(u)));
    Ok((w0, w1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::test::fatal_attractors_paper_example;

    #[test]
    fn solve_parity_partitions_every_vertex() {
        let g = fatal_attractors_paper_example();
        let (w0, w1) = solve_parity(&g);
        assert_eq!(w0.len() + w1.len(), g.len());
        assert!(w0.is_disjoint(&w1));
    }

    #[test]
    fn solve_parity_with_partial_partitions_every_vertex() {
        let g = fatal_attractors_paper_example();
        let (w0, w1) = solve_parity_with_partial(&g, PartialVariant::PsolB);
        assert_eq!(w0.len() + w1.len(), g.len());
        assert!(w0.is_disjoint(&w1));
    }

    #[test]
    fn solve_parity_with_partial_agrees_with_full_zielonka_for_every_variant() {
        let g = fatal_attractors_paper_example();
        let (w0, w1) = solve_parity(&g);
        for variant in PartialVariant::all() {
            let (p0, p1) = solve_parity_with_partial(&g, *variant);
            assert_eq!(p0, w0, "{variant:?} disagreed on W0");
            assert_eq!(p1, w1, "{variant:?} disagreed on W1");
        }
    }

    #[test]
    fn solve_generalized_parity_with_partial_rejects_variants_without_one() {
        let g = fatal_attractors_paper_example();
        let err = solve_generalized_parity_with_partial(&g, PartialVariant::Psol);
        assert!(err.is_err());
    }

    #[test]
    fn solve_generalized_parity_with_partial_partitions_every_vertex() {
        let g = fatal_attractors_paper_example();
        let (w0, w1) = solve_generalized_parity_with_partial(&g, PartialVariant::PsolB).unwrap();
        assert_eq!(w0.len() + w1.len(), g.len());
        assert!(w0.is_disjoint(&w1));
    }

    #[test]
    fn solve_generalized_parity_with_partial_agrees_with_full_solver_for_every_generalized_variant()
    {
        let g = fatal_attractors_paper_example();
        let (w0, w1) = solve_generalized_parity(&g);
        for variant in [PartialVariant::PsolB, PartialVariant::PsolQ, PartialVariant::PsolC] {
            let (p0, p1) = solve_generalized_parity_with_partial(&g, variant).unwrap();
            assert_eq!(p0, w0, "{variant:?} disagreed on W0");
            assert_eq!(p1, w1, "{variant:?} disagreed on W1");
        }
    }
}
