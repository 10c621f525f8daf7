//! # Psol Module
//!
//! The simplest partial solver: scan vertices in ascending priority order,
//! test each one's singleton monotone attractor for fatality, and if one
//! is found, attract it fully and recurse on what remains.
//!
//! Grounded on
//! `examples/original_source/generalizedparity-master/fatalattractors/psol.py`.
//!
//! #### Authorship
//!
//! - Max Fierro, 4/9/2023 (maxfierro@berkeley.edu)

use crate::arena::{Arena, Player, VertexSet};
use crate::solver::attractor::attractor;
use crate::solver::model::Solution;
use crate::solver::monotone::is_fatal_node;

/// Partial solver `psol`: finds fatal attractors seeded at a single
/// vertex, lowest priority first. Returns the union of everything decided
/// this way; any remainder (vertices on which no fatal attractor was ever
/// found) is left unclaimed in either winning region — callers fall back
/// to a full solver for whatever is left over.
pub fn psol(g: &Arena) -> Solution {
    let mut w_even = VertexSet::new();
    let mut w_odd = VertexSet::new();
    let mut current = g.clone();

    loop {
        let mut order: Vec<_> = current.vertices().collect();
        order.sort_by_key(|&v| current.priority1(v));

        let mut found = None;
        for v in order {
            if let Some(ma) = is_fatal_node(&current, v) {
                found = Some((v, ma));
                break;
            }
        }

        let Some((v, ma)) = found else {
            break;
        };

        let priority = current.priority1(v);
        let (att, complement) = attractor(&current, &ma, Player::of_priority(priority));
        let labels: VertexSet = att.iter().map(|&u| current.label(u)).collect();
        match Player::of_priority(priority) {
            Player::Even => w_even.extend(labels),
            Player::Odd => w_odd.extend(labels),
        }

        if complement.is_empty() {
            break;
        }
        current = current.subgame(&complement);
    }

    (w_even, w_odd)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::test::fatal_attractors_paper_example;

    #[test]
    fn psol_decides_the_vertices_it_claims_consistently() {
        let g = fatal_attractors_paper_example();
        let (w0, w1) = psol(&g);
        assert!(w0.is_disjoint(&w1));
        assert!(w0.len() + w1.len() <= g.len());
    }

    #[test]
    fn psol_matches_the_documented_partial_result_on_the_paper_example() {
        let g = fatal_attractors_paper_example();
        let (w0, w1) = psol(&g);
        assert_eq!(w0, VertexSet::from([0, 1, 2, 4, 6, 8, 9, 10, 11]));
        assert!(w1.is_empty());
        let residual: VertexSet =
            g.vertices().filter(|v| !w0.contains(v) && !w1.contains(v)).collect();
        assert_eq!(residual, VertexSet::from([3, 5, 7]));
    }
}
