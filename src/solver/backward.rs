//! # Backward Module
//!
//! A dedicated antichain-based solver for single-dimension parity games,
//! phrased as a safety game over a bounded memory: one counter per odd
//! priority, reset to its maximum on every even priority at or above it
//! and decremented on every odd priority, with underflow on a decrement
//! signaling that player Odd has won. This is the classical
//! counter-abstraction reduction of parity to safety, computed backward
//! as a `CPre_0` / `CPre_1` fixpoint over an antichain of (vertex,
//! counter-vector) pairs.
//!
//! Grounded on
//! `examples/original_source/generalizedparity-master/backwardAlgorithm.py`
//! (`down`, `compute_max_counter`, `Cpre_0`, `Cpre_1`, `compute_fixpoint`,
//! `get_winning_regions`). The file's commented-out "player 2" duplicate
//! of this machinery is dead code in the original and has no counterpart
//! here.
//!
//! #### Authorship
//!
//! - Max Fierro, 11/2/2023 (maxfierro@berkeley.edu)

use crate::arena::{Arena, Player, Priority, VertexId, VertexSet};
use crate::solver::antichain::Antichain;
use crate::solver::model::Solution;

/// A memory element: the vertex, paired with one counter per distinct odd
/// priority occurring in the arena, indexed by `priority / 2`.
type Elem = (VertexId, Vec<u32>);

fn comparator(a: &Elem, b: &Elem) -> bool {
    a.0 == b.0 && a.1.iter().zip(&b.1).all(|(&x, &y)| x <= y)
}

fn intersector(a: &Elem, b: &Elem) -> Option<Elem> {
    if a.0 != b.0 {
        return None;
    }
    let counters = a.1.iter().zip(&b.1).map(|(&x, &y)| x.min(y)).collect();
    Some((a.0, counters))
}

fn new_antichain() -> Antichain<Elem> {
    Antichain::new(comparator, intersector)
}

/// The number of counters needed, and how high each resets: one slot per
/// odd priority `p`, at index `p / 2`, reset to the number of vertices
/// carrying that priority (matching the original's per-priority vertex
/// count, which bounds how many times a cycle through that priority can
/// recur before the play has looped).
fn compute_max_counter(g: &Arena) -> Vec<u32> {
    let maximum = g.vertices().map(|v| g.priority1(v)).max().unwrap_or(0);
    let max_odd = if maximum % 2 == 0 { maximum.saturating_sub(1) } else { maximum };
    let slots = (max_odd / 2 + 1) as usize;
    let mut max_counter = vec![0u32; slots];
    for v in g.vertices() {
        let p = g.priority1(v);
        if p % 2 == 1 {
            let idx = (p / 2) as usize;
            if idx < max_counter.len() {
                max_counter[idx] += 1;
            }
        }
    }
    max_counter
}

/// The largest memory that, after observing `priority` at `node`, would
/// be at most `element`'s memory. Even priorities reset every counter
/// below their own slot to the maximum (the higher-priority history
/// before it is now irrelevant); counters at or above the slot carry
/// over unchanged. Odd priorities decrement their own slot, or fail
/// (`None`) if it has already reached zero, signaling that Odd has
/// forced this priority to recur too often for Even to survive.
fn down(element: &Elem, priority: Priority, node: VertexId, max_counter: &[u32]) -> Option<Elem> {
    let idx = (priority / 2) as usize;
    let mut counters = element.1.clone();
    if priority % 2 == 0 {
        for (i, slot) in max_counter.iter().enumerate().take(idx.min(counters.len())) {
            counters[i] = *slot;
        }
    } else if idx < counters.len() {
        if counters[idx] == 0 {
            return None;
        }
        counters[idx] -= 1;
    }
    Some((node, counters))
}

fn cpre_0(ac: &Antichain<Elem>, g: &Arena, max_counter: &[u32]) -> Antichain<Elem> {
    let mut result = new_antichain();
    for element in ac.elements() {
        for &pred in g.predecessors(element.0) {
            if g.owner(pred) != Player::Even {
                continue;
            }
            if let Some(d) = down(element, g.priority1(pred), pred, max_counter) {
                result.insert(d);
            }
        }
    }
    result
}

fn cpre_1(ac: &Antichain<Elem>, g: &Arena, max_counter: &[u32]) -> Antichain<Elem> {
    let mut result = new_antichain();
    for node in g.vertices() {
        if g.owner(node) != Player::Odd {
            continue;
        }
        let mut current: Option<Antichain<Elem>> = None;
        for &succ in g.successors(node) {
            let mut per_succ = new_antichain();
            for element in ac.elements() {
                if element.0 == succ {
                    if let Some(d) = down(element, g.priority1(node), node, max_counter) {
                        per_succ.insert(d);
                    }
                }
            }
            current = Some(match current {
                None => per_succ,
                Some(acc) => acc.intersection(&per_succ),
            });
        }
        if let Some(acc) = current {
            result.union(&acc);
        }
    }
    result
}

fn compute_fixpoint(g: &Arena, max_counter: &[u32]) -> Antichain<Elem> {
    let mut start = new_antichain();
    for node in g.vertices() {
        start.insert((node, max_counter.to_vec()));
    }

    let c1 = cpre_1(&start, g, max_counter);
    let mut c0 = cpre_0(&start, g, max_counter);
    c0.union(&c1);
    let mut antichain1 = start.intersection(&c0);

    loop {
        let c1 = cpre_1(&antichain1, g, max_counter);
        let mut c0 = cpre_0(&antichain1, g, max_counter);
        c0.union(&c1);
        let antichain2 = antichain1.intersection(&c0);
        if antichain2.eq_as_sets(&antichain1) {
            return antichain1;
        }
        antichain1 = antichain2;
    }
}

/// Full solver over single-dimension arenas, via the backward
/// antichain-based safety reduction rather than recursive Zielonka. Uses
/// the exact per-priority counter bound from [`compute_max_counter`], which
/// is provably large enough that the safety fixpoint coincides with the
/// parity winning regions, so the player-1 region is simply the complement
/// of player 0's.
pub fn solve_backward(g: &Arena) -> Solution {
    if g.is_empty() {
        return (VertexSet::new(), VertexSet::new());
    }
    let max_counter = compute_max_counter(g);
    let fixpoint = compute_fixpoint(g, &max_counter);
    let w_even: VertexSet = fixpoint.elements().iter().map(|e| e.0).collect();
    let w_odd: VertexSet = g.vertices().filter(|v| !w_even.contains(v)).collect();
    (w_even, w_odd)
}

/// Runs [`compute_fixpoint`] with every counter capped at a single uniform
/// bound `m` (rather than [`compute_max_counter`]'s exact per-priority
/// values), returning the vertices that keep a safe counter vector.
fn winning_region_with_bound(g: &Arena, m: u32, slots: usize) -> VertexSet {
    let bound = vec![m; slots];
    compute_fixpoint(g, &bound).elements().iter().map(|e| e.0).collect()
}

/// Repeatedly solves the backward safety game for increasing uniform
/// counter bounds `M = 1, 2, 3, …`, extracting the partial winning regions
/// of both players at each step, until every vertex is classified or
/// `ceiling` is reached.
///
/// Player 0's region at bound `m` is `winning_region_with_bound(g, m, _)`.
/// Player 1's region is obtained the same way but on [`Arena::complement`]:
/// incrementing every priority by one flips which parity each player needs
/// infinitely often without touching move ownership, so player 0's region
/// in the complemented arena is exactly player 1's region in `g`. This
/// gives both directions a real fixpoint rather than leaving one
/// unimplemented.
pub fn solve_backward_incremental(g: &Arena, ceiling: u32) -> Solution {
    if g.is_empty() {
        return (VertexSet::new(), VertexSet::new());
    }
    let complement = g.complement();
    let slots = compute_max_counter(g).len();
    let slots_complement = compute_max_counter(&complement).len();

    let mut w0 = VertexSet::new();
    let mut w1 = VertexSet::new();
    let mut m = 1;
    loop {
        w0 = winning_region_with_bound(g, m, slots);
        w1 = winning_region_with_bound(&complement, m, slots_complement);
        if w0.len() + w1.len() >= g.len() || m >= ceiling {
            break;
        }
        m += 1;
    }
    (w0, w1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::test::fatal_attractors_paper_example;

    #[test]
    fn solve_backward_partitions_every_vertex() {
        let g = fatal_attractors_paper_example();
        let (w0, w1) = solve_backward(&g);
        assert_eq!(w0.len() + w1.len(), g.len());
        assert!(w0.is_disjoint(&w1));
    }

    #[test]
    fn solve_backward_matches_the_documented_result_on_the_paper_example() {
        let g = fatal_attractors_paper_example();
        let (w0, w1) = solve_backward(&g);
        assert_eq!(w0, g.all_vertices());
        assert!(w1.is_empty());
    }

    #[test]
    fn solve_backward_incremental_reaches_the_same_result_once_the_ceiling_is_high_enough() {
        let g = fatal_attractors_paper_example();
        let (w0, w1) = solve_backward_incremental(&g, 20);
        assert_eq!(w0, g.all_vertices());
        assert!(w1.is_empty());
    }

    #[test]
    fn solve_backward_incremental_stops_early_at_a_low_ceiling() {
        let g = fatal_attractors_paper_example();
        let (w0, w1) = solve_backward_incremental(&g, 1);
        assert!(w0.len() <= g.len());
        assert!(w1.len() <= g.len());
    }

    #[test]
    fn compute_max_counter_sizes_one_slot_per_odd_priority() {
        let g = fatal_attractors_paper_example();
        let max_counter = compute_max_counter(&g);
        assert!(!max_counter.is_empty());
        assert!(max_counter.iter().all(|&c| c <= g.len() as u32));
    }

    #[test]
    fn down_fails_once_an_odd_counter_is_exhausted() {
        let element: Elem = (0, vec![0, 0]);
        assert!(down(&element, 3, 0, &[2, 2]).is_none());
    }
}
