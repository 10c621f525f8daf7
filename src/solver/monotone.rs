//! # Monotone Attractor Module
//!
//! The fatal-attractor primitive shared by `psol` (single seed vertex) and
//! `psolB` (whole color class as seed): an attractor computation that never
//! crosses a priority higher than the one it started from, so that if the
//! seed folds back into its own attractor, every cycle reachable from it is
//! won outright by the seed's player.
//!
//! The two forms differ in one subtle but load-bearing way: the single-
//! vertex form does *not* pre-seed its own node into the winning region,
//! so fatality means the node was rediscovered by the fixpoint through a
//! cycle back to itself; the target-set form pre-seeds the whole color
//! class, so fatality means the fixpoint never had to drop anyone from it.
//! Conflating the two would make every singleton trivially "fatal".
//!
//! Grounded on
//! `examples/original_source/generalizedparity-master/fatalattractors/psol.py`
//! (`monotone_attractor`, single-node form) and
//! `examples/original_source/generalizedparity-master/fatalattractors/psolB.py`
//! (`monotone_attractor`, target-set form).
//!
//! #### Authorship
//!
//! - Max Fierro, 4/9/2023 (maxfierro@berkeley.edu)

use crate::arena::{Arena, Player, Priority, VertexId, VertexSet};
use std::collections::VecDeque;

fn out_degrees(g: &Arena) -> Vec<usize> {
    g.vertices().map(|v| g.successors(v).len()).collect()
}

/// Computes the monotone attractor of the single vertex `node`, bounded
/// above by `node`'s own priority. `node` is only a member of the returned
/// set if the fixpoint found a way back to it; callers test fatality with
/// `attractor.contains(&node)`.
pub fn monotone_attractor_node(g: &Arena, node: VertexId) -> (VertexSet, VertexSet) {
    let color = g.priority1(node);
    let j = Player::of_priority(color);
    let opponent = j.opponent();
    let mut out = out_degrees(g);
    let mut regions: Vec<Option<Player>> = vec![None; g.len()];
    let mut queue: VecDeque<VertexId> = VecDeque::new();
    let mut w: VertexSet = VertexSet::new();

    queue.push_back(node);

    while let Some(s) = queue.pop_front() {
        for &p in g.predecessors(s) {
            if regions[p as usize].is_some() {
                continue;
            }
            let owner = g.owner(p);
            let priority = g.priority1(p);
            if priority > color {
                continue;
            }
            if owner == j {
                regions[p as usize] = Some(j);
                w.insert(p);
                if p != node {
                    queue.push_back(p);
                }
            } else {
                debug_assert_eq!(owner, opponent);
                out[p as usize] -= 1;
                if out[p as usize] == 0 {
                    regions[p as usize] = Some(j);
                    w.insert(p);
                    if p != node {
                        queue.push_back(p);
                    }
                }
            }
        }
    }

    let complement: VertexSet =
        g.vertices().filter(|v| !w.contains(v)).collect();
    (w, complement)
}

/// Whether the singleton `{node}` is a fatal attractor: `node` folds back
/// into its own monotone attractor. Returns the attractor when it does.
pub fn is_fatal_node(g: &Arena, node: VertexId) -> Option<VertexSet> {
    let (ma, _) = monotone_attractor_node(g, node);
    if ma.contains(&node) {
        Some(ma)
    } else {
        None
    }
}

/// Computes the monotone attractor of `target`, bounded above by `color`,
/// with `target` pre-seeded into the winning region. Fatality of `target`
/// under `color` means `target.is_subset(&attractor)`.
pub fn monotone_attractor_set(
    g: &Arena,
    target: &VertexSet,
    color: Priority,
) -> (VertexSet, VertexSet) {
    let j = Player::of_priority(color);
    let opponent = j.opponent();
    let mut out = out_degrees(g);
    let mut regions: Vec<Option<Player>> = vec![None; g.len()];
    let mut queue: VecDeque<VertexId> = VecDeque::new();
    let mut w: VertexSet = VertexSet::new();

    for &node in target {
        regions[node as usize] = Some(j);
        w.insert(node);
        queue.push_back(node);
    }

    while let Some(s) = queue.pop_front() {
        for &p in g.predecessors(s) {
            if regions[p as usize].is_some() {
                continue;
            }
            let owner = g.owner(p);
            let priority = g.priority1(p);
            if priority > color {
                continue;
            }
            if owner == j {
                regions[p as usize] = Some(j);
                w.insert(p);
                if !target.contains(&p) {
                    queue.push_back(p);
                }
            } else {
                debug_assert_eq!(owner, opponent);
                out[p as usize] -= 1;
                if out[p as usize] == 0 {
                    regions[p as usize] = Some(j);
                    w.insert(p);
                    if !target.contains(&p) {
                        queue.push_back(p);
                    }
                }
            }
        }
    }

    let complement: VertexSet =
        g.vertices().filter(|v| !w.contains(v)).collect();
    (w, complement)
}

/// Whether `target` is a fatal attractor under `color`: every vertex in
/// `target` survives in its own monotone attractor. Returns the attractor
/// when it does.
pub fn is_fatal_set(g: &Arena, target: &VertexSet, color: Priority) -> Option<VertexSet> {
    let (ma, _) = monotone_attractor_set(g, target, color);
    if target.is_subset(&ma) {
        Some(ma)
    } else {
        None
    }
}

/// Like [`monotone_attractor_set`], but bounded under priority function
/// `func` rather than the single-dimension default. Grounded on
/// `psolB_generalized.py`'s `monotone_attractor`.
pub fn monotone_attractor_set_func(
    g: &Arena,
    target: &VertexSet,
    color: Priority,
    func: usize,
) -> (VertexSet, VertexSet) {
    let j = Player::of_priority(color);
    let opponent = j.opponent();
    let mut out = out_degrees(g);
    let mut regions: Vec<Option<Player>> = vec![None; g.len()];
    let mut queue: VecDeque<VertexId> = VecDeque::new();
    let mut w: VertexSet = VertexSet::new();

    for &node in target {
        regions[node as usize] = Some(j);
        w.insert(node);
        queue.push_back(node);
    }

    while let Some(s) = queue.pop_front() {
        for &p in g.predecessors(s) {
            if regions[p as usize].is_some() {
                continue;
            }
            let owner = g.owner(p);
            let priority = g.priority_of(p, func);
            if priority > color {
                continue;
            }
            if owner == j {
                regions[p as usize] = Some(j);
                w.insert(p);
                if !target.contains(&p) {
                    queue.push_back(p);
                }
            } else {
                debug_assert_eq!(owner, opponent);
                out[p as usize] -= 1;
                if out[p as usize] == 0 {
                    regions[p as usize] = Some(j);
                    w.insert(p);
                    if !target.contains(&p) {
                        queue.push_back(p);
                    }
                }
            }
        }
    }

    let complement: VertexSet = g.vertices().filter(|v| !w.contains(v)).collect();
    (w, complement)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::test::fatal_attractors_paper_example;

    /// Vertex 5's predecessors (4, priority 6; 6, priority 8) both exceed
    /// color 1, so the monotone attractor of {5} alone is just {5} and
    /// never folds back onto itself: not fatal in isolation.
    #[test]
    fn isolated_seed_with_no_low_priority_predecessors_is_not_fatal() {
        let g = fatal_attractors_paper_example();
        assert!(is_fatal_node(&g, 5).is_none());
    }

    /// Vertex 3 (priority 1, Odd) has sole predecessor 2 (priority 4,
    /// Even), above color 1, so {3} is not fatal either.
    #[test]
    fn non_cyclic_seed_is_not_fatal() {
        let g = fatal_attractors_paper_example();
        assert!(is_fatal_node(&g, 3).is_none());
    }

    #[test]
    fn target_set_monotone_attractor_pre_seeds_whole_color_class() {
        let g = fatal_attractors_paper_example();
        // Priority 1 occurs at vertices 3, 5, 7, all owned by Odd.
        let target: VertexSet = [3, 5, 7].into_iter().collect();
        let (ma, _) = monotone_attractor_set(&g, &target, 1);
        assert!(target.is_subset(&ma));
    }

    #[test]
    fn monotone_attractor_never_crosses_higher_priority() {
        let g = fatal_attractors_paper_example();
        let target: VertexSet = [3].into_iter().collect();
        let (ma, _) = monotone_attractor_set(&g, &target, 1);
        assert!(!ma.contains(&2));
    }
}
