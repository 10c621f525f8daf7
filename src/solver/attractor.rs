//! # Attractor Module
//!
//! Classical, color-bounded, and priority-vector-bounded attractor
//! computations over an [`Arena`]. These are the primitive on which every
//! fixpoint in this crate — partial solvers, Zielonka recursion, Büchi
//! solvers — is built.
//!
//! #### Authorship
//!
//! - Max Fierro, 4/9/2023 (maxfierro@berkeley.edu)

use crate::arena::{Arena, Player, Priority, VertexId, VertexSet};
use std::collections::VecDeque;

/// Per-vertex attractor membership: `None` until decided, then the
/// attracting player.
type Regions = Vec<Option<Player>>;

fn out_degrees(g: &Arena) -> Vec<usize> {
    g.vertices().map(|v| g.successors(v).len()).collect()
}

fn complement_of(g: &Arena, regions: &Regions, j: Player) -> VertexSet {
    g.vertices().filter(|&v| regions[v as usize] != Some(j)).collect()
}

/// Computes the attractor for player `j` of the target set `u`: the least
/// `W ⊇ U` such that every `v ∈ W \ U` owned by `j` has a successor in `W`,
/// and every `v ∈ W \ U` owned by `j`'s opponent has *every* successor in
/// `W`. Returns `(W, V \ W)`.
pub fn attractor(g: &Arena, u: &VertexSet, j: Player) -> (VertexSet, VertexSet) {
    let mut out = out_degrees(g);
    let mut regions: Regions = vec![None; g.len()];
    let mut queue: VecDeque<VertexId> = VecDeque::new();
    let mut w: VertexSet = VertexSet::new();
    let opponent = j.opponent();

    for &node in u {
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
            if owner == j {
                regions[p as usize] = Some(j);
                w.insert(p);
                queue.push_back(p);
            } else {
                debug_assert_eq!(owner, opponent);
                out[p as usize] -= 1;
                if out[p as usize] == 0 {
                    regions[p as usize] = Some(j);
                    w.insert(p);
                    queue.push_back(p);
                }
            }
        }
    }

    let complement = complement_of(g, &regions, j);
    (w, complement)
}

/// Like [`attractor`], but predecessors in `forbidden` are never entered,
/// and so never contribute to the attractor or decrement anyone's
/// out-degree counter.
pub fn safe_attractor(
    g: &Arena,
    u: &VertexSet,
    forbidden: &VertexSet,
    j: Player,
) -> (VertexSet, VertexSet) {
    let mut out = out_degrees(g);
    let mut regions: Regions = vec![None; g.len()];
    let mut queue: VecDeque<VertexId> = VecDeque::new();
    let mut w: VertexSet = VertexSet::new();

    for &node in u {
        if forbidden.contains(&node) {
            continue;
        }
        regions[node as usize] = Some(j);
        w.insert(node);
        queue.push_back(node);
    }

    while let Some(s) = queue.pop_front() {
        for &p in g.predecessors(s) {
            if forbidden.contains(&p) || regions[p as usize].is_some() {
                continue;
            }
            let owner = g.owner(p);
            if owner == j {
                regions[p as usize] = Some(j);
                w.insert(p);
                queue.push_back(p);
            } else {
                out[p as usize] -= 1;
                if out[p as usize] == 0 {
                    regions[p as usize] = Some(j);
                    w.insert(p);
                    queue.push_back(p);
                }
            }
        }
    }

    let complement: VertexSet =
        g.vertices().filter(|v| !w.contains(v)).collect();
    (w, complement)
}

/// Like [`attractor`], restricted to predecessors whose (single-dimension)
/// priority does not exceed `p`.
pub fn attractor_color(
    g: &Arena,
    u: &VertexSet,
    j: Player,
    p: Priority,
) -> (VertexSet, VertexSet) {
    let mut out = out_degrees(g);
    let mut regions: Regions = vec![None; g.len()];
    let mut queue: VecDeque<VertexId> = VecDeque::new();
    let mut w: VertexSet = VertexSet::new();
    let opponent = j.opponent();

    for &node in u {
        regions[node as usize] = Some(j);
        w.insert(node);
        queue.push_back(node);
    }

    while let Some(s) = queue.pop_front() {
        for &pred in g.predecessors(s) {
            if regions[pred as usize].is_some() {
                continue;
            }
            if g.priority1(pred) > p {
                continue;
            }
            let owner = g.owner(pred);
            if owner == j {
                regions[pred as usize] = Some(j);
                w.insert(pred);
                queue.push_back(pred);
            } else {
                debug_assert_eq!(owner, opponent);
                out[pred as usize] -= 1;
                if out[pred as usize] == 0 {
                    regions[pred as usize] = Some(j);
                    w.insert(pred);
                    queue.push_back(pred);
                }
            }
        }
    }

    let complement = complement_of(g, &regions, j);
    (w, complement)
}

/// Generalized [`attractor_color`]: a predecessor is admissible iff, for
/// every priority function `i`, its priority under `i` is either `<=
/// priorities[i]` or has the same parity as `j`.
pub fn attractor_color_vector(
    g: &Arena,
    u: &VertexSet,
    j: Player,
    priorities: &[Priority],
) -> (VertexSet, VertexSet) {
    let mut out = out_degrees(g);
    let mut regions: Regions = vec![None; g.len()];
    let mut queue: VecDeque<VertexId> = VecDeque::new();
    let mut w: VertexSet = VertexSet::new();
    let opponent = j.opponent();

    let admissible = |g: &Arena, v: VertexId| -> bool {
        (0..priorities.len()).all(|i| {
            let pv = g.priority_of(v, i);
            Player::of_priority(pv) == j || pv <= priorities[i]
        })
    };

    for &node in u {
        regions[node as usize] = Some(j);
        w.insert(node);
        queue.push_back(node);
    }

    while let Some(s) = queue.pop_front() {
        for &pred in g.predecessors(s) {
            if regions[pred as usize].is_some() {
                continue;
            }
            if !admissible(g, pred) {
                continue;
            }
            let owner = g.owner(pred);
            if owner == j {
                regions[pred as usize] = Some(j);
                w.insert(pred);
                queue.push_back(pred);
            } else {
                debug_assert_eq!(owner, opponent);
                out[pred as usize] -= 1;
                if out[pred as usize] == 0 {
                    regions[pred as usize] = Some(j);
                    w.insert(pred);
                    queue.push_back(pred);
                }
            }
        }
    }

    let complement = complement_of(g, &regions, j);
    (w, complement)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::test::fatal_attractors_paper_example;

    #[test]
    fn attractor_contains_target_and_is_closed() {
        let g = fatal_attractors_paper_example();
        let u: VertexSet = [3].into_iter().collect();
        let (w, complement) = attractor(&g, &u, Player::Odd);
        assert!(w.is_superset(&u));
        for v in &complement {
            if g.owner(*v) == Player::Odd {
                assert!(g.successors(*v).iter().all(|s| complement.contains(s)));
            } else {
                assert!(g.successors(*v).iter().any(|s| complement.contains(s)));
            }
        }
        assert_eq!(w.len() + complement.len(), g.len());
    }

    #[test]
    fn safe_attractor_never_enters_forbidden_set() {
        let g = fatal_attractors_paper_example();
        let u: VertexSet = [7].into_iter().collect();
        let forbidden: VertexSet = [6].into_iter().collect();
        let (w, _) = safe_attractor(&g, &u, &forbidden, Player::Odd);
        assert!(!w.contains(&6));
    }

    #[test]
    fn attractor_color_excludes_higher_priority_predecessors() {
        let g = fatal_attractors_paper_example();
        let u: VertexSet = [3].into_iter().collect();
        let (w, _) = attractor_color(&g, &u, Player::Odd, 1);
        // Vertex 2 (priority 4) cannot be forced/admitted under a bound of 1.
        assert!(!w.contains(&2));
    }
}
