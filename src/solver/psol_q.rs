//! # PsolQ Module
//!
//! `psolQ`: fatal attractors built up in layers, one priority at a time
//! within a single parity class, from the highest priority of that parity
//! down to the lowest occurring in the current candidate set. Each layer's
//! attractor is *permissive*: a vertex already in the running target set
//! is accepted regardless of its own priority, since the layering itself
//! is what keeps the bound sound.
//!
//! Grounded on
//! `examples/original_source/tool/generalizedparity-master/fatalattractors/psolQ.py`
//! (`permissive_monotone_attractor`, `layered_attractor`, `psolQ`) for the
//! single-dimension case, and
//! `examples/original_source/generalizedparity-master/fatalattractors/psolQ_generalized.py`
//! for the generalized one.
//!
//! #### Authorship
//!
//! - Max Fierro, 4/9/2023 (maxfierro@berkeley.edu)

use crate::arena::{Arena, Player, Priority, VertexSet};
use crate::solver::attractor::attractor;
use crate::solver::model::Solution;
use crate::solver::monotone::monotone_attractor_set_func;
use std::collections::VecDeque;

/// The monotone attractor of `target`, bounded by priority `d`, except
/// that vertices already in `target` are admitted regardless of their own
/// priority (only their *predecessors* are still bound by `d`).
fn permissive_monotone_attractor(
    g: &Arena,
    target: &VertexSet,
    d: Priority,
) -> (VertexSet, VertexSet) {
    let j = Player::of_priority(d);
    let opponent = j.opponent();
    let mut out: Vec<usize> = g.vertices().map(|v| g.successors(v).len()).collect();
    let mut regions: Vec<Option<Player>> = vec![None; g.len()];
    let mut queue: VecDeque<_> = VecDeque::new();
    let mut w = VertexSet::new();

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
            let admissible = g.priority1(p) <= d || target.contains(&p);
            if !admissible {
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

/// Builds the layered fatal attractor of `x` (all of whose vertices share
/// the parity of `max_priority`), descending from `max_priority` in steps
/// of two down to the lowest priority occurring in `x`.
fn layered_attractor(g: &Arena, max_priority: Priority, x: &VertexSet) -> (VertexSet, VertexSet) {
    let min_in_x = x.iter().map(|&v| g.priority1(v)).min().unwrap();
    let mut a = VertexSet::new();
    let mut not_a: VertexSet = g.all_vertices();

    let mut d = max_priority;
    while d >= min_in_x {
        let y: VertexSet =
            x.iter().copied().filter(|&v| g.priority1(v) >= d).collect();
        let a_union_y: VertexSet = y.union(&a).copied().collect();
        let (att, rest) = permissive_monotone_attractor(g, &a_union_y, d);
        a = att;
        not_a = rest;
        if d < 2 {
            break;
        }
        d -= 2;
    }

    (a, not_a)
}

/// Partial solver `psolQ`.
pub fn psol_q(g: &Arena) -> Solution {
    let mut w_even = VertexSet::new();
    let mut w_odd = VertexSet::new();
    let mut current = g.clone();

    'colors: loop {
        if current.is_empty() {
            break;
        }
        let mut colors_descending = current.sorted_priorities(0);
        colors_descending.reverse();
        let max_priority = colors_descending[0];
        let max_even = if max_priority % 2 == 0 { max_priority } else { max_priority.saturating_sub(1) };
        let max_odd = if max_priority % 2 == 1 { max_priority } else { max_priority.saturating_sub(1) };

        for color in colors_descending {
            let player = Player::of_priority(color);
            let mut x: VertexSet = current
                .vertices()
                .filter(|&v| {
                    Player::of_priority(current.priority1(v)) == player
                        && current.priority1(v) >= color
                })
                .collect();
            if x.is_empty() {
                continue;
            }
            loop {
                let bound = if player == Player::Even { max_even } else { max_odd };
                let (ma, _) = layered_attractor(&current, bound, &x);
                if x.is_subset(&ma) {
                    let (att, complement) = attractor(&current, &ma, player);
                    let labels: VertexSet =
                        att.iter().map(|&u| current.label(u)).collect();
                    match player {
                        Player::Even => w_even.extend(labels),
                        Player::Odd => w_odd.extend(labels),
                    }
                    if complement.is_empty() {
                        break 'colors;
                    }
                    current = current.subgame(&complement);
                    continue 'colors;
                }
                let shrunk: VertexSet = x.intersection(&ma).copied().collect();
                if shrunk == x {
                    break;
                }
                if shrunk.is_empty() {
                    break;
                }
                x = shrunk;
            }
        }
        break;
    }

    (w_even, w_odd)
}

fn color_class_func(g: &Arena, func: usize, color: Priority) -> VertexSet {
    g.vertices().filter(|&v| g.priority_of(v, func) == color).collect()
}

/// Like [`permissive_monotone_attractor`], but bounded under priority
/// function `func` rather than the single-dimension default.
fn permissive_monotone_attractor_func(
    g: &Arena,
    target: &VertexSet,
    d: Priority,
    func: usize,
) -> (VertexSet, VertexSet) {
    let j = Player::of_priority(d);
    let opponent = j.opponent();
    let mut out: Vec<usize> = g.vertices().map(|v| g.successors(v).len()).collect();
    let mut regions: Vec<Option<Player>> = vec![None; g.len()];
    let mut queue: VecDeque<_> = VecDeque::new();
    let mut w = VertexSet::new();

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
            let admissible = g.priority_of(p, func) <= d || target.contains(&p);
            if !admissible {
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

/// Builds the layered fatal attractor of `x` under function `func`, the
/// same ladder [`layered_attractor`] builds for the single-dimension case.
fn layered_attractor_func(
    g: &Arena,
    max_priority: Priority,
    x: &VertexSet,
    func: usize,
) -> (VertexSet, VertexSet) {
    if x.is_empty() {
        return (VertexSet::new(), g.all_vertices());
    }
    let min_in_x = x.iter().map(|&v| g.priority_of(v, func)).min().unwrap();
    let mut a = VertexSet::new();
    let mut not_a: VertexSet = g.all_vertices();

    let mut d = max_priority;
    while d >= min_in_x {
        let y: VertexSet = x.iter().copied().filter(|&v| g.priority_of(v, func) >= d).collect();
        let a_union_y: VertexSet = y.union(&a).copied().collect();
        let (att, rest) = permissive_monotone_attractor_func(g, &a_union_y, d, func);
        a = att;
        not_a = rest;
        if d < 2 {
            break;
        }
        d -= 2;
    }

    (a, not_a)
}

/// Generalized `psolQ`: an odd-priority pre-pass identical in shape to
/// `psolB`'s (run independently per function, since an odd-priority fatal
/// attractor for one function is fatal for the whole game regardless of
/// what the other functions say), followed by an even-priority pass that
/// builds one layered attractor per function for a k-tuple of targets and
/// takes their intersection as the candidate fatal set.
///
/// The original source tracks a per-vertex boolean memory vector (one bit
/// per function, `2^k` possibilities per predecessor) so that the layered
/// attractor can tell, for each function independently, whether that
/// function's target has already been reached along the current path.
/// This instead runs each function's layered attractor independently
/// against the same shrinking candidate set and intersects the results,
/// which is sound (the candidate set only shrinks) but coarser: it can
/// fail to confirm a fatal attractor the memory-vector version would
/// have found, in exchange for never expanding combinatorially in `k`.
/// See DESIGN.md.
pub fn psol_q_generalized(g: &Arena) -> Solution {
    let mut w_even = VertexSet::new();
    let mut w_odd = VertexSet::new();
    let mut current = g.clone();

    'outer: loop {
        if current.is_empty() {
            break;
        }
        let dims = current.dimension();

        let descending = |func: usize| -> Vec<Priority> {
            let mut p = current.sorted_priorities(func);
            p.reverse();
            p
        };
        let priorities: Vec<Vec<Priority>> = (0..dims).map(descending).collect();
        let even_priorities: Vec<Vec<Priority>> = priorities
            .iter()
            .map(|p| p.iter().copied().filter(|x| x % 2 == 0).collect())
            .collect();

        if even_priorities.iter().any(|p| p.is_empty()) {
            w_odd.extend(current.vertices().map(|v| current.label(v)));
            break;
        }

        for func in 0..dims {
            for &odd_priority in priorities[func].iter().filter(|p| *p % 2 == 1) {
                let mut target = color_class_func(&current, func, odd_priority);
                if target.is_empty() {
                    continue;
                }
                loop {
                    let (ma, _) =
                        monotone_attractor_set_func(&current, &target, odd_priority, func);
                    if target.is_subset(&ma) {
                        let (att, complement) = attractor(&current, &ma, Player::Odd);
                        w_odd.extend(att.iter().map(|&u| current.label(u)));
                        current = current.subgame(&complement);
                        continue 'outer;
                    }
                    let shrunk: VertexSet = target.intersection(&ma).copied().collect();
                    if shrunk == target || shrunk.is_empty() {
                        break;
                    }
                    target = shrunk;
                }
            }
        }

        let max_len = even_priorities.iter().map(|p| p.len()).max().unwrap_or(0);
        for level in 0..max_len {
            let tuple: Vec<Priority> = even_priorities
                .iter()
                .map(|p| *p.get(level).or_else(|| p.last()).unwrap())
                .collect();

            let mut potential: VertexSet = current
                .vertices()
                .filter(|&v| {
                    (0..dims).all(|f| {
                        let prio = current.priority_of(v, f);
                        prio % 2 == 1 || prio <= tuple[f]
                    })
                })
                .collect();
            if potential.is_empty() {
                continue;
            }

            loop {
                let mut attractors: Vec<VertexSet> = Vec::with_capacity(dims);
                for f in 0..dims {
                    let (att, _) = layered_attractor_func(&current, tuple[f], &potential, f);
                    attractors.push(att);
                }
                let mut star = attractors[0].clone();
                for att in &attractors[1..] {
                    star = star.intersection(att).copied().collect();
                }
                if potential.is_subset(&star) {
                    let (att, complement) = attractor(&current, &star, Player::Even);
                    w_even.extend(att.iter().map(|&u| current.label(u)));
                    current = current.subgame(&complement);
                    continue 'outer;
                }
                let shrunk: VertexSet = potential.intersection(&star).copied().collect();
                if shrunk == potential || shrunk.is_empty() {
                    break;
                }
                potential = shrunk;
            }
        }

        break;
    }

    (w_even, w_odd)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::test::fatal_attractors_paper_example;

    #[test]
    fn psol_q_decides_the_vertices_it_claims_consistently() {
        let g = fatal_attractors_paper_example();
        let (w0, w1) = psol_q(&g);
        assert!(w0.is_disjoint(&w1));
        assert!(w0.len() + w1.len() <= g.len());
    }

    #[test]
    fn psol_q_generalized_partitions_consistently_on_a_single_function() {
        let g = fatal_attractors_paper_example();
        let (w0, w1) = psol_q_generalized(&g);
        assert!(w0.is_disjoint(&w1));
        assert!(w0.len() + w1.len() <= g.len());
    }
}
