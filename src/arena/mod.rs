//! # Arena Module
//!
//! This module defines the in-memory representation of a generalized parity
//! game arena: a finite directed graph whose vertices are partitioned
//! between two players and annotated with a tuple of priority values drawn
//! from `k >= 1` independent priority functions.
//!
//! An [`Arena`] is logically immutable once built. The only derived views
//! are [`Arena::subgame`], which restricts the vertex set, and
//! [`Arena::complement`], which increments every priority by one (used by
//! the generalized Zielonka recursion). Both return a fresh arena rather
//! than mutating `self`.
//!
//! #### Authorship
//!
//! - Max Fierro, 4/6/2023 (maxfierro@berkeley.edu)

pub mod loader;

use std::collections::BTreeSet;
use std::fmt;

/* TYPES */

/// Dense vertex identifier local to a particular [`Arena`]. Subgames
/// relabel their vertex set to a fresh, contiguous range starting at zero,
/// so a `VertexId` is only meaningful relative to the `Arena` it was
/// obtained from.
pub type VertexId = u32;

/// A single priority value.
pub type Priority = u32;

/// A set of vertices, kept in a deterministic (sorted) iteration order so
/// that solver output is reproducible across runs, per the ordering
/// guarantee in the data model.
pub type VertexSet = BTreeSet<VertexId>;

/// The player who owns a vertex, or (equivalently, via [`Player::index`])
/// the parity of a priority value of interest. `Even` is "player 0" in the
/// spec's numbering, `Odd` is "player 1".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    Even,
    Odd,
}

impl Player {
    /// The `{0, 1}` index used pervasively by the attractor and fixpoint
    /// algorithms.
    pub fn index(self) -> usize {
        match self {
            Player::Even => 0,
            Player::Odd => 1,
        }
    }

    /// The player of a priority value: even priorities belong to `Even`,
    /// odd priorities to `Odd`.
    pub fn of_priority(p: Priority) -> Player {
        if p % 2 == 0 {
            Player::Even
        } else {
            Player::Odd
        }
    }

    /// The other player.
    pub fn opponent(self) -> Player {
        match self {
            Player::Even => Player::Odd,
            Player::Odd => Player::Even,
        }
    }
}

impl From<usize> for Player {
    fn from(value: usize) -> Self {
        if value % 2 == 0 {
            Player::Even
        } else {
            Player::Odd
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Player::Even => write!(f, "0"),
            Player::Odd => write!(f, "1"),
        }
    }
}

/* DEFINITIONS */

/// A finite directed graph whose vertices are owned by one of two players
/// and annotated with a `k`-dimensional priority vector, with adjacency
/// maintained in both directions. See the module documentation for the
/// invariants this type upholds.
#[derive(Debug, Clone)]
pub struct Arena {
    owner: Vec<Player>,
    priority: Vec<Vec<Priority>>,
    succ: Vec<Vec<VertexId>>,
    pred: Vec<Vec<VertexId>>,
    /// The external vertex id each local index was built from. Preserved
    /// across `subgame` so that winning regions can be reported in terms
    /// of the ids the user originally supplied.
    label: Vec<u32>,
    dimension: usize,
}

impl Arena {
    /// Builds an arena from per-vertex owner, priority-vector, and
    /// successor data. `successors[v]` must only reference indices less
    /// than `owner.len()`. Predecessor lists are derived automatically so
    /// that `u in succ(v) iff v in pred(u)` holds by construction.
    ///
    /// # Panics
    ///
    /// Panics if the inputs are inconsistent in length, if any priority
    /// vector's arity disagrees with the first vertex's, if any vertex has
    /// no successors, or if a successor index is out of range. Callers
    /// that need to reject such input gracefully (e.g. the text loader)
    /// must validate before calling this constructor.
    pub fn new(
        owner: Vec<Player>,
        priority: Vec<Vec<Priority>>,
        successors: Vec<Vec<VertexId>>,
        label: Vec<u32>,
    ) -> Arena {
        let n = owner.len();
        assert_eq!(priority.len(), n, "owner/priority length mismatch");
        assert_eq!(successors.len(), n, "owner/successors length mismatch");
        assert_eq!(label.len(), n, "owner/label length mismatch");
        let dimension = priority.first().map(|p| p.len()).unwrap_or(1);
        for p in &priority {
            assert_eq!(p.len(), dimension, "inconsistent priority arity");
        }
        for (v, s) in successors.iter().enumerate() {
            assert!(!s.is_empty(), "vertex {v} has no outgoing edges");
            for &u in s {
                assert!((u as usize) < n, "successor {u} out of range");
            }
        }
        let mut pred = vec![Vec::new(); n];
        for (v, s) in successors.iter().enumerate() {
            for &u in s {
                pred[u as usize].push(v as VertexId);
            }
        }
        Arena { owner, priority, succ: successors, pred, label, dimension }
    }

    /// The number of vertices in the arena.
    pub fn len(&self) -> usize {
        self.owner.len()
    }

    /// Whether the arena has no vertices.
    pub fn is_empty(&self) -> bool {
        self.owner.is_empty()
    }

    /// The number `k` of independent priority functions.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// All local vertex ids, in ascending order.
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> {
        0..(self.len() as VertexId)
    }

    /// The owner of `v`.
    pub fn owner(&self, v: VertexId) -> Player {
        self.owner[v as usize]
    }

    /// The `k`-dimensional priority vector of `v`.
    pub fn priority(&self, v: VertexId) -> &[Priority] {
        &self.priority[v as usize]
    }

    /// The priority of `v` under the (1-indexed) function `func`.
    pub fn priority_of(&self, v: VertexId, func: usize) -> Priority {
        self.priority[v as usize][func]
    }

    /// The single-dimension priority of `v`. Panics if `dimension() != 1`.
    pub fn priority1(&self, v: VertexId) -> Priority {
        debug_assert_eq!(self.dimension, 1);
        self.priority[v as usize][0]
    }

    /// The successors of `v`, in the order they were declared.
    pub fn successors(&self, v: VertexId) -> &[VertexId] {
        &self.succ[v as usize]
    }

    /// The predecessors of `v`.
    pub fn predecessors(&self, v: VertexId) -> &[VertexId] {
        &self.pred[v as usize]
    }

    /// The external id `v` was labeled with when this arena (or one of its
    /// ancestors, through `subgame`) was built.
    pub fn label(&self, v: VertexId) -> u32 {
        self.label[v as usize]
    }

    /// The maximum priority occurring in the arena under function `func`
    /// (0-indexed). Returns `0` for an empty arena.
    pub fn max_priority(&self, func: usize) -> Priority {
        self.vertices().map(|v| self.priority_of(v, func)).max().unwrap_or(0)
    }

    /// Every distinct priority occurring under function `func`, sorted
    /// ascending.
    pub fn sorted_priorities(&self, func: usize) -> Vec<Priority> {
        let mut ps: Vec<Priority> =
            self.vertices().map(|v| self.priority_of(v, func)).collect();
        ps.sort_unstable();
        ps.dedup();
        ps
    }

    /// Restricts the arena to `keep`, dropping any edge with an endpoint
    /// outside it. The returned arena's vertex set is relabeled to a dense
    /// range starting at zero, in the ascending order of `keep`, and
    /// `label` is composed with `self.label` so external ids survive
    /// repeated restriction.
    ///
    /// Every vertex must have at least one outgoing edge for the games
    /// this type models, so this is only well-defined when every vertex in
    /// `keep` retains at least one successor within `keep`; restricting to
    /// a set that would strand a vertex is a caller error.
    pub fn subgame(&self, keep: &VertexSet) -> Arena {
        let mapping: Vec<VertexId> = keep.iter().copied().collect();
        let mut index_of = vec![None; self.len()];
        for (new_idx, &old) in mapping.iter().enumerate() {
            index_of[old as usize] = Some(new_idx as VertexId);
        }

        let mut owner = Vec::with_capacity(mapping.len());
        let mut priority = Vec::with_capacity(mapping.len());
        let mut successors = Vec::with_capacity(mapping.len());
        let mut label = Vec::with_capacity(mapping.len());

        for &old in &mapping {
            owner.push(self.owner(old));
            priority.push(self.priority(old).to_vec());
            label.push(self.label(old));
            let restricted: Vec<VertexId> = self
                .successors(old)
                .iter()
                .filter_map(|&s| index_of[s as usize])
                .collect();
            assert!(
                !restricted.is_empty(),
                "subgame restriction stranded vertex {old} with no \
                successors in the kept set"
            );
            successors.push(restricted);
        }

        Arena::new(owner, priority, successors, label)
    }

    /// A derived arena in which every priority, under every function, has
    /// been incremented by one. Used by the generalized Zielonka recursion
    /// to make "even is winning" uniform across an alternating recursion
    /// that reasons about odd maxima. Does not mutate `self`.
    pub fn complement(&self) -> Arena {
        let priority = self
            .priority
            .iter()
            .map(|p| p.iter().map(|x| x + 1).collect())
            .collect();
        Arena {
            owner: self.owner.clone(),
            priority,
            succ: self.succ.clone(),
            pred: self.pred.clone(),
            label: self.label.clone(),
            dimension: self.dimension,
        }
    }

    /// Convenience: the full vertex set of this arena, as a [`VertexSet`].
    pub fn all_vertices(&self) -> VertexSet {
        self.vertices().collect()
    }
}

#[cfg(test)]
pub(crate) mod test {
    use super::*;

    /// Builds the 12-vertex fatal-attractor paper example used across the
    /// psol/psolB/zielonka test suites. Vertices are zero-indexed here
    /// (textual arena files use the loader's one-based convention; the
    /// graph shape is unchanged).
    ///
    /// Priorities and edges, owners in parentheses:
    ///   0: p3 (0) -> 1, 4
    ///   1: p2 (1) -> 0, 2
    ///   2: p4 (0) -> 1, 3
    ///   3: p1 (1) -> 2
    ///   4: p6 (0) -> 0, 5
    ///   5: p1 (1) -> 4, 6
    ///   6: p8 (0) -> 5, 7
    ///   7: p1 (1) -> 6
    ///   8: p6 (0) -> 9
    ///   9: p5 (1) -> 8, 10
    ///  10: p6 (0) -> 9, 11
    ///  11: p3 (1) -> 10
    pub fn fatal_attractors_paper_example() -> Arena {
        use Player::*;
        let owner = vec![
            Even, Odd, Even, Odd, Even, Odd, Even, Odd, Even, Odd, Even, Odd,
        ];
        let priority: Vec<Vec<Priority>> = vec![3, 2, 4, 1, 6, 1, 8, 1, 6, 5, 6, 3]
            .into_iter()
            .map(|p| vec![p])
            .collect();
        let successors = vec![
            vec![1, 4],
            vec![0, 2],
            vec![1, 3],
            vec![2],
            vec![0, 5],
            vec![4, 6],
            vec![5, 7],
            vec![6],
            vec![9],
            vec![8, 10],
            vec![9, 11],
            vec![10],
        ];
        let label = (0..12).collect();
        Arena::new(owner, priority, successors, label)
    }

    #[test]
    fn subgame_restricts_and_relabels() {
        let g = fatal_attractors_paper_example();
        let keep: VertexSet = [0, 1, 4, 5].into_iter().collect();
        let h = g.subgame(&keep);
        assert_eq!(h.len(), 4);
        // Original vertex 0 keeps its label across restriction.
        let zero = h.vertices().find(|&v| h.label(v) == 0).unwrap();
        assert_eq!(h.owner(zero), Player::Even);
        // Edge 0 -> 2 is dropped since 2 is not kept; 0 -> 4 survives.
        let four = h.vertices().find(|&v| h.label(v) == 4).unwrap();
        assert!(h.successors(zero).contains(&four));
        assert_eq!(h.successors(zero).len(), 1);
    }

    #[test]
    #[should_panic]
    fn subgame_panics_on_stranded_vertex() {
        let g = fatal_attractors_paper_example();
        // 3's only successor is 2, which is excluded here.
        let keep: VertexSet = [3].into_iter().collect();
        let _ = g.subgame(&keep);
    }

    #[test]
    fn complement_increments_every_priority() {
        let g = fatal_attractors_paper_example();
        let c = g.complement();
        for v in g.vertices() {
            assert_eq!(c.priority1(v), g.priority1(v) + 1);
        }
    }

    #[test]
    #[should_panic]
    fn new_panics_on_dead_end() {
        let _ = Arena::new(
            vec![Player::Even, Player::Odd],
            vec![vec![0], vec![1]],
            vec![vec![1], vec![]],
            vec![0, 1],
        );
    }
}
