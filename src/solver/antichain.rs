//! # Antichain Module
//!
//! A generic antichain of pairwise-incomparable elements, parameterized by
//! a caller-supplied partial order and partial meet. Used by the backward
//! safety-game solver (`solver::backward`) and the generalized `psolC`
//! fixpoint (`solver::psol_c`), which differ only in their element type and
//! the three functions plugged in here.
//!
//! #### Authorship
//!
//! - Max Fierro, 11/2/2023 (maxfierro@berkeley.edu)

/// A set of pairwise-incomparable elements under `leq`, with insertion
/// maintaining that invariant by subsumption. `meet` is partial: `None`
/// signals "no greatest lower bound" (incomparable elements whose
/// intersection, in the domain this antichain represents, does not
/// exist), and such results are never stored.
#[derive(Clone)]
pub struct Antichain<T> {
    elements: Vec<T>,
    leq: fn(&T, &T) -> bool,
    meet: fn(&T, &T) -> Option<T>,
}

impl<T: Clone + PartialEq> Antichain<T> {
    /// Builds an empty antichain under the given order and meet.
    pub fn new(leq: fn(&T, &T) -> bool, meet: fn(&T, &T) -> Option<T>) -> Self {
        Antichain { elements: Vec::new(), leq, meet }
    }

    /// The elements currently stored, in no particular order.
    pub fn elements(&self) -> &[T] {
        &self.elements
    }

    /// Whether the antichain holds no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Inserts `element`, preserving the antichain invariant: if some
    /// stored `s` already dominates `element` (`element <= s`), nothing
    /// happens; otherwise every stored element `element` dominates is
    /// dropped before `element` is added.
    pub fn insert(&mut self, element: T) {
        let mut kept = Vec::with_capacity(self.elements.len() + 1);
        for s in &self.elements {
            if (self.leq)(&element, s) {
                // element is subsumed by an existing, more permissive s.
                return;
            }
            if !(self.leq)(s, &element) {
                kept.push(s.clone());
            }
        }
        kept.push(element);
        self.elements = kept;
    }

    /// Inserts every element of `other` into `self`.
    pub fn union(&mut self, other: &Antichain<T>) {
        for e in &other.elements {
            self.insert(e.clone());
        }
    }

    /// The antichain of pairwise meets between `self` and `other`,
    /// discarding pairs whose meet does not exist.
    pub fn intersection(&self, other: &Antichain<T>) -> Antichain<T> {
        let mut result = Antichain::new(self.leq, self.meet);
        for a in &self.elements {
            for b in &other.elements {
                if let Some(m) = (self.meet)(a, b) {
                    result.insert(m);
                }
            }
        }
        result
    }

    /// Whether `element` is stored exactly (not merely dominated).
    pub fn contains_exact(&self, element: &T) -> bool {
        self.elements.iter().any(|e| e == element)
    }

    /// Equality of the two antichains as *sets* of elements.
    ///
    /// The original source's `compare` only checked that every element of
    /// `self` appeared in `other`, which is a one-directional subset test,
    /// not equality — harmless there only because every caller happened to
    /// iterate a shrinking sequence, never a growing one. Used as a
    /// fixpoint-convergence predicate, a one-directional check can declare
    /// convergence early on an antichain that has in fact changed size but
    /// not lost any of its previous elements (see DESIGN.md). This checks
    /// both directions.
    pub fn eq_as_sets(&self, other: &Antichain<T>) -> bool {
        self.elements.len() == other.elements.len()
            && self.elements.iter().all(|e| other.contains_exact(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leq_pair(a: &(i32, i32), b: &(i32, i32)) -> bool {
        a.0 <= b.0 && a.1 <= b.1
    }

    fn meet_pair(a: &(i32, i32), b: &(i32, i32)) -> Option<(i32, i32)> {
        Some((a.0.max(b.0), a.1.max(b.1)))
    }

    /// Inserting [1,2] then [1,3] then [2,1] into an antichain over
    /// componentwise `<=` yields exactly {[1,3], [2,1]}, and [1,2] is not
    /// a member.
    #[test]
    fn scenario_f_antichain_over_pairs() {
        let mut a = Antichain::new(leq_pair, meet_pair);
        a.insert((1, 2));
        a.insert((1, 3));
        a.insert((2, 1));
        assert_eq!(a.elements().len(), 2);
        assert!(a.contains_exact(&(1, 3)));
        assert!(a.contains_exact(&(2, 1)));
        assert!(!a.contains_exact(&(1, 2)));
    }

    #[test]
    fn insert_is_idempotent_under_domination() {
        let mut a = Antichain::new(leq_pair, meet_pair);
        a.insert((2, 2));
        a.insert((1, 1));
        assert_eq!(a.elements(), &[(2, 2)]);
    }

    #[test]
    fn eq_as_sets_requires_mutual_inclusion() {
        let mut a = Antichain::new(leq_pair, meet_pair);
        a.insert((1, 3));
        a.insert((2, 1));
        let mut b = Antichain::new(leq_pair, meet_pair);
        b.insert((1, 3));
        // b is a strict subset of a: one-directional containment of b's
        // elements in a would wrongly call these equal.
        assert!(!a.eq_as_sets(&b));
        assert!(!b.eq_as_sets(&a));
        b.insert((2, 1));
        assert!(a.eq_as_sets(&b));
    }

    #[test]
    fn intersection_discards_incomparable_pairs() {
        fn leq_vertex(a: &(u32, i32), b: &(u32, i32)) -> bool {
            a.0 == b.0 && a.1 <= b.1
        }
        fn meet_vertex(a: &(u32, i32), b: &(u32, i32)) -> Option<(u32, i32)> {
            if a.0 == b.0 {
                Some((a.0, a.1.min(b.1)))
            } else {
                None
            }
        }
        let mut a = Antichain::new(leq_vertex, meet_vertex);
        a.insert((0, 5));
        let mut b = Antichain::new(leq_vertex, meet_vertex);
        b.insert((1, 5));
        let inter = a.intersection(&b);
        assert!(inter.is_empty());
    }
}
