//! # Dependency-Set Algebra
//!
//! Nonmonotonic justification bookkeeping.
//!
//! Every fact carries the set of search branches its validity rests on,
//! optionally annotated with the origin axioms needed for a user-facing
//! explanation. The algebra is a pure value type: union never mutates
//! its operands, and the empty set is the identity.
//!
//! Branch membership is monotone under union even when explanation
//! detail is suppressed; backjumping relies on never losing a branch tag.

use crate::types::{AxiomId, BranchId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The set of branches (and optionally axioms) a fact's or token's
/// validity currently rests on.
///
/// The empty value is the `independent` identity: a fact that holds
/// regardless of any nonmonotonic choice.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct DependencySet {
    /// Branch tags this set depends on.
    branches: BTreeSet<BranchId>,
    /// Origin axioms, retained only while explanation detail is wanted.
    axioms: BTreeSet<AxiomId>,
}

impl DependencySet {
    /// The identity value: depends on nothing.
    #[must_use]
    pub fn independent() -> Self {
        Self::default()
    }

    /// A set depending on exactly one branch.
    #[must_use]
    pub fn from_branch(branch: BranchId) -> Self {
        let mut branches = BTreeSet::new();
        branches.insert(branch);
        Self {
            branches,
            axioms: BTreeSet::new(),
        }
    }

    /// A set carrying one origin axiom and no branch tags.
    #[must_use]
    pub fn from_axiom(axiom: AxiomId) -> Self {
        let mut axioms = BTreeSet::new();
        axioms.insert(axiom);
        Self {
            branches: BTreeSet::new(),
            axioms,
        }
    }

    /// Extend this set with one more origin axiom.
    #[must_use]
    pub fn with_axiom(mut self, axiom: AxiomId) -> Self {
        self.axioms.insert(axiom);
        self
    }

    /// Extend this set with one more branch tag.
    #[must_use]
    pub fn with_branch(mut self, branch: BranchId) -> Self {
        self.branches.insert(branch);
        self
    }

    /// Check whether this is the identity value.
    #[must_use]
    pub fn is_independent(&self) -> bool {
        self.branches.is_empty() && self.axioms.is_empty()
    }

    /// Check branch membership.
    #[must_use]
    pub fn contains(&self, branch: BranchId) -> bool {
        self.branches.contains(&branch)
    }

    /// The highest branch tag in the set, if any.
    ///
    /// Backjumping restores search to the highest branch a refuted match
    /// depends on.
    #[must_use]
    pub fn max_branch(&self) -> Option<BranchId> {
        self.branches.iter().next_back().copied()
    }

    /// The branch tags of this set, in ascending order.
    pub fn branches(&self) -> impl Iterator<Item = BranchId> + '_ {
        self.branches.iter().copied()
    }

    /// The origin axioms of this set, in ascending order.
    pub fn axioms(&self) -> impl Iterator<Item = AxiomId> + '_ {
        self.axioms.iter().copied()
    }

    /// Union of two dependency sets.
    ///
    /// Commutative, associative, idempotent. When `other` is the
    /// identity value, `self` is returned unchanged (and symmetrically).
    /// Branch membership is always merged; axiom detail is merged only
    /// when `explain` is set, otherwise the summarized result carries
    /// branch tags alone.
    #[must_use]
    pub fn union(&self, other: &Self, explain: bool) -> Self {
        if other.is_independent() {
            return self.clone();
        }
        if self.is_independent() {
            return other.clone();
        }

        let branches = self.branches.union(&other.branches).copied().collect();
        let axioms = if explain {
            self.axioms.union(&other.axioms).copied().collect()
        } else {
            BTreeSet::new()
        };

        Self { branches, axioms }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn branches(tags: &[u32]) -> DependencySet {
        tags.iter()
            .fold(DependencySet::independent(), |ds, &b| {
                ds.with_branch(BranchId(b))
            })
    }

    #[test]
    fn independent_is_identity() {
        let ds = branches(&[1, 2]).with_axiom(AxiomId(9));
        let id = DependencySet::independent();

        assert_eq!(ds.union(&id, true), ds);
        assert_eq!(ds.union(&id, false), ds);
        assert_eq!(id.union(&ds, true), ds);
    }

    #[test]
    fn union_is_commutative_and_associative() {
        let a = branches(&[1]);
        let b = branches(&[2]);
        let c = branches(&[3]);

        assert_eq!(a.union(&b, false), b.union(&a, false));
        assert_eq!(
            a.union(&b.union(&c, false), false),
            a.union(&b, false).union(&c, false)
        );
    }

    #[test]
    fn union_is_idempotent() {
        let a = branches(&[1, 4]);
        assert_eq!(a.union(&a, true), a);
    }

    #[test]
    fn union_never_loses_branch_membership() {
        let a = branches(&[1]).with_axiom(AxiomId(10));
        let b = branches(&[2]).with_axiom(AxiomId(20));

        // Explanation suppressed: axioms dropped, branches kept.
        let summarized = a.union(&b, false);
        assert!(summarized.contains(BranchId(1)));
        assert!(summarized.contains(BranchId(2)));
        assert_eq!(summarized.axioms().count(), 0);

        // Explanation requested: both retained.
        let detailed = a.union(&b, true);
        assert!(detailed.contains(BranchId(1)));
        assert!(detailed.contains(BranchId(2)));
        assert_eq!(detailed.axioms().count(), 2);
    }

    #[test]
    fn max_branch_picks_highest_tag() {
        assert_eq!(DependencySet::independent().max_branch(), None);
        assert_eq!(branches(&[3, 1, 7]).max_branch(), Some(BranchId(7)));
    }

    #[test]
    fn from_branch_and_contains() {
        let ds = DependencySet::from_branch(BranchId(5));
        assert!(ds.contains(BranchId(5)));
        assert!(!ds.contains(BranchId(6)));
        assert!(!ds.is_independent());
    }

    #[test]
    fn from_axiom_alone_is_not_independent() {
        let ds = DependencySet::from_axiom(AxiomId(1));
        assert!(!ds.is_independent());
        assert_eq!(ds.max_branch(), None);
    }
}
