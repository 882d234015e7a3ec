//! # Fact Model
//!
//! Immutable assertions in working memory.
//!
//! A fact is one asserted or derived edge (subject, role, object) plus
//! the dependency set recording which search branches it rests on.
//! Retraction cascades (invalidating tokens whose chain includes a
//! retracted fact) are owned by the surrounding truth-maintenance
//! engine; this module only makes the cascade decidable via
//! `depends_on`.

use crate::depends::DependencySet;
use crate::types::{BranchId, NodeId, RoleId};
use serde::{Deserialize, Serialize};

// =============================================================================
// POSITIONS
// =============================================================================

/// One of the two bound endpoint positions of a fact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FactPosition {
    /// The `from` endpoint.
    Subject,
    /// The `to` endpoint.
    Object,
}

// =============================================================================
// FACT
// =============================================================================

/// A working-memory element: one edge between two nodes.
///
/// Immutable once created. The matching identity of a fact is its
/// (subject, role, object) triple; the dependency set is carried
/// alongside for justification folding, not identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fact {
    /// The `from` node.
    pub subject: NodeId,
    /// The role (binary predicate) of this edge.
    pub role: RoleId,
    /// The `to` node (individual or literal).
    pub object: NodeId,
    /// The branches and axioms this assertion rests on.
    pub depends: DependencySet,
}

impl Fact {
    /// Create a new fact.
    #[must_use]
    pub const fn new(subject: NodeId, role: RoleId, object: NodeId, depends: DependencySet) -> Self {
        Self {
            subject,
            role,
            object,
            depends,
        }
    }

    /// Create a fact that depends on nothing.
    #[must_use]
    pub fn independent(subject: NodeId, role: RoleId, object: NodeId) -> Self {
        Self::new(subject, role, object, DependencySet::independent())
    }

    /// The matching identity of this fact.
    #[must_use]
    pub const fn key(&self) -> (NodeId, RoleId, NodeId) {
        (self.subject, self.role, self.object)
    }

    /// The node bound at `position`.
    #[must_use]
    pub const fn arg(&self, position: FactPosition) -> NodeId {
        match position {
            FactPosition::Subject => self.subject,
            FactPosition::Object => self.object,
        }
    }

    /// Check whether this fact is a self-loop (subject == object).
    #[must_use]
    pub fn is_self_loop(&self) -> bool {
        self.subject == self.object
    }

    /// Check whether this fact's validity rests on `branch`.
    #[must_use]
    pub fn depends_on(&self, branch: BranchId) -> bool {
        self.depends.contains(branch)
    }

    /// The same edge viewed through the inverse role: endpoints swapped,
    /// dependency set carried over.
    #[must_use]
    pub fn reoriented(&self, role: RoleId) -> Self {
        Self::new(self.object, role, self.subject, self.depends.clone())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arg_selects_endpoint() {
        let fact = Fact::independent(NodeId(1), RoleId(0), NodeId(2));
        assert_eq!(fact.arg(FactPosition::Subject), NodeId(1));
        assert_eq!(fact.arg(FactPosition::Object), NodeId(2));
    }

    #[test]
    fn self_loop_detection() {
        assert!(Fact::independent(NodeId(3), RoleId(0), NodeId(3)).is_self_loop());
        assert!(!Fact::independent(NodeId(3), RoleId(0), NodeId(4)).is_self_loop());
    }

    #[test]
    fn depends_on_consults_dependency_set() {
        let ds = DependencySet::from_branch(BranchId(2));
        let fact = Fact::new(NodeId(1), RoleId(0), NodeId(2), ds);
        assert!(fact.depends_on(BranchId(2)));
        assert!(!fact.depends_on(BranchId(3)));
    }

    #[test]
    fn reoriented_swaps_endpoints_and_keeps_depends() {
        let ds = DependencySet::from_branch(BranchId(1));
        let fact = Fact::new(NodeId(1), RoleId(0), NodeId(2), ds.clone());
        let flipped = fact.reoriented(RoleId(9));

        assert_eq!(flipped.subject, NodeId(2));
        assert_eq!(flipped.object, NodeId(1));
        assert_eq!(flipped.role, RoleId(9));
        assert_eq!(flipped.depends, ds);
    }
}
