//! # Fact Graph
//!
//! The working-memory store for the matching core.
//!
//! Backed by an arena of stable node identifiers plus adjacency indexes
//! keyed by (node, role), so that indexed retrieval of a fact with one
//! bound endpoint is a direct probe rather than a scan. Nodes carry no
//! back-references; all relationships live in the indexes.
//!
//! All data structures use `BTreeMap`/`BTreeSet` for deterministic
//! ordering.

use crate::depends::DependencySet;
use crate::fact::Fact;
use crate::types::{AntlerError, LiteralValue, Node, NodeId, NodeKind, Role, RoleId};
use std::collections::{BTreeMap, BTreeSet};

/// Working memory: node and role arenas plus the asserted fact set.
#[derive(Debug, Clone, Default)]
pub struct FactGraph {
    /// Node storage: NodeId -> Node
    nodes: BTreeMap<NodeId, Node>,

    /// Role registry: RoleId -> Role
    roles: BTreeMap<RoleId, Role>,

    /// Asserted facts keyed by matching identity, with attached
    /// dependency set.
    facts: BTreeMap<(NodeId, RoleId, NodeId), DependencySet>,

    /// Per-role fact set: role -> (subject, object)
    by_role: BTreeMap<RoleId, BTreeSet<(NodeId, NodeId)>>,

    /// Outgoing adjacency: (subject, role) -> objects
    out_index: BTreeMap<(NodeId, RoleId), BTreeSet<NodeId>>,

    /// Incoming adjacency: (object, role) -> subjects
    in_index: BTreeMap<(NodeId, RoleId), BTreeSet<NodeId>>,

    /// Next available NodeId
    next_node_id: u64,

    /// Next available RoleId
    next_role_id: u32,
}

impl FactGraph {
    /// Create a new empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // NODE & ROLE ARENAS
    // =========================================================================

    /// Create a fresh individual node. Returns its NodeId.
    pub fn add_individual(&mut self) -> NodeId {
        self.add_node(NodeKind::Individual)
    }

    /// Create a fresh literal node carrying `value`. Returns its NodeId.
    pub fn add_literal(&mut self, value: LiteralValue) -> NodeId {
        self.add_node(NodeKind::Literal(value))
    }

    fn add_node(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.next_node_id);
        self.next_node_id = self.next_node_id.saturating_add(1);
        self.nodes.insert(id, Node::new(id, kind));
        id
    }

    /// Register a new role. Returns its RoleId.
    pub fn add_role(&mut self, name: impl Into<String>) -> RoleId {
        let id = RoleId(self.next_role_id);
        self.next_role_id = self.next_role_id.saturating_add(1);
        self.roles.insert(id, Role::new(id, name.into()));
        id
    }

    /// Declare two roles as inverses of each other.
    pub fn set_inverse(&mut self, role: RoleId, inverse: RoleId) -> Result<(), AntlerError> {
        if !self.roles.contains_key(&role) {
            return Err(AntlerError::RoleNotFound(role));
        }
        if !self.roles.contains_key(&inverse) {
            return Err(AntlerError::RoleNotFound(inverse));
        }
        if let Some(r) = self.roles.get_mut(&role) {
            r.inverse = Some(inverse);
        }
        if let Some(r) = self.roles.get_mut(&inverse) {
            r.inverse = Some(role);
        }
        Ok(())
    }

    /// Lookup a node by id.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Lookup a role by id.
    #[must_use]
    pub fn role(&self, id: RoleId) -> Option<&Role> {
        self.roles.get(&id)
    }

    /// The inverse of `role`, if one has been declared.
    #[must_use]
    pub fn inverse_of(&self, role: RoleId) -> Option<RoleId> {
        self.roles.get(&role).and_then(|r| r.inverse)
    }

    /// The literal value of a node, if the node exists and is a literal.
    #[must_use]
    pub fn literal(&self, id: NodeId) -> Option<&LiteralValue> {
        self.nodes.get(&id).and_then(Node::literal)
    }

    /// Iterate all individual nodes in deterministic order.
    pub fn individuals(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .values()
            .filter(|n| n.is_individual())
            .map(|n| n.id)
    }

    /// Total number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Total number of asserted facts.
    #[must_use]
    pub fn fact_count(&self) -> usize {
        self.facts.len()
    }

    // =========================================================================
    // FACT MUTATION
    // =========================================================================

    /// Assert a fact into working memory.
    ///
    /// Returns `true` if the fact was new, `false` if the same triple was
    /// already asserted (the existing dependency set is kept; merging
    /// justifications for re-derived edges belongs to the surrounding
    /// truth-maintenance engine). Both endpoints and the role must exist.
    pub fn add_fact(&mut self, fact: Fact) -> Result<bool, AntlerError> {
        if !self.nodes.contains_key(&fact.subject) {
            return Err(AntlerError::NodeNotFound(fact.subject));
        }
        if !self.nodes.contains_key(&fact.object) {
            return Err(AntlerError::NodeNotFound(fact.object));
        }
        if !self.roles.contains_key(&fact.role) {
            return Err(AntlerError::RoleNotFound(fact.role));
        }
        if self.facts.contains_key(&fact.key()) {
            return Ok(false);
        }

        self.by_role
            .entry(fact.role)
            .or_default()
            .insert((fact.subject, fact.object));
        self.out_index
            .entry((fact.subject, fact.role))
            .or_default()
            .insert(fact.object);
        self.in_index
            .entry((fact.object, fact.role))
            .or_default()
            .insert(fact.subject);
        self.facts.insert(fact.key(), fact.depends);

        Ok(true)
    }

    /// Retract a fact from working memory.
    ///
    /// Returns `true` if the triple was present. The token invalidation
    /// cascade is driven by the surrounding engine, not here.
    pub fn remove_fact(
        &mut self,
        subject: NodeId,
        role: RoleId,
        object: NodeId,
    ) -> Result<bool, AntlerError> {
        if self.facts.remove(&(subject, role, object)).is_none() {
            return Ok(false);
        }

        // Emptied entries are dropped so the index maps do not grow
        // monotonically across assert/retract cycles.
        if let Some(set) = self.by_role.get_mut(&role) {
            set.remove(&(subject, object));
            if set.is_empty() {
                self.by_role.remove(&role);
            }
        }
        if let Some(set) = self.out_index.get_mut(&(subject, role)) {
            set.remove(&object);
            if set.is_empty() {
                self.out_index.remove(&(subject, role));
            }
        }
        if let Some(set) = self.in_index.get_mut(&(object, role)) {
            set.remove(&subject);
            if set.is_empty() {
                self.in_index.remove(&(object, role));
            }
        }

        Ok(true)
    }

    // =========================================================================
    // FACT RETRIEVAL
    // =========================================================================

    /// Check whether a triple is asserted.
    #[must_use]
    pub fn contains_fact(&self, subject: NodeId, role: RoleId, object: NodeId) -> bool {
        self.facts.contains_key(&(subject, role, object))
    }

    /// Reconstruct the asserted fact for a triple, if present.
    #[must_use]
    pub fn fact(&self, subject: NodeId, role: RoleId, object: NodeId) -> Option<Fact> {
        self.facts
            .get(&(subject, role, object))
            .map(|ds| Fact::new(subject, role, object, ds.clone()))
    }

    /// All facts asserted under `role`, in deterministic order.
    #[must_use]
    pub fn facts_with_role(&self, role: RoleId) -> Vec<Fact> {
        self.by_role
            .get(&role)
            .into_iter()
            .flat_map(|set| set.iter())
            .filter_map(|&(s, o)| self.fact(s, role, o))
            .collect()
    }

    /// Facts under `role` whose subject is `node`. Direct index probe.
    #[must_use]
    pub fn facts_from(&self, node: NodeId, role: RoleId) -> Vec<Fact> {
        self.out_index
            .get(&(node, role))
            .into_iter()
            .flat_map(|objects| objects.iter())
            .filter_map(|&o| self.fact(node, role, o))
            .collect()
    }

    /// Facts under `role` whose object is `node`. Direct index probe.
    #[must_use]
    pub fn facts_to(&self, node: NodeId, role: RoleId) -> Vec<Fact> {
        self.in_index
            .get(&(node, role))
            .into_iter()
            .flat_map(|subjects| subjects.iter())
            .filter_map(|&s| self.fact(s, role, node))
            .collect()
    }

    /// Probe the self-loop edge of `node` under `role`, if asserted.
    ///
    /// O(log n) probe; used by the reflexive scan strategy so that sparse
    /// self-loop predicates never pay for a full edge scan.
    #[must_use]
    pub fn self_fact(&self, node: NodeId, role: RoleId) -> Option<Fact> {
        self.fact(node, role, node)
    }
}

// =============================================================================
// TESTS
// =============================================================================
