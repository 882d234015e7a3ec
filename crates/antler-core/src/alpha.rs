//! # Alpha Layer
//!
//! Single-condition filter nodes over facts.
//!
//! One alpha node exists per structurally distinct single-atom
//! condition; every rule whose atom matches reuses the same node, so
//! identical filtering work executes exactly once regardless of how many
//! rules reference it. The generic and reflexive variants are one type
//! parameterized by a condition kind, with the scan strategy chosen at
//! construction.

use crate::fact::{Fact, FactPosition};
use crate::graph::FactGraph;
use crate::rule::{AtomArg, RuleAtom};
use crate::types::{NodeId, RoleId};
use std::collections::BTreeSet;

/// The condition kind of an alpha node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionKind {
    /// Matches any fact of the role, subject to fixed-argument
    /// constraints.
    Generic,
    /// Matches only self-loop facts of the role.
    Reflexive,
}

/// A single-condition filter node with its match memory.
///
/// Shared, read-mostly, across every rule whose single-atom condition is
/// structurally identical; mutation is limited to the match memory
/// maintained by `activate`/`deactivate`.
#[derive(Debug, Clone)]
pub struct AlphaNode {
    role: RoleId,
    kind: ConditionKind,
    /// Fixed subject argument, if the atom pinned one.
    subject: Option<NodeId>,
    /// Fixed object argument, if the atom pinned one.
    object: Option<NodeId>,
    /// Match memory, in activation order, deduplicated by fact identity.
    memory: Vec<Fact>,
}

impl AlphaNode {
    /// A generic node over `role`, optionally pinning either endpoint.
    #[must_use]
    pub const fn generic(role: RoleId, subject: Option<NodeId>, object: Option<NodeId>) -> Self {
        Self {
            role,
            kind: ConditionKind::Generic,
            subject,
            object,
            memory: Vec::new(),
        }
    }

    /// A reflexive node over `role`.
    #[must_use]
    pub const fn reflexive(role: RoleId) -> Self {
        Self {
            role,
            kind: ConditionKind::Reflexive,
            subject: None,
            object: None,
            memory: Vec::new(),
        }
    }

    /// The role this node filters on.
    #[must_use]
    pub const fn role(&self) -> RoleId {
        self.role
    }

    /// The condition kind of this node.
    #[must_use]
    pub const fn kind(&self) -> ConditionKind {
        self.kind
    }

    /// The current match memory, in activation order.
    #[must_use]
    pub fn memory(&self) -> &[Fact] {
        &self.memory
    }

    fn accepts(&self, fact: &Fact) -> bool {
        if fact.role != self.role {
            return false;
        }
        match self.kind {
            ConditionKind::Reflexive => fact.is_self_loop(),
            ConditionKind::Generic => {
                self.subject.is_none_or(|s| fact.subject == s)
                    && self.object.is_none_or(|o| fact.object == o)
            }
        }
    }

    /// Test this node's condition against `fact`; on success register it
    /// in the match memory and return `true` so the caller can propagate.
    ///
    /// A `false` return is the precondition-violation path, not an
    /// error: the caller pre-filters by role and kind before activating.
    pub fn activate(&mut self, fact: &Fact) -> bool {
        if !self.accepts(fact) {
            return false;
        }
        if !self.memory.iter().any(|m| m.key() == fact.key()) {
            self.memory.push(fact.clone());
        }
        true
    }

    /// Drop a retracted fact from the match memory.
    pub fn deactivate(&mut self, fact: &Fact) {
        self.memory.retain(|m| m.key() != fact.key());
    }

    /// Full enumeration of all currently matching facts.
    ///
    /// Generic nodes scan the role's fact set (both orientations when an
    /// inverse is declared). Reflexive nodes iterate individuals and
    /// probe their self-edges; the role's edge set is never scanned and
    /// filtered afterward, which would be asymptotically worse for
    /// sparse self-loop predicates.
    #[must_use]
    pub fn matches_in(&self, graph: &FactGraph) -> Vec<Fact> {
        match self.kind {
            ConditionKind::Generic => {
                let mut facts = graph.facts_with_role(self.role);
                if let Some(inverse) = graph.inverse_of(self.role) {
                    facts.extend(
                        graph
                            .facts_with_role(inverse)
                            .into_iter()
                            .map(|f| f.reoriented(self.role)),
                    );
                }
                self.constrained(facts)
            }
            ConditionKind::Reflexive => graph
                .individuals()
                .filter_map(|ind| self.self_probe(graph, ind))
                .collect(),
        }
    }

    /// Indexed retrieval of matches with one bound endpoint.
    ///
    /// Probes the (node, role) adjacency index so that incremental joins
    /// avoid rescanning the whole node when one side of a pattern is
    /// already bound.
    #[must_use]
    pub fn matches_with(
        &self,
        graph: &FactGraph,
        position: FactPosition,
        bound: NodeId,
    ) -> Vec<Fact> {
        match self.kind {
            // A reflexive match binds both endpoints at once.
            ConditionKind::Reflexive => self.self_probe(graph, bound).into_iter().collect(),
            ConditionKind::Generic => {
                let inverse = graph.inverse_of(self.role);
                let mut facts = match position {
                    FactPosition::Subject => graph.facts_from(bound, self.role),
                    FactPosition::Object => graph.facts_to(bound, self.role),
                };
                if let Some(inverse) = inverse {
                    let flipped = match position {
                        FactPosition::Subject => graph.facts_to(bound, inverse),
                        FactPosition::Object => graph.facts_from(bound, inverse),
                    };
                    facts.extend(flipped.into_iter().map(|f| f.reoriented(self.role)));
                }
                self.constrained(facts)
            }
        }
    }

    /// Compile-time reuse test: can this node serve `atom`?
    ///
    /// A reflexive-shaped atom matches only a reflexive node and never a
    /// generic one, and vice versa. Fixed arguments must agree exactly.
    #[must_use]
    pub fn matches_atom(&self, atom: &RuleAtom) -> bool {
        let Some(role) = atom.role() else {
            return false;
        };
        if role != self.role {
            return false;
        }
        let Some((subject, object)) = atom.binary_args() else {
            return false;
        };

        match self.kind {
            ConditionKind::Reflexive => atom.is_reflexive_shaped(),
            ConditionKind::Generic => {
                !atom.is_reflexive_shaped()
                    && Self::arg_agrees(subject, self.subject)
                    && Self::arg_agrees(object, self.object)
            }
        }
    }

    fn arg_agrees(arg: &AtomArg, fixed: Option<NodeId>) -> bool {
        match arg {
            AtomArg::Variable(_) => fixed.is_none(),
            AtomArg::Const(node) => fixed == Some(*node),
        }
    }

    /// Probe the self-loop of one individual, trying the inverse
    /// orientation when the direct probe misses.
    fn self_probe(&self, graph: &FactGraph, node: NodeId) -> Option<Fact> {
        graph.self_fact(node, self.role).or_else(|| {
            graph
                .inverse_of(self.role)
                .and_then(|inv| graph.self_fact(node, inv))
                .map(|f| f.reoriented(self.role))
        })
    }

    /// Apply fixed-argument constraints and deduplicate by fact
    /// identity (a symmetric assertion can reach the same match through
    /// both orientations).
    fn constrained(&self, facts: Vec<Fact>) -> Vec<Fact> {
        let mut seen = BTreeSet::new();
        facts
            .into_iter()
            .filter(|f| {
                self.subject.is_none_or(|s| f.subject == s)
                    && self.object.is_none_or(|o| f.object == o)
                    && seen.insert(f.key())
            })
            .collect()
    }
}

// =============================================================================
// TESTS
// =============================================================================
