//! # Core Type Definitions
//!
//! Identifiers and value types for the Antler matching core:
//! - Knowledge-base identifiers (`NodeId`, `RoleId`)
//! - Nonmonotonic bookkeeping identifiers (`BranchId`, `AxiomId`)
//! - Node and role records (`Node`, `NodeKind`, `LiteralValue`, `Role`)
//! - Error types (`AntlerError`)
//!
//! ## Determinism Guarantees
//!
//! All types in this module:
//! - Use integer and string data only (no floating-point)
//! - Implement `Ord` for deterministic ordering in `BTreeMap`/`BTreeSet`

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use thiserror::Error;

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Unique identifier for a node (individual or literal) in working memory.
///
/// Nodes are owned by the fact graph arena; facts and tokens reference
/// them by id only, never by embedded back-reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u64);

/// Unique identifier for a role (binary predicate).
///
/// Roles are registered once in the fact graph and shared by id across
/// every fact and alpha node that uses them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RoleId(pub u32);

/// Identifier of a nonmonotonic choice point made during tableau search.
///
/// Dependency sets record branch membership so that retracting a branch
/// can invalidate exactly the matches that rested on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BranchId(pub u32);

/// Identifier of an origin axiom, retained only when explanation detail
/// is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AxiomId(pub u64);

// =============================================================================
// LITERAL VALUES
// =============================================================================

/// Concrete value carried by a literal node.
///
/// Integer arithmetic only; there is deliberately no float variant.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LiteralValue {
    /// Integer literal.
    Int(i64),
    /// String literal.
    Str(String),
    /// Boolean literal.
    Bool(bool),
}

impl LiteralValue {
    /// Compare two literal values of the same kind.
    ///
    /// Returns `None` for mixed-kind pairs; built-in predicates treat an
    /// incomparable pair as unsatisfied rather than guessing a coercion.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => Some(a.cmp(b)),
            (Self::Str(a), Self::Str(b)) => Some(a.cmp(b)),
            (Self::Bool(a), Self::Bool(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

// =============================================================================
// NODE
// =============================================================================

/// Kind of a node in working memory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    /// A named or anonymous individual.
    Individual,
    /// A literal value.
    Literal(LiteralValue),
}

/// A node in working memory, representing an individual or a literal.
///
/// Immutable once created; owned by the fact graph, referenced by id
/// from facts and tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// The arena identifier of this node.
    pub id: NodeId,
    /// Whether this node is an individual or a literal.
    pub kind: NodeKind,
}

impl Node {
    /// Create a new node.
    #[must_use]
    pub const fn new(id: NodeId, kind: NodeKind) -> Self {
        Self { id, kind }
    }

    /// Check whether this node is an individual.
    #[must_use]
    pub const fn is_individual(&self) -> bool {
        matches!(self.kind, NodeKind::Individual)
    }

    /// The literal value of this node, if it is a literal.
    #[must_use]
    pub const fn literal(&self) -> Option<&LiteralValue> {
        match &self.kind {
            NodeKind::Literal(value) => Some(value),
            NodeKind::Individual => None,
        }
    }
}

// =============================================================================
// ROLE
// =============================================================================

/// A binary predicate over nodes.
///
/// A role may declare an inverse; an edge asserted under the inverse role
/// is visible, reoriented, to queries over this role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// The registry identifier of this role.
    pub id: RoleId,
    /// Human-readable name of the predicate.
    pub name: String,
    /// The inverse role, if one has been declared.
    pub inverse: Option<RoleId>,
}

impl Role {
    /// Create a new role with no inverse.
    #[must_use]
    pub const fn new(id: RoleId, name: String) -> Self {
        Self {
            id,
            name,
            inverse: None,
        }
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the Antler matching core.
///
/// - No silent failures
/// - Use `Result<T, AntlerError>` for fallible operations
/// - The core never panics; all errors are surfaced explicitly
///
/// No operation in this core is retried: matching is deterministic and
/// side-effect-free for a fixed working-memory snapshot, so every error
/// below signals a caller or compiler defect, not a transient condition.
#[derive(Debug, Error)]
pub enum AntlerError {
    /// The requested node was not found in working memory.
    #[error("Node not found: {0:?}")]
    NodeNotFound(NodeId),

    /// The requested role was not registered.
    #[error("Role not found: {0:?}")]
    RoleNotFound(RoleId),

    /// A filter condition was constructed with an incomplete provider list.
    /// Fatal at construction; never delayed to evaluation time.
    #[error("Built-in {builtin} expects {expected} argument providers, {found} supplied")]
    MissingProvider {
        builtin: String,
        expected: usize,
        found: usize,
    },

    /// A built-in atom references a variable not bound by any earlier
    /// pattern atom of the same rule.
    #[error("Variable '{0}' is not bound by an earlier pattern atom")]
    UnboundVariable(String),

    /// A rule atom is structurally invalid for compilation.
    #[error("Malformed rule atom: {0}")]
    MalformedAtom(String),

    /// A token index outside the chain. Signals a compiler defect
    /// upstream; callers must treat it as unrecoverable, never retry or
    /// continue past it.
    #[error("Token index {index} out of bounds for chain of length {len}")]
    TokenIndexOutOfBounds { index: usize, len: usize },

    /// A request for an inference kind this network cannot produce.
    /// Surfaced explicitly; never silently approximated.
    #[error("Unsupported query: {0}")]
    UnsupportedQuery(String),
}

// =============================================================================
// TESTS
// =============================================================================
