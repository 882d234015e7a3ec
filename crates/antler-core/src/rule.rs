//! # Rule Vocabulary
//!
//! The compile-time input consumed by network construction: a rule is an
//! ordered list of atoms over roles, variables, constants and built-in
//! predicates. Rule parsing from any surface syntax is an external
//! collaborator concern; this module is the already-parsed form.

use crate::types::{NodeId, RoleId};
use serde::{Deserialize, Serialize};

/// An argument of a rule atom.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AtomArg {
    /// A named variable, bound by pattern position.
    Variable(String),
    /// A node fixed at compile time.
    Const(NodeId),
}

impl AtomArg {
    /// Convenience constructor for a variable argument.
    #[must_use]
    pub fn var(name: impl Into<String>) -> Self {
        Self::Variable(name.into())
    }
}

/// One atom of a rule body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleAtom {
    /// A role atom between individuals: role(subject, object).
    Property {
        role: RoleId,
        subject: AtomArg,
        object: AtomArg,
    },
    /// A datatype-valued role atom: role(subject, literal).
    Datavalued {
        role: RoleId,
        subject: AtomArg,
        object: AtomArg,
    },
    /// A built-in predicate atom over literal arguments.
    BuiltIn { name: String, args: Vec<AtomArg> },
}

impl RuleAtom {
    /// The binary arguments of a pattern atom, if this is one.
    #[must_use]
    pub const fn binary_args(&self) -> Option<(&AtomArg, &AtomArg)> {
        match self {
            Self::Property {
                subject, object, ..
            }
            | Self::Datavalued {
                subject, object, ..
            } => Some((subject, object)),
            Self::BuiltIn { .. } => None,
        }
    }

    /// The role of a pattern atom, if this is one.
    #[must_use]
    pub const fn role(&self) -> Option<RoleId> {
        match self {
            Self::Property { role, .. } | Self::Datavalued { role, .. } => Some(*role),
            Self::BuiltIn { .. } => None,
        }
    }

    /// A reflexive-shaped atom: a binary atom whose second argument is
    /// syntactically identical to its first, which is a variable.
    #[must_use]
    pub fn is_reflexive_shaped(&self) -> bool {
        match self.binary_args() {
            Some((AtomArg::Variable(subject), object)) => {
                matches!(object, AtomArg::Variable(name) if name == subject)
            }
            _ => false,
        }
    }
}

/// A rule: a name and an ordered atom list, supplied once at compile
/// time. Consequent application is the caller's concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Name of the rule, echoed on every instantiation it produces.
    pub name: String,
    /// The body atoms, matched in order.
    pub body: Vec<RuleAtom>,
}

impl Rule {
    /// Create a new rule.
    #[must_use]
    pub fn new(name: impl Into<String>, body: Vec<RuleAtom>) -> Self {
        Self {
            name: name.into(),
            body,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
