//! # antler-core
//!
//! The incremental rule-matching core for Antler - THE MATCHER.
//!
//! This crate implements the discrimination network at the heart of the
//! reasoner: shared single-condition (alpha) nodes over a fact graph,
//! partial-match token chains, built-in filter conditions and
//! nonmonotonic dependency tracking. Rules compile once; facts flow
//! incrementally, and every completed instantiation is handed back to
//! the caller together with the dependency set that justifies it.
//!
//! ## Architectural Constraints
//!
//! The core:
//! - Is single-threaded and synchronous; no operation suspends
//! - Is deterministic: ordered maps only, no hashing-order dependence
//! - Matches only; applying rule consequents and cascading retractions
//!   are the surrounding tableau engine's concern
//! - Has NO async, NO network dependencies (pure Rust)

// =============================================================================
// MODULES
// =============================================================================

pub mod alpha;
pub mod builtins;
pub mod depends;
pub mod fact;
pub mod filter;
pub mod graph;
pub mod network;
pub mod rule;
pub mod token;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{
    AntlerError, AxiomId, BranchId, LiteralValue, Node, NodeId, NodeKind, Role, RoleId,
};

// =============================================================================
// RE-EXPORTS: Match Engine
// =============================================================================

pub use alpha::{AlphaNode, ConditionKind};
pub use builtins::BuiltIn;
pub use depends::DependencySet;
pub use fact::{Fact, FactPosition};
pub use filter::{FilterCondition, NodeProvider};
pub use graph::FactGraph;
pub use network::{Instantiation, MatchNetwork};
pub use rule::{AtomArg, Rule, RuleAtom};
pub use token::Token;
