//! # Token Chain
//!
//! The partial-match accumulator: an ordered, immutable sequence of
//! facts representing one partial or complete rule instantiation.
//!
//! Tokens are built only by extension. Each link stores its fact, its
//! fixed chain index, and a reference-counted parent, so appending is
//! O(1) and a parent chain is safely shared as the common prefix of many
//! children. Indexed access walks the chain, which is bounded by the
//! rule body length.

use crate::depends::DependencySet;
use crate::fact::Fact;
use crate::types::{AntlerError, BranchId};
use std::rc::Rc;

/// One link of a partial-match chain.
///
/// Never mutated after creation; `Token::create` is the only
/// constructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    fact: Fact,
    parent: Option<Rc<Token>>,
    index: usize,
}

impl Token {
    /// Append `fact` after `parent`'s chain, or start a new chain.
    ///
    /// The index of the new link is fixed here and never renumbered:
    /// dense, starting at 0, increasing by one per extension.
    #[must_use]
    pub fn create(fact: Fact, parent: Option<&Rc<Token>>) -> Rc<Self> {
        let index = parent.map_or(0, |p| p.index.saturating_add(1));
        Rc::new(Self {
            fact,
            parent: parent.cloned(),
            index,
        })
    }

    /// Number of facts in this chain.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.index + 1
    }

    /// A chain always holds at least the fact it was created with.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// The fact appended by this link (the highest-indexed element).
    #[must_use]
    pub const fn fact(&self) -> &Fact {
        &self.fact
    }

    /// The fact at `index` in the chain.
    ///
    /// An out-of-bounds index signals a network-compiler defect upstream;
    /// the returned error must be treated as unrecoverable, never caught
    /// and continued past.
    pub fn get(&self, index: usize) -> Result<&Fact, AntlerError> {
        for link in self.chain() {
            if link.index == index {
                return Ok(&link.fact);
            }
        }
        Err(AntlerError::TokenIndexOutOfBounds {
            index,
            len: self.len(),
        })
    }

    /// Fold the dependency sets of every fact in the chain via union.
    ///
    /// With `explain` set, per-axiom justification detail is retained
    /// (heavier); otherwise the result summarizes to branch-tag
    /// membership only. Callers choose based on whether a user-facing
    /// explanation will be produced.
    #[must_use]
    pub fn depends(&self, explain: bool) -> DependencySet {
        self.chain().fold(DependencySet::independent(), |ds, link| {
            ds.union(&link.fact.depends, explain)
        })
    }

    /// Check whether any fact in the chain depends on `branch`.
    ///
    /// Used by backjumping to decide whether retracting a branch
    /// invalidates this match.
    #[must_use]
    pub fn depends_on(&self, branch: BranchId) -> bool {
        self.chain().any(|link| link.fact.depends_on(branch))
    }

    /// The facts of this chain in index order, 0 first.
    #[must_use]
    pub fn facts(&self) -> Vec<Fact> {
        let mut facts: Vec<Fact> = self.chain().map(|link| link.fact.clone()).collect();
        facts.reverse();
        facts
    }

    /// Walk the chain from this link back to the root.
    fn chain(&self) -> impl Iterator<Item = &Token> {
        let mut next = Some(self);
        std::iter::from_fn(move || {
            let current = next?;
            next = current.parent.as_deref();
            Some(current)
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
