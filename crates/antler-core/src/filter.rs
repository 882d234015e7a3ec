//! # Filter Conditions
//!
//! Built-in predicate filters wired between joins.
//!
//! A filter condition pairs a built-in predicate with an ordered list of
//! node providers, each resolving one argument from either the candidate
//! fact being tested or an already-bound token position. Construction
//! with an incomplete provider list fails fatally; a misconfigured
//! filter must never silently pass.
//!
//! Two filter conditions with the same predicate and the same ordered
//! provider list are interchangeable; the network builder deduplicates
//! them the same way it deduplicates alpha nodes.

use crate::builtins::BuiltIn;
use crate::fact::{Fact, FactPosition};
use crate::graph::FactGraph;
use crate::token::Token;
use crate::types::{AntlerError, NodeId};
use serde::{Deserialize, Serialize};

// =============================================================================
// NODE PROVIDERS
// =============================================================================

/// Resolves one bound argument position of a candidate match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NodeProvider {
    /// A node fixed at compile time.
    Constant(NodeId),
    /// A component of the candidate fact under test.
    FactArg(FactPosition),
    /// A component of an earlier matched fact in the token chain.
    TokenArg {
        /// Chain index of the referenced fact.
        index: usize,
        /// Which endpoint of that fact.
        position: FactPosition,
    },
}

impl NodeProvider {
    /// Resolve this provider against a candidate fact and its token.
    ///
    /// A token reference outside the chain surfaces the bounds error
    /// unchanged: it signals a compiler defect, not runtime data.
    pub fn resolve(&self, fact: &Fact, token: Option<&Token>) -> Result<NodeId, AntlerError> {
        match *self {
            Self::Constant(node) => Ok(node),
            Self::FactArg(position) => Ok(fact.arg(position)),
            Self::TokenArg { index, position } => match token {
                Some(token) => Ok(token.get(index)?.arg(position)),
                None => Err(AntlerError::TokenIndexOutOfBounds { index, len: 0 }),
            },
        }
    }
}

// =============================================================================
// FILTER CONDITION
// =============================================================================

/// A built-in predicate over an ordered list of argument providers.
///
/// Equality and hashing cover both the predicate and the provider list,
/// which is what makes structurally identical filters shareable across
/// rules.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FilterCondition {
    builtin: BuiltIn,
    providers: Vec<NodeProvider>,
}

impl FilterCondition {
    /// Create a filter condition.
    ///
    /// Fails with a configuration error if the provider list does not
    /// cover the predicate's arity. This is checked here, at
    /// construction, never deferred to `test`.
    pub fn new(builtin: BuiltIn, providers: Vec<NodeProvider>) -> Result<Self, AntlerError> {
        if providers.len() != builtin.arity() {
            return Err(AntlerError::MissingProvider {
                builtin: builtin.name().to_string(),
                expected: builtin.arity(),
                found: providers.len(),
            });
        }
        Ok(Self { builtin, providers })
    }

    /// The predicate this filter evaluates.
    #[must_use]
    pub const fn builtin(&self) -> BuiltIn {
        self.builtin
    }

    /// Evaluate the filter for a candidate fact and its token chain.
    ///
    /// Each provider resolves to a node; the predicate is applied to the
    /// literal values of the resolved nodes. A binding that is not a
    /// literal never satisfies the predicate.
    pub fn test(
        &self,
        graph: &FactGraph,
        fact: &Fact,
        token: Option<&Token>,
    ) -> Result<bool, AntlerError> {
        let mut values = Vec::with_capacity(self.providers.len());
        for provider in &self.providers {
            let node = provider.resolve(fact, token)?;
            match graph.literal(node) {
                Some(value) => values.push(value.clone()),
                None => return Ok(false),
            }
        }
        Ok(self.builtin.apply(&values))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LiteralValue;

    struct Fixture {
        graph: FactGraph,
        fact3: Fact,
        fact5: Fact,
    }

    /// Two datatype facts: (x, hasValue, 3) and (y, hasValue, 5).
    fn fixture() -> Fixture {
        let mut graph = FactGraph::new();
        let role = graph.add_role("hasValue");
        let x = graph.add_individual();
        let y = graph.add_individual();
        let three = graph.add_literal(LiteralValue::Int(3));
        let five = graph.add_literal(LiteralValue::Int(5));

        let fact3 = Fact::independent(x, role, three);
        let fact5 = Fact::independent(y, role, five);
        graph.add_fact(fact3.clone()).expect("add");
        graph.add_fact(fact5.clone()).expect("add");

        Fixture { graph, fact3, fact5 }
    }

    fn token_pair_filter() -> FilterCondition {
        FilterCondition::new(
            BuiltIn::LessThan,
            vec![
                NodeProvider::TokenArg {
                    index: 0,
                    position: FactPosition::Object,
                },
                NodeProvider::TokenArg {
                    index: 1,
                    position: FactPosition::Object,
                },
            ],
        )
        .expect("two providers cover the arity")
    }

    #[test]
    fn missing_provider_fails_at_construction() {
        let result = FilterCondition::new(
            BuiltIn::LessThan,
            vec![NodeProvider::FactArg(FactPosition::Object)],
        );
        assert!(matches!(
            result,
            Err(AntlerError::MissingProvider { found: 1, .. })
        ));
    }

    #[test]
    fn less_than_over_token_positions() {
        let fix = fixture();
        let filter = token_pair_filter();

        // Token [3, 5]: lessThan(3, 5) holds.
        let t0 = Token::create(fix.fact3.clone(), None);
        let ascending = Token::create(fix.fact5.clone(), Some(&t0));
        assert!(filter
            .test(&fix.graph, ascending.fact(), Some(&ascending))
            .expect("test"));

        // Token [5, 3]: lessThan(5, 3) fails.
        let t0 = Token::create(fix.fact5.clone(), None);
        let descending = Token::create(fix.fact3.clone(), Some(&t0));
        assert!(!filter
            .test(&fix.graph, descending.fact(), Some(&descending))
            .expect("test"));
    }

    #[test]
    fn fact_arg_provider_reads_candidate() {
        let fix = fixture();
        let filter = FilterCondition::new(
            BuiltIn::LessThan,
            vec![
                NodeProvider::FactArg(FactPosition::Object),
                NodeProvider::Constant(fix.fact5.object),
            ],
        )
        .expect("filter");

        assert!(filter.test(&fix.graph, &fix.fact3, None).expect("test"));
        assert!(!filter.test(&fix.graph, &fix.fact5, None).expect("test"));
    }

    #[test]
    fn non_literal_binding_never_passes() {
        let fix = fixture();
        let filter = FilterCondition::new(
            BuiltIn::Equal,
            vec![
                NodeProvider::FactArg(FactPosition::Subject),
                NodeProvider::FactArg(FactPosition::Subject),
            ],
        )
        .expect("filter");

        // Subject is an individual, not a literal.
        assert!(!filter.test(&fix.graph, &fix.fact3, None).expect("test"));
    }

    #[test]
    fn token_reference_without_token_is_a_defect() {
        let fix = fixture();
        let filter = token_pair_filter();
        let result = filter.test(&fix.graph, &fix.fact3, None);
        assert!(result.is_err());
    }

    #[test]
    fn structurally_identical_filters_are_equal() {
        assert_eq!(token_pair_filter(), token_pair_filter());

        let other = FilterCondition::new(
            BuiltIn::GreaterThan,
            vec![
                NodeProvider::TokenArg {
                    index: 0,
                    position: FactPosition::Object,
                },
                NodeProvider::TokenArg {
                    index: 1,
                    position: FactPosition::Object,
                },
            ],
        )
        .expect("filter");
        assert_ne!(token_pair_filter(), other);
    }
}
