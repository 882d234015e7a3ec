//! # Network Construction & Propagation
//!
//! Compiles rule atom lists into shared alpha nodes and deduplicated
//! filter conditions, and drives incremental matching as working memory
//! mutates.
//!
//! Sharing discipline: before creating an alpha node for a pattern atom,
//! every existing node is probed via its compile-time `matches_atom`
//! test; a hit attaches the rule to the existing node instead of
//! duplicating the filter work. Filter conditions are deduplicated by
//! structural equality the same way.
//!
//! Propagation is seeded: a newly asserted fact is pinned at each
//! pattern position whose alpha it activated, and the remaining
//! positions are resolved through indexed retrieval over the shared
//! alpha nodes, pruned by join tests and filter conditions. Completed
//! tokens are returned to the caller, who owns consequent application.

use crate::alpha::AlphaNode;
use crate::builtins::BuiltIn;
use crate::depends::DependencySet;
use crate::fact::{Fact, FactPosition};
use crate::filter::{FilterCondition, NodeProvider};
use crate::graph::FactGraph;
use crate::rule::{AtomArg, Rule, RuleAtom};
use crate::token::Token;
use crate::types::{AntlerError, LiteralValue, NodeId, RoleId};
use std::collections::BTreeMap;
use std::rc::Rc;

// =============================================================================
// INSTANTIATION
// =============================================================================

/// A completed rule match, delivered to the consequent-application
/// collaborator (the caller of `add_fact`).
#[derive(Debug, Clone)]
pub struct Instantiation {
    /// Name of the rule that matched.
    pub rule: String,
    /// The completed token chain, one fact per pattern atom.
    pub token: Rc<Token>,
    /// The merged dependency set of the whole chain. Carries axiom
    /// detail only when explanation mode is enabled.
    pub depends: DependencySet,
}

// =============================================================================
// COMPILED FORM
// =============================================================================

/// Equality test between the candidate fact's endpoint and an earlier
/// token position, induced by a shared rule variable.
#[derive(Debug, Clone)]
struct JoinTest {
    /// Endpoint of the candidate fact.
    position: FactPosition,
    /// Chain index of the earlier fact.
    token_index: usize,
    /// Endpoint of that earlier fact.
    token_position: FactPosition,
}

/// One pattern position of a compiled rule.
#[derive(Debug, Clone)]
struct Pattern {
    /// Index of the shared alpha node serving this position.
    alpha: usize,
    /// Variable-equality tests against earlier positions.
    join_tests: Vec<JoinTest>,
    /// Shared filter conditions evaluated once this position binds.
    filters: Vec<usize>,
}

#[derive(Debug, Clone)]
struct CompiledRule {
    name: String,
    patterns: Vec<Pattern>,
}

// =============================================================================
// MATCH NETWORK
// =============================================================================

/// The discrimination network: working memory plus the shared alpha
/// layer, deduplicated filters and compiled rules.
///
/// Single-threaded by design; all operations are synchronous and
/// non-suspending, and the surrounding tableau loop may abort only
/// between discrete propagation steps.
#[derive(Debug, Clone, Default)]
pub struct MatchNetwork {
    graph: FactGraph,
    alphas: Vec<AlphaNode>,
    filters: Vec<FilterCondition>,
    rules: Vec<CompiledRule>,
    explain: bool,
}

impl MatchNetwork {
    /// Create an empty network.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable explanation mode: when enabled, instantiation
    /// dependency sets retain per-axiom justification detail.
    pub fn set_explain(&mut self, explain: bool) {
        self.explain = explain;
    }

    /// Read access to working memory.
    #[must_use]
    pub const fn graph(&self) -> &FactGraph {
        &self.graph
    }

    /// Number of alpha nodes in the network.
    #[must_use]
    pub fn alpha_count(&self) -> usize {
        self.alphas.len()
    }

    /// Number of distinct filter conditions in the network.
    #[must_use]
    pub fn filter_count(&self) -> usize {
        self.filters.len()
    }

    /// Number of compiled rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    // =========================================================================
    // WORKING-MEMORY PASSTHROUGHS
    // =========================================================================

    /// Create a fresh individual node.
    pub fn add_individual(&mut self) -> NodeId {
        self.graph.add_individual()
    }

    /// Create a fresh literal node.
    pub fn add_literal(&mut self, value: LiteralValue) -> NodeId {
        self.graph.add_literal(value)
    }

    /// Register a new role.
    pub fn add_role(&mut self, name: impl Into<String>) -> RoleId {
        self.graph.add_role(name)
    }

    /// Declare two roles as inverses.
    pub fn set_inverse(&mut self, role: RoleId, inverse: RoleId) -> Result<(), AntlerError> {
        self.graph.set_inverse(role, inverse)
    }

    // =========================================================================
    // COMPILATION
    // =========================================================================

    /// Compile a rule into the network.
    ///
    /// Pattern atoms reuse structurally identical alpha nodes; built-in
    /// atoms compile to (deduplicated) filter conditions whose providers
    /// are derived from the bindings of earlier pattern atoms. A
    /// built-in referencing an unbound variable, or naming a predicate
    /// this core cannot evaluate, fails compilation.
    pub fn compile(&mut self, rule: &Rule) -> Result<(), AntlerError> {
        let mut patterns: Vec<Pattern> = Vec::new();
        let mut bindings: BTreeMap<&str, (usize, FactPosition)> = BTreeMap::new();

        for atom in &rule.body {
            match atom {
                RuleAtom::Property { role, .. } | RuleAtom::Datavalued { role, .. } => {
                    if self.graph.role(*role).is_none() {
                        return Err(AntlerError::RoleNotFound(*role));
                    }
                    let alpha = self.ensure_alpha(atom)?;
                    let pattern_index = patterns.len();
                    let mut join_tests = Vec::new();

                    let Some((subject, object)) = atom.binary_args() else {
                        return Err(AntlerError::MalformedAtom(format!(
                            "pattern atom of rule '{}' has no binary arguments",
                            rule.name
                        )));
                    };
                    for (position, arg) in [
                        (FactPosition::Subject, subject),
                        (FactPosition::Object, object),
                    ] {
                        let AtomArg::Variable(name) = arg else {
                            continue;
                        };
                        match bindings.get(name.as_str()) {
                            // Repetition inside one atom is the
                            // reflexive shape, enforced by node kind.
                            Some(&(earlier, _)) if earlier == pattern_index => {}
                            Some(&(earlier, token_position)) => join_tests.push(JoinTest {
                                position,
                                token_index: earlier,
                                token_position,
                            }),
                            None => {
                                bindings.insert(name.as_str(), (pattern_index, position));
                            }
                        }
                    }

                    patterns.push(Pattern {
                        alpha,
                        join_tests,
                        filters: Vec::new(),
                    });
                }

                RuleAtom::BuiltIn { name, args } => {
                    let builtin = BuiltIn::from_name(name).ok_or_else(|| {
                        AntlerError::UnsupportedQuery(format!("built-in predicate '{name}'"))
                    })?;
                    if patterns.is_empty() {
                        return Err(AntlerError::MalformedAtom(format!(
                            "built-in atom of rule '{}' precedes every pattern atom",
                            rule.name
                        )));
                    }
                    let current = patterns.len() - 1;

                    let mut providers = Vec::with_capacity(args.len());
                    for arg in args {
                        providers.push(match arg {
                            AtomArg::Const(node) => NodeProvider::Constant(*node),
                            AtomArg::Variable(var) => {
                                let Some(&(index, position)) = bindings.get(var.as_str()) else {
                                    return Err(AntlerError::UnboundVariable(var.clone()));
                                };
                                if index == current {
                                    NodeProvider::FactArg(position)
                                } else {
                                    NodeProvider::TokenArg { index, position }
                                }
                            }
                        });
                    }

                    let condition = FilterCondition::new(builtin, providers)?;
                    let filter = self.ensure_filter(condition);
                    patterns[current].filters.push(filter);
                }
            }
        }

        if patterns.is_empty() {
            return Err(AntlerError::MalformedAtom(format!(
                "rule '{}' has no pattern atoms",
                rule.name
            )));
        }

        self.rules.push(CompiledRule {
            name: rule.name.clone(),
            patterns,
        });
        Ok(())
    }

    /// Find or create the alpha node for a pattern atom.
    ///
    /// New nodes are primed from the current working memory so their
    /// match memory agrees with facts asserted before the rule arrived.
    fn ensure_alpha(&mut self, atom: &RuleAtom) -> Result<usize, AntlerError> {
        if let Some(index) = self.alphas.iter().position(|a| a.matches_atom(atom)) {
            return Ok(index);
        }

        let Some(role) = atom.role() else {
            return Err(AntlerError::MalformedAtom(
                "built-in atom cannot become an alpha node".to_string(),
            ));
        };
        let mut node = if atom.is_reflexive_shaped() {
            AlphaNode::reflexive(role)
        } else {
            let Some((subject, object)) = atom.binary_args() else {
                return Err(AntlerError::MalformedAtom(
                    "pattern atom has no binary arguments".to_string(),
                ));
            };
            AlphaNode::generic(role, Self::fixed_arg(subject), Self::fixed_arg(object))
        };

        for fact in node.matches_in(&self.graph) {
            node.activate(&fact);
        }

        self.alphas.push(node);
        Ok(self.alphas.len() - 1)
    }

    const fn fixed_arg(arg: &AtomArg) -> Option<NodeId> {
        match arg {
            AtomArg::Const(node) => Some(*node),
            AtomArg::Variable(_) => None,
        }
    }

    /// Find or create a filter condition, deduplicating by structural
    /// equality.
    fn ensure_filter(&mut self, condition: FilterCondition) -> usize {
        if let Some(index) = self.filters.iter().position(|f| *f == condition) {
            return index;
        }
        self.filters.push(condition);
        self.filters.len() - 1
    }

    // =========================================================================
    // PROPAGATION
    // =========================================================================

    /// Assert a fact and propagate it through the network.
    ///
    /// Returns the rule instantiations completed by this assertion. A
    /// re-assertion of an already present triple produces nothing.
    pub fn add_fact(&mut self, fact: Fact) -> Result<Vec<Instantiation>, AntlerError> {
        if !self.graph.add_fact(fact.clone())? {
            return Ok(Vec::new());
        }

        let inverse = self.graph.inverse_of(fact.role);
        let mut activated: Vec<(usize, Fact)> = Vec::new();
        for (index, alpha) in self.alphas.iter_mut().enumerate() {
            let candidate = if alpha.role() == fact.role {
                fact.clone()
            } else if Some(alpha.role()) == inverse {
                fact.reoriented(alpha.role())
            } else {
                continue;
            };
            // An edge already visible through an earlier assertion of
            // the inverse triple derives nothing new.
            let known = alpha.memory().iter().any(|m| m.key() == candidate.key());
            if alpha.activate(&candidate) && !known {
                activated.push((index, candidate));
            }
        }

        let mut out = Vec::new();
        for rule in &self.rules {
            for (position, pattern) in rule.patterns.iter().enumerate() {
                for (alpha_index, candidate) in &activated {
                    if *alpha_index == pattern.alpha {
                        self.derive(rule, position, candidate, &mut out)?;
                    }
                }
            }
        }
        Ok(out)
    }

    /// Retract a fact from working memory and every alpha memory.
    ///
    /// Returns `true` if the triple was present. Invalidating tokens
    /// whose chain includes the fact is the surrounding truth-maintenance
    /// engine's cascade, decided via `Token::depends_on`.
    pub fn remove_fact(&mut self, fact: &Fact) -> Result<bool, AntlerError> {
        if !self
            .graph
            .remove_fact(fact.subject, fact.role, fact.object)?
        {
            return Ok(false);
        }

        let inverse = self.graph.inverse_of(fact.role);
        for alpha in &mut self.alphas {
            if alpha.role() == fact.role {
                alpha.deactivate(fact);
            } else if Some(alpha.role()) == inverse {
                alpha.deactivate(&fact.reoriented(alpha.role()));
            }
        }
        Ok(true)
    }

    /// Enumerate instantiations of one rule with `seed` pinned at
    /// pattern position `seed_position`.
    fn derive(
        &self,
        rule: &CompiledRule,
        seed_position: usize,
        seed: &Fact,
        out: &mut Vec<Instantiation>,
    ) -> Result<(), AntlerError> {
        self.extend(rule, 0, seed_position, seed, None, out)
    }

    fn extend(
        &self,
        rule: &CompiledRule,
        position: usize,
        seed_position: usize,
        seed: &Fact,
        token: Option<&Rc<Token>>,
        out: &mut Vec<Instantiation>,
    ) -> Result<(), AntlerError> {
        let Some(pattern) = rule.patterns.get(position) else {
            if let Some(token) = token {
                out.push(Instantiation {
                    rule: rule.name.clone(),
                    depends: token.depends(self.explain),
                    token: token.clone(),
                });
            }
            return Ok(());
        };

        let candidates = if position == seed_position {
            vec![seed.clone()]
        } else {
            let alpha = &self.alphas[pattern.alpha];
            let mut facts = match (pattern.join_tests.first(), token) {
                // One endpoint is already bound: probe the index
                // instead of rescanning the node.
                (Some(join), Some(token)) => {
                    let bound = token.get(join.token_index)?.arg(join.token_position);
                    alpha.matches_with(&self.graph, join.position, bound)
                }
                _ => alpha.matches_in(&self.graph),
            };
            // Positions before the seed exclude the seed fact itself,
            // in either orientation when its role has an inverse; those
            // instantiations are produced by the derivation that pins
            // the seed earlier, and would otherwise repeat.
            if position < seed_position {
                let mirror = self
                    .graph
                    .inverse_of(seed.role)
                    .map(|inverse| (seed.object, inverse, seed.subject));
                facts.retain(|f| f.key() != seed.key() && Some(f.key()) != mirror);
            }
            facts
        };

        for fact in candidates {
            if !Self::passes_joins(pattern, &fact, token)? {
                continue;
            }
            let extended = Token::create(fact.clone(), token);
            if !self.passes_filters(pattern, &fact, &extended)? {
                continue;
            }
            self.extend(rule, position + 1, seed_position, seed, Some(&extended), out)?;
        }
        Ok(())
    }

    fn passes_joins(
        pattern: &Pattern,
        fact: &Fact,
        token: Option<&Rc<Token>>,
    ) -> Result<bool, AntlerError> {
        for join in &pattern.join_tests {
            let Some(token) = token else {
                return Err(AntlerError::TokenIndexOutOfBounds {
                    index: join.token_index,
                    len: 0,
                });
            };
            if fact.arg(join.position) != token.get(join.token_index)?.arg(join.token_position) {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn passes_filters(
        &self,
        pattern: &Pattern,
        fact: &Fact,
        token: &Rc<Token>,
    ) -> Result<bool, AntlerError> {
        for &index in &pattern.filters {
            if !self.filters[index].test(&self.graph, fact, Some(token))? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

// =============================================================================
// TESTS
// =============================================================================
