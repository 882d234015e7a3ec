//! # Built-In Predicates
//!
//! Boolean predicates evaluated over bound literal values, used to
//! prune joins. The vocabulary follows the SWRL comparison built-ins.
//!
//! Mixed-kind argument pairs never satisfy any predicate: a filter that
//! cannot compare its inputs fails closed instead of coercing.

use crate::types::LiteralValue;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A built-in comparison predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BuiltIn {
    /// swrlb:equal
    Equal,
    /// swrlb:notEqual
    NotEqual,
    /// swrlb:lessThan
    LessThan,
    /// swrlb:lessThanOrEqual
    LessThanOrEqual,
    /// swrlb:greaterThan
    GreaterThan,
    /// swrlb:greaterThanOrEqual
    GreaterThanOrEqual,
}

impl BuiltIn {
    /// Resolve a built-in by its SWRL name.
    ///
    /// Returns `None` for a predicate this core cannot evaluate; the
    /// network compiler surfaces that as an unsupported query.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "equal" => Some(Self::Equal),
            "notEqual" => Some(Self::NotEqual),
            "lessThan" => Some(Self::LessThan),
            "lessThanOrEqual" => Some(Self::LessThanOrEqual),
            "greaterThan" => Some(Self::GreaterThan),
            "greaterThanOrEqual" => Some(Self::GreaterThanOrEqual),
            _ => None,
        }
    }

    /// The SWRL name of this predicate.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Equal => "equal",
            Self::NotEqual => "notEqual",
            Self::LessThan => "lessThan",
            Self::LessThanOrEqual => "lessThanOrEqual",
            Self::GreaterThan => "greaterThan",
            Self::GreaterThanOrEqual => "greaterThanOrEqual",
        }
    }

    /// Number of arguments this predicate takes.
    #[must_use]
    pub const fn arity(&self) -> usize {
        2
    }

    /// Evaluate the predicate over resolved literal values.
    ///
    /// The argument count is enforced at filter construction; a call with
    /// the wrong count or an incomparable pair evaluates to `false`.
    #[must_use]
    pub fn apply(&self, args: &[LiteralValue]) -> bool {
        let (Some(a), Some(b)) = (args.first(), args.get(1)) else {
            return false;
        };
        if args.len() != self.arity() {
            return false;
        }

        let Some(ordering) = a.compare(b) else {
            return false;
        };

        match self {
            Self::Equal => ordering == Ordering::Equal,
            Self::NotEqual => ordering != Ordering::Equal,
            Self::LessThan => ordering == Ordering::Less,
            Self::LessThanOrEqual => ordering != Ordering::Greater,
            Self::GreaterThan => ordering == Ordering::Greater,
            Self::GreaterThanOrEqual => ordering != Ordering::Less,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(a: i64, b: i64) -> Vec<LiteralValue> {
        vec![LiteralValue::Int(a), LiteralValue::Int(b)]
    }

    #[test]
    fn comparison_semantics() {
        assert!(BuiltIn::LessThan.apply(&ints(3, 5)));
        assert!(!BuiltIn::LessThan.apply(&ints(5, 3)));
        assert!(!BuiltIn::LessThan.apply(&ints(3, 3)));

        assert!(BuiltIn::LessThanOrEqual.apply(&ints(3, 3)));
        assert!(BuiltIn::GreaterThan.apply(&ints(5, 3)));
        assert!(BuiltIn::GreaterThanOrEqual.apply(&ints(5, 5)));

        assert!(BuiltIn::Equal.apply(&ints(4, 4)));
        assert!(BuiltIn::NotEqual.apply(&ints(4, 7)));
    }

    #[test]
    fn string_comparison() {
        let args = vec![
            LiteralValue::Str("abc".to_string()),
            LiteralValue::Str("abd".to_string()),
        ];
        assert!(BuiltIn::LessThan.apply(&args));
        assert!(BuiltIn::NotEqual.apply(&args));
    }

    #[test]
    fn mixed_kinds_never_satisfy() {
        let args = vec![LiteralValue::Int(1), LiteralValue::Str("1".to_string())];
        assert!(!BuiltIn::Equal.apply(&args));
        assert!(!BuiltIn::NotEqual.apply(&args));
        assert!(!BuiltIn::LessThan.apply(&args));
    }

    #[test]
    fn wrong_argument_count_fails_closed() {
        assert!(!BuiltIn::Equal.apply(&[]));
        assert!(!BuiltIn::Equal.apply(&[LiteralValue::Int(1)]));
    }

    #[test]
    fn name_roundtrip() {
        for builtin in [
            BuiltIn::Equal,
            BuiltIn::NotEqual,
            BuiltIn::LessThan,
            BuiltIn::LessThanOrEqual,
            BuiltIn::GreaterThan,
            BuiltIn::GreaterThanOrEqual,
        ] {
            assert_eq!(BuiltIn::from_name(builtin.name()), Some(builtin));
        }
        assert_eq!(BuiltIn::from_name("stringConcat"), None);
    }
}
