// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Abstract syntax tree definitions for Tally expressions.
//!
//! The tree has three node variants: integer literals, unary
//! operations, and binary operations. Nodes are immutable, built
//! bottom-up by the parser, and each exclusively owns its children.
//! They carry no spans and no token back-references; once built, a
//! tree stands on its own.
//!
//! Every variant supports two interpretations, each an exhaustive
//! match over the variants:
//!
//! - [`Expression::describe`] — a structural, serializable
//!   representation ([`Description`]); pure and total.
//! - [`Expression::emit`](crate::emit) — value computation against an
//!   external numeric-emission context.
//!
//! Operator symbols are stored as strings rather than a closed enum so
//! that emission can defend against out-of-set operators on trees
//! built by hand; the parser itself only ever produces `+ - * /`.

use ecow::EcoString;
use serde::{Deserialize, Serialize};

/// A Tally expression tree.
///
/// # Examples
///
/// ```
/// use tally_core::ast::Expression;
///
/// // The tree for `-5`, built by hand.
/// let tree = Expression::unary("-", Expression::integer(5));
/// assert_eq!(tree, Expression::unary("-", Expression::integer(5)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    /// An integer literal: `42`
    IntegerLiteral {
        /// The converted literal value.
        value: i64,
    },

    /// A unary operation: `-x`, `+x`
    UnaryOp {
        /// The operator symbol, `+` or `-`.
        op: EcoString,
        /// The operand the operator applies to.
        operand: Box<Expression>,
    },

    /// A binary operation: `a + b`
    BinaryOp {
        /// The left-hand side.
        lhs: Box<Expression>,
        /// The operator symbol, one of `+ - * /`.
        op: EcoString,
        /// The right-hand side.
        rhs: Box<Expression>,
    },
}

impl Expression {
    /// Creates an integer literal node.
    #[must_use]
    pub const fn integer(value: i64) -> Self {
        Self::IntegerLiteral { value }
    }

    /// Creates a unary operation node.
    #[must_use]
    pub fn unary(op: impl Into<EcoString>, operand: Expression) -> Self {
        Self::UnaryOp {
            op: op.into(),
            operand: Box::new(operand),
        }
    }

    /// Creates a binary operation node.
    #[must_use]
    pub fn binary(lhs: Expression, op: impl Into<EcoString>, rhs: Expression) -> Self {
        Self::BinaryOp {
            lhs: Box::new(lhs),
            op: op.into(),
            rhs: Box::new(rhs),
        }
    }

    /// Produces the structural description of this tree.
    ///
    /// Pure and deterministic: describing the same tree twice yields
    /// structurally equal results. The description serializes to the
    /// stable tagged-record shape other tooling consumes, e.g.
    /// `{"type": "IntegerLiteral", "value": 5}`.
    #[must_use]
    pub fn describe(&self) -> Description {
        match self {
            Self::IntegerLiteral { value } => Description::IntegerLiteral { value: *value },
            Self::UnaryOp { op, operand } => Description::UnaryOpExpression {
                op: op.clone(),
                rhs: Box::new(operand.describe()),
            },
            Self::BinaryOp { lhs, op, rhs } => Description::BinaryOpExpression {
                lhs: Box::new(lhs.describe()),
                op: op.clone(),
                rhs: Box::new(rhs.describe()),
            },
        }
    }
}

/// The structural description of an expression tree.
///
/// This tagged record is the stable boundary consumed by other tooling
/// (pretty-printers, alternative backends). Field order and the `type`
/// tag names are part of that contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Description {
    /// `{"type": "IntegerLiteral", "value": <number>}`
    IntegerLiteral {
        /// The literal value.
        value: i64,
    },

    /// `{"type": "UnaryOpExpression", "op": "<symbol>", "rhs": <node>}`
    UnaryOpExpression {
        /// The operator symbol.
        op: EcoString,
        /// The described operand.
        rhs: Box<Description>,
    },

    /// `{"type": "BinaryOpExpression", "lhs": <node>, "op": "<symbol>", "rhs": <node>}`
    BinaryOpExpression {
        /// The described left-hand side.
        lhs: Box<Description>,
        /// The operator symbol.
        op: EcoString,
        /// The described right-hand side.
        rhs: Box<Description>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_integer_literal() {
        let description = Expression::integer(5).describe();
        assert_eq!(description, Description::IntegerLiteral { value: 5 });
    }

    #[test]
    fn describe_nests_recursively() {
        let tree = Expression::unary("-", Expression::integer(7));
        assert_eq!(
            tree.describe(),
            Description::UnaryOpExpression {
                op: "-".into(),
                rhs: Box::new(Description::IntegerLiteral { value: 7 }),
            }
        );
    }

    #[test]
    fn describe_is_deterministic() {
        let tree = Expression::binary(
            Expression::integer(6),
            "-",
            Expression::unary("-", Expression::integer(7)),
        );
        assert_eq!(tree.describe(), tree.describe());
    }

    #[test]
    fn description_serializes_to_tagged_records() {
        let tree = Expression::binary(Expression::integer(6), "-", Expression::integer(7));
        let json = serde_json::to_value(tree.describe()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "BinaryOpExpression",
                "lhs": { "type": "IntegerLiteral", "value": 6 },
                "op": "-",
                "rhs": { "type": "IntegerLiteral", "value": 7 },
            })
        );
    }

    #[test]
    fn description_round_trips_through_json() {
        let description = Expression::binary(
            Expression::unary("+", Expression::integer(1)),
            "*",
            Expression::integer(2),
        )
        .describe();
        let json = serde_json::to_string(&description).unwrap();
        let back: Description = serde_json::from_str(&json).unwrap();
        assert_eq!(back, description);
    }
}
