// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Value emission: computing an expression against an external
//! numeric-emission context.
//!
//! Code generation is not this crate's business. The AST exposes a
//! single narrow capability — walk the tree and feed operand values
//! into an [`EmitContext`] — and everything a backend needs is the
//! small contract that trait defines: produce a constant, negate a
//! value, combine two values arithmetically. A JIT backend would hand
//! back instruction-stream value handles; the bundled [`Calculator`]
//! hands back plain numbers.

use ecow::EcoString;
use miette::Diagnostic;
use thiserror::Error;

use crate::ast::Expression;

/// The contract between the AST and a numeric-emission backend.
///
/// `Value` is an opaque handle: emission never inspects it, only
/// threads it from one context operation into the next. Operations
/// take `&mut self` because real backends accumulate state (an
/// instruction builder, for instance).
pub trait EmitContext {
    /// The backend's opaque value handle.
    type Value;

    /// Produces a constant from an integer literal.
    fn constant(&mut self, value: i64) -> Self::Value;

    /// Negates a value.
    fn negate(&mut self, value: Self::Value) -> Self::Value;

    /// Adds two values.
    fn add(&mut self, lhs: Self::Value, rhs: Self::Value) -> Self::Value;

    /// Subtracts `rhs` from `lhs`.
    fn subtract(&mut self, lhs: Self::Value, rhs: Self::Value) -> Self::Value;

    /// Multiplies two values.
    fn multiply(&mut self, lhs: Self::Value, rhs: Self::Value) -> Self::Value;

    /// Divides `lhs` by `rhs`.
    fn divide(&mut self, lhs: Self::Value, rhs: Self::Value) -> Self::Value;
}

/// An emission error.
///
/// Unreachable for trees produced by the parser, which only ever emits
/// the closed operator sets; trees built by hand can carry anything.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum EmitError {
    /// An operator symbol outside the closed sets `+ -` (unary) and
    /// `+ - * /` (binary).
    #[error("unsupported operator '{op}'")]
    UnsupportedOperator {
        /// The offending operator symbol.
        op: EcoString,
    },
}

impl Expression {
    /// Emits this tree into the given context and returns the
    /// resulting value handle.
    ///
    /// Operands are emitted depth-first, left to right. Unary `+` is a
    /// no-op on the emitted value; unary `-` negates it.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_core::emit::Calculator;
    /// use tally_core::parse;
    ///
    /// let expression = parse("((2+5)*2+9) / 2").unwrap();
    /// assert_eq!(expression.emit(&mut Calculator).unwrap(), 11.5);
    /// ```
    ///
    /// # Errors
    ///
    /// Fails with [`EmitError::UnsupportedOperator`] if a node carries
    /// an operator symbol outside the closed sets.
    pub fn emit<C: EmitContext>(&self, context: &mut C) -> Result<C::Value, EmitError> {
        match self {
            Self::IntegerLiteral { value } => Ok(context.constant(*value)),
            Self::UnaryOp { op, operand } => {
                let value = operand.emit(context)?;
                match op.as_str() {
                    "+" => Ok(value),
                    "-" => Ok(context.negate(value)),
                    _ => Err(EmitError::UnsupportedOperator { op: op.clone() }),
                }
            }
            Self::BinaryOp { lhs, op, rhs } => {
                let lhs = lhs.emit(context)?;
                let rhs = rhs.emit(context)?;
                match op.as_str() {
                    "+" => Ok(context.add(lhs, rhs)),
                    "-" => Ok(context.subtract(lhs, rhs)),
                    "*" => Ok(context.multiply(lhs, rhs)),
                    "/" => Ok(context.divide(lhs, rhs)),
                    _ => Err(EmitError::UnsupportedOperator { op: op.clone() }),
                }
            }
        }
    }
}

/// A plain arithmetic emission context.
///
/// Computes values immediately over `f64` (the expression language has
/// a single numeric type, and division is exact rather than
/// truncating). Used by the test suite and the CLI's `eval` command.
#[derive(Debug, Clone, Copy, Default)]
pub struct Calculator;

impl EmitContext for Calculator {
    type Value = f64;

    #[expect(
        clippy::cast_precision_loss,
        reason = "literals beyond 2^53 lose precision, as in any double-based evaluator"
    )]
    fn constant(&mut self, value: i64) -> f64 {
        value as f64
    }

    fn negate(&mut self, value: f64) -> f64 {
        -value
    }

    fn add(&mut self, lhs: f64, rhs: f64) -> f64 {
        lhs + rhs
    }

    fn subtract(&mut self, lhs: f64, rhs: f64) -> f64 {
        lhs - rhs
    }

    fn multiply(&mut self, lhs: f64, rhs: f64) -> f64 {
        lhs * rhs
    }

    fn divide(&mut self, lhs: f64, rhs: f64) -> f64 {
        lhs / rhs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    fn eval(source: &str) -> f64 {
        parse(source).unwrap().emit(&mut Calculator).unwrap()
    }

    #[test]
    fn subtraction_associates_left() {
        assert_eq!(eval("8-3-2"), 3.0);
    }

    #[test]
    fn multiplication_binds_tighter() {
        assert_eq!(eval("2+3*4"), 14.0);
    }

    #[test]
    fn unary_minus_applies_to_its_operand_only() {
        assert_eq!(eval("-5+3"), -2.0);
    }

    #[test]
    fn unary_plus_is_a_no_op() {
        assert_eq!(eval("+5"), 5.0);
        assert_eq!(eval("-(+5)"), -5.0);
    }

    #[test]
    fn brackets_group() {
        assert_eq!(eval("(1+2)*3"), 9.0);
    }

    #[test]
    fn division_is_exact() {
        assert_eq!(eval("7/2"), 3.5);
    }

    #[test]
    fn evaluates_the_worked_example() {
        assert_eq!(eval("4*5+3*(2+1)"), 29.0);
    }

    #[test]
    fn hand_built_unary_operator_is_rejected() {
        let tree = Expression::unary("!", Expression::integer(1));
        let error = tree.emit(&mut Calculator).unwrap_err();
        assert_eq!(error, EmitError::UnsupportedOperator { op: "!".into() });
    }

    #[test]
    fn hand_built_binary_operator_is_rejected() {
        let tree = Expression::binary(Expression::integer(1), "%", Expression::integer(2));
        let error = tree.emit(&mut Calculator).unwrap_err();
        assert_eq!(error.to_string(), "unsupported operator '%'");
    }

    /// An emission context that records the operations it is asked to
    /// perform, to pin down emission order.
    #[derive(Default)]
    struct Recorder {
        operations: Vec<String>,
        next_handle: usize,
    }

    impl Recorder {
        fn record(&mut self, operation: String) -> usize {
            self.operations.push(operation);
            self.next_handle += 1;
            self.next_handle
        }
    }

    impl EmitContext for Recorder {
        type Value = usize;

        fn constant(&mut self, value: i64) -> usize {
            self.record(format!("const {value}"))
        }

        fn negate(&mut self, value: usize) -> usize {
            self.record(format!("neg #{value}"))
        }

        fn add(&mut self, lhs: usize, rhs: usize) -> usize {
            self.record(format!("add #{lhs} #{rhs}"))
        }

        fn subtract(&mut self, lhs: usize, rhs: usize) -> usize {
            self.record(format!("sub #{lhs} #{rhs}"))
        }

        fn multiply(&mut self, lhs: usize, rhs: usize) -> usize {
            self.record(format!("mul #{lhs} #{rhs}"))
        }

        fn divide(&mut self, lhs: usize, rhs: usize) -> usize {
            self.record(format!("div #{lhs} #{rhs}"))
        }
    }

    #[test]
    fn emission_is_depth_first_left_to_right() {
        let mut recorder = Recorder::default();
        parse("1*2+3").unwrap().emit(&mut recorder).unwrap();
        assert_eq!(
            recorder.operations,
            vec!["const 1", "const 2", "mul #1 #2", "const 3", "add #3 #4"],
        );
    }
}
