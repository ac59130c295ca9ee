//! Evaluation, differentiation, and simplification of mathematical expressions.
//!
//! This crate is the engine behind symcalc. It defines the [`Expr`] tree — literals, operators,
//! and functions — and the three transforms every node supports:
//!
//! - **evaluation** ([`Eval::eval`]) under one of three numeric domains (real scalars, fixed
//!   small-dimension vectors, closed intervals), reading variable and function bindings from a
//!   [`Ctxt`];
//! - **differentiation** ([`Expr::derivative`]), a pure tree-to-tree transform applying the
//!   standard symbolic rules;
//! - **simplification** ([`Expr::simplify`]), one post-order pass of local rewrite rules.
//!
//! Trees are immutable values: no transform mutates its receiver, so a tree can be shared and
//! evaluated concurrently as long as each evaluation brings its own context.
//!
//! # Example
//!
//! ```
//! use symcalc_compute::{parse, Ctxt, Eval, Expr};
//!
//! let expr = parse("(x^2 + cos(y)) / 3").unwrap();
//!
//! let mut ctxt = Ctxt::default();
//! ctxt.bind_variable("x", Expr::Number(2.0));
//! ctxt.bind_variable("y", parse("pi").unwrap());
//!
//! let value = expr.eval_real(&ctxt).unwrap();
//! assert!((value - 1.0).abs() < 1e-9);
//!
//! let slope = expr.derivative("x").unwrap().simplify();
//! assert!((slope.eval_real(&ctxt).unwrap() - 4.0 / 3.0).abs() < 1e-9);
//! ```

pub mod consts;
pub mod ctxt;
pub mod derivative;
pub mod error;
pub mod eval;
pub mod expr;
pub mod funcs;
pub mod primitive;
pub mod simplify;
pub mod step_collector;
pub mod value;

pub use ctxt::Ctxt;
pub use derivative::derivative;
pub use error::Error;
pub use eval::{Domain, Eval};
pub use expr::{BinOp, Expr, FunctionKind, MathFunction};
pub use funcs::Builtin;
pub use primitive::{Interval, Vector};
pub use simplify::{simplify, simplify_with, Step};
pub use step_collector::StepCollector;
pub use value::Value;

use std::fmt;
use symcalc_parser::parser::{ast, Parser};

/// An error from [`parse`]: either the text is not a well-formed expression, or it is
/// well-formed but does not describe a valid expression tree (such as a call to an unknown
/// function).
#[derive(Debug)]
pub enum ParseError {
    /// The text could not be parsed. The contained error can render a span-annotated report.
    Syntax(symcalc_parser::parser::Error),

    /// The parsed tree could not be converted into an expression.
    Conversion(Error),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Syntax(err) => write!(f, "syntax error: {:?}", err.kind),
            ParseError::Conversion(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parses a piece of text into an expression.
///
/// The text must use standard operator precedence (exponentiation over unary minus over
/// multiplication and division over addition and subtraction), with right-associative
/// exponentiation, parenthesization, recognized default-function names as call sites, and
/// implicit multiplication between adjacent operands.
pub fn parse(source: &str) -> Result<Expr, ParseError> {
    let mut parser = Parser::new(source);
    let ast = parser
        .try_parse_full::<ast::Expr>()
        .map_err(ParseError::Syntax)?;
    Expr::try_from(ast).map_err(ParseError::Conversion)
}

#[cfg(test)]
mod tests {
    use assert_float_eq::assert_float_absolute_eq;
    use super::*;

    /// The printed form of a parsed expression need not equal the input, but re-parsing it must
    /// evaluate to the same result as the original.
    #[test]
    fn display_round_trips_through_the_parser() {
        let sources = [
            "(x^2 + cos(y)) / 3",
            "x*1 - (-5)",
            "2x y + 3(x + 1)",
            "-x^2 + 4 ^ 3 ^ 2",
            "sin(x) * ln(y) % 7",
            "sqrt(x^2) - exp(x * ln(y))",
            "root(3, x) + log(2, y)",
        ];

        let mut ctxt = Ctxt::default();
        ctxt.bind_variable("x", Expr::Number(1.37));
        ctxt.bind_variable("y", Expr::Number(2.81));

        for source in sources {
            let expr = parse(source).unwrap();
            let reparsed = parse(&expr.to_string()).unwrap();

            let original = expr.eval_real(&ctxt).unwrap();
            let round_tripped = reparsed.eval_real(&ctxt).unwrap();
            assert_float_absolute_eq!(original, round_tripped, 1e-12);
        }
    }

    #[test]
    fn parse_errors_are_reported() {
        assert!(matches!(parse("1 +"), Err(ParseError::Syntax(_))));
        assert!(matches!(parse("cot(x)"), Err(ParseError::Conversion(_))));
    }
}
