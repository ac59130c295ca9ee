//! Parser for mathematical expressions.
//!
//! This crate turns a piece of text such as `(x^2 + cos(y)) / 3` into an abstract syntax tree,
//! which downstream crates can evaluate, differentiate, and simplify. The parser supports the
//! standard arithmetic operators with their usual precedence and associativity (exponentiation
//! binds tighter than unary minus, which binds tighter than multiplication and division, which
//! bind tighter than addition and subtraction; exponentiation is right-associative, everything
//! else is left-associative), parenthesized expressions, function call syntax, and implicit
//! multiplication between adjacent operands (`2x`, `3(x + 1)`).
//!
//! Parsing is done in two stages: the [`tokenizer`] splits the source into a flat stream of
//! spanned tokens, and the [`parser`] assembles the tokens into the tree. Every node in the tree
//! remembers the region of the source code it was parsed from, so errors at any later stage can
//! point back at the offending input.
//!
//! # Example
//!
//! ```
//! use symcalc_parser::parser::{ast::Expr, Parser};
//!
//! let mut parser = Parser::new("1 + 2 * 3");
//! let expr = parser.try_parse_full::<Expr>().unwrap();
//! assert_eq!(expr.span(), 0..9);
//! ```

pub mod parser;
pub mod tokenizer;
