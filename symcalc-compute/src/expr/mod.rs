//! The expression tree every transform operates on.
//!
//! [`Expr`] is a closed set of node kinds: literals, operators, and functions. Each transform
//! (evaluation, differentiation, simplification) matches on it exhaustively, so adding a node
//! kind forces every transform to say what it does with it.
//!
//! The tree is a value: transforms never mutate their receiver. Evaluation reads the tree and a
//! [`Ctxt`](crate::ctxt::Ctxt) to produce a [`Value`](crate::value::Value), while differentiation
//! and simplification return new trees. Because of this, a single tree may be evaluated
//! concurrently from multiple threads, provided each evaluation uses its own context (or a
//! strictly read-only shared one).
//!
//! Expressions can be built from text via [`parse`](crate::parse), or directly in code, where the
//! arithmetic operators double as node constructors:
//!
//! ```
//! use symcalc_compute::expr::Expr;
//!
//! let x = Expr::var("x");
//! let poly = x.clone() * x + Expr::Number(1.0);
//! assert_eq!(poly.to_string(), "x * x + 1");
//! ```

mod convert;
mod display;

use std::ops::{Add, Div, Mul, Neg, Rem, Sub};
use crate::funcs::Builtin;
use crate::primitive::Interval;

/// A mathematical expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A real scalar literal.
    Number(f64),

    /// A named, unbound placeholder, resolved through the evaluation context.
    Variable(String),

    /// An anonymous variable wrapping a fixed sub-expression.
    ///
    /// Bound variables let the default functions accept arbitrary expressions as arguments: a
    /// non-variable argument is wrapped in one at construction, and evaluates its wrapped
    /// expression directly, ignoring the context.
    Bound(Box<Expr>),

    /// An n-ary vector literal. Each component is an expression, evaluated as a real scalar when
    /// the vector is materialized.
    Vector(Vec<Expr>),

    /// A closed interval literal `[lo, hi]`.
    Interval(Interval),

    /// Unary minus.
    Neg(Box<Expr>),

    /// A binary operation over two sub-expressions.
    Binary(BinOp, Box<Expr>, Box<Expr>),

    /// A function; see [`MathFunction`].
    Function(Box<MathFunction>),
}

impl Expr {
    /// Builds a [`Expr::Variable`] with the given name.
    pub fn var(name: impl Into<String>) -> Expr {
        Expr::Variable(name.into())
    }

    /// If the expression is a [`Expr::Number`], returns the contained value.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Expr::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns true if the expression is the number zero.
    pub fn is_zero(&self) -> bool {
        self.as_number() == Some(0.0)
    }

    /// Returns true if the expression is the number one.
    pub fn is_one(&self) -> bool {
        self.as_number() == Some(1.0)
    }

    /// Returns the structural derivative of the expression with respect to the named variable.
    ///
    /// The result is unsimplified; callers typically chain [`Expr::simplify`] afterwards.
    pub fn derivative(&self, var: &str) -> Result<Expr, crate::error::Error> {
        crate::derivative::derivative(self, var)
    }

    /// Applies one post-order pass of local rewrite rules to the expression.
    ///
    /// This is not simplification to a fixed point: some inputs need more than one call to reach
    /// a stable form.
    pub fn simplify(&self) -> Expr {
        crate::simplify::simplify(self)
    }
}

/// A binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Plus,
    Minus,
    Times,
    Divide,
    Power,
    Modulo,
}

impl BinOp {
    /// Returns the symbol used to write the operator in source code.
    pub fn symbol(&self) -> &'static str {
        match self {
            BinOp::Plus => "+",
            BinOp::Minus => "-",
            BinOp::Times => "*",
            BinOp::Divide => "/",
            BinOp::Power => "^",
            BinOp::Modulo => "%",
        }
    }
}

/// A named function with an ordered list of parameters.
///
/// The number of parameters is the function's **domain dimension**, fixed at construction. Each
/// element of `args` is either a [`Expr::Variable`] (a parameter proper) or a [`Expr::Bound`]
/// (an argument expression the function closes over).
#[derive(Debug, Clone, PartialEq)]
pub struct MathFunction {
    /// The name of the function.
    pub name: String,

    /// The ordered parameters or bound arguments of the function.
    pub args: Vec<Expr>,

    /// What the function is.
    pub kind: FunctionKind,
}

/// The different kinds of functions.
#[derive(Debug, Clone, PartialEq)]
pub enum FunctionKind {
    /// A built-in function with no stored expression body.
    Default(Builtin),

    /// A user-defined function with an explicit expression body over its parameters.
    Custom {
        /// The body of the function.
        body: Box<Expr>,
    },

    /// The chained function `g ∘ f`: evaluate `f`, bind its result to `g`'s parameters, then
    /// evaluate `g`.
    Composite {
        /// The inner function, evaluated first.
        f: Box<MathFunction>,

        /// The outer function, evaluated on `f`'s result.
        g: Box<MathFunction>,
    },

    /// A reference to a function by name, resolved against the context's function table at
    /// evaluation time.
    Call,
}

impl MathFunction {
    /// Builds a call to a built-in function.
    ///
    /// Arguments that are not already variables are wrapped in [`Expr::Bound`] here, before the
    /// node is built, so no partially-constructed function is ever observable.
    ///
    /// # Panics
    ///
    /// Panics if the number of arguments does not match the builtin's arity. Use
    /// [`Builtin::arity`] to check first when the argument list is not statically known.
    pub fn builtin(builtin: Builtin, args: Vec<Expr>) -> MathFunction {
        assert_eq!(
            args.len(),
            builtin.arity(),
            "`{}` takes {} argument(s)",
            builtin.name(),
            builtin.arity(),
        );

        let args = args
            .into_iter()
            .map(|arg| match arg {
                arg @ (Expr::Variable(_) | Expr::Bound(_)) => arg,
                arg => Expr::Bound(Box::new(arg)),
            })
            .collect();

        MathFunction {
            name: builtin.name().to_string(),
            args,
            kind: FunctionKind::Default(builtin),
        }
    }

    /// Builds a user-defined function over the given parameter names.
    pub fn custom(name: impl Into<String>, params: &[&str], body: Expr) -> MathFunction {
        MathFunction {
            name: name.into(),
            args: params.iter().map(|param| Expr::var(*param)).collect(),
            kind: FunctionKind::Custom {
                body: Box::new(body),
            },
        }
    }

    /// Builds the composite function `g ∘ f`. Its domain dimension is `f`'s.
    pub fn composite(f: MathFunction, g: MathFunction) -> MathFunction {
        MathFunction {
            name: format!("{}({})", g.name, f.name),
            args: f.args.clone(),
            kind: FunctionKind::Composite {
                f: Box::new(f),
                g: Box::new(g),
            },
        }
    }

    /// Builds a reference to a function by name, to be resolved against the context's function
    /// table at evaluation time.
    pub fn call(name: impl Into<String>) -> MathFunction {
        MathFunction {
            name: name.into(),
            args: Vec::new(),
            kind: FunctionKind::Call,
        }
    }

    /// The number of parameters of the function. For composites this is the inner function's
    /// dimension, since that is what the composite consumes.
    pub fn domain_dimension(&self) -> usize {
        match &self.kind {
            FunctionKind::Composite { f, .. } => f.domain_dimension(),
            _ => self.args.len(),
        }
    }
}

impl From<MathFunction> for Expr {
    fn from(func: MathFunction) -> Self {
        Expr::Function(Box::new(func))
    }
}

/// Builds a [`BinOp::Plus`] node. No simplification is done.
impl Add for Expr {
    type Output = Expr;

    fn add(self, rhs: Expr) -> Expr {
        Expr::Binary(BinOp::Plus, Box::new(self), Box::new(rhs))
    }
}

/// Builds a [`BinOp::Minus`] node. No simplification is done.
impl Sub for Expr {
    type Output = Expr;

    fn sub(self, rhs: Expr) -> Expr {
        Expr::Binary(BinOp::Minus, Box::new(self), Box::new(rhs))
    }
}

/// Builds a [`BinOp::Times`] node. No simplification is done.
impl Mul for Expr {
    type Output = Expr;

    fn mul(self, rhs: Expr) -> Expr {
        Expr::Binary(BinOp::Times, Box::new(self), Box::new(rhs))
    }
}

/// Builds a [`BinOp::Divide`] node. No simplification is done.
impl Div for Expr {
    type Output = Expr;

    fn div(self, rhs: Expr) -> Expr {
        Expr::Binary(BinOp::Divide, Box::new(self), Box::new(rhs))
    }
}

/// Builds a [`BinOp::Modulo`] node. No simplification is done.
impl Rem for Expr {
    type Output = Expr;

    fn rem(self, rhs: Expr) -> Expr {
        Expr::Binary(BinOp::Modulo, Box::new(self), Box::new(rhs))
    }
}

/// Builds a [`Expr::Neg`] node. No simplification is done.
impl Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        Expr::Neg(Box::new(self))
    }
}

impl Expr {
    /// Builds a [`BinOp::Power`] node. No simplification is done.
    pub fn pow(self, exponent: Expr) -> Expr {
        Expr::Binary(BinOp::Power, Box::new(self), Box::new(exponent))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn operator_sugar_builds_nodes() {
        let expr = Expr::var("x") + Expr::Number(1.0) * Expr::var("y");
        assert_eq!(expr, Expr::Binary(
            BinOp::Plus,
            Box::new(Expr::Variable("x".to_string())),
            Box::new(Expr::Binary(
                BinOp::Times,
                Box::new(Expr::Number(1.0)),
                Box::new(Expr::Variable("y".to_string())),
            )),
        ));
    }

    #[test]
    fn builtin_wraps_non_variable_args() {
        let func = MathFunction::builtin(
            Builtin::Sin,
            vec![Expr::var("x").pow(Expr::Number(2.0))],
        );
        assert_eq!(func.args, vec![Expr::Bound(Box::new(
            Expr::var("x").pow(Expr::Number(2.0)),
        ))]);
    }

    #[test]
    fn builtin_keeps_variable_args() {
        let func = MathFunction::builtin(Builtin::Cos, vec![Expr::var("y")]);
        assert_eq!(func.args, vec![Expr::Variable("y".to_string())]);
    }

    #[test]
    fn composite_dimension_is_inner_dimension() {
        let f = MathFunction::custom("f", &["t"], Expr::var("t"));
        let g = MathFunction::custom(
            "g",
            &["a", "b", "c"],
            Expr::var("a") + Expr::var("b") + Expr::var("c"),
        );
        let composite = MathFunction::composite(f, g);
        assert_eq!(composite.domain_dimension(), 1);
    }

    #[test]
    #[should_panic(expected = "takes 2 argument(s)")]
    fn builtin_arity_is_checked() {
        let _ = MathFunction::builtin(Builtin::Log, vec![Expr::var("x")]);
    }
}
