//! The default functions built into every expression, and helpers to build calls to them.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use crate::expr::{BinOp, Expr, MathFunction};

/// A function built into the engine, with no stored expression body.
///
/// This is a closed set: every transform matches on it exhaustively, so a new builtin cannot be
/// added without the compiler pointing at every place that must handle it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    /// `exp(x)`, the natural exponential `e^x`.
    Exp,

    /// `log(base, x)`, the logarithm of `x` in the given base.
    Log,

    /// `ln(x)`, the natural logarithm.
    Ln,

    /// `root(n, x)`, the `n`-th root of `x`.
    Root,

    /// `sqrt(x)`, the square root.
    Sqrt,

    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,

    /// `abs(x)`, the absolute value.
    Abs,

    /// `ceil(x)`, the smallest integer greater than or equal to `x`.
    Ceil,

    /// `floor(x)`, the largest integer less than or equal to `x`.
    Floor,

    /// `sgn(x)`, the sign of `x` (`-1`, `0`, or `1`).
    Sgn,
}

/// All builtins, in no particular order.
pub const ALL: [Builtin; 15] = [
    Builtin::Exp,
    Builtin::Log,
    Builtin::Ln,
    Builtin::Root,
    Builtin::Sqrt,
    Builtin::Sin,
    Builtin::Cos,
    Builtin::Tan,
    Builtin::Asin,
    Builtin::Acos,
    Builtin::Atan,
    Builtin::Abs,
    Builtin::Ceil,
    Builtin::Floor,
    Builtin::Sgn,
];

static BY_NAME: Lazy<HashMap<&'static str, Builtin>> =
    Lazy::new(|| ALL.iter().map(|builtin| (builtin.name(), *builtin)).collect());

impl Builtin {
    /// Returns the name the function is called by in source code.
    pub fn name(&self) -> &'static str {
        match self {
            Builtin::Exp => "exp",
            Builtin::Log => "log",
            Builtin::Ln => "ln",
            Builtin::Root => "root",
            Builtin::Sqrt => "sqrt",
            Builtin::Sin => "sin",
            Builtin::Cos => "cos",
            Builtin::Tan => "tan",
            Builtin::Asin => "asin",
            Builtin::Acos => "acos",
            Builtin::Atan => "atan",
            Builtin::Abs => "abs",
            Builtin::Ceil => "ceil",
            Builtin::Floor => "floor",
            Builtin::Sgn => "sgn",
        }
    }

    /// Returns the number of arguments the function takes.
    pub fn arity(&self) -> usize {
        match self {
            Builtin::Log | Builtin::Root => 2,
            _ => 1,
        }
    }

    /// Looks up a builtin by the name it is called by in source code.
    pub fn from_name(name: &str) -> Option<Builtin> {
        BY_NAME.get(name).copied()
    }
}

/// `log(base, x)` means `ln(x) / ln(base)`. Evaluation and differentiation both go through this
/// rewrite, so there is one source of truth for what a logarithm is.
pub(crate) fn log_as_ln_ratio(base: &Expr, arg: &Expr) -> Expr {
    ln(arg.clone()) / ln(base.clone())
}

/// `root(n, x)` means `x^(1/n)`. Evaluation and differentiation both go through this rewrite.
pub(crate) fn root_as_power(degree: &Expr, arg: &Expr) -> Expr {
    Expr::Binary(
        BinOp::Power,
        Box::new(arg.clone()),
        Box::new(Expr::Number(1.0) / degree.clone()),
    )
}

/// `tan(x)` differentiates through the rewrite `sin(x) / cos(x)`.
pub(crate) fn tan_as_sin_cos(arg: &Expr) -> Expr {
    sin(arg.clone()) / cos(arg.clone())
}

macro_rules! builders {
    ($($(#[$attr:meta])* $name:ident($($arg:ident),+) => $builtin:ident;)*) => {
        $(
            $(#[$attr])*
            pub fn $name($($arg: Expr),+) -> Expr {
                Expr::Function(Box::new(MathFunction::builtin(Builtin::$builtin, vec![$($arg),+])))
            }
        )*
    };
}

builders! {
    /// Builds `exp(x)`.
    exp(x) => Exp;
    /// Builds `log(base, x)`.
    log(base, x) => Log;
    /// Builds `ln(x)`.
    ln(x) => Ln;
    /// Builds `root(n, x)`.
    root(n, x) => Root;
    /// Builds `sqrt(x)`.
    sqrt(x) => Sqrt;
    /// Builds `sin(x)`.
    sin(x) => Sin;
    /// Builds `cos(x)`.
    cos(x) => Cos;
    /// Builds `tan(x)`.
    tan(x) => Tan;
    /// Builds `asin(x)`.
    asin(x) => Asin;
    /// Builds `acos(x)`.
    acos(x) => Acos;
    /// Builds `atan(x)`.
    atan(x) => Atan;
    /// Builds `abs(x)`.
    abs(x) => Abs;
    /// Builds `ceil(x)`.
    ceil(x) => Ceil;
    /// Builds `floor(x)`.
    floor(x) => Floor;
    /// Builds `sgn(x)`.
    sgn(x) => Sgn;
}
