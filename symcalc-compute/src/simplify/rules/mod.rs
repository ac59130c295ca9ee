//! Implementation of the simplification rules.
//!
//! Each rule in this module is a function that takes the expression to simplify as an argument,
//! and returns `Some(expr)` with the simplified expression if the rule applies, or `None` if the
//! rule does not apply. Rules are grouped by the node family they rewrite, and each group exposes
//! an `all` function that tries its rules in a fixed order.

pub mod arithmetic;
pub mod exponential;
pub mod power;
pub mod round;
pub mod root;
pub mod trigonometry;

use crate::expr::{BinOp, Expr, FunctionKind};
use crate::funcs::Builtin;
use crate::step_collector::StepCollector;
use super::step::Step;

/// If the expression is a binary expression with the given operator, calls the given
/// transformation function with the operands.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_binary(
    expr: &Expr,
    op: BinOp,
    f: impl Fn(&Expr, &Expr) -> Option<Expr>,
) -> Option<Expr> {
    if let Expr::Binary(found, lhs, rhs) = expr {
        if *found == op {
            return f(lhs, rhs);
        }
    }

    None
}

/// If the expression is a call to the given builtin function, calls the given transformation
/// function with the arguments.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_builtin(
    expr: &Expr,
    builtin: Builtin,
    f: impl Fn(&[Expr]) -> Option<Expr>,
) -> Option<Expr> {
    if let Expr::Function(func) = expr {
        if func.kind == FunctionKind::Default(builtin) {
            return f(&func.args);
        }
    }

    None
}

/// Looks through a bound-variable wrapper to the expression it closes over.
///
/// Builtin arguments are stored wrapped, so shape-keyed rules peel them before matching.
pub(crate) fn peel(expr: &Expr) -> &Expr {
    match expr {
        Expr::Bound(inner) => peel(inner),
        expr => expr,
    }
}

/// Applies all rules, in order.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    arithmetic::all(expr, step_collector)
        .or_else(|| power::all(expr, step_collector))
        .or_else(|| exponential::all(expr, step_collector))
        .or_else(|| root::all(expr, step_collector))
        .or_else(|| trigonometry::all(expr, step_collector))
        .or_else(|| round::all(expr, step_collector))
}
