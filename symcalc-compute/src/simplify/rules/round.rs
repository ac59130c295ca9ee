//! Simplification rules for the rounding functions.
//!
//! Composing `ceil` and `floor` collapses to the inner application: both produce integers, and
//! both are the identity on integers. This is a convention about these two specific operators,
//! not a general identity.

use crate::expr::{Expr, FunctionKind};
use crate::funcs::Builtin;
use crate::simplify::step::Step;
use crate::step_collector::StepCollector;
use super::{do_builtin, peel};

/// Returns the inner expression if it is a `ceil` or `floor` application.
fn rounded(expr: &Expr) -> Option<&Expr> {
    if let Expr::Function(func) = expr {
        if func.kind == FunctionKind::Default(Builtin::Ceil)
            || func.kind == FunctionKind::Default(Builtin::Floor)
        {
            return Some(expr);
        }
    }
    None
}

/// `ceil(floor(x)) = floor(x)`, `ceil(ceil(x)) = ceil(x)`
/// `floor(ceil(x)) = ceil(x)`, `floor(floor(x)) = floor(x)`
pub fn collapse_rounding(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let already_rounded = |args: &[Expr]| rounded(peel(&args[0])).cloned();
    let opt = do_builtin(expr, Builtin::Ceil, already_rounded)
        .or_else(|| do_builtin(expr, Builtin::Floor, already_rounded))?;

    step_collector.push(Step::CollapseRounding);
    Some(opt)
}

/// Applies all rounding rules.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    collapse_rounding(expr, step_collector)
}
