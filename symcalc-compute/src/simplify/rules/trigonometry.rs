//! Simplification rules for the trigonometric functions.

use crate::expr::Expr;
use crate::funcs::Builtin;
use crate::simplify::step::Step;
use crate::step_collector::StepCollector;
use super::{do_builtin, peel};

/// `sin(0) = 0`
/// `tan(0) = 0`
pub fn sin_tan_zero(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let zero_at_zero = |args: &[Expr]| {
        if peel(&args[0]).is_zero() {
            Some(Expr::Number(0.0))
        } else {
            None
        }
    };
    let opt = do_builtin(expr, Builtin::Sin, zero_at_zero)
        .or_else(|| do_builtin(expr, Builtin::Tan, zero_at_zero))?;

    step_collector.push(Step::SinZero);
    Some(opt)
}

/// `cos(0) = 1`
pub fn cos_zero(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_builtin(expr, Builtin::Cos, |args| {
        if peel(&args[0]).is_zero() {
            Some(Expr::Number(1.0))
        } else {
            None
        }
    })?;

    step_collector.push(Step::CosZero);
    Some(opt)
}

/// Applies all trigonometric rules.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    sin_tan_zero(expr, step_collector)
        .or_else(|| cos_zero(expr, step_collector))
}
