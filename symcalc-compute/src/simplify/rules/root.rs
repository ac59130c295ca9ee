//! Simplification rules for square roots.

use crate::expr::{BinOp, Expr};
use crate::funcs::Builtin;
use crate::simplify::step::Step;
use crate::step_collector::StepCollector;
use super::{do_builtin, peel};

/// `sqrt(x^2) = x`
pub fn sqrt_square(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_builtin(expr, Builtin::Sqrt, |args| {
        if let Expr::Binary(BinOp::Power, base, exponent) = peel(&args[0]) {
            if exponent.as_number() == Some(2.0) {
                return Some((**base).clone());
            }
        }
        None
    })?;

    step_collector.push(Step::SqrtSquare);
    Some(opt)
}

/// `sqrt(0) = 0`
/// `sqrt(1) = 1`
pub fn sqrt_trivial(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_builtin(expr, Builtin::Sqrt, |args| {
        let arg = peel(&args[0]);
        if arg.is_zero() {
            Some(Expr::Number(0.0))
        } else if arg.is_one() {
            Some(Expr::Number(1.0))
        } else {
            None
        }
    })?;

    step_collector.push(Step::SqrtTrivial);
    Some(opt)
}

/// Applies all root rules.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    sqrt_square(expr, step_collector)
        .or_else(|| sqrt_trivial(expr, step_collector))
}
