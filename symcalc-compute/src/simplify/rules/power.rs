//! Simplification rules for exponentiation.

use crate::expr::{BinOp, Expr};
use crate::simplify::step::Step;
use crate::step_collector::StepCollector;
use super::do_binary;

/// `a^0 = 1`
pub fn pow_zero(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_binary(expr, BinOp::Power, |_, exponent| {
        if exponent.is_zero() {
            Some(Expr::Number(1.0))
        } else {
            None
        }
    })?;

    step_collector.push(Step::PowZero);
    Some(opt)
}

/// `a^1 = a`
pub fn pow_one(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_binary(expr, BinOp::Power, |base, exponent| {
        if exponent.is_one() {
            Some(base.clone())
        } else {
            None
        }
    })?;

    step_collector.push(Step::PowOne);
    Some(opt)
}

/// Applies all power rules.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    pow_zero(expr, step_collector)
        .or_else(|| pow_one(expr, step_collector))
}
