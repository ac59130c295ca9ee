//! Simplification rules for the natural exponential and logarithm.

use crate::consts;
use crate::expr::{BinOp, Expr, FunctionKind};
use crate::funcs::Builtin;
use crate::simplify::step::Step;
use crate::step_collector::StepCollector;
use super::{do_builtin, peel};

/// `exp(0) = 1`
pub fn exp_zero(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_builtin(expr, Builtin::Exp, |args| {
        if peel(&args[0]).is_zero() {
            Some(Expr::Number(1.0))
        } else {
            None
        }
    })?;

    step_collector.push(Step::ExpZero);
    Some(opt)
}

/// `exp(1) = e`
pub fn exp_one(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_builtin(expr, Builtin::Exp, |args| {
        if peel(&args[0]).is_one() {
            Some(Expr::Number(consts::E))
        } else {
            None
        }
    })?;

    step_collector.push(Step::ExpOne);
    Some(opt)
}

/// `exp(x * ln(y)) = y^x`, with the factors in either order.
pub fn exp_log_power(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    /// If the expression is `ln(y)`, returns `y`.
    fn ln_arg(expr: &Expr) -> Option<&Expr> {
        if let Expr::Function(func) = expr {
            if func.kind == FunctionKind::Default(Builtin::Ln) {
                return Some(peel(&func.args[0]));
            }
        }
        None
    }

    let opt = do_builtin(expr, Builtin::Exp, |args| {
        if let Expr::Binary(BinOp::Times, lhs, rhs) = peel(&args[0]) {
            let (exponent, base) = if let Some(base) = ln_arg(peel(rhs)) {
                ((**lhs).clone(), base.clone())
            } else if let Some(base) = ln_arg(peel(lhs)) {
                ((**rhs).clone(), base.clone())
            } else {
                return None;
            };
            return Some(Expr::Binary(
                BinOp::Power,
                Box::new(base),
                Box::new(exponent),
            ));
        }
        None
    })?;

    step_collector.push(Step::ExpLogPower);
    Some(opt)
}

/// `ln(1) = 0`
pub fn ln_one(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_builtin(expr, Builtin::Ln, |args| {
        if peel(&args[0]).is_one() {
            Some(Expr::Number(0.0))
        } else {
            None
        }
    })?;

    step_collector.push(Step::LnOne);
    Some(opt)
}

/// Applies all exponential and logarithm rules.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    exp_zero(expr, step_collector)
        .or_else(|| exp_one(expr, step_collector))
        .or_else(|| exp_log_power(expr, step_collector))
        .or_else(|| ln_one(expr, step_collector))
}
