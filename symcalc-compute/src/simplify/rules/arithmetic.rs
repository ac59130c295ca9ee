//! Simplification rules for the arithmetic operators and negation.

use crate::expr::{BinOp, Expr};
use crate::simplify::step::Step;
use crate::step_collector::StepCollector;
use super::do_binary;

/// `a+0 = a`
/// `0+a = a`
pub fn add_zero(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_binary(expr, BinOp::Plus, |lhs, rhs| {
        if rhs.is_zero() {
            Some(lhs.clone())
        } else if lhs.is_zero() {
            Some(rhs.clone())
        } else {
            None
        }
    })?;

    step_collector.push(Step::AddZero);
    Some(opt)
}

/// `a-0 = a`
/// `0-a = -a`
pub fn sub_zero(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_binary(expr, BinOp::Minus, |lhs, rhs| {
        if rhs.is_zero() {
            Some(lhs.clone())
        } else if lhs.is_zero() {
            Some(Expr::Neg(Box::new(rhs.clone())))
        } else {
            None
        }
    })?;

    step_collector.push(Step::SubZero);
    Some(opt)
}

/// `a-(-b) = a+b`, whether the negation is a node or folded into a literal.
pub fn sub_negation(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_binary(expr, BinOp::Minus, |lhs, rhs| match rhs {
        Expr::Neg(inner) => Some(lhs.clone() + (**inner).clone()),
        Expr::Number(n) if *n < 0.0 => Some(lhs.clone() + Expr::Number(-n)),
        _ => None,
    })?;

    step_collector.push(Step::SubNegation);
    Some(opt)
}

/// `a*0 = 0`
/// `0*a = 0`
pub fn mul_zero(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_binary(expr, BinOp::Times, |lhs, rhs| {
        if lhs.is_zero() || rhs.is_zero() {
            Some(Expr::Number(0.0))
        } else {
            None
        }
    })?;

    step_collector.push(Step::MulZero);
    Some(opt)
}

/// `a*1 = a`
/// `1*a = a`
pub fn mul_one(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_binary(expr, BinOp::Times, |lhs, rhs| {
        if rhs.is_one() {
            Some(lhs.clone())
        } else if lhs.is_one() {
            Some(rhs.clone())
        } else {
            None
        }
    })?;

    step_collector.push(Step::MulOne);
    Some(opt)
}

/// `a/1 = a`
pub fn div_one(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_binary(expr, BinOp::Divide, |lhs, rhs| {
        if rhs.is_one() {
            Some(lhs.clone())
        } else {
            None
        }
    })?;

    step_collector.push(Step::DivOne);
    Some(opt)
}

/// `-(-a) = a`, and `-n` folds into the literal for numeric `n`.
pub fn negation(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = match expr {
        Expr::Neg(inner) => match &**inner {
            Expr::Neg(innermost) => Some((**innermost).clone()),
            Expr::Number(n) => Some(Expr::Number(-n)),
            _ => None,
        },
        _ => None,
    }?;

    step_collector.push(Step::Negation);
    Some(opt)
}

/// Evaluates an operator whose operands are both numeric literals. Division and modulo by zero
/// are left alone rather than folded into non-finite literals.
pub fn fold_constants(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = match expr {
        Expr::Binary(op, lhs, rhs) => {
            let (a, b) = (lhs.as_number()?, rhs.as_number()?);
            match op {
                BinOp::Plus => Some(Expr::Number(a + b)),
                BinOp::Minus => Some(Expr::Number(a - b)),
                BinOp::Times => Some(Expr::Number(a * b)),
                BinOp::Divide if b != 0.0 => Some(Expr::Number(a / b)),
                BinOp::Power => Some(Expr::Number(a.powf(b))),
                BinOp::Modulo if b != 0.0 => Some(Expr::Number(a % b)),
                BinOp::Divide | BinOp::Modulo => None,
            }
        },
        _ => None,
    }?;

    step_collector.push(Step::FoldConstants);
    Some(opt)
}

/// Applies all arithmetic rules.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    add_zero(expr, step_collector)
        .or_else(|| sub_zero(expr, step_collector))
        .or_else(|| sub_negation(expr, step_collector))
        .or_else(|| mul_zero(expr, step_collector))
        .or_else(|| mul_one(expr, step_collector))
        .or_else(|| div_one(expr, step_collector))
        .or_else(|| negation(expr, step_collector))
        .or_else(|| fold_constants(expr, step_collector))
}
