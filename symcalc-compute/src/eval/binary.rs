use crate::ctxt::Ctxt;
use crate::error::Error;
use crate::expr::{BinOp, Expr};
use crate::value::Value;
use super::{Domain, Eval};

/// Evaluates both operands under the requested domain, then applies the domain-specific
/// arithmetic.
pub(crate) fn eval_binary(
    op: BinOp,
    lhs: &Expr,
    rhs: &Expr,
    domain: Domain,
    ctxt: &Ctxt,
) -> Result<Value, Error> {
    let left = lhs.eval(domain, ctxt)?;
    let right = rhs.eval(domain, ctxt)?;
    eval_operands(op, left, right, domain)
}

/// Evaluates the binary expression given the operator and the evaluated operands.
pub(crate) fn eval_operands(
    op: BinOp,
    left: Value,
    right: Value,
    domain: Domain,
) -> Result<Value, Error> {
    match domain {
        Domain::Real => eval_real_operands(op, left, right),
        Domain::Vector => eval_vector_operands(op, left, right),
        Domain::Interval => eval_interval_operands(op, left, right),
    }
}

/// Evaluates a binary expression with two real operands. Ordinary IEEE arithmetic: division by
/// zero produces an infinity, not an error.
fn eval_real_operands(op: BinOp, left: Value, right: Value) -> Result<Value, Error> {
    let (Value::Real(left), Value::Real(right)) = (left, right) else {
        return Err(Error::UnsupportedDomain {
            what: op.symbol().to_string(),
            domain: Domain::Real,
        });
    };
    Ok(match op {
        BinOp::Plus => Value::Real(left + right),
        BinOp::Minus => Value::Real(left - right),
        BinOp::Times => Value::Real(left * right),
        BinOp::Divide => Value::Real(left / right),
        BinOp::Power => Value::Real(left.powf(right)),
        BinOp::Modulo => Value::Real(left % right),
    })
}

/// Evaluates a binary expression under the VECTOR domain. Addition and subtraction are
/// component-wise; multiplication with one scalar operand is scalar multiplication; scalars
/// combine as under REAL. Everything else has no vector rule.
fn eval_vector_operands(op: BinOp, left: Value, right: Value) -> Result<Value, Error> {
    match (op, left, right) {
        (BinOp::Plus, Value::Vector(a), Value::Vector(b)) => {
            let (expected, found) = (a.dim(), b.dim());
            a.checked_add(&b)
                .map(Value::Vector)
                .ok_or(Error::MismatchedDimensions { expected, found })
        },
        (BinOp::Minus, Value::Vector(a), Value::Vector(b)) => {
            let (expected, found) = (a.dim(), b.dim());
            a.checked_sub(&b)
                .map(Value::Vector)
                .ok_or(Error::MismatchedDimensions { expected, found })
        },
        (BinOp::Times, Value::Real(scalar), Value::Vector(v))
        | (BinOp::Times, Value::Vector(v), Value::Real(scalar)) => {
            Ok(Value::Vector(v.scale(scalar)))
        },
        (op, left @ Value::Real(_), right @ Value::Real(_)) => {
            eval_real_operands(op, left, right)
        },
        (op, left, right) => Err(Error::UnsupportedDomain {
            what: format!(
                "`{}` between {} and {}",
                op.symbol(),
                left.typename(),
                right.typename(),
            ),
            domain: Domain::Vector,
        }),
    }
}

/// Evaluates a binary expression under the INTERVAL domain. Scalars widen to degenerate
/// intervals; exponentiation and modulo have no interval rule.
fn eval_interval_operands(op: BinOp, left: Value, right: Value) -> Result<Value, Error> {
    let what = op.symbol().to_string();
    let (Some(left), Some(right)) = (left.coerce_interval(), right.coerce_interval()) else {
        return Err(Error::UnsupportedDomain {
            what,
            domain: Domain::Interval,
        });
    };
    match op {
        BinOp::Plus => Ok(Value::Interval(left.add(&right))),
        BinOp::Minus => Ok(Value::Interval(left.sub(&right))),
        BinOp::Times => Ok(Value::Interval(left.mul(&right))),
        BinOp::Divide => left
            .checked_div(&right)
            .map(Value::Interval)
            .ok_or(Error::DivisionByZero),
        BinOp::Power | BinOp::Modulo => Err(Error::UnsupportedDomain {
            what,
            domain: Domain::Interval,
        }),
    }
}
