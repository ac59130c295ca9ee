use crate::ctxt::Ctxt;
use crate::error::Error;
use crate::expr::Expr;
use crate::value::Value;
use super::{Domain, Eval};

/// Negation is defined in every domain: scalar negation, component-wise vector negation, and
/// interval endpoint reflection.
pub(crate) fn eval_neg(operand: &Expr, domain: Domain, ctxt: &Ctxt) -> Result<Value, Error> {
    Ok(match operand.eval(domain, ctxt)? {
        Value::Real(n) => Value::Real(-n),
        Value::Vector(v) => Value::Vector(v.neg()),
        Value::Interval(i) => Value::Interval(i.neg()),
    })
}
