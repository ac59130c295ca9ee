use crate::ctxt::Ctxt;
use crate::error::Error;
use crate::expr::Expr;
use crate::primitive::{Interval, Vector};
use crate::value::Value;
use super::{Domain, Eval};

/// A number is a real scalar in the REAL and VECTOR domains (where it acts as the degenerate
/// point), and widens to the degenerate interval `[n, n]` in the INTERVAL domain.
pub(crate) fn eval_number(n: f64, domain: Domain) -> Result<Value, Error> {
    Ok(match domain {
        Domain::Real | Domain::Vector => Value::Real(n),
        Domain::Interval => Value::Interval(Interval::point(n)),
    })
}

/// A variable evaluates the expression it is bound to in the context, under the same domain.
pub(crate) fn eval_variable(name: &str, domain: Domain, ctxt: &Ctxt) -> Result<Value, Error> {
    match ctxt.get_expression(name) {
        Some(expr) => expr.eval(domain, ctxt),
        None => Err(Error::UnboundVariable {
            name: name.to_string(),
            suggestions: ctxt.similar_variables(name),
        }),
    }
}

/// A vector literal materializes by evaluating each component as a real scalar.
pub(crate) fn eval_vector(components: &[Expr], domain: Domain, ctxt: &Ctxt) -> Result<Value, Error> {
    match domain {
        Domain::Vector => {
            let mut values = Vec::with_capacity(components.len());
            for component in components {
                values.push(component.eval_real(ctxt)?);
            }
            Ok(Value::Vector(Vector::new(values)))
        },
        Domain::Real | Domain::Interval => Err(Error::UnsupportedDomain {
            what: "vector literal".to_string(),
            domain,
        }),
    }
}

pub(crate) fn eval_interval(interval: Interval, domain: Domain) -> Result<Value, Error> {
    match domain {
        Domain::Interval => Ok(Value::Interval(interval)),
        Domain::Real | Domain::Vector => Err(Error::UnsupportedDomain {
            what: "interval literal".to_string(),
            domain,
        }),
    }
}
