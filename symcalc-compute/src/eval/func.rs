use crate::ctxt::Ctxt;
use crate::error::Error;
use crate::expr::{Expr, FunctionKind, MathFunction};
use crate::funcs::{self, Builtin};
use crate::value::Value;
use super::{Domain, Eval};

impl Eval for MathFunction {
    fn eval(&self, domain: Domain, ctxt: &Ctxt) -> Result<Value, Error> {
        match &self.kind {
            FunctionKind::Default(builtin) => eval_builtin(self, *builtin, domain, ctxt),

            // the caller is responsible for having bound the parameters into the context
            FunctionKind::Custom { body } => body.eval(domain, ctxt),

            FunctionKind::Composite { f, g } => eval_composite(f, g, domain, ctxt),

            FunctionKind::Call => {
                let func = ctxt.get_function(&self.name).ok_or_else(|| {
                    Error::UndefinedFunction {
                        name: self.name.clone(),
                        suggestions: ctxt.similar_functions(&self.name),
                    }
                })?;

                // a fresh child scope keeps the callee's own parameter bindings from colliding
                // with the caller's
                let scope = ctxt.child_scope();
                func.eval(domain, &scope)
            },
        }
    }
}

fn eval_builtin(
    func: &MathFunction,
    builtin: Builtin,
    domain: Domain,
    ctxt: &Ctxt,
) -> Result<Value, Error> {
    match builtin {
        // logarithms and roots delegate algebraically; the rewrite is the single source of truth
        // for what they mean, shared with differentiation
        Builtin::Log => funcs::log_as_ln_ratio(&func.args[0], &func.args[1]).eval(domain, ctxt),
        Builtin::Root => funcs::root_as_power(&func.args[0], &func.args[1]).eval(domain, ctxt),
        _ => {
            if domain != Domain::Real {
                return Err(Error::UnsupportedDomain {
                    what: builtin.name().to_string(),
                    domain,
                });
            }
            let x = func.args[0].eval_real(ctxt)?;
            Ok(Value::Real(eval_real_closed_form(builtin, x)))
        },
    }
}

/// The closed form of each single-argument builtin over real scalars.
fn eval_real_closed_form(builtin: Builtin, x: f64) -> f64 {
    match builtin {
        Builtin::Exp => x.exp(),
        Builtin::Ln => x.ln(),
        Builtin::Sqrt => x.sqrt(),
        Builtin::Sin => x.sin(),
        Builtin::Cos => x.cos(),
        Builtin::Tan => x.tan(),
        Builtin::Asin => x.asin(),
        Builtin::Acos => x.acos(),
        Builtin::Atan => x.atan(),
        Builtin::Abs => x.abs(),
        Builtin::Ceil => x.ceil(),
        Builtin::Floor => x.floor(),
        // f64::signum maps 0.0 to 1.0, which is not what sgn means
        Builtin::Sgn => {
            if x == 0.0 {
                0.0
            } else {
                x.signum()
            }
        },
        Builtin::Log | Builtin::Root => unreachable!("evaluated via their rewrites"),
    }
}

/// Evaluates `g ∘ f`: `g`'s domain dimension selects `f`'s output domain, `f`'s result is bound
/// positionally to `g`'s parameters in one child scope, and `g` evaluates there under the
/// caller-requested domain.
fn eval_composite(
    f: &MathFunction,
    g: &MathFunction,
    domain: Domain,
    ctxt: &Ctxt,
) -> Result<Value, Error> {
    let dim = g.domain_dimension();
    let inner_domain = match dim {
        1 => Domain::Real,
        2..=4 => Domain::Vector,
        dim => return Err(Error::UnsupportedDimension { dim }),
    };

    let value = f.eval(inner_domain, ctxt)?;
    let mut scope = ctxt.child_scope();
    match value {
        Value::Real(n) if dim == 1 => {
            bind_parameter(&mut scope, &g.args[0], n);
        },
        Value::Vector(v) if v.dim() == dim => {
            for (param, component) in g.args.iter().zip(v.components()) {
                bind_parameter(&mut scope, param, *component);
            }
        },
        value => {
            let found = match &value {
                Value::Vector(v) => v.dim(),
                _ => 1,
            };
            return Err(Error::MismatchedDimensions {
                expected: dim,
                found,
            });
        },
    }

    g.eval(domain, &scope)
}

/// Binds one scalar component of the inner function's result to a parameter of the outer
/// function. Bound arguments close over their own expression and take nothing from the scope.
fn bind_parameter(scope: &mut Ctxt, param: &Expr, component: f64) {
    if let Expr::Variable(name) = param {
        scope.bind_variable(name.clone(), Expr::Number(component));
    }
}
