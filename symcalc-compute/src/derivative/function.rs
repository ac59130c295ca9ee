use crate::error::Error;
use crate::expr::{Expr, FunctionKind, MathFunction};
use crate::funcs::{self, Builtin};
use super::{derivative, is_trivially_zero, ProductBuilder};

/// Computes the derivative of a function node with respect to the named variable.
pub(super) fn function_derivative(func: &MathFunction, var: &str) -> Result<Expr, Error> {
    match &func.kind {
        FunctionKind::Default(builtin) => builtin_derivative(func, *builtin, var),
        FunctionKind::Custom { body } => derivative(body, var),
        FunctionKind::Composite { f, g } => composite_derivative(f, g, var),

        // a call cannot be differentiated without resolving and re-deriving its target through a
        // context, which is outside what a pure structural transform can do
        FunctionKind::Call => Err(Error::UnsupportedOperation(format!(
            "cannot differentiate the call to `{}` without resolving it through a context",
            func.name,
        ))),
    }
}

/// The closed-form derivative of each builtin, composed with the chain rule.
fn builtin_derivative(func: &MathFunction, builtin: Builtin, var: &str) -> Result<Expr, Error> {
    match builtin {
        // these differentiate through the same rewrites evaluation uses
        Builtin::Log => derivative(&funcs::log_as_ln_ratio(&func.args[0], &func.args[1]), var),
        Builtin::Root => derivative(&funcs::root_as_power(&func.args[0], &func.args[1]), var),
        Builtin::Tan => derivative(&funcs::tan_as_sin_cos(&func.args[0]), var),

        // zero almost everywhere; the derivative at the discontinuities is not modeled
        Builtin::Ceil | Builtin::Floor | Builtin::Sgn => Ok(Expr::Number(0.0)),

        _ => {
            let u = &func.args[0];
            let du = derivative(u, var)?;
            if is_trivially_zero(&du) {
                return Ok(Expr::Number(0.0));
            }

            Ok(match builtin {
                Builtin::Exp => {
                    let mut product = ProductBuilder::default();
                    product.mult(funcs::exp(u.clone()));
                    product.mult(du);
                    product.into()
                },
                Builtin::Ln => du / u.clone(),
                Builtin::Sqrt => {
                    du / (Expr::Number(2.0) * funcs::sqrt(u.clone()))
                },
                Builtin::Sin => {
                    let mut product = ProductBuilder::default();
                    product.mult(funcs::cos(u.clone()));
                    product.mult(du);
                    product.into()
                },
                Builtin::Cos => {
                    let mut product = ProductBuilder::default();
                    product.mult(funcs::sin(u.clone()));
                    product.mult(du);
                    -Expr::from(product)
                },
                Builtin::Asin => {
                    du / funcs::sqrt(Expr::Number(1.0) - u.clone().pow(Expr::Number(2.0)))
                },
                Builtin::Acos => {
                    -(du / funcs::sqrt(Expr::Number(1.0) - u.clone().pow(Expr::Number(2.0))))
                },
                Builtin::Atan => {
                    du / (Expr::Number(1.0) + u.clone().pow(Expr::Number(2.0)))
                },
                Builtin::Abs => {
                    let mut product = ProductBuilder::default();
                    product.mult(funcs::sgn(u.clone()));
                    product.mult(du);
                    product.into()
                },
                Builtin::Log
                | Builtin::Root
                | Builtin::Tan
                | Builtin::Ceil
                | Builtin::Floor
                | Builtin::Sgn => unreachable!("handled above"),
            })
        },
    }
}

/// The chain rule at the function level: `(g ∘ f)' = (g' ∘ f) * f'`, where `g'` is `g`
/// differentiated with respect to its own parameter and rewrapped as a named function if the raw
/// derivative expression is not already function-shaped.
fn composite_derivative(f: &MathFunction, g: &MathFunction, var: &str) -> Result<Expr, Error> {
    let param = match g.args.first() {
        Some(Expr::Variable(name)) if g.args.len() == 1 => name.clone(),
        _ => {
            return Err(Error::UnsupportedOperation(format!(
                "cannot differentiate the composite `{}`: the outer function must have exactly \
                 one parameter",
                g.name,
            )))
        },
    };

    let dg = function_derivative(g, &param)?;
    let dg_fn = match dg {
        Expr::Function(h) => *h,
        expr => MathFunction {
            name: format!("{}'", g.name),
            args: g.args.clone(),
            kind: FunctionKind::Custom {
                body: Box::new(expr),
            },
        },
    };

    let mut product = ProductBuilder::default();
    product.mult(Expr::from(MathFunction::composite(f.clone(), dg_fn)));
    product.mult(function_derivative(f, var)?);
    Ok(product.into())
}
