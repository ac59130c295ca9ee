//! Symbolic differentiation of expressions.
//!
//! [`derivative`] returns the structural derivative of an expression with respect to a named
//! variable. The result is left unsimplified beyond the trivial cleanup the builders below do;
//! callers typically chain [`Expr::simplify`] afterwards.

mod function;

use crate::error::Error;
use crate::expr::{BinOp, Expr};
use crate::funcs;

/// Returns `true` if the given expression is "clearly" zero. This is intended to clean up the
/// trees the derivative rules produce and is not mathematically rigorous.
fn is_trivially_zero(e: &Expr) -> bool {
    match e {
        Expr::Number(n) => *n == 0.0,
        Expr::Neg(inner) | Expr::Bound(inner) => is_trivially_zero(inner),
        Expr::Binary(BinOp::Plus | BinOp::Minus, lhs, rhs) => {
            is_trivially_zero(lhs) && is_trivially_zero(rhs)
        },
        Expr::Binary(BinOp::Times, lhs, rhs) => {
            is_trivially_zero(lhs) || is_trivially_zero(rhs)
        },
        Expr::Binary(BinOp::Divide, lhs, rhs) => {
            is_trivially_zero(lhs) && !is_trivially_zero(rhs)
        },
        Expr::Binary(BinOp::Power, base, exponent) => {
            is_trivially_zero(base) && !is_trivially_zero(exponent)
        },
        _ => false,
    }
}

/// Returns `true` if the given expression is "clearly" one. This is intended to clean up the
/// trees the derivative rules produce and is not mathematically rigorous.
fn is_trivially_unity(e: &Expr) -> bool {
    match e {
        Expr::Number(n) => *n == 1.0,
        Expr::Bound(inner) => is_trivially_unity(inner),
        Expr::Binary(BinOp::Times, lhs, rhs) => {
            is_trivially_unity(lhs) && is_trivially_unity(rhs)
        },
        Expr::Binary(BinOp::Power, base, exponent) => {
            is_trivially_zero(exponent) || is_trivially_unity(base)
        },
        _ => false,
    }
}

/// Helper struct to build a product of expressions while applying basic cleanup. If any of the
/// factors is zero, the product is reduced to zero; unit factors are dropped.
#[derive(Default)]
struct ProductBuilder {
    factors: Vec<Expr>,
    zero: bool,
}

impl ProductBuilder {
    fn mult(&mut self, e: Expr) {
        if self.zero {
            return;
        }
        if is_trivially_zero(&e) {
            self.zero = true;
            return;
        }
        if !is_trivially_unity(&e) {
            self.factors.push(e);
        }
    }
}

impl From<ProductBuilder> for Expr {
    fn from(builder: ProductBuilder) -> Self {
        if builder.zero {
            return Expr::Number(0.0);
        }
        let mut factors = builder.factors.into_iter();
        match factors.next() {
            None => Expr::Number(1.0),
            Some(first) => factors.fold(first, |product, factor| product * factor),
        }
    }
}

/// Helper struct to build a sum of expressions while applying basic cleanup. Only non-zero terms
/// are added to the sum.
#[derive(Default)]
struct SumBuilder(Vec<Expr>);

impl SumBuilder {
    fn add(&mut self, e: Expr) {
        if !is_trivially_zero(&e) {
            self.0.push(e);
        }
    }
}

impl From<SumBuilder> for Expr {
    fn from(builder: SumBuilder) -> Self {
        let mut terms = builder.0.into_iter();
        match terms.next() {
            None => Expr::Number(0.0),
            Some(first) => terms.fold(first, |sum, term| sum + term),
        }
    }
}

/// `(f + g)' = f' + g'`
fn sum_rule(lhs: &Expr, rhs: &Expr, var: &str) -> Result<Expr, Error> {
    let mut sum = SumBuilder::default();
    sum.add(derivative(lhs, var)?);
    sum.add(derivative(rhs, var)?);
    Ok(sum.into())
}

/// `(f - g)' = f' - g'`
fn difference_rule(lhs: &Expr, rhs: &Expr, var: &str) -> Result<Expr, Error> {
    let da = derivative(lhs, var)?;
    let db = derivative(rhs, var)?;
    Ok(if is_trivially_zero(&db) {
        da
    } else if is_trivially_zero(&da) {
        -db
    } else {
        da - db
    })
}

/// `(f * g)' = f' * g + f * g'`
fn product_rule(lhs: &Expr, rhs: &Expr, var: &str) -> Result<Expr, Error> {
    let mut sum = SumBuilder::default();

    let mut left = ProductBuilder::default();
    left.mult(derivative(lhs, var)?);
    left.mult(rhs.clone());
    sum.add(left.into());

    let mut right = ProductBuilder::default();
    right.mult(lhs.clone());
    right.mult(derivative(rhs, var)?);
    sum.add(right.into());

    Ok(sum.into())
}

/// `(f / g)' = (f' * g - f * g') / g^2`
fn quotient_rule(lhs: &Expr, rhs: &Expr, var: &str) -> Result<Expr, Error> {
    let mut left = ProductBuilder::default();
    left.mult(derivative(lhs, var)?);
    left.mult(rhs.clone());
    let left: Expr = left.into();

    let mut right = ProductBuilder::default();
    right.mult(lhs.clone());
    right.mult(derivative(rhs, var)?);
    let right: Expr = right.into();

    let numerator = if is_trivially_zero(&right) {
        left
    } else if is_trivially_zero(&left) {
        -right
    } else {
        left - right
    };

    if is_trivially_zero(&numerator) {
        return Ok(Expr::Number(0.0));
    }
    Ok(numerator / rhs.clone().pow(Expr::Number(2.0)))
}

/// The generalized power rule, handling both variable base and variable exponent.
///
/// With a constant exponent this is `(u^n)' = n * u^(n-1) * u'`; otherwise
/// `(u^v)' = u^v * (v' * ln(u) + v * u' / u)`.
fn power_rule(base: &Expr, exponent: &Expr, var: &str) -> Result<Expr, Error> {
    if let Some(n) = exponent.as_number() {
        let mut product = ProductBuilder::default();
        product.mult(derivative(base, var)?);
        product.mult(Expr::Number(n));
        product.mult(base.clone().pow(Expr::Number(n - 1.0)));
        return Ok(product.into());
    }

    let du = derivative(base, var)?;
    let dv = derivative(exponent, var)?;

    let mut sum = SumBuilder::default();
    let mut left = ProductBuilder::default();
    left.mult(dv);
    left.mult(funcs::ln(base.clone()));
    sum.add(left.into());

    let mut right = ProductBuilder::default();
    right.mult(exponent.clone());
    right.mult(du / base.clone());
    sum.add(right.into());

    let mut outer = ProductBuilder::default();
    outer.mult(base.clone().pow(exponent.clone()));
    outer.mult(sum.into());
    Ok(outer.into())
}

/// Computes the structural derivative of the given expression with respect to the named
/// variable. Returns [`Err`] if some part of the expression cannot be differentiated.
pub fn derivative(expr: &Expr, var: &str) -> Result<Expr, Error> {
    match expr {
        Expr::Number(_) => Ok(Expr::Number(0.0)),
        Expr::Variable(name) => {
            if name == var {
                Ok(Expr::Number(1.0))
            } else {
                Ok(Expr::Number(0.0))
            }
        },
        Expr::Bound(inner) => derivative(inner, var),
        Expr::Vector(components) => Ok(Expr::Vector(
            components
                .iter()
                .map(|component| derivative(component, var))
                .collect::<Result<Vec<_>, _>>()?,
        )),
        Expr::Interval(_) => Err(Error::UnsupportedOperation(
            "an interval literal cannot be differentiated".to_string(),
        )),
        Expr::Neg(inner) => {
            let inner = derivative(inner, var)?;
            Ok(if is_trivially_zero(&inner) {
                Expr::Number(0.0)
            } else {
                -inner
            })
        },
        Expr::Binary(BinOp::Plus, lhs, rhs) => sum_rule(lhs, rhs, var),
        Expr::Binary(BinOp::Minus, lhs, rhs) => difference_rule(lhs, rhs, var),
        Expr::Binary(BinOp::Times, lhs, rhs) => product_rule(lhs, rhs, var),
        Expr::Binary(BinOp::Divide, lhs, rhs) => quotient_rule(lhs, rhs, var),
        Expr::Binary(BinOp::Power, base, exponent) => power_rule(base, exponent, var),
        Expr::Binary(BinOp::Modulo, lhs, rhs) => {
            // a % b means a - b * floor(a / b); differentiate that form, with floor' = 0
            let rewrite = (**lhs).clone()
                - (**rhs).clone() * funcs::floor((**lhs).clone() / (**rhs).clone());
            derivative(&rewrite, var)
        },
        Expr::Function(func) => function::function_derivative(func, var),
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::assert_float_absolute_eq;
    use crate::ctxt::Ctxt;
    use crate::error::Error;
    use crate::eval::Eval;
    use crate::expr::{Expr, MathFunction};
    use crate::parse;
    use super::derivative;

    /// Boilerplate helper function for evaluating an expression with `x` bound to a number.
    fn eval_x(e: &Expr, x: f64) -> f64 {
        let mut ctxt = Ctxt::default();
        ctxt.bind_variable("x", Expr::Number(x));
        e.eval_real(&ctxt).unwrap()
    }

    /// Performs finite difference to approximate the derivative of the provided expression.
    fn finite_difference(e: &Expr, x: f64) -> f64 {
        const DX: f64 = 1e-6;
        (eval_x(e, x + DX) - eval_x(e, x - DX)) / (2.0 * DX)
    }

    fn test_for_function(function: &'static str, points: impl IntoIterator<Item = f64>) {
        const TOL: f64 = 1e-4;

        let expr = parse(function).unwrap();
        let symbolic = derivative(&expr, "x")
            .unwrap_or_else(|err| panic!("cannot differentiate \"{function}\": {err}"));

        for point in points {
            let symbolically_computed = eval_x(&symbolic, point);
            let numerically_computed = finite_difference(&expr, point);

            assert!(
                (symbolically_computed - numerically_computed).abs() < TOL,
                "for \"{function}\" at x={point}, the symbolic derivative was \
                 {symbolically_computed} but the finite difference was {numerically_computed}",
            );
        }
    }

    #[test]
    fn constants_derive_to_zero() {
        let expr = Expr::Number(42.0);
        assert_eq!(derivative(&expr, "x").unwrap().simplify(), Expr::Number(0.0));
    }

    #[test]
    fn variables_derive_to_one_or_zero() {
        let x = Expr::var("x");
        assert_eq!(derivative(&x, "x").unwrap().simplify(), Expr::Number(1.0));
        assert_eq!(derivative(&x, "y").unwrap().simplify(), Expr::Number(0.0));
    }

    #[test]
    fn polynomial() {
        test_for_function("x^2 + x + 1", [0.0, 1.0, 2.0, 5.0, 8.0]);
    }

    #[test]
    fn product_and_quotient() {
        test_for_function("x * sin(x)", [0.5, 1.0, 2.0]);
        test_for_function("(x + 1) / (x^2 + 1)", [0.0, 0.5, 2.0]);
    }

    #[test]
    fn exponentials_and_logarithms() {
        test_for_function("exp(x^2)", [0.0, 0.5, 1.0]);
        test_for_function("ln(x)", [0.5, 1.0, 3.0]);
        test_for_function("log(2, x)", [0.5, 1.0, 3.0]);
        test_for_function("x^x", [0.5, 1.0, 2.0]);
    }

    #[test]
    fn roots() {
        test_for_function("sqrt(x)", [0.25, 1.0, 4.0]);
        test_for_function("root(3, x)", [0.5, 1.0, 8.0]);
    }

    #[test]
    fn trigonometry() {
        test_for_function("sin(x)", [0.0, 0.5, 1.0]);
        test_for_function("cos(x^2)", [0.0, 0.5, 1.0]);
        test_for_function("tan(x)", [0.0, 0.5, 1.0]);
    }

    #[test]
    fn inverse_trigonometry() {
        test_for_function("asin(x)", [-0.5, 0.0, 0.5]);
        test_for_function("acos(x)", [-0.5, 0.0, 0.5]);
        test_for_function("atan(x)", [-2.0, 0.0, 2.0]);
    }

    #[test]
    fn absolute_value() {
        test_for_function("abs(x)", [-2.0, -0.5, 0.5, 2.0]);
    }

    #[test]
    fn step_functions_derive_to_zero() {
        for source in ["ceil(x)", "floor(x)", "sgn(x)"] {
            let expr = parse(source).unwrap();
            assert_eq!(derivative(&expr, "x").unwrap().simplify(), Expr::Number(0.0));
        }
    }

    #[test]
    fn modulo_derives_through_its_rewrite() {
        test_for_function("x % 3", [0.5, 1.3, 4.7]);
    }

    #[test]
    fn derivative_then_simplify_of_linear_expression() {
        // d/dx (x*1 - (-5)) = 1
        let expr = parse("x*1 - (-5)").unwrap();
        assert_eq!(derivative(&expr, "x").unwrap().simplify(), Expr::Number(1.0));
    }

    #[test]
    fn function_call_cannot_be_differentiated() {
        let expr = Expr::from(MathFunction::call("f"));
        assert!(matches!(
            derivative(&expr, "x").unwrap_err(),
            Error::UnsupportedOperation(_),
        ));
    }

    #[test]
    fn composite_chain_rule() {
        // g(f(x)) with f(x) = x^2 and g(u) = sin(u); (g ∘ f)' = cos(x^2) * 2x
        let f = MathFunction::custom("f", &["x"], Expr::var("x").pow(Expr::Number(2.0)));
        let g = MathFunction::custom("g", &["u"], crate::funcs::sin(Expr::var("u")));
        let composite = Expr::from(MathFunction::composite(f, g));

        let symbolic = derivative(&composite, "x").unwrap();
        for point in [0.0f64, 0.5, 1.2] {
            let expected = (point * point).cos() * 2.0 * point;
            assert_float_absolute_eq!(eval_x(&symbolic, point), expected, 1e-9);
        }
    }
}
