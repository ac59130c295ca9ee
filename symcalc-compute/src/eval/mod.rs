//! Evaluation of expressions under a numeric domain.
//!
//! Every node supports evaluation under each of the three domains. REAL is ordinary IEEE `f64`
//! arithmetic; VECTOR evaluates component-wise `+`/`-` and scalar multiplication over
//! fixed small-dimension vectors; INTERVAL evaluates closed-interval arithmetic with endpoint
//! case analysis for multiplication and division. A node with no rule for the requested domain
//! fails with [`Error::UnsupportedDomain`](crate::error::Error::UnsupportedDomain) rather than
//! guessing.

mod binary;
mod func;
mod literal;
mod unary;

use std::fmt;
use crate::ctxt::Ctxt;
use crate::error::Error;
use crate::expr::Expr;
use crate::value::Value;

/// The numeric universe an expression is interpreted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    /// Double-precision real scalars.
    Real,

    /// Fixed small-dimension numeric vectors.
    Vector,

    /// Closed intervals `[lo, hi]`.
    Interval,
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Domain::Real => write!(f, "real"),
            Domain::Vector => write!(f, "vector"),
            Domain::Interval => write!(f, "interval"),
        }
    }
}

/// Any type that can be evaluated to produce a value.
pub trait Eval {
    /// Evaluate the expression to produce a value, using the given domain and context.
    /// Evaluation never mutates the expression.
    fn eval(&self, domain: Domain, ctxt: &Ctxt) -> Result<Value, Error>;

    /// Evaluate the expression under the REAL domain and return the scalar result.
    fn eval_real(&self, ctxt: &Ctxt) -> Result<f64, Error> {
        match self.eval(Domain::Real, ctxt)? {
            Value::Real(n) => Ok(n),
            value => Err(Error::UnsupportedDomain {
                what: value.typename().to_string(),
                domain: Domain::Real,
            }),
        }
    }
}

impl Eval for Expr {
    fn eval(&self, domain: Domain, ctxt: &Ctxt) -> Result<Value, Error> {
        match self {
            Expr::Number(n) => literal::eval_number(*n, domain),
            Expr::Variable(name) => literal::eval_variable(name, domain, ctxt),
            Expr::Bound(inner) => inner.eval(domain, ctxt),
            Expr::Vector(components) => literal::eval_vector(components, domain, ctxt),
            Expr::Interval(interval) => literal::eval_interval(*interval, domain),
            Expr::Neg(operand) => unary::eval_neg(operand, domain, ctxt),
            Expr::Binary(op, lhs, rhs) => binary::eval_binary(*op, lhs, rhs, domain, ctxt),
            Expr::Function(func) => func.eval(domain, ctxt),
        }
    }
}

/// Eval tests depend on the parser, so ensure that parser tests pass before running these.
#[cfg(test)]
mod tests {
    use assert_float_eq::assert_float_absolute_eq;
    use crate::consts;
    use crate::expr::MathFunction;
    use crate::parse;
    use crate::primitive::Interval;
    use super::*;

    /// Parse the given source into an expression, panicking on failure.
    fn parse_expr(source: &str) -> Expr {
        parse(source).unwrap()
    }

    #[test]
    fn binary_expr() {
        let expr = parse_expr("1 + 2 * 3");
        assert_eq!(expr.eval(Domain::Real, &Ctxt::new()).unwrap(), 7.0.into());
    }

    #[test]
    fn division_and_power() {
        let expr = parse_expr("(2 ^ 10) / 4");
        assert_eq!(expr.eval(Domain::Real, &Ctxt::new()).unwrap(), 256.0.into());
    }

    #[test]
    fn modulo() {
        let expr = parse_expr("17 % 5");
        assert_eq!(expr.eval(Domain::Real, &Ctxt::new()).unwrap(), 2.0.into());
    }

    #[test]
    fn named_constants_from_default_context() {
        let expr = parse_expr("cos(pi)");
        assert_eq!(expr.eval(Domain::Real, &Ctxt::default()).unwrap(), (-1.0).into());
    }

    #[test]
    fn quotient_of_square_and_cosine() {
        // (x^2 + cos(y)) / 3 with x = 2, y = pi is (4 - 1) / 3 = 1
        let expr = parse_expr("(x^2 + cos(y)) / 3");
        let mut ctxt = Ctxt::default();
        ctxt.bind_variable("x", Expr::Number(2.0));
        ctxt.bind_variable("y", Expr::Number(consts::PI));

        let Value::Real(result) = expr.eval(Domain::Real, &ctxt).unwrap() else {
            panic!("expected real result");
        };
        assert_float_absolute_eq!(result, 1.0);
    }

    #[test]
    fn evaluation_is_deterministic() {
        let expr = parse_expr("sin(x) * ln(x) + x ^ 3");
        let mut ctxt = Ctxt::new();
        ctxt.bind_variable("x", Expr::Number(1.75));

        let first = expr.eval(Domain::Real, &ctxt).unwrap();
        let second = expr.eval(Domain::Real, &ctxt).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn unbound_variable_fails_with_suggestions() {
        let expr = parse_expr("radius * 2");
        let mut ctxt = Ctxt::new();
        ctxt.bind_variable("radios", Expr::Number(1.0));

        let err = expr.eval(Domain::Real, &ctxt).unwrap_err();
        assert_eq!(err, Error::UnboundVariable {
            name: "radius".to_string(),
            suggestions: vec!["radios".to_string()],
        });
    }

    #[test]
    fn variables_evaluate_their_bound_expression() {
        let expr = parse_expr("y + 1");
        let mut ctxt = Ctxt::new();
        // y is bound to an expression over x, not to a number
        ctxt.bind_variable("y", parse_expr("x * 10"));
        ctxt.bind_variable("x", Expr::Number(4.0));

        assert_eq!(expr.eval(Domain::Real, &ctxt).unwrap(), 41.0.into());
    }

    #[test]
    fn log_evaluates_as_ratio_of_natural_logarithms() {
        let expr = parse_expr("log(2, 1024)");
        let Value::Real(result) = expr.eval(Domain::Real, &Ctxt::new()).unwrap() else {
            panic!("expected real result");
        };
        assert_float_absolute_eq!(result, 10.0);
    }

    #[test]
    fn root_evaluates_as_power() {
        let expr = parse_expr("root(3, 27)");
        let Value::Real(result) = expr.eval(Domain::Real, &Ctxt::new()).unwrap() else {
            panic!("expected real result");
        };
        assert_float_absolute_eq!(result, 3.0);
    }

    #[test]
    fn sgn_of_zero_is_zero() {
        let expr = parse_expr("sgn(0) + sgn(-3) + sgn(7)");
        assert_eq!(expr.eval(Domain::Real, &Ctxt::new()).unwrap(), 0.0.into());
    }

    #[test]
    fn interval_arithmetic() {
        let mut ctxt = Ctxt::new();
        ctxt.bind_variable("x", Expr::Interval(Interval::new(1.0, 2.0)));

        let expr = parse_expr("x * 3 + 1");
        assert_eq!(
            expr.eval(Domain::Interval, &ctxt).unwrap(),
            Value::Interval(Interval::new(4.0, 7.0)),
        );
    }

    #[test]
    fn interval_division_by_zero_straddling_divisor_fails() {
        let mut ctxt = Ctxt::new();
        ctxt.bind_variable("x", Expr::Interval(Interval::new(-1.0, 1.0)));

        let expr = parse_expr("5 / x");
        assert_eq!(expr.eval(Domain::Interval, &ctxt).unwrap_err(), Error::DivisionByZero);
    }

    #[test]
    fn scalars_widen_to_degenerate_intervals() {
        let expr = parse_expr("2 + 3");
        assert_eq!(
            expr.eval(Domain::Interval, &Ctxt::new()).unwrap(),
            Value::Interval(Interval::point(5.0)),
        );
    }

    #[test]
    fn vector_component_wise_addition() {
        let mut ctxt = Ctxt::new();
        ctxt.bind_variable("u", Expr::Vector(vec![Expr::Number(1.0), Expr::Number(2.0)]));
        ctxt.bind_variable("v", Expr::Vector(vec![Expr::Number(3.0), Expr::Number(4.0)]));

        let expr = parse_expr("u + v");
        assert_eq!(
            expr.eval(Domain::Vector, &ctxt).unwrap(),
            Value::Vector(crate::primitive::Vector::new(vec![4.0, 6.0])),
        );
    }

    #[test]
    fn vector_scalar_multiplication() {
        let mut ctxt = Ctxt::new();
        ctxt.bind_variable("v", Expr::Vector(vec![Expr::Number(1.0), Expr::Number(-2.0)]));

        let expr = parse_expr("3 v");
        assert_eq!(
            expr.eval(Domain::Vector, &ctxt).unwrap(),
            Value::Vector(crate::primitive::Vector::new(vec![3.0, -6.0])),
        );
    }

    #[test]
    fn trig_under_vector_domain_is_unsupported() {
        let mut ctxt = Ctxt::new();
        ctxt.bind_variable("v", Expr::Vector(vec![Expr::Number(1.0), Expr::Number(2.0)]));

        let expr = parse_expr("tan(v)");
        assert_eq!(expr.eval(Domain::Vector, &ctxt).unwrap_err(), Error::UnsupportedDomain {
            what: "tan".to_string(),
            domain: Domain::Vector,
        });
    }

    #[test]
    fn custom_function_evaluates_with_caller_bindings() {
        // doubleup(x) = x * 2, with x = 0.5, is 1
        let doubleup = MathFunction::custom(
            "doubleup",
            &["x"],
            Expr::var("x") * Expr::Number(2.0),
        );
        let mut ctxt = Ctxt::new();
        ctxt.bind_variable("x", Expr::Number(0.5));

        assert_eq!(doubleup.eval(Domain::Real, &ctxt).unwrap(), 1.0.into());
    }

    #[test]
    fn custom_function_with_two_parameters() {
        // leftshift(x, i) = x * 2^i, with x = 250, i = 8, is 64000
        let leftshift = MathFunction::custom(
            "leftshift",
            &["x", "i"],
            Expr::var("x") * Expr::Number(2.0).pow(Expr::var("i")),
        );
        let mut ctxt = Ctxt::new();
        ctxt.bind_variable("x", Expr::Number(250.0));
        ctxt.bind_variable("i", Expr::Number(8.0));

        assert_eq!(leftshift.eval(Domain::Real, &ctxt).unwrap(), 64000.0.into());
    }

    #[test]
    fn function_call_resolves_through_the_context() {
        let expr = parse_expr("doubleup() + 1");
        let mut ctxt = Ctxt::new();
        ctxt.bind_function(
            "doubleup",
            MathFunction::custom("doubleup", &["x"], Expr::var("x") * Expr::Number(2.0)),
        );
        ctxt.bind_variable("x", Expr::Number(0.5));

        assert_eq!(expr.eval(Domain::Real, &ctxt).unwrap(), 2.0.into());
    }

    #[test]
    fn function_call_to_unknown_name_fails() {
        let expr = parse_expr("halve()");
        let err = expr.eval(Domain::Real, &Ctxt::new()).unwrap_err();
        assert!(matches!(err, Error::UndefinedFunction { .. }));
    }

    #[test]
    fn composite_binds_components_into_a_child_scope() {
        // f: R -> R^3, g: R^3 -> R
        let f = MathFunction::custom(
            "f",
            &["t"],
            Expr::Vector(vec![
                Expr::var("t"),
                Expr::var("t") * Expr::var("t"),
                Expr::var("t") * Expr::var("t") * Expr::var("t"),
            ]),
        );
        let g = MathFunction::custom(
            "g",
            &["a", "b", "c"],
            Expr::var("a") + Expr::var("b") + Expr::var("c"),
        );
        let composite = MathFunction::composite(f, g);

        let mut ctxt = Ctxt::new();
        ctxt.bind_variable("t", Expr::Number(2.0));
        // the outer binding for `a` must not be visible inside the child scope
        ctxt.bind_variable("a", Expr::Number(999.0));

        // 2 + 4 + 8
        assert_eq!(composite.eval(Domain::Real, &ctxt).unwrap(), 14.0.into());
    }

    #[test]
    fn composite_of_scalar_functions() {
        // g(f(t)) with f(t) = t + 1 and g(u) = u * u, at t = 3, is 16
        let f = MathFunction::custom("f", &["t"], Expr::var("t") + Expr::Number(1.0));
        let g = MathFunction::custom("g", &["u"], Expr::var("u") * Expr::var("u"));
        let composite = MathFunction::composite(f, g);

        let mut ctxt = Ctxt::new();
        ctxt.bind_variable("t", Expr::Number(3.0));

        assert_eq!(composite.eval(Domain::Real, &ctxt).unwrap(), 16.0.into());
    }

    #[test]
    fn composite_dimension_above_four_fails() {
        let f = MathFunction::custom("f", &["t"], Expr::var("t"));
        let g = MathFunction::custom(
            "g",
            &["a", "b", "c", "d", "e"],
            Expr::var("a"),
        );
        let composite = MathFunction::composite(f, g);

        let mut ctxt = Ctxt::new();
        ctxt.bind_variable("t", Expr::Number(1.0));

        assert_eq!(
            composite.eval(Domain::Real, &ctxt).unwrap_err(),
            Error::UnsupportedDimension { dim: 5 },
        );
    }

    #[test]
    fn composite_dimension_mismatch_fails() {
        // f yields two components, g expects three
        let f = MathFunction::custom(
            "f",
            &["t"],
            Expr::Vector(vec![Expr::var("t"), Expr::var("t")]),
        );
        let g = MathFunction::custom(
            "g",
            &["a", "b", "c"],
            Expr::var("a") + Expr::var("b") + Expr::var("c"),
        );
        let composite = MathFunction::composite(f, g);

        let mut ctxt = Ctxt::new();
        ctxt.bind_variable("t", Expr::Number(1.0));

        assert_eq!(
            composite.eval(Domain::Real, &ctxt).unwrap_err(),
            Error::MismatchedDimensions { expected: 3, found: 2 },
        );
    }
}
