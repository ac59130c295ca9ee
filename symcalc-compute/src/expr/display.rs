use std::fmt;
use super::{BinOp, Expr, FunctionKind, MathFunction};

/// Relative binding strength of a node, used to decide where parentheses are needed when
/// printing. Higher binds tighter.
fn precedence(expr: &Expr) -> u8 {
    match expr {
        Expr::Binary(BinOp::Plus | BinOp::Minus, ..) => 1,
        Expr::Binary(BinOp::Times | BinOp::Divide | BinOp::Modulo, ..) => 2,
        Expr::Neg(_) => 3,
        // a negative literal prints with a leading `-`, so it binds like a negation
        Expr::Number(n) if *n < 0.0 => 3,
        Expr::Binary(BinOp::Power, ..) => 4,
        Expr::Bound(inner) => precedence(inner),
        Expr::Number(_)
        | Expr::Variable(_)
        | Expr::Vector(_)
        | Expr::Interval(_)
        | Expr::Function(_) => 5,
    }
}

fn fmt_operand(f: &mut fmt::Formatter<'_>, operand: &Expr, parenthesize: bool) -> fmt::Result {
    if parenthesize {
        write!(f, "({})", operand)
    } else {
        write!(f, "{}", operand)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(n) => write!(f, "{}", n),
            Expr::Variable(name) => write!(f, "{}", name),
            Expr::Bound(inner) => write!(f, "{}", inner),
            Expr::Vector(components) => {
                write!(f, "[")?;
                let mut iter = components.iter();
                if let Some(component) = iter.next() {
                    write!(f, "{}", component)?;
                    for component in iter {
                        write!(f, ", {}", component)?;
                    }
                }
                write!(f, "]")
            },
            Expr::Interval(interval) => write!(f, "{}", interval),
            Expr::Neg(operand) => {
                write!(f, "-")?;
                fmt_operand(f, operand, precedence(operand) < 3)
            },
            Expr::Binary(op, lhs, rhs) => {
                let prec = precedence(self);
                // the right operand of a non-commutative left-associative operator reparses
                // into the left slot, so equal precedence needs parentheses there; power is
                // right-associative, so the mirrored rule applies to its left operand
                let (lhs_parens, rhs_parens) = match op {
                    BinOp::Plus => (precedence(lhs) < prec, precedence(rhs) < prec),
                    BinOp::Minus | BinOp::Divide | BinOp::Modulo => {
                        (precedence(lhs) < prec, precedence(rhs) <= prec)
                    },
                    BinOp::Times => (precedence(lhs) < prec, precedence(rhs) < prec),
                    BinOp::Power => (precedence(lhs) <= prec, precedence(rhs) < prec),
                };
                fmt_operand(f, lhs, lhs_parens)?;
                write!(f, " {} ", op.symbol())?;
                fmt_operand(f, rhs, rhs_parens)
            },
            Expr::Function(func) => write!(f, "{}", func),
        }
    }
}

impl fmt::Display for MathFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            FunctionKind::Composite { f: inner, g } => write!(f, "{}({})", g.name, inner),
            _ => {
                write!(f, "{}(", self.name)?;
                let mut iter = self.args.iter();
                if let Some(arg) = iter.next() {
                    write!(f, "{}", arg)?;
                    for arg in iter {
                        write!(f, ", {}", arg)?;
                    }
                }
                write!(f, ")")
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::expr::Expr;
    use crate::funcs;

    #[test]
    fn flat_precedence() {
        let expr = Expr::Number(1.0) + Expr::Number(2.0) * Expr::var("x");
        assert_eq!(expr.to_string(), "1 + 2 * x");
    }

    #[test]
    fn parenthesized_sum_in_product() {
        let expr = (Expr::Number(1.0) + Expr::Number(2.0)) * Expr::var("x");
        assert_eq!(expr.to_string(), "(1 + 2) * x");
    }

    #[test]
    fn subtraction_of_sum() {
        let expr = Expr::var("a") - (Expr::var("b") + Expr::var("c"));
        assert_eq!(expr.to_string(), "a - (b + c)");
    }

    #[test]
    fn power_left_associativity_needs_parens() {
        let expr = Expr::var("a").pow(Expr::var("b")).pow(Expr::var("c"));
        assert_eq!(expr.to_string(), "(a ^ b) ^ c");

        let expr = Expr::var("a").pow(Expr::var("b").pow(Expr::var("c")));
        assert_eq!(expr.to_string(), "a ^ b ^ c");
    }

    #[test]
    fn negative_base_is_parenthesized() {
        let expr = Expr::Number(-5.0).pow(Expr::Number(2.0));
        assert_eq!(expr.to_string(), "(-5) ^ 2");
    }

    #[test]
    fn function_call() {
        let expr = funcs::cos(Expr::var("y")) / Expr::Number(3.0);
        assert_eq!(expr.to_string(), "cos(y) / 3");
    }

    #[test]
    fn bound_argument_prints_inner_expression() {
        let expr = funcs::sin(Expr::var("x").pow(Expr::Number(2.0)));
        assert_eq!(expr.to_string(), "sin(x ^ 2)");
    }

    #[test]
    fn vector_literal() {
        let expr = Expr::Vector(vec![
            Expr::var("t"),
            Expr::var("t") * Expr::var("t"),
        ]);
        assert_eq!(expr.to_string(), "[t, t * t]");
    }

    #[test]
    fn negation() {
        let expr = -(Expr::var("x") + Expr::Number(1.0));
        assert_eq!(expr.to_string(), "-(x + 1)");

        let expr = -Expr::var("x");
        assert_eq!(expr.to_string(), "-x");
    }

    #[test]
    fn modulo_chain_keeps_grouping() {
        let expr = Expr::var("a") % (Expr::var("b") % Expr::var("c"));
        assert_eq!(expr.to_string(), "a % (b % c)");
    }
}
