use std::{fmt, ops::Range};
use crate::parser::{
    ast::{expr::{Expr, Primary}, unary::Unary},
    error::Error,
    token::op::{BinOp, BinOpKind},
    Associativity,
    Parser,
    Precedence,
};

/// A binary operator, possibly implicit.
#[derive(Debug, Clone, PartialEq)]
enum BinOpExt {
    /// A binary operator, such as `+` or `*`.
    Op(BinOp),

    /// Implicit multiplication, such as `2x` or `3(x + 1)`.
    ///
    /// This is not a real operator, but it is treated as one for the purposes of parsing.
    ImplicitMultiplication,
}

impl BinOpExt {
    /// Returns the precedence of the binary operator.
    fn precedence(&self) -> Precedence {
        match self {
            BinOpExt::Op(op) => op.precedence(),
            BinOpExt::ImplicitMultiplication => Precedence::Factor,
        }
    }
}

/// A binary expression, such as `1 + 2`. Binary expressions can include nested expressions.
#[derive(Debug, Clone, PartialEq)]
pub struct Binary {
    /// The left-hand side of the binary expression.
    pub lhs: Box<Expr>,

    /// The operator of the binary expression.
    pub op: BinOp,

    /// The right-hand side of the binary expression.
    pub rhs: Box<Expr>,

    /// The region of the source code that this binary expression was parsed from.
    pub span: Range<usize>,
}

impl Binary {
    /// Returns the span of the binary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// After parsing the left-hand-side, the operator, and the right-hand-side of a potential
    /// binary expression, parse ahead to see if the right-hand-side is incomplete.
    fn complete_rhs(
        input: &mut Parser,
        lhs: Expr,
        op: BinOpExt,
        mut rhs: Expr,
    ) -> Result<Expr, Error> {
        let precedence = op.precedence();

        loop {
            // before creating the `lhs op rhs` node, we should check the precedence of the
            // following operator, if any
            // this is because we can't parse an expression like `3 + 4 * 5`, as (3 + 4) * 5

            // clone the input stream to emulate peeking
            let mut input_ahead = input.clone();
            match input_ahead.try_parse::<BinOp>() {
                Ok(next_op) if next_op.precedence() > precedence
                    || (next_op.precedence() == precedence
                        && next_op.associativity() == Associativity::Right) => {
                    // this operator binds tighter, or it is right-associative at the same level,
                    // so we should parse its expression starting with `rhs` first
                    rhs = Self::parse_expr(input, rhs, next_op.precedence())?;
                },
                Ok(_) => {
                    // this operator has lower precedence, or equal precedence and
                    // left-associativity; this is in scenarios like:
                    // `1 * 2 + 3` or `1 * 2 * 3`
                    //
                    // so just break out of the loop and let `lhs` become `1 * 2`
                    // we will parse this operator on the next iteration of the outside loop
                    break;
                },
                Err(_) => {
                    // there is no operator; check if there is a primary expression instead
                    // if there is, this is implicit multiplication
                    //
                    // first, check if the previous operator has higher or equal precedence; if
                    // so, we cannot give priority to implicit multiplication
                    if precedence >= BinOpKind::Mul.precedence() {
                        break;
                    }

                    match input.try_parse::<Primary>() {
                        Ok(primary) => {
                            let expr: Expr = primary.into();
                            let (start_span, end_span) = (rhs.span().start, expr.span().end);
                            let op_span = rhs.span().end..expr.span().start;
                            rhs = Expr::Binary(Binary {
                                lhs: Box::new(rhs),
                                op: BinOp {
                                    kind: BinOpKind::Mul,
                                    implicit: true,
                                    span: op_span,
                                },
                                rhs: Box::new(expr),
                                span: start_span..end_span,
                            });
                        },
                        Err(err) if err.fatal => return Err(err),
                        Err(_) => break,
                    }
                },
            }
        }

        // create the binary node representing `lhs op rhs`
        let (start_span, end_span) = (lhs.span().start, rhs.span().end);
        match op {
            BinOpExt::Op(op) => Ok(Expr::Binary(Binary {
                lhs: Box::new(lhs),
                op,
                rhs: Box::new(rhs),
                span: start_span..end_span,
            })),
            BinOpExt::ImplicitMultiplication => {
                let op_span = lhs.span().end..rhs.span().start;
                Ok(Expr::Binary(Binary {
                    lhs: Box::new(lhs),
                    op: BinOp {
                        kind: BinOpKind::Mul,
                        implicit: true,
                        span: op_span,
                    },
                    rhs: Box::new(rhs),
                    span: start_span..end_span,
                }))
            },
        }
    }

    /// Continues parsing a binary expression starting with the given left-hand-side, only
    /// considering operators with at least the given precedence.
    pub fn parse_expr(
        input: &mut Parser,
        mut lhs: Expr,
        precedence: Precedence,
    ) -> Result<Expr, Error> {
        loop {
            let mut input_ahead = input.clone();
            match input_ahead.try_parse::<BinOp>() {
                Ok(op) if op.precedence() >= precedence => {
                    input.set_cursor(&input_ahead);
                    let rhs = input.try_parse_with_fn(Unary::parse_or_lower)?;
                    lhs = Self::complete_rhs(input, lhs, BinOpExt::Op(op), rhs)?;
                },
                Ok(_) => break,
                Err(_) => {
                    // there is no operator; if an expression follows anyway, this is implicit
                    // multiplication, which binds at the factor level
                    if BinOpKind::Mul.precedence() < precedence {
                        break;
                    }

                    match input.try_parse_with_fn(Unary::parse_or_lower) {
                        Ok(rhs) => {
                            lhs = Self::complete_rhs(
                                input,
                                lhs,
                                BinOpExt::ImplicitMultiplication,
                                rhs,
                            )?;
                        },
                        Err(err) if err.fatal => return Err(err),
                        Err(_) => break,
                    }
                },
            }
        }

        Ok(lhs)
    }
}

impl fmt::Display for Binary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}{}", self.lhs, self.op, self.rhs)
    }
}
