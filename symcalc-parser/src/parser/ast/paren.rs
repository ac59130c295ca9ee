use std::{fmt, ops::Range};
use crate::parser::{
    ast::expr::Expr,
    error::{kind, Error},
    token::{CloseParen, OpenParen},
    Parse,
    Parser,
};

/// A parenthesized expression. A [`Paren`] can only contain a single expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Paren {
    /// The inner expression.
    pub expr: Box<Expr>,

    /// The region of the source code that this [`Paren`] was parsed from.
    pub span: Range<usize>,
}

impl Paren {
    /// Returns the span of the parenthesized expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Returns the innermost expression in the parenthesized expression, consuming the [`Paren`].
    pub fn into_innermost(self) -> Expr {
        let mut inner = self.expr;
        while let Expr::Paren(paren) = *inner {
            inner = paren.expr;
        }
        *inner
    }
}

impl Parse for Paren {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let open_paren = input.try_parse::<OpenParen>()?;
        let expr = match input.try_parse::<Expr>() {
            Ok(expr) => expr,
            Err(err) if err.fatal => return Err(err),
            Err(_) => {
                // nothing parseable between the parentheses; point at the pair if it is closed,
                // otherwise report the dangling `(`
                return if input.try_parse::<CloseParen>().is_ok() {
                    let end = input.prev_token().unwrap().span.end;
                    Err(Error::new_fatal(
                        open_paren.span.start..end,
                        kind::EmptyParenthesis,
                    ))
                } else {
                    Err(Error::new_fatal(
                        open_paren.span,
                        kind::UnclosedParenthesis { opening: true },
                    ))
                };
            },
        };
        let close_paren = input.try_parse::<CloseParen>().map_err(|_| {
            Error::new_fatal(
                open_paren.span.clone(),
                kind::UnclosedParenthesis { opening: true },
            )
        })?;

        Ok(Self {
            expr: Box::new(expr),
            span: open_paren.span.start..close_paren.span.end,
        })
    }
}

impl fmt::Display for Paren {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "(")?;
        self.expr.fmt(f)?;
        write!(f, ")")
    }
}
