//! Conversion from the parser's span-carrying AST into the engine's [`Expr`].
//!
//! The conversion is where recognized default-function names become builtin calls, and where a
//! call to an unrecognized name is either turned into a by-name function reference (when it has
//! no arguments) or rejected.

use levenshtein::levenshtein;
use symcalc_parser::parser::ast;
use symcalc_parser::parser::token::op::BinOpKind;
use crate::error::Error;
use crate::funcs::{self, Builtin};
use super::{BinOp, Expr, MathFunction};

impl TryFrom<ast::Expr> for Expr {
    type Error = Error;

    fn try_from(expr: ast::Expr) -> Result<Self, Error> {
        match expr {
            ast::Expr::Literal(literal) => Ok(match literal {
                ast::Literal::Number(num) => Expr::Number(num.value),
                ast::Literal::Symbol(sym) => Expr::Variable(sym.name),
            }),
            ast::Expr::Paren(paren) => Self::try_from(paren.into_innermost()),
            ast::Expr::Call(call) => {
                let name = call.name.name;
                match Builtin::from_name(&name) {
                    Some(builtin) => {
                        if call.args.len() != builtin.arity() {
                            return Err(Error::InvalidArguments {
                                name,
                                expected: builtin.arity(),
                                given: call.args.len(),
                            });
                        }
                        let args = call
                            .args
                            .into_iter()
                            .map(Self::try_from)
                            .collect::<Result<Vec<_>, _>>()?;
                        Ok(Expr::Function(Box::new(MathFunction::builtin(builtin, args))))
                    },
                    None if call.args.is_empty() => {
                        // a bare `name()` is a reference by name, resolved against the context's
                        // function table at evaluation time
                        Ok(Expr::Function(Box::new(MathFunction::call(name))))
                    },
                    None => {
                        let suggestions = funcs::ALL
                            .iter()
                            .map(|builtin| builtin.name())
                            .filter(|candidate| levenshtein(candidate, &name) < 2)
                            .map(str::to_string)
                            .collect();
                        Err(Error::UndefinedFunction { name, suggestions })
                    },
                }
            },
            ast::Expr::Unary(unary) => {
                let operand = Self::try_from(*unary.operand)?;
                Ok(match operand {
                    // fold negation into the literal
                    Expr::Number(n) => Expr::Number(-n),
                    operand => Expr::Neg(Box::new(operand)),
                })
            },
            ast::Expr::Binary(binary) => {
                let op = match binary.op.kind {
                    BinOpKind::Add => BinOp::Plus,
                    BinOpKind::Sub => BinOp::Minus,
                    BinOpKind::Mul => BinOp::Times,
                    BinOpKind::Div => BinOp::Divide,
                    BinOpKind::Exp => BinOp::Power,
                    BinOpKind::Mod => BinOp::Modulo,
                };
                Ok(Expr::Binary(
                    op,
                    Box::new(Self::try_from(*binary.lhs)?),
                    Box::new(Self::try_from(*binary.rhs)?),
                ))
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use symcalc_parser::parser::Parser;
    use crate::expr::FunctionKind;
    use super::*;

    /// Parse the given source and convert it to an [`Expr`].
    fn convert(source: &str) -> Result<Expr, Error> {
        let mut parser = Parser::new(source);
        let ast = parser.try_parse_full::<ast::Expr>().unwrap();
        Expr::try_from(ast)
    }

    #[test]
    fn literals_and_operators() {
        let expr = convert("x * 1 - 2.5").unwrap();
        assert_eq!(expr, Expr::Binary(
            BinOp::Minus,
            Box::new(Expr::Binary(
                BinOp::Times,
                Box::new(Expr::var("x")),
                Box::new(Expr::Number(1.0)),
            )),
            Box::new(Expr::Number(2.5)),
        ));
    }

    #[test]
    fn negated_literal_folds() {
        let expr = convert("x - (-5)").unwrap();
        assert_eq!(expr, Expr::Binary(
            BinOp::Minus,
            Box::new(Expr::var("x")),
            Box::new(Expr::Number(-5.0)),
        ));
    }

    #[test]
    fn default_function_call() {
        let expr = convert("cos(y)").unwrap();
        let Expr::Function(func) = expr else {
            panic!("expected function node");
        };
        assert_eq!(func.kind, FunctionKind::Default(Builtin::Cos));
        assert_eq!(func.args, vec![Expr::var("y")]);
    }

    #[test]
    fn default_function_wraps_compound_argument() {
        let expr = convert("sin(x^2)").unwrap();
        let Expr::Function(func) = expr else {
            panic!("expected function node");
        };
        assert_eq!(func.args, vec![Expr::Bound(Box::new(
            Expr::var("x").pow(Expr::Number(2.0)),
        ))]);
    }

    #[test]
    fn bare_call_to_unknown_name_is_a_reference() {
        let expr = convert("f()").unwrap();
        let Expr::Function(func) = expr else {
            panic!("expected function node");
        };
        assert_eq!(func.kind, FunctionKind::Call);
        assert_eq!(func.name, "f");
    }

    #[test]
    fn unknown_function_with_args_is_rejected() {
        let err = convert("cot(x)").unwrap_err();
        assert_eq!(err, Error::UndefinedFunction {
            name: "cot".to_string(),
            suggestions: vec!["cos".to_string()],
        });
    }

    #[test]
    fn wrong_arity_is_rejected() {
        let err = convert("log(2)").unwrap_err();
        assert_eq!(err, Error::InvalidArguments {
            name: "log".to_string(),
            expected: 2,
            given: 1,
        });
    }

    #[test]
    fn implicit_multiplication_converts() {
        let expr = convert("2x").unwrap();
        assert_eq!(expr, Expr::Binary(
            BinOp::Times,
            Box::new(Expr::Number(2.0)),
            Box::new(Expr::var("x")),
        ));
    }
}
