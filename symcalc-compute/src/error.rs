use std::fmt;
use crate::eval::Domain;

/// Errors that can occur while evaluating or differentiating an expression.
///
/// Every error is surfaced synchronously to the immediate caller of the offending operation;
/// nothing is retried or recovered internally, and there are no partial results. An operation
/// either fully succeeds with a value or fully fails with one of these.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A variable has no binding reachable through the context chain.
    UnboundVariable {
        /// The name of the variable that was unbound.
        name: String,

        /// Similarly named variables that are bound, if any.
        suggestions: Vec<String>,
    },

    /// A function call referenced a name that is not in the context's function table.
    UndefinedFunction {
        /// The name of the function that was undefined.
        name: String,

        /// Similarly named functions that are defined, if any.
        suggestions: Vec<String>,
    },

    /// A function was given the wrong number of arguments.
    InvalidArguments {
        /// The name of the function.
        name: String,

        /// The number of arguments the function takes.
        expected: usize,

        /// The number of arguments that were given.
        given: usize,
    },

    /// A node's evaluation has no rule for the requested domain.
    UnsupportedDomain {
        /// A description of the node that could not be evaluated, such as a function or operator
        /// name.
        what: String,

        /// The domain the evaluation was requested under.
        domain: Domain,
    },

    /// A composite function's intermediate dimension exceeds the supported range.
    UnsupportedDimension {
        /// The dimension that was requested.
        dim: usize,
    },

    /// The operation is not defined for the expression it was applied to.
    UnsupportedOperation(String),

    /// Two values with different dimensions were combined, or a function's parameter count did
    /// not match the dimension of the value bound to it.
    MismatchedDimensions {
        /// The dimension that was expected.
        expected: usize,

        /// The dimension that was found.
        found: usize,
    },

    /// Division by zero, or by an interval that contains zero.
    DivisionByZero,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnboundVariable { name, suggestions } => {
                write!(f, "the variable `{}` is not bound in this context", name)?;
                if !suggestions.is_empty() {
                    write!(f, " (did you mean `{}`?)", suggestions.join("`, `"))?;
                }
                Ok(())
            },
            Error::UndefinedFunction { name, suggestions } => {
                write!(f, "the function `{}` is not defined in this context", name)?;
                if !suggestions.is_empty() {
                    write!(f, " (did you mean `{}`?)", suggestions.join("`, `"))?;
                }
                Ok(())
            },
            Error::InvalidArguments { name, expected, given } => {
                write!(
                    f,
                    "the `{}` function takes {} argument(s), but {} were given",
                    name, expected, given
                )
            },
            Error::UnsupportedDomain { what, domain } => {
                write!(f, "`{}` cannot be evaluated in the {} domain", what, domain)
            },
            Error::UnsupportedDimension { dim } => {
                write!(
                    f,
                    "dimension {} is out of the supported range (1 to 4)",
                    dim
                )
            },
            Error::UnsupportedOperation(msg) => write!(f, "unsupported operation: {}", msg),
            Error::MismatchedDimensions { expected, found } => {
                write!(
                    f,
                    "mismatched dimensions: expected {}, found {}",
                    expected, found
                )
            },
            Error::DivisionByZero => write!(f, "division by zero"),
        }
    }
}

impl std::error::Error for Error {}
