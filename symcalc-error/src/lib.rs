//! Contains the common [`ErrorKind`] trait used by all reportable errors to display user-facing
//! error messages.

use ariadne::{Color, Report};
use std::{fmt::Debug, ops::Range};

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// Represents any kind of error that can occur while processing source code.
pub trait ErrorKind: Debug + Send {
    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)>;
}

/// An error associated with regions of source code that can be highlighted.
#[derive(Debug)]
pub struct Error {
    /// The regions of the source code that this error originated from.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,

    /// Whether the error is fatal.
    ///
    /// A fatal error means that the parser is quite confident about what the user was trying to
    /// write, but the input is still invalid in some way. Fatal errors short-circuit the parser
    /// instead of letting it backtrack and try other interpretations of the input.
    pub fatal: bool,
}

impl Error {
    /// Creates a new non-fatal error with the given span and kind.
    pub fn new(span: Range<usize>, kind: impl ErrorKind + 'static) -> Self {
        Self {
            spans: vec![span],
            kind: Box::new(kind),
            fatal: false,
        }
    }

    /// Creates a new fatal error with the given span and kind.
    pub fn new_fatal(span: Range<usize>, kind: impl ErrorKind + 'static) -> Self {
        Self {
            spans: vec![span],
            kind: Box::new(kind),
            fatal: true,
        }
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }
}
