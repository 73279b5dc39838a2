pub mod kind;

use ariadne::Report;
use subex_error::ErrorKind;
use std::{fmt, ops::Range};

/// Every kind of failure the tokenizer and parser can produce.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    /// The tokenizer met a lexeme it cannot classify.
    Lex(kind::UnrecognizedToken),

    /// There was nothing to parse.
    EmptyInput(kind::EmptyInput),

    /// The grammar needed another token past the end of the input.
    UnexpectedEof(kind::UnexpectedEof),

    /// The grammar needed a specific token, but found another.
    UnexpectedToken(kind::UnexpectedToken),

    /// Any other grammar violation.
    Syntax(kind::SyntaxError),

    /// A valid expression was followed by trailing tokens.
    Unconsumed(kind::ExpectedEof),
}

/// Implements `From<T>` for [`ParseErrorKind`] for each of its variants.
macro_rules! impl_from_kind {
    ($($variant:ident($kind:ident)),* $(,)?) => {
        $(
            impl From<kind::$kind> for ParseErrorKind {
                fn from(kind: kind::$kind) -> Self {
                    Self::$variant(kind)
                }
            }
        )*

        impl ParseErrorKind {
            /// Returns the wrapped error kind as a trait object.
            fn as_error_kind(&self) -> &dyn ErrorKind {
                match self {
                    $(Self::$variant(kind) => kind as &dyn ErrorKind,)*
                }
            }
        }
    };
}

impl_from_kind!(
    Lex(UnrecognizedToken),
    EmptyInput(EmptyInput),
    UnexpectedEof(UnexpectedEof),
    UnexpectedToken(UnexpectedToken),
    Syntax(SyntaxError),
    Unconsumed(ExpectedEof),
);

impl ErrorKind for ParseErrorKind {
    fn message(&self) -> String {
        self.as_error_kind().message()
    }

    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<'_, (&'a str, Range<usize>)> {
        self.as_error_kind().build_report(src_id, spans)
    }
}

/// A tokenizing or parsing error.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    /// The regions of the source code that this error originated from.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: ParseErrorKind,
}

impl Error {
    /// Creates a new error with the given spans and kind.
    pub fn new(spans: Vec<Range<usize>>, kind: impl Into<ParseErrorKind>) -> Self {
        Self { spans, kind: kind.into() }
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<'_, (&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind.message())
    }
}

impl std::error::Error for Error {}

impl From<Error> for subex_error::Error {
    fn from(err: Error) -> Self {
        subex_error::Error::new(err.spans, err.kind)
    }
}
