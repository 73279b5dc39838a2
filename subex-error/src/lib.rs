//! Contains the common [`ErrorKind`] trait used by all errors to display user-facing error
//! messages.

// lets `#[derive(ErrorKind)]` refer to `subex_error::EXPR` from inside this crate's own tests
extern crate self as subex_error;

use ariadne::{Color, Report, Source};
use std::{fmt::{self, Debug, Display}, io, ops::Range};

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// Represents any kind of error that can occur during some operation.
pub trait ErrorKind: Debug + Send {
    /// Returns the one-line description of this error.
    fn message(&self) -> String;

    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<'_, (&'a str, Range<usize>)>;
}

/// An error associated with regions of source code that can be highlighted.
#[derive(Debug)]
pub struct Error {
    /// The regions of the source code that this error originated from.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error with the given spans and kind.
    pub fn new(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind) }
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<'_, (&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }

    /// Writes the report of this error to the given writer.
    pub fn write_report(&self, src_id: &str, input: &str, w: impl io::Write) -> io::Result<()> {
        self.build_report(src_id).write((src_id, Source::from(input)), w)
    }

    /// Report this error to stderr.
    ///
    /// The `ariadne` crate's [`Report`] type does not have a `Display` implementation, so we can
    /// only use its `eprint` method to print to stderr.
    pub fn report_to_stderr(&self, src_id: &str, input: &str) -> io::Result<()> {
        self.build_report(src_id).eprint((src_id, Source::from(input)))
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind.message())
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use subex_attrs::ErrorKind;
    use super::*;

    #[derive(Debug, ErrorKind)]
    #[error(
        message = format!("unknown word `{}`", word),
        labels = ["this word"],
        help = "only single letters are variables",
    )]
    struct UnknownWord {
        word: String,
    }

    #[derive(Debug, ErrorKind)]
    #[error(message = "nothing to see here")]
    struct Bare;

    fn render(error: &Error, input: &str) -> String {
        let mut buf = Vec::new();
        error.write_report("input", input, &mut buf).unwrap();
        String::from_utf8(strip_ansi_escapes::strip(buf)).unwrap()
    }

    #[test]
    fn message_uses_fields() {
        let error = Error::new(vec![4..7], UnknownWord { word: "foo".to_string() });
        assert_eq!(error.to_string(), "unknown word `foo`");
    }

    #[test]
    fn report_contains_label_and_help() {
        let error = Error::new(vec![4..7], UnknownWord { word: "foo".to_string() });
        let report = render(&error, "1 + foo");

        assert!(report.contains("unknown word `foo`"));
        assert!(report.contains("this word"));
        assert!(report.contains("only single letters are variables"));
    }

    #[test]
    fn report_without_labels() {
        let error = Error::new(vec![0..1], Bare);
        let report = render(&error, "x");

        assert!(report.contains("nothing to see here"));
    }
}
