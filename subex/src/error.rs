use std::{fmt, io};
use subex_error::Error;

/// Utility enum to package the errors the command-line front end can run into.
#[derive(Debug)]
pub enum CliError {
    /// The input could not be read.
    Io(io::Error),

    /// The input could not be parsed.
    Parse(Error),
}

impl CliError {
    /// Report this error to stderr. Parse errors are rendered as an `ariadne` report pointing into
    /// the input.
    pub fn report_to_stderr(&self, src_id: &str, input: &str) {
        match self {
            Self::Io(err) => eprintln!("{}", err),
            Self::Parse(err) => {
                if let Err(io_err) = err.report_to_stderr(src_id, input) {
                    eprintln!("{} ({})", err, io_err);
                }
            },
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Io(err) => err.fmt(f),
            Self::Parse(err) => err.fmt(f),
        }
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<Error> for CliError {
    fn from(err: Error) -> Self {
        Self::Parse(err)
    }
}

impl From<subex_parser::Error> for CliError {
    fn from(err: subex_parser::Error) -> Self {
        Self::Parse(err.into())
    }
}
