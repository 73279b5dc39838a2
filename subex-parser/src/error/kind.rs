use ariadne::Fmt;
use subex_attrs::ErrorKind;
use subex_error::{ErrorKind, EXPR};
use crate::tokenizer::{keyword::UNARY_FUNCTIONS, TokenKind};
use std::fmt;

/// A lexeme that is not part of the language was encountered.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unrecognized token `{}`", lexeme),
    labels = ["I don't know what this is"],
    help = format!(
        "variables are single letters; the only words allowed are `lambda` and the functions {}",
        UNARY_FUNCTIONS.join(", ").fg(EXPR),
    ),
)]
pub struct UnrecognizedToken {
    /// The lexeme that could not be classified.
    pub lexeme: String,
}

/// The source code contained no tokens at all.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "empty input",
    labels = [format!("add an {} here", "expression".fg(EXPR))],
)]
pub struct EmptyInput;

/// The end of the source code was reached unexpectedly.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected end of input",
    labels = [format!("you might need to add another {} here", "expression".fg(EXPR))],
)]
pub struct UnexpectedEof;

/// A specific kind of token was expected, but another was found.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("expected {}, found `{}`", expected, lexeme),
    labels = [format!("I expected to see {} here", expected)],
    help = format!("found {}", found),
)]
pub struct UnexpectedToken {
    /// The token that was expected.
    pub expected: TokenKind,

    /// The token that was found.
    pub found: TokenKind,

    /// The lexeme of the token that was found.
    pub lexeme: String,
}

/// Why a [`SyntaxError`] was raised.
#[derive(Debug, Clone, PartialEq)]
pub enum SyntaxReason {
    /// A token that cannot start an operand, such as `*` or `)`, was found where an operand
    /// belongs.
    ExpectedOperand {
        /// The lexeme that was found instead.
        found: String,
    },

    /// A unary function name was not followed by a parenthesized argument, as in `cos x`.
    MissingCallParens {
        /// The name of the function.
        function: String,
    },

    /// The expression nests more deeply than the parser allows.
    TooDeep {
        /// The maximum nesting depth.
        limit: usize,
    },
}

impl SyntaxReason {
    /// The text of the label pointing at the error.
    fn label(&self) -> String {
        match self {
            Self::ExpectedOperand { .. } => format!("I expected to see an {} here", "operand".fg(EXPR)),
            Self::MissingCallParens { function } => format!("`{}` must be followed by `(`", function),
            Self::TooDeep { .. } => "nesting limit reached here".to_string(),
        }
    }

    /// The help text attached to the error.
    fn help(&self) -> String {
        match self {
            Self::ExpectedOperand { found } if found == ")" => {
                "this parenthesis is not closing anything".to_string()
            },
            Self::ExpectedOperand { .. } => {
                "operands are numbers, variables, function calls, lambdas, or parenthesized expressions".to_string()
            },
            Self::MissingCallParens { function } => {
                format!("wrap the argument in parentheses: {}", format!("{}(...)", function).fg(EXPR))
            },
            Self::TooDeep { limit } => {
                format!("expressions can be at most {} levels deep; try splitting this one up", limit)
            },
        }
    }
}

impl fmt::Display for SyntaxReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExpectedOperand { found } => write!(f, "expected an operand, found `{}`", found),
            Self::MissingCallParens { function } => {
                write!(f, "the argument of `{}` must be parenthesized", function)
            },
            Self::TooDeep { limit } => write!(f, "expression nested more than {} levels deep", limit),
        }
    }
}

/// A grammar violation that is not a single expected-token mismatch.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("syntax error: {}", reason),
    labels = [reason.label()],
    help = reason.help(),
)]
pub struct SyntaxError {
    /// What went wrong.
    pub reason: SyntaxReason,
}

/// A complete expression was parsed, but tokens remain after it.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unconsumed tokens starting with `{}`", lexeme),
    labels = [format!("I could not understand the remaining {} here", "expression".fg(EXPR))],
    help = if lexeme == ")" {
        "this parenthesis is not closing anything"
    } else {
        "you might be missing an operator before this"
    },
)]
pub struct ExpectedEof {
    /// The lexeme of the first token that was not consumed.
    pub lexeme: String,
}
