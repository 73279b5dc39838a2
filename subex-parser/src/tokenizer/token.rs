use logos::Logos;
use std::{fmt, ops::Range};

/// The raw lexemes recognized by the scanner. Words are classified into [`TokenKind::Lambda`],
/// [`TokenKind::UnaryOperator`] or [`TokenKind::Identifier`] afterwards, since only the keyword
/// table decides which words are legal.
#[derive(Logos, Clone, Copy, Debug, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub(crate) enum RawToken {
    #[token("+")]
    #[token("-")]
    #[token("*")]
    #[token("/")]
    #[token("^")]
    Operator,

    #[token("(")]
    OpenParen,

    #[token(")")]
    CloseParen,

    #[token(".")]
    Dot,

    #[regex(r"[a-zA-Z]+")]
    Word,

    // a trailing `.` is swallowed here so that `1.` is rejected instead of lexed as `1` `.`
    #[regex(r"[0-9]+(\.[0-9]*)?")]
    Number,

    #[regex(r".", priority = 0)]
    Symbol,
}

/// The different kinds of tokens that can be produced by the tokenizer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// An integer or decimal literal, such as `0`, `42` or `3.14`.
    Number,

    /// A single-letter variable name.
    Identifier,

    /// The `lambda` keyword.
    Lambda,

    /// The `.` separating a lambda's parameter from its body.
    Dot,

    /// One of `+`, `-`, `*`, `/` or `^`.
    BinaryOperator,

    /// A unary function name, such as `sqrt` or `cos`.
    UnaryOperator,

    /// `(`
    OpenParen,

    /// `)`
    CloseParen,

    /// Produced once the whole input has been consumed.
    EndOfInput,

    /// A lexeme that could not be classified.
    Invalid,
}

impl TokenKind {
    /// Returns true if tokens of this kind are leaves of the expression tree.
    pub fn is_leaf(self) -> bool {
        matches!(self, TokenKind::Number | TokenKind::Identifier)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let description = match self {
            TokenKind::Number => "a number",
            TokenKind::Identifier => "an identifier",
            TokenKind::Lambda => "`lambda`",
            TokenKind::Dot => "`.`",
            TokenKind::BinaryOperator => "an operator",
            TokenKind::UnaryOperator => "a function name",
            TokenKind::OpenParen => "`(`",
            TokenKind::CloseParen => "`)`",
            TokenKind::EndOfInput => "the end of the input",
            TokenKind::Invalid => "an unrecognized token",
        };
        f.write_str(description)
    }
}

/// A token produced by the tokenizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,

    /// The raw lexeme that was parsed into this token.
    pub text: String,

    /// The region of the source code that this token originated from. Tokens synthesized by the
    /// parser have an empty span at the position they stand in for.
    pub span: Range<usize>,
}

impl Token {
    /// Creates a new token.
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Range<usize>) -> Self {
        Self { kind, text: text.into(), span }
    }

    /// Returns true if this token marks the end of the input.
    pub fn is_end(&self) -> bool {
        self.kind == TokenKind::EndOfInput
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
