pub mod keyword;
pub mod token;

use crate::error::{kind, Error};
use log::{debug, trace};
use logos::Logos;
use token::RawToken;
pub use token::{Token, TokenKind};

/// Returns true if the lexeme is a well-formed number literal: `0` or a digit string without a
/// leading zero, optionally followed by `.` and at least one digit.
fn is_valid_number(lexeme: &str) -> bool {
    let (int, frac) = match lexeme.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (lexeme, None),
    };

    let int_ok = int == "0" || (!int.is_empty() && !int.starts_with('0'));
    let frac_ok = frac.map_or(true, |frac| !frac.is_empty());
    int_ok && frac_ok
}

/// Classifies a run of letters.
fn classify_word(word: &str) -> TokenKind {
    if word == keyword::LAMBDA {
        TokenKind::Lambda
    } else if keyword::is_unary_function(word) {
        TokenKind::UnaryOperator
    } else if word.chars().count() == 1 {
        TokenKind::Identifier
    } else {
        TokenKind::Invalid
    }
}

/// A cursor over the tokens of a source string.
///
/// Tokens are produced one at a time by [`Lexer::next_token`]. Once the end of the input is
/// reached, every further call yields another [`TokenKind::EndOfInput`] token. [`Lexer::reset`]
/// rewinds the cursor to the beginning of the source.
pub struct Lexer<'source> {
    /// The source code being tokenized.
    source: &'source str,

    /// The underlying scanner.
    inner: logos::Lexer<'source, RawToken>,
}

impl<'source> Lexer<'source> {
    /// Creates a new lexer positioned at the beginning of the given source.
    pub fn new(source: &'source str) -> Self {
        Self {
            source,
            inner: RawToken::lexer(source),
        }
    }

    /// Moves the cursor back to the beginning of the source.
    pub fn reset(&mut self) {
        self.inner = RawToken::lexer(self.source);
    }

    /// Returns the next token in the source, advancing the cursor past it.
    ///
    /// Returns an error if the next lexeme cannot be classified. The cursor still moves past the
    /// offending lexeme.
    pub fn next_token(&mut self) -> Result<Token, Error> {
        let Some(raw) = self.inner.next() else {
            let end = self.source.len();
            return Ok(Token::new(TokenKind::EndOfInput, "", end..end));
        };

        let span = self.inner.span();
        let lexeme = self.inner.slice();
        let kind = match raw {
            Ok(RawToken::Operator) => TokenKind::BinaryOperator,
            Ok(RawToken::OpenParen) => TokenKind::OpenParen,
            Ok(RawToken::CloseParen) => TokenKind::CloseParen,
            Ok(RawToken::Dot) => TokenKind::Dot,
            Ok(RawToken::Word) => classify_word(lexeme),
            Ok(RawToken::Number) if is_valid_number(lexeme) => TokenKind::Number,
            Ok(RawToken::Number) | Ok(RawToken::Symbol) | Err(()) => TokenKind::Invalid,
        };

        if kind == TokenKind::Invalid {
            return Err(Error::new(vec![span], kind::UnrecognizedToken {
                lexeme: lexeme.to_owned(),
            }));
        }

        trace!("token {:?} `{}` at {:?}", kind, lexeme, span);
        Ok(Token::new(kind, lexeme, span))
    }

    /// Tokenizes the whole source from the beginning, up to and including the
    /// [`TokenKind::EndOfInput`] token. Calling this repeatedly yields the same tokens.
    pub fn tokenize_all(&mut self) -> Result<Vec<Token>, Error> {
        self.reset();
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token()?;
            let done = token.is_end();
            tokens.push(token);
            if done {
                break;
            }
        }

        debug!("tokenized {} bytes into {} tokens", self.source.len(), tokens.len());
        Ok(tokens)
    }
}

/// Returns an owned array containing all of the tokens produced by the tokenizer, terminated by
/// a single [`TokenKind::EndOfInput`] token.
pub fn tokenize(input: &str) -> Result<Box<[Token]>, Error> {
    Lexer::new(input).tokenize_all().map(Vec::into_boxed_slice)
}
