mod binary;
pub mod op;
mod primary;

use crate::{
    error::{kind, Error, ParseErrorKind},
    tokenizer::{tokenize, Token, TokenKind},
    tree::{NodeId, Tree, TreeBuilder},
};
use log::debug;
use std::ops::Range;

/// The deepest an expression may nest, counting both the tree height and the levels of
/// parentheses, signs, calls and lambdas the parser descends through.
pub const MAX_DEPTH: usize = 256;

/// Parses the given source into an expression tree.
///
/// ```
/// use subex_parser::parse;
///
/// let tree = parse("2 + 3 * 4").unwrap();
/// let root = tree.root().unwrap();
/// assert_eq!(root.text(), "+");
/// assert_eq!(root.right().unwrap().text(), "*");
/// ```
pub fn parse(source: &str) -> Result<Tree, Error> {
    Parser::new(source)?.parse_full()
}

/// A recursive-descent parser over a pre-lexed token sequence.
///
/// The grammar, from lowest to highest precedence:
///
/// ```text
/// E := T (('+' | '-') T)*
/// T := U (('*' | '/') U)*
/// U := P ('^' U)?
/// P := FUNCTION '(' E ')' | ('+' | '-') P | 'lambda' IDENT '.' E | NUMBER | IDENT | '(' E ')'
/// ```
///
/// A sign in front of an operand is desugared into a binary operation with a synthesized `0` on
/// the left, so `-x` becomes `0 - x`.
#[derive(Debug, Clone)]
pub struct Parser {
    /// The tokens being parsed, always terminated by a [`TokenKind::EndOfInput`] token.
    tokens: Box<[Token]>,

    /// The index of the **next** token to be parsed.
    cursor: usize,

    /// The nodes built so far.
    builder: TreeBuilder,

    /// How many nested levels of the expression are currently being parsed.
    depth: usize,
}

impl Parser {
    /// Tokenizes the given source and creates a parser over its tokens.
    pub fn new(source: &str) -> Result<Self, Error> {
        Ok(Self {
            tokens: tokenize(source)?,
            cursor: 0,
            builder: TreeBuilder::new(),
            depth: 0,
        })
    }

    /// Returns the current token. The cursor is not moved.
    fn current_token(&self) -> &Token {
        // the cursor never moves past the final `EndOfInput` token
        &self.tokens[self.cursor.min(self.tokens.len() - 1)]
    }

    /// Returns the current token, then advances the cursor. The cursor stays on the
    /// [`TokenKind::EndOfInput`] token once it is reached.
    fn next_token(&mut self) -> Token {
        let token = self.current_token().clone();
        if !token.is_end() {
            self.cursor += 1;
        }
        token
    }

    /// Returns the span of the current token.
    fn span(&self) -> Range<usize> {
        self.current_token().span.clone()
    }

    /// Creates an error that points at the current token.
    fn error(&self, kind: impl Into<ParseErrorKind>) -> Error {
        Error::new(vec![self.span()], kind)
    }

    /// Runs `parse` one nesting level deeper. Fails without running it if that would exceed
    /// [`MAX_DEPTH`].
    fn nested<T>(&mut self, parse: impl FnOnce(&mut Self) -> Result<T, Error>) -> Result<T, Error> {
        if self.depth >= MAX_DEPTH {
            return Err(self.error(kind::SyntaxError {
                reason: kind::SyntaxReason::TooDeep { limit: MAX_DEPTH },
            }));
        }

        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Consumes a token of the given kind, or fails without consuming anything.
    fn expect(&mut self, expected: TokenKind) -> Result<Token, Error> {
        let token = self.current_token();
        if token.kind == expected {
            Ok(self.next_token())
        } else if token.is_end() {
            Err(self.error(kind::UnexpectedEof))
        } else {
            Err(self.error(kind::UnexpectedToken {
                expected,
                found: token.kind,
                lexeme: token.text.clone(),
            }))
        }
    }

    /// Parses a complete expression. All the tokens must be consumed by the parser; if not, an
    /// error is returned.
    pub fn parse_full(mut self) -> Result<Tree, Error> {
        if self.current_token().is_end() {
            return Err(self.error(kind::EmptyInput));
        }

        let root: NodeId = self.parse_expr(op::Precedence::Any)?;

        let rest = self.current_token();
        if !rest.is_end() {
            return Err(self.error(kind::ExpectedEof { lexeme: rest.text.clone() }));
        }

        let tree = self.builder.finish(root);

        // long chains of left-associative operators grow the tree without nesting the parser
        if tree.height() > MAX_DEPTH {
            let end = self.tokens.last().map_or(0, |token| token.span.end);
            return Err(Error::new(vec![0..end], kind::SyntaxError {
                reason: kind::SyntaxReason::TooDeep { limit: MAX_DEPTH },
            }));
        }

        debug!(
            "parsed {} tokens into a tree of {} nodes (height {})",
            self.tokens.len(),
            tree.len(),
            tree.height(),
        );
        Ok(tree)
    }
}
