//! Lexer, expression tree and recursive-descent parser for a small arithmetic / lambda language.
//!
//! ```
//! use subex_parser::{parse, tokenizer::TokenKind};
//!
//! let tree = parse("lambda x. x * x + 1").unwrap();
//! let root = tree.root().unwrap();
//! assert_eq!(root.kind(), TokenKind::Lambda);
//! assert_eq!(root.to_string(), "lambda x. x * x + 1");
//! ```

pub mod error;
pub mod parser;
pub mod tokenizer;
pub mod tree;

pub use error::Error;
pub use parser::{parse, Parser};
pub use tree::{NodeId, NodeRef, Order, Tree};
