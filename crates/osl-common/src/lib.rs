//! Shared vocabulary for the OSL compiler front-end: source spans, the
//! token type, and the keyword / word-operator lookup tables. Depended on
//! by both `osl-lexer` and `osl-parser` so neither has to depend on the
//! other for token definitions.

pub mod span;
pub mod token;

pub use span::{Position, Span};
pub use token::{keyword_from_str, word_operator_from_str, Token, TokenClass, TokenKind};
