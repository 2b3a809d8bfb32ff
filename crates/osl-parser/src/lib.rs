//! Recursive-descent parser and AST arena for the OSL shading language.
//!
//! [`parse`] consumes a token sequence and produces a single
//! [`Ast`] rooted at a `TranslationUnit` node, or the first [`ParseError`]
//! encountered. [`parse_source`] is a convenience that chains
//! `osl_lexer::Lexer::tokenize` in front of it.

pub mod ast;
pub mod decl_table;
pub mod error;
mod parser;

pub use ast::{Arena, Ast, Node, NodeId, NodeKind, Semantic};
pub use decl_table::DeclTable;
pub use error::{ParseError, ParseErrorKind};
pub use parser::parse;

use std::fmt;

/// Either stage of the front end can fail; this is the error type for the
/// `tokenize`-then-`parse` convenience entry point.
#[derive(Debug, Clone, PartialEq)]
pub enum CompileError {
    Lex(osl_lexer::LexError),
    Parse(ParseError),
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::Lex(e) => write!(f, "{e}"),
            CompileError::Parse(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for CompileError {}

impl From<osl_lexer::LexError> for CompileError {
    fn from(e: osl_lexer::LexError) -> Self {
        CompileError::Lex(e)
    }
}

impl From<ParseError> for CompileError {
    fn from(e: ParseError) -> Self {
        CompileError::Parse(e)
    }
}

/// Tokenize then parse `source` in one call.
pub fn parse_source(source: &str) -> Result<Ast, CompileError> {
    let tokens = osl_lexer::Lexer::tokenize(source)?;
    Ok(parse(&tokens)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_source_chains_lex_and_parse_errors() {
        let err = parse_source("$").unwrap_err();
        assert!(matches!(err, CompileError::Lex(_)));

        let err = parse_source("struct;").unwrap_err();
        assert!(matches!(err, CompileError::Parse(_)));
    }

    #[test]
    fn parse_source_succeeds_on_empty_input() {
        let ast = parse_source("").unwrap();
        assert!(ast.children(ast.root()).is_empty());
    }
}
