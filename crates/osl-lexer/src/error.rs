use std::fmt;

use osl_common::Span;

/// The kinds of lexical failure the tokenizer can report. All are fatal:
/// the lexer stops at the first one and emits no further tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexErrorKind {
    UnknownCharacter,
    InvalidExponent,
    UnterminatedString,
    UnterminatedChar,
    InvalidCharLiteral,
    UnrecognizedEscape,
    UnterminatedBlockComment,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub message: String,
    pub span: Span,
    pub line: u32,
    pub column: u32,
}

impl LexError {
    pub fn new(kind: LexErrorKind, message: impl Into<String>, span: Span, line: u32, column: u32) -> Self {
        LexError {
            kind,
            message: message.into(),
            span,
            line,
            column,
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (line {}, column {})", self.message, self.line, self.column)
    }
}

impl std::error::Error for LexError {}
