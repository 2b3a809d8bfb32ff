//! The recursive-descent parser itself, split across this cursor module
//! and three grammar modules (`items`, `statements`, `expressions`)
//! covering top-level declarations, statements, and expressions.

mod expressions;
mod items;
mod statements;

use osl_common::{Span, Token, TokenKind};

use crate::ast::{Arena, Ast, Node, NodeId, NodeKind};
use crate::decl_table::DeclTable;
use crate::error::{ParseError, ParseErrorKind};

/// Parse a complete token sequence into an [`Ast`] rooted at a
/// `TranslationUnit` node.
pub fn parse(tokens: &[Token]) -> Result<Ast, ParseError> {
    let mut parser = Parser::new(tokens);
    let root = parser.parse_translation_unit()?;
    Ok(Ast {
        arena: parser.arena,
        root,
    })
}

pub(super) struct Parser<'t> {
    tokens: &'t [Token],
    pos: usize,
    arena: Arena,
    decls: DeclTable,
}

impl<'t> Parser<'t> {
    fn new(tokens: &'t [Token]) -> Self {
        let mut arena = Arena::new();
        let decls = DeclTable::new(&mut arena);
        Parser {
            tokens,
            pos: 0,
            arena,
            decls,
        }
    }

    fn peek_kind(&self) -> TokenKind {
        self.tokens
            .get(self.pos)
            .map(|t| t.kind)
            .unwrap_or(TokenKind::Eof)
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// The most recently consumed token. Only ever called right after a
    /// `check`/`check_any` that returned `true`.
    fn previous(&self) -> &Token {
        &self.tokens[self.pos - 1]
    }

    /// Consume and return `true` if the current token's kind matches;
    /// otherwise leave the cursor untouched and return `false`.
    fn check(&mut self, kind: TokenKind) -> bool {
        if self.peek_kind() == kind {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Multi-kind variant of `check`.
    fn check_any(&mut self, kinds: &[TokenKind]) -> bool {
        if kinds.contains(&self.peek_kind()) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Put the single most recently consumed token back. Used for the
    /// `static`/`const`/`var` lookahead trick in variable declarations.
    fn unadvance(&mut self) {
        self.pos -= 1;
    }

    /// Consume `kind` or fail with an `UnexpectedToken` naming what was
    /// expected, e.g. `expect(Semicolon, "a semicolon")`.
    fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<(), ParseError> {
        if self.check(kind) {
            Ok(())
        } else {
            Err(self.fail(format!("Expected {expected}")))
        }
    }

    /// Build an `UnexpectedToken` error anchored at the current token
    /// (or the end of input if the cursor has run past the last token).
    fn fail(&self, message: impl Into<String>) -> ParseError {
        self.fail_kind(ParseErrorKind::UnexpectedToken, message)
    }

    fn fail_kind(&self, kind: ParseErrorKind, message: impl Into<String>) -> ParseError {
        match self.tokens.get(self.pos) {
            Some(tok) => ParseError::new(kind, message, tok.span, tok.line, tok.column),
            None => {
                let (span, line, column) = self.end_position();
                ParseError::new(kind, message, span, line, column)
            }
        }
    }

    /// Position used for errors anchored past the last token (e.g. an
    /// unterminated compound statement): the end of the last token's
    /// span, or the origin if the input was empty.
    fn end_position(&self) -> (Span, u32, u32) {
        match self.tokens.last() {
            Some(tok) => (Span::at(tok.span.end), tok.line, tok.column),
            None => (Span::new(0, 0), 1, 1),
        }
    }

    /// Run `f` with a fresh scope pushed onto the declaration table,
    /// popping it afterward on every exit path including an `Err`
    /// return. Expressed here as a method rather than delegating to
    /// `DeclTable::with_scope` since `f` needs `&mut self` (the token
    /// cursor and arena), not just the table.
    fn scoped<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T, ParseError>) -> Result<T, ParseError> {
        self.decls.push_scope();
        let result = f(self);
        self.decls.pop_scope();
        result
    }

    fn alloc(&mut self, kind: NodeKind, span: Span) -> NodeId {
        self.arena.alloc(Node::new(kind, span))
    }

    fn add_child(&mut self, parent: NodeId, child: NodeId) {
        self.arena.add_child(parent, child);
    }

    fn node(&self, id: NodeId) -> &Node {
        self.arena.get(id)
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.arena.get_mut(id)
    }

    /// Widen a node's span to cover everything consumed since `start`.
    /// Called once a node's full extent (including its children) is
    /// known, since `alloc` is often called before the children that
    /// extend the span have been parsed.
    fn set_span(&mut self, id: NodeId, start: Span) {
        let span = self.span_from(start);
        self.arena.get_mut(id).span = span;
    }

    /// The span of the token at the cursor, used to anchor a node that
    /// starts before any token belonging to it has been consumed yet
    /// (e.g. an expression statement, which has no leading keyword).
    fn current_span(&self) -> Span {
        match self.tokens.get(self.pos) {
            Some(tok) => tok.span,
            None => self.end_position().0,
        }
    }

    fn span_from(&self, start: Span) -> Span {
        let end = if self.pos == 0 {
            start.end
        } else {
            self.tokens
                .get(self.pos - 1)
                .map(|t| t.span.end)
                .unwrap_or(start.end)
        };
        start.merge(Span::at(end))
    }
}
