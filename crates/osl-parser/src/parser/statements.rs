//! Statement grammar. The `do`/`while` and `if`/`else` completions and
//! the bare-`;`-as-statement case are the resolved ambiguities recorded
//! in DESIGN.md.

use osl_common::TokenKind;

use crate::ast::{NodeId, NodeKind};
use crate::error::ParseError;

use super::Parser;

impl<'t> Parser<'t> {
    pub(super) fn parse_statement(&mut self) -> Result<NodeId, ParseError> {
        if self.check(TokenKind::LBrace) {
            self.scoped(|p| p.parse_compound_body())
        } else if self.check(TokenKind::If) {
            self.parse_if()
        } else if self.check(TokenKind::For) {
            self.parse_for()
        } else if self.check(TokenKind::Switch) {
            self.parse_switch()
        } else if self.check(TokenKind::Case) {
            self.parse_case()
        } else if self.check(TokenKind::While) {
            self.parse_while()
        } else if self.check(TokenKind::Do) {
            self.parse_do()
        } else if self.check(TokenKind::Break) {
            let span = self.previous().span;
            self.expect(TokenKind::Semicolon, "a semicolon")?;
            Ok(self.alloc(NodeKind::StatementBreak, span))
        } else if self.check(TokenKind::Continue) {
            let span = self.previous().span;
            self.expect(TokenKind::Semicolon, "a semicolon")?;
            Ok(self.alloc(NodeKind::StatementContinue, span))
        } else if self.check(TokenKind::Return) {
            let start = self.previous().span;
            let node = self.alloc(NodeKind::StatementReturn, start);
            let expr = self.parse_expression()?;
            self.add_child(node, expr);
            self.expect(TokenKind::Semicolon, "a semicolon")?;
            self.set_span(node, start);
            Ok(node)
        } else if self.check_any(&[TokenKind::Static, TokenKind::Const, TokenKind::Var]) {
            // No wrapping statement node: a bare declaration statement
            // *is* the `DeclarationVariable` node, matching the closed
            // node-kind set (`StatementDeclaration` has no producing rule).
            let decl = self.parse_variable_decl()?;
            self.expect(TokenKind::Semicolon, "a semicolon")?;
            Ok(decl)
        } else if self.check(TokenKind::Semicolon) {
            // A bare `;` used as a statement, not only at top level.
            let span = self.previous().span;
            Ok(self.alloc(NodeKind::DeclarationEmpty, span))
        } else {
            let start = self.current_span();
            let node = self.alloc(NodeKind::StatementExpression, start);
            let expr = self.parse_expression()?;
            self.add_child(node, expr);
            self.expect(TokenKind::Semicolon, "a semicolon")?;
            self.set_span(node, start);
            Ok(node)
        }
    }

    /// Parses the statement sequence of a compound body up to its closing
    /// `}` (already consumed: the `{` that opens it). Does not push or pop
    /// a scope itself — callers share this with function bodies, where the
    /// parameters and the body occupy a single scope rather than two
    /// nested ones.
    pub(super) fn parse_compound_body(&mut self) -> Result<NodeId, ParseError> {
        let start = self.previous().span;
        let node = self.alloc(NodeKind::StatementCompound, start);

        loop {
            if self.check(TokenKind::RBrace) {
                break;
            }
            if self.at_end() {
                return Err(self.fail("a statement or a right brace"));
            }
            let stmt = self.parse_statement()?;
            self.add_child(node, stmt);
        }

        self.set_span(node, start);
        Ok(node)
    }

    fn parse_if(&mut self) -> Result<NodeId, ParseError> {
        let start = self.previous().span;
        let node = self.alloc(NodeKind::StatementIf, start);

        self.expect(TokenKind::LParen, "a left parenthesis")?;
        let cond = if self.check(TokenKind::Var) {
            self.parse_variable_decl()?
        } else {
            self.parse_expression()?
        };
        self.add_child(node, cond);
        self.expect(TokenKind::RParen, "a right parenthesis")?;

        let then_branch = self.parse_statement()?;
        self.add_child(node, then_branch);

        if self.check(TokenKind::Else) {
            let else_branch = self.parse_statement()?;
            self.add_child(node, else_branch);
        }

        self.set_span(node, start);
        Ok(node)
    }

    fn parse_for(&mut self) -> Result<NodeId, ParseError> {
        let start = self.previous().span;
        let node = self.alloc(NodeKind::StatementFor, start);

        self.expect(TokenKind::LParen, "a left parenthesis")?;

        let init = self.parse_for_slot(TokenKind::Semicolon, "a semicolon")?;
        self.add_child(node, init);
        let cond = self.parse_for_slot(TokenKind::Semicolon, "a semicolon")?;
        self.add_child(node, cond);
        let step = self.parse_for_slot(TokenKind::RParen, "a right parenthesis")?;
        self.add_child(node, step);

        let body = self.parse_statement()?;
        self.add_child(node, body);

        self.set_span(node, start);
        Ok(node)
    }

    /// One `for`-header slot: a variable declaration, an expression, or
    /// (when the terminator appears immediately) an empty `None` node —
    /// shared across the init/condition/step slots.
    fn parse_for_slot(&mut self, terminator: TokenKind, expected: &str) -> Result<NodeId, ParseError> {
        if self.check(TokenKind::Var) {
            let decl = self.parse_variable_decl()?;
            self.expect(terminator, expected)?;
            Ok(decl)
        } else if self.check(terminator) {
            let span = self.previous().span;
            Ok(self.alloc(NodeKind::None, span))
        } else {
            let expr = self.parse_expression()?;
            self.expect(terminator, expected)?;
            Ok(expr)
        }
    }

    fn parse_switch(&mut self) -> Result<NodeId, ParseError> {
        let start = self.previous().span;
        let node = self.alloc(NodeKind::StatementSwitch, start);

        self.expect(TokenKind::LParen, "a left parenthesis")?;
        let cond = if self.check(TokenKind::Var) {
            self.parse_variable_decl()?
        } else {
            self.parse_expression()?
        };
        self.add_child(node, cond);
        self.expect(TokenKind::RParen, "a right parenthesis")?;

        let body = self.parse_statement()?;
        self.add_child(node, body);

        self.set_span(node, start);
        Ok(node)
    }

    fn parse_case(&mut self) -> Result<NodeId, ParseError> {
        let start = self.previous().span;
        self.expect(TokenKind::LiteralInt, "an integer literal")?;
        let value = self.previous().value.clone();
        self.expect(TokenKind::Colon, "a colon")?;

        let node = self.alloc(NodeKind::StatementCase { value }, start);
        let body = self.parse_statement()?;
        self.add_child(node, body);

        self.set_span(node, start);
        Ok(node)
    }

    fn parse_while(&mut self) -> Result<NodeId, ParseError> {
        let start = self.previous().span;
        let node = self.alloc(NodeKind::StatementWhile, start);

        self.expect(TokenKind::LParen, "a left parenthesis")?;
        let cond = if self.check(TokenKind::Var) {
            self.parse_variable_decl()?
        } else {
            self.parse_expression()?
        };
        self.add_child(node, cond);
        self.expect(TokenKind::RParen, "a right parenthesis")?;

        let body = self.parse_statement()?;
        self.add_child(node, body);

        self.set_span(node, start);
        Ok(node)
    }

    /// `do Stmt while ( Expr ) ;`, children `[body, condition]`.
    fn parse_do(&mut self) -> Result<NodeId, ParseError> {
        let start = self.previous().span;
        let node = self.alloc(NodeKind::StatementDo, start);

        let body = self.parse_statement()?;
        self.add_child(node, body);

        self.expect(TokenKind::While, "'while'")?;
        self.expect(TokenKind::LParen, "a left parenthesis")?;
        let cond = self.parse_expression()?;
        self.add_child(node, cond);
        self.expect(TokenKind::RParen, "a right parenthesis")?;
        self.expect(TokenKind::Semicolon, "a semicolon")?;

        self.set_span(node, start);
        Ok(node)
    }
}
