//! Expression precedence chain: assignment, equality, comparison,
//! additive, multiplicative, member, unary, primary.

use osl_common::TokenKind;

use crate::ast::{NodeId, NodeKind};
use crate::error::ParseError;

use super::Parser;

impl<'t> Parser<'t> {
    pub(super) fn parse_expression(&mut self) -> Result<NodeId, ParseError> {
        self.parse_assignment()
    }

    fn parse_assignment(&mut self) -> Result<NodeId, ParseError> {
        self.parse_binary_level(&[TokenKind::Eq], Self::parse_equality)
    }

    fn parse_equality(&mut self) -> Result<NodeId, ParseError> {
        self.parse_binary_level(&[TokenKind::EqEq, TokenKind::BangEq], Self::parse_comparison)
    }

    fn parse_comparison(&mut self) -> Result<NodeId, ParseError> {
        self.parse_binary_level(
            &[
                TokenKind::Gt,
                TokenKind::GtEq,
                TokenKind::Lt,
                TokenKind::LtEq,
            ],
            Self::parse_addition,
        )
    }

    fn parse_addition(&mut self) -> Result<NodeId, ParseError> {
        self.parse_binary_level(&[TokenKind::Plus, TokenKind::Minus], Self::parse_multiplication)
    }

    fn parse_multiplication(&mut self) -> Result<NodeId, ParseError> {
        self.parse_binary_level(&[TokenKind::Star, TokenKind::Slash], Self::parse_member)
    }

    /// Shared left-folding accumulator for every binary precedence level
    /// above `member`: parse one operand at the next-tighter level, then
    /// while the current token is one of `kinds`, build a left-associative
    /// `OperatorBinary` chain.
    fn parse_binary_level(
        &mut self,
        kinds: &[TokenKind],
        next: fn(&mut Self) -> Result<NodeId, ParseError>,
    ) -> Result<NodeId, ParseError> {
        let start = self.current_span();
        let mut left = next(self)?;

        while self.check_any(kinds) {
            let op = self.previous().value.clone();
            let right = next(self)?;

            let node = self.alloc(NodeKind::OperatorBinary { op }, start);
            self.add_child(node, left);
            self.add_child(node, right);
            self.set_span(node, start);
            left = node;
        }

        Ok(left)
    }

    fn parse_member(&mut self) -> Result<NodeId, ParseError> {
        let start = self.current_span();
        let mut left = self.parse_unary()?;

        while self.check(TokenKind::Dot) {
            let right = self.parse_unary()?;

            let node = self.alloc(NodeKind::ExpressionMember, start);
            self.add_child(node, left);
            self.add_child(node, right);
            self.set_span(node, start);
            left = node;
        }

        Ok(left)
    }

    /// Right-recursive: `Unary := (+|-|!) Unary | Primary`.
    fn parse_unary(&mut self) -> Result<NodeId, ParseError> {
        if self.check_any(&[TokenKind::Plus, TokenKind::Minus, TokenKind::Bang]) {
            let op = self.previous().value.clone();
            let start = self.previous().span;
            let operand = self.parse_unary()?;

            let node = self.alloc(NodeKind::OperatorUnary { op }, start);
            self.add_child(node, operand);
            self.set_span(node, start);
            Ok(node)
        } else {
            self.parse_primary()
        }
    }

    fn parse_primary(&mut self) -> Result<NodeId, ParseError> {
        if self.check(TokenKind::LiteralInt) {
            Ok(self.literal_node("int"))
        } else if self.check(TokenKind::LiteralFloat) {
            Ok(self.literal_node("float"))
        } else if self.check(TokenKind::LiteralString) {
            Ok(self.literal_node("string"))
        } else if self.check_any(&[TokenKind::True, TokenKind::False]) {
            Ok(self.literal_node("bool"))
        } else if self.check(TokenKind::Identifier) {
            self.parse_identifier_primary()
        } else if self.check(TokenKind::LParen) {
            let start = self.previous().span;
            let node = self.alloc(NodeKind::ExpressionParen, start);
            let inner = self.parse_expression()?;
            self.add_child(node, inner);
            self.expect(TokenKind::RParen, "a right parenthesis")?;
            self.set_span(node, start);
            Ok(node)
        } else {
            Err(self.fail("Expected an expression"))
        }
    }

    fn literal_node(&mut self, type_name: &str) -> NodeId {
        let span = self.previous().span;
        let value = self.previous().value.clone();
        self.alloc(
            NodeKind::ExpressionLiteral {
                type_name: type_name.to_string(),
                value,
            },
            span,
        )
    }

    fn parse_identifier_primary(&mut self) -> Result<NodeId, ParseError> {
        let name = self.previous().value.clone();
        let start = self.previous().span;

        if self.check(TokenKind::LParen) {
            let node = self.alloc(NodeKind::ExpressionCall { name }, start);
            let mut first = true;
            loop {
                if self.check(TokenKind::RParen) {
                    break;
                }
                if !first {
                    self.expect(TokenKind::Comma, "a comma")?;
                }
                first = false;
                let arg = self.parse_expression()?;
                self.add_child(node, arg);
            }
            self.set_span(node, start);
            Ok(node)
        } else if self.check(TokenKind::LBracket) {
            let node = self.alloc(NodeKind::ExpressionArraySubscript { name }, start);
            let index = self.parse_expression()?;
            self.add_child(node, index);
            self.expect(TokenKind::RBracket, "a right bracket")?;
            self.set_span(node, start);
            Ok(node)
        } else {
            let node = self.alloc(NodeKind::ExpressionDeclarationReference { name: name.clone() }, start);
            if let Some(target) = self.decls.lookup(&name, &self.arena) {
                self.node_mut(node).reference = Some(target);
            }
            Ok(node)
        }
    }
}
