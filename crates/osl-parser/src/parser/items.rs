//! Top-level declarations: structs, typedefs, functions, and file-scope
//! variables.

use osl_common::TokenKind;

use crate::ast::{NodeId, NodeKind, Semantic};
use crate::error::{ParseError, ParseErrorKind};

use super::Parser;

impl<'t> Parser<'t> {
    pub(super) fn parse_translation_unit(&mut self) -> Result<NodeId, ParseError> {
        let root = self.alloc(NodeKind::TranslationUnit, osl_common::Span::new(0, 0));

        while !self.at_end() {
            if self.check(TokenKind::Struct) {
                let decl = self.parse_struct_decl()?;
                self.add_child(root, decl);
            } else if self.check(TokenKind::Typedef) {
                self.parse_typedef_decl()?;
            } else if self.check(TokenKind::Function) {
                let decl = self.parse_function_decl()?;
                self.add_child(root, decl);
            } else if self.check_any(&[TokenKind::Static, TokenKind::Const, TokenKind::Var]) {
                let decl = self.parse_variable_decl()?;
                self.add_child(root, decl);
            } else if self.check(TokenKind::Semicolon) {
                let span = self.previous().span;
                let decl = self.alloc(NodeKind::DeclarationEmpty, span);
                self.add_child(root, decl);
            } else {
                return Err(self.fail("Expected a keyword"));
            }
        }

        Ok(root)
    }

    fn parse_struct_decl(&mut self) -> Result<NodeId, ParseError> {
        self.expect(TokenKind::Identifier, "an identifier")?;
        let name = self.previous().value.clone();
        let start = self.previous().span;
        let node = self.alloc(NodeKind::DeclarationStruct { name }, start);

        if self.check(TokenKind::LBrace) {
            loop {
                if self.check(TokenKind::RBrace) {
                    if self.node(node).children.is_empty() {
                        return Err(self.fail_kind(
                            ParseErrorKind::EmptyStruct,
                            "Structure must have at least one member",
                        ));
                    }
                    break;
                } else if self.check(TokenKind::Var) {
                    let field = self.parse_struct_field()?;
                    self.add_child(node, field);
                } else {
                    return Err(self.fail("an attribute"));
                }
            }
        } else if self.check(TokenKind::Semicolon) {
            // Forward declaration: no fields.
        } else {
            return Err(self.fail("a left brace or a semicolon"));
        }

        self.decls.declare(node);
        self.set_span(node, start);
        Ok(node)
    }

    fn parse_struct_field(&mut self) -> Result<NodeId, ParseError> {
        let start = self.previous().span;
        let mut semantic = Semantic::None;

        if self.check(TokenKind::LBracket) {
            let mut first = true;
            loop {
                if self.check(TokenKind::RBracket) {
                    break;
                } else if (first || self.check(TokenKind::Comma)) && self.check(TokenKind::Identifier) {
                    first = false;
                    let attribute = self.previous().value.clone();
                    self.expect(TokenKind::Eq, "an equality sign")?;
                    self.expect(TokenKind::Identifier, "an identifier")?;
                    let value = self.previous().value.clone();

                    if attribute == "semantic" {
                        semantic = Semantic::from_attribute_value(&value).ok_or_else(|| {
                            self.fail_kind(ParseErrorKind::InvalidSemantic, "Invalid semantic")
                        })?;
                    } else {
                        return Err(
                            self.fail_kind(ParseErrorKind::InvalidAttribute, "Invalid attribute")
                        );
                    }
                } else {
                    return Err(self.fail("an identifier"));
                }
            }
        }

        self.expect(TokenKind::Identifier, "an identifier")?;
        let name = self.previous().value.clone();
        self.expect(TokenKind::Colon, "a colon")?;
        self.expect(TokenKind::Identifier, "a type name")?;
        let type_name = self.previous().value.clone();
        self.expect(TokenKind::Semicolon, "a semicolon")?;

        let span = self.span_from(start);
        Ok(self.alloc(
            NodeKind::DeclarationField {
                name,
                type_name,
                semantic,
            },
            span,
        ))
    }

    /// Typedefs produce no AST node; the declaration is still validated
    /// and consumed.
    fn parse_typedef_decl(&mut self) -> Result<(), ParseError> {
        self.expect(TokenKind::Identifier, "a type name")?;
        self.expect(TokenKind::Identifier, "a type name")?;
        self.expect(TokenKind::Semicolon, "a semicolon")?;
        Ok(())
    }

    fn parse_function_decl(&mut self) -> Result<NodeId, ParseError> {
        self.expect(TokenKind::Identifier, "a function name")?;
        let name = self.previous().value.clone();
        let start = self.previous().span;
        let func = self.alloc(
            NodeKind::DeclarationFunction {
                name,
                type_name: String::new(),
            },
            start,
        );

        if !self.check(TokenKind::LParen) {
            return Err(self.fail("Unexpected end of function declaration"));
        }

        let mut first = true;
        loop {
            if self.check(TokenKind::RParen) {
                break;
            } else if (first || self.check(TokenKind::Comma)) && self.check(TokenKind::Identifier)
            {
                first = false;
                let pname = self.previous().value.clone();
                let pstart = self.previous().span;
                self.expect(TokenKind::Colon, "a colon")?;
                self.expect(TokenKind::Identifier, "a type name")?;
                let ptype = self.previous().value.clone();
                let pspan = self.span_from(pstart);
                let param = self.alloc(
                    NodeKind::DeclarationParameter {
                        name: pname,
                        type_name: ptype,
                    },
                    pspan,
                );
                self.add_child(func, param);
            } else {
                return Err(self.fail("Expected a comma, keyword or a right parenthesis"));
            }
        }

        self.expect(TokenKind::Colon, "a colon")?;
        self.expect(TokenKind::Identifier, "a type name")?;
        let type_name = self.previous().value.clone();
        if let NodeKind::DeclarationFunction { type_name: t, .. } = &mut self.node_mut(func).kind {
            *t = type_name;
        }

        if self.check(TokenKind::LBrace) {
            // Registered into the enclosing scope before the body is
            // parsed, so recursive calls within the body resolve.
            self.decls.declare(func);
            let params = self.node(func).children.to_vec();
            self.scoped(|p| {
                for param in &params {
                    p.decls.declare(*param);
                }
                let body = p.parse_compound_body()?;
                p.add_child(func, body);
                Ok(())
            })?;
        } else if self.check(TokenKind::Semicolon) {
            self.decls.declare(func);
        } else {
            return Err(self.fail("Expected a left brace or a semicolon"));
        }

        self.set_span(func, start);
        Ok(func)
    }

    pub(super) fn parse_variable_decl(&mut self) -> Result<NodeId, ParseError> {
        let start = self.previous().span;
        let is_static = if self.previous().kind == TokenKind::Static {
            true
        } else {
            self.unadvance();
            false
        };

        let is_const = if self.check(TokenKind::Const) {
            true
        } else if self.check(TokenKind::Var) {
            false
        } else {
            return Err(self.fail("Expected const or var"));
        };

        if !self.check(TokenKind::Identifier) {
            return Err(self.fail("Unexpected end of variable declaration"));
        }
        let name = self.previous().value.clone();
        self.expect(TokenKind::Colon, "a colon")?;
        self.expect(TokenKind::Identifier, "a type name")?;
        let type_name = self.previous().value.clone();

        let span = self.span_from(start);
        let var = self.alloc(
            NodeKind::DeclarationVariable {
                name,
                type_name,
                is_static,
                is_const,
            },
            span,
        );
        self.decls.declare(var);

        if self.check(TokenKind::Eq) {
            let expr = self.parse_expression()?;
            self.add_child(var, expr);
        } else if self.check(TokenKind::LParen) {
            let expr = self.parse_expression()?;
            self.expect(TokenKind::RParen, "a right parenthesis")?;
            self.add_child(var, expr);
        }

        self.set_span(var, start);
        Ok(var)
    }
}
