//! Best-effort diagnostic textualization for `--print-tokens` and
//! `--print-ast`.
//!
//! This is deliberately minimal: a full pretty-printer with source
//! formatting and colorized output is a separate concern from this front
//! end. What follows is just enough structural textualization to make
//! `--print-tokens`/`--print-ast` useful for manual inspection and for the
//! CLI's own integration tests.

use std::fmt::Write as _;

use osl_common::Token;
use osl_parser::{Ast, NodeId, NodeKind, Semantic};

pub fn dump_tokens(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        let _ = writeln!(
            out,
            "Token, kind: {:?}, type: {:?}, value: {:?}, line: {}, column: {}",
            token.class(),
            token.kind,
            token.value,
            token.line,
            token.column
        );
    }
    out
}

pub fn dump_ast(ast: &Ast) -> String {
    let mut out = String::new();
    dump_node(ast, ast.root(), 0, &mut out);
    out
}

fn dump_node(ast: &Ast, id: NodeId, depth: usize, out: &mut String) {
    let node = ast.node(id);
    let indent = "  ".repeat(depth);
    let _ = write!(out, "{indent}{}", node.kind.label());

    if let Some(name) = node.kind.name() {
        let _ = write!(out, ", name: {name}");
    }
    if let Some(type_name) = node.kind.type_name() {
        let _ = write!(out, ", type: ");
        if node.kind.is_static() {
            let _ = write!(out, "static ");
        }
        if node.kind.is_const() {
            let _ = write!(out, "const ");
        }
        let _ = write!(out, "{type_name}");
    }
    if let Some(value) = node.kind.value() {
        let _ = write!(out, ", value: {value}");
    }
    if node.kind.semantic() != Semantic::None {
        let _ = write!(out, ", semantic: {:?}", node.kind.semantic());
    }
    if let Some(reference) = node.reference {
        let _ = write!(out, ", reference: {:?}", reference);
    }
    out.push('\n');

    for &child in ast.children(id) {
        dump_node(ast, child, depth + 1, out);
    }
}
