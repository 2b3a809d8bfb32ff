//! The scoped declaration table used for identifier resolution during
//! parsing. A stack of scopes, each an ordered list of non-owning
//! `NodeId`s into the parser's arena, plus a persistent builtin-type list
//! searched last.

use osl_common::Span;

use crate::ast::{Arena, Node, NodeKind};
use crate::NodeId;

/// The eleven primitive types recognized without user definition.
const BUILTIN_TYPES: &[&str] = &[
    "void", "bool", "int", "uint", "float", "double", "vec2", "vec3", "vec4", "mat3", "mat4",
];

pub struct DeclTable {
    scopes: Vec<Vec<NodeId>>,
    builtins: Vec<NodeId>,
}

impl DeclTable {
    /// Build a fresh table with one bottom scope (the translation unit's)
    /// and the builtin list allocated into `arena`.
    pub fn new(arena: &mut Arena) -> Self {
        let builtins = BUILTIN_TYPES
            .iter()
            .map(|name| {
                arena.alloc(Node::new(
                    NodeKind::DeclarationStruct {
                        name: (*name).to_string(),
                    },
                    Span::new(0, 0),
                ))
            })
            .collect();

        DeclTable {
            scopes: vec![Vec::new()],
            builtins,
        }
    }

    /// Current scope-stack depth, including the bottom translation-unit
    /// scope.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn builtins(&self) -> &[NodeId] {
        &self.builtins
    }

    /// Enter a new lexical scope, e.g. on a compound statement's `{`.
    pub fn push_scope(&mut self) {
        self.scopes.push(Vec::new());
    }

    /// Leave the innermost scope, e.g. on a compound statement's `}`.
    /// Called unconditionally after the scope's body has been parsed, on
    /// every exit path including an `Err` return, so depth stays balanced
    /// even when parsing aborts partway through.
    pub fn pop_scope(&mut self) {
        self.scopes.pop();
    }

    /// Register `id` as visible for the remainder of the innermost scope.
    pub fn declare(&mut self, id: NodeId) {
        self.scopes
            .last_mut()
            .expect("translation-unit scope is never popped")
            .push(id);
    }

    /// Search the scope stack top-to-bottom, then the builtin list, for a
    /// declaration named `name`. The first match wins, matching ordinary
    /// lexical shadowing.
    pub fn lookup(&self, name: &str, arena: &Arena) -> Option<NodeId> {
        for scope in self.scopes.iter().rev() {
            for &id in scope.iter().rev() {
                if arena.get(id).kind.decl_name() == Some(name) {
                    return Some(id);
                }
            }
        }
        for &id in &self.builtins {
            if arena.get(id).kind.decl_name() == Some(name) {
                return Some(id);
            }
        }
        None
    }
}

/// Runs `body` with a fresh scope pushed onto `table`, popping it
/// afterward regardless of whether `body` returns `Ok` or `Err`.
/// Expressed as a closure rather than a guard value because the closure
/// also needs `&mut` access to the arena and token cursor that own the
/// table.
pub fn with_scope<T, E>(
    table: &mut DeclTable,
    body: impl FnOnce(&mut DeclTable) -> Result<T, E>,
) -> Result<T, E> {
    table.push_scope();
    let result = body(table);
    table.pop_scope();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::NodeKind;

    #[test]
    fn fresh_table_has_one_scope_and_eleven_builtins() {
        let mut arena = Arena::new();
        let table = DeclTable::new(&mut arena);
        assert_eq!(table.depth(), 1);
        assert_eq!(table.builtins().len(), 11);
    }

    #[test]
    fn lookup_finds_builtin_type() {
        let mut arena = Arena::new();
        let table = DeclTable::new(&mut arena);
        let found = table.lookup("float", &arena).expect("float is builtin");
        assert_eq!(arena.get(found).kind.decl_name(), Some("float"));
    }

    #[test]
    fn inner_scope_shadows_outer() {
        let mut arena = Arena::new();
        let mut table = DeclTable::new(&mut arena);

        let outer = arena.alloc(Node::new(
            NodeKind::DeclarationVariable {
                name: "x".into(),
                type_name: "int".into(),
                is_static: false,
                is_const: false,
            },
            Span::new(0, 0),
        ));
        table.declare(outer);

        table.push_scope();
        let inner = arena.alloc(Node::new(
            NodeKind::DeclarationVariable {
                name: "x".into(),
                type_name: "float".into(),
                is_static: false,
                is_const: false,
            },
            Span::new(0, 0),
        ));
        table.declare(inner);

        assert_eq!(table.lookup("x", &arena), Some(inner));
        table.pop_scope();
        assert_eq!(table.lookup("x", &arena), Some(outer));
    }

    #[test]
    fn unresolved_name_is_not_an_error_here() {
        let mut arena = Arena::new();
        let table = DeclTable::new(&mut arena);
        assert_eq!(table.lookup("nope", &arena), None);
    }

    #[test]
    fn with_scope_pops_even_when_body_errs() {
        let mut arena = Arena::new();
        let mut table = DeclTable::new(&mut arena);
        let depth_before = table.depth();
        let result: Result<(), &str> = with_scope(&mut table, |t| {
            assert_eq!(t.depth(), depth_before + 1);
            Err("boom")
        });
        assert_eq!(result, Err("boom"));
        assert_eq!(table.depth(), depth_before);
    }
}
