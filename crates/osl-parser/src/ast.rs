//! The AST arena: node storage addressed by a stable `NodeId`, plus the
//! tagged `NodeKind` sum type. One enum variant per node kind carries only
//! the scalar fields that kind actually uses; `children` and `reference`
//! live on every `Node` since their meaning (owning vs. non-owning) is
//! uniform even though what they point to varies by kind.

use osl_common::Span;

/// A stable, copyable handle into an `Arena`. Never dereferenced directly;
/// always looked up through the arena that allocated it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    fn from_index(index: usize) -> Self {
        NodeId(index as u32)
    }

    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Vertex-attribute tag attached to a struct field declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Semantic {
    #[default]
    None,
    Binormal,
    BlendIndices,
    BlendWeight,
    Color,
    Normal,
    Position,
    PositionTransformed,
    PointSize,
    Tangent,
    TextureCoordinates,
}

impl Semantic {
    /// Look up a semantic by its attribute-value spelling, e.g. `"normal"`.
    /// Returns `None` (the Rust `Option`, not the `Semantic::None` variant)
    /// when the text does not name a recognized semantic.
    pub fn from_attribute_value(s: &str) -> Option<Semantic> {
        Some(match s {
            "binormal" => Semantic::Binormal,
            "blend_indices" => Semantic::BlendIndices,
            "blend_weight" => Semantic::BlendWeight,
            "color" => Semantic::Color,
            "normal" => Semantic::Normal,
            "position" => Semantic::Position,
            "position_transformed" => Semantic::PositionTransformed,
            "point_size" => Semantic::PointSize,
            "tangent" => Semantic::Tangent,
            "texture_coordinates" => Semantic::TextureCoordinates,
            _ => return None,
        })
    }
}

/// The complete, closed set of AST node kinds. Every node carries exactly
/// one of these.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    None,
    TranslationUnit,
    DeclarationEmpty,
    DeclarationStruct {
        name: String,
    },
    DeclarationField {
        name: String,
        type_name: String,
        semantic: Semantic,
    },
    DeclarationFunction {
        name: String,
        type_name: String,
    },
    DeclarationVariable {
        name: String,
        type_name: String,
        is_static: bool,
        is_const: bool,
    },
    DeclarationParameter {
        name: String,
        type_name: String,
    },
    ExpressionCall {
        name: String,
    },
    ExpressionLiteral {
        type_name: String,
        value: String,
    },
    ExpressionDeclarationReference {
        name: String,
    },
    ExpressionParen,
    ExpressionMember,
    ExpressionArraySubscript {
        name: String,
    },
    /// Closed-set member with no producing grammar rule: a bare
    /// `static|const|var` statement yields `DeclarationVariable` directly
    /// rather than a wrapping statement node.
    StatementDeclaration,
    StatementCompound,
    StatementIf,
    StatementFor,
    StatementSwitch,
    StatementCase {
        value: String,
    },
    StatementWhile,
    StatementDo,
    StatementBreak,
    StatementContinue,
    StatementReturn,
    StatementExpression,
    OperatorUnary {
        op: String,
    },
    OperatorBinary {
        op: String,
    },
    OperatorTernary,
}

impl NodeKind {
    /// The name a declaration-bearing node is looked up by in the scope
    /// stack. `None` for node kinds that do not declare anything.
    pub fn decl_name(&self) -> Option<&str> {
        match self {
            NodeKind::DeclarationStruct { name }
            | NodeKind::DeclarationFunction { name, .. }
            | NodeKind::DeclarationVariable { name, .. }
            | NodeKind::DeclarationParameter { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            NodeKind::DeclarationStruct { name }
            | NodeKind::DeclarationFunction { name, .. }
            | NodeKind::DeclarationVariable { name, .. }
            | NodeKind::DeclarationParameter { name, .. }
            | NodeKind::DeclarationField { name, .. }
            | NodeKind::ExpressionCall { name }
            | NodeKind::ExpressionDeclarationReference { name }
            | NodeKind::ExpressionArraySubscript { name } => Some(name),
            _ => None,
        }
    }

    pub fn type_name(&self) -> Option<&str> {
        match self {
            NodeKind::DeclarationField { type_name, .. }
            | NodeKind::DeclarationFunction { type_name, .. }
            | NodeKind::DeclarationVariable { type_name, .. }
            | NodeKind::DeclarationParameter { type_name, .. }
            | NodeKind::ExpressionLiteral { type_name, .. } => Some(type_name),
            _ => None,
        }
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            NodeKind::ExpressionLiteral { value, .. } | NodeKind::StatementCase { value } => {
                Some(value)
            }
            NodeKind::OperatorUnary { op } | NodeKind::OperatorBinary { op } => Some(op),
            _ => None,
        }
    }

    pub fn is_static(&self) -> bool {
        matches!(self, NodeKind::DeclarationVariable { is_static: true, .. })
    }

    pub fn is_const(&self) -> bool {
        matches!(self, NodeKind::DeclarationVariable { is_const: true, .. })
    }

    pub fn semantic(&self) -> Semantic {
        match self {
            NodeKind::DeclarationField { semantic, .. } => *semantic,
            _ => Semantic::None,
        }
    }

    /// The `kind` discriminator's display name, used by diagnostic
    /// textualization.
    pub fn label(&self) -> &'static str {
        match self {
            NodeKind::None => "None",
            NodeKind::TranslationUnit => "TranslationUnit",
            NodeKind::DeclarationEmpty => "DeclarationEmpty",
            NodeKind::DeclarationStruct { .. } => "DeclarationStruct",
            NodeKind::DeclarationField { .. } => "DeclarationField",
            NodeKind::DeclarationFunction { .. } => "DeclarationFunction",
            NodeKind::DeclarationVariable { .. } => "DeclarationVariable",
            NodeKind::DeclarationParameter { .. } => "DeclarationParameter",
            NodeKind::ExpressionCall { .. } => "ExpressionCall",
            NodeKind::ExpressionLiteral { .. } => "ExpressionLiteral",
            NodeKind::ExpressionDeclarationReference { .. } => "ExpressionDeclarationReference",
            NodeKind::ExpressionParen => "ExpressionParen",
            NodeKind::ExpressionMember => "ExpressionMember",
            NodeKind::ExpressionArraySubscript { .. } => "ExpressionArraySubscript",
            NodeKind::StatementDeclaration => "StatementDeclaration",
            NodeKind::StatementCompound => "StatementCompound",
            NodeKind::StatementIf => "StatementIf",
            NodeKind::StatementFor => "StatementFor",
            NodeKind::StatementSwitch => "StatementSwitch",
            NodeKind::StatementCase { .. } => "StatementCase",
            NodeKind::StatementWhile => "StatementWhile",
            NodeKind::StatementDo => "StatementDo",
            NodeKind::StatementBreak => "StatementBreak",
            NodeKind::StatementContinue => "StatementContinue",
            NodeKind::StatementReturn => "StatementReturn",
            NodeKind::StatementExpression => "StatementExpression",
            NodeKind::OperatorUnary { .. } => "OperatorUnary",
            NodeKind::OperatorBinary { .. } => "OperatorBinary",
            NodeKind::OperatorTernary => "OperatorTernary",
        }
    }
}

/// A single AST node: its kind-specific payload, the owned children in
/// insertion order, a source span, and an optional non-owning back-edge to
/// the declaration it resolves to (only ever set on
/// `ExpressionDeclarationReference` nodes).
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
    pub children: Vec<NodeId>,
    pub reference: Option<NodeId>,
}

impl Node {
    pub fn new(kind: NodeKind, span: Span) -> Self {
        Node {
            kind,
            span,
            children: Vec::new(),
            reference: None,
        }
    }
}

/// Owns all node storage for one parsed translation unit. Nodes are
/// appended only, never removed, so `NodeId`s are stable for the arena's
/// entire lifetime and `children` can never form a cycle.
#[derive(Debug, Default)]
pub struct Arena {
    nodes: Vec<Node>,
}

impl Arena {
    pub fn new() -> Self {
        Arena { nodes: Vec::new() }
    }

    pub fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId::from_index(self.nodes.len());
        self.nodes.push(node);
        id
    }

    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    pub fn add_child(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent.index()].children.push(child);
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// The result of a successful parse: the arena plus the root
/// `TranslationUnit` node id.
#[derive(Debug)]
pub struct Ast {
    pub arena: Arena,
    pub root: NodeId,
}

impl Ast {
    pub fn node(&self, id: NodeId) -> &Node {
        self.arena.get(id)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.arena.get(id).children
    }

    pub fn root(&self) -> NodeId {
        self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arena_assigns_increasing_ids() {
        let mut arena = Arena::new();
        let a = arena.alloc(Node::new(NodeKind::None, Span::new(0, 0)));
        let b = arena.alloc(Node::new(NodeKind::None, Span::new(0, 0)));
        assert_ne!(a, b);
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn add_child_appends_in_order() {
        let mut arena = Arena::new();
        let parent = arena.alloc(Node::new(NodeKind::StatementCompound, Span::new(0, 0)));
        let c1 = arena.alloc(Node::new(NodeKind::StatementBreak, Span::new(0, 0)));
        let c2 = arena.alloc(Node::new(NodeKind::StatementContinue, Span::new(0, 0)));
        arena.add_child(parent, c1);
        arena.add_child(parent, c2);
        assert_eq!(arena.get(parent).children, vec![c1, c2]);
    }

    #[test]
    fn semantic_lookup_matches_all_ten_values() {
        for (text, expected) in [
            ("binormal", Semantic::Binormal),
            ("blend_indices", Semantic::BlendIndices),
            ("blend_weight", Semantic::BlendWeight),
            ("color", Semantic::Color),
            ("normal", Semantic::Normal),
            ("position", Semantic::Position),
            ("position_transformed", Semantic::PositionTransformed),
            ("point_size", Semantic::PointSize),
            ("tangent", Semantic::Tangent),
            ("texture_coordinates", Semantic::TextureCoordinates),
        ] {
            assert_eq!(Semantic::from_attribute_value(text), Some(expected));
        }
        assert_eq!(Semantic::from_attribute_value("bogus"), None);
    }

    #[test]
    fn node_kind_accessors_agree_with_invariant() {
        let kind = NodeKind::DeclarationVariable {
            name: "i".into(),
            type_name: "int".into(),
            is_static: false,
            is_const: true,
        };
        assert_eq!(kind.name(), Some("i"));
        assert_eq!(kind.type_name(), Some("int"));
        assert!(kind.is_const());
        assert!(!kind.is_static());
    }
}
