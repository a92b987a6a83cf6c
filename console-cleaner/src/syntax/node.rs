//! Tagged node view and iterative visitor walk.

use smallvec::SmallVec;
use tree_sitter::Node;

/// A call expression: `callee(args)`
#[derive(Debug, Clone, Copy)]
pub struct CallExpr<'t> {
    /// The `call_expression` node
    pub node: Node<'t>,
    /// The `function` field, if present
    pub callee: Option<Node<'t>>,
}

/// A property access: `object.property` or `object?.property`
#[derive(Debug, Clone, Copy)]
pub struct MemberAccess<'t> {
    /// The `member_expression` node
    pub node: Node<'t>,
    /// The `object` field
    pub object: Option<Node<'t>>,
    /// The `property` field
    pub property: Option<Node<'t>>,
}

impl<'t> MemberAccess<'t> {
    /// View `node` as a member access if it is one
    #[must_use]
    pub fn from_node(node: Node<'t>) -> Option<Self> {
        (node.kind() == "member_expression").then(|| Self {
            node,
            object: node.child_by_field_name("object"),
            property: node.child_by_field_name("property"),
        })
    }
}

/// The node kinds the excision engine distinguishes
#[derive(Debug, Clone, Copy)]
pub enum SyntaxNode<'t> {
    /// `call_expression`
    Call(CallExpr<'t>),
    /// `member_expression`
    MemberAccess(MemberAccess<'t>),
    /// Any other kind
    Unhandled(Node<'t>),
}

impl<'t> SyntaxNode<'t> {
    /// Classify a tree-sitter node
    #[must_use]
    pub fn classify(node: Node<'t>) -> Self {
        if node.kind() == "call_expression" {
            return Self::Call(CallExpr {
                node,
                callee: node.child_by_field_name("function"),
            });
        }
        match MemberAccess::from_node(node) {
            Some(member) => Self::MemberAccess(member),
            None => Self::Unhandled(node),
        }
    }

    /// The underlying tree-sitter node
    #[must_use]
    pub fn node(&self) -> Node<'t> {
        match self {
            Self::Call(call) => call.node,
            Self::MemberAccess(member) => member.node,
            Self::Unhandled(node) => *node,
        }
    }
}

/// Whether the walk continues into a node's children
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Walk {
    /// Visit the children
    Descend,
    /// Do not visit the children
    Skip,
}

/// Callbacks for [`walk`]. Every method defaults to descending.
pub trait Visitor<'t> {
    /// Called for each call expression
    fn visit_call(&mut self, _call: &CallExpr<'t>) -> Walk {
        Walk::Descend
    }

    /// Called for each member access
    fn visit_member(&mut self, _member: &MemberAccess<'t>) -> Walk {
        Walk::Descend
    }

    /// Called for every other named node
    fn visit_unhandled(&mut self, _node: Node<'t>) -> Walk {
        Walk::Descend
    }
}

/// Pre-order walk over the named nodes under `root`, source order.
pub fn walk<'t, V: Visitor<'t>>(root: Node<'t>, visitor: &mut V) {
    let mut stack = vec![root];
    let mut cursor = root.walk();

    while let Some(node) = stack.pop() {
        let next = match SyntaxNode::classify(node) {
            SyntaxNode::Call(call) => visitor.visit_call(&call),
            SyntaxNode::MemberAccess(member) => visitor.visit_member(&member),
            SyntaxNode::Unhandled(node) => visitor.visit_unhandled(node),
        };
        if next == Walk::Descend {
            let children: SmallVec<[Node<'t>; 8]> = node.named_children(&mut cursor).collect();
            stack.extend(children.into_iter().rev());
        }
    }
}
