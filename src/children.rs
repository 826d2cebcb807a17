use std::iter::FusedIterator;
use std::slice;

use crate::ast::{
    AstNode, Binary, Conditional, Constant, Function, Parameter, Unary, Unsupported,
};
use crate::visitor::AstVisitor;

/// Direct children of a node, borrowed from the tree.
///
/// Order: function arguments in call order; binary left then right;
/// conditional condition, if-true, if-false; unary operand. Leaves have none.
/// The iterator is cheap to clone, so the sequence can be restarted.
#[derive(Clone, Debug)]
pub struct Children<'a> {
    fixed: [Option<&'a AstNode>; 3],
    next_fixed: usize,
    arguments: slice::Iter<'a, AstNode>,
}

impl<'a> Children<'a> {
    fn none() -> Self {
        Self::fixed([None, None, None])
    }

    fn fixed(nodes: [Option<&'a AstNode>; 3]) -> Self {
        Self {
            fixed: nodes,
            next_fixed: 0,
            arguments: <&[AstNode]>::default().iter(),
        }
    }

    fn arguments(arguments: &'a [AstNode]) -> Self {
        Self {
            fixed: [None, None, None],
            next_fixed: 0,
            arguments: arguments.iter(),
        }
    }

    fn fixed_remaining(&self) -> usize {
        self.fixed[self.next_fixed..].iter().flatten().count()
    }
}

impl<'a> Iterator for Children<'a> {
    type Item = &'a AstNode;

    fn next(&mut self) -> Option<&'a AstNode> {
        while let Some(slot) = self.fixed.get(self.next_fixed) {
            self.next_fixed += 1;
            if slot.is_some() {
                return *slot;
            }
        }
        self.arguments.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.fixed_remaining() + self.arguments.len();
        (n, Some(n))
    }
}

impl ExactSizeIterator for Children<'_> {}

impl FusedIterator for Children<'_> {}

/// Visitor yielding a node's [`Children`].
pub struct ChildrenVisitor;

impl<'a> AstVisitor<'a> for ChildrenVisitor {
    type Output = Children<'a>;

    fn visit_constant(&mut self, _node: &'a Constant) -> Children<'a> {
        Children::none()
    }

    fn visit_parameter(&mut self, _node: &'a Parameter) -> Children<'a> {
        Children::none()
    }

    fn visit_unary(&mut self, node: &'a Unary) -> Children<'a> {
        Children::fixed([Some(node.operand()), None, None])
    }

    fn visit_binary(&mut self, node: &'a Binary) -> Children<'a> {
        Children::fixed([Some(node.left()), Some(node.right()), None])
    }

    fn visit_conditional(&mut self, node: &'a Conditional) -> Children<'a> {
        Children::fixed([
            Some(node.condition()),
            Some(node.if_true()),
            Some(node.if_false()),
        ])
    }

    fn visit_function(&mut self, node: &'a Function) -> Children<'a> {
        Children::arguments(node.arguments())
    }

    fn visit_unsupported(&mut self, _node: &'a Unsupported) -> Children<'a> {
        Children::none()
    }
}

/// Direct children of `node`.
pub fn children(node: &AstNode) -> Children<'_> {
    node.accept(&mut ChildrenVisitor)
}

impl AstNode {
    pub fn children(&self) -> Children<'_> {
        children(self)
    }
}
