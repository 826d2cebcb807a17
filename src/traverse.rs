use std::iter::FusedIterator;

use crate::ast::AstNode;
use crate::children::{children, Children};

/// Pre-order, depth-first walk over a tree: a node comes before its children,
/// children in [`Children`] order.
///
/// Uses an explicit stack, so deeply nested trees do not grow the call stack.
/// The walk only reads the tree; calling [`traverse`] again yields the same
/// sequence.
#[derive(Clone, Debug)]
pub struct Traverse<'a> {
    root: Option<&'a AstNode>,
    stack: Vec<Children<'a>>,
}

impl<'a> Iterator for Traverse<'a> {
    type Item = &'a AstNode;

    fn next(&mut self) -> Option<&'a AstNode> {
        if let Some(root) = self.root.take() {
            self.stack.push(children(root));
            return Some(root);
        }
        while let Some(top) = self.stack.last_mut() {
            match top.next() {
                Some(node) => {
                    self.stack.push(children(node));
                    return Some(node);
                }
                None => {
                    self.stack.pop();
                }
            }
        }
        None
    }
}

impl FusedIterator for Traverse<'_> {}

/// All nodes of the tree rooted at `root`, in document order.
pub fn traverse(root: &AstNode) -> Traverse<'_> {
    Traverse {
        root: Some(root),
        stack: Vec::new(),
    }
}

impl AstNode {
    pub fn traverse(&self) -> Traverse<'_> {
        traverse(self)
    }
}
