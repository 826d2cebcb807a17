use std::collections::HashSet;

use crate::ast::{AstNode, NodeKind, Parameter, Unsupported};
use crate::traverse::traverse;
use crate::visitor::DefaultAstVisitor;

struct AsUnsupported;

impl<'a> DefaultAstVisitor<'a> for AsUnsupported {
    type Output = Option<&'a Unsupported>;

    fn fallback(&mut self, _kind: NodeKind) -> Self::Output {
        None
    }

    fn visit_unsupported(&mut self, node: &'a Unsupported) -> Self::Output {
        Some(node)
    }
}

struct AsParameter;

impl<'a> DefaultAstVisitor<'a> for AsParameter {
    type Output = Option<&'a Parameter>;

    fn fallback(&mut self, _kind: NodeKind) -> Self::Output {
        None
    }

    fn visit_parameter(&mut self, node: &'a Parameter) -> Self::Output {
        Some(node)
    }
}

/// Every unsupported construct in the tree, in document order.
pub fn collect_unsupported(root: &AstNode) -> Vec<&Unsupported> {
    traverse(root)
        .filter_map(|node| node.accept(&mut AsUnsupported))
        .collect()
}

/// Distinct parameter names in the order they are first met by a
/// depth-first walk. This is the free-parameter list a compiling backend
/// reports alongside the code it generates.
pub fn collect_parameters(root: &AstNode) -> Vec<&str> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for param in traverse(root).filter_map(|node| node.accept(&mut AsParameter)) {
        if seen.insert(param.name()) {
            out.push(param.name());
        }
    }
    out
}
