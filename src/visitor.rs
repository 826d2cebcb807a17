use crate::ast::{
    AstNode, Binary, Conditional, Constant, Function, NodeKind, Parameter, Unary, Unsupported,
};

/// An operation over the closed set of node variants.
///
/// `'a` is the lifetime of the visited tree, so a visitor may hand out
/// references into it (see [`crate::ChildrenVisitor`]).
pub trait AstVisitor<'a> {
    type Output;

    fn visit_constant(&mut self, node: &'a Constant) -> Self::Output;
    fn visit_parameter(&mut self, node: &'a Parameter) -> Self::Output;
    fn visit_unary(&mut self, node: &'a Unary) -> Self::Output;
    fn visit_binary(&mut self, node: &'a Binary) -> Self::Output;
    fn visit_conditional(&mut self, node: &'a Conditional) -> Self::Output;
    fn visit_function(&mut self, node: &'a Function) -> Self::Output;
    fn visit_unsupported(&mut self, node: &'a Unsupported) -> Self::Output;
}

/// A visitor that answers [`fallback`](DefaultAstVisitor::fallback) for every
/// variant it does not override.
///
/// Every `DefaultAstVisitor` is an [`AstVisitor`], so it can be passed to
/// [`AstNode::accept`] directly.
///
/// ```
/// use trivast::{AstNode, DefaultAstVisitor, NodeKind, Unsupported};
///
/// struct IsUnsupported;
///
/// impl<'a> DefaultAstVisitor<'a> for IsUnsupported {
///     type Output = bool;
///
///     fn fallback(&mut self, _kind: NodeKind) -> bool {
///         false
///     }
///
///     fn visit_unsupported(&mut self, _node: &'a Unsupported) -> bool {
///         true
///     }
/// }
///
/// assert!(AstNode::unsupported("nope").accept(&mut IsUnsupported));
/// assert!(!AstNode::constant(1).accept(&mut IsUnsupported));
/// ```
pub trait DefaultAstVisitor<'a> {
    type Output;

    fn fallback(&mut self, kind: NodeKind) -> Self::Output;

    fn visit_constant(&mut self, _node: &'a Constant) -> Self::Output {
        self.fallback(NodeKind::Constant)
    }

    fn visit_parameter(&mut self, _node: &'a Parameter) -> Self::Output {
        self.fallback(NodeKind::Parameter)
    }

    fn visit_unary(&mut self, _node: &'a Unary) -> Self::Output {
        self.fallback(NodeKind::Unary)
    }

    fn visit_binary(&mut self, _node: &'a Binary) -> Self::Output {
        self.fallback(NodeKind::Binary)
    }

    fn visit_conditional(&mut self, _node: &'a Conditional) -> Self::Output {
        self.fallback(NodeKind::Conditional)
    }

    fn visit_function(&mut self, _node: &'a Function) -> Self::Output {
        self.fallback(NodeKind::Function)
    }

    fn visit_unsupported(&mut self, _node: &'a Unsupported) -> Self::Output {
        self.fallback(NodeKind::Unsupported)
    }
}

impl<'a, V> AstVisitor<'a> for V
where
    V: DefaultAstVisitor<'a> + ?Sized,
{
    type Output = <V as DefaultAstVisitor<'a>>::Output;

    fn visit_constant(&mut self, node: &'a Constant) -> Self::Output {
        DefaultAstVisitor::visit_constant(self, node)
    }

    fn visit_parameter(&mut self, node: &'a Parameter) -> Self::Output {
        DefaultAstVisitor::visit_parameter(self, node)
    }

    fn visit_unary(&mut self, node: &'a Unary) -> Self::Output {
        DefaultAstVisitor::visit_unary(self, node)
    }

    fn visit_binary(&mut self, node: &'a Binary) -> Self::Output {
        DefaultAstVisitor::visit_binary(self, node)
    }

    fn visit_conditional(&mut self, node: &'a Conditional) -> Self::Output {
        DefaultAstVisitor::visit_conditional(self, node)
    }

    fn visit_function(&mut self, node: &'a Function) -> Self::Output {
        DefaultAstVisitor::visit_function(self, node)
    }

    fn visit_unsupported(&mut self, node: &'a Unsupported) -> Self::Output {
        DefaultAstVisitor::visit_unsupported(self, node)
    }
}

impl AstNode {
    /// Dispatches to the visitor method matching this node's variant.
    pub fn accept<'a, V>(&'a self, visitor: &mut V) -> V::Output
    where
        V: AstVisitor<'a> + ?Sized,
    {
        match self {
            AstNode::Constant(n) => visitor.visit_constant(n),
            AstNode::Parameter(n) => visitor.visit_parameter(n),
            AstNode::Unary(n) => visitor.visit_unary(n),
            AstNode::Binary(n) => visitor.visit_binary(n),
            AstNode::Conditional(n) => visitor.visit_conditional(n),
            AstNode::Function(n) => visitor.visit_function(n),
            AstNode::Unsupported(n) => visitor.visit_unsupported(n),
        }
    }
}
