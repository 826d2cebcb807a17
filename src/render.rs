use std::fmt;

use crate::ast::{AstNode, Binary, Conditional, Constant, Function, Parameter, Unary, Unsupported};
use crate::value::Value;
use crate::visitor::AstVisitor;

/// Writes the compact debug form of a tree, e.g. `(1 + 2000)` or
/// `Math.Sin((x * 2))`.
struct Render<'f, 'w> {
    f: &'f mut fmt::Formatter<'w>,
}

impl<'a> AstVisitor<'a> for Render<'_, '_> {
    type Output = fmt::Result;

    fn visit_constant(&mut self, node: &'a Constant) -> fmt::Result {
        match node.value() {
            Value::String(s) => write!(self.f, "\"{}\"", s),
            other => write!(self.f, "{}", other),
        }
    }

    fn visit_parameter(&mut self, node: &'a Parameter) -> fmt::Result {
        self.f.write_str(node.name())
    }

    fn visit_unary(&mut self, node: &'a Unary) -> fmt::Result {
        write!(self.f, "{} ", node.operator())?;
        node.operand().accept(self)
    }

    fn visit_binary(&mut self, node: &'a Binary) -> fmt::Result {
        self.f.write_str("(")?;
        node.left().accept(self)?;
        write!(self.f, " {} ", node.operator())?;
        node.right().accept(self)?;
        self.f.write_str(")")
    }

    fn visit_conditional(&mut self, node: &'a Conditional) -> fmt::Result {
        self.f.write_str("(")?;
        node.condition().accept(self)?;
        self.f.write_str(") ? (")?;
        node.if_true().accept(self)?;
        self.f.write_str(") : (")?;
        node.if_false().accept(self)?;
        self.f.write_str(")")
    }

    fn visit_function(&mut self, node: &'a Function) -> fmt::Result {
        write!(self.f, "{}(", node.name())?;
        for (i, arg) in node.arguments().iter().enumerate() {
            if i > 0 {
                self.f.write_str(", ")?;
            }
            arg.accept(self)?;
        }
        self.f.write_str(")")
    }

    fn visit_unsupported(&mut self, _node: &'a Unsupported) -> fmt::Result {
        self.f.write_str("<error>")
    }
}

impl fmt::Display for AstNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.accept(&mut Render { f })
    }
}
