use crate::value::Value;
use crate::visitor::DefaultAstVisitor;

/// An expression tree node.
///
/// The variant set is closed. Nodes are never mutated once linked into a
/// tree; payload fields are private and exposed through read-only accessors.
/// Variant-specific behaviour lives in visitors (see [`crate::AstVisitor`]).
#[derive(Clone, Debug, PartialEq)]
pub enum AstNode {
    /// Literal value (e.g. `1`, `"s"`, `true`).
    Constant(Constant),
    /// Free variable, resolved at evaluation time.
    Parameter(Parameter),
    /// Prefix operation (e.g. `-x`, `!b`).
    Unary(Unary),
    /// Infix operation. Operands are ordered; no operator is assumed commutative.
    Binary(Binary),
    /// Ternary branch `c ? t : f`.
    Conditional(Conditional),
    /// Call `name(args..)`. The name may be dotted (`Math.Sin`) and is kept verbatim.
    Function(Function),
    /// Placeholder for a construct the parser recognised but does not model.
    Unsupported(Unsupported),
}

/// Fieldless tag of an [`AstNode`] variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Constant,
    Parameter,
    Unary,
    Binary,
    Conditional,
    Function,
    Unsupported,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Constant {
    value: Value,
}

impl Constant {
    pub fn value(&self) -> &Value {
        &self.value
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Parameter {
    name: String,
}

impl Parameter {
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Unary {
    operator: String,
    operand: Box<AstNode>,
}

impl Unary {
    pub fn operator(&self) -> &str {
        &self.operator
    }

    pub fn operand(&self) -> &AstNode {
        &self.operand
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Binary {
    operator: String,
    left: Box<AstNode>,
    right: Box<AstNode>,
}

impl Binary {
    pub fn operator(&self) -> &str {
        &self.operator
    }

    pub fn left(&self) -> &AstNode {
        &self.left
    }

    pub fn right(&self) -> &AstNode {
        &self.right
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Conditional {
    condition: Box<AstNode>,
    if_true: Box<AstNode>,
    if_false: Box<AstNode>,
}

impl Conditional {
    pub fn condition(&self) -> &AstNode {
        &self.condition
    }

    pub fn if_true(&self) -> &AstNode {
        &self.if_true
    }

    pub fn if_false(&self) -> &AstNode {
        &self.if_false
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Function {
    name: String,
    arguments: Vec<AstNode>,
}

impl Function {
    /// Function name exactly as written, e.g. `Math.Sin`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Arguments in call order.
    pub fn arguments(&self) -> &[AstNode] {
        &self.arguments
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Unsupported {
    explanation: String,
}

impl Unsupported {
    /// Human-readable reason the construct could not be represented.
    pub fn explanation(&self) -> &str {
        &self.explanation
    }
}

impl AstNode {
    pub fn constant(value: impl Into<Value>) -> Self {
        AstNode::Constant(Constant {
            value: value.into(),
        })
    }

    pub fn parameter(name: impl Into<String>) -> Self {
        AstNode::Parameter(Parameter { name: name.into() })
    }

    pub fn unary(operator: impl Into<String>, operand: AstNode) -> Self {
        AstNode::Unary(Unary {
            operator: operator.into(),
            operand: Box::new(operand),
        })
    }

    pub fn binary(operator: impl Into<String>, left: AstNode, right: AstNode) -> Self {
        AstNode::Binary(Binary {
            operator: operator.into(),
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn conditional(condition: AstNode, if_true: AstNode, if_false: AstNode) -> Self {
        AstNode::Conditional(Conditional {
            condition: Box::new(condition),
            if_true: Box::new(if_true),
            if_false: Box::new(if_false),
        })
    }

    pub fn function(name: impl Into<String>, arguments: impl IntoIterator<Item = AstNode>) -> Self {
        AstNode::Function(Function {
            name: name.into(),
            arguments: arguments.into_iter().collect(),
        })
    }

    pub fn unsupported(explanation: impl Into<String>) -> Self {
        AstNode::Unsupported(Unsupported {
            explanation: explanation.into(),
        })
    }

    pub fn kind(&self) -> NodeKind {
        self.accept(&mut KindOf)
    }
}

struct KindOf;

impl<'a> DefaultAstVisitor<'a> for KindOf {
    type Output = NodeKind;

    fn fallback(&mut self, kind: NodeKind) -> NodeKind {
        kind
    }
}
