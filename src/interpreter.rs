use std::cmp::Ordering;

use log::trace;
use rust_decimal::Decimal;

use crate::ast::{AstNode, Binary, Conditional, Constant, Function, Parameter, Unary, Unsupported};
use crate::error::EvalError;
use crate::resolver::{Bindings, FunctionResolver};
use crate::value::Value;
use crate::visitor::AstVisitor;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BinaryOp {
    And,
    Or,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl BinaryOp {
    fn from_symbol(op: &str) -> Option<Self> {
        let op = match op {
            "&&" => BinaryOp::And,
            "||" => BinaryOp::Or,
            "+" => BinaryOp::Add,
            "-" => BinaryOp::Sub,
            "*" => BinaryOp::Mul,
            "/" => BinaryOp::Div,
            "%" => BinaryOp::Rem,
            "==" => BinaryOp::Eq,
            "!=" => BinaryOp::Ne,
            "<" => BinaryOp::Lt,
            "<=" => BinaryOp::Le,
            ">" => BinaryOp::Gt,
            ">=" => BinaryOp::Ge,
            _ => return None,
        };
        Some(op)
    }
}

/// Tree-walking evaluator.
///
/// Holds the parameter bindings and function resolver for one evaluation.
/// The tree is only read, so one parsed expression can be evaluated from many
/// threads at once, each with its own interpreter.
pub struct Interpreter<'r, B: ?Sized, R: ?Sized> {
    bindings: &'r B,
    resolver: &'r mut R,
}

impl<'r, B, R> Interpreter<'r, B, R>
where
    B: Bindings + ?Sized,
    R: FunctionResolver + ?Sized,
{
    pub fn new(bindings: &'r B, resolver: &'r mut R) -> Self {
        Self { bindings, resolver }
    }

    pub fn evaluate(&mut self, node: &AstNode) -> Result<Value, EvalError> {
        node.accept(self)
    }

    fn decimal(&mut self, node: &AstNode) -> Result<Decimal, EvalError> {
        node.accept(self)?.to_decimal()
    }

    fn boolean(&mut self, node: &AstNode) -> Result<bool, EvalError> {
        node.accept(self)?.to_bool()
    }

    fn arithmetic(
        &mut self,
        node: &Binary,
        divides: bool,
        op: fn(Decimal, Decimal) -> Option<Decimal>,
    ) -> Result<Value, EvalError> {
        let a = self.decimal(node.left())?;
        let b = self.decimal(node.right())?;
        if divides && b.is_zero() {
            return Err(EvalError::DivisionByZero);
        }
        op(a, b)
            .map(Value::Number)
            .ok_or_else(|| EvalError::Overflow(node.operator().to_string()))
    }
}

/// Two strings compare ordinally; anything else compares as decimals.
fn compare(a: &Value, b: &Value) -> Result<Ordering, EvalError> {
    match (a, b) {
        (Value::String(x), Value::String(y)) => Ok(x.cmp(y)),
        _ => Ok(a.to_decimal()?.cmp(&b.to_decimal()?)),
    }
}

/// Values of the same kind compare directly; mixed kinds compare as decimals,
/// and a side with no numeric reading makes them unequal.
fn equals(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x == y,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        _ => match (a.to_decimal(), b.to_decimal()) {
            (Ok(x), Ok(y)) => x == y,
            _ => false,
        },
    }
}

impl<'a, 'r, B, R> AstVisitor<'a> for Interpreter<'r, B, R>
where
    B: Bindings + ?Sized,
    R: FunctionResolver + ?Sized,
{
    type Output = Result<Value, EvalError>;

    fn visit_constant(&mut self, node: &'a Constant) -> Self::Output {
        Ok(node.value().clone())
    }

    fn visit_parameter(&mut self, node: &'a Parameter) -> Self::Output {
        self.bindings
            .lookup(node.name())
            .cloned()
            .ok_or_else(|| EvalError::UnboundParameter(node.name().to_string()))
    }

    fn visit_unary(&mut self, node: &'a Unary) -> Self::Output {
        match node.operator() {
            "-" => Ok(Value::Number(-self.decimal(node.operand())?)),
            "!" => Ok(Value::Bool(!self.boolean(node.operand())?)),
            other => Err(EvalError::UnsupportedUnaryOperator(other.to_string())),
        }
    }

    fn visit_binary(&mut self, node: &'a Binary) -> Self::Output {
        let symbol = node.operator();
        let op = BinaryOp::from_symbol(symbol)
            .ok_or_else(|| EvalError::UnsupportedBinaryOperator(symbol.to_string()))?;
        match op {
            BinaryOp::And => {
                let v = self.boolean(node.left())? && self.boolean(node.right())?;
                Ok(Value::Bool(v))
            }
            BinaryOp::Or => {
                let v = self.boolean(node.left())? || self.boolean(node.right())?;
                Ok(Value::Bool(v))
            }
            BinaryOp::Add => self.arithmetic(node, false, Decimal::checked_add),
            BinaryOp::Sub => self.arithmetic(node, false, Decimal::checked_sub),
            BinaryOp::Mul => self.arithmetic(node, false, Decimal::checked_mul),
            BinaryOp::Div => self.arithmetic(node, true, Decimal::checked_div),
            BinaryOp::Rem => self.arithmetic(node, true, Decimal::checked_rem),
            BinaryOp::Eq | BinaryOp::Ne => {
                let a = node.left().accept(self)?;
                let b = node.right().accept(self)?;
                let eq = equals(&a, &b);
                Ok(Value::Bool(if op == BinaryOp::Eq { eq } else { !eq }))
            }
            BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge => {
                let a = node.left().accept(self)?;
                let b = node.right().accept(self)?;
                let ord = compare(&a, &b)?;
                let v = match op {
                    BinaryOp::Lt => ord == Ordering::Less,
                    BinaryOp::Le => ord != Ordering::Greater,
                    BinaryOp::Gt => ord == Ordering::Greater,
                    _ => ord != Ordering::Less,
                };
                Ok(Value::Bool(v))
            }
        }
    }

    fn visit_conditional(&mut self, node: &'a Conditional) -> Self::Output {
        // Only the taken branch is evaluated.
        if self.boolean(node.condition())? {
            node.if_true().accept(self)
        } else {
            node.if_false().accept(self)
        }
    }

    fn visit_function(&mut self, node: &'a Function) -> Self::Output {
        let args = node
            .arguments()
            .iter()
            .map(|arg| arg.accept(self))
            .collect::<Result<Vec<_>, _>>()?;
        trace!("calling {} with {} argument(s)", node.name(), args.len());
        self.resolver
            .call(node.name(), &args)
            .map_err(|source| EvalError::Function {
                name: node.name().to_string(),
                source,
            })
    }

    fn visit_unsupported(&mut self, node: &'a Unsupported) -> Self::Output {
        Err(EvalError::Unsupported(node.explanation().to_string()))
    }
}

/// Evaluates `node` against `bindings`, dispatching calls to `resolver`.
pub fn evaluate<B, R>(node: &AstNode, bindings: &B, resolver: &mut R) -> Result<Value, EvalError>
where
    B: Bindings + ?Sized,
    R: FunctionResolver + ?Sized,
{
    Interpreter::new(bindings, resolver).evaluate(node)
}
