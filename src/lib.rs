//! Expression text to an immutable AST, with diagnostics traversal and a
//! tree-walking interpreter.
//!
//! ```
//! use std::collections::HashMap;
//! use trivast::{eval, NoFunctions, Value};
//!
//! let mut params = HashMap::new();
//! params.insert("x", Value::from(4));
//! let out = eval("x > 3 ? x * 2 : 0", &params, &mut NoFunctions).unwrap();
//! assert_eq!(out, Value::from(8));
//! ```
//!
//! Grammar, loosest binding first (all binary levels left-associative):
//!
//! | level | operators |
//! |---|---|
//! | conditional | `c ? a : b` (right-associative) |
//! | coalesce | `??` |
//! | logical or | `\|\|` |
//! | logical and | `&&` |
//! | bitwise | `\|`, then `^`, then `&` |
//! | comparison | `== != < <= > >=` |
//! | shift | `<< >>` |
//! | additive | `+ -` |
//! | multiplicative | `* / %` |
//! | prefix | `- ! + ~` |
//!
//! Constructs the tree does not model (casts, member and element access,
//! `null`, character literals) parse into [`AstNode::Unsupported`] nodes;
//! [`collect_unsupported`] lists them.

mod ast;
mod children;
mod collect;
mod error;
mod interpreter;
mod lexer;
mod parser;
mod registry;
mod render;
mod resolver;
mod traverse;
mod value;
mod visitor;

pub use ast::{
    AstNode, Binary, Conditional, Constant, Function, NodeKind, Parameter, Unary, Unsupported,
};
pub use children::{children, Children, ChildrenVisitor};
pub use collect::{collect_parameters, collect_unsupported};
pub use error::{Error, EvalError, FunctionError, ParseError, RegistryError, ResolveError};
pub use interpreter::{evaluate, Interpreter};
pub use parser::{parse, parse_with, ParseOptions, Parser};
pub use registry::FunctionRegistry;
pub use resolver::{from_fn, Bindings, FromFn, FunctionResolver, NoFunctions};
pub use traverse::{traverse, Traverse};
pub use value::Value;
pub use visitor::{AstVisitor, DefaultAstVisitor};

pub use rust_decimal::Decimal;

/// Parses and evaluates `text` in one step.
pub fn eval<B, R>(text: &str, bindings: &B, resolver: &mut R) -> Result<Value, Error>
where
    B: Bindings + ?Sized,
    R: FunctionResolver + ?Sized,
{
    let ast = parse(text)?;
    Ok(evaluate(&ast, bindings, resolver)?)
}
