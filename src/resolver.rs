use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

use crate::error::{FunctionError, ResolveError};
use crate::value::Value;

/// Caller-supplied function dispatch used by the interpreter.
///
/// Receives the function name exactly as written (`Math.Sin`) and the
/// argument values in call order. Argument count and type checks are the
/// resolver's business. An error returned here reaches the caller of
/// [`crate::evaluate`] inside [`crate::EvalError::Function`].
pub trait FunctionResolver {
    fn call(&mut self, name: &str, args: &[Value]) -> Result<Value, FunctionError>;
}

impl<F> FunctionResolver for F
where
    F: FnMut(&str, &[Value]) -> Result<Value, FunctionError>,
{
    fn call(&mut self, name: &str, args: &[Value]) -> Result<Value, FunctionError> {
        self(name, args)
    }
}

/// Wraps a closure as a [`FunctionResolver`], pinning down its signature so
/// inline closures need no type annotations.
pub fn from_fn<F>(f: F) -> FromFn<F>
where
    F: FnMut(&str, &[Value]) -> Result<Value, FunctionError>,
{
    FromFn(f)
}

/// See [`from_fn`].
pub struct FromFn<F>(F);

impl<F> FunctionResolver for FromFn<F>
where
    F: FnMut(&str, &[Value]) -> Result<Value, FunctionError>,
{
    fn call(&mut self, name: &str, args: &[Value]) -> Result<Value, FunctionError> {
        (self.0)(name, args)
    }
}

/// Resolver for expressions that call no functions; every call fails with
/// [`ResolveError::Unknown`].
#[derive(Clone, Copy, Debug, Default)]
pub struct NoFunctions;

impl FunctionResolver for NoFunctions {
    fn call(&mut self, name: &str, args: &[Value]) -> Result<Value, FunctionError> {
        Err(Box::new(ResolveError::Unknown {
            name: name.to_string(),
            arity: args.len(),
        }))
    }
}

/// Parameter values for one evaluation.
pub trait Bindings {
    fn lookup(&self, name: &str) -> Option<&Value>;
}

impl<K, S> Bindings for HashMap<K, Value, S>
where
    K: Borrow<str> + Hash + Eq,
    S: BuildHasher,
{
    fn lookup(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }
}

impl<K> Bindings for BTreeMap<K, Value>
where
    K: Borrow<str> + Ord,
{
    fn lookup(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }
}

/// No parameters bound.
impl Bindings for () {
    fn lookup(&self, _name: &str) -> Option<&Value> {
        None
    }
}
