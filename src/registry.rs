use std::collections::HashMap;
use std::fmt;

use log::debug;

use crate::error::{FunctionError, RegistryError, ResolveError};
use crate::resolver::FunctionResolver;
use crate::value::Value;

type BoxedFn = Box<dyn Fn(&[Value]) -> Result<Value, FunctionError> + Send + Sync>;

/// A [`FunctionResolver`] backed by a table of closures keyed by name and
/// arity, so `Max(a, b)` and `Max(a, b, c)` may be registered separately.
///
/// ```
/// use trivast::{evaluate, parse, FunctionRegistry, Value};
///
/// let mut funcs = FunctionRegistry::new();
/// funcs
///     .register_binary("Math.Max", |a, b| {
///         Ok(Value::Number(a.to_decimal()?.max(b.to_decimal()?)))
///     })
///     .unwrap();
///
/// let ast = parse("Math.Max(2, 5) * 2").unwrap();
/// assert_eq!(evaluate(&ast, &(), &mut funcs).unwrap(), Value::from(10));
/// ```
#[derive(Default)]
pub struct FunctionRegistry {
    funcs: HashMap<(String, usize), BoxedFn>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `f` for calls to `name` with exactly `arity` arguments.
    pub fn register<F>(&mut self, name: &str, arity: usize, f: F) -> Result<(), RegistryError>
    where
        F: Fn(&[Value]) -> Result<Value, FunctionError> + Send + Sync + 'static,
    {
        let key = (name.to_string(), arity);
        if self.funcs.contains_key(&key) {
            return Err(RegistryError::FunctionExists {
                name: name.to_string(),
                arity,
            });
        }
        debug!("registered function {}/{}", name, arity);
        self.funcs.insert(key, Box::new(f));
        Ok(())
    }

    pub fn register_nullary<F>(&mut self, name: &str, f: F) -> Result<(), RegistryError>
    where
        F: Fn() -> Result<Value, FunctionError> + Send + Sync + 'static,
    {
        self.register(name, 0, move |_| f())
    }

    pub fn register_unary<F>(&mut self, name: &str, f: F) -> Result<(), RegistryError>
    where
        F: Fn(&Value) -> Result<Value, FunctionError> + Send + Sync + 'static,
    {
        self.register(name, 1, move |args| f(&args[0]))
    }

    pub fn register_binary<F>(&mut self, name: &str, f: F) -> Result<(), RegistryError>
    where
        F: Fn(&Value, &Value) -> Result<Value, FunctionError> + Send + Sync + 'static,
    {
        self.register(name, 2, move |args| f(&args[0], &args[1]))
    }

    pub fn register_ternary<F>(&mut self, name: &str, f: F) -> Result<(), RegistryError>
    where
        F: Fn(&Value, &Value, &Value) -> Result<Value, FunctionError> + Send + Sync + 'static,
    {
        self.register(name, 3, move |args| f(&args[0], &args[1], &args[2]))
    }

    pub fn contains(&self, name: &str, arity: usize) -> bool {
        self.funcs.contains_key(&(name.to_string(), arity))
    }

    pub fn len(&self) -> usize {
        self.funcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.funcs.is_empty()
    }

    /// Removes every registered function.
    pub fn clear(&mut self) {
        self.funcs.clear();
    }

    /// Invokes a registered function without going through the interpreter.
    pub fn invoke(&self, name: &str, args: &[Value]) -> Result<Value, FunctionError> {
        match self.funcs.get(&(name.to_string(), args.len())) {
            Some(f) => f(args),
            None => Err(Box::new(ResolveError::Unknown {
                name: name.to_string(),
                arity: args.len(),
            })),
        }
    }
}

impl FunctionResolver for FunctionRegistry {
    fn call(&mut self, name: &str, args: &[Value]) -> Result<Value, FunctionError> {
        self.invoke(name, args)
    }
}

impl fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<_> = self.funcs.keys().collect();
        keys.sort();
        f.debug_struct("FunctionRegistry")
            .field("functions", &keys)
            .finish()
    }
}
