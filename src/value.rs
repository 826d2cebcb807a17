use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

use crate::error::EvalError;

/// A literal stored in a constant node, or the result of evaluating a node.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Base-10 number. Literals never go through binary floating point.
    Number(Decimal),
    String(String),
    Bool(bool),
}

impl Value {
    /// Short name of the value's kind, used in conversion errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Bool(_) => "boolean",
        }
    }

    pub fn as_number(&self) -> Option<Decimal> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Converts to a decimal the way arithmetic operands are converted.
    ///
    /// Booleans become `1` or `0`; strings must hold a numeric literal
    /// (plain or exponent notation, surrounding whitespace ignored).
    pub fn to_decimal(&self) -> Result<Decimal, EvalError> {
        match self {
            Value::Number(n) => Ok(*n),
            Value::Bool(true) => Ok(Decimal::ONE),
            Value::Bool(false) => Ok(Decimal::ZERO),
            Value::String(s) => parse_decimal(s.trim()).ok_or_else(|| self.coercion("number")),
        }
    }

    /// Converts to a boolean. Only boolean values qualify.
    pub fn to_bool(&self) -> Result<bool, EvalError> {
        match self {
            Value::Bool(b) => Ok(*b),
            _ => Err(self.coercion("boolean")),
        }
    }

    /// Lossy conversion for resolvers that call into floating-point math.
    pub fn to_f64(&self) -> Result<f64, EvalError> {
        let d = self.to_decimal()?;
        d.to_f64().ok_or_else(|| self.coercion("f64"))
    }

    /// Builds a number from an `f64`. Returns `None` for NaN, infinities and
    /// magnitudes a decimal cannot hold.
    pub fn from_f64(v: f64) -> Option<Value> {
        Decimal::from_f64(v).map(Value::Number)
    }

    fn coercion(&self, expected: &'static str) -> EvalError {
        let found = match self {
            Value::String(s) => format!("string \"{}\"", s),
            other => format!("{} {}", other.type_name(), other),
        };
        EvalError::Coercion { expected, found }
    }
}

/// Parses a decimal literal, accepting exponent notation (`2e3`, `2.5E-4`)
/// and a bare leading dot (`.5`).
pub(crate) fn parse_decimal(text: &str) -> Option<Decimal> {
    let owned;
    let text = match text.strip_prefix('.') {
        Some(rest) => {
            owned = format!("0.{}", rest);
            owned.as_str()
        }
        None => text,
    };
    if text.contains(|c: char| c == 'e' || c == 'E') {
        Decimal::from_scientific(text).ok()
    } else {
        Decimal::from_str(text).ok()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n.normalize()),
            Value::String(s) => f.write_str(s),
            Value::Bool(true) => f.write_str("true"),
            Value::Bool(false) => f.write_str("false"),
        }
    }
}

impl From<Decimal> for Value {
    fn from(v: Decimal) -> Self {
        Value::Number(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Number(Decimal::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Number(Decimal::from(v))
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::Number(Decimal::from(v))
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}
