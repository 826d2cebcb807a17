use thiserror::Error;

/// Error type returned by function resolvers. The interpreter wraps it in
/// [`EvalError::Function`] without altering it; callers can downcast it back.
pub type FunctionError = Box<dyn std::error::Error + Send + Sync>;

/// Text that cannot be tokenized or bracket-matched.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message} at position {position}")]
pub struct ParseError {
    /// Byte offset into the source text.
    pub position: usize,
    pub message: String,
}

impl ParseError {
    pub(crate) fn new(position: usize, message: impl Into<String>) -> Self {
        Self {
            position,
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum EvalError {
    #[error("unbound parameter: {0}")]
    UnboundParameter(String),
    #[error("unary operator is not supported: {0}")]
    UnsupportedUnaryOperator(String),
    #[error("binary operator is not supported: {0}")]
    UnsupportedBinaryOperator(String),
    #[error("division by zero")]
    DivisionByZero,
    #[error("arithmetic overflow in '{0}'")]
    Overflow(String),
    #[error("cannot convert {found} to {expected}")]
    Coercion {
        expected: &'static str,
        found: String,
    },
    /// Evaluation reached an unsupported node; carries its explanation verbatim.
    #[error("{0}")]
    Unsupported(String),
    #[error("function {name} failed: {source}")]
    Function {
        name: String,
        source: FunctionError,
    },
}

/// Errors reported by [`crate::FunctionRegistry`] when it cannot serve a call.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("unknown function: {name}/{arity}")]
    Unknown { name: String, arity: usize },
    #[error("invalid arguments: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("function already exists: {name}/{arity}")]
    FunctionExists { name: String, arity: usize },
}

/// Either failure of the one-shot [`crate::eval`].
#[derive(Debug, Error)]
pub enum Error {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}
