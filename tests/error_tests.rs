use std::collections::HashMap;

use trivast::{
    eval, evaluate, from_fn, parse, AstNode, Error, EvalError, FunctionError, NoFunctions,
    ResolveError, Value,
};

#[test]
fn unbound_parameter() {
    let err = eval("a + 1", &(), &mut NoFunctions).unwrap_err();
    match err {
        Error::Eval(EvalError::UnboundParameter(name)) => assert_eq!(name, "a"),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn division_by_zero() {
    assert!(matches!(
        eval("1 / 0", &(), &mut NoFunctions),
        Err(Error::Eval(EvalError::DivisionByZero))
    ));
    assert!(matches!(
        eval("1 % (2 - 2)", &(), &mut NoFunctions),
        Err(Error::Eval(EvalError::DivisionByZero))
    ));
}

#[test]
fn overflow() {
    let err = eval(
        "79228162514264337593543950335 * 10",
        &(),
        &mut NoFunctions,
    )
    .unwrap_err();
    assert!(matches!(err, Error::Eval(EvalError::Overflow(_))));
}

#[test]
fn unsupported_node_reports_its_explanation() {
    let ast = AstNode::binary(
        "+",
        AstNode::constant(1),
        AstNode::unsupported("indexers are not supported"),
    );
    let err = evaluate(&ast, &(), &mut NoFunctions).unwrap_err();
    match &err {
        EvalError::Unsupported(msg) => assert_eq!(msg, "indexers are not supported"),
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(err.to_string(), "indexers are not supported");
}

#[test]
fn parsed_unsupported_construct_fails_only_when_reached() {
    let ast = parse("1 + (int)2.0").unwrap();
    assert!(matches!(
        evaluate(&ast, &(), &mut NoFunctions),
        Err(EvalError::Unsupported(_))
    ));
}

#[test]
fn unknown_operator_reported_before_operands() {
    // `b` is unbound, but the operator is rejected first
    let err = eval("a << b", &(), &mut NoFunctions).unwrap_err();
    match err {
        Error::Eval(EvalError::UnsupportedBinaryOperator(op)) => assert_eq!(op, "<<"),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn coercion_message() {
    let mut vars = HashMap::new();
    vars.insert("flag", Value::from("yes"));
    let err = eval("flag && true", &vars, &mut NoFunctions).unwrap_err();
    assert_eq!(
        err.to_string(),
        "cannot convert string \"yes\" to boolean"
    );
}

#[derive(Debug)]
struct Refused(u32);

impl std::fmt::Display for Refused {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "refused with code {}", self.0)
    }
}

impl std::error::Error for Refused {}

#[test]
fn resolver_error_reaches_caller_unchanged() {
    let err = eval(
        "1 + Lookup(2)",
        &(),
        &mut from_fn(|_: &str, _: &[Value]| -> Result<Value, FunctionError> {
            Err(Box::new(Refused(42)))
        }),
    )
    .unwrap_err();
    match err {
        Error::Eval(EvalError::Function { name, source }) => {
            assert_eq!(name, "Lookup");
            let refused = source.downcast_ref::<Refused>().expect("original error");
            assert_eq!(refused.0, 42);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn no_functions_resolver_reports_unknown() {
    let err = eval("Missing(1, 2)", &(), &mut NoFunctions).unwrap_err();
    match err {
        Error::Eval(EvalError::Function { source, .. }) => {
            assert_eq!(
                source.downcast_ref::<ResolveError>(),
                Some(&ResolveError::Unknown {
                    name: "Missing".into(),
                    arity: 2
                })
            );
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn parse_errors_surface_through_eval() {
    let err = eval("1 +", &(), &mut NoFunctions).unwrap_err();
    match err {
        Error::Parse(e) => assert_eq!(e.position, 3),
        other => panic!("unexpected error: {:?}", other),
    }
}
