use std::cell::RefCell;

use trivast::{eval, from_fn, EvalError, Error, FunctionError, NoFunctions, Value};

fn run_recording(src: &str) -> (Result<Value, Error>, Vec<String>) {
    let calls = RefCell::new(Vec::new());
    let out = eval(
        src,
        &(),
        &mut from_fn(|name: &str, _args: &[Value]| -> Result<Value, FunctionError> {
            calls.borrow_mut().push(name.to_string());
            match name {
                "T" => Ok(Value::Bool(true)),
                "F" => Ok(Value::Bool(false)),
                _ => Ok(Value::from(name)),
            }
        }),
    );
    (out, calls.into_inner())
}

#[test]
fn only_taken_branch_is_evaluated() {
    let (out, calls) = run_recording("1 < 2 ? Yes() : No()");
    assert_eq!(out.unwrap(), Value::from("Yes"));
    assert_eq!(calls, vec!["Yes"]);

    let (out, calls) = run_recording("1 > 2 ? Yes() : No()");
    assert_eq!(out.unwrap(), Value::from("No"));
    assert_eq!(calls, vec!["No"]);
}

#[test]
fn untaken_branch_may_hold_unsupported_node() {
    assert_eq!(
        eval("true ? 1 : null", &(), &mut NoFunctions).unwrap(),
        Value::from(1)
    );
    assert_eq!(
        eval("false ? missing : 2", &(), &mut NoFunctions).unwrap(),
        Value::from(2)
    );
}

#[test]
fn nested_conditionals_right_associative() {
    let src = "x > 0 ? 1 : x < 0 ? -1 : 0";
    let mut vars = std::collections::HashMap::new();
    for (x, want) in [(5, 1), (-5, -1), (0, 0)] {
        vars.insert("x", Value::from(x));
        assert_eq!(
            eval(src, &vars, &mut NoFunctions).unwrap(),
            Value::from(want),
            "x = {}",
            x
        );
    }
}

#[test]
fn condition_must_be_boolean() {
    let err = eval("1 ? 2 : 3", &(), &mut NoFunctions).unwrap_err();
    assert!(matches!(err, Error::Eval(EvalError::Coercion { .. })));
}

#[test]
fn and_or_short_circuit() {
    let (out, calls) = run_recording("F() && T()");
    assert_eq!(out.unwrap(), Value::Bool(false));
    assert_eq!(calls, vec!["F"]);

    let (out, calls) = run_recording("T() || F()");
    assert_eq!(out.unwrap(), Value::Bool(true));
    assert_eq!(calls, vec!["T"]);

    let (out, calls) = run_recording("T() && F()");
    assert_eq!(out.unwrap(), Value::Bool(false));
    assert_eq!(calls, vec!["T", "F"]);
}
