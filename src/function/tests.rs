use super::*;
use crate::value::Variable;

#[test]
fn undefined_function_is_an_error() {
    let reg = default_registry();
    let err = reg.resolve("frobnicate", &[Value::ConstInt(1)]).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::UndefinedFunction(n) if n == "frobnicate"));
}

#[test]
fn folds_constant_addition() {
    let reg = default_registry();
    let result = reg
        .resolve("+", &[Value::ConstInt(2), Value::ConstInt(3)])
        .unwrap();
    assert!(matches!(result, Value::ConstInt(5)));
}

#[test]
fn promotes_mixed_operands_before_folding() {
    let reg = default_registry();
    let result = reg
        .resolve("+", &[Value::ConstInt(2), Value::ConstReal(0.5)])
        .unwrap();
    assert!(matches!(result, Value::ConstReal(r) if (r - 2.5).abs() < 1e-12));
}

#[test]
fn non_constant_argument_yields_symbolic_function_call() {
    let reg = default_registry();
    let var = Variable::new("x", Ty::scalar(ScalarType::Int), None);
    let result = reg
        .resolve("+", &[Value::VariableRef(var), Value::ConstInt(3)])
        .unwrap();
    match result {
        Value::FunctionCall { name, args, result_type } => {
            assert_eq!(name, "+");
            assert_eq!(args.len(), 2);
            assert_eq!(result_type.scalar_type(), ScalarType::Int);
        }
        other => panic!("expected FunctionCall, got {other:?}"),
    }
}

#[test]
fn comparison_returns_bool() {
    let reg = default_registry();
    let result = reg
        .resolve("<", &[Value::ConstInt(1), Value::ConstInt(2)])
        .unwrap();
    assert!(matches!(result, Value::ConstBool(true)));
}

#[test]
fn complex_equality_resolves_to_cc_overload() {
    let reg = default_registry();
    let a = Value::ConstComplex(Complex64::new(1.0, 2.0));
    let b = Value::ConstComplex(Complex64::new(1.0, 2.0));
    let result = reg.resolve("==", &[a, b]).unwrap();
    assert!(matches!(result, Value::ConstBool(true)));

    let c = Value::ConstComplex(Complex64::new(1.0, 2.0));
    let d = Value::ConstComplex(Complex64::new(3.0, 4.0));
    let result = reg.resolve("!=", &[c, d]).unwrap();
    assert!(matches!(result, Value::ConstBool(true)));
}

#[test]
fn sqrt_dispatches_to_float_overload() {
    let reg = default_registry();
    let result = reg.resolve("sqrt", &[Value::ConstReal(4.0)]).unwrap();
    assert!(matches!(result, Value::ConstReal(r) if (r - 2.0).abs() < 1e-12));
}

#[test]
fn complex_helpers_round_trip() {
    let reg = default_registry();
    let c = reg
        .resolve("complex", &[Value::ConstReal(3.0), Value::ConstReal(4.0)])
        .unwrap();
    let norm = reg.resolve("norm", &[c]).unwrap();
    assert!(matches!(norm, Value::ConstReal(r) if (r - 5.0).abs() < 1e-9));
}

#[test]
fn integer_division_by_zero_yields_zero() {
    let reg = default_registry();
    let result = reg
        .resolve("/", &[Value::ConstInt(5), Value::ConstInt(0)])
        .unwrap();
    assert!(matches!(result, Value::ConstInt(0)));
}

#[test]
fn default_constants_cover_pi_eu_tau_im() {
    let constants = default_constants();
    let names: Vec<_> = constants.iter().map(|(n, _)| *n).collect();
    assert_eq!(names, vec!["pi", "eu", "tau", "im"]);
}
