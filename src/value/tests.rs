use super::*;
use crate::types::{ScalarType, Ty};

#[test]
fn type_of_variable_ref_is_assignable() {
    let var = Variable::new("q", Ty::scalar(ScalarType::Qubit), None);
    let ty = type_of(&Value::VariableRef(var));
    assert_eq!(ty.scalar_type(), ScalarType::Qubit);
    assert!(ty.assignable);
}

#[test]
fn type_of_single_index_ref_is_scalar() {
    let var = Variable::new("q", Ty::array(ScalarType::Qubit, 5), None);
    let value = Value::IndexRef {
        variable: var,
        indices: vec![2],
    };
    let ty = type_of(&value);
    assert_eq!(ty.scalar_type(), ScalarType::Qubit);
    assert!(!ty.is_array());
    assert_eq!(range_of(&value), 1);
}

#[test]
fn type_of_multi_index_ref_is_array_sized_by_index_count() {
    let var = Variable::new("q", Ty::array(ScalarType::Qubit, 5), None);
    let value = Value::IndexRef {
        variable: var,
        indices: vec![0, 2, 4],
    };
    let ty = type_of(&value);
    assert!(ty.is_array());
    assert_eq!(ty.size_of(), Some(3));
    assert_eq!(range_of(&value), 3);
}

#[test]
fn range_of_scalars_is_one() {
    assert_eq!(range_of(&Value::ConstInt(42)), 1);
    assert_eq!(range_of(&Value::ConstAxis([0.0, 1.0, 0.0])), 1);
}

#[test]
fn range_of_arrays_is_their_length() {
    assert_eq!(range_of(&Value::ConstIntArray(vec![1, 2, 3])), 3);
}

#[test]
fn promote_const_bool_up_the_numeric_chain() {
    let target = Ty::scalar(ScalarType::Complex);
    let promoted = promote(&Value::ConstBool(true), &target).unwrap();
    assert!(matches!(promoted, Value::ConstComplex(c) if c.re == 1.0 && c.im == 0.0));
}

#[test]
fn promote_refuses_downward_numeric_cast() {
    let target = Ty::scalar(ScalarType::Bool);
    assert!(promote(&Value::ConstInt(2), &target).is_none());
}

#[test]
fn promote_replicates_scalar_constant_into_array() {
    let target = Ty::array(ScalarType::Float, 3);
    let promoted = promote(&Value::ConstInt(7), &target).unwrap();
    match promoted {
        Value::ConstRealArray(v) => assert_eq!(v, vec![7.0, 7.0, 7.0]),
        other => panic!("expected ConstRealArray, got {other:?}"),
    }
}

#[test]
fn promote_non_constant_requires_exact_type_match() {
    let var = Variable::new("q", Ty::scalar(ScalarType::Qubit), None);
    let value = Value::VariableRef(var);
    let matching = Ty::scalar(ScalarType::Qubit);
    assert!(promote(&value, &matching).is_some());

    let var2 = Variable::new("b", Ty::scalar(ScalarType::Bit), None);
    let mismatched = Value::VariableRef(var2);
    assert!(promote(&mismatched, &Ty::scalar(ScalarType::Qubit)).is_none());
}

#[test]
fn check_promote_matches_promote_type() {
    assert!(check_promote(
        &Ty::scalar(ScalarType::Int),
        &Ty::scalar(ScalarType::Float)
    ));
    assert!(!check_promote(
        &Ty::scalar(ScalarType::Float),
        &Ty::scalar(ScalarType::Int)
    ));
}

#[test]
fn check_all_of_array_values_detects_all_zero_axis() {
    let zero = Value::ConstAxis([0.0, 0.0, 0.0]);
    assert!(check_all_of_array_values(&zero, |v| v == 0.0));

    let nonzero = Value::ConstAxis([0.0, 1.0, 0.0]);
    assert!(!check_all_of_array_values(&nonzero, |v| v == 0.0));
}

#[test]
fn is_constant_and_is_reference_classify_variants_correctly() {
    assert!(Value::ConstInt(1).is_constant());
    assert!(!Value::ConstInt(1).is_reference());

    let var = Variable::new("q", Ty::scalar(ScalarType::Qubit), None);
    let value = Value::VariableRef(var);
    assert!(!value.is_constant());
    assert!(value.is_reference());

    let call = Value::FunctionCall {
        name: "f".into(),
        args: vec![],
        result_type: Ty::scalar(ScalarType::Int),
    };
    assert!(!call.is_constant());
    assert!(!call.is_reference());
}
