use super::*;
use crate::types::Ty;
use crate::value::Variable;
use num_complex::Complex64;

#[test]
fn scalar_codes_promote_and_report_cost() {
    let (value, cost) = match_param(&Value::ConstBool(true), 'i').unwrap();
    assert!(matches!(value, Value::ConstInt(1)));
    assert_eq!(cost, 1);

    let (_, cost) = match_param(&Value::ConstInt(1), 'i').unwrap();
    assert_eq!(cost, 0);

    assert!(match_param(&Value::ConstInt(1), 'b').is_none());
}

#[test]
fn q_code_accepts_qubit_scalar_or_array() {
    let scalar = Variable::new("q", Ty::scalar(ScalarType::Qubit), None);
    assert!(match_param(&Value::VariableRef(scalar), 'Q').is_some());

    let array = Variable::new("qs", Ty::array(ScalarType::Qubit, 3), None);
    assert!(match_param(&Value::VariableRef(array), 'Q').is_some());

    let bit = Variable::new("b", Ty::scalar(ScalarType::Bit), None);
    assert!(match_param(&Value::VariableRef(bit), 'Q').is_none());
}

#[test]
fn v_code_rejects_qubit_scalars() {
    let scalar = Variable::new("q", Ty::scalar(ScalarType::Qubit), None);
    assert!(match_param(&Value::VariableRef(scalar), 'V').is_none());

    let array = Variable::new("qs", Ty::array(ScalarType::Qubit, 3), None);
    assert!(match_param(&Value::VariableRef(array), 'V').is_some());
}

#[test]
fn matrix_codes_match_by_value_shape() {
    let matrix = Value::ConstComplexMatrix(vec![vec![Complex64::new(1.0, 0.0)]]);
    assert!(match_param(&matrix, 'u').is_some());
    assert!(match_param(&matrix, 'm').is_none());
}

#[test]
fn match_signature_rejects_arity_mismatch() {
    assert!(match_signature(Some("Qf"), &[Value::ConstBool(true)]).is_none());
    assert!(match_signature(None, &[]).is_some());
    assert!(match_signature(None, &[Value::ConstBool(true)]).is_none());
}

#[test]
fn match_signature_sums_cost_across_operands() {
    let operands = vec![Value::ConstBool(true), Value::ConstInt(2)];
    let (promoted, cost) = match_signature(Some("ff"), &operands).unwrap();
    assert_eq!(promoted.len(), 2);
    assert_eq!(cost, 2 + 1);
}

#[test]
fn describe_operand_types_joins_with_commas() {
    let operands = vec![Value::ConstInt(1), Value::ConstReal(2.0)];
    assert_eq!(describe_operand_types(&operands), "int, float");
}
