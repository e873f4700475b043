use super::*;
use crate::types::{ScalarType, Ty};
use crate::value::Variable;

fn qubit(name: &str) -> Value {
    Value::VariableRef(Variable::new(name, Ty::scalar(ScalarType::Qubit), None))
}

#[test]
fn inv_preserves_operands_and_records_modifier() {
    let gate = CompositeGate::base("H", vec![qubit("q")]);
    let gate = apply_inv(gate);
    assert_eq!(gate.operands.len(), 1);
    assert!(matches!(gate.modifiers[0], Modifier::Inv));
}

#[test]
fn pow_attaches_exponent_without_changing_operand_count() {
    let gate = CompositeGate::base("H", vec![qubit("q")]);
    let gate = apply_pow(gate, Value::ConstReal(0.5));
    assert_eq!(gate.operands.len(), 1);
    assert!(matches!(gate.modifiers[0], Modifier::Pow(_)));
}

#[test]
fn ctrl_prepends_control_qubit() {
    let gate = CompositeGate::base("X", vec![qubit("target")]);
    let gate = apply_ctrl(gate, qubit("control")).unwrap();
    assert_eq!(gate.operands.len(), 2);
    assert!(matches!(gate.modifiers[0], Modifier::Ctrl));
}

#[test]
fn ctrl_rejects_control_equal_to_target() {
    let q = qubit("q");
    let gate = CompositeGate::base("X", vec![q.clone()]);
    let err = apply_ctrl(gate, q).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::ModifierIndexClash));
}

#[test]
fn modifiers_stack_in_application_order() {
    let gate = CompositeGate::base("X", vec![qubit("target")]);
    let gate = apply_inv(gate);
    let gate = apply_ctrl(gate, qubit("control")).unwrap();
    assert_eq!(gate.modifiers.len(), 2);
    assert!(matches!(gate.modifiers[0], Modifier::Inv));
    assert!(matches!(gate.modifiers[1], Modifier::Ctrl));
    assert_eq!(gate.operands.len(), 2);
}
