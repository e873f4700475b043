use super::*;
use crate::ast::{ExprKind, ModifierSyntax, StatementKind, TypeName};
use crate::types::ScalarType;
use indoc::indoc;

#[test]
fn parses_version_header() {
    let (program, errors) = parse("version 3\n");
    assert!(errors.is_empty());
    assert_eq!(program.unwrap().version, (3, 0));
}

#[test]
fn parses_scalar_declaration() {
    let (program, errors) = parse("version 3\nqubit q;\n");
    assert!(errors.is_empty(), "{errors:?}");
    let program = program.unwrap();
    assert_eq!(program.statements.len(), 1);
    match &program.statements[0].value {
        StatementKind::Declaration { type_name, name, initializer } => {
            assert!(matches!(type_name, TypeName::Scalar(ScalarType::Qubit)));
            assert_eq!(name, "q");
            assert!(initializer.is_none());
        }
        other => panic!("expected a declaration, got {other:?}"),
    }
}

#[test]
fn parses_array_declaration_with_initializer() {
    let (program, errors) = parse("version 3\nint[4] xs = [1, 2, 3, 4];\n");
    assert!(errors.is_empty(), "{errors:?}");
    let program = program.unwrap();
    match &program.statements[0].value {
        StatementKind::Declaration { type_name, initializer, .. } => {
            assert!(matches!(type_name, TypeName::Array(ScalarType::Int, _)));
            assert!(initializer.is_some());
        }
        other => panic!("expected a declaration, got {other:?}"),
    }
}

#[test]
fn parses_assignment() {
    let (program, errors) = parse("version 3\nint i = 1;\ni = 2;\n");
    assert!(errors.is_empty(), "{errors:?}");
    let program = program.unwrap();
    assert!(matches!(program.statements[1].value, StatementKind::Assignment { .. }));
}

#[test]
fn parses_indexed_assignment_target() {
    let (program, errors) = parse("version 3\nbit[2] b;\nb[0] = 1;\n");
    assert!(errors.is_empty(), "{errors:?}");
    let program = program.unwrap();
    match &program.statements[1].value {
        StatementKind::Assignment { lhs, .. } => {
            assert!(matches!(lhs.value, ExprKind::Index(_, _)));
        }
        other => panic!("expected an assignment, got {other:?}"),
    }
}

#[test]
fn parses_gate_instruction_with_modifiers() {
    let (program, errors) = parse("version 3\nqubit q;\ninv ctrl X q, q;\n");
    assert!(errors.is_empty(), "{errors:?}");
    let program = program.unwrap();
    match &program.statements[1].value {
        StatementKind::GateInstruction { modifiers, name, args } => {
            assert_eq!(modifiers.len(), 2);
            assert!(matches!(modifiers[0], ModifierSyntax::Inv));
            assert!(matches!(modifiers[1], ModifierSyntax::Ctrl));
            assert_eq!(name, "X");
            assert_eq!(args.len(), 2);
        }
        other => panic!("expected a gate instruction, got {other:?}"),
    }
}

#[test]
fn parses_pow_modifier_with_exponent() {
    let (program, errors) = parse("version 3\nqubit q;\npow(0.5) X q;\n");
    assert!(errors.is_empty(), "{errors:?}");
    let program = program.unwrap();
    match &program.statements[1].value {
        StatementKind::GateInstruction { modifiers, .. } => {
            assert!(matches!(modifiers[0], ModifierSyntax::Pow(_)));
        }
        other => panic!("expected a gate instruction, got {other:?}"),
    }
}

#[test]
fn parses_measure_and_reset() {
    let (program, errors) = parse("version 3\nqubit q;\nbit b;\nmeasure b, q;\nreset q;\nreset;\n");
    assert!(errors.is_empty(), "{errors:?}");
    let program = program.unwrap();
    assert!(matches!(&program.statements[2].value, StatementKind::NonGateInstruction { name, .. } if name == "measure"));
    assert!(matches!(&program.statements[3].value, StatementKind::NonGateInstruction { name, args, .. } if name == "reset" && args.len() == 1));
    assert!(matches!(&program.statements[4].value, StatementKind::NonGateInstruction { name, args, .. } if name == "reset" && args.is_empty()));
}

#[test]
fn parses_expressions_with_precedence() {
    let (program, errors) = parse("version 3\nbool b = 1 + 2 * 3 == 7 && true;\n");
    assert!(errors.is_empty(), "{errors:?}");
    let program = program.unwrap();
    match &program.statements[0].value {
        StatementKind::Declaration { initializer: Some(e), .. } => {
            assert!(matches!(e.value, ExprKind::Binary(crate::ast::BinaryOp::And, _, _)));
        }
        other => panic!("expected a declaration, got {other:?}"),
    }
}

#[test]
fn parses_ternary_and_function_call() {
    let (program, errors) = parse("version 3\nfloat f = sin(pi) > 0.0 ? 1.0 : -1.0;\n");
    assert!(errors.is_empty(), "{errors:?}");
    let program = program.unwrap();
    match &program.statements[0].value {
        StatementKind::Declaration { initializer: Some(e), .. } => {
            assert!(matches!(e.value, ExprKind::Ternary(_, _, _)));
        }
        other => panic!("expected a declaration, got {other:?}"),
    }
}

#[test]
fn parses_matrix_literal() {
    let (program, errors) = parse(indoc! {r#"
        version 3
        float[2] m = [[1.0, 0.0], [0.0, 1.0]];
    "#});
    assert!(errors.is_empty(), "{errors:?}");
    let program = program.unwrap();
    match &program.statements[0].value {
        StatementKind::Declaration { initializer: Some(e), .. } => {
            assert!(matches!(e.value, ExprKind::MatrixLiteral(_)));
        }
        other => panic!("expected a declaration, got {other:?}"),
    }
}

#[test]
fn recovers_past_a_statement_level_error_and_keeps_parsing() {
    let (program, errors) = parse("version 3\nqubit ;\nqubit q;\n");
    assert!(!errors.is_empty());
    let program = program.unwrap();
    assert!(program.statements.iter().any(|s| matches!(
        &s.value,
        StatementKind::Declaration { name, .. } if name == "q"
    )));
}

#[test]
fn missing_version_header_is_reported() {
    let (program, errors) = parse("qubit q;\n");
    assert!(program.is_none());
    assert!(!errors.is_empty());
}
