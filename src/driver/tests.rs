use super::*;
use crate::diagnostic::ErrorKind;

#[test]
fn empty_program_with_default_version_accepts() {
    let result = analyze("version 3.0");
    assert!(result.errors.is_empty());
    assert!(result.root.is_some());
}

#[test]
fn version_above_api_version_short_circuits_before_parsing() {
    let result = analyze_with_version("version 4.0\nbogus garbage {{{", (3, 0));
    assert_eq!(result.errors.len(), 1);
    assert!(matches!(result.errors[0].kind(), ErrorKind::Version { .. }));
    assert!(result.root.is_none());
}

#[test]
fn malformed_version_header_is_reported_with_no_root() {
    let result = analyze("not a version header at all");
    assert_eq!(result.errors.len(), 1);
    assert!(result.root.is_none());
}

#[test]
fn parse_errors_skip_analysis_entirely() {
    let result = analyze("version 3.0\nint a = ;");
    assert!(result.root.is_none());
    assert!(!result.errors.is_empty());
}

#[test]
fn full_pipeline_resolves_a_declared_gate() {
    let result = analyze("version 3.0\nqubit[2] q;\nCNOT q[0], q[1];");
    assert!(result.errors.is_empty(), "unexpected errors: {:?}", result.errors);
    let root = result.root.unwrap();
    assert_eq!(root.statements.len(), 2);
}

#[test]
fn analyze_file_stamps_file_name_onto_located_errors() {
    let result = analyze_file("bell.qasm", "version 3.0\nqubit q;\nH q[9];", (3, 0));
    assert_eq!(result.errors.len(), 1);
    let location = result.errors[0].location.as_ref().expect("out-of-range errors carry a location");
    assert_eq!(location.file_name.as_deref(), Some("bell.qasm"));
}

#[test]
fn analyze_file_does_not_overwrite_an_existing_file_name() {
    let result = analyze_file("ignored.qasm", "version 4.0", (3, 0));
    // The version error has no location at all, so it's left untouched
    // rather than stamped with a synthetic one.
    assert!(result.errors[0].location.is_none());
}
