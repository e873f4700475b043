use super::*;

#[test]
fn major_only() {
    assert_eq!(scan_version("version 3\nqubit q").unwrap(), (3, 0));
}

#[test]
fn major_and_minor() {
    assert_eq!(scan_version("version 3.0\nqubit q").unwrap(), (3, 0));
    assert_eq!(scan_version("version 1.2").unwrap(), (1, 2));
}

#[test]
fn skips_leading_blank_lines_and_comments() {
    assert_eq!(scan_version("\n# a header comment\n\nversion 3\n").unwrap(), (3, 0));
}

#[test]
fn missing_header_is_an_error() {
    assert!(scan_version("qubit q").is_err());
}

#[test]
fn missing_major_number_is_an_error() {
    assert!(scan_version("version").is_err());
    assert!(scan_version("version qubit").is_err());
}

#[test]
fn bare_version_line_defaults_minor_to_zero() {
    let (major, minor) = scan_version("version 3").unwrap();
    assert_eq!((major, minor), (3, 0));
}
