use super::*;

fn kinds(input: &str) -> Vec<TokenKind> {
    Lexer::new(input).map(|t| t.kind).collect()
}

#[test]
fn comment_runs_to_end_of_line() {
    assert_eq!(
        kinds("# hello\nx"),
        vec![TokenKind::Comment, TokenKind::Whitespace, TokenKind::Ident]
    );
}

#[test]
fn whitespace_run_is_one_token() {
    assert_eq!(kinds("   \t\n  "), vec![TokenKind::Whitespace]);
}

#[test]
fn ident_allows_digits_after_first_char() {
    let toks: Vec<_> = Lexer::new("q1").collect();
    assert_eq!(toks.len(), 1);
    assert_eq!(toks[0].kind, TokenKind::Ident);
    assert_eq!(toks[0].text_start, 0);
    assert_eq!(toks[0].text_end, 2);
}

#[test]
fn integer_literal() {
    assert_eq!(kinds("123"), vec![TokenKind::Int]);
}

#[test]
fn float_literal_with_fraction() {
    assert_eq!(kinds("1.5"), vec![TokenKind::Float]);
}

#[test]
fn float_literal_with_exponent() {
    assert_eq!(kinds("1e10"), vec![TokenKind::Float]);
    assert_eq!(kinds("1e+10"), vec![TokenKind::Float]);
    assert_eq!(kinds("1.5e-3"), vec![TokenKind::Float]);
}

#[test]
fn integer_not_confused_by_trailing_dot_dot() {
    // Not range syntax in this grammar, but the digit run must still stop
    // cleanly at the first non-digit.
    assert_eq!(kinds("12,3"), vec![TokenKind::Int, TokenKind::Single(','), TokenKind::Int]);
}

#[test]
fn string_literal_captures_quotes() {
    let toks: Vec<_> = Lexer::new("\"abc\"").collect();
    assert_eq!(toks.len(), 1);
    assert_eq!(toks[0].kind, TokenKind::String);
    assert_eq!(toks[0].text_start, 0);
    assert_eq!(toks[0].text_end, 5);
}

#[test]
fn unterminated_string_consumes_to_end_without_panicking() {
    let toks: Vec<_> = Lexer::new("\"abc").collect();
    assert_eq!(toks.len(), 1);
    assert_eq!(toks[0].kind, TokenKind::String);
}

#[test]
fn single_char_operators_are_individual_tokens() {
    assert_eq!(
        kinds("==!"),
        vec![
            TokenKind::Single('='),
            TokenKind::Single('='),
            TokenKind::Single('!'),
        ]
    );
}

#[test]
fn positions_track_lines_and_columns() {
    let toks: Vec<_> = Lexer::new("a\nbb").collect();
    assert_eq!(toks[0].start, Position::new(1, 1));
    assert_eq!(toks[0].end, Position::new(1, 2));
    assert_eq!(toks[1].kind, TokenKind::Whitespace);
    assert_eq!(toks[2].start, Position::new(2, 1));
    assert_eq!(toks[2].end, Position::new(2, 3));
}
