use super::*;

fn kinds(input: &str) -> Vec<TokenKind> {
    Lexer::new(input).map(|t| t.kind).collect()
}

#[test]
fn discards_whitespace_and_comments() {
    assert_eq!(
        kinds("qubit  # a comment\n q"),
        vec![TokenKind::Keyword(Keyword::Qubit), TokenKind::Ident]
    );
}

#[test]
fn recognizes_keywords() {
    assert_eq!(
        kinds("version qubit bit bool int float axis measure reset inv pow ctrl true false"),
        vec![
            TokenKind::Keyword(Keyword::Version),
            TokenKind::Keyword(Keyword::Qubit),
            TokenKind::Keyword(Keyword::Bit),
            TokenKind::Keyword(Keyword::Bool),
            TokenKind::Keyword(Keyword::Int),
            TokenKind::Keyword(Keyword::Float),
            TokenKind::Keyword(Keyword::Axis),
            TokenKind::Keyword(Keyword::Measure),
            TokenKind::Keyword(Keyword::Reset),
            TokenKind::Keyword(Keyword::Inv),
            TokenKind::Keyword(Keyword::Pow),
            TokenKind::Keyword(Keyword::Ctrl),
            TokenKind::Keyword(Keyword::True),
            TokenKind::Keyword(Keyword::False),
        ]
    );
}

#[test]
fn every_keyword_variant_round_trips_through_from_ident() {
    for kw in enum_iterator::all::<Keyword>() {
        let text = match kw {
            Keyword::Version => "version",
            Keyword::Qubit => "qubit",
            Keyword::Bit => "bit",
            Keyword::Bool => "bool",
            Keyword::Int => "int",
            Keyword::Float => "float",
            Keyword::Axis => "axis",
            Keyword::Measure => "measure",
            Keyword::Reset => "reset",
            Keyword::Inv => "inv",
            Keyword::Pow => "pow",
            Keyword::Ctrl => "ctrl",
            Keyword::True => "true",
            Keyword::False => "false",
        };
        assert_eq!(Keyword::from_ident(text), Some(kw));
    }
}

#[test]
fn non_keyword_ident_stays_ident() {
    assert_eq!(kinds("q1 myvar"), vec![TokenKind::Ident, TokenKind::Ident]);
}

#[test]
fn combines_two_char_operators() {
    assert_eq!(
        kinds("== != <= >= && ||"),
        vec![
            TokenKind::EqEq,
            TokenKind::BangEq,
            TokenKind::LtEq,
            TokenKind::GtEq,
            TokenKind::AmpAmp,
            TokenKind::BarBar,
        ]
    );
}

#[test]
fn does_not_combine_across_whitespace() {
    assert_eq!(kinds("= ="), vec![TokenKind::Eq, TokenKind::Eq]);
}

#[test]
fn single_char_fallback_when_not_doubled() {
    assert_eq!(
        kinds("= ! < > a"),
        vec![TokenKind::Eq, TokenKind::Bang, TokenKind::Lt, TokenKind::Gt, TokenKind::Ident]
    );
}

#[test]
fn lone_amp_and_bar_are_unknown() {
    assert_eq!(kinds("& |"), vec![TokenKind::Unknown, TokenKind::Unknown]);
}

#[test]
fn combined_operator_token_text_spans_both_characters() {
    let toks: Vec<_> = Lexer::new("==").collect();
    assert_eq!(toks.len(), 1);
    assert_eq!(toks[0].kind, TokenKind::EqEq);
    assert_eq!(toks[0].text, "==");
}

#[test]
fn double_star_is_its_own_token() {
    assert_eq!(kinds("** *"), vec![TokenKind::StarStar, TokenKind::Star]);
}

#[test]
fn delimiters_and_punctuation() {
    assert_eq!(
        kinds("( ) [ ] , ; : ?"),
        vec![
            TokenKind::Open(Delim::Paren),
            TokenKind::Close(Delim::Paren),
            TokenKind::Open(Delim::Bracket),
            TokenKind::Close(Delim::Bracket),
            TokenKind::Comma,
            TokenKind::Semi,
            TokenKind::Colon,
            TokenKind::Question,
        ]
    );
}

#[test]
fn literals_passthrough_text() {
    let toks: Vec<_> = Lexer::new("42 3.5 \"hi\"").collect();
    assert_eq!(toks[0].kind, TokenKind::IntLit);
    assert_eq!(toks[0].text, "42");
    assert_eq!(toks[1].kind, TokenKind::FloatLit);
    assert_eq!(toks[1].text, "3.5");
    assert_eq!(toks[2].kind, TokenKind::StringLit);
    assert_eq!(toks[2].text, "\"hi\"");
}
