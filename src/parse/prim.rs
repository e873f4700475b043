use super::scan::Scanner;
use crate::ast::TypeName;
use crate::lex::cooked::{Keyword, TokenKind};
use crate::types::ScalarType;

/// `name` — a bare identifier, used for variable/function/instruction
/// names alike.
pub(super) fn ident(scanner: &mut Scanner) -> Option<String> {
    if scanner.peek() == &TokenKind::Ident {
        let text = scanner.text().to_string();
        scanner.advance();
        Some(text)
    } else {
        scanner.error(format!("expected an identifier, found `{}`", scanner.text()));
        None
    }
}

fn scalar_type_keyword(scanner: &mut Scanner) -> Option<ScalarType> {
    let ty = match scanner.peek() {
        TokenKind::Keyword(Keyword::Qubit) => ScalarType::Qubit,
        TokenKind::Keyword(Keyword::Bit) => ScalarType::Bit,
        TokenKind::Keyword(Keyword::Bool) => ScalarType::Bool,
        TokenKind::Keyword(Keyword::Int) => ScalarType::Int,
        TokenKind::Keyword(Keyword::Float) => ScalarType::Float,
        TokenKind::Keyword(Keyword::Axis) => ScalarType::Axis,
        _ => {
            scanner.error(format!(
                "expected a type keyword, found `{}`",
                scanner.text()
            ));
            return None;
        }
    };
    scanner.advance();
    Some(ty)
}

/// `<type> [ '[' intlit ']' ]` — the declared type of a variable,
/// consuming an optional array-size suffix.
pub(super) fn type_name(scanner: &mut Scanner) -> Option<TypeName> {
    let scalar = scalar_type_keyword(scanner)?;
    if scanner.peek() == &TokenKind::Open(crate::lex::Delim::Bracket) {
        scanner.advance();
        let size = super::expr::expr(scanner)?;
        scanner.expect(
            &TokenKind::Close(crate::lex::Delim::Bracket),
            "`]` after array size",
        )?;
        Some(TypeName::Array(scalar, size))
    } else {
        Some(TypeName::Scalar(scalar))
    }
}
