// Licensed under the Apache License, Version 2.0.

//! The version pre-scanner: reads only the leading `version M[.m]`
//! line, skipping blank lines and `#`-comments before it, ahead of
//! full tokenization.

#[cfg(test)]
mod tests;

use crate::diagnostic::{Diagnostic, ErrorKind};
use crate::lex::cooked::{Keyword, Lexer, TokenKind};

/// Scans `source` for its leading `version M[.m]` header and returns
/// the declared `(major, minor)` pair. `minor` defaults to 0 when
/// omitted.
pub fn scan_version(source: &str) -> Result<(u32, u32), Diagnostic> {
    let mut tokens = Lexer::new(source).filter(|t| !matches!(t.kind, TokenKind::Unknown));

    match tokens.next() {
        Some(t) if t.kind == TokenKind::Keyword(Keyword::Version) => {}
        _ => {
            return Err(Diagnostic::new(ErrorKind::Parse(
                "source must begin with a `version` header".to_string(),
            )))
        }
    }

    // `version 3` lexes its number as a bare `IntLit`; `version 3.0`
    // lexes `3.0` as a single `FloatLit` (the raw lexer folds the `.`
    // and fractional digits into one number token), so both shapes
    // have to be accepted here rather than expecting a separate
    // minor-number token afterwards.
    match tokens.next() {
        Some(t) if t.kind == TokenKind::IntLit => {
            let major: u32 = t
                .text
                .parse()
                .map_err(|_| Diagnostic::new(ErrorKind::Parse("malformed version header".to_string())))?;
            Ok((major, 0))
        }
        Some(t) if t.kind == TokenKind::FloatLit => {
            let (major_text, minor_text) = t
                .text
                .split_once('.')
                .ok_or_else(|| Diagnostic::new(ErrorKind::Parse("malformed version header".to_string())))?;
            let major: u32 = major_text
                .parse()
                .map_err(|_| Diagnostic::new(ErrorKind::Parse("malformed version header".to_string())))?;
            let minor: u32 = minor_text
                .parse()
                .map_err(|_| Diagnostic::new(ErrorKind::Parse("malformed version header".to_string())))?;
            Ok((major, minor))
        }
        _ => Err(Diagnostic::new(ErrorKind::Parse("malformed version header".to_string()))),
    }
}
