// Licensed under the Apache License, Version 2.0.

//! The cooked lexing phase. Discards whitespace and comments,
//! recognizes keywords, and combines adjacent raw tokens into the
//! grammar's multi-character operators. Cooked tokens are not
//! necessarily contiguous, so each carries both its start and end
//! position rather than a single offset.

#[cfg(test)]
mod tests;

use super::raw::{self, TokenKind as RawKind};
use super::Delim;
use crate::location::Position;
use enum_iterator::Sequence;
use std::iter::Peekable;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Sequence)]
pub(crate) enum Keyword {
    Version,
    Qubit,
    Bit,
    Bool,
    Int,
    Float,
    Axis,
    Measure,
    Reset,
    Inv,
    Pow,
    Ctrl,
    True,
    False,
}

impl Keyword {
    fn from_ident(text: &str) -> Option<Self> {
        Some(match text {
            "version" => Keyword::Version,
            "qubit" => Keyword::Qubit,
            "bit" => Keyword::Bit,
            "bool" => Keyword::Bool,
            "int" => Keyword::Int,
            "float" => Keyword::Float,
            "axis" => Keyword::Axis,
            "measure" => Keyword::Measure,
            "reset" => Keyword::Reset,
            "inv" => Keyword::Inv,
            "pow" => Keyword::Pow,
            "ctrl" => Keyword::Ctrl,
            "true" => Keyword::True,
            "false" => Keyword::False,
            _ => return None,
        })
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum TokenKind {
    Keyword(Keyword),
    Ident,
    IntLit,
    FloatLit,
    StringLit,
    Open(Delim),
    Close(Delim),
    Comma,
    Semi,
    Colon,
    Question,
    Eq,
    EqEq,
    Bang,
    BangEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Plus,
    Minus,
    Star,
    StarStar,
    Slash,
    AmpAmp,
    BarBar,
    /// A character outside the grammar's operator set. Parsed as a
    /// token so the parser can report it rather than the lexer
    /// aborting; lexing never fails.
    Unknown,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Token<'a> {
    pub(crate) kind: TokenKind,
    pub(crate) text: &'a str,
    pub(crate) start: Position,
    pub(crate) end: Position,
}

pub(crate) struct Lexer<'a> {
    input: &'a str,
    raw: Peekable<raw::Lexer<'a>>,
}

impl<'a> Lexer<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Self {
            input,
            raw: raw::Lexer::new(input).peekable(),
        }
    }

    fn peek_is(&mut self, c: char) -> bool {
        matches!(self.raw.peek(), Some(t) if t.kind == RawKind::Single(c))
    }

    /// If the next raw token is the single character `c`, consumes it
    /// and returns `double` along with the combined token's end
    /// position and byte offset; otherwise returns `single` with the
    /// first token's own end.
    fn combine_if(
        &mut self,
        c: char,
        double: TokenKind,
        single: TokenKind,
        first_end: Position,
        first_text_end: usize,
    ) -> (TokenKind, Position, usize) {
        if self.peek_is(c) {
            let second = self.raw.next().expect("peeked Some above");
            (double, second.end, second.text_end)
        } else {
            (single, first_end, first_text_end)
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        loop {
            let raw_tok = self.raw.next()?;
            if matches!(raw_tok.kind, RawKind::Whitespace | RawKind::Comment) {
                continue;
            }
            let (kind, end, text_end) = match raw_tok.kind {
                RawKind::Ident => {
                    let text = &self.input[raw_tok.text_start..raw_tok.text_end];
                    let kind = Keyword::from_ident(text).map_or(TokenKind::Ident, TokenKind::Keyword);
                    (kind, raw_tok.end, raw_tok.text_end)
                }
                RawKind::Int => (TokenKind::IntLit, raw_tok.end, raw_tok.text_end),
                RawKind::Float => (TokenKind::FloatLit, raw_tok.end, raw_tok.text_end),
                RawKind::String => (TokenKind::StringLit, raw_tok.end, raw_tok.text_end),
                RawKind::Single('(') => (TokenKind::Open(Delim::Paren), raw_tok.end, raw_tok.text_end),
                RawKind::Single(')') => (TokenKind::Close(Delim::Paren), raw_tok.end, raw_tok.text_end),
                RawKind::Single('[') => (TokenKind::Open(Delim::Bracket), raw_tok.end, raw_tok.text_end),
                RawKind::Single(']') => (TokenKind::Close(Delim::Bracket), raw_tok.end, raw_tok.text_end),
                RawKind::Single(',') => (TokenKind::Comma, raw_tok.end, raw_tok.text_end),
                RawKind::Single(';') => (TokenKind::Semi, raw_tok.end, raw_tok.text_end),
                RawKind::Single(':') => (TokenKind::Colon, raw_tok.end, raw_tok.text_end),
                RawKind::Single('?') => (TokenKind::Question, raw_tok.end, raw_tok.text_end),
                RawKind::Single('+') => (TokenKind::Plus, raw_tok.end, raw_tok.text_end),
                RawKind::Single('-') => (TokenKind::Minus, raw_tok.end, raw_tok.text_end),
                RawKind::Single('*') => {
                    self.combine_if('*', TokenKind::StarStar, TokenKind::Star, raw_tok.end, raw_tok.text_end)
                }
                RawKind::Single('/') => (TokenKind::Slash, raw_tok.end, raw_tok.text_end),
                RawKind::Single('=') => {
                    self.combine_if('=', TokenKind::EqEq, TokenKind::Eq, raw_tok.end, raw_tok.text_end)
                }
                RawKind::Single('!') => {
                    self.combine_if('=', TokenKind::BangEq, TokenKind::Bang, raw_tok.end, raw_tok.text_end)
                }
                RawKind::Single('<') => {
                    self.combine_if('=', TokenKind::LtEq, TokenKind::Lt, raw_tok.end, raw_tok.text_end)
                }
                RawKind::Single('>') => {
                    self.combine_if('=', TokenKind::GtEq, TokenKind::Gt, raw_tok.end, raw_tok.text_end)
                }
                RawKind::Single('&') => {
                    self.combine_if('&', TokenKind::AmpAmp, TokenKind::Unknown, raw_tok.end, raw_tok.text_end)
                }
                RawKind::Single('|') => {
                    self.combine_if('|', TokenKind::BarBar, TokenKind::Unknown, raw_tok.end, raw_tok.text_end)
                }
                RawKind::Single(_) | RawKind::Whitespace | RawKind::Comment => {
                    (TokenKind::Unknown, raw_tok.end, raw_tok.text_end)
                }
            };
            let text = &self.input[raw_tok.text_start..text_end];
            return Some(Token {
                kind,
                text,
                start: raw_tok.start,
                end,
            });
        }
    }
}
