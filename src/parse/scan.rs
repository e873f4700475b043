use crate::diagnostic::{Diagnostic, ErrorKind};
use crate::lex::cooked::{Lexer, Token, TokenKind};
use crate::location::{Position, SourceLocation, SourceRange};

/// Thin wrapper over the cooked token stream with one-token lookahead,
/// plus the diagnostic list parsing accumulates into.
pub(super) struct Scanner<'a> {
    tokens: Lexer<'a>,
    peek: Token<'a>,
    errors: Vec<Diagnostic>,
}

fn eof_at(pos: Position) -> Token<'static> {
    Token {
        kind: TokenKind::Unknown,
        text: "",
        start: pos,
        end: pos,
    }
}

impl<'a> Scanner<'a> {
    pub(super) fn new(input: &'a str) -> Self {
        let mut tokens = Lexer::new(input);
        let peek = tokens.next().unwrap_or_else(|| eof_at(Position::new(1, 1)));
        Self {
            tokens,
            peek,
            errors: Vec::new(),
        }
    }

    pub(super) fn peek(&self) -> &TokenKind {
        &self.peek.kind
    }

    pub(super) fn at_eof(&self) -> bool {
        self.peek.text.is_empty() && self.peek.kind == TokenKind::Unknown
    }

    pub(super) fn text(&self) -> &'a str {
        self.peek.text
    }

    pub(super) fn span(&self) -> SourceLocation {
        SourceLocation::new(None, SourceRange::new(self.peek.start, self.peek.end))
    }

    pub(super) fn advance(&mut self) {
        if !self.at_eof() {
            self.peek = self
                .tokens
                .next()
                .unwrap_or_else(|| eof_at(self.peek.end));
        }
    }

    /// Consumes the current token if it matches `kind`, returning its
    /// source text. Otherwise records an error and does not advance.
    pub(super) fn expect(&mut self, kind: &TokenKind, what: &str) -> Option<&'a str> {
        if self.peek.kind == *kind {
            let text = self.peek.text;
            self.advance();
            Some(text)
        } else {
            self.error(format!("expected {what}, found `{}`", self.text()));
            None
        }
    }

    pub(super) fn error(&mut self, message: String) {
        self.errors.push(Diagnostic::at(ErrorKind::Parse(message), self.span()));
    }

    /// Skips tokens up to and including the next statement separator
    /// (`;` or end of input), for statement-level error recovery.
    pub(super) fn recover_to_next_statement(&mut self) {
        while !self.at_eof() && *self.peek() != TokenKind::Semi {
            self.advance();
        }
        if *self.peek() == TokenKind::Semi {
            self.advance();
        }
    }

    pub(super) fn into_errors(self) -> Vec<Diagnostic> {
        self.errors
    }
}
