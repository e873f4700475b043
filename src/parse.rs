// Licensed under the Apache License, Version 2.0.

//! Recursive-descent parser producing the [`ast`](crate::ast) this
//! crate's semantic analyser consumes: a `Scanner` with
//! `peek`/`advance`/`expect`, and statement-level error recovery so
//! independent parse errors are each reported rather than the first
//! one aborting the whole parse.

mod expr;
mod prim;
mod scan;
mod stmt;

#[cfg(test)]
mod tests;

use crate::ast::Program;
use crate::diagnostic::Diagnostic;
use scan::Scanner;

/// Parses `source` into a [`Program`]. Recovery means this can return
/// `Some` even when `errors` is non-empty: the tree covers whatever
/// statements were recoverable.
#[must_use]
pub fn parse(source: &str) -> (Option<Program>, Vec<Diagnostic>) {
    let mut scanner = Scanner::new(source);
    let program = stmt::parse_program(&mut scanner);
    (program, scanner.into_errors())
}
