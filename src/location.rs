// Licensed under the Apache License, Version 2.0.

//! Source-location carrier attached to AST and semantic tree nodes.
//!
//! Coordinates are 1-based and inclusive on both ends.


use std::fmt::{self, Display, Formatter};

/// A line/column pair within a source file. 1-based.
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    #[must_use]
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// An inclusive range between two [`Position`]s.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct SourceRange {
    pub first: Position,
    pub last: Position,
}

impl SourceRange {
    #[must_use]
    pub fn new(first: Position, last: Position) -> Self {
        Self { first, last }
    }

    /// Widens the range, if necessary, to also cover `(line, column)`.
    pub fn expand_to_include(&mut self, line: u32, column: u32) {
        let point = Position::new(line, column);
        if point < self.first {
            self.first = point;
        }
        if point > self.last {
            self.last = point;
        }
    }
}

/// A file name plus a [`SourceRange`] within it. Attached to AST and
/// semantic tree nodes so diagnostics can point back at source text.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct SourceLocation {
    pub file_name: Option<String>,
    pub range: SourceRange,
}

impl SourceLocation {
    #[must_use]
    pub fn new(file_name: Option<String>, range: SourceRange) -> Self {
        Self { file_name, range }
    }

    #[must_use]
    pub fn at(file_name: Option<String>, line: u32, column: u32) -> Self {
        let pos = Position::new(line, column);
        Self::new(file_name, SourceRange::new(pos, pos))
    }

    pub fn expand_to_include(&mut self, line: u32, column: u32) {
        self.range.expand_to_include(line, column);
    }

    /// Widens `self` to also cover `other`, keeping `self`'s file name.
    pub fn expand_to_include_range(&mut self, other: &SourceLocation) {
        self.expand_to_include(other.range.first.line, other.range.first.column);
        self.expand_to_include(other.range.last.line, other.range.last.column);
    }
}

impl Display for SourceLocation {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let file = self.file_name.as_deref().unwrap_or("<unknown file name>");
        let first = self.range.first;
        let last = self.range.last;
        if first.line == last.line {
            write!(f, "{file}:{}:{}..{}", first.line, first.column, last.column)
        } else {
            write!(f, "{file}:{first}..{last}")
        }
    }
}

/// A value annotated with an optional source location. Used throughout
/// the AST and semantic tree in place of an open-ended annotation map
/// (see the Design Notes on annotations).
#[derive(Clone, Debug)]
pub struct Located<T> {
    pub location: Option<SourceLocation>,
    pub value: T,
}

impl<T> Located<T> {
    #[must_use]
    pub fn new(value: T, location: Option<SourceLocation>) -> Self {
        Self { location, value }
    }

    #[must_use]
    pub fn unlocated(value: T) -> Self {
        Self {
            location: None,
            value,
        }
    }
}
