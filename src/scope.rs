// Licensed under the Apache License, Version 2.0.

//! Lexical scoping: a stack of name-to-value mappings plus the
//! statement block each scope is accumulating.


use crate::diagnostic::{Diagnostic, ErrorKind};
use crate::location::SourceLocation;
use crate::value::Value;
use rustc_hash::FxHashMap;

/// The statements collected while a scope was open, plus the smallest
/// source range enclosing all of them.
#[derive(Debug)]
pub struct Block<Stmt> {
    pub statements: Vec<Stmt>,
    pub location: Option<SourceLocation>,
}

impl<Stmt> Block<Stmt> {
    fn new() -> Self {
        Self {
            statements: Vec::new(),
            location: None,
        }
    }

    fn widen(&mut self, location: Option<&SourceLocation>) {
        let Some(location) = location else { return };
        match &mut self.location {
            Some(existing) => existing.expand_to_include_range(location),
            None => self.location = Some(location.clone()),
        }
    }
}

struct Frame<Stmt> {
    mappings: FxHashMap<String, Value>,
    block: Block<Stmt>,
}

impl<Stmt> Frame<Stmt> {
    fn new() -> Self {
        Self {
            mappings: FxHashMap::default(),
            block: Block::new(),
        }
    }
}

/// A stack of lexical scopes, innermost last. Name resolution walks the
/// stack from the top down; the outermost frame is never popped.
pub struct ScopeStack<Stmt> {
    frames: Vec<Frame<Stmt>>,
}

impl<Stmt> Default for ScopeStack<Stmt> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Stmt> ScopeStack<Stmt> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            frames: vec![Frame::new()],
        }
    }

    pub fn push(&mut self) {
        self.frames.push(Frame::new());
    }

    /// Pops the innermost scope and returns the block it accumulated.
    ///
    /// # Panics
    /// Panics if called on the outermost (global) scope.
    pub fn pop(&mut self) -> Block<Stmt> {
        assert!(self.frames.len() > 1, "cannot pop the outermost scope");
        self.frames.pop().expect("checked above").block
    }

    /// Adds a name-to-value mapping to the innermost scope. Fails if
    /// the name is already bound in that same scope; shadowing an
    /// outer scope's name is allowed.
    pub fn add_mapping(&mut self, name: impl Into<String>, value: Value) -> Result<(), Diagnostic> {
        let name = name.into();
        let frame = self.frames.last_mut().expect("scope stack is never empty");
        if frame.mappings.contains_key(&name) {
            return Err(Diagnostic::new(ErrorKind::DuplicateName(name)));
        }
        frame.mappings.insert(name, value);
        Ok(())
    }

    /// Resolves `name` starting from the innermost scope outward.
    pub fn resolve(&self, name: &str) -> Result<Value, Diagnostic> {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.mappings.get(name).cloned())
            .ok_or_else(|| Diagnostic::new(ErrorKind::UndefinedName(name.to_string())))
    }

    #[must_use]
    pub fn current_block(&self) -> &Block<Stmt> {
        &self.frames.last().expect("scope stack is never empty").block
    }

    /// Appends `stmt` to the innermost scope's block, widening the
    /// block's location to include `location` if given.
    pub fn add_statement(&mut self, stmt: Stmt, location: Option<&SourceLocation>) {
        let frame = self.frames.last_mut().expect("scope stack is never empty");
        frame.block.widen(location);
        frame.block.statements.push(stmt);
    }

    /// Consumes the stack and returns the outermost scope's block.
    ///
    /// # Panics
    /// Panics if any scope besides the outermost one is still open.
    #[must_use]
    pub fn into_outermost_block(mut self) -> Block<Stmt> {
        assert!(self.frames.len() == 1, "inner scopes must be popped before this call");
        self.frames.pop().expect("checked above").block
    }
}
