// Licensed under the Apache License, Version 2.0.

//! `libqasm` is the semantic front end for cQASM 3.0 quantum-assembly
//! source text: source-location tracking, structured diagnostics, a
//! type and value lattice, instruction/gate-modifier overload
//! resolution, scoped name resolution, and the semantic analyser that
//! ties them together. A small lexer and recursive-descent parser
//! cover the hand-written grammar subset this core exercises end to
//! end; [`driver::analyze`] is the single call most callers need.
//!
//! ```
//! let result = libqasm::analyze("version 3.0\nqubit q;\nH q;");
//! assert!(result.errors.is_empty());
//! assert!(result.root.is_some());
//! ```

pub mod analyzer;
pub mod ast;
pub mod diagnostic;
pub mod driver;
pub mod function;
pub mod instruction;
mod lex;
pub mod location;
pub mod modifier;
pub mod paramcode;
mod parse;
pub mod scope;
pub mod semantic;
pub mod types;
pub mod value;
pub mod version;

pub use analyzer::{AnalysisResult, Analyzer};
pub use diagnostic::{Diagnostic, ErrorKind};
pub use driver::{analyze, analyze_file, analyze_with_version};
