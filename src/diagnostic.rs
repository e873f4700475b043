// Licensed under the Apache License, Version 2.0.

//! Structured diagnostics shared by the parser and the semantic analyser.
//!
//! A [`Diagnostic`] carries a message, an optional [`SourceLocation`] and a
//! severity (always "error" in this core). Parse errors and analysis
//! errors are not distinguished by type, only by where they originate;
//! both flow through this one representation.


use crate::location::SourceLocation;
use std::fmt::{self, Display, Formatter};
use thiserror::Error;

const UNKNOWN_MESSAGE: &str = "<unknown error message>";

/// The diagnostic kinds the parser and analyser can report. Internal
/// tree-shape violations panic instead of being recovered as one of
/// these.
#[derive(Clone, Debug, Error, miette::Diagnostic)]
pub enum ErrorKind {
    #[error("{0}")]
    Parse(String),

    #[error("the maximum cQASM version supported is {supported}, but the cQASM file is version {found}")]
    Version { found: String, supported: String },

    #[error("undefined name `{0}`")]
    UndefinedName(String),

    #[error("unknown instruction `{0}`")]
    UnknownInstruction(String),

    #[error("no matching overload for instruction `{name}` with operand types ({operand_types})")]
    NoMatchingOverload { name: String, operand_types: String },

    #[error("ambiguous overload for instruction `{name}` with operand types ({operand_types})")]
    AmbiguousOverload { name: String, operand_types: String },

    #[error("unknown function `{0}`")]
    UndefinedFunction(String),

    #[error("no matching overload for function `{name}` with argument types ({argument_types})")]
    NoMatchingFunctionOverload { name: String, argument_types: String },

    #[error("type of right-hand side ({rhs_type}) could not be coerced to left-hand side ({lhs_type})")]
    CannotPromote { rhs_type: String, lhs_type: String },

    #[error("left-hand side of assignment statement must be assignable")]
    NotAssignable,

    #[error("expecting Bool, Int, or Float type, found ({0}) in initialization list")]
    BadInitializationListElement(String),

    #[error("cannot perform a promotion between these two types: ({0}) and ({1})")]
    IncompatibleInitializationListElements(String, String),

    #[error("indexation is not supported for value of type '{0}'")]
    NotIndexable(String),

    #[error("cannot set an axis variable to [0.0, 0.0, 0.0]")]
    AxisAllZero,

    #[error("declaring {0} array of size <= 0")]
    NonPositiveArraySize(String),

    #[error("index {index} out of range (size {size})")]
    IndexOutOfRange { index: i64, size: u64 },

    #[error("last index {last} is lower than first index {first}")]
    ReversedIndexRange { first: i64, last: i64 },

    #[error("trying to initialize a lhs of size {lhs_size} with a rhs of size {rhs_size}")]
    SizeMismatch { lhs_size: u64, rhs_size: u64 },

    #[error("qubit and bit indices have different sizes: {qubit_count} qubit-typed operand(s), {bit_count} bit-typed operand(s)")]
    QubitBitSizeMismatch { qubit_count: u64, bit_count: u64 },

    #[error("qubit index {0} is reused by this instruction")]
    ReusedQubit(i64),

    #[error("control and target qubit indices must be pairwise distinct")]
    ModifierIndexClash,

    #[error("unknown type \"{0}\"")]
    UnknownType(String),

    #[error("duplicate name `{0}` in this scope")]
    DuplicateName(String),

    #[error("initialization list is empty")]
    EmptyInitializationList,

    #[error("integer must be constant")]
    NotConstant,
}

/// A single diagnostic: message, optional location, severity (always
/// "error" here).
#[derive(Clone, Debug)]
pub struct Diagnostic {
    kind: ErrorKind,
    pub location: Option<SourceLocation>,
}

impl Diagnostic {
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            location: None,
        }
    }

    #[must_use]
    pub fn at(kind: ErrorKind, location: SourceLocation) -> Self {
        Self {
            kind,
            location: Some(location),
        }
    }

    #[must_use]
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    #[must_use]
    pub fn message(&self) -> String {
        let text = self.kind.to_string();
        if text.is_empty() {
            UNKNOWN_MESSAGE.to_string()
        } else {
            text
        }
    }

    /// Attaches `location` to this diagnostic if it doesn't already have
    /// one. No-op otherwise.
    pub fn context(&mut self, location: Option<&SourceLocation>) {
        if self.location.is_none() {
            self.location = location.cloned();
        }
    }

    /// Renders the LSP-style JSON `Diagnostic` object for this error.
    /// `range` fields are zero-based, defaulting to 0 when no location
    /// is attached.
    #[must_use]
    pub fn to_lsp_json(&self) -> serde_json::Value {
        let (start_line, start_col, end_line, end_col) = self
            .location
            .as_ref()
            .map(|loc| {
                (
                    loc.range.first.line.saturating_sub(1),
                    loc.range.first.column.saturating_sub(1),
                    loc.range.last.line.saturating_sub(1),
                    loc.range.last.column.saturating_sub(1),
                )
            })
            .unwrap_or((0, 0, 0, 0));

        let mut value = serde_json::json!({
            "range": {
                "start": { "line": start_line, "character": start_col },
                "end": { "line": end_line, "character": end_col },
            },
            "message": self.message(),
            "severity": 1,
        });

        if let Some(file_name) = self.location.as_ref().and_then(|l| l.file_name.as_deref()) {
            value["relatedInformation"] = serde_json::json!([{
                "location": {
                    "uri": format!("file:///{}", url_encode(file_name)),
                    "range": {
                        "start": { "line": 0, "character": 0 },
                        "end": { "line": 0, "character": 0 },
                    },
                },
                "message": self.message(),
            }]);
        }

        value
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match &self.location {
            Some(location) => write!(f, "Error at {location}: {}", self.message()),
            None => write!(f, "Error: {}", self.message()),
        }
    }
}

impl std::error::Error for Diagnostic {}

/// Percent-encodes a string for use in a `file://` URI, preserving
/// alphanumerics and `-_.~`.
fn url_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~') {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}
