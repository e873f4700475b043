// Licensed under the Apache License, Version 2.0.

//! Top-level entry point: version gate, parse, analyse. Produces one
//! [`AnalysisResult`](crate::analyzer::AnalysisResult) per call and never
//! panics on malformed input; only internal tree-shape violations panic.

#[cfg(test)]
mod tests;

use crate::analyzer::{AnalysisResult, Analyzer};
use crate::parse;
use crate::version;

/// Analyses `source` against API version `3.0`.
///
/// Equivalent to [`analyze_with_version`] called with `(3, 0)`; the
/// convenience entry point for callers that track only one cQASM
/// dialect version.
#[must_use]
pub fn analyze(source: &str) -> AnalysisResult {
    analyze_with_version(source, (3, 0))
}

/// Analyses `source` against the given `api_version`.
///
/// Runs, in order: a version pre-scan (rejecting sources whose
/// declared version exceeds `api_version`), a full parse (recovering
/// past independent statement errors), then the semantic analyser. A
/// failure at either of the first two steps short-circuits with an
/// empty root and the errors collected so far; it never invokes the
/// next step on a tree it can't trust.
#[must_use]
pub fn analyze_with_version(source: &str, api_version: (u32, u32)) -> AnalysisResult {
    log::debug!("starting analysis against api_version {}.{}", api_version.0, api_version.1);

    if let Err(err) = version::scan_version(source) {
        log::debug!("version pre-scan rejected the source: {err}");
        return AnalysisResult {
            root: None,
            errors: vec![err],
        };
    }

    let (program, parse_errors) = parse::parse(source);
    if !parse_errors.is_empty() {
        log::debug!("parse reported {} error(s); skipping analysis", parse_errors.len());
        return AnalysisResult {
            root: None,
            errors: parse_errors,
        };
    }
    let program = program.expect("a program with no parse errors is always produced");

    log::trace!("parse produced {} top-level statement(s)", program.statements.len());
    Analyzer::new(api_version).analyze(&program)
}

/// Like [`analyze_with_version`], but stamps `file_name` onto every
/// diagnostic's location, so a caller juggling several source files
/// can tell them apart in `Display` output and LSP JSON.
#[must_use]
pub fn analyze_file(file_name: &str, source: &str, api_version: (u32, u32)) -> AnalysisResult {
    let mut result = analyze_with_version(source, api_version);
    for err in &mut result.errors {
        if let Some(location) = &mut err.location {
            location.file_name.get_or_insert_with(|| file_name.to_string());
        }
    }
    result
}
