// Licensed under the Apache License, Version 2.0.

//! Gate-modifier lowering: `inv`, `pow`, `ctrl`.

#[cfg(test)]
mod tests;

use crate::diagnostic::{Diagnostic, ErrorKind};
use crate::instruction::qubit_refs;
use crate::value::Value;

/// One applied modifier, carrying its parameter if it has one.
#[derive(Clone, Debug)]
pub enum Modifier {
    Inv,
    Pow(Value),
    Ctrl,
}

/// A modified gate: the underlying instruction name, the modifiers
/// applied to it (innermost first), and the operand list after every
/// modifier's arity transformation.
#[derive(Clone, Debug)]
pub struct CompositeGate {
    pub instruction_name: String,
    pub modifiers: Vec<Modifier>,
    pub operands: Vec<Value>,
}

impl CompositeGate {
    /// The unmodified base gate: no modifiers yet applied.
    #[must_use]
    pub fn base(instruction_name: impl Into<String>, operands: Vec<Value>) -> Self {
        Self {
            instruction_name: instruction_name.into(),
            modifiers: Vec::new(),
            operands,
        }
    }
}

/// `inv(G)`: operand list and parameters unchanged.
#[must_use]
pub fn apply_inv(mut gate: CompositeGate) -> CompositeGate {
    gate.modifiers.push(Modifier::Inv);
    gate
}

/// `pow(G, e)`: operand list unchanged; attaches a float parameter.
/// `exponent` is constant-folded by the caller but need not be constant.
#[must_use]
pub fn apply_pow(mut gate: CompositeGate, exponent: Value) -> CompositeGate {
    gate.modifiers.push(Modifier::Pow(exponent));
    gate
}

/// `ctrl(G)`: prepends a single qubit operand (the control). Requires
/// the control and every target qubit index to be pairwise distinct.
pub fn apply_ctrl(mut gate: CompositeGate, control: Value) -> Result<CompositeGate, Diagnostic> {
    let mut operands = vec![control.clone()];
    operands.extend(gate.operands.iter().cloned());

    let refs = qubit_refs(&operands);
    let mut seen = std::collections::HashSet::new();
    for (ptr, index) in refs {
        if !seen.insert((ptr, index)) {
            return Err(Diagnostic::new(ErrorKind::ModifierIndexClash));
        }
    }

    gate.operands = operands;
    gate.modifiers.push(Modifier::Ctrl);
    Ok(gate)
}
