// Licensed under the Apache License, Version 2.0.

//! The instruction registry: gate and non-gate signatures, overload
//! resolution, and the post-resolution reused-qubit / qubit-bit-size
//! checks.


use crate::diagnostic::{Diagnostic, ErrorKind};
use crate::paramcode::{describe_operand_types, match_signature};
use crate::types::ScalarType;
use crate::value::{self, Value};
use bitflags::bitflags;
use rustc_hash::FxHashMap;

bitflags! {
    /// Non-exhaustive per-instruction flags.
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub struct InstructionFlags: u8 {
        const CONDITIONAL_ALLOWED = 0b0001;
        const PARALLEL_ALLOWED = 0b0010;
        const REUSED_QUBITS_ALLOWED = 0b0100;
        const QUBIT_BIT_SIZE_MATCH_REQUIRED = 0b1000;
    }
}

/// One registered overload: a name, a parameter-type-code string (`None`
/// denotes zero operands) and its flags.
#[derive(Clone, Debug)]
pub struct InstructionSignature {
    pub name: String,
    pub param_types: Option<String>,
    pub flags: InstructionFlags,
}

impl InstructionSignature {
    #[must_use]
    pub fn new(name: impl Into<String>, param_types: Option<&str>, flags: InstructionFlags) -> Self {
        Self {
            name: name.into(),
            param_types: param_types.map(str::to_string),
            flags,
        }
    }
}

/// The result of a successful instruction resolution: the chosen
/// signature together with the operands promoted to its parameter
/// types.
#[derive(Clone, Debug)]
pub struct ResolvedInstruction {
    pub name: String,
    pub flags: InstructionFlags,
    pub operands: Vec<Value>,
}

/// A multimap of instruction name to registered overloads.
#[derive(Clone, Default)]
pub struct InstructionRegistry {
    entries: FxHashMap<String, Vec<InstructionSignature>>,
}

impl InstructionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an overload. A later overload with the same parameter
    /// types replaces an earlier one under the same name.
    pub fn add(&mut self, signature: InstructionSignature) {
        let overloads = self.entries.entry(signature.name.clone()).or_default();
        if let Some(existing) = overloads
            .iter_mut()
            .find(|s| s.param_types == signature.param_types)
        {
            *existing = signature;
        } else {
            overloads.push(signature);
        }
    }

    /// Resolves `name` against `operands`, then runs the
    /// post-resolution reused-qubit and qubit/bit-size checks.
    pub fn resolve(&self, name: &str, operands: &[Value]) -> Result<ResolvedInstruction, Diagnostic> {
        let Some(overloads) = self.entries.get(name) else {
            return Err(Diagnostic::new(ErrorKind::UnknownInstruction(name.to_string())));
        };

        let mut viable: Vec<(&InstructionSignature, Vec<Value>, u32)> = overloads
            .iter()
            .filter_map(|sig| {
                let (promoted, cost) = match_signature(sig.param_types.as_deref(), operands)?;
                Some((sig, promoted, cost))
            })
            .collect();

        if viable.is_empty() {
            return Err(Diagnostic::new(ErrorKind::NoMatchingOverload {
                name: name.to_string(),
                operand_types: describe_operand_types(operands),
            }));
        }

        viable.sort_by_key(|(_, _, cost)| *cost);
        if viable.len() > 1 && viable[0].2 == viable[1].2 {
            return Err(Diagnostic::new(ErrorKind::AmbiguousOverload {
                name: name.to_string(),
                operand_types: describe_operand_types(operands),
            }));
        }

        let (signature, promoted_operands, _) = viable.into_iter().next().expect("checked non-empty above");
        let resolved = ResolvedInstruction {
            name: signature.name.clone(),
            flags: signature.flags,
            operands: promoted_operands,
        };
        check_reused_qubits(&resolved)?;
        check_qubit_bit_size_match(&resolved)?;
        Ok(resolved)
    }
}

/// Identifies each individual qubit an operand list addresses, as
/// (variable identity, index-within-array) pairs. A bare scalar-qubit
/// operand has no index; a whole array operand expands to one entry
/// per element.
pub(crate) fn qubit_refs(operands: &[Value]) -> Vec<(usize, Option<i64>)> {
    let mut out = Vec::new();
    for v in operands {
        match v {
            Value::VariableRef(var) if var.ty.scalar_type() == ScalarType::Qubit => {
                let ptr = std::rc::Rc::as_ptr(var) as usize;
                if let Some(n) = var.ty.size_of() {
                    out.extend((0..n as i64).map(|i| (ptr, Some(i))));
                } else {
                    out.push((ptr, None));
                }
            }
            Value::IndexRef { variable, indices } if variable.ty.scalar_type() == ScalarType::Qubit => {
                let ptr = std::rc::Rc::as_ptr(variable) as usize;
                out.extend(indices.iter().map(|i| (ptr, Some(*i))));
            }
            _ => {}
        }
    }
    out
}

fn check_reused_qubits(resolved: &ResolvedInstruction) -> Result<(), Diagnostic> {
    if resolved.flags.contains(InstructionFlags::REUSED_QUBITS_ALLOWED) {
        return Ok(());
    }
    let mut seen = std::collections::HashSet::new();
    for (ptr, index) in qubit_refs(&resolved.operands) {
        if !seen.insert((ptr, index)) {
            return Err(Diagnostic::new(ErrorKind::ReusedQubit(index.unwrap_or(-1))));
        }
    }
    Ok(())
}

fn check_qubit_bit_size_match(resolved: &ResolvedInstruction) -> Result<(), Diagnostic> {
    if !resolved
        .flags
        .contains(InstructionFlags::QUBIT_BIT_SIZE_MATCH_REQUIRED)
    {
        return Ok(());
    }
    let qubit_count: u64 = resolved
        .operands
        .iter()
        .filter(|v| value::type_of(v).scalar_type() == ScalarType::Qubit)
        .map(value::range_of)
        .sum();
    let bit_count: u64 = resolved
        .operands
        .iter()
        .filter(|v| value::type_of(v).scalar_type() == ScalarType::Bit)
        .map(value::range_of)
        .sum();
    if qubit_count != bit_count {
        return Err(Diagnostic::new(ErrorKind::QubitBitSizeMismatch {
            qubit_count,
            bit_count,
        }));
    }
    Ok(())
}

/// Builds the default cQASM 3.0 instruction set, as registered by the
/// driver: the unitary gate table, the two-qubit gate table, and the
/// `measure`/`reset` non-gate table.
#[must_use]
pub fn default_registry() -> InstructionRegistry {
    let mut reg = InstructionRegistry::new();
    let unitary = InstructionFlags::CONDITIONAL_ALLOWED | InstructionFlags::PARALLEL_ALLOWED;
    let non_unitary = InstructionFlags::CONDITIONAL_ALLOWED
        | InstructionFlags::PARALLEL_ALLOWED
        | InstructionFlags::QUBIT_BIT_SIZE_MATCH_REQUIRED;

    for name in [
        "H", "I", "mX90", "mY90", "S", "Sdag", "T", "Tdag", "X", "X90", "Y", "Y90", "Z",
    ] {
        // `Q` already matches a whole qubit array operand (at a higher
        // cost than a bare scalar); a separate `V` overload would tie
        // with it on every array operand instead of ever winning.
        reg.add(InstructionSignature::new(name, Some("Q"), unitary));
    }
    for name in ["Rx", "Ry", "Rz"] {
        reg.add(InstructionSignature::new(name, Some("Qf"), unitary));
    }
    for name in ["CNOT", "CZ"] {
        for params in ["QQ", "QV", "VQ", "VV"] {
            reg.add(InstructionSignature::new(name, Some(params), unitary));
        }
    }
    for params in ["QQf", "QVf", "VQf", "VVf"] {
        reg.add(InstructionSignature::new("CR", Some(params), unitary));
    }
    for params in ["QQi", "QVi", "VQi", "VVi"] {
        reg.add(InstructionSignature::new("CRk", Some(params), unitary));
    }

    for params in ["BQ", "WV", "BV", "WQ"] {
        reg.add(InstructionSignature::new("measure", Some(params), non_unitary));
    }
    let reset_flags = InstructionFlags::CONDITIONAL_ALLOWED | InstructionFlags::PARALLEL_ALLOWED;
    reg.add(InstructionSignature::new("reset", None, reset_flags));
    reg.add(InstructionSignature::new("reset", Some("Q"), reset_flags));
    reg.add(InstructionSignature::new("reset", Some("V"), reset_flags));

    reg
}
