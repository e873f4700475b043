// Licensed under the Apache License, Version 2.0.

//! Matching of operand/argument values against the single-character
//! parameter-type codes shared by the instruction and function
//! registries.

#[cfg(test)]
mod tests;

use crate::types::{numeric_rank, ScalarType, Ty, TypeKind};
use crate::value::{self, Value};

/// Attempts to match `value` against one parameter-type code, returning
/// the (possibly promoted) value together with an implicit-promotion
/// cost used to rank overloads. `None` means the code rejects `value`.
#[must_use]
pub fn match_param(value: &Value, code: char) -> Option<(Value, u32)> {
    match code {
        'b' => promote_scalar(value, ScalarType::Bool),
        'i' => promote_scalar(value, ScalarType::Int),
        'f' => promote_scalar(value, ScalarType::Float),
        'c' => promote_scalar(value, ScalarType::Complex),
        's' => promote_scalar(value, ScalarType::String),
        'a' => promote_scalar(value, ScalarType::Axis),
        'Q' => match_class(value, ScalarType::Qubit),
        'B' => match_class(value, ScalarType::Bit),
        'V' => match_array_only(value, ScalarType::Qubit),
        'W' => match_array_only(value, ScalarType::Bit),
        'u' | 'n' => match_matching(value, |v| matches!(v, Value::ConstComplexMatrix(_))),
        'm' => match_matching(value, |v| matches!(v, Value::ConstRealMatrix(_))),
        'j' => match_matching(value, |v| matches!(v, Value::ConstString(_))),
        _ => None,
    }
}

fn promote_scalar(value: &Value, target: ScalarType) -> Option<(Value, u32)> {
    let ty = Ty::scalar(target);
    let promoted = value::promote(value, &ty)?;
    let src = value::type_of(value).scalar_type();
    let cost = if src == target {
        0
    } else {
        match (numeric_rank(src), numeric_rank(target)) {
            (Some(a), Some(b)) => u32::from(b - a),
            _ => 1,
        }
    };
    Some((promoted, cost))
}

/// Matches `Qubit`/`Bit` scalars or arrays of that element type (codes
/// `Q`/`B`), with no promotion involved. An array match costs more
/// than a scalar match so that, when both a `Q`/`B` and a `V`/`W`
/// overload are viable for the same array operand, the more specific
/// `V`/`W` overload wins instead of tying.
fn match_class(value: &Value, scalar: ScalarType) -> Option<(Value, u32)> {
    match value::type_of(value).kind {
        TypeKind::Scalar(s) if s == scalar => Some((value.clone(), 0)),
        TypeKind::Array(s, _) if s == scalar => Some((value.clone(), 1)),
        _ => None,
    }
}

/// Matches only arrays of `scalar` (codes `V`/`W`).
fn match_array_only(value: &Value, scalar: ScalarType) -> Option<(Value, u32)> {
    match value::type_of(value).kind {
        TypeKind::Array(s, _) if s == scalar => Some((value.clone(), 0)),
        _ => None,
    }
}

fn match_matching(value: &Value, predicate: impl Fn(&Value) -> bool) -> Option<(Value, u32)> {
    predicate(value).then(|| (value.clone(), 0))
}

/// Matches a full parameter-type string against a list of operand
/// values. `None` param_types denotes zero operands. Returns the
/// promoted operands and the total promotion cost, or `None` if any
/// operand does not match.
#[must_use]
pub fn match_signature(param_types: Option<&str>, operands: &[Value]) -> Option<(Vec<Value>, u32)> {
    let codes: Vec<char> = param_types.map(str::chars).into_iter().flatten().collect();
    if codes.len() != operands.len() {
        return None;
    }
    let mut promoted = Vec::with_capacity(operands.len());
    let mut total_cost = 0u32;
    for (code, operand) in codes.iter().zip(operands) {
        let (value, cost) = match_param(operand, *code)?;
        promoted.push(value);
        total_cost += cost;
    }
    Some((promoted, total_cost))
}

/// Renders a list of operand types for error messages, e.g. `"Q, f"`.
#[must_use]
pub fn describe_operand_types(operands: &[Value]) -> String {
    operands
        .iter()
        .map(|v| value::type_of(v).to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
