// Licensed under the Apache License, Version 2.0.

//! The value lattice: constants, variable references, index references
//! and (possibly unresolved) function calls.

#[cfg(test)]
mod tests;

use crate::location::SourceLocation;
use crate::types::{promote_type, ScalarType, Ty, TypeKind};
use num_complex::Complex64;
use std::fmt::{self, Display, Formatter};
use std::rc::Rc;

/// A declared variable. Lives until its enclosing scope is destroyed;
/// referenced non-owningly (via [`Rc`]) from [`Value::VariableRef`] and
/// [`Value::IndexRef`], per the Design Notes on reference cycles.
#[derive(Debug)]
pub struct Variable {
    pub name: String,
    pub ty: Ty,
    pub location: Option<SourceLocation>,
}

impl Variable {
    #[must_use]
    pub fn new(name: impl Into<String>, ty: Ty, location: Option<SourceLocation>) -> Rc<Self> {
        Rc::new(Self {
            name: name.into(),
            ty,
            location,
        })
    }
}

/// A value: a constant, a reference to a declared variable, an index
/// reference into a declared array variable, or a (possibly unresolved)
/// function call.
#[derive(Clone, Debug)]
pub enum Value {
    ConstBool(bool),
    ConstInt(i64),
    ConstReal(f64),
    ConstComplex(Complex64),
    ConstString(String),
    ConstAxis([f64; 3]),
    ConstBoolArray(Vec<bool>),
    ConstIntArray(Vec<i64>),
    ConstRealArray(Vec<f64>),
    ConstRealMatrix(Vec<Vec<f64>>),
    ConstComplexMatrix(Vec<Vec<Complex64>>),
    VariableRef(Rc<Variable>),
    IndexRef {
        variable: Rc<Variable>,
        indices: Vec<i64>,
    },
    /// A call that could not be constant-folded because at least one
    /// argument was not constant. `result_type` is the resolved
    /// function overload's return type.
    FunctionCall {
        name: String,
        args: Vec<Value>,
        result_type: Ty,
    },
}

impl Value {
    /// `true` for every variant except [`Value::VariableRef`],
    /// [`Value::IndexRef`] and [`Value::FunctionCall`] (which is only
    /// ever constructed when folding was not possible).
    #[must_use]
    pub fn is_constant(&self) -> bool {
        !matches!(
            self,
            Value::VariableRef(_) | Value::IndexRef { .. } | Value::FunctionCall { .. }
        )
    }

    /// `true` for variable and index references: the lvalues an
    /// assignment's left-hand side must resolve to.
    #[must_use]
    pub fn is_reference(&self) -> bool {
        matches!(self, Value::VariableRef(_) | Value::IndexRef { .. })
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Value::ConstBool(b) => write!(f, "{b}"),
            Value::ConstInt(i) => write!(f, "{i}"),
            Value::ConstReal(r) => write!(f, "{r}"),
            Value::ConstComplex(c) => write!(f, "{c}"),
            Value::ConstString(s) => write!(f, "{s:?}"),
            Value::ConstAxis(a) => write!(f, "[{}, {}, {}]", a[0], a[1], a[2]),
            Value::ConstBoolArray(v) => write!(f, "{v:?}"),
            Value::ConstIntArray(v) => write!(f, "{v:?}"),
            Value::ConstRealArray(v) => write!(f, "{v:?}"),
            Value::ConstRealMatrix(v) => write!(f, "{v:?}"),
            Value::ConstComplexMatrix(v) => write!(f, "{v:?}"),
            Value::VariableRef(v) => write!(f, "{}", v.name),
            Value::IndexRef { variable, indices } => write!(f, "{}{indices:?}", variable.name),
            Value::FunctionCall { name, args, .. } => {
                write!(f, "{name}(")?;
                for (i, a) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{a}")?;
                }
                write!(f, ")")
            }
        }
    }
}

/// The type of a value. Total and deterministic.
#[must_use]
pub fn type_of(value: &Value) -> Ty {
    match value {
        Value::ConstBool(_) => Ty::scalar(ScalarType::Bool),
        Value::ConstInt(_) => Ty::scalar(ScalarType::Int),
        Value::ConstReal(_) => Ty::scalar(ScalarType::Float),
        Value::ConstComplex(_) => Ty::scalar(ScalarType::Complex),
        Value::ConstString(_) => Ty::scalar(ScalarType::String),
        Value::ConstAxis(_) => Ty::scalar(ScalarType::Axis),
        Value::ConstBoolArray(v) => Ty::array(ScalarType::Bool, v.len() as u64),
        Value::ConstIntArray(v) => Ty::array(ScalarType::Int, v.len() as u64),
        Value::ConstRealArray(v) => Ty::array(ScalarType::Float, v.len() as u64),
        Value::ConstRealMatrix(v) => Ty::array(ScalarType::Float, v.len() as u64),
        Value::ConstComplexMatrix(v) => Ty::array(ScalarType::Complex, v.len() as u64),
        Value::VariableRef(var) => var.ty.assignable(),
        Value::IndexRef { variable, indices } => {
            let elem = variable
                .ty
                .element_type()
                .expect("IndexRef variable must be an array type");
            if indices.len() == 1 {
                Ty::scalar(elem).assignable()
            } else {
                Ty::array(elem, indices.len() as u64).assignable()
            }
        }
        Value::FunctionCall { result_type, .. } => *result_type,
    }
}

/// 1 for scalars, `n` for any array- or index-reference of size `n`.
#[must_use]
pub fn range_of(value: &Value) -> u64 {
    match value {
        Value::ConstBoolArray(v) => v.len() as u64,
        Value::ConstIntArray(v) => v.len() as u64,
        Value::ConstRealArray(v) => v.len() as u64,
        Value::ConstRealMatrix(v) => v.len() as u64,
        Value::ConstComplexMatrix(v) => v.len() as u64,
        Value::VariableRef(var) => var.ty.size_of().unwrap_or(1),
        Value::IndexRef { indices, .. } => indices.len() as u64,
        _ => 1,
    }
}

fn promote_const_numeric(value: &Value, target: ScalarType) -> Option<Value> {
    match (value, target) {
        (Value::ConstBool(b), ScalarType::Bool) => Some(Value::ConstBool(*b)),
        (Value::ConstBool(b), ScalarType::Int) => Some(Value::ConstInt(i64::from(*b))),
        (Value::ConstBool(b), ScalarType::Float) => Some(Value::ConstReal(if *b { 1.0 } else { 0.0 })),
        (Value::ConstBool(b), ScalarType::Complex) => {
            Some(Value::ConstComplex(Complex64::new(if *b { 1.0 } else { 0.0 }, 0.0)))
        }
        (Value::ConstInt(i), ScalarType::Int) => Some(Value::ConstInt(*i)),
        (Value::ConstInt(i), ScalarType::Float) => Some(Value::ConstReal(*i as f64)),
        (Value::ConstInt(i), ScalarType::Complex) => {
            Some(Value::ConstComplex(Complex64::new(*i as f64, 0.0)))
        }
        (Value::ConstReal(r), ScalarType::Float) => Some(Value::ConstReal(*r)),
        (Value::ConstReal(r), ScalarType::Complex) => Some(Value::ConstComplex(Complex64::new(*r, 0.0))),
        (Value::ConstComplex(c), ScalarType::Complex) => Some(Value::ConstComplex(*c)),
        (Value::ConstString(s), ScalarType::String) => Some(Value::ConstString(s.clone())),
        (Value::ConstAxis(a), ScalarType::Axis) => Some(Value::ConstAxis(*a)),
        _ => None,
    }
}

fn replicate(element: Value, n: u64) -> Option<Value> {
    let n = n as usize;
    match element {
        Value::ConstBool(b) => Some(Value::ConstBoolArray(vec![b; n])),
        Value::ConstInt(i) => Some(Value::ConstIntArray(vec![i; n])),
        Value::ConstReal(r) => Some(Value::ConstRealArray(vec![r; n])),
        Value::ConstComplex(c) => Some(Value::ConstComplexMatrix(vec![vec![c]; n])),
        _ => None,
    }
}

/// Attempts to promote `value` to `target`. Returns the promoted value,
/// or `None` if impossible. For constants of numeric types this
/// performs the numeric cast; for non-constant references it returns
/// the original value if types match exactly; for array targets with a
/// scalar constant source it replicates; otherwise `None`.
#[must_use]
pub fn promote(value: &Value, target: &Ty) -> Option<Value> {
    if value.is_constant() {
        match target.kind {
            TypeKind::Scalar(s) => promote_const_numeric(value, s),
            TypeKind::Array(s, n) => {
                if type_of(value).equal(target) {
                    return Some(value.clone());
                }
                let elem = promote_const_numeric(value, s)?;
                replicate(elem, n)
            }
        }
    } else if type_of(value).equal(target) {
        Some(value.clone())
    } else {
        None
    }
}

/// `true` iff [`promote`] would succeed, without constructing a value.
#[must_use]
pub fn check_promote(src: &Ty, dst: &Ty) -> bool {
    promote_type(src, dst)
}

/// Folds `predicate` over a constant array (or [`Value::ConstAxis`])
/// value, returning `true` iff it holds for every element. Used to
/// enforce e.g. "axis must not be all zero".
#[must_use]
pub fn check_all_of_array_values(value: &Value, predicate: impl Fn(f64) -> bool) -> bool {
    match value {
        Value::ConstAxis(a) => a.iter().all(|v| predicate(*v)),
        Value::ConstRealArray(v) => v.iter().all(|v| predicate(*v)),
        Value::ConstIntArray(v) => v.iter().all(|v| predicate(*v as f64)),
        Value::ConstBoolArray(v) => v.iter().all(|v| predicate(if *v { 1.0 } else { 0.0 })),
        _ => false,
    }
}
