// Licensed under the Apache License, Version 2.0.

//! The type lattice: scalar and array types, equality, promotion,
//! element/size projections.


use std::fmt::{self, Display, Formatter};

/// A scalar type. `Axis` is a fixed-length (3) axis of floats but is
/// itself scalar: it is not in the numeric promotion chain and has no
/// array form.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ScalarType {
    Qubit,
    Bit,
    Bool,
    Int,
    Float,
    Complex,
    String,
    Axis,
}

impl Display for ScalarType {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let name = match self {
            ScalarType::Qubit => "qubit",
            ScalarType::Bit => "bit",
            ScalarType::Bool => "bool",
            ScalarType::Int => "int",
            ScalarType::Float => "float",
            ScalarType::Complex => "complex",
            ScalarType::String => "string",
            ScalarType::Axis => "axis",
        };
        f.write_str(name)
    }
}

/// The shape of a type: scalar, or a fixed-size array of a scalar.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum TypeKind {
    Scalar(ScalarType),
    Array(ScalarType, u64),
}

impl Display for TypeKind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            TypeKind::Scalar(s) => write!(f, "{s}"),
            TypeKind::Array(s, n) => write!(f, "{s}[{n}]"),
        }
    }
}

/// A type, with an "assignable" flag marking lvalues. Equality
/// (both `Eq`/`PartialEq` and [`Ty::equal`]) ignores the flag; it is
/// true for lvalues produced by declared variables and their index
/// expressions, false for literals and function results.
#[derive(Clone, Copy, Debug)]
pub struct Ty {
    pub kind: TypeKind,
    pub assignable: bool,
}

impl Ty {
    #[must_use]
    pub fn scalar(s: ScalarType) -> Self {
        Self {
            kind: TypeKind::Scalar(s),
            assignable: false,
        }
    }

    #[must_use]
    pub fn array(s: ScalarType, size: u64) -> Self {
        Self {
            kind: TypeKind::Array(s, size),
            assignable: false,
        }
    }

    #[must_use]
    pub fn assignable(mut self) -> Self {
        self.assignable = true;
        self
    }

    /// Structural equality, ignoring the assignable flag.
    #[must_use]
    pub fn equal(&self, other: &Ty) -> bool {
        self.kind == other.kind
    }

    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self.kind, TypeKind::Array(..))
    }

    #[must_use]
    pub fn element_type(&self) -> Option<ScalarType> {
        match self.kind {
            TypeKind::Array(s, _) => Some(s),
            TypeKind::Scalar(_) => None,
        }
    }

    #[must_use]
    pub fn size_of(&self) -> Option<u64> {
        match self.kind {
            TypeKind::Array(_, n) => Some(n),
            TypeKind::Scalar(_) => None,
        }
    }

    #[must_use]
    pub fn scalar_type(&self) -> ScalarType {
        match self.kind {
            TypeKind::Scalar(s) | TypeKind::Array(s, _) => s,
        }
    }
}

impl PartialEq for Ty {
    fn eq(&self, other: &Self) -> bool {
        self.equal(other)
    }
}
impl Eq for Ty {}

impl Display for Ty {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

/// Returns the numeric promotion rank of a scalar type, or `None` if it
/// is outside the `Bool ⊑ Int ⊑ Float ⊑ Complex` chain.
pub(crate) fn numeric_rank(s: ScalarType) -> Option<u8> {
    match s {
        ScalarType::Bool => Some(0),
        ScalarType::Int => Some(1),
        ScalarType::Float => Some(2),
        ScalarType::Complex => Some(3),
        _ => None,
    }
}

/// `true` iff `src` can be promoted to `dst`: identity, the numeric
/// chain, and scalar-to-array replication at call sites that
/// explicitly request it (array targets
/// with a scalar source type). Array-to-array promotion requires equal
/// element types and equal sizes.
#[must_use]
pub fn promote_type(src: &Ty, dst: &Ty) -> bool {
    match (src.kind, dst.kind) {
        (TypeKind::Scalar(a), TypeKind::Scalar(b)) => {
            a == b
                || matches!((numeric_rank(a), numeric_rank(b)), (Some(ra), Some(rb)) if ra <= rb)
        }
        (TypeKind::Scalar(a), TypeKind::Array(b, _)) => {
            a == b
                || matches!((numeric_rank(a), numeric_rank(b)), (Some(ra), Some(rb)) if ra <= rb)
        }
        (TypeKind::Array(a, na), TypeKind::Array(b, nb)) => a == b && na == nb,
        (TypeKind::Array(..), TypeKind::Scalar(_)) => false,
    }
}

/// The scalar element type of an array type. Panics if `ty` is scalar;
/// callers should check [`Ty::is_array`] first.
#[must_use]
pub fn element_type(ty: &Ty) -> ScalarType {
    ty.element_type()
        .expect("element_type called on a scalar type")
}

/// The declared positive size of an array type. Panics if `ty` is
/// scalar; callers should check [`Ty::is_array`] first.
#[must_use]
pub fn size_of(ty: &Ty) -> u64 {
    ty.size_of().expect("size_of called on a scalar type")
}
