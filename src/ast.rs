// Licensed under the Apache License, Version 2.0.

//! The syntax tree produced by the parser. Plain Rust enums annotated
//! with [`Located`] rather than an open-ended annotation map, per the
//! Design Notes on annotations.

use crate::location::Located;
use crate::types::ScalarType;

/// A parsed program: the declared version and its flat statement list.
#[derive(Clone, Debug)]
pub struct Program {
    pub version: (u32, u32),
    pub statements: Vec<Statement>,
}

pub type Statement = Located<StatementKind>;

#[derive(Clone, Debug)]
pub enum StatementKind {
    Declaration {
        type_name: TypeName,
        name: String,
        initializer: Option<Expr>,
    },
    Assignment {
        lhs: Expr,
        rhs: Expr,
    },
    GateInstruction {
        modifiers: Vec<ModifierSyntax>,
        name: String,
        args: Vec<Expr>,
    },
    NonGateInstruction {
        name: String,
        args: Vec<Expr>,
    },
}

/// The declared type of a variable: a bare scalar, or an array of `size`
/// elements (`size` is itself an expression so a bad literal such as
/// `0` or a non-integer can be diagnosed at the declaration site).
#[derive(Clone, Debug)]
pub enum TypeName {
    Scalar(ScalarType),
    Array(ScalarType, Expr),
}

#[derive(Clone, Debug)]
pub enum ModifierSyntax {
    Inv,
    Pow(Expr),
    Ctrl,
}

pub type Expr = Located<ExprKind>;

#[derive(Clone, Debug)]
pub enum ExprKind {
    BoolLit(bool),
    IntLit(i64),
    FloatLit(f64),
    StringLit(String),
    Identifier(String),
    Index(Box<Expr>, Vec<IndexEntry>),
    Call(String, Vec<Expr>),
    Unary(UnaryOp, Box<Expr>),
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
    Ternary(Box<Expr>, Box<Expr>, Box<Expr>),
    ArrayLiteral(Vec<Expr>),
    MatrixLiteral(Vec<Vec<Expr>>),
}

#[derive(Clone, Debug)]
pub enum IndexEntry {
    Single(Expr),
    Range(Expr, Expr),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum UnaryOp {
    Neg,
    Not,
}

impl UnaryOp {
    /// The operator-function name the analyser resolves this node
    /// through.
    #[must_use]
    pub fn function_name(self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Not => "!",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
}

impl BinaryOp {
    #[must_use]
    pub fn function_name(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        }
    }
}
