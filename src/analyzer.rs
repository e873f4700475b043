// Licensed under the Apache License, Version 2.0.

//! The semantic analyser: walks a parsed program and produces a
//! resolved semantic tree, accumulating one diagnostic per independent
//! failure rather than aborting on the first.


use crate::ast::{self, ExprKind, IndexEntry, ModifierSyntax, StatementKind, TypeName};
use crate::diagnostic::{Diagnostic, ErrorKind};
use crate::function::{self, FunctionRegistry};
use crate::instruction::{self, InstructionRegistry};
use crate::location::SourceLocation;
use crate::modifier::{self, CompositeGate};
use crate::scope::ScopeStack;
use crate::semantic;
use crate::types::{ScalarType, Ty};
use crate::value::{self, Value, Variable};
use std::rc::Rc;

/// The outcome of analysing a parsed program: the resolved tree, unless
/// analysis aborted early, plus every diagnostic collected along the way.
pub struct AnalysisResult {
    pub root: Option<semantic::Program>,
    pub errors: Vec<Diagnostic>,
}

/// Walks an [`ast::Program`], resolving names, checking types and
/// folding constants. Built fresh per program: the default instruction,
/// function and constant tables are cloned into each instance rather
/// than shared, so concurrent analyses never contend on mutable state.
pub struct Analyzer {
    api_version: (u32, u32),
    instructions: InstructionRegistry,
    functions: FunctionRegistry,
    scope: ScopeStack<semantic::Statement>,
    variables: Vec<Rc<Variable>>,
    errors: Vec<Diagnostic>,
}

impl Analyzer {
    /// Builds an analyser with the default instruction/function tables
    /// and predefined constants (`pi`, `eu`, `tau`, `im`) already in scope.
    #[must_use]
    pub fn new(api_version: (u32, u32)) -> Self {
        let mut scope = ScopeStack::new();
        for (name, value) in function::default_constants() {
            scope
                .add_mapping(name, value)
                .expect("the default constant names are pairwise distinct");
        }
        Self {
            api_version,
            instructions: instruction::default_registry(),
            functions: function::default_registry(),
            scope,
            variables: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Analyses `program`, consuming `self`.
    #[must_use]
    pub fn analyze(mut self, program: &ast::Program) -> AnalysisResult {
        if program.version > self.api_version {
            self.errors.push(Diagnostic::new(ErrorKind::Version {
                found: format_version(program.version),
                supported: format_version(self.api_version),
            }));
            return AnalysisResult {
                root: None,
                errors: self.errors,
            };
        }

        for stmt in &program.statements {
            if let Err(mut err) = self.visit_statement(stmt) {
                err.context(stmt.location.as_ref());
                self.errors.push(err);
            }
        }

        let block = self.scope.into_outermost_block();
        let root = semantic::Program {
            version: program.version,
            variables: self.variables,
            statements: block.statements,
        };
        AnalysisResult {
            root: Some(root),
            errors: self.errors,
        }
    }

    fn visit_statement(&mut self, stmt: &ast::Statement) -> Result<(), Diagnostic> {
        let location = stmt.location.as_ref();
        match &stmt.value {
            StatementKind::Declaration {
                type_name,
                name,
                initializer,
            } => self.visit_declaration(type_name, name, initializer.as_ref(), location),
            StatementKind::Assignment { lhs, rhs } => self.visit_assignment(lhs, rhs, location),
            StatementKind::GateInstruction { modifiers, name, args } => {
                self.visit_gate_instruction(modifiers, name, args, location)
            }
            StatementKind::NonGateInstruction { name, args } => {
                self.visit_non_gate_instruction(name, args, location)
            }
        }
    }

    fn visit_declaration(
        &mut self,
        type_name: &TypeName,
        name: &str,
        initializer: Option<&ast::Expr>,
        location: Option<&SourceLocation>,
    ) -> Result<(), Diagnostic> {
        let ty = self.resolve_type_name(type_name)?;

        // Evaluated before the variable is declared, so `int i = i` is
        // rejected as an undefined name rather than resolving to itself.
        // The declaration itself still goes through afterwards even if
        // this fails: only the synthetic assignment is dropped.
        let initializer_result = initializer.map(|e| self.visit_expr(e));

        let var = Variable::new(name, ty.assignable(), location.cloned());
        self.scope.add_mapping(name, Value::VariableRef(var.clone()))?;
        self.variables.push(var.clone());
        self.scope.add_statement(
            semantic::Statement::new(semantic::StatementKind::Declaration(var.clone()), location.cloned()),
            location,
        );

        match initializer_result {
            None => Ok(()),
            Some(Ok(rhs)) => {
                let kind = self.emit_assignment(Value::VariableRef(var), rhs)?;
                self.scope
                    .add_statement(semantic::Statement::new(kind, location.cloned()), location);
                Ok(())
            }
            Some(Err(err)) => Err(err),
        }
    }

    fn resolve_type_name(&mut self, type_name: &TypeName) -> Result<Ty, Diagnostic> {
        match type_name {
            TypeName::Scalar(s) => Ok(Ty::scalar(*s)),
            TypeName::Array(s, size_expr) => {
                let size_value = self.visit_expr(size_expr)?;
                let size = match size_value {
                    Value::ConstInt(n) if n > 0 => n as u64,
                    _ => return Err(Diagnostic::new(ErrorKind::NonPositiveArraySize(s.to_string()))),
                };
                Ok(Ty::array(*s, size))
            }
        }
    }

    fn visit_assignment(
        &mut self,
        lhs_expr: &ast::Expr,
        rhs_expr: &ast::Expr,
        location: Option<&SourceLocation>,
    ) -> Result<(), Diagnostic> {
        let lhs = self.visit_expr(lhs_expr)?;
        let rhs = self.visit_expr(rhs_expr)?;
        let kind = self.emit_assignment(lhs, rhs)?;
        self.scope
            .add_statement(semantic::Statement::new(kind, location.cloned()), location);
        Ok(())
    }

    /// Shared by a plain assignment statement and a declaration's
    /// synthetic initializer assignment.
    fn emit_assignment(&mut self, lhs: Value, rhs: Value) -> Result<semantic::StatementKind, Diagnostic> {
        if !lhs.is_reference() {
            return Err(Diagnostic::new(ErrorKind::NotAssignable));
        }
        let lhs_ty = value::type_of(&lhs);

        let promoted_rhs = if lhs_ty.scalar_type() == ScalarType::Axis {
            let axis = axis_literal_to_const(&rhs).ok_or_else(|| {
                Diagnostic::new(ErrorKind::CannotPromote {
                    rhs_type: value::type_of(&rhs).to_string(),
                    lhs_type: lhs_ty.to_string(),
                })
            })?;
            if value::check_all_of_array_values(&axis, |v| v == 0.0) {
                return Err(Diagnostic::new(ErrorKind::AxisAllZero));
            }
            axis
        } else {
            let lhs_range = value::range_of(&lhs);
            let rhs_range = value::range_of(&rhs);
            if lhs_range != rhs_range {
                return Err(Diagnostic::new(ErrorKind::SizeMismatch {
                    lhs_size: lhs_range,
                    rhs_size: rhs_range,
                }));
            }
            value::promote(&rhs, &lhs_ty).ok_or_else(|| {
                Diagnostic::new(ErrorKind::CannotPromote {
                    rhs_type: value::type_of(&rhs).to_string(),
                    lhs_type: lhs_ty.to_string(),
                })
            })?
        };

        Ok(semantic::StatementKind::Assignment {
            lhs,
            rhs: promoted_rhs,
        })
    }

    fn visit_gate_instruction(
        &mut self,
        modifiers: &[ModifierSyntax],
        name: &str,
        args: &[ast::Expr],
        location: Option<&SourceLocation>,
    ) -> Result<(), Diagnostic> {
        let operands: Vec<Value> = args.iter().map(|a| self.visit_expr(a)).collect::<Result<_, _>>()?;

        let ctrl_count = modifiers.iter().filter(|m| matches!(m, ModifierSyntax::Ctrl)).count();
        if operands.len() < ctrl_count {
            return Err(Diagnostic::new(ErrorKind::Parse(format!(
                "not enough operands for {ctrl_count} `ctrl` modifier(s)"
            ))));
        }
        let (controls, gate_operands) = operands.split_at(ctrl_count);
        let mut controls = controls.to_vec();

        log::trace!("resolving gate instruction `{name}` against {} operand(s)", gate_operands.len());
        let resolved = self.instructions.resolve(name, gate_operands)?;
        let mut gate = CompositeGate::base(resolved.name, resolved.operands);

        // `modifiers` is syntactic, outermost first; applying it
        // reversed builds the composite gate innermost modifier first,
        // per the ordering the gate-modifier registry records.
        for m in modifiers.iter().rev() {
            gate = match m {
                ModifierSyntax::Inv => modifier::apply_inv(gate),
                ModifierSyntax::Pow(exp) => {
                    let raw = self.visit_expr(exp)?;
                    let exponent = value::promote(&raw, &Ty::scalar(ScalarType::Float)).ok_or_else(|| {
                        Diagnostic::new(ErrorKind::CannotPromote {
                            rhs_type: value::type_of(&raw).to_string(),
                            lhs_type: ScalarType::Float.to_string(),
                        })
                    })?;
                    modifier::apply_pow(gate, exponent)
                }
                ModifierSyntax::Ctrl => {
                    let control = controls.remove(0);
                    modifier::apply_ctrl(gate, control)?
                }
            };
        }

        self.scope.add_statement(
            semantic::Statement::new(semantic::StatementKind::GateInstruction(gate), location.cloned()),
            location,
        );
        Ok(())
    }

    fn visit_non_gate_instruction(
        &mut self,
        name: &str,
        args: &[ast::Expr],
        location: Option<&SourceLocation>,
    ) -> Result<(), Diagnostic> {
        let operands: Vec<Value> = args.iter().map(|a| self.visit_expr(a)).collect::<Result<_, _>>()?;
        log::trace!("resolving non-gate instruction `{name}` against {} operand(s)", operands.len());
        let resolved = self.instructions.resolve(name, &operands)?;
        self.scope.add_statement(
            semantic::Statement::new(semantic::StatementKind::NonGateInstruction(resolved), location.cloned()),
            location,
        );
        Ok(())
    }

    fn visit_expr(&mut self, expr: &ast::Expr) -> Result<Value, Diagnostic> {
        self.visit_expr_kind(&expr.value).map_err(|mut err| {
            err.context(expr.location.as_ref());
            err
        })
    }

    fn visit_expr_kind(&mut self, kind: &ExprKind) -> Result<Value, Diagnostic> {
        match kind {
            ExprKind::BoolLit(b) => Ok(Value::ConstBool(*b)),
            ExprKind::IntLit(i) => Ok(Value::ConstInt(*i)),
            ExprKind::FloatLit(f) => Ok(Value::ConstReal(*f)),
            ExprKind::StringLit(s) => Ok(Value::ConstString(s.clone())),
            ExprKind::Identifier(name) => self.scope.resolve(name),
            ExprKind::Index(base, entries) => self.visit_index(base, entries),
            ExprKind::Call(name, args) => {
                let values: Vec<Value> = args.iter().map(|a| self.visit_expr(a)).collect::<Result<_, _>>()?;
                self.functions.resolve(name, &values)
            }
            ExprKind::Unary(op, operand) => {
                let v = self.visit_expr(operand)?;
                self.functions.resolve(op.function_name(), &[v])
            }
            ExprKind::Binary(op, lhs, rhs) => {
                let l = self.visit_expr(lhs)?;
                let r = self.visit_expr(rhs)?;
                self.functions.resolve(op.function_name(), &[l, r])
            }
            ExprKind::Ternary(cond, then_branch, else_branch) => {
                let c = self.visit_expr(cond)?;
                let t = self.visit_expr(then_branch)?;
                let e = self.visit_expr(else_branch)?;
                self.functions.resolve("?:", &[c, t, e])
            }
            ExprKind::ArrayLiteral(elements) => self.visit_array_literal(elements),
            ExprKind::MatrixLiteral(rows) => self.visit_matrix_literal(rows),
        }
    }

    fn visit_index(&mut self, base: &ast::Expr, entries: &[IndexEntry]) -> Result<Value, Diagnostic> {
        let base_value = self.visit_expr(base)?;
        let base_ty = value::type_of(&base_value);
        if !base_ty.is_array() {
            return Err(Diagnostic::new(ErrorKind::NotIndexable(base_ty.to_string())));
        }
        let base_size = base_ty.size_of().expect("checked is_array above");
        let (variable, base_indices): (Rc<Variable>, Vec<i64>) = match base_value {
            Value::VariableRef(var) => (var, (0..base_size as i64).collect()),
            Value::IndexRef { variable, indices } => (variable, indices),
            other => return Err(Diagnostic::new(ErrorKind::NotIndexable(value::type_of(&other).to_string()))),
        };

        let mut selected = Vec::new();
        for entry in entries {
            match entry {
                IndexEntry::Single(e) => {
                    let idx = self.eval_const_int(e)?;
                    if idx < 0 || idx as u64 >= base_size {
                        return Err(Diagnostic::new(ErrorKind::IndexOutOfRange {
                            index: idx,
                            size: base_size,
                        }));
                    }
                    selected.push(base_indices[idx as usize]);
                }
                IndexEntry::Range(first, last) => {
                    let first = self.eval_const_int(first)?;
                    let last = self.eval_const_int(last)?;
                    if first < 0 || first as u64 >= base_size {
                        return Err(Diagnostic::new(ErrorKind::IndexOutOfRange {
                            index: first,
                            size: base_size,
                        }));
                    }
                    if last < 0 || last as u64 >= base_size {
                        return Err(Diagnostic::new(ErrorKind::IndexOutOfRange {
                            index: last,
                            size: base_size,
                        }));
                    }
                    if first > last {
                        return Err(Diagnostic::new(ErrorKind::ReversedIndexRange { first, last }));
                    }
                    selected.extend((first..=last).map(|i| base_indices[i as usize]));
                }
            }
        }
        Ok(Value::IndexRef {
            variable,
            indices: selected,
        })
    }

    fn eval_const_int(&mut self, expr: &ast::Expr) -> Result<i64, Diagnostic> {
        match self.visit_expr(expr)? {
            Value::ConstInt(i) => Ok(i),
            _ => Err(Diagnostic::new(ErrorKind::NotConstant)),
        }
    }

    fn visit_array_literal(&mut self, elements: &[ast::Expr]) -> Result<Value, Diagnostic> {
        if elements.is_empty() {
            return Err(Diagnostic::new(ErrorKind::EmptyInitializationList));
        }
        let mut rank = 0u8;
        let mut values = Vec::with_capacity(elements.len());
        for e in elements {
            let v = self.visit_expr(e)?;
            if !v.is_constant() {
                return Err(Diagnostic::new(ErrorKind::Parse(
                    "array literal elements must be constant".to_string(),
                )));
            }
            let scalar = value::type_of(&v).scalar_type();
            let elem_rank = match scalar {
                ScalarType::Bool => 0,
                ScalarType::Int => 1,
                ScalarType::Float => 2,
                other => return Err(Diagnostic::new(ErrorKind::BadInitializationListElement(other.to_string()))),
            };
            rank = rank.max(elem_rank);
            values.push(v);
        }
        let target = match rank {
            0 => ScalarType::Bool,
            1 => ScalarType::Int,
            _ => ScalarType::Float,
        };
        let target_ty = Ty::scalar(target);
        let mut promoted = Vec::with_capacity(values.len());
        for v in values {
            let src = value::type_of(&v);
            let p = value::promote(&v, &target_ty).ok_or_else(|| {
                Diagnostic::new(ErrorKind::IncompatibleInitializationListElements(
                    src.to_string(),
                    target_ty.to_string(),
                ))
            })?;
            promoted.push(p);
        }
        Ok(match target {
            ScalarType::Bool => Value::ConstBoolArray(
                promoted
                    .into_iter()
                    .map(|v| match v {
                        Value::ConstBool(b) => b,
                        _ => unreachable!("promoted to Bool above"),
                    })
                    .collect(),
            ),
            ScalarType::Int => Value::ConstIntArray(
                promoted
                    .into_iter()
                    .map(|v| match v {
                        Value::ConstInt(i) => i,
                        _ => unreachable!("promoted to Int above"),
                    })
                    .collect(),
            ),
            ScalarType::Float => Value::ConstRealArray(
                promoted
                    .into_iter()
                    .map(|v| match v {
                        Value::ConstReal(r) => r,
                        _ => unreachable!("promoted to Float above"),
                    })
                    .collect(),
            ),
            _ => unreachable!("target is always Bool, Int or Float"),
        })
    }

    fn visit_matrix_literal(&mut self, rows: &[Vec<ast::Expr>]) -> Result<Value, Diagnostic> {
        if rows.is_empty() || rows[0].is_empty() {
            return Err(Diagnostic::new(ErrorKind::EmptyInitializationList));
        }
        let width = rows[0].len();
        for row in rows {
            if row.len() != width {
                return Err(Diagnostic::new(ErrorKind::Parse(format!(
                    "matrix literal rows have differing lengths ({} vs {width})",
                    row.len()
                ))));
            }
        }

        let mut resolved_rows = Vec::with_capacity(rows.len());
        for row in rows {
            let mut values = Vec::with_capacity(row.len());
            for e in row {
                let v = self.visit_expr(e)?;
                if !v.is_constant() {
                    return Err(Diagnostic::new(ErrorKind::Parse(
                        "matrix literal elements must be constant".to_string(),
                    )));
                }
                values.push(v);
            }
            resolved_rows.push(values);
        }

        if let Some(real_rows) = try_promote_matrix(&resolved_rows, ScalarType::Float) {
            return Ok(Value::ConstRealMatrix(
                real_rows
                    .into_iter()
                    .map(|row| {
                        row.into_iter()
                            .map(|v| match v {
                                Value::ConstReal(r) => r,
                                _ => unreachable!("promoted to Float above"),
                            })
                            .collect()
                    })
                    .collect(),
            ));
        }
        if let Some(complex_rows) = try_promote_matrix(&resolved_rows, ScalarType::Complex) {
            return Ok(Value::ConstComplexMatrix(
                complex_rows
                    .into_iter()
                    .map(|row| {
                        row.into_iter()
                            .map(|v| match v {
                                Value::ConstComplex(c) => c,
                                _ => unreachable!("promoted to Complex above"),
                            })
                            .collect()
                    })
                    .collect(),
            ));
        }

        let offending = resolved_rows
            .iter()
            .flatten()
            .map(value::type_of)
            .find(|t| !matches!(t.scalar_type(), ScalarType::Float | ScalarType::Complex))
            .map(|t| t.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        Err(Diagnostic::new(ErrorKind::BadInitializationListElement(offending)))
    }
}

fn try_promote_matrix(rows: &[Vec<Value>], target: ScalarType) -> Option<Vec<Vec<Value>>> {
    let ty = Ty::scalar(target);
    rows.iter()
        .map(|row| row.iter().map(|v| value::promote(v, &ty)).collect::<Option<Vec<_>>>())
        .collect::<Option<Vec<_>>>()
}

/// An `Axis` variable's initializer is written as a 3-element `Int` or
/// `Float` array literal; converts it to the `ConstAxis` value the
/// assignment actually stores.
fn axis_literal_to_const(value: &Value) -> Option<Value> {
    match value {
        Value::ConstAxis(_) => Some(value.clone()),
        Value::ConstRealArray(v) if v.len() == 3 => Some(Value::ConstAxis([v[0], v[1], v[2]])),
        Value::ConstIntArray(v) if v.len() == 3 => Some(Value::ConstAxis([v[0] as f64, v[1] as f64, v[2] as f64])),
        _ => None,
    }
}

fn format_version((major, minor): (u32, u32)) -> String {
    format!("{major}.{minor}")
}
