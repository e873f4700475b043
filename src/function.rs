// Licensed under the Apache License, Version 2.0.

//! The function registry: named, possibly-overloaded, constant-folding
//! (or symbolic) functions.

#[cfg(test)]
mod tests;

use crate::diagnostic::{Diagnostic, ErrorKind};
use crate::paramcode::{describe_operand_types, match_signature};
use crate::types::{ScalarType, Ty};
use crate::value::Value;
use num_complex::Complex64;
use rustc_hash::FxHashMap;
use std::rc::Rc;

/// A pure callback implementing one function overload. Receives the
/// arguments already promoted to the overload's parameter types.
pub type Implementation = Rc<dyn Fn(&[Value]) -> Value>;

#[derive(Clone)]
struct FunctionSignature {
    param_types: String,
    implementation: Implementation,
}

/// A multimap of function name to registered overloads.
#[derive(Clone, Default)]
pub struct FunctionRegistry {
    entries: FxHashMap<String, Vec<FunctionSignature>>,
}

impl FunctionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(
        &mut self,
        name: impl Into<String>,
        param_types: &str,
        implementation: impl Fn(&[Value]) -> Value + 'static,
    ) {
        self.entries.entry(name.into()).or_default().push(FunctionSignature {
            param_types: param_types.to_string(),
            implementation: Rc::new(implementation),
        });
    }

    /// Resolves `name` against `args`, mirroring the instruction
    /// registry's overload-resolution algorithm, then invokes the
    /// chosen overload's implementation. The implementation
    /// itself decides whether the result is a folded constant or a
    /// symbolic [`Value::FunctionCall`].
    pub fn resolve(&self, name: &str, args: &[Value]) -> Result<Value, Diagnostic> {
        let Some(overloads) = self.entries.get(name) else {
            return Err(Diagnostic::new(ErrorKind::UndefinedFunction(name.to_string())));
        };

        let mut viable: Vec<(&FunctionSignature, Vec<Value>, u32)> = overloads
            .iter()
            .filter_map(|sig| {
                let (promoted, cost) = match_signature(Some(&sig.param_types), args)?;
                Some((sig, promoted, cost))
            })
            .collect();

        if viable.is_empty() {
            return Err(Diagnostic::new(ErrorKind::NoMatchingFunctionOverload {
                name: name.to_string(),
                argument_types: describe_operand_types(args),
            }));
        }

        viable.sort_by_key(|(_, _, cost)| *cost);
        if viable.len() > 1 && viable[0].2 == viable[1].2 {
            return Err(Diagnostic::new(ErrorKind::NoMatchingFunctionOverload {
                name: name.to_string(),
                argument_types: describe_operand_types(args),
            }));
        }

        let (signature, promoted_args, _) = viable.into_iter().next().expect("checked non-empty above");
        Ok((signature.implementation)(&promoted_args))
    }
}

/// Folds `args` through `compute` if every one of them is constant;
/// otherwise returns a symbolic [`Value::FunctionCall`] carrying the
/// (already-promoted) arguments.
fn fold_or_symbolic(
    name: &str,
    args: &[Value],
    result_type: Ty,
    compute: impl FnOnce(&[Value]) -> Value,
) -> Value {
    if args.iter().all(Value::is_constant) {
        compute(args)
    } else {
        Value::FunctionCall {
            name: name.to_string(),
            args: args.to_vec(),
            result_type,
        }
    }
}

fn int2(args: &[Value]) -> (i64, i64) {
    let (Value::ConstInt(a), Value::ConstInt(b)) = (&args[0], &args[1]) else {
        unreachable!("overload resolution guarantees matching operand types")
    };
    (*a, *b)
}

fn float2(args: &[Value]) -> (f64, f64) {
    let (Value::ConstReal(a), Value::ConstReal(b)) = (&args[0], &args[1]) else {
        unreachable!("overload resolution guarantees matching operand types")
    };
    (*a, *b)
}

fn complex2(args: &[Value]) -> (Complex64, Complex64) {
    let (Value::ConstComplex(a), Value::ConstComplex(b)) = (&args[0], &args[1]) else {
        unreachable!("overload resolution guarantees matching operand types")
    };
    (*a, *b)
}

fn add_arithmetic(reg: &mut FunctionRegistry) {
    reg.add("+", "ii", |a| {
        fold_or_symbolic("+", a, Ty::scalar(ScalarType::Int), |a| {
            let (x, y) = int2(a);
            Value::ConstInt(x + y)
        })
    });
    reg.add("+", "ff", |a| {
        fold_or_symbolic("+", a, Ty::scalar(ScalarType::Float), |a| {
            let (x, y) = float2(a);
            Value::ConstReal(x + y)
        })
    });
    reg.add("+", "cc", |a| {
        fold_or_symbolic("+", a, Ty::scalar(ScalarType::Complex), |a| {
            let (x, y) = complex2(a);
            Value::ConstComplex(x + y)
        })
    });
    reg.add("+", "ss", |a| {
        fold_or_symbolic("+", a, Ty::scalar(ScalarType::String), |a| {
            let (Value::ConstString(x), Value::ConstString(y)) = (&a[0], &a[1]) else {
                unreachable!("overload resolution guarantees matching operand types")
            };
            Value::ConstString(format!("{x}{y}"))
        })
    });

    reg.add("-", "ii", |a| {
        fold_or_symbolic("-", a, Ty::scalar(ScalarType::Int), |a| {
            let (x, y) = int2(a);
            Value::ConstInt(x - y)
        })
    });
    reg.add("-", "ff", |a| {
        fold_or_symbolic("-", a, Ty::scalar(ScalarType::Float), |a| {
            let (x, y) = float2(a);
            Value::ConstReal(x - y)
        })
    });
    reg.add("-", "cc", |a| {
        fold_or_symbolic("-", a, Ty::scalar(ScalarType::Complex), |a| {
            let (x, y) = complex2(a);
            Value::ConstComplex(x - y)
        })
    });

    reg.add("*", "ii", |a| {
        fold_or_symbolic("*", a, Ty::scalar(ScalarType::Int), |a| {
            let (x, y) = int2(a);
            Value::ConstInt(x * y)
        })
    });
    reg.add("*", "ff", |a| {
        fold_or_symbolic("*", a, Ty::scalar(ScalarType::Float), |a| {
            let (x, y) = float2(a);
            Value::ConstReal(x * y)
        })
    });
    reg.add("*", "cc", |a| {
        fold_or_symbolic("*", a, Ty::scalar(ScalarType::Complex), |a| {
            let (x, y) = complex2(a);
            Value::ConstComplex(x * y)
        })
    });

    reg.add("/", "ii", |a| {
        fold_or_symbolic("/", a, Ty::scalar(ScalarType::Int), |a| {
            let (x, y) = int2(a);
            Value::ConstInt(x.checked_div(y).unwrap_or(0))
        })
    });
    reg.add("/", "ff", |a| {
        fold_or_symbolic("/", a, Ty::scalar(ScalarType::Float), |a| {
            let (x, y) = float2(a);
            Value::ConstReal(x / y)
        })
    });
    reg.add("/", "cc", |a| {
        fold_or_symbolic("/", a, Ty::scalar(ScalarType::Complex), |a| {
            let (x, y) = complex2(a);
            Value::ConstComplex(x / y)
        })
    });

    reg.add("-", "i", |a| {
        fold_or_symbolic("-", a, Ty::scalar(ScalarType::Int), |a| {
            let Value::ConstInt(x) = &a[0] else { unreachable!() };
            Value::ConstInt(-*x)
        })
    });
    reg.add("-", "f", |a| {
        fold_or_symbolic("-", a, Ty::scalar(ScalarType::Float), |a| {
            let Value::ConstReal(x) = &a[0] else { unreachable!() };
            Value::ConstReal(-*x)
        })
    });
    reg.add("-", "c", |a| {
        fold_or_symbolic("-", a, Ty::scalar(ScalarType::Complex), |a| {
            let Value::ConstComplex(x) = &a[0] else { unreachable!() };
            Value::ConstComplex(-*x)
        })
    });
}

fn add_comparisons(reg: &mut FunctionRegistry) {
    for (name, int_op, float_op): (&str, fn(i64, i64) -> bool, fn(f64, f64) -> bool) in [
        ("==", (|a, b| a == b) as fn(i64, i64) -> bool, (|a, b| a == b) as fn(f64, f64) -> bool),
        ("!=", |a, b| a != b, |a, b| a != b),
        ("<", |a, b| a < b, |a, b| a < b),
        ("<=", |a, b| a <= b, |a, b| a <= b),
        (">", |a, b| a > b, |a, b| a > b),
        (">=", |a, b| a >= b, |a, b| a >= b),
    ] {
        reg.add(name, "ii", move |a| {
            fold_or_symbolic(name, a, Ty::scalar(ScalarType::Bool), move |a| {
                let (x, y) = int2(a);
                Value::ConstBool(int_op(x, y))
            })
        });
        reg.add(name, "ff", move |a| {
            fold_or_symbolic(name, a, Ty::scalar(ScalarType::Bool), move |a| {
                let (x, y) = float2(a);
                Value::ConstBool(float_op(x, y))
            })
        });
    }

    // Complex has no ordering, so only equality/inequality are defined.
    for (name, complex_op): (&str, fn(Complex64, Complex64) -> bool) in [
        ("==", (|a, b| a == b) as fn(Complex64, Complex64) -> bool),
        ("!=", |a, b| a != b),
    ] {
        reg.add(name, "cc", move |a| {
            fold_or_symbolic(name, a, Ty::scalar(ScalarType::Bool), move |a| {
                let (x, y) = complex2(a);
                Value::ConstBool(complex_op(x, y))
            })
        });
    }
}

fn add_transcendental(reg: &mut FunctionRegistry) {
    reg.add("pow", "ff", |a| {
        fold_or_symbolic("pow", a, Ty::scalar(ScalarType::Float), |a| {
            let (x, y) = float2(a);
            Value::ConstReal(x.powf(y))
        })
    });
    reg.add("pow", "cc", |a| {
        fold_or_symbolic("pow", a, Ty::scalar(ScalarType::Complex), |a| {
            let (x, y) = complex2(a);
            Value::ConstComplex(x.powc(y))
        })
    });

    let float_unary: &[(&str, fn(f64) -> f64)] = &[
        ("sin", f64::sin),
        ("cos", f64::cos),
        ("tan", f64::tan),
        ("asin", f64::asin),
        ("acos", f64::acos),
        ("atan", f64::atan),
        ("sinh", f64::sinh),
        ("cosh", f64::cosh),
        ("tanh", f64::tanh),
        ("asinh", f64::asinh),
        ("acosh", f64::acosh),
        ("atanh", f64::atanh),
        ("sqrt", f64::sqrt),
        ("exp", f64::exp),
        ("log", f64::ln),
    ];
    for (name, f) in float_unary.iter().copied() {
        reg.add(name, "f", move |a| {
            fold_or_symbolic(name, a, Ty::scalar(ScalarType::Float), move |a| {
                let Value::ConstReal(x) = &a[0] else { unreachable!() };
                Value::ConstReal(f(*x))
            })
        });
    }

    let complex_unary: &[(&str, fn(Complex64) -> Complex64)] = &[
        ("sin", Complex64::sin),
        ("cos", Complex64::cos),
        ("tan", Complex64::tan),
        ("asin", Complex64::asin),
        ("acos", Complex64::acos),
        ("atan", Complex64::atan),
        ("sinh", Complex64::sinh),
        ("cosh", Complex64::cosh),
        ("tanh", Complex64::tanh),
        ("asinh", Complex64::asinh),
        ("acosh", Complex64::acosh),
        ("atanh", Complex64::atanh),
        ("sqrt", Complex64::sqrt),
        ("exp", Complex64::exp),
        ("log", Complex64::ln),
    ];
    for (name, f) in complex_unary.iter().copied() {
        reg.add(name, "c", move |a| {
            fold_or_symbolic(name, a, Ty::scalar(ScalarType::Complex), move |a| {
                let Value::ConstComplex(x) = &a[0] else { unreachable!() };
                Value::ConstComplex(f(*x))
            })
        });
    }

    reg.add("abs", "i", |a| {
        fold_or_symbolic("abs", a, Ty::scalar(ScalarType::Int), |a| {
            let Value::ConstInt(x) = &a[0] else { unreachable!() };
            Value::ConstInt(x.abs())
        })
    });
    reg.add("abs", "f", |a| {
        fold_or_symbolic("abs", a, Ty::scalar(ScalarType::Float), |a| {
            let Value::ConstReal(x) = &a[0] else { unreachable!() };
            Value::ConstReal(x.abs())
        })
    });
}

fn add_logical(reg: &mut FunctionRegistry) {
    reg.add("!", "b", |a| {
        fold_or_symbolic("!", a, Ty::scalar(ScalarType::Bool), |a| {
            let Value::ConstBool(x) = &a[0] else { unreachable!() };
            Value::ConstBool(!*x)
        })
    });
    reg.add("&&", "bb", |a| {
        fold_or_symbolic("&&", a, Ty::scalar(ScalarType::Bool), |a| {
            let (Value::ConstBool(x), Value::ConstBool(y)) = (&a[0], &a[1]) else {
                unreachable!("overload resolution guarantees matching operand types")
            };
            Value::ConstBool(*x && *y)
        })
    });
    reg.add("||", "bb", |a| {
        fold_or_symbolic("||", a, Ty::scalar(ScalarType::Bool), |a| {
            let (Value::ConstBool(x), Value::ConstBool(y)) = (&a[0], &a[1]) else {
                unreachable!("overload resolution guarantees matching operand types")
            };
            Value::ConstBool(*x || *y)
        })
    });
    reg.add("==", "bb", |a| {
        fold_or_symbolic("==", a, Ty::scalar(ScalarType::Bool), |a| {
            let (Value::ConstBool(x), Value::ConstBool(y)) = (&a[0], &a[1]) else {
                unreachable!("overload resolution guarantees matching operand types")
            };
            Value::ConstBool(x == y)
        })
    });
    reg.add("!=", "bb", |a| {
        fold_or_symbolic("!=", a, Ty::scalar(ScalarType::Bool), |a| {
            let (Value::ConstBool(x), Value::ConstBool(y)) = (&a[0], &a[1]) else {
                unreachable!("overload resolution guarantees matching operand types")
            };
            Value::ConstBool(x != y)
        })
    });
}

/// The ternary `cond ? a : b` is rewritten by the analyser to a call of
/// this function, one overload per branch type it supports.
fn add_ternary(reg: &mut FunctionRegistry) {
    for (code, ty) in [
        ("bii", ScalarType::Int),
        ("bff", ScalarType::Float),
        ("bcc", ScalarType::Complex),
        ("bss", ScalarType::String),
        ("bbb", ScalarType::Bool),
    ] {
        reg.add("?:", code, move |a| {
            fold_or_symbolic("?:", a, Ty::scalar(ty), |a| {
                let Value::ConstBool(cond) = &a[0] else {
                    unreachable!("overload resolution guarantees a Bool condition")
                };
                if *cond { a[1].clone() } else { a[2].clone() }
            })
        });
    }
}

fn add_complex_constructors(reg: &mut FunctionRegistry) {
    reg.add("complex", "ff", |a| {
        fold_or_symbolic("complex", a, Ty::scalar(ScalarType::Complex), |a| {
            let (re, im) = float2(a);
            Value::ConstComplex(Complex64::new(re, im))
        })
    });
    reg.add("polar", "ff", |a| {
        fold_or_symbolic("polar", a, Ty::scalar(ScalarType::Complex), |a| {
            let (r, theta) = float2(a);
            Value::ConstComplex(Complex64::from_polar(r, theta))
        })
    });
    reg.add("real", "c", |a| {
        fold_or_symbolic("real", a, Ty::scalar(ScalarType::Float), |a| {
            let Value::ConstComplex(x) = &a[0] else { unreachable!() };
            Value::ConstReal(x.re)
        })
    });
    reg.add("imag", "c", |a| {
        fold_or_symbolic("imag", a, Ty::scalar(ScalarType::Float), |a| {
            let Value::ConstComplex(x) = &a[0] else { unreachable!() };
            Value::ConstReal(x.im)
        })
    });
    reg.add("arg", "c", |a| {
        fold_or_symbolic("arg", a, Ty::scalar(ScalarType::Float), |a| {
            let Value::ConstComplex(x) = &a[0] else { unreachable!() };
            Value::ConstReal(x.arg())
        })
    });
    reg.add("norm", "c", |a| {
        fold_or_symbolic("norm", a, Ty::scalar(ScalarType::Float), |a| {
            let Value::ConstComplex(x) = &a[0] else { unreachable!() };
            Value::ConstReal(x.norm())
        })
    });
    reg.add("conj", "c", |a| {
        fold_or_symbolic("conj", a, Ty::scalar(ScalarType::Complex), |a| {
            let Value::ConstComplex(x) = &a[0] else { unreachable!() };
            Value::ConstComplex(x.conj())
        })
    });
}

/// Builds the default function table: arithmetic, comparisons, power,
/// trigonometric/hyperbolic families on `Float`/`Complex`, and the
/// complex-number helpers.
#[must_use]
pub fn default_registry() -> FunctionRegistry {
    let mut reg = FunctionRegistry::new();
    add_arithmetic(&mut reg);
    add_comparisons(&mut reg);
    add_transcendental(&mut reg);
    add_logical(&mut reg);
    add_ternary(&mut reg);
    add_complex_constructors(&mut reg);
    reg
}

/// The predefined constants populated into the global scope at analyser
/// construction time: `pi`, `eu`, `tau`, `im`.
#[must_use]
pub fn default_constants() -> Vec<(&'static str, Value)> {
    vec![
        ("pi", Value::ConstReal(std::f64::consts::PI)),
        ("eu", Value::ConstReal(std::f64::consts::E)),
        ("tau", Value::ConstReal(std::f64::consts::TAU)),
        ("im", Value::ConstComplex(Complex64::new(0.0, 1.0))),
    ]
}
