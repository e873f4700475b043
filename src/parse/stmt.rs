use super::expr::expr;
use super::prim::{ident, type_name};
use super::scan::Scanner;
use crate::ast::{ModifierSyntax, Program, Statement, StatementKind};
use crate::lex::cooked::{Keyword, TokenKind};
use crate::location::Located;

/// `version M[.m]` header followed by zero or more statements, each
/// recovered independently on error.
pub(super) fn parse_program(scanner: &mut Scanner) -> Option<Program> {
    let version = parse_version_header(scanner)?;

    let mut statements = Vec::new();
    while !scanner.at_eof() {
        match parse_statement(scanner) {
            Some(stmt) => statements.push(stmt),
            None => scanner.recover_to_next_statement(),
        }
    }
    Some(Program { version, statements })
}

fn parse_version_header(scanner: &mut Scanner) -> Option<(u32, u32)> {
    scanner.expect(&TokenKind::Keyword(Keyword::Version), "a `version` header")?;
    let major_text = scanner.expect(&TokenKind::IntLit, "the major version number")?;
    let major: u32 = major_text.parse().ok()?;
    if scanner.peek() == &TokenKind::FloatLit {
        let text = scanner.text();
        let (_, minor_text) = text.split_once('.')?;
        let minor: u32 = minor_text.parse().ok()?;
        scanner.advance();
        Some((major, minor))
    } else {
        Some((major, 0))
    }
}

fn parse_statement(scanner: &mut Scanner) -> Option<Statement> {
    let location = scanner.span();
    let kind = match scanner.peek().clone() {
        TokenKind::Keyword(Keyword::Qubit)
        | TokenKind::Keyword(Keyword::Bit)
        | TokenKind::Keyword(Keyword::Bool)
        | TokenKind::Keyword(Keyword::Int)
        | TokenKind::Keyword(Keyword::Float)
        | TokenKind::Keyword(Keyword::Axis) => parse_declaration(scanner)?,
        TokenKind::Keyword(Keyword::Measure) => parse_measure(scanner)?,
        TokenKind::Keyword(Keyword::Reset) => parse_reset(scanner)?,
        TokenKind::Keyword(Keyword::Inv) | TokenKind::Keyword(Keyword::Pow) | TokenKind::Keyword(Keyword::Ctrl) => {
            parse_gate_instruction(scanner)?
        }
        TokenKind::Ident => parse_ident_led_statement(scanner)?,
        _ => {
            scanner.error(format!("expected a statement, found `{}`", scanner.text()));
            return None;
        }
    };

    optional_semi(scanner);
    Some(Located::new(kind, Some(location)))
}

fn optional_semi(scanner: &mut Scanner) {
    if scanner.peek() == &TokenKind::Semi {
        scanner.advance();
    }
}

fn parse_declaration(scanner: &mut Scanner) -> Option<StatementKind> {
    let ty = type_name(scanner)?;
    let name = ident(scanner)?;
    let initializer = if scanner.peek() == &TokenKind::Eq {
        scanner.advance();
        Some(expr(scanner)?)
    } else {
        None
    };
    Some(StatementKind::Declaration {
        type_name: ty,
        name,
        initializer,
    })
}

fn parse_measure(scanner: &mut Scanner) -> Option<StatementKind> {
    scanner.advance();
    let lhs = expr(scanner)?;
    scanner.expect(&TokenKind::Comma, "`,` between measure operands")?;
    let rhs = expr(scanner)?;
    Some(StatementKind::NonGateInstruction {
        name: "measure".to_string(),
        args: vec![lhs, rhs],
    })
}

fn parse_reset(scanner: &mut Scanner) -> Option<StatementKind> {
    scanner.advance();
    let args = if matches!(scanner.peek(), TokenKind::Semi) || scanner.at_eof() {
        Vec::new()
    } else {
        vec![expr(scanner)?]
    };
    Some(StatementKind::NonGateInstruction {
        name: "reset".to_string(),
        args,
    })
}

fn parse_gate_instruction(scanner: &mut Scanner) -> Option<StatementKind> {
    let mut modifiers = Vec::new();
    loop {
        match scanner.peek().clone() {
            TokenKind::Keyword(Keyword::Inv) => {
                scanner.advance();
                modifiers.push(ModifierSyntax::Inv);
            }
            TokenKind::Keyword(Keyword::Ctrl) => {
                scanner.advance();
                modifiers.push(ModifierSyntax::Ctrl);
            }
            TokenKind::Keyword(Keyword::Pow) => {
                scanner.advance();
                scanner.expect(&TokenKind::Open(crate::lex::Delim::Paren), "`(` after `pow`")?;
                let exponent = expr(scanner)?;
                scanner.expect(&TokenKind::Close(crate::lex::Delim::Paren), "`)` after pow exponent")?;
                modifiers.push(ModifierSyntax::Pow(exponent));
            }
            _ => break,
        }
    }
    let name = ident(scanner)?;
    let args = call_style_args(scanner)?;
    Some(StatementKind::GateInstruction { modifiers, name, args })
}

/// Disambiguates `name = expr` (assignment) from `name arg, arg, ...`
/// (a non-gate instruction call with no modifiers, such as a
/// user-defined instruction whose name does not start with a
/// modifier keyword).
fn parse_ident_led_statement(scanner: &mut Scanner) -> Option<StatementKind> {
    let name = ident(scanner)?;
    if scanner.peek() == &TokenKind::Eq {
        scanner.advance();
        let lhs = Located::unlocated(crate::ast::ExprKind::Identifier(name));
        let rhs = expr(scanner)?;
        Some(StatementKind::Assignment { lhs, rhs })
    } else if scanner.peek() == &TokenKind::Open(crate::lex::Delim::Bracket) {
        // Indexed assignment target: `name[idx] = expr`.
        let lhs = super::expr::continue_postfix_from_ident(scanner, name)?;
        scanner.expect(&TokenKind::Eq, "`=` in assignment")?;
        let rhs = expr(scanner)?;
        Some(StatementKind::Assignment { lhs, rhs })
    } else {
        let args = call_style_args(scanner)?;
        Some(StatementKind::NonGateInstruction { name, args })
    }
}

/// Zero or more comma-separated operand expressions with no enclosing
/// parentheses, terminated by `;` or end of input: `name arg, arg`.
fn call_style_args(scanner: &mut Scanner) -> Option<Vec<crate::ast::Expr>> {
    let mut args = Vec::new();
    if matches!(scanner.peek(), TokenKind::Semi) || scanner.at_eof() {
        return Some(args);
    }
    args.push(expr(scanner)?);
    while scanner.peek() == &TokenKind::Comma {
        scanner.advance();
        args.push(expr(scanner)?);
    }
    Some(args)
}
