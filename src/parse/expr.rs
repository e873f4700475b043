use super::scan::Scanner;
use crate::ast::{BinaryOp, Expr, ExprKind, IndexEntry, UnaryOp};
use crate::lex::cooked::{Keyword, TokenKind};
use crate::lex::Delim;
use crate::location::Located;

/// Entry point: the lowest-precedence production, the ternary.
pub(super) fn expr(scanner: &mut Scanner) -> Option<Expr> {
    ternary(scanner)
}

fn ternary(scanner: &mut Scanner) -> Option<Expr> {
    let cond = logical_or(scanner)?;
    if scanner.peek() == &TokenKind::Question {
        let location = scanner.span();
        scanner.advance();
        let then_branch = expr(scanner)?;
        scanner.expect(&TokenKind::Colon, "`:` in ternary expression")?;
        let else_branch = expr(scanner)?;
        Some(Located::new(
            ExprKind::Ternary(Box::new(cond), Box::new(then_branch), Box::new(else_branch)),
            Some(location),
        ))
    } else {
        Some(cond)
    }
}

/// Generates a left-associative binary-operator level: `next` parses
/// the tighter-binding operand, `ops` maps a token kind to the
/// `BinaryOp` it represents.
macro_rules! binary_level {
    ($name:ident, $next:path, [$(($tok:pat, $op:expr)),+ $(,)?]) => {
        fn $name(scanner: &mut Scanner) -> Option<Expr> {
            let mut lhs = $next(scanner)?;
            loop {
                let op = match scanner.peek() {
                    $($tok => $op,)+
                    _ => break,
                };
                let location = scanner.span();
                scanner.advance();
                let rhs = $next(scanner)?;
                lhs = Located::new(
                    ExprKind::Binary(op, Box::new(lhs), Box::new(rhs)),
                    Some(location),
                );
            }
            Some(lhs)
        }
    };
}

binary_level!(logical_or, logical_and, [(TokenKind::BarBar, BinaryOp::Or)]);
binary_level!(logical_and, equality, [(TokenKind::AmpAmp, BinaryOp::And)]);
binary_level!(
    equality,
    relational,
    [(TokenKind::EqEq, BinaryOp::Eq), (TokenKind::BangEq, BinaryOp::Ne)]
);
binary_level!(
    relational,
    additive,
    [
        (TokenKind::Lt, BinaryOp::Lt),
        (TokenKind::LtEq, BinaryOp::Le),
        (TokenKind::Gt, BinaryOp::Gt),
        (TokenKind::GtEq, BinaryOp::Ge),
    ]
);
binary_level!(
    additive,
    multiplicative,
    [(TokenKind::Plus, BinaryOp::Add), (TokenKind::Minus, BinaryOp::Sub)]
);
binary_level!(
    multiplicative,
    unary,
    [(TokenKind::Star, BinaryOp::Mul), (TokenKind::Slash, BinaryOp::Div)]
);

fn unary(scanner: &mut Scanner) -> Option<Expr> {
    let op = match scanner.peek() {
        TokenKind::Minus => Some(UnaryOp::Neg),
        TokenKind::Bang => Some(UnaryOp::Not),
        _ => None,
    };
    match op {
        Some(op) => {
            let location = scanner.span();
            scanner.advance();
            let operand = unary(scanner)?;
            Some(Located::new(ExprKind::Unary(op, Box::new(operand)), Some(location)))
        }
        None => postfix(scanner),
    }
}

/// Indexing binds tighter than unary operators: `primary` followed by
/// zero or more `'[' index (',' index)* ']'` suffixes.
fn postfix(scanner: &mut Scanner) -> Option<Expr> {
    let result = primary(scanner)?;
    apply_index_suffixes(scanner, result)
}

/// Continues parsing index suffixes (`'[' index (',' index)* ']'`)
/// after an already-consumed identifier, for use when a statement has
/// already committed to reading a bare name (e.g. an assignment
/// target).
pub(super) fn continue_postfix_from_ident(scanner: &mut Scanner, name: String) -> Option<Expr> {
    let location = scanner.span();
    let ident_expr = Located::new(ExprKind::Identifier(name), Some(location));
    apply_index_suffixes(scanner, ident_expr)
}

fn apply_index_suffixes(scanner: &mut Scanner, mut result: Expr) -> Option<Expr> {
    while scanner.peek() == &TokenKind::Open(Delim::Bracket) {
        let location = scanner.span();
        scanner.advance();
        let mut indices = vec![index_entry(scanner)?];
        while scanner.peek() == &TokenKind::Comma {
            scanner.advance();
            indices.push(index_entry(scanner)?);
        }
        scanner.expect(&TokenKind::Close(Delim::Bracket), "`]` after index list")?;
        result = Located::new(ExprKind::Index(Box::new(result), indices), Some(location));
    }
    Some(result)
}

fn index_entry(scanner: &mut Scanner) -> Option<IndexEntry> {
    let first = expr(scanner)?;
    if scanner.peek() == &TokenKind::Colon {
        scanner.advance();
        let last = expr(scanner)?;
        Some(IndexEntry::Range(first, last))
    } else {
        Some(IndexEntry::Single(first))
    }
}

fn primary(scanner: &mut Scanner) -> Option<Expr> {
    let location = scanner.span();
    match scanner.peek().clone() {
        TokenKind::Keyword(Keyword::True) => {
            scanner.advance();
            Some(Located::new(ExprKind::BoolLit(true), Some(location)))
        }
        TokenKind::Keyword(Keyword::False) => {
            scanner.advance();
            Some(Located::new(ExprKind::BoolLit(false), Some(location)))
        }
        TokenKind::IntLit => {
            let text = scanner.text().to_string();
            scanner.advance();
            let value: i64 = text.parse().ok()?;
            Some(Located::new(ExprKind::IntLit(value), Some(location)))
        }
        TokenKind::FloatLit => {
            let text = scanner.text().to_string();
            scanner.advance();
            let value: f64 = text.parse().ok()?;
            Some(Located::new(ExprKind::FloatLit(value), Some(location)))
        }
        TokenKind::StringLit => {
            let text = scanner.text();
            let inner = text.trim_matches('"').to_string();
            scanner.advance();
            Some(Located::new(ExprKind::StringLit(inner), Some(location)))
        }
        TokenKind::Ident => {
            let name = scanner.text().to_string();
            scanner.advance();
            if scanner.peek() == &TokenKind::Open(Delim::Paren) {
                let args = call_args(scanner)?;
                Some(Located::new(ExprKind::Call(name, args), Some(location)))
            } else {
                Some(Located::new(ExprKind::Identifier(name), Some(location)))
            }
        }
        TokenKind::Open(Delim::Paren) => {
            scanner.advance();
            let inner = expr(scanner)?;
            scanner.expect(&TokenKind::Close(Delim::Paren), "`)` after parenthesized expression")?;
            Some(inner)
        }
        TokenKind::Open(Delim::Bracket) => array_or_matrix_literal(scanner, location),
        _ => {
            scanner.error(format!("expected an expression, found `{}`", scanner.text()));
            None
        }
    }
}

fn call_args(scanner: &mut Scanner) -> Option<Vec<Expr>> {
    scanner.expect(&TokenKind::Open(Delim::Paren), "`(`")?;
    let mut args = Vec::new();
    if scanner.peek() != &TokenKind::Close(Delim::Paren) {
        args.push(expr(scanner)?);
        while scanner.peek() == &TokenKind::Comma {
            scanner.advance();
            args.push(expr(scanner)?);
        }
    }
    scanner.expect(&TokenKind::Close(Delim::Paren), "`)` after argument list")?;
    Some(args)
}

/// `'[' expr (',' expr)* ']'`, where an element that is itself a
/// bracketed list makes the whole thing a matrix literal instead of
/// an array literal.
fn array_or_matrix_literal(scanner: &mut Scanner, location: crate::location::SourceLocation) -> Option<Expr> {
    scanner.expect(&TokenKind::Open(Delim::Bracket), "`[`")?;
    let mut elements = vec![expr(scanner)?];
    while scanner.peek() == &TokenKind::Comma {
        scanner.advance();
        elements.push(expr(scanner)?);
    }
    scanner.expect(&TokenKind::Close(Delim::Bracket), "`]` after literal list")?;

    let is_matrix = elements
        .iter()
        .all(|e| matches!(e.value, ExprKind::ArrayLiteral(_)));
    if is_matrix && !elements.is_empty() {
        let rows = elements
            .into_iter()
            .map(|e| match e.value {
                ExprKind::ArrayLiteral(row) => row,
                _ => unreachable!("checked by is_matrix above"),
            })
            .collect();
        Some(Located::new(ExprKind::MatrixLiteral(rows), Some(location)))
    } else {
        Some(Located::new(ExprKind::ArrayLiteral(elements), Some(location)))
    }
}
