use std::iter::Peekable;

use crate::{
    ast::{AssignTarget, Expr, LiteralValue},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::core::{ParseResult, parse_expression},
    },
};

/// Parses an l-value: an identifier followed by any number of index steps
/// (`x`, `v[0]`, `grid[1][2]`, `v.0`).
///
/// The caller decides whether the place is followed by an assignment
/// operator; this function only consumes the place itself.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at a potential identifier.
///
/// # Returns
/// The parsed [`AssignTarget`].
///
/// # Errors
/// Returns a `ParseError` if:
/// - the first token is not an identifier,
/// - an index expression is malformed or its `]` is missing,
/// - a dotted access is not a plain non-negative integer.
pub fn parse_lvalue<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<AssignTarget>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (name, line) = match tokens.next() {
        Some((Token::Identifier(n), line)) => (n.clone(), *line),
        Some((tok, line)) => {
            return Err(ParseError::UnexpectedToken { token: format!("Expected identifier, found {tok:?}"),
                                                     line:  *line, });
        },
        None => return Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    };

    let mut path = Vec::new();
    loop {
        match tokens.peek() {
            Some((Token::LBracket, index_line)) => {
                let index_line = *index_line;
                tokens.next();
                let index = parse_expression(tokens)?;
                match tokens.next() {
                    Some((Token::RBracket, _)) => path.push(index),
                    _ => return Err(ParseError::ExpectedClosingBracket { line: index_line }),
                }
            },
            Some((Token::DotNum(raw), dot_line)) => {
                let index = dotted_index(raw, *dot_line)?;
                path.push(Expr::Literal { value: LiteralValue::Num(index),
                                          line:  *dot_line, });
                tokens.next();
            },
            _ => break,
        }
    }

    Ok(AssignTarget { name, path, line })
}

/// Converts a postfix expression back into an [`AssignTarget`], when it has
/// the shape of one (a variable under a chain of index steps).
///
/// Used by postfix `++`/`--`, whose operand must be a place.
#[must_use]
pub fn expr_to_target(expr: &Expr) -> Option<AssignTarget> {
    let mut path = Vec::new();
    let mut current = expr;
    loop {
        match current {
            Expr::Variable { name, line } => {
                path.reverse();
                return Some(AssignTarget { name: name.clone(),
                                           path,
                                           line: *line, });
            },
            Expr::Index { target, index, .. } => {
                path.push((**index).clone());
                current = target;
            },
            _ => return None,
        }
    }
}

/// Decodes a `.digits` slice used as positional access (`v.0`).
///
/// Exponents and fractions are rejected: only plain digit runs denote an
/// element position.
pub(in crate::interpreter::parser) fn dotted_index(raw: &str, line: usize) -> ParseResult<f64> {
    let digits = &raw[1..];
    if !digits.chars().all(|c| c.is_ascii_digit() || c == '_') {
        return Err(ParseError::UnexpectedToken { token: format!("Expected element position, found '{raw}'"),
                                                 line });
    }

    let cleaned: String = digits.chars().filter(|&c| c != '_').collect();
    cleaned.parse()
           .map_err(|_| ParseError::UnexpectedToken { token: format!("'{raw}'"),
                                                      line })
}

/// Parses a leading-dot numeric literal slice (`.5`, `.5e-3`) into its
/// value.
pub(in crate::interpreter::parser) fn dot_literal(raw: &str, line: usize) -> ParseResult<f64> {
    let cleaned: String = raw.chars().filter(|&c| c != '_').collect();
    cleaned.parse()
           .map_err(|_| ParseError::UnexpectedToken { token: format!("'{raw}'"),
                                                      line })
}

/// Returns the compound-assignment operator a token denotes, `Some(None)`
/// for plain `=`, or `None` when the token is not an assignment operator.
#[must_use]
pub const fn assignment_operator(token: &Token)
                                 -> Option<Option<crate::ast::BinaryOperator>> {
    use crate::ast::BinaryOperator as Op;

    match token {
        Token::Equals => Some(None),
        Token::PlusAssign => Some(Some(Op::Add)),
        Token::MinusAssign => Some(Some(Op::Sub)),
        Token::MulAssign => Some(Some(Op::Mul)),
        Token::DivAssign => Some(Some(Op::Div)),
        Token::FloorDivAssign => Some(Some(Op::FloorDiv)),
        Token::ModAssign => Some(Some(Op::Mod)),
        Token::XorAssign => Some(Some(Op::BitXor)),
        Token::PowAssign => Some(Some(Op::Pow)),
        _ => None,
    }
}
