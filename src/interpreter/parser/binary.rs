use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, CastTarget, Expr, TypeName},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{core::ParseResult, unary::parse_unary},
    },
};

/// Parses a range expression.
///
/// Handles the two range operators at the lowest binding level below
/// assignment: `a..b` (half-open) and `a..=b` (closed).
///
/// Grammar: `range := logical_or ((".." | "..=") logical_or)*`
///
/// A cast parsed on the right of the operator applies to the whole range:
/// `0..3 as vec` materialises `0..3`, it does not cast the end bound.
///
/// # Parameters
/// - `tokens`: Token stream with line information.
///
/// # Returns
/// An `Expr::Range` tree, or the inner expression when no range operator is
/// present.
pub fn parse_range<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_logical_or(tokens)?;
    loop {
        if let Some((token, line)) = tokens.peek()
           && let Some(closed) = match token {
               Token::DotDot => Some(false),
               Token::DotDotEq => Some(true),
               _ => None,
           }
        {
            let line = *line;
            tokens.next();
            let right = parse_logical_or(tokens)?;
            left = attach_range(left, right, closed, line);
            continue;
        }
        break;
    }
    Ok(left)
}

/// Builds a range node, lifting casts off the end bound so that they apply
/// to the whole range.
fn attach_range(start: Expr, end: Expr, closed: bool, line: usize) -> Expr {
    match end {
        Expr::Cast { expr,
                     target,
                     line: cast_line, } => Expr::Cast { expr: Box::new(attach_range(start,
                                                                                    *expr,
                                                                                    closed,
                                                                                    line)),
                                                        target,
                                                        line: cast_line },
        end => Expr::Range { start: Box::new(start),
                             end: Box::new(end),
                             closed,
                             line },
    }
}

/// Parses logical OR expressions: `nullish ("||" nullish)*`.
pub fn parse_logical_or<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_left_assoc(tokens, parse_nullish, |token| match token {
        Token::PipePipe => Some(BinaryOperator::Or),
        _ => None,
    })
}

/// Parses null-coalescing expressions: `logical_and ("??" logical_and)*`.
pub fn parse_nullish<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_left_assoc(tokens, parse_logical_and, |token| match token {
        Token::QuestionQuestion => Some(BinaryOperator::Nullish),
        _ => None,
    })
}

/// Parses logical AND expressions: `equality ("&&" equality)*`.
pub fn parse_logical_and<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_left_assoc(tokens, parse_equality, |token| match token {
        Token::AmpAmp => Some(BinaryOperator::And),
        _ => None,
    })
}

/// Parses equality-level expressions: `comparison (("==" | "!=" | "has")
/// comparison)*`. Membership sits at the same level as equality.
pub fn parse_equality<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_left_assoc(tokens, parse_comparison, |token| match token {
        Token::EqualEqual => Some(BinaryOperator::Equal),
        Token::BangEqual => Some(BinaryOperator::NotEqual),
        Token::Has => Some(BinaryOperator::Has),
        _ => None,
    })
}

/// Parses relational expressions: `additive (("<" | "<=" | ">" | ">=")
/// additive)*`.
pub fn parse_comparison<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_left_assoc(tokens, parse_additive, |token| match token {
        Token::Less => Some(BinaryOperator::Less),
        Token::LessEqual => Some(BinaryOperator::LessEqual),
        Token::Greater => Some(BinaryOperator::Greater),
        Token::GreaterEqual => Some(BinaryOperator::GreaterEqual),
        _ => None,
    })
}

/// Parses addition and subtraction: `pow (("+" | "-") pow)*`.
pub fn parse_additive<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_left_assoc(tokens, parse_pow, |token| match token {
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Sub),
        _ => None,
    })
}

/// Parses exponentiation: `multiplicative ("**" multiplicative)*`.
pub fn parse_pow<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_left_assoc(tokens, parse_multiplicative, |token| match token {
        Token::PowSign => Some(BinaryOperator::Pow),
        _ => None,
    })
}

/// Parses multiplication-level expressions: `bitwise (("*" | "/" | "%" |
/// "~/") bitwise)*`.
pub fn parse_multiplicative<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_left_assoc(tokens, parse_bitwise, |token| match token {
        Token::Star => Some(BinaryOperator::Mul),
        Token::Slash => Some(BinaryOperator::Div),
        Token::Percent => Some(BinaryOperator::Mod),
        Token::FloorDivSign => Some(BinaryOperator::FloorDiv),
        _ => None,
    })
}

/// Parses bitwise expressions: `cast (("&" | "|" | "^" | "<<" | ">>" |
/// ">>>") cast)*`.
pub fn parse_bitwise<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_left_assoc(tokens, parse_cast, |token| match token {
        Token::Ampersand => Some(BinaryOperator::BitAnd),
        Token::Pipe => Some(BinaryOperator::BitOr),
        Token::Caret => Some(BinaryOperator::BitXor),
        Token::ShlSign => Some(BinaryOperator::Shl),
        Token::ShrSign => Some(BinaryOperator::Shr),
        Token::UShrSign => Some(BinaryOperator::UShr),
        _ => None,
    })
}

/// Parses cast expressions: `unary ("as" (type | "typeof" unary))*`.
///
/// The target is either a literal type name (`x as vec`) or the type of
/// another expression (`x as typeof y`), where the operand of `typeof`
/// binds as tightly as any other unary operand.
pub fn parse_cast<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_unary(tokens)?;

    while let Some((Token::As, line)) = tokens.peek() {
        let line = *line;
        tokens.next();

        let target = match tokens.peek() {
            Some((Token::Typeof, _)) => {
                tokens.next();
                CastTarget::Typeof(Box::new(parse_unary(tokens)?))
            },
            Some((Token::Null, _)) => {
                tokens.next();
                CastTarget::Named(TypeName::Null)
            },
            Some((Token::Maybe, _)) => {
                tokens.next();
                CastTarget::Named(TypeName::Maybe)
            },
            Some((Token::Inf, _)) => {
                tokens.next();
                CastTarget::Named(TypeName::Inf)
            },
            Some((Token::Identifier(name), name_line)) => {
                let resolved = TypeName::from_source(name);
                match resolved {
                    Some(type_name) => {
                        tokens.next();
                        CastTarget::Named(type_name)
                    },
                    None => {
                        return Err(ParseError::UnknownTypeName { name: name.clone(),
                                                                 line: *name_line, });
                    },
                }
            },
            Some((tok, tok_line)) => {
                return Err(ParseError::UnexpectedToken { token: format!("Expected type name after 'as', found {tok:?}"),
                                                         line:  *tok_line, });
            },
            None => return Err(ParseError::UnexpectedEndOfInput { line }),
        };

        left = Expr::Cast { expr: Box::new(left),
                            target,
                            line };
    }

    Ok(left)
}

/// Parses one left-associative precedence level.
///
/// `operand` parses the next-higher level; `classify` maps a token to the
/// operator handled at this level, or `None` to stop.
fn parse_left_assoc<'a, I>(tokens: &mut Peekable<I>,
                           operand: impl Fn(&mut Peekable<I>) -> ParseResult<Expr>,
                           classify: impl Fn(&Token) -> Option<BinaryOperator>)
                           -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = operand(tokens)?;
    loop {
        if let Some((token, line)) = tokens.peek()
           && let Some(op) = classify(token)
        {
            let line = *line;
            tokens.next();
            let right = operand(tokens)?;
            left = Expr::Binary { left: Box::new(left),
                                  op,
                                  right: Box::new(right),
                                  line };
            continue;
        }
        break;
    }
    Ok(left)
}
