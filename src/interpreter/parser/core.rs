use std::iter::Peekable;

use crate::{
    ast::{Expr, IfBranch, LoopKind},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            binary::parse_range,
            block::parse_block,
            utils::{assignment_operator, parse_lvalue},
        },
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a full expression.
///
/// This is the entry point for expression parsing. Assignments, compound
/// assignments and swaps are detected first with a bounded lookahead: the
/// parser speculatively reads an l-value on a cloned cursor and commits only
/// when an assignment operator or `<=>` follows. Everything else descends
/// into the precedence ladder starting at ranges.
///
/// Grammar:
/// ```text
///     expression := lvalue assign_op expression
///                 | lvalue "<=>" lvalue
///                 | range
/// ```
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, line)` pairs.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some(expr) = parse_assignment_or_swap(tokens)? {
        return Ok(expr);
    }
    parse_range(tokens)
}

/// Attempts to parse an assignment, compound assignment or swap.
///
/// The lookahead runs on a clone of the cursor, so when no assignment
/// operator follows the candidate l-value nothing is consumed and the
/// caller falls through to ordinary expression parsing. This is the one
/// structural backtrack in the grammar.
///
/// # Returns
/// - `Ok(Some(expr))` when an assignment or swap was parsed,
/// - `Ok(None)` when the input is not an assignment.
fn parse_assignment_or_swap<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Option<Expr>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if !matches!(tokens.peek(), Some((Token::Identifier(_), _))) {
        return Ok(None);
    }

    let mut lookahead = tokens.clone();
    let Ok(_) = parse_lvalue(&mut lookahead) else {
        return Ok(None);
    };

    match lookahead.peek() {
        Some((Token::SwapSign, line)) => {
            let line = *line;
            let left = parse_lvalue(tokens)?;
            tokens.next(); // <=>
            let right = parse_lvalue(tokens)?;
            Ok(Some(Expr::Swap { left, right, line }))
        },
        Some((token, line)) => match assignment_operator(token) {
            Some(op) => {
                let line = *line;
                let target = parse_lvalue(tokens)?;
                tokens.next(); // the assignment operator
                let value = parse_expression(tokens)?;
                Ok(Some(Expr::Assign { target,
                                       op,
                                       value: Box::new(value),
                                       line }))
            },
            None => Ok(None),
        },
        None => Ok(None),
    }
}

/// Parses an `if` expression with optional `else` and chained `else if`.
///
/// Syntax:
/// ```text
///     if <condition> { <block> }
///     else if <condition> { <block> }
///     else { <block> }
/// ```
/// Parentheses around conditions are optional; they parse as grouping. The
/// value of the expression is the value of the executed block, or `null`
/// when no branch runs.
///
/// # Parameters
/// - `tokens`: Token stream positioned after the `if` keyword.
/// - `line`: Line number of the `if` token.
///
/// # Returns
/// An `Expr::If` node with all arms collected.
///
/// # Errors
/// - `ExpectedBlock` when a condition is not followed by `{`.
/// - Propagates any errors from sub-expression parsing.
pub fn parse_if<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut branches = Vec::new();
    let else_block = loop {
        let condition = parse_expression(tokens)?;
        let block = parse_braced_block(tokens, line)?;
        branches.push(IfBranch { condition, block });

        skip_newlines(tokens);
        match tokens.peek() {
            Some((Token::Else, _)) => {
                tokens.next();
                match tokens.peek() {
                    Some((Token::If, _)) => {
                        tokens.next();
                        continue;
                    },
                    _ => break Some(Box::new(parse_braced_block(tokens, line)?)),
                }
            },
            _ => break None,
        }
    };

    Ok(Expr::If { branches,
                  else_block,
                  line })
}

/// Parses a `loop` expression in one of its three shapes.
///
/// Supported forms:
///
/// - `loop { ... }` — infinite.
/// - `loop [(] x in iterable [)] { ... }` — for-in.
/// - `loop [(] condition [)] { ... }` — while.
///
/// The for-in shape is recognized by the two-token prefix `identifier in`,
/// either directly after `loop` or behind an opening parenthesis. Anything
/// else is a while condition (a parenthesized condition parses as
/// grouping).
///
/// # Parameters
/// - `tokens`: Token stream positioned after the `loop` keyword.
/// - `line`: Line number of the `loop` token.
///
/// # Returns
/// An `Expr::Loop` node.
///
/// # Errors
/// - `ExpectedBlock` when the body brace is missing.
/// - `ExpectedClosingParen` when a parenthesized header is not closed.
/// - Propagates any errors from sub-expression parsing.
pub fn parse_loop<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let kind = if matches!(tokens.peek(), Some((Token::LBrace, _))) {
        let body = parse_braced_block(tokens, line)?;
        LoopKind::Infinite { body: Box::new(body) }
    } else if peek_for_in(tokens, false) {
        let (var, iterable) = parse_for_in_header(tokens)?;
        let body = parse_braced_block(tokens, line)?;
        LoopKind::ForIn { var,
                          iterable: Box::new(iterable),
                          body: Box::new(body) }
    } else if matches!(tokens.peek(), Some((Token::LParen, _))) && peek_for_in(tokens, true) {
        tokens.next(); // (
        let (var, iterable) = parse_for_in_header(tokens)?;
        match tokens.next() {
            Some((Token::RParen, _)) => {},
            _ => return Err(ParseError::ExpectedClosingParen { line }),
        }
        let body = parse_braced_block(tokens, line)?;
        LoopKind::ForIn { var,
                          iterable: Box::new(iterable),
                          body: Box::new(body) }
    } else {
        let condition = parse_expression(tokens)?;
        let body = parse_braced_block(tokens, line)?;
        LoopKind::While { condition: Box::new(condition),
                          body:      Box::new(body), }
    };

    Ok(Expr::Loop { kind, line })
}

/// Reports whether the cursor sits on an `identifier in` prefix, optionally
/// behind an opening parenthesis. Nothing is consumed.
fn peek_for_in<'a, I>(tokens: &Peekable<I>, behind_paren: bool) -> bool
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut lookahead = tokens.clone();
    if behind_paren && !matches!(lookahead.next(), Some((Token::LParen, _))) {
        return false;
    }
    matches!(lookahead.next(), Some((Token::Identifier(_), _)))
    && matches!(lookahead.next(), Some((Token::In, _)))
}

/// Parses the `x in iterable` part of a for-in header.
fn parse_for_in_header<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<(String, Expr)>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let var = match tokens.next() {
        Some((Token::Identifier(name), _)) => name.clone(),
        Some((tok, line)) => {
            return Err(ParseError::UnexpectedToken { token: format!("Expected loop variable, found {tok:?}"),
                                                     line:  *line, });
        },
        None => return Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    };
    tokens.next(); // in, guaranteed by peek_for_in

    let iterable = parse_expression(tokens)?;
    Ok((var, iterable))
}

/// Expects a `{`, then parses the block it opens.
pub(in crate::interpreter::parser) fn parse_braced_block<'a, I>(tokens: &mut Peekable<I>,
                                                                line: usize)
                                                                -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    skip_newlines(tokens);
    match tokens.next() {
        Some((Token::LBrace, brace_line)) => parse_block(tokens, *brace_line),
        Some((_, found_line)) => Err(ParseError::ExpectedBlock { line: *found_line }),
        None => Err(ParseError::ExpectedBlock { line }),
    }
}

/// Skips newline tokens.
pub(in crate::interpreter::parser) fn skip_newlines<'a, I>(tokens: &mut Peekable<I>)
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    while let Some((Token::NewLine, _)) = tokens.peek() {
        tokens.next();
    }
}
