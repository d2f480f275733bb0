use std::iter::Peekable;

use crate::{
    ast::{Expr, IntrinsicOp, LiteralValue, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            binary::parse_range,
            core::{ParseResult, parse_expression, parse_if, parse_loop},
            utils::{dot_literal, dotted_index, expr_to_target, parse_lvalue},
        },
    },
};

/// Parses a unary expression.
///
/// Supports the prefix operators `-`, `+`, `!` and `~`, the prefix updates
/// `++`/`--` (which require an l-value operand), and the prefix intrinsics
/// `lenof`, `sizeof`, `typeof`, `copyof`, `firstof`, `lastof`, `log`,
/// `logln`, `get`, `getln` and `del`.
///
/// The I/O intrinsics take an optional operand: `log` before a statement
/// terminator writes nothing, `get` without a prompt reads silently.
///
/// Grammar:
/// ```text
///     unary := ("-" | "+" | "!" | "~") unary
///            | ("++" | "--") lvalue
///            | intrinsic unary?
///            | "del" lvalue
///            | postfix
/// ```
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
///
/// # Returns
/// The parsed expression node.
pub fn parse_unary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (token, line) = match tokens.peek() {
        Some((token, line)) => (token.clone(), *line),
        None => return Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    };

    let prefix_op = match &token {
        Token::Minus => Some(UnaryOperator::Negate),
        Token::Plus => Some(UnaryOperator::Plus),
        Token::Bang => Some(UnaryOperator::Not),
        Token::Tilde => Some(UnaryOperator::BitNot),
        _ => None,
    };
    if let Some(op) = prefix_op {
        tokens.next();
        let expr = parse_unary(tokens)?;
        return Ok(Expr::Unary { op,
                                expr: Box::new(expr),
                                line });
    }

    match token {
        Token::PlusPlus | Token::MinusMinus => {
            let increment = matches!(token, Token::PlusPlus);
            tokens.next();
            let target = parse_lvalue(tokens)?;
            Ok(Expr::Update { target,
                              increment,
                              prefix: true,
                              line })
        },

        Token::Del => {
            tokens.next();
            let target = parse_lvalue(tokens)?;
            Ok(Expr::Del { target, line })
        },

        _ => match intrinsic_for(&token) {
            Some((op, operand_required)) => {
                tokens.next();
                let operand = parse_intrinsic_operand(tokens, op, operand_required, line)?;
                Ok(Expr::Intrinsic { op,
                                     expr: operand.map(Box::new),
                                     line })
            },
            None => parse_postfix(tokens),
        },
    }
}

/// Maps a token to its intrinsic operator and whether an operand must
/// follow. The I/O intrinsics work bare; the inspection ones do not.
const fn intrinsic_for(token: &Token) -> Option<(IntrinsicOp, bool)> {
    match token {
        Token::Lenof => Some((IntrinsicOp::Lenof, true)),
        Token::Sizeof => Some((IntrinsicOp::Sizeof, true)),
        Token::Typeof => Some((IntrinsicOp::Typeof, true)),
        Token::Copyof => Some((IntrinsicOp::Copyof, true)),
        Token::Firstof => Some((IntrinsicOp::Firstof, true)),
        Token::Lastof => Some((IntrinsicOp::Lastof, true)),
        Token::Log => Some((IntrinsicOp::Log, false)),
        Token::Logln => Some((IntrinsicOp::Logln, false)),
        Token::Get => Some((IntrinsicOp::Get, false)),
        Token::Getln => Some((IntrinsicOp::Getln, false)),
        _ => None,
    }
}

/// Parses the operand of a prefix intrinsic, which is optional for the I/O
/// intrinsics and mandatory for the inspection ones.
///
/// The I/O intrinsics take a wide operand (`log x ~/ y` logs the quotient),
/// while the inspection intrinsics bind as tightly as other unary
/// operators (`lenof v + 1` adds to the length).
fn parse_intrinsic_operand<'a, I>(tokens: &mut Peekable<I>,
                                  op: IntrinsicOp,
                                  required: bool,
                                  line: usize)
                                  -> ParseResult<Option<Expr>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let has_operand = match tokens.peek() {
        Some((token, _)) => token.starts_expression(),
        None => false,
    };

    let wide = matches!(op,
                        IntrinsicOp::Log | IntrinsicOp::Logln | IntrinsicOp::Get
                        | IntrinsicOp::Getln);

    if has_operand {
        if wide {
            Ok(Some(parse_range(tokens)?))
        } else {
            Ok(Some(parse_unary(tokens)?))
        }
    } else if required {
        Err(ParseError::UnexpectedToken { token: format!("Expected an operand after '{op}'"),
                                          line })
    } else {
        Ok(None)
    }
}

/// Parses postfix operators applied to a primary expression.
///
/// Handles chained element access (`a[0][1]`, `v.0`, slices with range
/// indices) and the postfix updates `++`/`--`, whose operand must have the
/// shape of an l-value.
///
/// Grammar:
/// ```text
///     postfix := primary
///              | postfix "[" expression "]"
///              | postfix "." DIGITS
///              | postfix ("++" | "--")
/// ```
/// # Parameters
/// - `tokens`: Token iterator after a primary expression.
///
/// # Returns
/// An updated [`Expr`] with all postfix operators folded in.
fn parse_postfix<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut node = parse_primary(tokens)?;

    loop {
        match tokens.peek() {
            Some((Token::LBracket, index_line)) => {
                let index_line = *index_line;
                tokens.next();
                let index = parse_expression(tokens)?;
                match tokens.next() {
                    Some((Token::RBracket, _)) => {
                        node = Expr::Index { target: Box::new(node),
                                             index:  Box::new(index),
                                             line:   index_line, };
                    },
                    _ => return Err(ParseError::ExpectedClosingBracket { line: index_line }),
                }
            },

            Some((Token::DotNum(raw), dot_line)) => {
                let dot_line = *dot_line;
                let position = dotted_index(raw, dot_line)?;
                tokens.next();
                node = Expr::Index { target: Box::new(node),
                                     index:  Box::new(Expr::Literal { value:
                                                                          LiteralValue::Num(position),
                                                                      line:  dot_line, }),
                                     line:   dot_line, };
            },

            Some((Token::PlusPlus | Token::MinusMinus, update_line)) => {
                let update_line = *update_line;
                let increment = matches!(tokens.peek(), Some((Token::PlusPlus, _)));
                match expr_to_target(&node) {
                    Some(target) => {
                        tokens.next();
                        node = Expr::Update { target,
                                              increment,
                                              prefix: false,
                                              line: update_line };
                    },
                    // `++` after a non-place expression belongs to whatever
                    // comes next, e.g. `1 ++x` in an aggregate literal.
                    None => break,
                }
            },

            _ => break,
        }
    }

    Ok(node)
}

/// Parses a primary (atomic) expression.
///
/// Primary expressions form the base of the expression grammar and include:
/// - literals (`3.14`, `42xl`, `"text"`, `true`, `null`, `inf`, `maybe`)
/// - identifiers
/// - parenthesized expressions
/// - aggregate literals (`[...]`, `![...]`, `@{...}`)
/// - `if` and `loop` expressions
/// - `break` and `continue`
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the start of a primary
///   expression.
///
/// # Returns
/// The parsed primary [`Expr`] or a `ParseError` on failure.
pub(crate) fn parse_primary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (token, line) = match tokens.peek() {
        Some((token, line)) => (token.clone(), *line),
        None => return Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    };

    match token {
        Token::Num(n) => {
            tokens.next();
            Ok(Expr::Literal { value: LiteralValue::Num(n),
                               line })
        },
        Token::DotNum(raw) => {
            tokens.next();
            Ok(Expr::Literal { value: LiteralValue::Num(dot_literal(&raw, line)?),
                               line })
        },
        Token::BigInt(big) => {
            tokens.next();
            Ok(Expr::Literal { value: LiteralValue::BigInt(big),
                               line })
        },
        Token::Str(text) => {
            tokens.next();
            Ok(Expr::Literal { value: LiteralValue::Str(text),
                               line })
        },
        Token::Bool(b) => {
            tokens.next();
            Ok(Expr::Literal { value: LiteralValue::Bool(b),
                               line })
        },
        Token::Null => {
            tokens.next();
            Ok(Expr::Literal { value: LiteralValue::Null,
                               line })
        },
        Token::Inf => {
            tokens.next();
            Ok(Expr::Literal { value: LiteralValue::Num(f64::INFINITY),
                               line })
        },
        Token::Maybe => {
            tokens.next();
            Ok(Expr::Literal { value: LiteralValue::Maybe,
                               line })
        },

        Token::If => {
            tokens.next();
            parse_if(tokens, line)
        },
        Token::Loop => {
            tokens.next();
            parse_loop(tokens, line)
        },
        Token::Break => {
            tokens.next();
            let value = match tokens.peek() {
                Some((token, _)) if token.starts_expression() => {
                    Some(Box::new(parse_expression(tokens)?))
                },
                _ => None,
            };
            Ok(Expr::Break { value, line })
        },
        Token::Continue => {
            tokens.next();
            Ok(Expr::Continue { line })
        },

        Token::LParen => parse_grouping(tokens),
        Token::LBracket => parse_sequence_literal(tokens, false),
        Token::VecOpen => parse_sequence_literal(tokens, true),
        Token::SetOpen => parse_set_literal(tokens),

        Token::Identifier(name) => {
            tokens.next();
            Ok(Expr::Variable { name, line })
        },

        tok => Err(ParseError::UnexpectedToken { token: format!("{tok:?}"),
                                                 line }),
    }
}

/// Parses a parenthesized expression.
///
/// Grammar: `grouping := "(" expression ")"`
///
/// The inner expression is returned as-is (no wrapper node).
fn parse_grouping<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (_, line) = *tokens.next().unwrap();
    let expr = parse_expression(tokens)?;
    match tokens.next() {
        Some((Token::RParen, _)) => Ok(expr),
        _ => Err(ParseError::ExpectedClosingParen { line }),
    }
}

/// Parses an array (`[...]`) or vector (`![...]`) literal.
///
/// Elements are whitespace-separated full expressions; commas are accepted
/// as optional separators. A top-level `;` splits the literal into an
/// element block and a replication count:
///
/// ```text
///     [1 2 3]      three elements
///     [x; 10]      ten elements, `x` evaluated once per slot
/// ```
/// # Parameters
/// - `tokens`: Token iterator positioned at `[` or `![`.
/// - `growable`: whether to build a vector literal instead of an array.
///
/// # Returns
/// An [`Expr::ArrayLiteral`] or [`Expr::VectorLiteral`] node.
fn parse_sequence_literal<'a, I>(tokens: &mut Peekable<I>, growable: bool) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (_, line) = *tokens.next().unwrap();

    let mut elements = Vec::new();
    let mut count = None;
    loop {
        match tokens.peek() {
            Some((Token::NewLine | Token::Comma, _)) => {
                tokens.next();
            },
            Some((Token::RBracket, _)) => {
                tokens.next();
                break;
            },
            Some((Token::Semicolon, semi_line)) => {
                let semi_line = *semi_line;
                if count.is_some() {
                    return Err(ParseError::UnexpectedToken { token: "';'".to_string(),
                                                             line:  semi_line, });
                }
                tokens.next();
                count = Some(Box::new(parse_expression(tokens)?));
            },
            Some(_) => {
                if count.is_some() {
                    return Err(ParseError::ExpectedClosingBracket { line });
                }
                elements.push(parse_expression(tokens)?);
            },
            None => return Err(ParseError::ExpectedClosingBracket { line }),
        }
    }

    if growable {
        Ok(Expr::VectorLiteral { elements,
                                 count,
                                 line })
    } else {
        Ok(Expr::ArrayLiteral { elements,
                                count,
                                line })
    }
}

/// Parses an ordered set literal of the form `@{expr1 expr2 ...}`.
///
/// Elements follow the same separation rules as sequence literals; sets
/// have no replication form.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at `@{`.
///
/// # Returns
/// An `Expr::SetLiteral` with its list of element expressions.
fn parse_set_literal<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (_, line) = *tokens.next().unwrap();

    let mut elements = Vec::new();
    loop {
        match tokens.peek() {
            Some((Token::NewLine | Token::Comma, _)) => {
                tokens.next();
            },
            Some((Token::RBrace, _)) => {
                tokens.next();
                break;
            },
            Some(_) => elements.push(parse_expression(tokens)?),
            None => return Err(ParseError::ExpectedClosingBrace { line }),
        }
    }

    Ok(Expr::SetLiteral { elements, line })
}
