use std::iter::Peekable;

use crate::{
    ast::Statement,
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::core::{ParseResult, parse_expression},
    },
};

/// Parses a single statement.
///
/// A statement may be one of:
/// - a constant declaration (`const name = expression`),
/// - an expression used as a statement.
///
/// The reserved keywords `fn` and `return` are rejected here with an
/// unimplemented-feature error; the language reserves them but does not
/// define them.
///
/// The statement's source line is taken from the next available token.
///
/// # Parameters
/// - `tokens`: Token iterator containing `(Token, line)` pairs.
///
/// # Returns
/// A parsed [`Statement`] node.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.peek() {
        Some((Token::Fn, line)) => {
            return Err(ParseError::Unimplemented { keyword: "fn".to_string(),
                                                   line:    *line, });
        },
        Some((Token::Return, line)) => {
            return Err(ParseError::Unimplemented { keyword: "return".to_string(),
                                                   line:    *line, });
        },
        _ => {},
    }

    if let Some(statement) = parse_const_declaration(tokens)? {
        return Ok(statement);
    }

    let current_line = tokens.peek().map_or(0, |(_, l)| *l);
    let expr = parse_expression(tokens)?;

    Ok(Statement::Expression { expr,
                               line: current_line })
}

/// Parses a constant declaration statement.
///
/// A declaration has the form `const <identifier> = <expression>`.
///
/// If the next token is not `const`, this function returns `Ok(None)` and
/// does not consume any input.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at a possible `const`.
///
/// # Returns
/// - `Ok(Some(Statement::ConstDeclaration))` if a declaration is parsed,
/// - `Ok(None)` if no declaration is present.
///
/// # Errors
/// Returns a `ParseError` if:
/// - the name is missing or is a keyword,
/// - `=` is missing,
/// - the expression is malformed,
/// - input ends unexpectedly.
fn parse_const_declaration<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Option<Statement>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some((Token::Const, line)) = tokens.peek() {
        let line = *line;
        tokens.next();

        let name = match tokens.next() {
            Some((Token::Identifier(n), _)) => n.clone(),
            Some((tok, l)) => {
                return Err(ParseError::ReservedWord { name: format!("{tok:?}"),
                                                      line: *l, });
            },
            None => return Err(ParseError::UnexpectedEndOfInput { line }),
        };

        match tokens.next() {
            Some((Token::Equals, _)) => {},
            Some((tok, l)) => {
                return Err(ParseError::UnexpectedToken { token: format!("Expected '=', found {tok:?}"),
                                                         line:  *l, });
            },
            None => {
                return Err(ParseError::UnexpectedEndOfInput { line });
            },
        }

        let value = parse_expression(tokens)?;
        return Ok(Some(Statement::ConstDeclaration { name, value, line }));
    }

    Ok(None)
}
