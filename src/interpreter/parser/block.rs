use std::iter::Peekable;

use crate::{
    ast::Expr,
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{core::ParseResult, statement::parse_statement},
    },
};

/// Parses a block expression delimited by braces.
///
/// A block consists of zero or more statements separated by newlines or
/// single semicolons. Parsing continues until a closing `}` token is
/// encountered. A `;` with no statement before it is rejected, the same
/// rule as at the top level.
///
/// Grammar: `block := "{" statement* "}"`
///
/// The resulting expression is returned as `Expr::Block { statements, line }`;
/// its value at evaluation time is the value of the last statement.
///
/// # Parameters
/// - `tokens`: Token stream positioned after the opening brace.
/// - `line`: Line number of the opening brace.
///
/// # Returns
/// A block expression containing all parsed statements.
///
/// # Errors
/// - `StrayStatementEnd` for a `;` that terminates nothing.
/// - `ExpectedClosingBrace` when input ends before `}`.
pub fn parse_block<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut statements = Vec::new();

    loop {
        while let Some((Token::NewLine, _)) = tokens.peek() {
            tokens.next();
        }

        match tokens.peek() {
            Some((Token::RBrace, _)) => {
                tokens.next();
                break;
            },
            Some((Token::Semicolon, semi_line)) => {
                return Err(ParseError::StrayStatementEnd { line: *semi_line });
            },
            Some(_) => {},
            None => return Err(ParseError::ExpectedClosingBrace { line }),
        }

        statements.push(parse_statement(tokens)?);

        if let Some((Token::Semicolon, _)) = tokens.peek() {
            tokens.next();
        }
    }

    Ok(Expr::Block { statements, line })
}
