use logos::Logos;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult, StepOutcome, step},
        lexer::{LexerExtras, Token},
        parser::core::parse_expression,
        value::core::Value,
    },
};

impl Context<'_> {
    /// Evaluates a string literal, expanding its interpolation holes.
    ///
    /// Braces match with nesting: `"a {v[{i}]} b"` finds the outer pair
    /// first. An empty hole renders the two braces literally. The hole's
    /// source is re-tokenized and evaluated in the current scope, and the
    /// result's plain formatting is spliced in.
    ///
    /// # Errors
    /// `BadInterpolation` when a hole is unclosed or its source does not
    /// tokenize or parse.
    pub fn eval_string_literal(&mut self, raw: &str, line: usize) -> EvalResult<StepOutcome> {
        if !raw.contains('{') {
            return Ok(StepOutcome::Normal(Value::Str(raw.to_string())));
        }

        let chars: Vec<char> = raw.chars().collect();
        let mut out = String::with_capacity(raw.len());
        let mut position = 0;

        while position < chars.len() {
            let c = chars[position];
            if c != '{' {
                out.push(c);
                position += 1;
                continue;
            }

            let mut depth = 1;
            let mut scan = position + 1;
            while scan < chars.len() && depth > 0 {
                match chars[scan] {
                    '{' => depth += 1,
                    '}' => depth -= 1,
                    _ => {},
                }
                scan += 1;
            }
            if depth > 0 {
                return Err(RuntimeError::BadInterpolation { details:
                                                                "Unclosed '{'.".to_string(),
                                                            line });
            }

            let inner: String = chars[position + 1..scan - 1].iter().collect();
            if inner.trim().is_empty() {
                out.push_str("{}");
            } else {
                let value = step!(self.eval_fragment(&inner, line));
                out.push_str(&value.format_plain());
            }
            position = scan;
        }

        Ok(StepOutcome::Normal(Value::Str(out)))
    }

    /// Tokenizes, parses and evaluates one interpolation hole in the
    /// current scope.
    fn eval_fragment(&mut self, source: &str, line: usize) -> EvalResult<StepOutcome> {
        let mut tokens = Vec::new();
        let mut lexer = Token::lexer_with_extras(source, LexerExtras { line });

        while let Some(token) = lexer.next() {
            match token {
                Ok(tok) => tokens.push((tok, lexer.extras.line)),
                Err(()) => {
                    return Err(RuntimeError::BadInterpolation { details: format!("Unrecognized input: {}",
                                                                                 lexer.slice()),
                                                                line });
                },
            }
        }

        let mut iter = tokens.iter().peekable();
        let expr =
            parse_expression(&mut iter).map_err(|e| RuntimeError::BadInterpolation { details:
                                                                                         e.to_string(),
                                                                                     line })?;

        self.eval(&expr)
    }
}
