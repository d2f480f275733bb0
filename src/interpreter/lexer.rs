use logos::Logos;
use num_bigint::BigInt;

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
pub enum Token {
    /// Numeric literal tokens, such as `3.14`, `1_000.5e-3` or `2e10`.
    /// Underscore digit separators are stripped before parsing.
    #[regex(r"[0-9][0-9_]*\.[0-9][0-9_]*([eE][+-]?[0-9]+)?", parse_number)]
    #[regex(r"[0-9][0-9_]*[eE][+-]?[0-9]+", parse_number)]
    #[regex(r"[0-9][0-9_]*", parse_number)]
    Num(f64),
    /// A leading-dot numeric literal such as `.5`. The raw slice is kept
    /// because after an expression the same shape means positional access
    /// (`v.0`); the parser decides which reading applies.
    #[regex(r"\.[0-9][0-9_]*([eE][+-]?[0-9]+)?", |lex| lex.slice().to_string())]
    DotNum(String),
    /// Big-integer literal tokens: digits followed by `xl`, such as `42xl`.
    #[regex(r"[0-9][0-9_]*[xX][lL]", parse_big_int)]
    BigInt(BigInt),
    /// String literal tokens with single, double or back quotes. Newlines
    /// are allowed inside; `\n`, `\t`, `\\` and escaped quotes are decoded.
    #[regex(r#""([^"\\]|\\[\s\S])*""#, decode_string)]
    #[regex(r"'([^'\\]|\\[\s\S])*'", decode_string)]
    #[regex(r"`([^`\\]|\\[\s\S])*`", decode_string)]
    Str(String),
    /// Boolean literal tokens, `true` or `false`.
    #[token("true", parse_bool)]
    #[token("false", parse_bool)]
    Bool(bool),
    /// `null`
    #[token("null")]
    Null,
    /// `inf`
    #[token("inf")]
    Inf,
    /// `maybe`
    #[token("maybe")]
    Maybe,
    /// `if`
    #[token("if")]
    If,
    /// `else`
    #[token("else")]
    Else,
    /// `loop`
    #[token("loop")]
    Loop,
    /// `in`
    #[token("in")]
    In,
    /// `break`
    #[token("break")]
    Break,
    /// `continue`
    #[token("continue")]
    Continue,
    /// `fn` (reserved, unimplemented)
    #[token("fn")]
    Fn,
    /// `return` (reserved, unimplemented)
    #[token("return")]
    Return,
    /// `const`
    #[token("const")]
    Const,
    /// `del`
    #[token("del")]
    Del,
    /// `has`
    #[token("has")]
    Has,
    /// `as`
    #[token("as")]
    As,
    /// `lenof`
    #[token("lenof")]
    Lenof,
    /// `typeof`
    #[token("typeof")]
    Typeof,
    /// `copyof`
    #[token("copyof")]
    Copyof,
    /// `sizeof`
    #[token("sizeof")]
    Sizeof,
    /// `firstof`
    #[token("firstof")]
    Firstof,
    /// `lastof`
    #[token("lastof")]
    Lastof,
    /// `log`
    #[token("log")]
    Log,
    /// `logln`
    #[token("logln")]
    Logln,
    /// `get`
    #[token("get")]
    Get,
    /// `getln`
    #[token("getln")]
    Getln,
    /// Identifier tokens: ASCII letters, digits (not leading), `_`, `$` and
    /// a small set of accented letters.
    #[regex(r"[A-Za-z_$áéíóúüñÁÉÍÓÚÜÑ][A-Za-z0-9_$áéíóúüñÁÉÍÓÚÜÑ]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `// Comments.` and `# comments.`
    #[regex(r"//[^\n\r]*", logos::skip, allow_greedy = true)]
    #[regex(r"#[^\n\r]*", logos::skip, allow_greedy = true)]
    Comment,
    /// ```
    /// /* Multi line comments. */
    /// ```
    #[regex(r"/\*([^*]|\*[^/])*\*/", |lex| {
        let comment      = lex.slice();
        let newlines     = comment.chars().filter(|&c| c == '\n').count();
        lex.extras.line += newlines;
        logos::Skip
    })]
    MultiLineComment,
    /// `<=>`
    #[token("<=>")]
    SwapSign,
    /// `??`
    #[token("??")]
    QuestionQuestion,
    /// `..=`
    #[token("..=")]
    DotDotEq,
    /// `..`
    #[token("..")]
    DotDot,
    /// `@{`
    #[token("@{")]
    SetOpen,
    /// `![`
    #[token("![")]
    VecOpen,
    /// `**=`
    #[token("**=")]
    PowAssign,
    /// `~/=`
    #[token("~/=")]
    FloorDivAssign,
    /// `~/`
    #[token("~/")]
    FloorDivSign,
    /// `**`
    #[token("**")]
    PowSign,
    /// `<<`
    #[token("<<")]
    ShlSign,
    /// `>>>`
    #[token(">>>")]
    UShrSign,
    /// `>>`
    #[token(">>")]
    ShrSign,
    /// `++`
    #[token("++")]
    PlusPlus,
    /// `--`
    #[token("--")]
    MinusMinus,
    /// `+=`
    #[token("+=")]
    PlusAssign,
    /// `-=`
    #[token("-=")]
    MinusAssign,
    /// `*=`
    #[token("*=")]
    MulAssign,
    /// `/=`
    #[token("/=")]
    DivAssign,
    /// `%=`
    #[token("%=")]
    ModAssign,
    /// `^=`
    #[token("^=")]
    XorAssign,
    /// `&&`
    #[token("&&")]
    AmpAmp,
    /// `||`
    #[token("||")]
    PipePipe,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `=`
    #[token("=")]
    Equals,
    /// `!`
    #[token("!")]
    Bang,
    /// `&`
    #[token("&")]
    Ampersand,
    /// `|`
    #[token("|")]
    Pipe,
    /// `^`
    #[token("^")]
    Caret,
    /// `~`
    #[token("~")]
    Tilde,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `,`
    #[token(",")]
    Comma,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `:`
    #[token(":")]
    Colon,
    /// `.`
    #[token(".")]
    Dot,
    /// `?`
    #[token("?")]
    Question,

    /// Newlines separate statements and advance the line counter.
    #[token("\n", |lex| { lex.extras.line += 1; })]
    NewLine,
    /// Tabs and feeds.
    #[regex(r"[ \t\f\r]+", logos::skip)]
    Ignored,
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number for error reporting and diagnostics.
#[derive(Default)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

impl Token {
    /// Returns `true` when the token can begin an expression.
    ///
    /// Used to decide whether `log`, `get` and friends take an operand or
    /// stand alone before a terminator.
    #[must_use]
    pub const fn starts_expression(&self) -> bool {
        matches!(self,
                 Self::Num(_)
                 | Self::DotNum(_)
                 | Self::BigInt(_)
                 | Self::Str(_)
                 | Self::Bool(_)
                 | Self::Null
                 | Self::Inf
                 | Self::Maybe
                 | Self::Identifier(_)
                 | Self::If
                 | Self::Loop
                 | Self::Break
                 | Self::Continue
                 | Self::LParen
                 | Self::LBracket
                 | Self::VecOpen
                 | Self::SetOpen
                 | Self::Bang
                 | Self::Tilde
                 | Self::Plus
                 | Self::Minus
                 | Self::PlusPlus
                 | Self::MinusMinus
                 | Self::Lenof
                 | Self::Typeof
                 | Self::Copyof
                 | Self::Sizeof
                 | Self::Firstof
                 | Self::Lastof
                 | Self::Log
                 | Self::Logln
                 | Self::Get
                 | Self::Getln
                 | Self::Del)
    }

}

/// Parses a numeric literal from the current token slice, stripping
/// underscore separators first.
fn parse_number(lex: &logos::Lexer<Token>) -> Option<f64> {
    let cleaned: String = lex.slice().chars().filter(|&c| c != '_').collect();
    cleaned.parse().ok()
}
/// Parses a big-integer literal from the current token slice. The slice has
/// the shape `digits xl`; separators and the suffix are removed.
fn parse_big_int(lex: &logos::Lexer<Token>) -> Option<BigInt> {
    let slice = lex.slice();
    let digits: String = slice[..slice.len() - 2].chars().filter(|&c| c != '_').collect();
    digits.parse().ok()
}
/// Parses a boolean literal from the current token slice (`true` or
/// `false`).
fn parse_bool(lex: &logos::Lexer<Token>) -> Option<bool> {
    match lex.slice() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}
/// Decodes a quoted string literal: strips the quotes, resolves the escape
/// sequences `\n`, `\t`, `\\` and `\<quote>`, and advances the line counter
/// for every raw newline the literal spans.
fn decode_string(lex: &mut logos::Lexer<Token>) -> Option<String> {
    let slice = lex.slice();
    let inner = &slice[1..slice.len() - 1];

    lex.extras.line += inner.chars().filter(|&c| c == '\n').count();

    let mut decoded = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            decoded.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => decoded.push('\n'),
            Some('t') => decoded.push('\t'),
            Some('\\') => decoded.push('\\'),
            Some(q @ ('\'' | '"' | '`')) => decoded.push(q),
            Some(other) => {
                decoded.push('\\');
                decoded.push(other);
            },
            None => decoded.push('\\'),
        }
    }

    Some(decoded)
}
