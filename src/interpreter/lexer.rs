use logos::Logos;

use crate::{
    error::ParseError,
    interpreter::template::scan_template_body,
    util::num::u64_to_f64_checked,
};

/// Lexing failures, attached to the error token by `logos`.
///
/// `tokenize` converts these into the matching [`ParseError`] variant with a
/// byte position.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum LexError {
    /// No token rule matched the input.
    #[default]
    InvalidToken,
    /// A radix literal exceeded the exactly-representable integer range.
    LiteralTooLarge,
    /// A backtick template string was never closed.
    UnterminatedTemplate,
}

/// Represents a lexical token in an expression span.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the template expression
/// grammar.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(error = LexError)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    /// The `null` keyword.
    #[token("null")]
    Null,
    /// Boolean literal tokens: `true` or `false`.
    #[token("true", |_| true)]
    #[token("false", |_| false)]
    Bool(bool),
    /// The `return` keyword, only valid inside a lambda block body.
    #[token("return")]
    Return,
    /// Numeric literal tokens, such as `10.1`, `.5`, `2e-3`, `42`, or the
    /// radix forms `0x1f`, `0o10`, `0b101`. All numbers share the `f64`
    /// representation.
    #[regex(r"[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?", parse_real)]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?", parse_real)]
    #[regex(r"[0-9]+([eE][+-]?[0-9]+)?", parse_real)]
    #[regex(r"0[xX][0-9a-fA-F]+", |lex| parse_radix(lex, 16))]
    #[regex(r"0[oO][0-7]+", |lex| parse_radix(lex, 8))]
    #[regex(r"0[bB][01]+", |lex| parse_radix(lex, 2))]
    Number(f64),
    /// Single- or double-quoted string literal, unescaped.
    #[regex(r#""([^"\\]|\\.)*""#, parse_quoted)]
    #[regex(r"'([^'\\]|\\.)*'", parse_quoted)]
    Str(String),
    /// Backtick-quoted template string. The callback scans past nested
    /// `${...}` regions (and nested backticks inside them), so the token
    /// value is the raw body text, parsed as a template later.
    #[token("`", lex_template_str)]
    TemplateStr(String),
    /// The internal whole-context token, inserted by the implicit-context
    /// preprocessor rewrite of `name()` call sites.
    #[token("#ctx")]
    ContextRef,
    /// Identifier tokens; context binding or property names such as
    /// `variables` or `$input`.
    #[regex(r"[A-Za-z_$][A-Za-z0-9_$]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `=>`
    #[token("=>")]
    Arrow,
    /// `||`
    #[token("||")]
    OrOr,
    /// `&&`
    #[token("&&")]
    AndAnd,
    /// `==`
    #[token("==")]
    EqEq,
    /// `!=`
    #[token("!=")]
    BangEq,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `!`
    #[token("!")]
    Bang,
    /// `.`
    #[token(".")]
    Dot,
    /// `,`
    #[token(",")]
    Comma,
    /// `:`
    #[token(":")]
    Colon,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `?`
    #[token("?")]
    Question,
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
}

/// Tokenizes one expression span into `(Token, position)` pairs.
///
/// `offset` is the span's byte offset within the whole preprocessed
/// template, so every token position (and therefore every parse and runtime
/// error) points into the full template rather than the local span.
///
/// # Errors
/// Returns a `ParseError` for unrecognized input, oversized radix literals,
/// or an unterminated backtick string.
pub fn tokenize(source: &str, offset: usize) -> Result<Vec<(Token, usize)>, ParseError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(source);

    while let Some(token) = lexer.next() {
        let pos = offset + lexer.span().start;
        match token {
            Ok(tok) => tokens.push((tok, pos)),
            Err(LexError::LiteralTooLarge) => {
                return Err(ParseError::LiteralTooLarge { pos });
            },
            Err(LexError::UnterminatedTemplate) => {
                return Err(ParseError::UnterminatedTemplateString { pos });
            },
            Err(LexError::InvalidToken) => {
                return Err(ParseError::UnexpectedToken { token: lexer.slice().to_string(),
                                                         pos });
            },
        }
    }

    Ok(tokens)
}

/// Parses a decimal numeric literal from the current token slice.
fn parse_real(lex: &logos::Lexer<Token>) -> Result<f64, LexError> {
    lex.slice().parse().map_err(|_| LexError::InvalidToken)
}

/// Parses a `0x`/`0o`/`0b` radix literal into its integer value in that
/// base. Values beyond `2^53 - 1` are rejected rather than silently rounded.
fn parse_radix(lex: &logos::Lexer<Token>, radix: u32) -> Result<f64, LexError> {
    let digits = &lex.slice()[2..];
    let value = u64::from_str_radix(digits, radix).map_err(|_| LexError::LiteralTooLarge)?;
    u64_to_f64_checked(value, LexError::LiteralTooLarge)
}

/// Strips the surrounding quotes from the current token slice and resolves
/// backslash escapes.
fn parse_quoted(lex: &logos::Lexer<Token>) -> Result<String, LexError> {
    let slice = lex.slice();
    Ok(unescape(&slice[1..slice.len() - 1]))
}

/// Consumes a backtick template body from the lexer's remainder.
///
/// The body scan understands nested `${...}` regions, quoted strings inside
/// them, and nested backtick templates, so a body like
/// `` `${a ? "}" : b}` `` terminates at the right backtick.
fn lex_template_str(lex: &mut logos::Lexer<Token>) -> Result<String, LexError> {
    let remainder = lex.remainder();
    let Some(len) = scan_template_body(remainder) else {
        return Err(LexError::UnterminatedTemplate);
    };

    let body = remainder[..len].to_string();
    lex.bump(len + 1); // body plus the closing backtick
    Ok(body)
}

/// Resolves backslash escapes in a quoted string body.
///
/// `\n`, `\r`, and `\t` map to their control characters; any other escaped
/// character stands for itself (`\'`, `\"`, `` \` ``, `\\`, `\$`).
fn unescape(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }

    out
}
