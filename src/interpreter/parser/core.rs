use std::iter::Peekable;

use crate::{
    ast::Expr,
    error::ParseError,
    interpreter::{
        lexer::{Token, tokenize},
        parser::binary::parse_logical_or,
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses the text of one expression span into an AST.
///
/// This is the entry point template splitting uses for both modes: the
/// interior of a single-expression template and each `${...}` occurrence in
/// interpolation mode. The whole span must be consumed; leftover tokens are
/// a parse error rather than silently ignored.
///
/// # Parameters
/// - `source`: The expression text, without its `${` and `}` delimiters.
/// - `offset`: Byte offset of `source` within the preprocessed template,
///   added to every token position.
///
/// # Errors
/// - Lexing failures (unrecognized input, oversized literals, unterminated
///   backtick strings).
/// - `EmptyExpression` when the span holds no tokens at all.
/// - `UnexpectedTrailingTokens` when parsing stops before the span ends.
/// - Any error from expression parsing itself.
pub fn parse_expression_text(source: &str, offset: usize) -> ParseResult<Expr> {
    let tokens = tokenize(source, offset)?;
    if tokens.is_empty() {
        return Err(ParseError::EmptyExpression { pos: offset });
    }

    let mut iter = tokens.iter().peekable();
    let expr = parse_expression(&mut iter)?;

    match iter.next() {
        Some((token, pos)) => Err(ParseError::UnexpectedTrailingTokens { token: format!("{token:?}"),
                                                                         pos:   *pos, }),
        None => Ok(expr),
    }
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing.
/// It begins at the lowest-precedence level, the ternary conditional, and
/// recursively descends through the precedence hierarchy.
///
/// Grammar: `expression := logical_or ("?" expression ":" expression)?`
///
/// The ternary is right-associative: both branches are full expressions, so
/// `a ? b : c ? d : e` groups as `a ? b : (c ? d : e)`.
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, position)` pairs.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let condition = parse_logical_or(tokens)?;

    let pos = match tokens.peek() {
        Some((Token::Question, pos)) => *pos,
        _ => return Ok(condition),
    };
    tokens.next(); // consume '?'

    let then_branch = parse_expression(tokens)?;

    match tokens.next() {
        Some((Token::Colon, _)) => {},
        Some((token, pos)) => {
            return Err(ParseError::UnexpectedToken { token: format!("Expected ':' in ternary, found {token:?}"),
                                                     pos:   *pos, });
        },
        None => return Err(ParseError::UnexpectedEndOfInput { pos }),
    }

    let else_branch = parse_expression(tokens)?;

    Ok(Expr::Ternary { condition:   Box::new(condition),
                       then_branch: Box::new(then_branch),
                       else_branch: Box::new(else_branch),
                       pos })
}
