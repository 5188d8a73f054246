use std::iter::Peekable;

use crate::{
    ast::{Expr, MemberKey, ObjectEntry, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, parse_expression},
            utils::{parse_comma_separated, parse_identifier},
        },
        template::parse_template,
    },
};

/// Parses a unary expression.
///
/// Supports prefix operators:
/// - `-`  (numeric negation)
/// - `!`  (logical not)
///
/// Unary operators are right-associative, so an input like `!-x` is parsed as
/// `!( -x )`.
///
/// If no unary operator is present, the function delegates to
/// [`parse_primary`] and then applies any postfix operators via
/// [`parse_postfix`].
///
/// Grammar:
/// ```text
///     unary := ("-" | "!") unary
///            | primary postfix*
/// ```
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
///
/// # Returns
/// An [`Expr::Unary`] or a primary expression possibly followed by postfixes.
pub(crate) fn parse_unary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some((Token::Minus, pos)) = tokens.peek() {
        let pos = *pos;
        tokens.next();
        let expr = parse_unary(tokens)?;
        Ok(Expr::Unary { op: UnaryOperator::Negate,
                         expr: Box::new(expr),
                         pos })
    } else if let Some((Token::Bang, pos)) = tokens.peek() {
        let pos = *pos;
        tokens.next();
        let expr = parse_unary(tokens)?;
        Ok(Expr::Unary { op: UnaryOperator::Not,
                         expr: Box::new(expr),
                         pos })
    } else {
        let primary = parse_primary(tokens)?;
        parse_postfix(tokens, primary)
    }
}

/// Parses a primary (atomic) expression.
///
/// Primary expressions form the base of the expression grammar and include:
/// - `null`, boolean, numeric, and string literals
/// - backtick template strings
/// - identifiers
/// - the whole-context token
/// - lambdas (`x => body`, `(a, b) => body`)
/// - parenthesized expressions
/// - array literals (`[ ... ]`)
/// - object literals (`{ ... }`)
///
/// This function does not handle unary or postfix operators. It dispatches
/// to specialized parsing functions depending on the leading token.
///
/// Grammar (simplified):
/// ```text
///     primary := literal
///              | template_string
///              | identifier
///              | lambda
///              | "(" expression ")"
///              | "[" elements "]"
///              | "{" entries "}"
/// ```
/// # Parameters
/// - `tokens`: Token iterator positioned at the start of a primary expression.
///
/// # Returns
/// The parsed primary [`Expr`] or a `ParseError` on failure.
pub(crate) fn parse_primary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let peeked = tokens.peek()
                       .ok_or(ParseError::UnexpectedEndOfInput { pos: 0 })?;

    match peeked {
        (Token::Null | Token::Bool(_) | Token::Number(_) | Token::Str(_), _) => {
            parse_literal(tokens)
        },
        (Token::TemplateStr(_), _) => parse_template_string(tokens),
        (Token::ContextRef, pos) => {
            let pos = *pos;
            tokens.next();
            Ok(Expr::ContextRef { pos })
        },
        (Token::Identifier(_), _) => parse_identifier_or_lambda(tokens),
        (Token::LParen, _) => parse_grouping_or_lambda(tokens),
        (Token::LBracket, _) => parse_array_literal(tokens),
        (Token::LBrace, _) => parse_object_literal(tokens),
        (tok, pos) => Err(ParseError::UnexpectedToken { token: format!("{tok:?}"),
                                                        pos:   *pos, }),
    }
}

/// Parses postfix operators applied to an expression.
///
/// This function is called after parsing a primary expression and handles
/// three kinds of postfix constructs:
///
/// 1. **Static member access** `expr.name`
/// 2. **Bracket access** `expr[key]`
///
///    A bare string literal in brackets is a static name and a bare
///    non-negative number literal is a static index; anything else is a
///    dynamic key evaluated later. Empty brackets are a parse error.
/// 3. **Calls** `expr(arg, ...)`
///
/// Parsing continues until no further postfix operator is found, so chains
/// like `a.b[0].c()` fold left to right.
///
/// Grammar:
/// ```text
///     postfix := primary
///              | postfix "." IDENTIFIER
///              | postfix "[" expression "]"
///              | postfix "(" arguments ")"
/// ```
/// # Parameters
/// - `tokens`: Token iterator after a primary expression.
/// - `node`: The expression to which postfix operators will be applied.
///
/// # Returns
/// An updated [`Expr`] with all postfix operators folded in.
///
/// # Errors
/// Returns a `ParseError` if:
/// - `.` is not followed by an identifier,
/// - a `[` is not properly closed with `]`, or encloses nothing,
/// - call arguments fail to parse.
fn parse_postfix<'a, I>(tokens: &mut Peekable<I>, mut node: Expr) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    loop {
        // Static member access.
        if let Some((Token::Dot, pos)) = tokens.peek() {
            let pos = *pos;
            tokens.next();
            let name = parse_identifier(tokens)?;
            node = Expr::Member { target: Box::new(node),
                                  key:    MemberKey::Name(name),
                                  pos };
            continue;
        }

        // Bracket access.
        if let Some((Token::LBracket, pos)) = tokens.peek() {
            let pos = *pos;
            tokens.next();

            if let Some((Token::RBracket, _)) = tokens.peek() {
                return Err(ParseError::EmptyIndex { pos });
            }

            let key_expr = parse_expression(tokens)?;
            match tokens.next() {
                Some((Token::RBracket, _)) => {},
                _ => {
                    return Err(ParseError::UnexpectedToken { token: "Expected ']' after index.".to_string(),
                                                             pos });
                },
            }

            let key = match key_expr {
                Expr::Number { value, .. } => MemberKey::Index(value),
                Expr::Str { value, .. } => MemberKey::Name(value),
                other => MemberKey::Dynamic(Box::new(other)),
            };
            node = Expr::Member { target: Box::new(node),
                                  key,
                                  pos };
            continue;
        }

        // Call.
        if let Some((Token::LParen, pos)) = tokens.peek() {
            let pos = *pos;
            tokens.next();
            let args = parse_comma_separated(tokens, parse_expression, &Token::RParen)?;
            node = Expr::Call { callee:    Box::new(node),
                                arguments: args,
                                pos };
            continue;
        }

        break;
    }
    Ok(node)
}

/// Parses a `null`, boolean, numeric, or string literal.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at a literal.
///
/// # Returns
/// The matching literal [`Expr`] node.
fn parse_literal<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.next() {
        Some((Token::Null, pos)) => Ok(Expr::Null { pos: *pos }),
        Some((Token::Bool(b), pos)) => Ok(Expr::Bool { value: *b,
                                                       pos:   *pos, }),
        Some((Token::Number(n), pos)) => Ok(Expr::Number { value: *n,
                                                           pos:   *pos, }),
        Some((Token::Str(s), pos)) => Ok(Expr::Str { value: s.clone(),
                                                     pos:   *pos, }),
        Some((tok, pos)) => Err(ParseError::UnexpectedToken { token: format!("{tok:?}"),
                                                              pos:   *pos, }),
        None => Err(ParseError::UnexpectedEndOfInput { pos: 0 }),
    }
}

/// Parses a backtick template string literal.
///
/// The lexer delivers the raw body text between the backticks; this function
/// parses it as a full nested template, so `${...}` occurrences inside the
/// body evaluate against the same context as the enclosing expression.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at a template string token.
///
/// # Returns
/// An [`Expr::TemplateStr`] node holding the parsed body template.
fn parse_template_string<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.next() {
        Some((Token::TemplateStr(body), pos)) => {
            let template = parse_template(body)?;
            Ok(Expr::TemplateStr { template,
                                   pos: *pos })
        },
        Some((tok, pos)) => Err(ParseError::UnexpectedToken { token: format!("{tok:?}"),
                                                              pos:   *pos, }),
        None => Err(ParseError::UnexpectedEndOfInput { pos: 0 }),
    }
}

/// Parses an identifier, or a single-parameter lambda.
///
/// Supported forms:
///
/// - `identifier`
/// - `identifier => body`
///
/// The function consumes the identifier token. If the next token is `=>`,
/// the identifier becomes the sole lambda parameter and the lambda body is
/// parsed. Otherwise it is a context binding reference; calls and member
/// accesses are applied later by the postfix loop.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at an identifier.
///
/// # Returns
/// - [`Expr::Lambda`] if followed by `=>`,
/// - [`Expr::Identifier`] otherwise.
fn parse_identifier_or_lambda<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (name, pos) = match tokens.next() {
        Some((Token::Identifier(n), pos)) => (n.clone(), *pos),
        Some((tok, pos)) => {
            return Err(ParseError::UnexpectedToken { token: format!("{tok:?}"),
                                                     pos:   *pos, });
        },
        None => {
            return Err(ParseError::UnexpectedEndOfInput { pos: 0 });
        },
    };

    if let Some((Token::Arrow, _)) = tokens.peek() {
        tokens.next();
        let body = parse_lambda_body(tokens, pos)?;
        return Ok(Expr::Lambda { params: vec![name],
                                 body: Box::new(body),
                                 pos });
    }

    Ok(Expr::Identifier { name, pos })
}

/// Parses a parenthesized expression or a parenthesized-parameter lambda.
///
/// Both forms start with `(`, so a bounded lookahead decides which one this
/// is: a parameter list is zero or more identifiers separated by commas,
/// closed by `)` and followed by `=>`. Anything else is a grouping.
///
/// Grammar:
/// ```text
///     grouping := "(" expression ")"
///     lambda   := "(" (IDENTIFIER ("," IDENTIFIER)*)? ")" "=>" lambda_body
/// ```
/// # Parameters
/// - `tokens`: Token iterator positioned at `(`.
///
/// # Returns
/// The inner expression as-is for a grouping (no wrapper node), or an
/// [`Expr::Lambda`].
fn parse_grouping_or_lambda<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let pos = match tokens.next() {
        Some((Token::LParen, pos)) => *pos,
        Some((tok, pos)) => {
            return Err(ParseError::UnexpectedToken { token: format!("Expected '(', found {tok:?}"),
                                                     pos:   *pos, });
        },
        None => return Err(ParseError::UnexpectedEndOfInput { pos: 0 }),
    };

    if lambda_params_ahead(tokens.clone()) {
        let params = parse_comma_separated(tokens, parse_identifier, &Token::RParen)?;
        match tokens.next() {
            Some((Token::Arrow, _)) => {},
            _ => {
                return Err(ParseError::UnexpectedToken { token: "Expected '=>' after lambda parameters.".to_string(),
                                                         pos });
            },
        }
        let body = parse_lambda_body(tokens, pos)?;
        return Ok(Expr::Lambda { params,
                                 body: Box::new(body),
                                 pos });
    }

    let expr = parse_expression(tokens)?;
    match tokens.next() {
        Some((Token::RParen, _)) => Ok(expr),
        _ => {
            Err(ParseError::UnexpectedToken { token: "Expected ')' after expression.".to_string(),
                                              pos })
        },
    }
}

/// Decides whether the tokens after an already-consumed `(` form a lambda
/// parameter list.
///
/// The check consumes nothing from the caller's iterator; it walks a clone
/// of it, accepting `)` immediately (zero parameters) or identifiers
/// separated by commas, and requires `=>` right after the closing paren.
fn lambda_params_ahead<'a, I>(mut tokens: Peekable<I>) -> bool
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.next() {
        Some((Token::RParen, _)) => {},
        Some((Token::Identifier(_), _)) => {
            loop {
                match tokens.next() {
                    Some((Token::RParen, _)) => break,
                    Some((Token::Comma, _)) => match tokens.next() {
                        Some((Token::Identifier(_), _)) => {},
                        _ => return false,
                    },
                    _ => return false,
                }
            }
        },
        _ => return false,
    }

    matches!(tokens.next(), Some((Token::Arrow, _)))
}

/// Parses a lambda body, which is either a bare expression or a block.
///
/// Supported forms:
///
/// - `expression`
/// - `{ return expression }` (an optional `;` may follow the expression)
///
/// A block without a `return` statement has no value to produce, so it is
/// rejected with `MissingReturn`.
///
/// # Parameters
/// - `tokens`: Token iterator positioned after `=>`.
/// - `pos`: Position of the lambda, for end-of-input errors.
///
/// # Returns
/// The body expression.
fn parse_lambda_body<'a, I>(tokens: &mut Peekable<I>, pos: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let brace_pos = match tokens.peek() {
        Some((Token::LBrace, pos)) => *pos,
        _ => return parse_expression(tokens),
    };
    tokens.next(); // consume '{'

    match tokens.next() {
        Some((Token::Return, _)) => {},
        Some(_) | None => return Err(ParseError::MissingReturn { pos: brace_pos }),
    }

    let body = parse_expression(tokens)?;

    if let Some((Token::Semicolon, _)) = tokens.peek() {
        tokens.next();
    }

    match tokens.next() {
        Some((Token::RBrace, _)) => Ok(body),
        Some((tok, pos)) => {
            Err(ParseError::UnexpectedToken { token: format!("Expected '}}' after return, found {tok:?}"),
                                              pos:   *pos, })
        },
        None => Err(ParseError::UnexpectedEndOfInput { pos }),
    }
}

/// Parses an array literal of the form `[expr1, expr2, ..., exprN]`.
///
/// Elements are parsed using `parse_expression`, separated by commas. An
/// empty array `[]` is accepted.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at `[`.
///
/// # Returns
/// An [`Expr::Array`] node containing the parsed elements.
///
/// # Errors
/// Returns a `ParseError` if:
/// - elements cannot be parsed,
/// - the closing `]` is missing.
fn parse_array_literal<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let pos = match tokens.next() {
        Some((Token::LBracket, pos)) => *pos,
        _ => return Err(ParseError::UnexpectedEndOfInput { pos: 0 }),
    };
    let elements = parse_comma_separated(tokens, parse_expression, &Token::RBracket)?;
    Ok(Expr::Array { elements, pos })
}

/// Parses an object literal of the form `{ key: value, ... }`.
///
/// Keys are identifiers or quoted strings. The shorthand form `{name}`
/// desugars to `name: name` at parse time, so the evaluator only ever sees
/// explicit entries. An empty object `{}` is accepted.
///
/// Grammar:
/// ```text
///     object := "{" (entry ("," entry)*)? "}"
///     entry  := (IDENTIFIER | STRING) ":" expression
///             | IDENTIFIER
/// ```
/// # Parameters
/// - `tokens`: Token iterator positioned at `{`.
///
/// # Returns
/// An [`Expr::Object`] node with its entries in source order.
///
/// # Errors
/// Returns a `ParseError` if:
/// - a key is neither an identifier nor a string,
/// - a value fails to parse,
/// - the closing `}` is missing.
fn parse_object_literal<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let pos = match tokens.next() {
        Some((Token::LBrace, pos)) => *pos,
        _ => return Err(ParseError::UnexpectedEndOfInput { pos: 0 }),
    };
    let entries = parse_comma_separated(tokens, parse_object_entry, &Token::RBrace)?;
    Ok(Expr::Object { entries, pos })
}

/// Parses one `key: value` entry of an object literal, including the
/// shorthand form.
fn parse_object_entry<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<ObjectEntry>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (key, pos, shorthand_ok) = match tokens.next() {
        Some((Token::Identifier(name), pos)) => (name.clone(), *pos, true),
        Some((Token::Str(s), pos)) => (s.clone(), *pos, false),
        Some((tok, pos)) => {
            return Err(ParseError::UnexpectedToken { token: format!("Expected object key, found {tok:?}"),
                                                     pos:   *pos, });
        },
        None => return Err(ParseError::UnexpectedEndOfInput { pos: 0 }),
    };

    match tokens.peek() {
        Some((Token::Colon, _)) => {
            tokens.next();
            let value = parse_expression(tokens)?;
            Ok(ObjectEntry { key, value })
        },
        _ if shorthand_ok => {
            let value = Expr::Identifier { name: key.clone(),
                                           pos };
            Ok(ObjectEntry { key, value })
        },
        Some((tok, pos)) => {
            Err(ParseError::UnexpectedToken { token: format!("Expected ':' after object key, found {tok:?}"),
                                              pos:   *pos, })
        },
        None => Err(ParseError::UnexpectedEndOfInput { pos }),
    }
}
