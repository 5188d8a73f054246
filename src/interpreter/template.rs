use crate::{
    ast::{Span, Template},
    error::ParseError,
    interpreter::parser::core::parse_expression_text,
};

/// Parses preprocessed template text into its span sequence.
///
/// Mode selection follows the outermost delimiter pair: when the first `${`
/// starts the string and the last matching `}` ends it, the whole template
/// is one expression and evaluation preserves its native type. Any other
/// layout is interpolation mode, where each `${...}` occurrence is parsed
/// left to right and the result is always a string.
///
/// A single-expression interior that fails to parse (e.g. `${a}${b}`, whose
/// interior `a}${b` is not an expression) is re-split in interpolation mode
/// instead of failing; errors from the re-split are final.
///
/// # Errors
/// Returns a `ParseError` for unterminated delimiters, empty expressions,
/// and malformed expression spans.
pub fn parse_template(text: &str) -> Result<Template, ParseError> {
    if has_single_expression_shape(text)
       && let Ok(expr) = parse_expression_text(&text[2..text.len() - 1], 2)
    {
        return Ok(Template { spans:  vec![Span::Expression(expr)],
                             single: true, });
    }

    split_interpolation(text)
}

/// Tests whether the outermost delimiter pair spans the entire string.
fn has_single_expression_shape(text: &str) -> bool {
    text.starts_with("${") && text.ends_with('}') && text.len() > 2
}

/// Splits template text into alternating literal and expression spans,
/// parsing each expression interior.
fn split_interpolation(text: &str) -> Result<Template, ParseError> {
    let bytes = text.as_bytes();
    let mut spans = Vec::new();
    let mut literal_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'$' || bytes.get(i + 1) != Some(&b'{') {
            i += 1;
            continue;
        }

        let close = find_expression_close(text, i + 2)
            .ok_or(ParseError::UnterminatedExpression { pos: i })?;

        if i > literal_start {
            spans.push(Span::Literal(text[literal_start..i].to_string()));
        }

        let interior = &text[i + 2..close];
        if interior.trim().is_empty() {
            return Err(ParseError::EmptyExpression { pos: i });
        }
        spans.push(Span::Expression(parse_expression_text(interior, i + 2)?));

        i = close + 1;
        literal_start = i;
    }

    if literal_start < text.len() || spans.is_empty() {
        spans.push(Span::Literal(text[literal_start..].to_string()));
    }

    Ok(Template { spans, single: false })
}

/// One frame of the containment scanner.
///
/// The scanner walks template or expression text while tracking what kind of
/// region it is inside, so delimiter characters inside quoted strings,
/// nested templates, or object-literal braces are never mistaken for span
/// boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanFrame {
    /// Template text; `${` opens an expression, a backtick closes the frame.
    Template,
    /// Expression text; tracks unmatched `{` so object literals do not end
    /// the span early.
    Expr {
        /// Open-brace depth within the expression.
        braces: usize,
    },
    /// A quoted string with the given quote character.
    Quote(char),
}

/// Finds the byte length of a backtick template body.
///
/// `text` starts immediately after the opening backtick; the returned length
/// excludes the closing backtick. Returns `None` when the body never closes.
pub(crate) fn scan_template_body(text: &str) -> Option<usize> {
    run_scan(text, ScanFrame::Template)
}

/// Finds the byte index of the `}` closing an expression span.
///
/// `from` points just past the opening `${`. Returns `None` when the span
/// never closes.
pub(crate) fn find_expression_close(text: &str, from: usize) -> Option<usize> {
    run_scan(&text[from..], ScanFrame::Expr { braces: 0 }).map(|i| from + i)
}

/// Runs the containment state machine until the initial frame closes,
/// returning the byte index of the closing character.
fn run_scan(text: &str, initial: ScanFrame) -> Option<usize> {
    let mut stack = vec![initial];
    let mut chars = text.char_indices().peekable();

    while let Some((i, ch)) = chars.next() {
        match *stack.last()? {
            ScanFrame::Template => match ch {
                '\\' => {
                    chars.next();
                },
                '`' => {
                    if stack.len() == 1 {
                        return Some(i);
                    }
                    stack.pop();
                },
                '$' if chars.peek().map(|(_, c)| *c) == Some('{') => {
                    chars.next();
                    stack.push(ScanFrame::Expr { braces: 0 });
                },
                _ => {},
            },

            ScanFrame::Expr { braces } => match ch {
                '\'' | '"' => stack.push(ScanFrame::Quote(ch)),
                '`' => stack.push(ScanFrame::Template),
                '{' => {
                    stack.pop();
                    stack.push(ScanFrame::Expr { braces: braces + 1 });
                },
                '}' => {
                    if braces > 0 {
                        stack.pop();
                        stack.push(ScanFrame::Expr { braces: braces - 1 });
                    } else if stack.len() == 1 {
                        return Some(i);
                    } else {
                        stack.pop();
                    }
                },
                _ => {},
            },

            ScanFrame::Quote(quote) => match ch {
                '\\' => {
                    chars.next();
                },
                c if c == quote => {
                    stack.pop();
                },
                _ => {},
            },
        }
    }

    None
}
