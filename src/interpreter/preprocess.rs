use crate::ResolveOptions;

/// Collapses every run of line-break characters into a single space and
/// trims surrounding whitespace.
///
/// Templates are logically one line; this runs before any other phase so
/// positions reported by later phases refer to the normalized text.
///
/// # Example
/// ```
/// use templex::interpreter::preprocess::normalize;
///
/// assert_eq!(normalize("first\r\nsecond "), "first second");
/// ```
#[must_use]
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_break = false;

    for ch in text.chars() {
        if ch == '\r' || ch == '\n' {
            if !in_break {
                out.push(' ');
                in_break = true;
            }
        } else {
            out.push(ch);
            in_break = false;
        }
    }

    out.trim().to_string()
}

/// The containment region the sugar scanner is currently inside.
///
/// Rewrites are only legal in `Expr` regions; literal template text, quoted
/// strings, and backtick bodies pass through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Region {
    /// Top-level template text.
    Text,
    /// A backtick template body nested inside an expression.
    Tmpl,
    /// Expression text between `${` and its matching `}`.
    Expr {
        /// Open-brace depth within the expression.
        braces: usize,
    },
    /// A quoted string inside an expression.
    Quote(u8),
}

/// Applies the optional syntactic rewrites to normalized template text.
///
/// Two rewrites exist, each behind its flag:
/// - `pass_context_to_empty_functions`: `name()` becomes `name(#ctx)`, so a
///   zero-argument call on a named callable receives the whole context as
///   its sole argument.
/// - `transform_array_negative_index`: `name[-2]` (whitespace-tolerant)
///   becomes `name.slice(-2).shift()`, the slice-from-end accessor form
///   served by the built-in sequence methods.
///
/// The scan is a single bounded pass that tracks containment, so neither
/// rewrite fires inside literal text, quoted strings, or the literal parts
/// of nested backtick templates. Only ASCII characters participate in any
/// state change, which keeps the byte-wise scan sound for arbitrary UTF-8.
///
/// # Example
/// ```
/// use templex::{ResolveOptions, interpreter::preprocess::apply_sugar};
///
/// let opts = ResolveOptions::default();
/// assert_eq!(apply_sugar("${test()[-1]}", &opts),
///            "${test(#ctx).slice(-1).shift()}");
/// assert_eq!(apply_sugar("literal[-1] and ${'quoted[-1]'}", &opts),
///            "literal[-1] and ${'quoted[-1]'}");
/// ```
#[must_use]
pub fn apply_sugar(text: &str, options: &ResolveOptions) -> String {
    if !options.pass_context_to_empty_functions && !options.transform_array_negative_index {
        return text.to_string();
    }

    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len() + 16);
    let mut stack = vec![Region::Text];
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];

        // Copy multi-byte characters through whole; they never change state.
        if b >= 0x80 {
            let start = i;
            i += 1;
            while i < bytes.len() && (bytes[i] & 0xC0) == 0x80 {
                i += 1;
            }
            out.push_str(&text[start..i]);
            continue;
        }

        let region = match stack.last() {
            Some(region) => *region,
            None => Region::Text,
        };

        match region {
            Region::Text | Region::Tmpl => {
                if b == b'\\' && region == Region::Tmpl {
                    out.push(b as char);
                    // Only an ASCII escapee needs consuming here; a
                    // multi-byte one cannot change state and the main loop
                    // copies it whole.
                    if bytes.get(i + 1).is_some_and(|next| *next < 0x80) {
                        i += 1;
                        out.push(bytes[i] as char);
                    }
                } else if b == b'`' && region == Region::Tmpl {
                    out.push('`');
                    stack.pop();
                } else if b == b'$' && bytes.get(i + 1) == Some(&b'{') {
                    out.push_str("${");
                    stack.push(Region::Expr { braces: 0 });
                    i += 1;
                } else {
                    out.push(b as char);
                }
            },

            Region::Expr { braces } => match b {
                b'\'' | b'"' => {
                    out.push(b as char);
                    stack.push(Region::Quote(b));
                },
                b'`' => {
                    out.push('`');
                    stack.push(Region::Tmpl);
                },
                b'{' => {
                    out.push('{');
                    stack.pop();
                    stack.push(Region::Expr { braces: braces + 1 });
                },
                b'}' => {
                    out.push('}');
                    stack.pop();
                    if braces > 0 {
                        stack.push(Region::Expr { braces: braces - 1 });
                    }
                },
                b'(' if options.pass_context_to_empty_functions
                        && bytes.get(i + 1) == Some(&b')')
                        && i > 0
                        && is_ident_byte(bytes[i - 1]) =>
                {
                    out.push_str("(#ctx)");
                    i += 1;
                },
                b'[' if options.transform_array_negative_index => {
                    if let Some((digits, consumed)) = match_negative_index(&bytes[i + 1..]) {
                        out.push_str(".slice(-");
                        out.push_str(&digits);
                        out.push_str(").shift()");
                        i += consumed;
                    } else {
                        out.push('[');
                    }
                },
                _ => out.push(b as char),
            },

            Region::Quote(quote) => {
                out.push(b as char);
                if b == b'\\' {
                    if bytes.get(i + 1).is_some_and(|next| *next < 0x80) {
                        i += 1;
                        out.push(bytes[i] as char);
                    }
                } else if b == quote {
                    stack.pop();
                }
            },
        }

        i += 1;
    }

    out
}

/// Matches `\s*-\s*[0-9]+\s*]` right after an opening bracket.
///
/// Returns the digit text and the byte count consumed including the closing
/// bracket. The lookahead is bounded by the pattern itself, so the overall
/// scan stays linear even on adversarial bracket runs.
fn match_negative_index(rest: &[u8]) -> Option<(String, usize)> {
    let mut j = 0;

    while rest.get(j) == Some(&b' ') || rest.get(j) == Some(&b'\t') {
        j += 1;
    }
    if rest.get(j) != Some(&b'-') {
        return None;
    }
    j += 1;
    while rest.get(j) == Some(&b' ') || rest.get(j) == Some(&b'\t') {
        j += 1;
    }

    let digits_start = j;
    while rest.get(j).is_some_and(u8::is_ascii_digit) {
        j += 1;
    }
    if j == digits_start {
        return None;
    }
    let digits_end = j;

    while rest.get(j) == Some(&b' ') || rest.get(j) == Some(&b'\t') {
        j += 1;
    }
    if rest.get(j) != Some(&b']') {
        return None;
    }

    let digits = rest[digits_start..digits_end].iter().map(|b| *b as char).collect();
    Some((digits, j + 1))
}

/// Tests whether a byte can end an identifier, for the empty-call rewrite's
/// adjacency requirement.
const fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}
