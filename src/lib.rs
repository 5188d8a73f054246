//! # templex
//!
//! templex resolves embedded-expression template strings against typed
//! context data. A template like `"http://${variables.host}${pathname}"`
//! interpolates expression results into text, while a template that is
//! exactly one expression, like `"${variables.port}"`, resolves to that
//! expression's native value. Every template passes a security gate before
//! evaluation, and missing data resolves to an undefined value rather than
//! failing.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::interpreter::resolver::resolve_template;

pub use crate::{
    error::TemplateError,
    interpreter::{
        evaluator::core::Context,
        value::core::{Callable, NativeFn, Value},
    },
};

/// Defines the structure of parsed templates.
///
/// This module declares the `Expr` enum and related types that represent the
/// syntactic structure of template expressions as a tree, plus the span
/// types a split template is made of. The AST is built by the parser and
/// traversed by the security gate and the evaluator.
///
/// # Responsibilities
/// - Defines expression node types for all grammar constructs.
/// - Attaches byte positions to AST nodes for error reporting.
/// - Defines the literal/expression span structure of a template.
pub mod ast;
/// Provides unified error types for the whole pipeline.
///
/// This module defines all errors that can be raised while preprocessing,
/// parsing, vetting, or evaluating a template. It standardizes error
/// reporting and carries detailed information about failures, including
/// byte positions for debugging and user feedback.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (parser, security gate,
///   evaluator).
/// - Attaches positions and detailed messages for context.
/// - Supports integration with standard error handling traits.
pub mod error;
/// Orchestrates the entire process of template resolution.
///
/// This module ties together preprocessing, lexing, parsing, the security
/// gate, evaluation, value representations, and error handling to provide a
/// complete pipeline for resolving templates against context data.
///
/// # Responsibilities
/// - Coordinates all core components: preprocessor, lexer, parser, security
///   gate, and evaluator.
/// - Provides the resolution entry point the public API wraps.
/// - Manages the flow of data and errors between stages.
pub mod interpreter;
/// General utilities for safe numeric conversion and helpers.
///
/// This module provides reusable helpers and conversion routines used
/// throughout the parser and evaluator, such as safe conversions between
/// floating-point values and indexes.
///
/// # Responsibilities
/// - Safely convert between `u64`, `usize`, and `f64` without silent data
///   loss.
/// - Resolve signed slice offsets against a length.
pub mod util;

/// Toggles for the preprocessor's sugar rewrites.
///
/// Both rewrites are on by default; they exist as options so a host that
/// wants the literal behavior back can opt out per resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Rewrites empty call parentheses to pass the whole context, so
    /// `services.get()` receives every binding as one mapping argument.
    pub pass_context_to_empty_functions: bool,
    /// Rewrites a negative index like `xs[-2]` into a from-the-end access.
    /// When off, a negative index simply misses and resolves to the
    /// undefined value.
    pub transform_array_negative_index: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self { pass_context_to_empty_functions: true,
               transform_array_negative_index:  true, }
    }
}

/// Resolves a template string against a context, with default options.
///
/// A template that is exactly one `${...}` expression resolves to that
/// expression's native value; anything else interpolates every expression
/// into the surrounding text and resolves to a string. Text without any
/// `${...}` occurrence passes through unchanged.
///
/// # Errors
/// Returns a `TemplateError` if the template fails to parse, is rejected by
/// the security gate, or hits a runtime error during evaluation.
///
/// # Examples
/// ```
/// use templex::{Context, Value, resolve};
///
/// let context = Context::new().with("host", "example.com").with("port", 8080i64);
///
/// let url = resolve("http://${host}:${port}", &context).unwrap();
/// assert_eq!(url, Value::Str("http://example.com:8080".to_string()));
///
/// // A lone expression keeps its native type.
/// let port = resolve("${port}", &context).unwrap();
/// assert_eq!(port, Value::Number(8080.0));
///
/// // Missing data resolves instead of failing.
/// let missing = resolve("${config.timeout}", &context).unwrap();
/// assert_eq!(missing, Value::Undefined);
/// ```
pub fn resolve(template: &str, context: &Context) -> Result<Value, TemplateError> {
    resolve_template(template, context, &ResolveOptions::default())
}

/// Resolves a template string against a context with explicit options.
///
/// # Errors
/// Returns a `TemplateError` if the template fails to parse, is rejected by
/// the security gate, or hits a runtime error during evaluation.
///
/// # Examples
/// ```
/// use templex::{Context, ResolveOptions, Value, resolve_with};
///
/// let context = Context::new().with("items", vec![Value::Number(1.0), Value::Number(2.0)]);
///
/// let options = ResolveOptions { transform_array_negative_index: false,
///                                ..ResolveOptions::default() };
///
/// // With the rewrite disabled, a negative index misses.
/// let last = resolve_with("${items[-1]}", &context, &options).unwrap();
/// assert_eq!(last, Value::Undefined);
/// ```
pub fn resolve_with(template: &str,
                    context: &Context,
                    options: &ResolveOptions)
                    -> Result<Value, TemplateError> {
    resolve_template(template, context, options)
}

/// Resolves a value that may or may not be a template string.
///
/// Strings go through [`resolve`]; every other value is returned unchanged.
/// This is the natural entry point when walking host data structures whose
/// leaves are only sometimes templates.
///
/// # Errors
/// Returns a `TemplateError` if the value is a string and fails to resolve.
///
/// # Examples
/// ```
/// use templex::{Context, Value, resolve_value};
///
/// let context = Context::new().with("name", "world");
///
/// let resolved = resolve_value(&Value::Str("hello ${name}".to_string()), &context).unwrap();
/// assert_eq!(resolved, Value::Str("hello world".to_string()));
///
/// let number = resolve_value(&Value::Number(7.0), &context).unwrap();
/// assert_eq!(number, Value::Number(7.0));
/// ```
pub fn resolve_value(value: &Value, context: &Context) -> Result<Value, TemplateError> {
    match value {
        Value::Str(template) => resolve(template, context),
        other => Ok(other.clone()),
    }
}
