/// The preprocess module normalizes raw template text before parsing.
///
/// Preprocessing collapses line breaks, trims surrounding whitespace, and
/// applies two option-gated sugar rewrites inside expression regions: empty
/// call parentheses receive the whole-context argument, and negative index
/// brackets become from-the-end access chains.
///
/// # Responsibilities
/// - Normalizes raw template text into a single trimmed line.
/// - Rewrites `name()` call sites to pass the context.
/// - Rewrites `[-N]` indexes into `.slice(-N).shift()` chains.
pub mod preprocess;
/// The lexer module tokenizes expression spans for further parsing.
///
/// The lexer (tokenizer) reads the text of one `${...}` span and produces a
/// stream of tokens, each corresponding to meaningful language elements such
/// as numbers, strings, identifiers, operators, and delimiters. This is the
/// first stage of expression interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with byte positions.
/// - Handles numeric, string, and backtick template literals.
/// - Reports lexical errors for invalid or malformed input.
pub mod lexer;
/// The template module splits template text into literal and expression
/// spans.
///
/// Splitting decides the evaluation mode: a string that is exactly one
/// `${...}` expression evaluates to that expression's native value, while
/// anything else interpolates every span into a string.
///
/// # Responsibilities
/// - Detects the single-expression shape and parses its interior.
/// - Scans interpolation text for balanced `${...}` regions.
/// - Provides the containment scanners shared with the lexer.
pub mod template;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the token stream produced by the lexer and constructs
/// an AST that represents the syntactic structure of one expression. This
/// enables the security gate and evaluator to analyze and execute it.
///
/// # Responsibilities
/// - Converts tokens into structured AST nodes.
/// - Validates correct grammar and syntax, reporting errors with position
///   info.
/// - Supports member chains, calls, lambdas, literals, and the operator
///   ladder.
pub mod parser;
/// The security module vets parsed templates before evaluation.
///
/// The gate walks the AST looking for bindings that would reach module
/// loading or host internals if the expression language ever grew such
/// capabilities, and rejects the template outright when it finds any.
///
/// # Responsibilities
/// - Rejects module-loading bindings with a dedicated error.
/// - Aggregates every other flagged binding into one report.
/// - Recurses into lambda bodies, dynamic keys, and nested templates.
pub mod security;
/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator traverses the AST, evaluates expressions against the
/// context, performs the logical and additive operations, applies calls and
/// member accesses, and produces results. It is the core execution engine of
/// the resolver.
///
/// # Responsibilities
/// - Evaluates AST nodes, performing all supported operations.
/// - Tolerates missing data by producing the undefined value.
/// - Reports runtime errors such as calling a non-callable.
pub mod evaluator;
/// The value module defines the runtime data types for evaluation.
///
/// This module declares all the value types produced during evaluation, such
/// as booleans, numbers, strings, sequences, mappings, and callables. It
/// also provides the string rendering rules interpolation relies on.
///
/// # Responsibilities
/// - Defines the `Value` enum and all supported value variants.
/// - Implements truthiness, equality, and display rules.
/// - Shares aggregate values cheaply between evaluation steps.
pub mod value;
/// The resolver module ties the pipeline together.
///
/// Resolution runs preprocessing, template splitting, the security gate, and
/// evaluation in order, mapping each stage's failure into the public
/// template error type.
///
/// # Responsibilities
/// - Drives one template through every pipeline stage.
/// - Applies the resolve options to preprocessing.
/// - Wraps stage errors for the public API.
pub mod resolver;
