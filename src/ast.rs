/// Represents a binary operator.
///
/// The operator set is deliberately small: short-circuit logic, equality, and
/// the additive pair. There is no relational or multiplicative tier in the
/// template grammar.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Logical OR (`||`), value-returning with short-circuit.
    Or,
    /// Logical AND (`&&`), value-returning with short-circuit.
    And,
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
    /// Addition or string concatenation (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
}

/// Represents a unary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Arithmetic negation (e.g. `-x`).
    Negate,
    /// Logical NOT (e.g. `!x`).
    Not,
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let operator = match self {
            Self::Or => "||",
            Self::And => "&&",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Add => "+",
            Self::Sub => "-",
        };
        write!(f, "{operator}")
    }
}

/// The key of a member/index access, as written at the access site.
///
/// Static names come from `.name` postfixes, static indexes from brackets
/// holding a bare non-negative number literal, and everything else in
/// brackets is a dynamic key evaluated against the context.
#[derive(Debug, Clone, PartialEq)]
pub enum MemberKey {
    /// Static property name: `target.name`.
    Name(String),
    /// Static numeric index: `target[3]`.
    Index(f64),
    /// Dynamic key expression: `target[expr]`.
    Dynamic(Box<Expr>),
}

/// One `key: value` entry of an object literal.
///
/// The shorthand form `{name}` is desugared at parse time into
/// `name: <identifier lookup of name>`, so the evaluator only ever sees the
/// explicit form.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectEntry {
    /// The literal key text.
    pub key:   String,
    /// The value expression.
    pub value: Expr,
}

/// An abstract syntax tree (AST) node representing one template expression.
///
/// `Expr` covers every construct the template grammar admits: literals,
/// identifiers, member/index chains, calls, lambdas, the logical and additive
/// operators, and the ternary conditional. Each node carries the byte
/// position of its first token within the preprocessed template, used for
/// error reporting (templates are single-line after normalization, so a byte
/// position replaces the line number an interpreter over multi-line sources
/// would carry).
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// The `null` literal.
    Null {
        /// Byte position in the preprocessed template.
        pos: usize,
    },
    /// A boolean literal: `true` or `false`.
    Bool {
        /// The literal value.
        value: bool,
        /// Byte position in the preprocessed template.
        pos:   usize,
    },
    /// A numeric literal, including `0x`/`0o`/`0b` radix forms.
    Number {
        /// The literal value.
        value: f64,
        /// Byte position in the preprocessed template.
        pos:   usize,
    },
    /// A single- or double-quoted string literal.
    Str {
        /// The unescaped string contents.
        value: String,
        /// Byte position in the preprocessed template.
        pos:   usize,
    },
    /// A backtick-quoted string whose body is itself a template.
    TemplateStr {
        /// The parsed body template.
        template: Template,
        /// Byte position in the preprocessed template.
        pos:      usize,
    },
    /// An array literal: `[e, e, ...]`.
    Array {
        /// Element expressions, in source order.
        elements: Vec<Self>,
        /// Byte position in the preprocessed template.
        pos:      usize,
    },
    /// An object literal: `{k: e, ...}`.
    Object {
        /// Key/value entries, in source order.
        entries: Vec<ObjectEntry>,
        /// Byte position in the preprocessed template.
        pos:     usize,
    },
    /// Reference to a top-level context binding by name.
    Identifier {
        /// Name of the binding.
        name: String,
        /// Byte position in the preprocessed template.
        pos:  usize,
    },
    /// The internal `#ctx` token: the whole context as a mapping value.
    /// Inserted by the implicit-context preprocessor rewrite.
    ContextRef {
        /// Byte position in the preprocessed template.
        pos: usize,
    },
    /// A member or index access: `target.name`, `target[expr]`.
    Member {
        /// The expression being accessed.
        target: Box<Self>,
        /// The access key.
        key:    MemberKey,
        /// Byte position in the preprocessed template.
        pos:    usize,
    },
    /// A call: `callee(arg, arg, ...)`.
    Call {
        /// The expression that must evaluate to a callable.
        callee:    Box<Self>,
        /// Argument expressions, in source order.
        arguments: Vec<Self>,
        /// Byte position in the preprocessed template.
        pos:       usize,
    },
    /// A single-expression lambda: `p => body` or `(p, q) => { return body; }`.
    Lambda {
        /// Parameter names, in source order.
        params: Vec<String>,
        /// The body expression.
        body:   Box<Self>,
        /// Byte position in the preprocessed template.
        pos:    usize,
    },
    /// A unary operation.
    Unary {
        /// The unary operator to apply.
        op:   UnaryOperator,
        /// The operand expression.
        expr: Box<Self>,
        /// Byte position in the preprocessed template.
        pos:  usize,
    },
    /// A binary operation.
    Binary {
        /// Left operand.
        left:  Box<Self>,
        /// The operator.
        op:    BinaryOperator,
        /// Right operand.
        right: Box<Self>,
        /// Byte position in the preprocessed template.
        pos:   usize,
    },
    /// A conditional expression: `cond ? then : else`.
    Ternary {
        /// The condition expression.
        condition:   Box<Self>,
        /// Expression evaluated if the condition is truthy.
        then_branch: Box<Self>,
        /// Expression evaluated if the condition is falsy.
        else_branch: Box<Self>,
        /// Byte position in the preprocessed template.
        pos:         usize,
    },
}

impl Expr {
    /// Gets the byte position from `self`.
    /// ## Example
    /// ```
    /// use templex::ast::Expr;
    ///
    /// let expr = Expr::Identifier { name: "x".to_string(),
    ///                               pos:  5, };
    ///
    /// assert_eq!(expr.position(), 5);
    /// ```
    #[must_use]
    pub const fn position(&self) -> usize {
        match self {
            Self::Null { pos }
            | Self::Bool { pos, .. }
            | Self::Number { pos, .. }
            | Self::Str { pos, .. }
            | Self::TemplateStr { pos, .. }
            | Self::Array { pos, .. }
            | Self::Object { pos, .. }
            | Self::Identifier { pos, .. }
            | Self::ContextRef { pos }
            | Self::Member { pos, .. }
            | Self::Call { pos, .. }
            | Self::Lambda { pos, .. }
            | Self::Unary { pos, .. }
            | Self::Binary { pos, .. }
            | Self::Ternary { pos, .. } => *pos,
        }
    }
}

/// A literal or expression segment of a parsed template, in left-to-right
/// order.
#[derive(Debug, Clone, PartialEq)]
pub enum Span {
    /// Verbatim text outside any expression delimiter.
    Literal(String),
    /// One parsed `${...}` expression.
    Expression(Expr),
}

/// An ordered sequence of spans, plus the evaluation mode the delimiter
/// layout selected.
///
/// When `single` is set the template consisted of exactly one expression
/// spanning the whole string, and evaluation preserves that expression's
/// native type. Otherwise evaluation interpolates every span into a string.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    /// The spans, in source order.
    pub spans:  Vec<Span>,
    /// Whether the template is in single-expression mode.
    pub single: bool,
}
