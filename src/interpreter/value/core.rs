use std::{collections::HashMap, fmt, rc::Rc};

use crate::{ast::Expr, error::RuntimeError};

/// A host-provided function exposed to templates through the context.
///
/// Arguments arrive already evaluated, in call order; the function returns a
/// value or a runtime error that fails the whole resolution.
pub type NativeFn = Rc<dyn Fn(&[Value]) -> Result<Value, RuntimeError>>;

/// A lambda value produced by evaluating a lambda expression.
///
/// The body is shared rather than cloned per call, and `captured` holds the
/// local bindings in scope at the point the lambda was evaluated. Context
/// bindings are not captured; they are always live at call time.
#[derive(Debug, Clone, PartialEq)]
pub struct LambdaValue {
    /// Parameter names, in declaration order.
    pub params:   Vec<String>,
    /// The body expression.
    pub body:     Rc<Expr>,
    /// Local bindings captured at evaluation time.
    pub captured: HashMap<String, Value>,
}

/// Represents something a call expression can invoke.
///
/// Besides host functions and template lambdas, sequences expose two bound
/// methods which exist to back the negative-index rewrite: `slice` and
/// `shift`. A bound method carries its receiver, so `xs.slice` is a value in
/// its own right.
#[derive(Clone)]
pub enum Callable {
    /// A host-provided function from the context.
    Native(NativeFn),
    /// A lambda defined inside a template.
    Lambda(Rc<LambdaValue>),
    /// The `slice` method bound to a sequence receiver.
    Slice(Rc<Vec<Value>>),
    /// The `shift` method bound to a sequence receiver.
    Shift(Rc<Vec<Value>>),
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native(_) => write!(f, "Native(..)"),
            Self::Lambda(l) => f.debug_tuple("Lambda").field(l).finish(),
            Self::Slice(_) => write!(f, "Slice(..)"),
            Self::Shift(_) => write!(f, "Shift(..)"),
        }
    }
}

impl PartialEq for Callable {
    /// Callables have no structural identity; two are equal only when they
    /// are the same shared allocation.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Native(a), Self::Native(b)) => Rc::ptr_eq(a, b),
            (Self::Lambda(a), Self::Lambda(b)) => Rc::ptr_eq(a, b),
            (Self::Slice(a), Self::Slice(b)) | (Self::Shift(a), Self::Shift(b)) => {
                Rc::ptr_eq(a, b)
            },
            _ => false,
        }
    }
}

/// Represents a runtime value in the resolver.
///
/// This enum models all the possible types a template expression can
/// produce: the two absent-value markers, scalars, aggregates, and
/// callables. Aggregates are shared so member access and argument passing
/// never deep-copy them.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The explicit `null` literal.
    Null,
    /// The absent value: missing bindings, out-of-range indexes, and member
    /// access on scalars all produce it.
    Undefined,
    /// A boolean value (`true` or `false`).
    Bool(bool),
    /// A numeric value (double precision floating-point).
    Number(f64),
    /// A string value.
    Str(String),
    /// An ordered sequence of values.
    Sequence(Rc<Vec<Self>>),
    /// A string-keyed mapping of values.
    Mapping(Rc<HashMap<String, Self>>),
    /// A callable value.
    Callable(Callable),
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<i64> for Value {
    #[allow(clippy::cast_precision_loss)]
    fn from(v: i64) -> Self {
        Self::Number(v as f64)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::Sequence(Rc::new(v))
    }
}

impl From<HashMap<String, Self>> for Value {
    fn from(v: HashMap<String, Self>) -> Self {
        Self::Mapping(Rc::new(v))
    }
}

impl Value {
    /// Wraps a host function as a callable value.
    ///
    /// # Example
    /// ```
    /// use templex::interpreter::value::core::Value;
    ///
    /// let double = Value::native(|args| {
    ///     match args.first() {
    ///         Some(Value::Number(n)) => Ok(Value::Number(n * 2.0)),
    ///         _ => Ok(Value::Undefined),
    ///     }
    /// });
    ///
    /// assert_eq!(double.kind(), "function");
    /// ```
    pub fn native(f: impl Fn(&[Self]) -> Result<Self, RuntimeError> + 'static) -> Self {
        Self::Callable(Callable::Native(Rc::new(f)))
    }

    /// Determines the truthiness of the value.
    ///
    /// `Null`, `Undefined`, `false`, zero, `NaN`, and the empty string are
    /// falsy; everything else, including empty sequences and mappings, is
    /// truthy.
    ///
    /// # Example
    /// ```
    /// use templex::interpreter::value::core::Value;
    ///
    /// assert!(!Value::Undefined.truthy());
    /// assert!(!Value::Str(String::new()).truthy());
    /// assert!(Value::Sequence(Vec::new().into()).truthy());
    /// ```
    #[must_use]
    pub fn truthy(&self) -> bool {
        match self {
            Self::Null | Self::Undefined => false,
            Self::Bool(b) => *b,
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::Str(s) => !s.is_empty(),
            Self::Sequence(_) | Self::Mapping(_) | Self::Callable(_) => true,
        }
    }

    /// Names the value's type, for error messages.
    ///
    /// # Example
    /// ```
    /// use templex::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Number(1.0).kind(), "number");
    /// assert_eq!(Value::Undefined.kind(), "undefined");
    /// ```
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Undefined => "undefined",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::Str(_) => "string",
            Self::Sequence(_) => "sequence",
            Self::Mapping(_) => "mapping",
            Self::Callable(_) => "function",
        }
    }
}
