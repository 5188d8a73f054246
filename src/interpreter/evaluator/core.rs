use std::{collections::HashMap, rc::Rc};

use crate::{
    ast::{Expr, Span, Template},
    error::RuntimeError,
    interpreter::value::core::{Callable, LambdaValue, Value},
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Local bindings introduced during evaluation: lambda parameters and
/// captured locals. Context bindings live in [`Context`] instead.
pub type Bindings = HashMap<String, Value>;

/// Stores the data a template resolves against.
///
/// The context maps top-level identifier names to values. It is shared
/// cheaply: cloning a context clones a pointer, and the whole mapping can be
/// handed to a template as one value for the implicit-context call rewrite.
///
/// ## Usage
///
/// A `Context` is built once from host data and reused across any number of
/// template resolutions.
#[derive(Debug, Clone, Default)]
pub struct Context {
    bindings: Rc<HashMap<String, Value>>,
}

impl Context {
    /// Creates an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the context with one more binding added.
    ///
    /// # Example
    /// ```
    /// use templex::interpreter::{evaluator::core::Context, value::core::Value};
    ///
    /// let context = Context::new().with("host", "example.com");
    ///
    /// assert_eq!(context.get("host"), Some(&Value::Str("example.com".to_string())));
    /// ```
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        Rc::make_mut(&mut self.bindings).insert(name.into(), value.into());
        self
    }

    /// Looks up a top-level binding by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    /// Returns the whole context as one mapping value.
    ///
    /// This is what a call site rewritten to receive the implicit context
    /// gets as its argument. The mapping shares the context's storage.
    #[must_use]
    pub fn as_value(&self) -> Value {
        Value::Mapping(Rc::clone(&self.bindings))
    }
}

impl From<HashMap<String, Value>> for Context {
    fn from(bindings: HashMap<String, Value>) -> Self {
        Self { bindings: Rc::new(bindings) }
    }
}

/// Walks a parsed template's expressions against a context.
///
/// The evaluator borrows its context; local bindings from enclosing lambdas
/// are threaded through every evaluation call rather than stored, so one
/// evaluator can serve nested templates and lambda bodies alike.
pub struct Evaluator<'a> {
    pub(crate) context: &'a Context,
}

impl<'a> Evaluator<'a> {
    /// Creates an evaluator over the given context.
    #[must_use]
    pub const fn new(context: &'a Context) -> Self {
        Self { context }
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation. The
    /// evaluator dispatches based on expression variant: literals, nested
    /// templates, identifiers, member accesses, calls, lambdas, and the
    /// operator nodes.
    ///
    /// Missing data never fails: an unknown identifier evaluates to the
    /// undefined value, and member access propagates it benignly. Errors
    /// are reserved for operations that cannot proceed at all, such as
    /// calling a non-callable.
    ///
    /// # Parameters
    /// - `expr`: Expression to evaluate.
    /// - `bindings`: Local bindings from enclosing lambda bodies, if any.
    ///
    /// # Returns
    /// The evaluated value.
    pub fn eval(&self, expr: &Expr, bindings: Option<&Bindings>) -> EvalResult<Value> {
        match expr {
            Expr::Null { .. } => Ok(Value::Null),
            Expr::Bool { value, .. } => Ok(Value::Bool(*value)),
            Expr::Number { value, .. } => Ok(Value::Number(*value)),
            Expr::Str { value, .. } => Ok(Value::Str(value.clone())),
            Expr::TemplateStr { template, .. } => self.eval_template(template, bindings),
            Expr::Array { elements, .. } => {
                let values = elements.iter()
                                     .map(|element| self.eval(element, bindings))
                                     .collect::<EvalResult<Vec<_>>>()?;
                Ok(values.into())
            },
            Expr::Object { entries, .. } => {
                let mut mapping = HashMap::with_capacity(entries.len());
                for entry in entries {
                    mapping.insert(entry.key.clone(), self.eval(&entry.value, bindings)?);
                }
                Ok(mapping.into())
            },
            Expr::Identifier { name, .. } => Ok(self.lookup(name, bindings)),
            Expr::ContextRef { .. } => Ok(self.context.as_value()),
            Expr::Member { target, key, .. } => self.eval_member(target, key, bindings),
            Expr::Call { callee,
                         arguments,
                         pos, } => self.eval_call(callee, arguments, *pos, bindings),
            Expr::Lambda { params, body, .. } => {
                let lambda = LambdaValue { params:   params.clone(),
                                           body:     Rc::new(body.as_ref().clone()),
                                           captured: bindings.cloned().unwrap_or_default(), };
                Ok(Value::Callable(Callable::Lambda(Rc::new(lambda))))
            },
            Expr::Unary { op, expr, pos } => {
                let value = self.eval(expr, bindings)?;
                Self::eval_unary(*op, &value, *pos)
            },
            Expr::Binary { left,
                           op,
                           right,
                           pos, } => self.eval_binary(left, *op, right, *pos, bindings),
            Expr::Ternary { condition,
                            then_branch,
                            else_branch,
                            .. } => {
                if self.eval(condition, bindings)?.truthy() {
                    self.eval(then_branch, bindings)
                } else {
                    self.eval(else_branch, bindings)
                }
            },
        }
    }

    /// Evaluates a whole template.
    ///
    /// A single-expression template produces its expression's native value.
    /// In interpolation mode every span is rendered to text and
    /// concatenated, so the result is always a string.
    ///
    /// # Parameters
    /// - `template`: The parsed template.
    /// - `bindings`: Local bindings from enclosing lambda bodies, if any.
    ///
    /// # Returns
    /// The resolved value.
    pub fn eval_template(&self, template: &Template, bindings: Option<&Bindings>) -> EvalResult<Value> {
        if template.single
           && let [Span::Expression(expr)] = template.spans.as_slice()
        {
            return self.eval(expr, bindings);
        }

        let mut out = String::new();
        for span in &template.spans {
            match span {
                Span::Literal(text) => out.push_str(text),
                Span::Expression(expr) => {
                    let value = self.eval(expr, bindings)?;
                    out.push_str(&value.to_string());
                },
            }
        }
        Ok(Value::Str(out))
    }

    /// Resolves an identifier, checking local bindings before the context.
    /// Unknown names produce the undefined value.
    pub(crate) fn lookup(&self, name: &str, bindings: Option<&Bindings>) -> Value {
        if let Some(bindings) = bindings
           && let Some(value) = bindings.get(name)
        {
            return value.clone();
        }
        self.context.get(name).cloned().unwrap_or(Value::Undefined)
    }
}
