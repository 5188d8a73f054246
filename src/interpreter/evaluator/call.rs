use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Bindings, EvalResult, Evaluator},
        value::core::{Callable, LambdaValue, Value},
    },
    util::num::resolve_offset,
};

impl Evaluator<'_> {
    /// Evaluates a call expression.
    ///
    /// The callee and every argument are evaluated first, in source order.
    /// Calling anything that is not a callable is a runtime error naming
    /// the type actually found; an undefined callee therefore fails loudly
    /// rather than quietly, unlike member access.
    ///
    /// # Parameters
    /// - `callee`: The expression that must evaluate to a callable.
    /// - `arguments`: Argument expressions, in source order.
    /// - `pos`: Byte position for error reporting.
    /// - `bindings`: Local bindings from enclosing lambda bodies, if any.
    ///
    /// # Returns
    /// The call's result.
    pub fn eval_call(&self,
                     callee: &Expr,
                     arguments: &[Expr],
                     pos: usize,
                     bindings: Option<&Bindings>)
                     -> EvalResult<Value> {
        let callee = self.eval(callee, bindings)?;
        let args = arguments.iter()
                            .map(|argument| self.eval(argument, bindings))
                            .collect::<EvalResult<Vec<_>>>()?;

        match callee {
            Value::Callable(Callable::Native(f)) => f(&args),
            Value::Callable(Callable::Lambda(lambda)) => self.apply_lambda(&lambda, &args),
            Value::Callable(Callable::Slice(elements)) => Ok(eval_slice(&elements, &args)),
            Value::Callable(Callable::Shift(elements)) => {
                Ok(elements.first().cloned().unwrap_or(Value::Undefined))
            },
            other => {
                Err(RuntimeError::CallTarget { found: other.kind().to_string(),
                                               pos })
            },
        }
    }

    /// Applies a lambda to evaluated arguments.
    ///
    /// The body evaluates with the lambda's captured locals plus its
    /// parameters; parameters shadow captures of the same name, and a
    /// parameter without a matching argument binds the undefined value.
    /// Extra arguments are ignored.
    fn apply_lambda(&self, lambda: &LambdaValue, args: &[Value]) -> EvalResult<Value> {
        let mut locals = lambda.captured.clone();
        for (i, param) in lambda.params.iter().enumerate() {
            let value = args.get(i).cloned().unwrap_or(Value::Undefined);
            locals.insert(param.clone(), value);
        }
        self.eval(&lambda.body, Some(&locals))
    }
}

/// Copies out a sub-range of a sequence.
///
/// Offsets follow the usual slice rules: negative counts from the end, and
/// both ends clamp to the sequence bounds. A missing start means the whole
/// sequence; a missing end means through the last element.
fn eval_slice(elements: &[Value], args: &[Value]) -> Value {
    let len = elements.len();
    let start = match args.first() {
        Some(Value::Number(n)) => resolve_offset(*n, len),
        _ => 0,
    };
    let end = match args.get(1) {
        Some(Value::Number(n)) => resolve_offset(*n, len),
        _ => len,
    };

    if start >= end {
        return Vec::new().into();
    }
    elements[start..end].to_vec().into()
}
