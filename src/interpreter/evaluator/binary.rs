use crate::{
    ast::{BinaryOperator, Expr},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Bindings, EvalResult, Evaluator},
        value::core::Value,
    },
};

impl Evaluator<'_> {
    /// Evaluates a binary operation.
    ///
    /// The logic operators take the operand expressions rather than values
    /// so the right side only evaluates when the left side does not decide
    /// the result. Both return the deciding operand's value, not a boolean,
    /// which is what makes `x || "fallback"` work as a default.
    ///
    /// Equality is loose in exactly one way: `null` and the undefined value
    /// compare equal to each other. Everything else is structural, and
    /// callables are only equal to themselves.
    ///
    /// # Parameters
    /// - `left`: Left operand expression.
    /// - `op`: The operator.
    /// - `right`: Right operand expression.
    /// - `pos`: Byte position for error reporting.
    /// - `bindings`: Local bindings from enclosing lambda bodies, if any.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the evaluated result.
    pub fn eval_binary(&self,
                       left: &Expr,
                       op: BinaryOperator,
                       right: &Expr,
                       pos: usize,
                       bindings: Option<&Bindings>)
                       -> EvalResult<Value> {
        use BinaryOperator::{Add, And, Equal, NotEqual, Or, Sub};

        match op {
            Or => {
                let left = self.eval(left, bindings)?;
                if left.truthy() {
                    Ok(left)
                } else {
                    self.eval(right, bindings)
                }
            },
            And => {
                let left = self.eval(left, bindings)?;
                if left.truthy() {
                    self.eval(right, bindings)
                } else {
                    Ok(left)
                }
            },
            Equal => {
                let left = self.eval(left, bindings)?;
                let right = self.eval(right, bindings)?;
                Ok(Value::Bool(loose_eq(&left, &right)))
            },
            NotEqual => {
                let left = self.eval(left, bindings)?;
                let right = self.eval(right, bindings)?;
                Ok(Value::Bool(!loose_eq(&left, &right)))
            },
            Add => {
                let left = self.eval(left, bindings)?;
                let right = self.eval(right, bindings)?;
                eval_add(&left, &right, pos)
            },
            Sub => {
                let left = self.eval(left, bindings)?;
                let right = self.eval(right, bindings)?;
                eval_sub(&left, &right, pos)
            },
        }
    }
}

/// Loose equality: `null` and undefined are mutually equal, everything else
/// is structural.
pub(crate) fn loose_eq(left: &Value, right: &Value) -> bool {
    matches!((left, right),
             (Value::Null | Value::Undefined, Value::Null | Value::Undefined))
    || left == right
}

/// Evaluates `+`: numeric addition, or string concatenation when either
/// side is a string.
fn eval_add(left: &Value, right: &Value, pos: usize) -> EvalResult<Value> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
        (Value::Str(_), _) | (_, Value::Str(_)) => Ok(Value::Str(format!("{left}{right}"))),
        _ => {
            Err(RuntimeError::TypeMismatch { details: format!("cannot add {} and {}",
                                                              left.kind(),
                                                              right.kind()),
                                             pos })
        },
    }
}

/// Evaluates `-`: numbers only.
fn eval_sub(left: &Value, right: &Value, pos: usize) -> EvalResult<Value> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a - b)),
        _ => {
            Err(RuntimeError::TypeMismatch { details: format!("cannot subtract {} from {}",
                                                              right.kind(),
                                                              left.kind()),
                                             pos })
        },
    }
}
