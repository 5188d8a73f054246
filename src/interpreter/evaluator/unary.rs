use crate::{
    ast::UnaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        value::core::Value,
    },
};

impl Evaluator<'_> {
    /// Evaluates a unary operation on an already-evaluated operand.
    ///
    /// Negation requires a number. Logical NOT inverts truthiness, so it
    /// applies to every value and always produces a boolean.
    ///
    /// # Parameters
    /// - `op`: The unary operator.
    /// - `value`: The evaluated operand.
    /// - `pos`: Byte position for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the evaluated result.
    pub fn eval_unary(op: UnaryOperator, value: &Value, pos: usize) -> EvalResult<Value> {
        match op {
            UnaryOperator::Negate => match value {
                Value::Number(n) => Ok(Value::Number(-n)),
                other => {
                    Err(RuntimeError::TypeMismatch { details: format!("cannot negate {}",
                                                                      other.kind()),
                                                     pos })
                },
            },
            UnaryOperator::Not => Ok(Value::Bool(!value.truthy())),
        }
    }
}
