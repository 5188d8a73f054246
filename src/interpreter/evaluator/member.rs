use std::rc::Rc;

use crate::{
    ast::{Expr, MemberKey},
    interpreter::{
        evaluator::core::{Bindings, EvalResult, Evaluator},
        value::core::{Callable, Value},
    },
    util::num::f64_to_index,
};

impl Evaluator<'_> {
    /// Evaluates a member or index access.
    ///
    /// Access is undefined-tolerant throughout: a miss of any kind
    /// (unknown name, out-of-range index, access on `null`, undefined, or
    /// a scalar) produces the undefined value rather than an error, so
    /// deep lookup chains degrade quietly.
    ///
    /// Dynamic keys are evaluated first and then treated like their static
    /// counterparts: strings as names, numbers as indexes. A dynamic key of
    /// any other type misses.
    ///
    /// # Parameters
    /// - `target`: The expression being accessed.
    /// - `key`: The access key.
    /// - `bindings`: Local bindings from enclosing lambda bodies, if any.
    ///
    /// # Returns
    /// The accessed value, or the undefined value on a miss.
    pub fn eval_member(&self,
                       target: &Expr,
                       key: &MemberKey,
                       bindings: Option<&Bindings>)
                       -> EvalResult<Value> {
        let target = self.eval(target, bindings)?;

        match key {
            MemberKey::Name(name) => Ok(access_name(&target, name)),
            MemberKey::Index(index) => Ok(access_index(&target, *index)),
            MemberKey::Dynamic(expr) => {
                let key = self.eval(expr, bindings)?;
                Ok(match key {
                       Value::Str(name) => access_name(&target, &name),
                       Value::Number(index) => access_index(&target, index),
                       _ => Value::Undefined,
                   })
            },
        }
    }
}

/// Resolves a name key against a value.
///
/// Mappings look the name up directly. Sequences expose `length` plus the
/// two bound methods backing the negative-index rewrite, and strings expose
/// their character count as `length`.
#[allow(clippy::cast_precision_loss)]
fn access_name(target: &Value, name: &str) -> Value {
    match target {
        Value::Mapping(mapping) => mapping.get(name).cloned().unwrap_or(Value::Undefined),
        Value::Sequence(elements) => match name {
            "length" => Value::Number(elements.len() as f64),
            "slice" => Value::Callable(Callable::Slice(Rc::clone(elements))),
            "shift" => Value::Callable(Callable::Shift(Rc::clone(elements))),
            _ => Value::Undefined,
        },
        Value::Str(s) => match name {
            "length" => Value::Number(s.chars().count() as f64),
            _ => Value::Undefined,
        },
        _ => Value::Undefined,
    }
}

/// Resolves a numeric index against a value.
///
/// Sequences and strings index positionally; a fractional, negative, or
/// out-of-range index misses. Mappings treat the number's rendered form as
/// a key, so `m[1]` and `m["1"]` agree.
fn access_index(target: &Value, index: f64) -> Value {
    match target {
        Value::Sequence(elements) => f64_to_index(index).and_then(|i| elements.get(i).cloned())
                                                        .unwrap_or(Value::Undefined),
        Value::Str(s) => f64_to_index(index).and_then(|i| s.chars().nth(i))
                                            .map_or(Value::Undefined, |c| {
                                                Value::Str(c.to_string())
                                            }),
        Value::Mapping(mapping) => {
            let key = Value::Number(index).to_string();
            mapping.get(&key).cloned().unwrap_or(Value::Undefined)
        },
        _ => Value::Undefined,
    }
}
