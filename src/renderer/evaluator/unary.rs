use crate::{
    ast::UnaryOperator,
    error::RuntimeError,
    renderer::{
        evaluator::core::{Context, EvalResult},
        value::Value,
    },
};

impl Context {
    /// Evaluates a unary operation on an already-computed value.
    ///
    /// Negation requires a numeric operand; integer negation is checked, so
    /// negating `i64::MIN` is a `RuntimeError::Overflow`. Logical NOT
    /// accepts any value and inverts its truthiness.
    ///
    /// # Parameters
    /// - `op`: The unary operator.
    /// - `value`: The operand.
    /// - `line`: Template line number for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the computed value.
    ///
    /// # Example
    /// ```
    /// use velocette::{
    ///     ast::UnaryOperator,
    ///     renderer::{evaluator::core::Context, value::Value},
    /// };
    ///
    /// let negated = Context::eval_unary(UnaryOperator::Negate, &Value::Integer(7), 1);
    /// assert_eq!(negated.unwrap(), Value::Integer(-7));
    ///
    /// let inverted = Context::eval_unary(UnaryOperator::Not, &Value::from(""), 1);
    /// assert_eq!(inverted.unwrap(), Value::Bool(true));
    /// ```
    pub fn eval_unary(op: UnaryOperator, value: &Value, line: usize) -> EvalResult<Value> {
        match op {
            UnaryOperator::Negate => match value {
                Value::Integer(n) => n.checked_neg()
                                      .map(Value::Integer)
                                      .ok_or(RuntimeError::Overflow { line }),
                Value::Real(r) => Ok(Value::Real(-r)),
                _ => Err(RuntimeError::ExpectedNumber { line }),
            },
            UnaryOperator::Not => Ok(Value::Bool(!value.is_truthy())),
        }
    }
}
