use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    renderer::{
        evaluator::core::{Context, EvalResult},
        value::Value,
    },
};

/// Compares two values for equality.
///
/// Integers and reals cross-compare numerically and exactly, even above
/// 2^53; strings and booleans compare within their own variant;
/// `Null == Null` is true. Any other mixed pairing is unequal rather than
/// an error, so `#if($x == "")` is safe whatever `$x` holds.
#[must_use]
pub fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => a == b,
        (Value::Real(a), Value::Real(b)) => a == b,
        (Value::Integer(a), Value::Real(b)) | (Value::Real(b), Value::Integer(a)) => {
            integer_real_equal(*a, *b)
        },
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Null, Value::Null) => true,
        _ => false,
    }
}

/// Compares an integer and a real exactly.
///
/// Converting the integer to `f64` would make every integer above 2^53
/// compare equal to its nearest representable real, so the comparison runs
/// the other way: a real with no fractional part that fits an `i64` is
/// cast and compared exactly, and anything else is unequal.
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
fn integer_real_equal(a: i64, b: f64) -> bool {
    if !b.is_finite() || b.trunc() != b {
        return false;
    }
    // i64::MAX as f64 rounds up to 2^63, which no i64 equals; i64::MIN as
    // f64 is exact.
    if b < i64::MIN as f64 || b >= i64::MAX as f64 {
        return false;
    }
    b as i64 == a
}

impl Context {
    /// Evaluates a binary operation on two already-computed values.
    ///
    /// Logical AND/OR never reach this function; they short-circuit in
    /// [`Context::eval_binary_op`] before the right operand is evaluated.
    ///
    /// # Parameters
    /// - `op`: The binary operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `line`: Template line number for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the computed value.
    ///
    /// # Example
    /// ```
    /// use velocette::{
    ///     ast::BinaryOperator,
    ///     renderer::{evaluator::core::Context, value::Value},
    /// };
    ///
    /// let result = Context::eval_binary(BinaryOperator::Add,
    ///                                   &Value::Integer(2),
    ///                                   &Value::Integer(3),
    ///                                   1);
    /// assert_eq!(result.unwrap(), Value::Integer(5));
    /// ```
    pub fn eval_binary(op: BinaryOperator,
                       left: &Value,
                       right: &Value,
                       line: usize)
                       -> EvalResult<Value> {
        use BinaryOperator::{
            Add, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mod, Mul, NotEqual, Sub,
        };

        match op {
            Add | Sub | Mul | Div | Mod => Self::eval_arithmetic(op, left, right, line),

            Equal | NotEqual => Self::eval_comparison(op, left, right, line),

            Less | Greater | LessEqual | GreaterEqual => {
                Self::eval_comparison(op, left, right, line)
            },

            // And/Or short-circuit in eval_binary_op.
            BinaryOperator::And | BinaryOperator::Or => unreachable!(),
        }
    }

    /// Evaluates an arithmetic operation.
    ///
    /// `+` concatenates when either operand is a string. Integer pairs use
    /// checked arithmetic, so overflow is a `RuntimeError::Overflow` rather
    /// than a wrap. Division always evaluates in floating point, whatever
    /// the operand types: truncation back to an integer happens only when a
    /// `#set` directive stores the result, never here.
    ///
    /// # Parameters
    /// - `op`: One of `Add`, `Sub`, `Mul`, `Div`, `Mod`.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `line`: Template line number for error reporting.
    ///
    /// # Example
    /// ```
    /// use velocette::{
    ///     ast::BinaryOperator,
    ///     renderer::{evaluator::core::Context, value::Value},
    /// };
    ///
    /// // Division is floating point even for integer operands.
    /// let v = Context::eval_arithmetic(BinaryOperator::Div,
    ///                                  &Value::Integer(10),
    ///                                  &Value::Integer(4),
    ///                                  1);
    /// assert_eq!(v.unwrap(), Value::Real(2.5));
    /// ```
    pub fn eval_arithmetic(op: BinaryOperator,
                           left: &Value,
                           right: &Value,
                           line: usize)
                           -> EvalResult<Value> {
        use BinaryOperator::{Add, Div, Mod, Mul, Sub};
        use Value::{Integer, Real, String};

        if matches!(op, Add) && (matches!(left, String(_)) || matches!(right, String(_))) {
            return Ok(String(format!("{left}{right}")));
        }

        match (&left, &right) {
            (Integer(a), Integer(b)) => match op {
                Add => a.checked_add(*b)
                        .map(Integer)
                        .ok_or(RuntimeError::Overflow { line }),
                Sub => a.checked_sub(*b)
                        .map(Integer)
                        .ok_or(RuntimeError::Overflow { line }),
                Mul => a.checked_mul(*b)
                        .map(Integer)
                        .ok_or(RuntimeError::Overflow { line }),
                Div => {
                    if *b == 0 {
                        return Err(RuntimeError::DivisionByZero { line });
                    }
                    Ok(Real(left.as_real(line)? / right.as_real(line)?))
                },
                Mod => {
                    if *b == 0 {
                        return Err(RuntimeError::DivisionByZero { line });
                    }
                    // i64::MIN % -1 overflows.
                    a.checked_rem(*b)
                     .map(Integer)
                     .ok_or(RuntimeError::Overflow { line })
                },
                _ => unreachable!(),
            },

            _ => {
                let l = left.as_real(line)?;
                let r = right.as_real(line)?;

                match op {
                    Add => Ok(Real(l + r)),
                    Sub => Ok(Real(l - r)),
                    Mul => Ok(Real(l * r)),
                    Div => {
                        if r == 0.0 {
                            return Err(RuntimeError::DivisionByZero { line });
                        }
                        Ok(Real(l / r))
                    },
                    Mod => {
                        if r == 0.0 {
                            return Err(RuntimeError::DivisionByZero { line });
                        }
                        Ok(Real(l % r))
                    },
                    _ => unreachable!(),
                }
            },
        }
    }

    /// Evaluates a comparison of the form `Value <Operator> Value`.
    ///
    /// For `Equal` and `NotEqual`, values are compared using
    /// [`values_equal`]. For relational operators, both operands must be
    /// numeric and are promoted to real numbers.
    ///
    /// # Parameters
    /// - `op`: The comparison operator.
    /// - `left`: The left-hand value.
    /// - `right`: The right-hand value.
    /// - `line`: Template line number used for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing a boolean result.
    ///
    /// # Example
    /// ```
    /// use velocette::{
    ///     ast::BinaryOperator,
    ///     renderer::{evaluator::core::Context, value::Value},
    /// };
    ///
    /// let result = Context::eval_comparison(BinaryOperator::Less,
    ///                                       &Value::Integer(3),
    ///                                       &Value::Real(5.0),
    ///                                       1);
    /// assert_eq!(result.unwrap(), Value::Bool(true));
    /// ```
    pub fn eval_comparison(op: BinaryOperator,
                           left: &Value,
                           right: &Value,
                           line: usize)
                           -> EvalResult<Value> {
        Ok(Value::Bool(match op {
                           BinaryOperator::Equal => values_equal(left, right),
                           BinaryOperator::NotEqual => !values_equal(left, right),

                           BinaryOperator::Less
                           | BinaryOperator::Greater
                           | BinaryOperator::LessEqual
                           | BinaryOperator::GreaterEqual => {
                               let l = left.as_real(line)?;
                               let r = right.as_real(line)?;

                               match op {
                                   BinaryOperator::Less => l < r,
                                   BinaryOperator::Greater => l > r,
                                   BinaryOperator::LessEqual => l <= r,
                                   BinaryOperator::GreaterEqual => l >= r,
                                   _ => unreachable!(),
                               }
                           },

                           _ => unreachable!(),
                       }))
    }
}

#[cfg(test)]
mod tests {
    use super::values_equal;
    use crate::{
        ast::BinaryOperator,
        renderer::{evaluator::core::Context, value::Value},
    };

    #[test]
    fn remainder_at_the_integer_minimum_is_an_error() {
        let result = Context::eval_arithmetic(BinaryOperator::Mod,
                                              &Value::Integer(i64::MIN),
                                              &Value::Integer(-1),
                                              1);
        assert!(result.is_err());
    }

    #[test]
    fn remainder_by_zero_is_an_error() {
        let result = Context::eval_arithmetic(BinaryOperator::Mod,
                                              &Value::Integer(7),
                                              &Value::Integer(0),
                                              1);
        assert!(result.is_err());
    }

    #[test]
    fn integer_real_equality_is_exact_above_2_pow_53() {
        assert!(!values_equal(&Value::Integer(9_007_199_254_740_993),
                              &Value::Real(9_007_199_254_740_992.0)));
        assert!(values_equal(&Value::Integer(9_007_199_254_740_992),
                             &Value::Real(9_007_199_254_740_992.0)));
    }

    #[test]
    fn integer_real_equality_handles_ordinary_values() {
        assert!(values_equal(&Value::Integer(3), &Value::Real(3.0)));
        assert!(!values_equal(&Value::Integer(3), &Value::Real(3.5)));
        assert!(!values_equal(&Value::Integer(0), &Value::Real(f64::NAN)));
        assert!(values_equal(&Value::Integer(i64::MIN),
                             &Value::Real(-9_223_372_036_854_775_808.0)));
        assert!(!values_equal(&Value::Integer(i64::MAX),
                              &Value::Real(9_223_372_036_854_775_808.0)));
    }
}
