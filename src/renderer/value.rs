use crate::{
    ast::LiteralValue,
    error::RuntimeError,
    renderer::evaluator::core::EvalResult,
    util::num::i64_to_f64_checked,
};

/// Represents a runtime value in a render context.
///
/// This enum models all the types that can appear in caller-supplied
/// variables, directive expressions, and `#set` assignments.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// An integer value (64-bit signed).
    Integer(i64),
    /// A numeric value (double precision floating-point).
    Real(f64),
    /// A boolean value (`true` or `false`).
    /// Produced by comparison operators (`<`, `==`, `!=`, etc.) and logical
    /// operations. Used primarily as conditions in `#if` directives.
    Bool(bool),
    /// A string value.
    String(String),
    /// The absent/undefined-equivalent value.
    ///
    /// Unresolved `$identifier` references evaluate to `Null`; it
    /// interpolates as the empty string, never as a literal `null`.
    Null,
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_owned())
    }
}

impl From<&LiteralValue> for Value {
    fn from(v: &LiteralValue) -> Self {
        match v {
            LiteralValue::Integer(n) => Self::Integer(*n),
            LiteralValue::Real(r) => Self::Real(*r),
            LiteralValue::Bool(b) => Self::Bool(*b),
            LiteralValue::String(s) => Self::String(s.clone()),
        }
    }
}

impl Value {
    /// Converts the value to an `f64`, or returns an error if not numeric.
    ///
    /// Accepts `Value::Integer` and `Value::Real`. For integers, conversion
    /// fails if the value is too large to be represented as `f64` exactly.
    ///
    /// # Parameters
    /// - `line`: Template line number for error reporting.
    ///
    /// # Example
    /// ```
    /// use velocette::renderer::value::Value;
    ///
    /// let x = Value::Integer(10);
    /// assert_eq!(x.as_real(1).unwrap(), 10.0);
    ///
    /// let s = Value::String("ten".into());
    /// assert!(s.as_real(1).is_err());
    /// ```
    pub fn as_real(&self, line: usize) -> EvalResult<f64> {
        match self {
            Self::Real(r) => Ok(*r),
            Self::Integer(n) => Ok(i64_to_f64_checked(*n, RuntimeError::LiteralTooLarge { line })?),
            _ => Err(RuntimeError::ExpectedNumber { line }),
        }
    }

    /// Reports whether the value counts as true in a condition.
    ///
    /// `Bool` uses its own value; zero numbers, the empty string, and `Null`
    /// are false; everything else is true.
    ///
    /// # Example
    /// ```
    /// use velocette::renderer::value::Value;
    ///
    /// assert!(Value::Integer(1).is_truthy());
    /// assert!(!Value::Integer(0).is_truthy());
    /// assert!(!Value::String(String::new()).is_truthy());
    /// assert!(!Value::Null.is_truthy());
    /// ```
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Integer(n) => *n != 0,
            Self::Real(r) => *r != 0.0,
            Self::String(s) => !s.is_empty(),
            Self::Null => false,
        }
    }

    /// Coerces a string that looks numeric into a number.
    ///
    /// A trimmed string matching exactly `-?digits(.digits)?` becomes an
    /// `Integer` (no decimal point) or a `Real` (with one); anything else is
    /// `None`, and so is an integer that overflows `i64`.
    ///
    /// Applied when resolving `$identifier` references inside expressions,
    /// never on the text-interpolation path.
    ///
    /// # Example
    /// ```
    /// use velocette::renderer::value::Value;
    ///
    /// assert_eq!(Value::coerce_numeric(" 251221 "), Some(Value::Integer(251_221)));
    /// assert_eq!(Value::coerce_numeric("-2.5"), Some(Value::Real(-2.5)));
    /// assert_eq!(Value::coerce_numeric("12px"), None);
    /// assert_eq!(Value::coerce_numeric(""), None);
    /// ```
    #[must_use]
    pub fn coerce_numeric(s: &str) -> Option<Self> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix('-').unwrap_or(trimmed);
        if digits.is_empty() {
            return None;
        }

        let (int_part, frac_part) = match digits.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (digits, None),
        };

        if int_part.is_empty() || !int_part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        if let Some(frac) = frac_part {
            if frac.is_empty() || !frac.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            trimmed.parse::<f64>().ok().map(Self::Real)
        } else {
            trimmed.parse::<i64>().ok().map(Self::Integer)
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Real(r) => write!(f, "{r}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::String(s) => write!(f, "{s}"),
            Self::Null => Ok(()),
        }
    }
}
