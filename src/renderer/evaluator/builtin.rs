use crate::{
    error::RuntimeError,
    renderer::{
        evaluator::core::{Context, EvalResult},
        value::Value,
    },
    util::num::f64_to_i64_trunc,
};

/// Identifier names owned by the builtin namespaces.
///
/// These names can never be bound by caller-supplied variables or by `#set`
/// directives; see [`Context::define`].
pub const RESERVED_IDENTIFIERS: &[&str] = &["Integer"];

/// Checks whether `name` belongs to the reserved builtin namespace.
///
/// # Example
/// ```
/// use velocette::renderer::evaluator::builtin::is_reserved_identifier;
///
/// assert!(is_reserved_identifier("Integer"));
/// assert!(!is_reserved_identifier("integer"));
/// ```
#[must_use]
pub fn is_reserved_identifier(name: &str) -> bool {
    RESERVED_IDENTIFIERS.contains(&name)
}

impl Context {
    /// Dispatches a method call on a builtin namespace.
    ///
    /// The only namespace today is `Integer`, exposing `parseInt`. Calls on
    /// any other namespace, or an unknown method, are a
    /// `RuntimeError::UnknownMethod`.
    ///
    /// # Parameters
    /// - `target`: The namespace the call is made on, e.g. `Integer`.
    /// - `method`: The method name, e.g. `parseInt`.
    /// - `args`: Already-evaluated argument values.
    /// - `line`: Template line number for error reporting.
    ///
    /// # Errors
    /// `UnknownMethod` for unrecognized namespace/method pairs, plus
    /// whatever the builtin itself raises.
    pub fn eval_builtin(target: &str,
                        method: &str,
                        args: &[Value],
                        line: usize)
                        -> EvalResult<Value> {
        match (target, method) {
            ("Integer", "parseInt") => Self::builtin_parse_int(args, line),
            _ => Err(RuntimeError::UnknownMethod { target: target.to_owned(),
                                                   name: method.to_owned(),
                                                   line }),
        }
    }

    /// Implements `$Integer.parseInt(value)`.
    ///
    /// Integers pass through unchanged. Reals are truncated toward zero.
    /// Strings are trimmed and parsed as an optional sign followed by the
    /// longest leading digit run, so `"42nd"` parses to `42` while `"nd42"`
    /// fails. Booleans and null always fail.
    fn builtin_parse_int(args: &[Value], line: usize) -> EvalResult<Value> {
        let [arg] = args else {
            return Err(RuntimeError::TypeError { details: format!("Integer.parseInt takes exactly 1 argument, got {}",
                                                                  args.len()),
                                                 line });
        };

        match arg {
            Value::Integer(n) => Ok(Value::Integer(*n)),
            Value::Real(r) => Ok(Value::Integer(f64_to_i64_trunc(*r, line)?)),
            Value::String(s) => parse_int_prefix(s).map(Value::Integer)
                                                   .ok_or_else(|| {
                                                       RuntimeError::IntegerParse { input: s.clone(),
                                                                                    line }
                                                   }),
            Value::Bool(_) | Value::Null => {
                Err(RuntimeError::IntegerParse { input: format!("{arg}"),
                                                 line })
            },
        }
    }
}

/// Parses the leading integer prefix of a trimmed string.
///
/// Accepts an optional `+`/`-` sign followed by at least one digit;
/// trailing non-digit characters are ignored. Returns `None` when no digits
/// lead the string or the value does not fit an `i64`.
fn parse_int_prefix(input: &str) -> Option<i64> {
    let trimmed = input.trim();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let run_len = digits.bytes().take_while(u8::is_ascii_digit).count();
    if run_len == 0 {
        return None;
    }

    let mut value: i64 = 0;
    for byte in digits.as_bytes()[..run_len].iter() {
        let digit = i64::from(byte - b'0');
        value = value.checked_mul(10)?;
        value = if negative {
            value.checked_sub(digit)?
        } else {
            value.checked_add(digit)?
        };
    }

    Some(value)
}

#[cfg(test)]
mod tests {
    use super::parse_int_prefix;

    #[test]
    fn parses_plain_digit_runs() {
        assert_eq!(parse_int_prefix("251229"), Some(251_229));
        assert_eq!(parse_int_prefix("  42  "), Some(42));
    }

    #[test]
    fn parses_signed_prefixes() {
        assert_eq!(parse_int_prefix("-17"), Some(-17));
        assert_eq!(parse_int_prefix("+8"), Some(8));
    }

    #[test]
    fn ignores_trailing_noise() {
        assert_eq!(parse_int_prefix("42nd"), Some(42));
    }

    #[test]
    fn rejects_non_numeric_leads() {
        assert_eq!(parse_int_prefix("nd42"), None);
        assert_eq!(parse_int_prefix(""), None);
        assert_eq!(parse_int_prefix("-"), None);
    }

    #[test]
    fn rejects_values_outside_i64() {
        assert_eq!(parse_int_prefix("9223372036854775807"), Some(i64::MAX));
        assert_eq!(parse_int_prefix("9223372036854775808"), None);
        assert_eq!(parse_int_prefix("-9223372036854775808"), Some(i64::MIN));
    }
}
