use crate::renderer::evaluator::core::Context;

/// Expands `$identifier` references inside a run of literal text.
///
/// Each reference is replaced with the display form of the raw value bound
/// to the name. Unbound names and null values expand to nothing, so a text
/// containing only an unbound reference disappears entirely. Unlike the
/// expression path, interpolation never coerces: a string bound to
/// `"0042"` interpolates as `0042`.
///
/// A `$` not followed by an identifier start stays literal.
///
/// # Parameters
/// - `text`: The literal text run to expand.
/// - `context`: The variable bindings for this render.
///
/// # Example
/// ```
/// use std::collections::HashMap;
///
/// use velocette::renderer::{
///     evaluator::core::Context, interpolate::expand, value::Value,
/// };
///
/// let mut vars = HashMap::new();
/// vars.insert("who".to_string(), Value::from("world"));
///
/// let context = Context::with_vars(&vars);
/// assert_eq!(expand("hello $who, $missing!", &context), "hello world, !");
/// assert_eq!(expand("costs $5", &context), "costs $5");
/// ```
#[must_use]
pub fn expand(text: &str, context: &Context) -> String {
    let mut output = String::with_capacity(text.len());
    let mut chars = text.char_indices().peekable();

    while let Some((_, ch)) = chars.next() {
        if ch != '$' {
            output.push(ch);
            continue;
        }

        match chars.peek() {
            Some(&(start, next)) if next == '_' || next.is_ascii_alphabetic() => {
                let mut end = start;
                while let Some(&(i, c)) = chars.peek() {
                    if c == '_' || c.is_ascii_alphanumeric() {
                        end = i + c.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }

                if let Some(value) = context.get_variable(&text[start..end]) {
                    // Null displays as nothing, matching an unbound name.
                    output.push_str(&value.to_string());
                }
            },
            _ => output.push('$'),
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::expand;
    use crate::renderer::{evaluator::core::Context, value::Value};

    fn context_with(pairs: &[(&str, Value)]) -> Context {
        let vars: HashMap<String, Value> =
            pairs.iter()
                 .map(|(name, value)| ((*name).to_string(), value.clone()))
                 .collect();
        Context::with_vars(&vars)
    }

    #[test]
    fn replaces_bound_references() {
        let context = context_with(&[("x", Value::Integer(7))]);
        assert_eq!(expand("x is $x.", &context), "x is 7.");
    }

    #[test]
    fn unbound_references_expand_to_nothing() {
        let context = context_with(&[]);
        assert_eq!(expand("[$nope]", &context), "[]");
    }

    #[test]
    fn strings_interpolate_without_coercion() {
        let context = context_with(&[("code", Value::from("0042"))]);
        assert_eq!(expand("$code", &context), "0042");
    }

    #[test]
    fn lone_dollar_stays_literal() {
        let context = context_with(&[]);
        assert_eq!(expand("price: $5 or $ or $$", &context), "price: $5 or $ or $$");
    }

    #[test]
    fn underscore_starts_an_identifier() {
        let context = context_with(&[("_x", Value::Bool(true))]);
        assert_eq!(expand("$_x", &context), "true");
    }
}
