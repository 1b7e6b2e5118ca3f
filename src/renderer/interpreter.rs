use crate::{
    error::{ParseError, RuntimeError, TemplateError},
    renderer::{
        evaluator::{builtin::is_reserved_identifier, core::Context},
        interpolate::expand,
        parser::core::parse_expression_body,
        tokenizer::Segment,
        value::Value,
    },
    util::num::f64_to_i64_trunc,
};

/// One open `#if` block on the interpreter's stack.
///
/// `parent_active` is frozen at the `#if`: it records whether the enclosing
/// output was live when the block opened, and every branch transition
/// consults it. `active` tracks whether the current branch emits output,
/// and `branch_satisfied` latches once any branch has taken so later
/// branches stay dark.
struct Frame {
    parent_active:    bool,
    active:           bool,
    branch_satisfied: bool,
    line:             usize,
}

/// Renders a tokenized template against a mutable context.
///
/// Walks the segments once, maintaining a stack of conditional frames.
/// Output is emitted only while every open frame is active. Conditions of
/// dead branches are never evaluated, so an erroring expression inside a
/// skipped `#elseif` cannot fail the render.
///
/// # Errors
/// Structural errors (`#elseif`/`#else`/`#end` outside a block, an
/// unclosed `#if` at end of input) and any parse or evaluation error from
/// a live directive. All errors abort the render; there is no partial
/// output.
pub fn render_segments(segments: &[(Segment, usize)],
                       context: &mut Context)
                       -> Result<String, TemplateError> {
    let mut output = String::new();
    let mut stack: Vec<Frame> = Vec::new();

    for (segment, line) in segments {
        let line = *line;
        let live = stack.iter().all(|frame| frame.active);

        match segment {
            Segment::Text(text) => {
                if live {
                    output.push_str(&expand(text, context));
                }
            },

            Segment::Set { body } => {
                if live {
                    apply_set(body, line, context)?;
                }
            },

            Segment::If { condition } => {
                let taken = live && eval_condition(condition, line, context)?;
                stack.push(Frame { parent_active: live,
                                   active: taken,
                                   branch_satisfied: taken,
                                   line });
            },

            Segment::ElseIf { condition } => {
                let Some(frame) = stack.last_mut() else {
                    return Err(RuntimeError::ElseIfWithoutIf { line }.into());
                };

                if frame.parent_active && !frame.branch_satisfied {
                    let taken = eval_condition(condition, line, context)?;
                    frame.active = taken;
                    frame.branch_satisfied |= taken;
                } else {
                    frame.active = false;
                }
            },

            Segment::Else => {
                let Some(frame) = stack.last_mut() else {
                    return Err(RuntimeError::ElseWithoutIf { line }.into());
                };

                frame.active = frame.parent_active && !frame.branch_satisfied;
                frame.branch_satisfied = true;
            },

            Segment::End => {
                if stack.pop().is_none() {
                    return Err(RuntimeError::EndWithoutIf { line }.into());
                }
            },
        }
    }

    if let Some(frame) = stack.last() {
        return Err(RuntimeError::UnclosedBlock { line: frame.line }.into());
    }

    Ok(output)
}

/// Parses and evaluates one live `#if`/`#elseif` condition to a boolean.
fn eval_condition(condition: &str,
                  line: usize,
                  context: &Context)
                  -> Result<bool, TemplateError> {
    let expr = parse_expression_body(condition, line)?;
    let value = context.eval(&expr)?;
    Ok(value.is_truthy())
}

/// Applies one live `#set(target = expression)` directive.
///
/// The target may be written `$name` or `name`. Assignments to a reserved
/// builtin name are dropped without evaluating the right-hand side, so
/// `#set($Integer = 0)` can neither rebind the namespace nor fail. Real
/// results are truncated toward zero before being stored.
fn apply_set(body: &str, line: usize, context: &mut Context) -> Result<(), TemplateError> {
    let (target, expression) = split_assignment(body, line)?;

    if is_reserved_identifier(target) {
        return Ok(());
    }

    let expr = parse_expression_body(expression, line)?;
    let value = match context.eval(&expr)? {
        Value::Real(r) => Value::Integer(f64_to_i64_trunc(r, line)?),
        value => value,
    };

    context.define(target, value);
    Ok(())
}

/// Splits a `#set` body into its target identifier and expression text.
///
/// The split happens at the first `=` that is not part of `==`; a body with
/// no assignment, an equality operator in target position, or a malformed
/// target is an `InvalidSetDirective`.
fn split_assignment(body: &str, line: usize) -> Result<(&str, &str), ParseError> {
    let bytes = body.as_bytes();
    let eq = bytes.iter()
                  .position(|&b| b == b'=')
                  .ok_or_else(|| ParseError::InvalidSetDirective { body: body.to_string(),
                                                                   line })?;

    if bytes.get(eq + 1) == Some(&b'=') {
        return Err(ParseError::InvalidSetDirective { body: body.to_string(),
                                                     line });
    }

    let target = body[..eq].trim();
    let target = target.strip_prefix('$').unwrap_or(target);

    if !is_identifier(target) {
        return Err(ParseError::InvalidSetDirective { body: body.to_string(),
                                                     line });
    }

    Ok((target, &body[eq + 1..]))
}

/// Checks that `name` is a well-formed identifier: an ASCII letter or
/// underscore followed by letters, digits, or underscores.
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };

    (first == '_' || first.is_ascii_alphabetic())
    && chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::{is_identifier, split_assignment};

    #[test]
    fn splits_at_the_first_equals() {
        let (target, expression) = split_assignment("$x = $y == 2", 1).unwrap();
        assert_eq!(target, "x");
        assert_eq!(expression, " $y == 2");
    }

    #[test]
    fn accepts_a_bare_target_name() {
        let (target, _) = split_assignment("count = 0", 1).unwrap();
        assert_eq!(target, "count");
    }

    #[test]
    fn rejects_equality_in_target_position() {
        assert!(split_assignment("$x == 2", 1).is_err());
    }

    #[test]
    fn rejects_missing_assignment() {
        assert!(split_assignment("$x + 1", 1).is_err());
    }

    #[test]
    fn rejects_malformed_targets() {
        assert!(split_assignment("$2x = 1", 1).is_err());
        assert!(split_assignment(" = 1", 1).is_err());
        assert!(split_assignment("$a.b = 1", 1).is_err());
    }

    #[test]
    fn identifier_rules() {
        assert!(is_identifier("_private"));
        assert!(is_identifier("value2"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("2fast"));
    }
}
