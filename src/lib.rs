//! # velocette
//!
//! velocette is a sandboxed renderer for a small subset of the Velocity
//! template language. It supports `$identifier` interpolation and the
//! `#set`, `#if`, `#elseif`, `#else`, and `#end` directives, with a closed
//! expression grammar and no access to anything beyond the variables the
//! caller supplies.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::collections::HashMap;

use crate::renderer::{
    evaluator::core::Context, interpreter::render_segments, tokenizer::tokenize,
};
pub use crate::{error::TemplateError, renderer::value::Value};

/// Defines the structure of parsed expressions.
///
/// This module declares the `Expr` enum and related types that represent
/// directive-body expressions as a tree. The AST is built by the parser and
/// traversed by the evaluator.
///
/// # Responsibilities
/// - Defines expression types for every construct the grammar admits.
/// - Attaches template line numbers to AST nodes for error reporting.
pub mod ast;
/// Provides unified error types for parsing and rendering.
///
/// This module defines all errors that can be raised while tokenizing,
/// parsing, or rendering a template. It standardizes error reporting and
/// carries detailed information about failures, including source line
/// numbers for debugging and user feedback.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (tokenizer, parser,
///   evaluator, interpreter).
/// - Attaches line numbers and detailed messages for context.
/// - Supports integration with standard error handling traits.
pub mod error;
/// Orchestrates the entire rendering process.
///
/// This module ties together template tokenization, directive
/// interpretation, expression lexing, parsing, evaluation, and
/// interpolation to turn a template plus a set of variables into output
/// text.
///
/// # Responsibilities
/// - Coordinates all core components: tokenizer, interpreter, lexer,
///   parser, and evaluator.
/// - Manages the flow of data and errors between phases.
pub mod renderer;
/// General utilities for safe numeric conversion.
///
/// # Responsibilities
/// - Safely convert between `i64` and `f64` without silent data loss.
pub mod util;

/// Renders a template against caller-supplied variables.
///
/// The variables seed a fresh context for this render only; `#set`
/// directives mutate the context but nothing persists once the call
/// returns. Entries named after a reserved builtin (`Integer`) are dropped
/// before rendering starts.
///
/// # Errors
/// Any tokenization, parse, or evaluation failure aborts the whole render;
/// no partial output is ever returned.
///
/// # Examples
/// ```
/// use std::collections::HashMap;
///
/// use velocette::{Value, render};
///
/// let mut vars = HashMap::new();
/// vars.insert("name".to_string(), Value::from("Ada"));
///
/// let output = render("#if($name)Hello, $name!#end", &vars);
/// assert_eq!(output.unwrap(), "Hello, Ada!");
///
/// // An unclosed block is an error, not partial output.
/// let output = render("#if(true)oops", &vars);
/// assert!(output.is_err());
/// ```
pub fn render(template: &str,
              vars: &HashMap<String, Value>)
              -> Result<String, TemplateError> {
    let mut context = Context::with_vars(vars);
    let segments = tokenize(template)?;

    render_segments(&segments, &mut context)
}

/// A pluggable rendering backend consulted before the built-in one.
///
/// Implementations get the raw template and variables and may decline by
/// returning `None`, in which case rendering falls through to [`render`].
/// A backend that fails internally should also return `None`; it has no
/// error channel by design.
pub trait AlternateRenderer {
    /// Attempts to render the template, returning `None` to decline.
    fn try_render(&self, template: &str, vars: &HashMap<String, Value>) -> Option<String>;
}

/// Controls backend selection for [`render_template`].
#[derive(Default)]
pub struct RenderOptions<'a> {
    /// When set, the alternate backend (if any) is consulted first.
    pub prefer_alternate: bool,
    /// The alternate backend to consult.
    pub alternate:        Option<&'a dyn AlternateRenderer>,
}

/// Renders a template, optionally consulting an alternate backend first.
///
/// When `options.prefer_alternate` is set and a backend is present, its
/// answer wins; a declined attempt (`None`) falls through to the built-in
/// renderer silently.
///
/// # Errors
/// Only the built-in renderer can fail; see [`render`].
pub fn render_template(template: &str,
                       vars: &HashMap<String, Value>,
                       options: &RenderOptions<'_>)
                       -> Result<String, TemplateError> {
    if options.prefer_alternate
       && let Some(backend) = options.alternate
       && let Some(output) = backend.try_render(template, vars)
    {
        return Ok(output);
    }

    render(template, vars)
}
