/// Parsing errors.
///
/// Defines all error types that can occur while tokenizing a template or
/// parsing a directive body. Parse errors include unterminated directives,
/// malformed `#set` bodies, unexpected tokens, and invalid literals.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised while interpreting directives
/// and evaluating expressions. Runtime errors include structural mistakes
/// (unmatched `#elseif`/`#else`/`#end`, unclosed blocks), type mismatches,
/// division by zero, and failed numeric conversions.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

#[derive(Debug)]
/// The failure of a whole render call, from either phase.
///
/// A render fails as a unit: there is no partial-output salvage. This type
/// lets callers match on the phase while still carrying the precise
/// underlying error.
pub enum TemplateError {
    /// The template or a directive body failed to parse.
    Parse(ParseError),
    /// Interpreting the directives or evaluating an expression failed.
    Render(RuntimeError),
}

impl std::fmt::Display for TemplateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "{e}"),
            Self::Render(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for TemplateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::Render(e) => Some(e),
        }
    }
}

impl From<ParseError> for TemplateError {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

impl From<RuntimeError> for TemplateError {
    fn from(e: RuntimeError) -> Self {
        Self::Render(e)
    }
}
