#[derive(Debug)]
/// Represents all errors that can occur while tokenizing a template or
/// parsing a directive body.
pub enum ParseError {
    /// A parenthesized directive whose matching `)` was never found.
    UnterminatedDirective {
        /// The directive keyword, e.g. `if` or `set`.
        directive: String,
        /// The template line where the directive starts.
        line:      usize,
    },
    /// A `#set` body that does not match the `identifier = expression` shape.
    InvalidSetDirective {
        /// The raw directive body.
        body: String,
        /// The template line where the error occurred.
        line: usize,
    },
    /// Found an unexpected token while parsing an expression.
    UnexpectedToken {
        /// The token encountered.
        token: String,
        /// The template line where the error occurred.
        line:  usize,
    },
    /// Reached the end of an expression unexpectedly.
    UnexpectedEndOfInput {
        /// The template line where the error occurred.
        line: usize,
    },
    /// A closing parenthesis `)` was expected but not found.
    ExpectedClosingParen {
        /// The template line where the error occurred.
        line: usize,
    },
    /// Found extra tokens after an expression should have ended.
    UnexpectedTrailingTokens {
        /// The extra/unexpected token.
        token: String,
        /// The template line where the error occurred.
        line:  usize,
    },
    /// A numeric literal was too large to be represented safely.
    LiteralTooLarge {
        /// The template line where the error occurred.
        line: usize,
    },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnterminatedDirective { directive, line } => write!(f,
                                                                      "Error on line {line}: Unterminated '#{directive}' directive: no matching ')' found."),

            Self::InvalidSetDirective { body, line } => write!(f,
                                                               "Error on line {line}: Invalid #set body '{body}'. Expected: #set($name = expression)."),

            Self::UnexpectedToken { token, line } => {
                write!(f, "Error on line {line}: Unexpected token: {token}.")
            },

            Self::UnexpectedEndOfInput { line } => {
                write!(f, "Error on line {line}: Unexpected end of expression.")
            },

            Self::ExpectedClosingParen { line } => write!(f,
                                                          "Error on line {line}: Expected closing parenthesis ')' but none found."),

            Self::UnexpectedTrailingTokens { token, line } => write!(f,
                                                                     "Error on line {line}: Extra tokens after expression. Check your input: {token}"),

            Self::LiteralTooLarge { line } => {
                write!(f, "Error on line {line}: Literal is too large.")
            },
        }
    }
}

impl std::error::Error for ParseError {}
