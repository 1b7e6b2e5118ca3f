#[derive(Debug)]
/// Represents all errors that can occur while interpreting directives and
/// evaluating expressions.
pub enum RuntimeError {
    /// An `#elseif` directive with no enclosing `#if`.
    ElseIfWithoutIf {
        /// The template line where the error occurred.
        line: usize,
    },
    /// An `#else` directive with no enclosing `#if`.
    ElseWithoutIf {
        /// The template line where the error occurred.
        line: usize,
    },
    /// An `#end` directive with no enclosing `#if`.
    EndWithoutIf {
        /// The template line where the error occurred.
        line: usize,
    },
    /// An `#if` block still open at the end of the template.
    UnclosedBlock {
        /// The template line where the unclosed block was opened.
        line: usize,
    },
    /// A value had an unexpected or incompatible type.
    TypeError {
        /// Details about the type mismatch.
        details: String,
        /// The template line where the error occurred.
        line:    usize,
    },
    /// A numeric value was expected, but not found.
    ExpectedNumber {
        /// The template line where the error occurred.
        line: usize,
    },
    /// Attempted division or remainder by zero.
    DivisionByZero {
        /// The template line where the error occurred.
        line: usize,
    },
    /// Integer arithmetic overflowed.
    Overflow {
        /// The template line where the error occurred.
        line: usize,
    },
    /// The builtin integer-parsing helper was given non-numeric input.
    IntegerParse {
        /// The input that failed to parse.
        input: String,
        /// The template line where the error occurred.
        line:  usize,
    },
    /// A method call on an unknown namespace or method.
    UnknownMethod {
        /// The namespace the method was called on.
        target: String,
        /// The method name.
        name:   String,
        /// The template line where the error occurred.
        line:   usize,
    },
    /// A numeric value was too large to be represented safely.
    LiteralTooLarge {
        /// The template line where the error occurred.
        line: usize,
    },
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ElseIfWithoutIf { line } => {
                write!(f, "Error on line {line}: #elseif without matching #if.")
            },
            Self::ElseWithoutIf { line } => {
                write!(f, "Error on line {line}: #else without matching #if.")
            },
            Self::EndWithoutIf { line } => {
                write!(f, "Error on line {line}: #end without matching #if.")
            },
            Self::UnclosedBlock { line } => write!(f,
                                                   "Error on line {line}: #if block is never closed with #end."),

            Self::TypeError { details, line } => {
                write!(f, "Error on line {line}: Type error: {details}.")
            },
            Self::ExpectedNumber { line } => write!(f, "Error on line {line}: Expected number."),
            Self::DivisionByZero { line } => write!(f, "Error on line {line}: Division by zero."),

            Self::Overflow { line } => write!(f,
                                              "Error on line {line}: Integer overflow while trying to compute result."),

            Self::IntegerParse { input, line } => write!(f,
                                                         "Error on line {line}: Cannot parse '{input}' as an integer."),

            Self::UnknownMethod { target, name, line } => write!(f,
                                                                 "Error on line {line}: Unknown method '{name}' on '{target}'."),

            Self::LiteralTooLarge { line } => {
                write!(f, "Error on line {line}: Literal is too large.")
            },
        }
    }
}

impl std::error::Error for RuntimeError {}
