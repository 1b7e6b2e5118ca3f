/// Template tokenization.
///
/// Splits raw template text into literal runs and directive segments,
/// capturing balanced-parenthesis directive bodies without parsing them.
pub mod tokenizer;

/// The directive interpreter.
///
/// Walks the segment stream with a stack of conditional frames, applying
/// `#set` directives and deciding which text emits.
pub mod interpreter;

/// `$identifier` interpolation for literal text runs.
pub mod interpolate;

/// Expression lexing.
///
/// Converts a directive body into a vector of tokens, each one carrying
/// the template line it came from.
pub mod lexer;

/// Expression parsing.
///
/// A recursive-descent parser turning directive-body tokens into an
/// abstract syntax tree.
pub mod parser;

/// Expression evaluation.
///
/// The render context and the evaluation of expression trees against it.
pub mod evaluator;

/// Runtime values.
///
/// The value type flowing through evaluation and interpolation.
pub mod value;
