/// Core parsing logic.
///
/// Contains the expression entry point and the full-body parse that lexes a
/// directive body and rejects trailing tokens.
pub mod core;

/// Binary operator parsing.
///
/// Implements the precedence ladder for all binary operators, from logical
/// OR at the lowest level down to multiplication.
pub mod binary;

/// Unary and primary parsing.
///
/// Handles prefix operators, literals, grouping, variable references, and
/// builtin method calls.
pub mod unary;
