/// Core evaluation logic and context management.
///
/// Contains the render context, variable resolution with numeric coercion,
/// and the main expression evaluation dispatch.
pub mod core;

/// Binary operator evaluation logic.
///
/// Handles the execution of all binary operations in expressions:
/// arithmetic, string concatenation, comparisons, and equality.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements arithmetic negation and logical NOT.
pub mod unary;

/// The builtin namespace.
///
/// Defines the reserved identifiers seeded into every context and the
/// methods they expose, such as `$Integer.parseInt`.
pub mod builtin;
