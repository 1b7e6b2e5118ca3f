/// Numeric conversion helpers.
///
/// This module provides safe functions for converting between integer and
/// floating-point types without risking silent data loss, plus the
/// truncation-toward-zero conversion used when storing assignment results.
///
/// All fallible functions return a `Result`, which is `Ok` if the conversion
/// is valid, or an error if the value is out of range or not finite.
pub mod num;
