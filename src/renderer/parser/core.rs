use std::iter::Peekable;

use logos::Logos;

use crate::{
    ast::Expr,
    error::ParseError,
    renderer::{lexer::Token, parser::binary::parse_logical_or},
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a full expression.
///
/// This is the entry point for expression parsing.
/// It begins at the lowest-precedence level, logical OR, and recursively
/// descends through the precedence hierarchy.
///
/// Grammar: `expression := logical_or`
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, line)` pairs.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_logical_or(tokens)
}

/// Lexes and parses a complete directive body.
///
/// The body is tokenized with the expression lexer, every token is paired
/// with the directive's template line, and the resulting stream must form
/// exactly one expression. Anything left over is an error.
///
/// # Parameters
/// - `source`: The raw directive body, e.g. the text between the parentheses
///   of `#if(...)`.
/// - `line`: The template line the directive appears on.
///
/// # Errors
/// - `UnexpectedToken` for characters the lexer does not recognize.
/// - `UnexpectedTrailingTokens` when tokens remain after the expression.
/// - Any error from expression parsing itself.
///
/// # Example
/// ```
/// use velocette::renderer::parser::core::parse_expression_body;
///
/// assert!(parse_expression_body("$count > 3 && $name == 'x'", 1).is_ok());
/// assert!(parse_expression_body("1 +", 1).is_err());
/// assert!(parse_expression_body("1 2", 1).is_err());
/// ```
pub fn parse_expression_body(source: &str, line: usize) -> ParseResult<Expr> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(token) = lexer.next() {
        if let Ok(tok) = token {
            tokens.push((tok, line));
        } else {
            return Err(ParseError::UnexpectedToken { token: lexer.slice().to_string(),
                                                     line });
        }
    }

    if tokens.is_empty() {
        return Err(ParseError::UnexpectedEndOfInput { line });
    }

    let mut iter = tokens.iter().peekable();
    // Every body token carries the directive's line, so an end-of-input in
    // the middle of the expression belongs to that line too.
    let expr = parse_expression(&mut iter).map_err(|e| match e {
                                              ParseError::UnexpectedEndOfInput { .. } => {
                                                  ParseError::UnexpectedEndOfInput { line }
                                              },
                                              e => e,
                                          })?;

    if let Some((token, line)) = iter.peek() {
        return Err(ParseError::UnexpectedTrailingTokens { token: format!("{token:?}"),
                                                          line:  *line, });
    }

    Ok(expr)
}
