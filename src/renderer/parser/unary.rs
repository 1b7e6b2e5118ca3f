use std::iter::Peekable;

use crate::{
    ast::{Expr, UnaryOperator},
    error::ParseError,
    renderer::{
        lexer::Token,
        parser::core::{ParseResult, parse_expression},
    },
};

/// Parses a unary expression.
///
/// Supports prefix operators:
/// - `-`  (numeric negation)
/// - `!`  (logical not)
///
/// Unary operators are right-associative, so an input like `!-$x` is parsed
/// as `!( -$x )`.
///
/// If no unary operator is present, the function delegates to
/// [`parse_primary`].
///
/// Grammar:
/// ```text
///     unary := ("-" | "!") unary
///            | primary
/// ```
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
///
/// # Returns
/// An [`Expr::UnaryOp`] or a primary expression.
pub(crate) fn parse_unary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some((Token::Minus, line)) = tokens.peek() {
        let line = *line;
        tokens.next();
        let expr = parse_unary(tokens)?;
        Ok(Expr::UnaryOp { op: UnaryOperator::Negate,
                           expr: Box::new(expr),
                           line })
    } else if let Some((Token::Bang, line)) = tokens.peek() {
        let line = *line;
        tokens.next();
        let expr = parse_unary(tokens)?;
        Ok(Expr::UnaryOp { op: UnaryOperator::Not,
                           expr: Box::new(expr),
                           line })
    } else {
        parse_primary(tokens)
    }
}

/// Parses a primary (atomic) expression.
///
/// Primary expressions form the base of the expression grammar and include:
/// - numeric, boolean, and string literals
/// - `$identifier` references
/// - builtin method calls (`$Integer.parseInt(...)`)
/// - parenthesized expressions
///
/// Grammar (simplified):
/// ```text
///     primary := literal
///              | "(" expression ")"
///              | "$ident" ["." ident "(" arguments ")"]
/// ```
/// # Parameters
/// - `tokens`: Token iterator positioned at the start of a primary
///   expression.
///
/// # Returns
/// The parsed primary [`Expr`] or a `ParseError` on failure.
pub(crate) fn parse_primary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let peeked = tokens.peek()
                       .ok_or(ParseError::UnexpectedEndOfInput { line: 0 })?;

    match peeked {
        (Token::Real(..) | Token::Integer(..) | Token::Bool(..) | Token::String(..), _) => {
            parse_literal(tokens)
        },
        (Token::LParen, _) => parse_grouping(tokens),
        (Token::VarRef(_), _) => parse_reference(tokens),
        (tok, line) => Err(ParseError::UnexpectedToken { token: format!("{tok:?}"),
                                                         line:  *line, }),
    }
}

/// Parses a numeric, boolean, or string literal.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at a literal.
///
/// # Returns
/// An [`Expr::Literal`] containing the parsed value.
fn parse_literal<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (tok, line) = tokens.next().unwrap();
    let value = match tok {
        Token::Real(r) => (*r).into(),
        Token::Integer(n) => (*n).into(),
        Token::Bool(b) => (*b).into(),
        Token::String(s) => s.as_str().into(),
        _ => unreachable!(),
    };
    Ok(Expr::Literal { value, line: *line })
}

/// Parses a parenthesized expression.
///
/// Expected form: `( expression )`
///
/// The function consumes the opening parenthesis, parses the enclosed
/// expression, and then requires a closing `)`. Failure to find the closing
/// parenthesis yields `ParseError::ExpectedClosingParen`.
///
/// Grammar: `grouping := "(" expression ")"`
///
/// # Parameters
/// - `tokens`: Token iterator positioned at `(`.
///
/// # Returns
/// The inner expression as-is (no wrapper node).
fn parse_grouping<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (_, line) = *tokens.next().unwrap();
    let expr = parse_expression(tokens)?;
    match tokens.next() {
        Some((Token::RParen, _)) => Ok(expr),
        _ => Err(ParseError::ExpectedClosingParen { line }),
    }
}

/// Parses a `$identifier` reference or a builtin method call.
///
/// A bare reference becomes an [`Expr::Variable`]. When the reference is
/// followed by `.method(` the full call is parsed into an
/// [`Expr::MethodCall`] with comma-separated argument expressions:
///
/// ```text
///     reference := "$ident"
///                | "$ident" "." ident "(" [expression ("," expression)*] ")"
/// ```
/// # Parameters
/// - `tokens`: Token iterator positioned at a `$identifier` token.
///
/// # Returns
/// - [`Expr::MethodCall`] if followed by `.method(...)`,
/// - [`Expr::Variable`] otherwise.
///
/// # Errors
/// Returns a `ParseError` if the method name or its parentheses are
/// malformed, or the closing `)` is missing.
fn parse_reference<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (name, line) = match tokens.next() {
        Some((Token::VarRef(n), line)) => (n.clone(), *line),
        _ => unreachable!(),
    };

    if !matches!(tokens.peek(), Some((Token::Dot, _))) {
        return Ok(Expr::Variable { name, line });
    }
    tokens.next(); // consume '.'

    let method = match tokens.next() {
        Some((Token::Identifier(m), _)) => m.clone(),
        Some((tok, line)) => {
            return Err(ParseError::UnexpectedToken { token: format!("Expected method name after '.', found {tok:?}"),
                                                     line:  *line, });
        },
        None => return Err(ParseError::UnexpectedEndOfInput { line }),
    };

    match tokens.next() {
        Some((Token::LParen, _)) => {},
        Some((tok, line)) => {
            return Err(ParseError::UnexpectedToken { token: format!("Expected '(' after method name, found {tok:?}"),
                                                     line:  *line, });
        },
        None => return Err(ParseError::UnexpectedEndOfInput { line }),
    }

    let arguments = parse_arguments(tokens, line)?;

    Ok(Expr::MethodCall { target: name,
                          method,
                          arguments,
                          line })
}

/// Parses a comma-separated argument list up to the closing `)`.
///
/// An empty list (`()`) is allowed.
fn parse_arguments<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Vec<Expr>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut arguments = Vec::new();

    if let Some((Token::RParen, _)) = tokens.peek() {
        tokens.next();
        return Ok(arguments);
    }

    loop {
        arguments.push(parse_expression(tokens)?);

        match tokens.next() {
            Some((Token::Comma, _)) => {},
            Some((Token::RParen, _)) => break,
            Some((tok, line)) => {
                return Err(ParseError::UnexpectedToken { token: format!("Expected ',' or ')' in argument list, found {tok:?}"),
                                                         line:  *line, });
            },
            None => return Err(ParseError::ExpectedClosingParen { line }),
        }
    }

    Ok(arguments)
}
