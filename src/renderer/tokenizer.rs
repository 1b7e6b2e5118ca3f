use crate::error::ParseError;

/// One structural piece of a template.
///
/// A template is a flat sequence of segments: literal text runs and the
/// five recognized directives. Directive bodies are captured raw here;
/// expression parsing happens later, and only for bodies the interpreter
/// actually needs to evaluate.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// A run of literal template text, emitted verbatim (after `$variable`
    /// interpolation) when the enclosing branches are active.
    Text(String),
    /// A `#set(body)` directive with its raw, unparsed body.
    Set {
        /// Everything between the balanced outer parentheses.
        body: String,
    },
    /// An `#if(condition)` directive opening a conditional block.
    If {
        /// The raw condition text between the parentheses.
        condition: String,
    },
    /// An `#elseif(condition)` directive within a conditional block.
    ElseIf {
        /// The raw condition text between the parentheses.
        condition: String,
    },
    /// An `#else` directive.
    Else,
    /// An `#end` directive closing the innermost conditional block.
    End,
}

/// Splits a template into segments with their line numbers.
///
/// Scans for `#` characters and tries to match a directive keyword at each
/// one. Directive bodies run to the parenthesis that balances the opening
/// `(`, so nested parentheses inside a condition are captured whole. A `#`
/// that starts no recognized directive is ordinary text.
///
/// Line numbers are one-based and count `\n` characters up to the start of
/// each segment.
///
/// # Parameters
/// - `template`: The raw template text.
///
/// # Errors
/// `ParseError::UnterminatedDirective` when a directive body's parentheses
/// never balance before the end of the template.
///
/// # Example
/// ```
/// use velocette::renderer::tokenizer::{Segment, tokenize};
///
/// let segments = tokenize("a#if($x)b#end").unwrap();
/// assert_eq!(segments,
///            vec![(Segment::Text("a".to_string()), 1),
///                 (Segment::If { condition: "$x".to_string() }, 1),
///                 (Segment::Text("b".to_string()), 1),
///                 (Segment::End, 1)]);
/// ```
pub fn tokenize(template: &str) -> Result<Vec<(Segment, usize)>, ParseError> {
    let bytes = template.as_bytes();
    let mut segments = Vec::new();
    let mut text = String::new();
    let mut text_line = 1;
    let mut line = 1;
    let mut pos = 0;

    while pos < bytes.len() {
        if bytes[pos] != b'#' {
            if text.is_empty() {
                text_line = line;
            }
            if bytes[pos] == b'\n' {
                line += 1;
            }
            // Template text is valid UTF-8; multi-byte characters never
            // contain b'#' or b'\n' continuation bytes.
            let ch_len = utf8_len(bytes[pos]);
            text.push_str(&template[pos..pos + ch_len]);
            pos += ch_len;
            continue;
        }

        match match_directive(template, pos, line)? {
            Some((segment, consumed)) => {
                flush_text(&mut segments, &mut text, text_line);
                segments.push((segment, line));
                line += template[pos..pos + consumed].matches('\n').count();
                pos += consumed;
            },
            None => {
                if text.is_empty() {
                    text_line = line;
                }
                text.push('#');
                pos += 1;
            },
        }
    }

    flush_text(&mut segments, &mut text, text_line);
    Ok(segments)
}

/// Byte length of the UTF-8 character starting at `first`.
const fn utf8_len(first: u8) -> usize {
    match first {
        b if b < 0x80 => 1,
        b if b < 0xE0 => 2,
        b if b < 0xF0 => 3,
        _ => 4,
    }
}

fn flush_text(segments: &mut Vec<(Segment, usize)>, text: &mut String, line: usize) {
    if !text.is_empty() {
        segments.push((Segment::Text(std::mem::take(text)), line));
    }
}

/// Tries to match a directive starting at the `#` at `pos`.
///
/// Returns the segment and the number of bytes consumed, or `None` when no
/// directive keyword follows the `#`. Keywords are checked longest-first so
/// `#elseif` never matches as `#else` followed by stray text.
fn match_directive(template: &str,
                   pos: usize,
                   line: usize)
                   -> Result<Option<(Segment, usize)>, ParseError> {
    let rest = &template[pos + 1..];

    for keyword in ["set", "elseif", "if"] {
        if let Some(after) = rest.strip_prefix(keyword)
           && let Some((body, body_len)) = capture_body(after)
        {
            let consumed = 1 + keyword.len() + body_len;
            let segment = match keyword {
                "set" => Segment::Set { body },
                "elseif" => Segment::ElseIf { condition: body },
                _ => Segment::If { condition: body },
            };
            return Ok(Some((segment, consumed)));
        }

        // A directive keyword with an opening paren that never balances is
        // a hard error, not literal text.
        if let Some(after) = rest.strip_prefix(keyword) {
            let skipped = after.len() - after.trim_start_matches([' ', '\t']).len();
            if after[skipped..].starts_with('(') {
                return Err(ParseError::UnterminatedDirective { directive: keyword.to_string(),
                                                               line });
            }
        }
    }

    if rest.starts_with("elseif") {
        // Reached only when no paren follows; fall through to #else below is
        // wrong for "elseif", so treat it as plain text.
        return Ok(None);
    }
    if rest.starts_with("else") {
        return Ok(Some((Segment::Else, 1 + "else".len())));
    }
    if rest.starts_with("end") {
        return Ok(Some((Segment::End, 1 + "end".len())));
    }

    Ok(None)
}

/// Captures a parenthesized directive body following a keyword.
///
/// Skips spaces and tabs, then requires `(` and scans to the parenthesis
/// that balances it. Returns the body text between the outer parentheses
/// and the total byte length consumed (whitespace and both parentheses
/// included), or `None` when no `(` follows the keyword.
fn capture_body(after_keyword: &str) -> Option<(String, usize)> {
    let skipped = after_keyword.len()
                  - after_keyword.trim_start_matches([' ', '\t']).len();
    let rest = &after_keyword[skipped..];
    if !rest.starts_with('(') {
        return None;
    }

    let mut depth = 0usize;
    for (i, ch) in rest.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    let body = rest[1..i].to_string();
                    return Some((body, skipped + i + 1));
                }
            },
            _ => {},
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::{Segment, tokenize};

    #[test]
    fn plain_text_is_one_segment() {
        let segments = tokenize("hello world").unwrap();
        assert_eq!(segments,
                   vec![(Segment::Text("hello world".to_string()), 1)]);
    }

    #[test]
    fn captures_nested_parentheses_whole() {
        let segments = tokenize("#if(($a + 1) > 2)#end").unwrap();
        assert_eq!(segments,
                   vec![(Segment::If { condition: "($a + 1) > 2".to_string() }, 1),
                        (Segment::End, 1)]);
    }

    #[test]
    fn allows_space_before_parenthesis() {
        let segments = tokenize("#set ($x = 1)").unwrap();
        assert_eq!(segments,
                   vec![(Segment::Set { body: "$x = 1".to_string() }, 1)]);
    }

    #[test]
    fn elseif_is_not_mistaken_for_else() {
        let segments = tokenize("#if($a)#elseif($b)#else#end").unwrap();
        assert_eq!(segments,
                   vec![(Segment::If { condition: "$a".to_string() }, 1),
                        (Segment::ElseIf { condition: "$b".to_string() }, 1),
                        (Segment::Else, 1),
                        (Segment::End, 1)]);
    }

    #[test]
    fn unknown_directive_is_literal_text() {
        let segments = tokenize("#foreach($x)").unwrap();
        assert_eq!(segments,
                   vec![(Segment::Text("#foreach($x)".to_string()), 1)]);
    }

    #[test]
    fn if_without_parenthesis_is_literal_text() {
        let segments = tokenize("#if without parens").unwrap();
        assert_eq!(segments,
                   vec![(Segment::Text("#if without parens".to_string()), 1)]);
    }

    #[test]
    fn unbalanced_body_is_an_error() {
        assert!(tokenize("#if($a").is_err());
        assert!(tokenize("#set($x = (1 + 2").is_err());
    }

    #[test]
    fn lines_are_counted_across_segments() {
        let segments = tokenize("a\nb\n#set($x = 1)\n#end").unwrap();
        assert_eq!(segments,
                   vec![(Segment::Text("a\nb\n".to_string()), 1),
                        (Segment::Set { body: "$x = 1".to_string() }, 3),
                        (Segment::Text("\n".to_string()), 3),
                        (Segment::End, 4)]);
    }
}
