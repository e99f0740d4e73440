use crate::GraphQLErrorNotes;
use crate::GraphQLStringParsingError;
use std::borrow::Cow;
use std::num::ParseFloatError;
use std::num::ParseIntError;

/// The kind of a GraphQL token.
///
/// Literal values (`IntValue`, `FloatValue`, `StringValue`) store only the raw
/// source text, borrowed from the input. Negative numbers like `-123` are
/// lexed as single tokens, matching the grammar for `IntValue`/`FloatValue`.
#[derive(Clone, Debug, PartialEq)]
pub enum GraphQLTokenKind<'src> {
    // =========================================================================
    // Punctuators
    // =========================================================================
    /// `&`
    Ampersand,
    /// `@`
    At,
    /// `!`
    Bang,
    /// `:`
    Colon,
    /// `}`
    CurlyBraceClose,
    /// `{`
    CurlyBraceOpen,
    /// `$`
    Dollar,
    /// `...`
    Ellipsis,
    /// `=`
    Equals,
    /// `)`
    ParenClose,
    /// `(`
    ParenOpen,
    /// `|`
    Pipe,
    /// `]`
    SquareBracketClose,
    /// `[`
    SquareBracketOpen,

    // =========================================================================
    // Literals (raw source text only)
    // =========================================================================
    /// A GraphQL name/identifier.
    Name(Cow<'src, str>),

    /// Raw source text of an integer literal, including optional negative sign.
    ///
    /// Use `parse_int_value()` to parse the raw text into an `i64`.
    IntValue(Cow<'src, str>),

    /// Raw source text of a float literal, including optional negative sign.
    ///
    /// Use `parse_float_value()` to parse the raw text into an `f64`.
    FloatValue(Cow<'src, str>),

    /// Raw source text of a string literal, including quotes.
    ///
    /// Use `parse_string_value()` to process escape sequences.
    StringValue(Cow<'src, str>),

    /// The `true` literal.
    True,
    /// The `false` literal.
    False,
    /// The `null` literal.
    Null,

    /// End of input.
    Eof,

    /// A lexer error. The parser turns the first one it meets into a syntax
    /// error.
    Error {
        message: String,
        error_notes: GraphQLErrorNotes,
    },
}

impl<'src> GraphQLTokenKind<'src> {
    #[inline]
    pub fn name_borrowed(s: &'src str) -> Self {
        GraphQLTokenKind::Name(Cow::Borrowed(s))
    }

    #[inline]
    pub fn int_value_borrowed(s: &'src str) -> Self {
        GraphQLTokenKind::IntValue(Cow::Borrowed(s))
    }

    #[inline]
    pub fn float_value_borrowed(s: &'src str) -> Self {
        GraphQLTokenKind::FloatValue(Cow::Borrowed(s))
    }

    #[inline]
    pub fn string_value_borrowed(s: &'src str) -> Self {
        GraphQLTokenKind::StringValue(Cow::Borrowed(s))
    }

    #[inline]
    pub fn error(message: impl Into<String>, error_notes: GraphQLErrorNotes) -> Self {
        GraphQLTokenKind::Error {
            message: message.into(),
            error_notes,
        }
    }

    /// Returns the string representation of this token if it is a punctuator.
    pub fn as_punctuator_str(&self) -> Option<&'static str> {
        match self {
            GraphQLTokenKind::Ampersand => Some("&"),
            GraphQLTokenKind::At => Some("@"),
            GraphQLTokenKind::Bang => Some("!"),
            GraphQLTokenKind::Colon => Some(":"),
            GraphQLTokenKind::CurlyBraceClose => Some("}"),
            GraphQLTokenKind::CurlyBraceOpen => Some("{"),
            GraphQLTokenKind::Dollar => Some("$"),
            GraphQLTokenKind::Ellipsis => Some("..."),
            GraphQLTokenKind::Equals => Some("="),
            GraphQLTokenKind::ParenClose => Some(")"),
            GraphQLTokenKind::ParenOpen => Some("("),
            GraphQLTokenKind::Pipe => Some("|"),
            GraphQLTokenKind::SquareBracketClose => Some("]"),
            GraphQLTokenKind::SquareBracketOpen => Some("["),

            GraphQLTokenKind::Name(_)
            | GraphQLTokenKind::IntValue(_)
            | GraphQLTokenKind::FloatValue(_)
            | GraphQLTokenKind::StringValue(_)
            | GraphQLTokenKind::True
            | GraphQLTokenKind::False
            | GraphQLTokenKind::Null
            | GraphQLTokenKind::Eof
            | GraphQLTokenKind::Error { .. } => None,
        }
    }

    /// Returns `true` if this token is a punctuator.
    pub fn is_punctuator(&self) -> bool {
        self.as_punctuator_str().is_some()
    }

    /// Returns `true` if this token represents a lexer error.
    pub fn is_error(&self) -> bool {
        matches!(self, GraphQLTokenKind::Error { .. })
    }

    /// Human-readable rendering used in "expected X, found Y" messages.
    pub fn display(&self) -> String {
        if let Some(punct) = self.as_punctuator_str() {
            return punct.to_string();
        }
        match self {
            GraphQLTokenKind::Name(s)
            | GraphQLTokenKind::IntValue(s)
            | GraphQLTokenKind::FloatValue(s) => s.to_string(),
            GraphQLTokenKind::StringValue(_) => "string".to_string(),
            GraphQLTokenKind::True => "true".to_string(),
            GraphQLTokenKind::False => "false".to_string(),
            GraphQLTokenKind::Null => "null".to_string(),
            GraphQLTokenKind::Eof => "end of input".to_string(),
            GraphQLTokenKind::Error { message, .. } => {
                format!("tokenization error: {message}")
            },
            _ => String::new(),
        }
    }

    /// Parse an `IntValue`'s raw text to `i64`.
    ///
    /// Returns `None` if this is not an `IntValue`.
    pub fn parse_int_value(&self) -> Option<Result<i64, ParseIntError>> {
        match self {
            GraphQLTokenKind::IntValue(raw) => Some(raw.parse()),
            _ => None,
        }
    }

    /// Parse a `FloatValue`'s raw text to `f64`.
    ///
    /// Returns `None` if this is not a `FloatValue`.
    pub fn parse_float_value(&self) -> Option<Result<f64, ParseFloatError>> {
        match self {
            GraphQLTokenKind::FloatValue(raw) => Some(raw.parse()),
            _ => None,
        }
    }

    /// Parse a `StringValue`'s raw text to unescaped content.
    ///
    /// - Single-line strings (`"..."`) process `\n`, `\r`, `\t`, `\\`, `\"`,
    ///   `\/`, `\b`, `\f`, `\uXXXX` and `\u{X...}`.
    /// - Block strings (`"""..."""`) get common indentation stripped and only
    ///   honor the `\"""` escape.
    ///
    /// Returns `None` if this is not a `StringValue`.
    pub fn parse_string_value(&self) -> Option<Result<String, GraphQLStringParsingError>> {
        match self {
            GraphQLTokenKind::StringValue(raw) => Some(parse_graphql_string(raw)),
            _ => None,
        }
    }
}

fn parse_graphql_string(raw: &str) -> Result<String, GraphQLStringParsingError> {
    if raw.starts_with("\"\"\"") {
        parse_block_string(raw)
    } else {
        parse_single_line_string(raw)
    }
}

fn parse_single_line_string(raw: &str) -> Result<String, GraphQLStringParsingError> {
    if raw.len() < 2 || !raw.starts_with('"') || !raw.ends_with('"') {
        return Err(GraphQLStringParsingError::UnterminatedString);
    }
    let content = &raw[1..raw.len() - 1];

    let mut result = String::with_capacity(content.len());
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('r') => result.push('\r'),
            Some('t') => result.push('\t'),
            Some('\\') => result.push('\\'),
            Some('"') => result.push('"'),
            Some('/') => result.push('/'),
            Some('b') => result.push('\u{0008}'),
            Some('f') => result.push('\u{000C}'),
            Some('u') => result.push(parse_unicode_escape(&mut chars)?),
            Some(other) => {
                return Err(GraphQLStringParsingError::InvalidEscapeSequence(format!(
                    "\\{other}"
                )));
            },
            None => {
                return Err(GraphQLStringParsingError::InvalidEscapeSequence(
                    "\\".to_string(),
                ));
            },
        }
    }

    Ok(result)
}

/// Parses the remainder of a `\u` escape: either `XXXX` or `{X...}`.
fn parse_unicode_escape(
    chars: &mut std::iter::Peekable<std::str::Chars>,
) -> Result<char, GraphQLStringParsingError> {
    let mut hex = String::with_capacity(4);
    let braced = chars.peek() == Some(&'{');
    if braced {
        chars.next();
        loop {
            match chars.next() {
                Some('}') => break,
                Some(c) if c.is_ascii_hexdigit() => hex.push(c),
                Some(c) => {
                    return Err(GraphQLStringParsingError::InvalidUnicodeEscape(format!(
                        "\\u{{{hex}{c}"
                    )));
                },
                None => {
                    return Err(GraphQLStringParsingError::InvalidUnicodeEscape(format!(
                        "\\u{{{hex}"
                    )));
                },
            }
        }
    } else {
        for _ in 0..4 {
            match chars.next() {
                Some(c) if c.is_ascii_hexdigit() => hex.push(c),
                Some(c) => {
                    return Err(GraphQLStringParsingError::InvalidUnicodeEscape(format!(
                        "\\u{hex}{c}"
                    )));
                },
                None => {
                    return Err(GraphQLStringParsingError::InvalidUnicodeEscape(format!(
                        "\\u{hex}"
                    )));
                },
            }
        }
    }

    let invalid = || {
        let shown = if braced { format!("\\u{{{hex}}}") } else { format!("\\u{hex}") };
        GraphQLStringParsingError::InvalidUnicodeEscape(shown)
    };
    if hex.is_empty() {
        return Err(invalid());
    }
    let code_point = u32::from_str_radix(&hex, 16).map_err(|_| invalid())?;
    char::from_u32(code_point).ok_or_else(invalid)
}

fn parse_block_string(raw: &str) -> Result<String, GraphQLStringParsingError> {
    if raw.len() < 6 || !raw.starts_with("\"\"\"") || !raw.ends_with("\"\"\"") {
        return Err(GraphQLStringParsingError::UnterminatedString);
    }
    let content = raw[3..raw.len() - 3].replace("\\\"\"\"", "\"\"\"");
    let lines: Vec<&str> = content.lines().collect();

    // Common indentation ignores the first line and blank lines.
    let common_indent = lines
        .iter()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);

    let mut result_lines: Vec<&str> = lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let line: &str = line;
            if i > 0 {
                line.get(common_indent..).unwrap_or(line)
            } else {
                line
            }
        })
        .collect();

    while result_lines.first().is_some_and(|l| l.trim().is_empty()) {
        result_lines.remove(0);
    }
    while result_lines.last().is_some_and(|l| l.trim().is_empty()) {
        result_lines.pop();
    }

    Ok(result_lines.join("\n"))
}
