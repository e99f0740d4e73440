//! A [`GraphQLTokenSource`](crate::token_source::GraphQLTokenSource) that lexes
//! from a `&str` input.
//!
//! Token values borrow directly from the source string, so names, numbers,
//! and strings are never copied during lexing.
//!
//! ```rust
//! use gqlengine_parser::token_source::StrGraphQLTokenSource;
//!
//! let lexer = StrGraphQLTokenSource::new("{ name }");
//! let kinds: Vec<_> = lexer.map(|token| token.kind).collect();
//! assert_eq!(kinds.len(), 4); // `{`, `name`, `}`, Eof
//! ```

use crate::GraphQLSourceSpan;
use crate::SourcePosition;
use crate::smallvec;
use crate::token::GraphQLToken;
use crate::token::GraphQLTokenKind;

/// Lexes GraphQL tokens from a string slice.
pub struct StrGraphQLTokenSource<'src> {
    source: &'src str,

    /// The remaining text to lex is `&source[curr_byte_offset..]`.
    curr_byte_offset: usize,

    /// Current 0-based line number.
    curr_line: usize,

    /// Current 0-based character column.
    curr_col: usize,

    /// Whether the previous character was `\r`, so that `\r\n` counts as a
    /// single line terminator.
    last_char_was_cr: bool,

    /// Whether the EOF token has been emitted.
    finished: bool,
}

impl<'src> StrGraphQLTokenSource<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            curr_byte_offset: 0,
            curr_line: 0,
            curr_col: 0,
            last_char_was_cr: false,
            finished: false,
        }
    }

    // =========================================================================
    // Position and scanning helpers
    // =========================================================================

    fn remaining(&self) -> &'src str {
        &self.source[self.curr_byte_offset..]
    }

    fn curr_position(&self) -> SourcePosition {
        SourcePosition::new(self.curr_line, self.curr_col, self.curr_byte_offset)
    }

    fn peek_char(&self) -> Option<char> {
        self.peek_char_nth(0)
    }

    fn peek_char_nth(&self, n: usize) -> Option<char> {
        self.remaining().chars().nth(n)
    }

    /// Consumes the next character, updating line and column tracking.
    fn consume(&mut self) -> Option<char> {
        let ch = self.peek_char()?;

        match ch {
            '\n' if self.last_char_was_cr => {
                // Second half of `\r\n`; the line was already advanced.
                self.last_char_was_cr = false;
            },
            '\n' => {
                self.curr_line += 1;
                self.curr_col = 0;
            },
            '\r' => {
                self.curr_line += 1;
                self.curr_col = 0;
                self.last_char_was_cr = true;
            },
            _ => {
                self.curr_col += 1;
                self.last_char_was_cr = false;
            },
        }

        self.curr_byte_offset += ch.len_utf8();
        Some(ch)
    }

    fn consume_while(&mut self, pred: impl Fn(char) -> bool) {
        while let Some(ch) = self.peek_char() {
            if !pred(ch) {
                break;
            }
            self.consume();
        }
    }

    fn make_span(&self, start: SourcePosition) -> GraphQLSourceSpan {
        GraphQLSourceSpan::new(start, self.curr_position())
    }

    fn make_token(
        &self,
        kind: GraphQLTokenKind<'src>,
        start: SourcePosition,
    ) -> GraphQLToken<'src> {
        GraphQLToken::new(kind, self.make_span(start))
    }

    fn punctuator(
        &mut self,
        kind: GraphQLTokenKind<'src>,
        start: SourcePosition,
    ) -> GraphQLToken<'src> {
        self.consume();
        self.make_token(kind, start)
    }

    // =========================================================================
    // Lexer main loop
    // =========================================================================

    fn next_token(&mut self) -> GraphQLToken<'src> {
        loop {
            self.skip_ignored();
            let start = self.curr_position();

            return match self.peek_char() {
                None => self.make_token(GraphQLTokenKind::Eof, start),

                Some('#') => {
                    self.consume_while(|ch| ch != '\n' && ch != '\r');
                    continue;
                },

                Some('!') => self.punctuator(GraphQLTokenKind::Bang, start),
                Some('$') => self.punctuator(GraphQLTokenKind::Dollar, start),
                Some('&') => self.punctuator(GraphQLTokenKind::Ampersand, start),
                Some('(') => self.punctuator(GraphQLTokenKind::ParenOpen, start),
                Some(')') => self.punctuator(GraphQLTokenKind::ParenClose, start),
                Some(':') => self.punctuator(GraphQLTokenKind::Colon, start),
                Some('=') => self.punctuator(GraphQLTokenKind::Equals, start),
                Some('@') => self.punctuator(GraphQLTokenKind::At, start),
                Some('[') => self.punctuator(GraphQLTokenKind::SquareBracketOpen, start),
                Some(']') => self.punctuator(GraphQLTokenKind::SquareBracketClose, start),
                Some('{') => self.punctuator(GraphQLTokenKind::CurlyBraceOpen, start),
                Some('}') => self.punctuator(GraphQLTokenKind::CurlyBraceClose, start),
                Some('|') => self.punctuator(GraphQLTokenKind::Pipe, start),

                Some('.') => self.lex_dot_or_ellipsis(start),
                Some('"') => self.lex_string(start),
                Some(c) if is_name_start(c) => self.lex_name(start),
                Some(c) if c == '-' || c.is_ascii_digit() => self.lex_number(start),
                Some(_) => self.lex_invalid_character(start),
            };
        }
    }

    /// Skips whitespace, line terminators, the BOM, and commas.
    fn skip_ignored(&mut self) {
        self.consume_while(|ch| matches!(ch, ' ' | '\t' | '\n' | '\r' | ',' | '\u{FEFF}'));
    }

    // =========================================================================
    // Dot / Ellipsis lexing
    // =========================================================================

    /// Lexes dots, producing either an `Ellipsis` token or an error.
    ///
    /// Only three adjacent dots form a spread; `..` and spaced-out dots get a
    /// hint pointing at the likely intent.
    fn lex_dot_or_ellipsis(&mut self, start: SourcePosition) -> GraphQLToken<'src> {
        if self.remaining().starts_with("...") {
            self.consume();
            self.consume();
            self.consume();
            return self.make_token(GraphQLTokenKind::Ellipsis, start);
        }

        self.consume();
        if self.peek_char() == Some('.') {
            self.consume();
            let kind = GraphQLTokenKind::error(
                "Unexpected `..` (use `...` for spread operator)",
                smallvec!["Add one more `.` to form the spread operator `...`".to_string()],
            );
            return self.make_token(kind, start);
        }

        self.consume_while(|ch| ch == ' ' || ch == '\t');
        let notes = if self.remaining().starts_with('.') {
            smallvec![
                "These dots may have been intended to form a `...` spread operator. \
                 Try removing the extra spacing between the dots."
                    .to_string()
            ]
        } else {
            smallvec![]
        };
        let kind = GraphQLTokenKind::error("Unexpected `.`", notes);
        GraphQLToken::new(
            kind,
            GraphQLSourceSpan::new(
                start,
                SourcePosition::new(start.line(), start.col() + 1, start.byte_offset() + 1),
            ),
        )
    }

    // =========================================================================
    // Names
    // =========================================================================

    /// Lexes a name (`/[_A-Za-z][_0-9A-Za-z]*/`). `true`, `false`, and `null`
    /// come out as their own token kinds.
    fn lex_name(&mut self, start: SourcePosition) -> GraphQLToken<'src> {
        let name_start = self.curr_byte_offset;
        self.consume();
        self.consume_while(is_name_continue);

        let kind = match &self.source[name_start..self.curr_byte_offset] {
            "true" => GraphQLTokenKind::True,
            "false" => GraphQLTokenKind::False,
            "null" => GraphQLTokenKind::Null,
            name => GraphQLTokenKind::name_borrowed(name),
        };
        self.make_token(kind, start)
    }

    // =========================================================================
    // Numbers
    // =========================================================================

    /// Lexes an integer or float literal:
    /// `-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?`
    fn lex_number(&mut self, start: SourcePosition) -> GraphQLToken<'src> {
        let num_start = self.curr_byte_offset;
        let mut is_float = false;

        if self.peek_char() == Some('-') {
            self.consume();
        }

        match self.peek_char() {
            Some('0') => {
                self.consume();
                if self.peek_char().is_some_and(|ch| ch.is_ascii_digit()) {
                    return self.lex_number_error(
                        start,
                        num_start,
                        "Invalid number: leading zeros are not allowed",
                    );
                }
            },
            Some(ch) if ch.is_ascii_digit() => {
                self.consume_while(|ch| ch.is_ascii_digit());
            },
            _ => {
                return self.make_token(GraphQLTokenKind::error("Unexpected `-`", smallvec![]), start);
            },
        }

        if self.peek_char() == Some('.')
            && self.peek_char_nth(1).is_some_and(|ch| ch.is_ascii_digit()) {
            is_float = true;
            self.consume();
            self.consume_while(|ch| ch.is_ascii_digit());
        }

        if matches!(self.peek_char(), Some('e') | Some('E')) {
            is_float = true;
            self.consume();
            if matches!(self.peek_char(), Some('+') | Some('-')) {
                self.consume();
            }
            if !self.peek_char().is_some_and(|ch| ch.is_ascii_digit()) {
                return self.lex_number_error(
                    start,
                    num_start,
                    "Invalid number: exponent must have at least one digit",
                );
            }
            self.consume_while(|ch| ch.is_ascii_digit());
        }

        // A number immediately followed by a name character (e.g. `123abc`)
        // is malformed.
        if self.peek_char().is_some_and(is_name_start) {
            return self.lex_number_error(
                start,
                num_start,
                "Invalid number: unexpected character after number",
            );
        }

        let num_text = &self.source[num_start..self.curr_byte_offset];
        let kind = if is_float {
            GraphQLTokenKind::float_value_borrowed(num_text)
        } else {
            GraphQLTokenKind::int_value_borrowed(num_text)
        };
        self.make_token(kind, start)
    }

    fn lex_number_error(
        &mut self,
        start: SourcePosition,
        num_start: usize,
        message: &str,
    ) -> GraphQLToken<'src> {
        self.consume_while(|ch| {
            ch.is_ascii_alphanumeric() || matches!(ch, '.' | '+' | '-' | '_')
        });
        let invalid_text = &self.source[num_start..self.curr_byte_offset];
        let kind = GraphQLTokenKind::error(format!("{message}: `{invalid_text}`"), smallvec![]);
        self.make_token(kind, start)
    }

    // =========================================================================
    // Strings
    // =========================================================================

    /// Lexes a single-line string literal. Escapes are validated later, by
    /// [`GraphQLTokenKind::parse_string_value()`].
    fn lex_string(&mut self, start: SourcePosition) -> GraphQLToken<'src> {
        let str_start = self.curr_byte_offset;
        if self.remaining().starts_with("\"\"\"") {
            return self.lex_block_string(start, str_start);
        }

        self.consume();
        loop {
            match self.peek_char() {
                None | Some('\n') | Some('\r') => {
                    let kind = GraphQLTokenKind::error(
                        "Unterminated string literal",
                        smallvec![
                            "Single-line strings cannot contain unescaped newlines; use a \
                             block string (triple quotes) or add the closing `\"`"
                                .to_string()
                        ],
                    );
                    return self.make_token(kind, start);
                },
                Some('"') => {
                    self.consume();
                    break;
                },
                Some('\\') => {
                    self.consume();
                    if self.peek_char().is_some() {
                        self.consume();
                    }
                },
                Some(_) => {
                    self.consume();
                },
            }
        }

        let text = &self.source[str_start..self.curr_byte_offset];
        self.make_token(GraphQLTokenKind::string_value_borrowed(text), start)
    }

    fn lex_block_string(&mut self, start: SourcePosition, str_start: usize) -> GraphQLToken<'src> {
        for _ in 0..3 {
            self.consume();
        }

        loop {
            let rest = self.remaining();
            if rest.is_empty() {
                let kind = GraphQLTokenKind::error(
                    "Unterminated block string",
                    smallvec!["Add closing `\"\"\"`".to_string()],
                );
                return self.make_token(kind, start);
            }
            if rest.starts_with("\\\"\"\"") {
                for _ in 0..4 {
                    self.consume();
                }
            } else if rest.starts_with("\"\"\"") {
                for _ in 0..3 {
                    self.consume();
                }
                break;
            } else {
                self.consume();
            }
        }

        let text = &self.source[str_start..self.curr_byte_offset];
        self.make_token(GraphQLTokenKind::string_value_borrowed(text), start)
    }

    // =========================================================================
    // Invalid characters
    // =========================================================================

    fn lex_invalid_character(&mut self, start: SourcePosition) -> GraphQLToken<'src> {
        let description = match self.consume() {
            Some(ch) => describe_char(ch),
            None => "end of input".to_string(),
        };
        let kind = GraphQLTokenKind::error(
            format!("Unexpected character {description}"),
            smallvec![],
        );
        self.make_token(kind, start)
    }
}

impl<'src> Iterator for StrGraphQLTokenSource<'src> {
    type Item = GraphQLToken<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let token = self.next_token();
        if matches!(token.kind, GraphQLTokenKind::Eof) {
            self.finished = true;
        }
        Some(token)
    }
}

fn is_name_start(ch: char) -> bool {
    ch == '_' || ch.is_ascii_alphabetic()
}

fn is_name_continue(ch: char) -> bool {
    ch == '_' || ch.is_ascii_alphanumeric()
}

/// Describes a character for error messages. Invisible characters also get
/// their code point.
fn describe_char(ch: char) -> String {
    if ch.is_control() || (ch.is_whitespace() && ch != ' ') {
        format!("`{}` (U+{:04X})", ch.escape_debug(), ch as u32)
    } else {
        format!("`{ch}`")
    }
}
