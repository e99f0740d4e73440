use crate::GraphQLErrorNotes;
use crate::GraphQLParseErrorKind;
use crate::GraphQLSourceSpan;
use crate::Location;

/// A syntax error with location information and contextual notes.
///
/// Parsing stops at the first of these; there is no partial-document
/// recovery.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{}", self.format_oneline())]
pub struct GraphQLParseError {
    /// Human-readable primary error message, e.g. "expected `:`, found `}`".
    message: String,

    /// Where the error was detected. For "unexpected token" errors this is
    /// the offending token.
    span: GraphQLSourceSpan,

    kind: GraphQLParseErrorKind,

    /// Help text with suggestions on how to fix the error.
    notes: GraphQLErrorNotes,
}

impl GraphQLParseError {
    pub fn new(
        message: impl Into<String>,
        span: GraphQLSourceSpan,
        kind: GraphQLParseErrorKind,
    ) -> Self {
        Self {
            message: message.into(),
            span,
            kind,
            notes: GraphQLErrorNotes::new(),
        }
    }

    /// Creates a parse error from a lexer error token, preserving the lexer's
    /// message and notes.
    pub fn from_lexer_error(
        message: impl Into<String>,
        span: GraphQLSourceSpan,
        notes: GraphQLErrorNotes,
    ) -> Self {
        Self {
            message: message.into(),
            span,
            kind: GraphQLParseErrorKind::LexerError,
            notes,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn span(&self) -> &GraphQLSourceSpan {
        &self.span
    }

    /// The 1-based location where the error was detected.
    pub fn location(&self) -> Location {
        self.span.location()
    }

    pub fn kind(&self) -> &GraphQLParseErrorKind {
        &self.kind
    }

    pub fn notes(&self) -> &GraphQLErrorNotes {
        &self.notes
    }

    pub fn add_note(&mut self, message: impl Into<String>) {
        self.notes.push(message.into());
    }

    /// Formats this error as a single line: `line:column: message`.
    pub fn format_oneline(&self) -> String {
        format!("{}: {}", self.location(), self.message)
    }

    /// Formats this error with a source snippet and caret, followed by any
    /// notes:
    ///
    /// ```text
    /// error: expected `}`, found end of input
    ///   --> 1:2
    ///    |
    ///  1 | {
    ///    |  ^
    ///    = help: ...
    /// ```
    pub fn format_detailed(&self, source: Option<&str>) -> String {
        let location = self.location();
        let mut out = format!("error: {}\n  --> {}\n", self.message, location);
        if let Some(line_text) = source.and_then(|s| s.lines().nth(location.line - 1)) {
            let gutter = location.line.to_string().len();
            out.push_str(&format!("{:gutter$} |\n", ""));
            out.push_str(&format!("{} | {}\n", location.line, line_text));
            out.push_str(&format!(
                "{:gutter$} | {}^\n",
                "",
                " ".repeat(location.column - 1),
            ));
        }
        for note in &self.notes {
            out.push_str(&format!("   = help: {note}\n"));
        }
        out
    }
}
