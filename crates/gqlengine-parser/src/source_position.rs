use serde::Serialize;

/// A position within source text, as tracked by the lexer.
///
/// **All values are 0-based.** Convert to a user-facing [`Location`] with
/// [`SourcePosition::to_location()`].
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct SourcePosition {
    /// Line number (0-based: first line is 0)
    line: usize,

    /// Character count within the current line (0-based)
    col: usize,

    /// Byte offset from the start of the document (0-based)
    byte_offset: usize,
}

impl SourcePosition {
    pub fn new(line: usize, col: usize, byte_offset: usize) -> Self {
        Self {
            line,
            col,
            byte_offset,
        }
    }

    /// Returns the 0-based line number.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Returns the 0-based character column within the current line.
    ///
    /// This counts characters, not bytes: both 'a' (1 byte) and '🎉'
    /// (4 bytes) advance the column by 1.
    pub fn col(&self) -> usize {
        self.col
    }

    /// Returns the 0-based byte offset from document start.
    pub fn byte_offset(&self) -> usize {
        self.byte_offset
    }

    /// Converts to a 1-based [`Location`] suitable for error reporting.
    pub fn to_location(&self) -> Location {
        Location {
            line: self.line + 1,
            column: self.col + 1,
        }
    }
}

/// A 1-based `{line, column}` pair as it appears in GraphQL error payloads.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl Location {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Returns `true` if `self` appears earlier in the source than `other`.
    pub fn before(&self, other: &Location) -> bool {
        self < other
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
