use crate::Location;
use crate::SourcePosition;

/// Represents a span of source text from start to end position.
///
/// The span is a half-open interval: `[start_inclusive, end_exclusive)`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct GraphQLSourceSpan {
    pub start_inclusive: SourcePosition,
    pub end_exclusive: SourcePosition,
}

impl GraphQLSourceSpan {
    pub fn new(start: SourcePosition, end: SourcePosition) -> Self {
        Self {
            start_inclusive: start,
            end_exclusive: end,
        }
    }

    /// The 1-based location of the first character in this span.
    pub fn location(&self) -> Location {
        self.start_inclusive.to_location()
    }
}
