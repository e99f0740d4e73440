//! Lookahead buffer over a [`GraphQLTokenSource`].

use std::collections::VecDeque;

use crate::SourcePosition;
use crate::token::GraphQLToken;
use crate::token::GraphQLTokenKind;
use crate::token_source::GraphQLTokenSource;

/// Streams [`GraphQLToken`]s from some [`GraphQLTokenSource`] with a bounded
/// lookahead buffer.
///
/// Tokens are stored in a [`VecDeque`]; `consume()` pops from the front and
/// `peek_nth()` fills the back on demand.
pub struct GraphQLTokenStream<'src, TTokenSource: GraphQLTokenSource<'src>> {
    token_source: TTokenSource,
    buffer: VecDeque<GraphQLToken<'src>>,
    /// End of the most recently consumed token.
    last_end_position: Option<SourcePosition>,
}

impl<'src, TTokenSource: GraphQLTokenSource<'src>> GraphQLTokenStream<'src, TTokenSource> {
    pub fn new(token_source: TTokenSource) -> Self {
        Self {
            token_source,
            buffer: VecDeque::new(),
            last_end_position: None,
        }
    }

    /// Advance to the next token and return it as an owned value.
    ///
    /// Returns `None` if the stream is exhausted.
    pub fn consume(&mut self) -> Option<GraphQLToken<'src>> {
        self.ensure_buffer_has(1);
        let token = self.buffer.pop_front();
        if let Some(ref t) = token {
            self.last_end_position = Some(t.span.end_exclusive);
        }
        token
    }

    /// Position of the next unconsumed token, or the end of the last
    /// consumed one when the stream is exhausted.
    pub fn current_position(&mut self) -> SourcePosition {
        match self.peek() {
            Some(token) => token.span.start_inclusive,
            None => self.last_end_position.unwrap_or_default(),
        }
    }

    /// Returns the number of tokens currently buffered (unconsumed).
    pub fn current_buffer_len(&self) -> usize {
        self.buffer.len()
    }

    fn ensure_buffer_has(&mut self, count: usize) {
        while self.buffer.len() < count {
            match self.token_source.next() {
                Some(token) => self.buffer.push_back(token),
                None => break,
            }
        }
    }

    /// Returns `true` if there are no more tokens to consume, or if the next
    /// token is `Eof`.
    pub fn is_at_end(&mut self) -> bool {
        match self.peek() {
            None => true,
            Some(token) => matches!(token.kind, GraphQLTokenKind::Eof),
        }
    }

    /// Peek at the next token without consuming it.
    #[inline]
    pub fn peek(&mut self) -> Option<&GraphQLToken<'src>> {
        self.peek_nth(0)
    }

    /// Peek at the nth token ahead (0-indexed from the next unconsumed token).
    pub fn peek_nth(&mut self, n: usize) -> Option<&GraphQLToken<'src>> {
        self.ensure_buffer_has(n + 1);
        self.buffer.get(n)
    }
}
