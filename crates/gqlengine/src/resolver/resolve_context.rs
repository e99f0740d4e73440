use gqlengine_core::PathSegment;
use tokio_util::sync::CancellationToken;

/// Per-call information handed to a resolver.
#[derive(Clone, Copy, Debug)]
pub struct ResolveContext<'a> {
    /// Cancelled when the request times out or the caller cancels it.
    /// Long-running resolvers should watch it; the engine does not
    /// interrupt a call in progress.
    pub cancellation: &'a CancellationToken,

    /// Response path of the field being resolved.
    pub path: &'a [PathSegment],

    /// The field's response key.
    pub alias: &'a str,

    /// The concrete object type the field is being resolved on.
    pub object_type: &'a str,
}

impl ResolveContext<'_> {
    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }
}
