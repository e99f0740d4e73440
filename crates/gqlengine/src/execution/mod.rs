//! Resolution of a selected operation into serialized response data.
//!
//! Sibling fields resolve concurrently (except the top level of a mutation,
//! which runs in order), but each object's members are written in selection
//! order once all of them have finished. A field whose non-null type is
//! violated yields a [`Bubble`] that the nearest nullable position turns
//! into `null`.

mod executor;
mod field_collection;
mod leaf_value;
mod response_path;

pub(crate) use executor::Executor;
pub(crate) use response_path::ResponsePath;

/// A non-null violation travelling towards the nearest nullable position.
/// The error itself was already recorded where it happened.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Bubble;

/// A completed position: its serialized JSON, or a bubble.
pub(crate) type FieldResult = Result<Vec<u8>, Bubble>;

pub(crate) const NULL: &[u8] = b"null";
