//! Error type shared by both halves of the codec, plus the one-way
//! stream-health flag that makes failures sticky.

use std::io;
use std::sync::Arc;

use thiserror::Error;

/// Failure modes of a [`Writer`](crate::Writer) or [`Reader`](crate::Reader).
///
/// `EndOfStream` is a sentinel rather than a defect: reading past the last
/// value of a well-formed stream is how a consumer discovers the end. Every
/// other variant marks the stream as corrupt or the transport as dead.
///
/// The type is `Clone` because the first failure is latched and handed back
/// by every subsequent operation. `io::Error` itself is not clonable, so the
/// `Io` variant shares it behind an [`Arc`].
#[derive(Debug, Error, Clone)]
pub enum PackError {
    /// The source ran out of bytes, either between values (clean end) or in
    /// the middle of one (truncation).
    #[error("end of stream")]
    EndOfStream,
    /// A varint encoding does not fit in 64 bits.
    #[error("varint overflows a 64-bit integer")]
    VarintOverflow,
    /// A string payload is not valid UTF-8.
    #[error("invalid UTF-8 in string payload")]
    InvalidUtf8,
    /// The sink or source reported a transport failure.
    #[error("io error: {0}")]
    Io(Arc<io::Error>),
}

impl PackError {
    /// True for the clean-exhaustion sentinel.
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, PackError::EndOfStream)
    }
}

impl From<io::Error> for PackError {
    fn from(err: io::Error) -> Self {
        PackError::Io(Arc::new(err))
    }
}

// `io::Error` has no equality; `Io` compares by kind and message.
impl PartialEq for PackError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (PackError::EndOfStream, PackError::EndOfStream) => true,
            (PackError::VarintOverflow, PackError::VarintOverflow) => true,
            (PackError::InvalidUtf8, PackError::InvalidUtf8) => true,
            (PackError::Io(a), PackError::Io(b)) => {
                Arc::ptr_eq(a, b) || (a.kind() == b.kind() && a.to_string() == b.to_string())
            }
            _ => false,
        }
    }
}

/// Health of one codec half. The only transition is `Active` to `Failed`,
/// and the first error wins.
#[derive(Debug)]
pub(crate) enum StreamState {
    Active,
    Failed(PackError),
}

impl StreamState {
    /// Short-circuit with the sticky error, if any.
    pub(crate) fn check(&self) -> Result<(), PackError> {
        match self {
            StreamState::Active => Ok(()),
            StreamState::Failed(err) => Err(err.clone()),
        }
    }

    /// Latch `err` as the sticky error and return the error to propagate.
    /// If a failure is already latched, the original is kept and returned.
    pub(crate) fn fail(&mut self, err: PackError) -> PackError {
        if let StreamState::Failed(first) = self {
            return first.clone();
        }
        *self = StreamState::Failed(err.clone());
        err
    }

    pub(crate) fn error(&self) -> Option<&PackError> {
        match self {
            StreamState::Active => None,
            StreamState::Failed(err) => Some(err),
        }
    }
}
