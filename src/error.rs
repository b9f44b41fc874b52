//! Unified error type.

use thiserror::Error;

/// The error type returned by tinct's JSON shims.
///
/// Dispatch outcomes (404, 405, `OPTIONS`) are expressed as HTTP
/// [`Response`](crate::Response) values, not as `Error`s. This type only
/// surfaces codec failures, and the caller decides which response they
/// turn into.
#[derive(Debug, Error)]
pub enum Error {
    /// A value could not be encoded. Nothing was produced.
    #[error("serialize: {0}")]
    Serialization(#[source] serde_json::Error),
    /// A request body could not be decoded: bad syntax, a schema mismatch,
    /// a premature end of input, or a failure reading the body stream.
    #[error("deserialize: {0}")]
    Deserialization(#[source] serde_json::Error),
}

impl Error {
    /// The underlying `serde_json` error, for [`classify`](serde_json::Error::classify)
    /// and line/column inspection.
    pub fn json(&self) -> &serde_json::Error {
        match self {
            Self::Serialization(e) | Self::Deserialization(e) => e,
        }
    }
}
