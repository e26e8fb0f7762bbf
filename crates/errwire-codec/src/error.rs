use thiserror::Error;

use crate::WireFormat;

/// Input bytes were not a structurally valid error payload.
///
/// Unrecognized error codes, absent fields and empty messages never produce this; they decode
/// to ordinary values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to decode {format} error payload: {reason}")]
pub struct DecodeFailure {
    /// Encoding the input was parsed as.
    pub format: WireFormat,
    /// Parser diagnostic, for logs only.
    pub reason: String,
}

impl DecodeFailure {
    pub(crate) fn new(format: WireFormat, reason: impl ToString) -> Self {
        Self {
            format,
            reason: reason.to_string(),
        }
    }
}

impl From<prost::DecodeError> for DecodeFailure {
    fn from(err: prost::DecodeError) -> Self {
        Self::new(WireFormat::Binary, err)
    }
}

impl From<serde_json::Error> for DecodeFailure {
    fn from(err: serde_json::Error) -> Self {
        Self::new(WireFormat::Json, err)
    }
}

/// Failures reading or writing length-prefixed error payload streams.
#[derive(Debug, Error)]
pub enum FrameError {
    /// Underlying reader/writer error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Frame size exceeded maximum allowed payload.
    #[error("frame too large: {size} > {max}")]
    FrameTooLarge { size: u32, max: u32 },
    /// Frame contents were not a valid payload.
    #[error(transparent)]
    Decode(#[from] DecodeFailure),
}
