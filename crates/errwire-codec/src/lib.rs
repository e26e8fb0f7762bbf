//! Binary and JSON codec for the error contract, plus async frame helpers.

mod error;
mod format;

pub mod codec;
pub mod framing;

pub use codec::{
    decode, decode_as, decode_service_error, encode, encode_as, encode_response, from_json,
    to_json,
};
pub use error::{DecodeFailure, FrameError};
pub use format::{APPLICATION_JSON, APPLICATION_OCTET_STREAM, WireFormat};
