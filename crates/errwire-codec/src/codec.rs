use errwire_core::{ErrorCode, ErrorResponse, ServiceError};
use prost::Message;

use crate::{DecodeFailure, WireFormat};

/// Encodes a message and classification into the binary wire form.
///
/// Fields holding their default value are left out, so `UnknownError` with an empty message
/// encodes to zero bytes.
pub fn encode(message: &str, code: ErrorCode) -> Vec<u8> {
    encode_response(&ErrorResponse::new(message, code))
}

/// Encodes an already-built payload as-is, including an `error_code` identity this build
/// does not recognize.
pub fn encode_response(response: &ErrorResponse) -> Vec<u8> {
    response.encode_to_vec()
}

/// Decodes a binary payload, reading unrecognized error code identities as `UnknownError`.
///
/// Fails only when the bytes are not valid field framing: truncated fields, bad length
/// prefixes, invalid wire types, or a message that is not UTF-8.
pub fn decode(bytes: &[u8]) -> Result<ErrorResponse, DecodeFailure> {
    let mut response = ErrorResponse::decode(bytes)?;
    apply_fallback(&mut response);
    Ok(response)
}

/// Renders a payload as a JSON object with the integer `error_code` identity.
pub fn to_json(response: &ErrorResponse) -> String {
    serde_json::json!({
        "message": response.message,
        "error_code": response.error_code,
    })
    .to_string()
}

/// Parses a JSON payload. Missing keys take their defaults and unknown keys are ignored.
pub fn from_json(bytes: &[u8]) -> Result<ErrorResponse, DecodeFailure> {
    let mut response: ErrorResponse = serde_json::from_slice(bytes)?;
    apply_fallback(&mut response);
    Ok(response)
}

pub fn encode_as(format: WireFormat, response: &ErrorResponse) -> Vec<u8> {
    match format {
        WireFormat::Binary => encode_response(response),
        WireFormat::Json => to_json(response).into_bytes(),
    }
}

pub fn decode_as(format: WireFormat, bytes: &[u8]) -> Result<ErrorResponse, DecodeFailure> {
    match format {
        WireFormat::Binary => decode(bytes),
        WireFormat::Json => from_json(bytes),
    }
}

/// Decodes a response body straight into a [`ServiceError`] for `?`-style propagation.
pub fn decode_service_error(
    format: WireFormat,
    bytes: &[u8],
) -> Result<ServiceError, DecodeFailure> {
    decode_as(format, bytes).map(ServiceError::from)
}

fn apply_fallback(response: &mut ErrorResponse) {
    if let Some(identity) = response.coerce_unknown_code() {
        tracing::debug!(
            identity,
            fallback = %ErrorCode::UnknownError,
            "unrecognized error code identity"
        );
    }
}
