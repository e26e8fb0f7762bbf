use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, de};

use crate::ErrorCode;

/// Payload returned in the body of every response that is not a success.
///
/// Field 1 carries `message`, field 2 carries `error_code`. Fields equal to their default
/// are omitted on the wire and decode back to the same default.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ::prost::Message)]
#[serde(default)]
pub struct ErrorResponse {
    /// Generic description of the error condition in English.
    ///
    /// Intended for a human audience only. It must never be parsed or matched against to
    /// extract information; client code may log it and nothing else.
    #[prost(string, tag = "1")]
    pub message: String,
    /// Wire identity of the [`ErrorCode`] classifying this failure.
    ///
    /// Read as a full 64-bit varint and kept raw so payloads from newer producers still
    /// decode. An `int32` enum value is sign-extended on the wire, so known identities encode
    /// to the same bytes. Read it through [`ErrorResponse::code`], which maps identities this
    /// build does not know to [`ErrorCode::UnknownError`].
    #[prost(int64, tag = "2")]
    #[serde(deserialize_with = "deserialize_identity")]
    pub error_code: i64,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>, code: ErrorCode) -> Self {
        Self {
            message: message.into(),
            error_code: code.identity().into(),
        }
    }

    /// Classification of this payload with the unknown-identity fallback applied.
    pub fn code(&self) -> ErrorCode {
        ErrorCode::from_identity(self.error_code)
    }

    /// Rewrites an unrecognized `error_code` identity to [`ErrorCode::UnknownError`].
    ///
    /// Returns the identity that was replaced, if any.
    pub fn coerce_unknown_code(&mut self) -> Option<i64> {
        if ErrorCode::is_known(self.error_code) {
            return None;
        }

        let original = self.error_code;
        self.error_code = ErrorCode::UnknownError.identity().into();
        Some(original)
    }
}

/// Accepts any JSON integer or `null` for `error_code`.
///
/// `null` reads as the default identity. Integers above `i64::MAX` cannot name a known code
/// and read as `UnknownError`.
fn deserialize_identity<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(IdentityVisitor)
}

struct IdentityVisitor;

impl<'de> de::Visitor<'de> for IdentityVisitor {
    type Value = i64;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integer error code identity or null")
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<i64, E> {
        Ok(value)
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<i64, E> {
        let unknown = i64::from(ErrorCode::UnknownError.identity());
        Ok(i64::try_from(value).unwrap_or(unknown))
    }

    fn visit_unit<E: de::Error>(self) -> Result<i64, E> {
        Ok(ErrorCode::UnknownError.identity().into())
    }

    fn visit_none<E: de::Error>(self) -> Result<i64, E> {
        self.visit_unit()
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<i64, D::Error> {
        deserializer.deserialize_any(self)
    }
}
