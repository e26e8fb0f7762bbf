use std::fmt;

use serde::Serialize;

/// Coarse-grained classification attached to every failed response.
///
/// Identities 0 through 4 are permanently bound to the variants below. New categories may
/// only be appended with fresh identities; decoders that predate them see `UnknownError`.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    ::prost::Enumeration,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(i32)]
pub enum ErrorCode {
    /// Default value, and the fallback for any identity this build does not recognize.
    UnknownError = 0,
    /// Used in the following cases:
    ///    - The request was missing a required argument.
    ///    - An argument was invalid, incomplete or in the wrong format.
    ///    - The request body could not be deserialized.
    ///    - The request does not follow the api contract.
    InvalidRequestError = 1,
    /// Authentication failed or the request was not authorized.
    AuthError = 2,
    /// A Lightning operation failed.
    LightningError = 3,
    /// The server hit an internal fault. The caller is probably not at fault.
    InternalServerError = 4,
}

impl ErrorCode {
    /// Every known code, in identity order.
    pub const ALL: [ErrorCode; 5] = [
        ErrorCode::UnknownError,
        ErrorCode::InvalidRequestError,
        ErrorCode::AuthError,
        ErrorCode::LightningError,
        ErrorCode::InternalServerError,
    ];

    /// Stable integer identity carried on the wire.
    pub fn identity(self) -> i32 {
        self as i32
    }

    /// Resolves a wire identity, coercing anything unrecognized to [`ErrorCode::UnknownError`].
    ///
    /// Takes the full 64-bit varint value so a wide identity is never truncated into a
    /// known one.
    pub fn from_identity(identity: i64) -> Self {
        match identity {
            0 => ErrorCode::UnknownError,
            1 => ErrorCode::InvalidRequestError,
            2 => ErrorCode::AuthError,
            3 => ErrorCode::LightningError,
            4 => ErrorCode::InternalServerError,
            _ => ErrorCode::UnknownError,
        }
    }

    /// Returns true when `identity` names one of the codes in [`ErrorCode::ALL`].
    pub fn is_known(identity: i64) -> bool {
        Self::ALL
            .iter()
            .any(|code| i64::from(code.identity()) == identity)
    }

    /// Stable symbolic name of the code.
    ///
    /// These names never change and are safe for programmatic use.
    pub fn as_str_name(&self) -> &'static str {
        match self {
            ErrorCode::UnknownError => "UNKNOWN_ERROR",
            ErrorCode::InvalidRequestError => "INVALID_REQUEST_ERROR",
            ErrorCode::AuthError => "AUTH_ERROR",
            ErrorCode::LightningError => "LIGHTNING_ERROR",
            ErrorCode::InternalServerError => "INTERNAL_SERVER_ERROR",
        }
    }

    /// Looks a code up by its symbolic name.
    pub fn from_str_name(value: &str) -> Option<Self> {
        match value {
            "UNKNOWN_ERROR" => Some(Self::UnknownError),
            "INVALID_REQUEST_ERROR" => Some(Self::InvalidRequestError),
            "AUTH_ERROR" => Some(Self::AuthError),
            "LIGHTNING_ERROR" => Some(Self::LightningError),
            "INTERNAL_SERVER_ERROR" => Some(Self::InternalServerError),
            _ => None,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str_name())
    }
}
