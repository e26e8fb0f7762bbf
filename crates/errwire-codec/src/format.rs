use std::fmt;

/// Content type for binary error payloads.
pub const APPLICATION_OCTET_STREAM: &str = "application/octet-stream";

/// Content type for JSON error payloads.
pub const APPLICATION_JSON: &str = "application/json";

/// Body encodings an error payload can travel in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WireFormat {
    /// Field-tagged binary: field 1 message, field 2 error code.
    #[default]
    Binary,
    /// JSON object with `message` and the integer `error_code` identity.
    Json,
}

impl WireFormat {
    pub fn content_type(self) -> &'static str {
        match self {
            WireFormat::Binary => APPLICATION_OCTET_STREAM,
            WireFormat::Json => APPLICATION_JSON,
        }
    }

    /// Picks the format matching a `Content-Type` header value, ignoring parameters.
    pub fn from_content_type(value: &str) -> Option<Self> {
        let essence = value.split(';').next().unwrap_or_default().trim();
        if essence.eq_ignore_ascii_case(APPLICATION_OCTET_STREAM) {
            Some(WireFormat::Binary)
        } else if essence.eq_ignore_ascii_case(APPLICATION_JSON) {
            Some(WireFormat::Json)
        } else {
            None
        }
    }
}

impl fmt::Display for WireFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireFormat::Binary => f.write_str("binary"),
            WireFormat::Json => f.write_str("json"),
        }
    }
}
