use thiserror::Error;

use crate::{ErrorCode, ErrorResponse};

/// Failure reported by a remote service, as seen by client code.
///
/// Branch on `code`; `message` is for logs and humans only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[{code}]: {message}")]
pub struct ServiceError {
    pub code: ErrorCode,
    pub message: String,
}

impl ServiceError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl From<ErrorResponse> for ServiceError {
    fn from(response: ErrorResponse) -> Self {
        Self {
            code: response.code(),
            message: response.message,
        }
    }
}

impl From<ServiceError> for ErrorResponse {
    fn from(err: ServiceError) -> Self {
        ErrorResponse::new(err.message, err.code)
    }
}

#[cfg(test)]
mod tests {
    use super::ServiceError;
    use crate::{ErrorCode, ErrorResponse};

    #[test]
    fn display_leads_with_symbolic_code() {
        let err = ServiceError::new(ErrorCode::InvalidRequestError, "missing field `amount`");
        assert_eq!(err.to_string(), "[INVALID_REQUEST_ERROR]: missing field `amount`");
    }

    #[test]
    fn conversion_from_newer_payload_falls_back() {
        let response = ErrorResponse {
            message: "quota exceeded".to_string(),
            error_code: 42,
        };

        let err = ServiceError::from(response);
        assert_eq!(err.code, ErrorCode::UnknownError);
        assert_eq!(err.message, "quota exceeded");
    }

    #[test]
    fn converts_back_into_wire_payload() {
        let err = ServiceError::new(ErrorCode::LightningError, "route not found");
        let response = ErrorResponse::from(err);
        assert_eq!(response.error_code, 3);
        assert_eq!(response.message, "route not found");
    }
}
