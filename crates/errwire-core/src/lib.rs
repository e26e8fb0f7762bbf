//! Data model of the cross-service error contract.
//!
//! A non-success response carries an [`ErrorResponse`]: a free-form message for humans and
//! an [`ErrorCode`] for programs. Identities a build does not recognize are read as
//! [`ErrorCode::UnknownError`].

pub mod codes;
pub mod errors;
pub mod response;

pub use codes::ErrorCode;
pub use errors::ServiceError;
pub use response::ErrorResponse;
