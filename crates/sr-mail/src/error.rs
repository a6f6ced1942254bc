//! Error types for email delivery.

use thiserror::Error;

/// Result type for delivery operations.
pub type Result<T> = std::result::Result<T, MailError>;

/// Errors that can occur while configuring or performing a delivery.
///
/// Configuration errors are raised before any connection attempt. Transport
/// errors never invalidate the already-produced report; the caller may build
/// a new job and resend.
#[derive(Error, Debug)]
pub enum MailError {
    /// A required configuration variable is absent or empty.
    #[error("missing mail configuration: {0} is not set")]
    MissingConfig(&'static str),

    /// The relay port is not a valid port number.
    #[error("invalid SMTP port '{0}'")]
    InvalidPort(String),

    /// A sender or recipient address failed to parse.
    #[error("invalid email address: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The attachment content type is malformed.
    #[error("invalid attachment content type: {0}")]
    ContentType(#[from] lettre::message::header::ContentTypeErr),

    /// The message could not be built.
    #[error("failed to build message: {0}")]
    Message(#[from] lettre::error::Error),

    /// Connection, authentication or transmission failure.
    #[error("SMTP delivery failed: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}
