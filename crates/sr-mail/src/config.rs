//! Mail relay configuration.

use crate::error::{MailError, Result};

/// Environment variable names.
const ENV_FROM_ADDRESS: &str = "EMAIL_ADDRESS";
const ENV_PASSWORD: &str = "EMAIL_PASSWORD";
const ENV_SMTP_SERVER: &str = "SMTP_SERVER";
const ENV_SMTP_PORT: &str = "SMTP_PORT";

/// Display name on outgoing messages.
pub const SENDER_NAME: &str = "Sales Reports";

/// SMTP relay settings.
///
/// An explicit value passed to [`crate::Scheduler::new`], so delivery stays
/// testable without environment mutation; [`MailConfig::from_env`] is the
/// convenience constructor for process configuration. Credentials are never
/// hard-coded.
#[derive(Debug, Clone)]
pub struct MailConfig {
    /// Sender address, also the authentication user.
    pub from_address: String,
    /// Authentication password.
    pub password: String,
    /// Relay host name.
    pub server: String,
    /// Relay submission port.
    pub port: u16,
}

impl MailConfig {
    /// Load the relay settings from process environment variables
    /// (`EMAIL_ADDRESS`, `EMAIL_PASSWORD`, `SMTP_SERVER`, `SMTP_PORT`).
    ///
    /// Any absent or empty variable is a configuration error, raised before
    /// any connection attempt.
    pub fn from_env() -> Result<Self> {
        let port_raw = require(ENV_SMTP_PORT)?;
        let port = port_raw
            .parse::<u16>()
            .map_err(|_| MailError::InvalidPort(port_raw))?;
        Ok(Self {
            from_address: require(ENV_FROM_ADDRESS)?,
            password: require(ENV_PASSWORD)?,
            server: require(ENV_SMTP_SERVER)?,
            port,
        })
    }
}

fn require(name: &'static str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(MailError::MissingConfig(name)),
    }
}
