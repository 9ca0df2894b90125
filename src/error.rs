//! Error types and handling infrastructure for joystick-arbiter.
//!
//! Library code returns [`ArbiterError`] through the [`Result`] alias. The binary
//! wraps these in `anyhow` with additional context before reporting them.
//!
//! ## Severity
//!
//! - [`ArbiterError::RegistryUnavailable`] ends the run with a non-zero exit code.
//! - [`ArbiterError::Enumeration`] is recovered by callers: a failed scan counts as
//!   "no devices found" for that subsystem.
//! - [`ArbiterError::DriverControl`] ends the run immediately; no further bind or
//!   unbind writes are attempted.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for joystick-arbiter operations.
#[derive(Error, Debug)]
pub enum ArbiterError {
    /// No session could be established with the device registry
    #[error("Device registry unavailable")]
    RegistryUnavailable {
        #[source]
        source: std::io::Error,
    },

    /// The registry is reachable but scanning one subsystem failed
    #[error("Failed to enumerate devices in subsystem '{subsystem}'")]
    Enumeration {
        subsystem: String,
        #[source]
        source: std::io::Error,
    },

    /// Writing to a driver bind/unbind control file failed
    #[error("Failed to {action} '{sysname}' via {path}")]
    DriverControl {
        action: &'static str,
        sysname: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

/// Standard Result type for joystick-arbiter operations.
pub type Result<T> = std::result::Result<T, ArbiterError>;

impl ArbiterError {
    /// Create a RegistryUnavailable error from the underlying io::Error
    pub fn registry_unavailable(source: std::io::Error) -> Self {
        Self::RegistryUnavailable { source }
    }

    /// Create an Enumeration error for the given subsystem
    pub fn enumeration(subsystem: impl Into<String>, source: std::io::Error) -> Self {
        Self::Enumeration {
            subsystem: subsystem.into(),
            source,
        }
    }

    /// Create a DriverControl error for a failed bind/unbind write
    pub fn driver_control(
        action: &'static str,
        sysname: impl Into<String>,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::DriverControl {
            action,
            sysname: sysname.into(),
            path: path.into(),
            source,
        }
    }

    /// Create a Config error with a descriptive message
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}
