//! Error types for folio-store
//!
//! This module defines the error hierarchy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//! Stores absorb errors into [`ErrorKind`]-tagged messages for display.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The main error type for folio-store
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Unknown resource: {name}")]
    UnknownResource { name: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Authentication Errors
    // ============================================================================
    #[error("Authentication required")]
    AuthRequired,

    #[error("Session expired. Please login again.")]
    SessionExpired,

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Data Processing Errors
    // ============================================================================
    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an unknown resource error
    pub fn unknown_resource(name: impl Into<String>) -> Self {
        Self::UnknownResource { name: name.into() }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// HTTP status carried by this error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::HttpStatus { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if the server rejected the credentials
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Classify this error for display
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Http(e) if e.is_timeout() => ErrorKind::Timeout,
            Error::Http(e) if e.is_decode() => ErrorKind::Decode,
            Error::Http(_) => ErrorKind::Network,
            Error::Timeout { .. } => ErrorKind::Timeout,
            Error::HttpStatus { .. } => ErrorKind::Status,
            Error::Decode { .. } | Error::JsonParse(_) => ErrorKind::Decode,
            Error::AuthRequired => ErrorKind::AuthRequired,
            Error::SessionExpired => ErrorKind::SessionExpired,
            Error::Config { .. }
            | Error::InvalidConfigValue { .. }
            | Error::UnknownResource { .. }
            | Error::YamlParse(_)
            | Error::InvalidUrl(_)
            | Error::Io(_) => ErrorKind::Config,
        }
    }
}

/// Error classification surfaced to presentation code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// No response: connection refused, DNS, TLS, reset
    Network,
    /// The request missed its deadline
    Timeout,
    /// Non-2xx response
    Status,
    /// Response body had an unexpected shape
    Decode,
    /// The resource needs a token and none is available
    AuthRequired,
    /// The server answered 401 for an authenticated resource
    SessionExpired,
    /// Local misconfiguration
    Config,
}

/// Result type alias for folio-store
pub type Result<T> = std::result::Result<T, Error>;
