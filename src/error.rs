//! # Error Types
//!
//! This module defines the error type shared by the printer, the HTTP
//! handlers and the server loop.
//!
//! | Variant | Raised by | Outcome |
//! |---------|-----------|---------|
//! | `DeviceUnavailable` | transport, printer | fatal at startup, logged while serving |
//! | `MalformedRequest` | POST body reading | HTTP 400 |
//! | `InvalidEncoding` | POST body decoding | HTTP 400 |
//! | `TlsConfig` | certificate loading | fatal at startup |
//! | `Bind` | listener setup | fatal at startup |

use std::io;
use std::net::SocketAddr;

use thiserror::Error;

/// Main error type for sobr-print operations
#[derive(Debug, Error)]
pub enum SobrError {
    /// The printer could not be found, opened or written
    #[error("Printer unavailable: {0}")]
    DeviceUnavailable(String),

    /// Missing or inconsistent Content-Length, truncated body
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    /// Request body is not valid UTF-8
    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),

    /// Certificate or private key missing or unusable
    #[error("TLS configuration error: {0}")]
    TlsConfig(String),

    /// Listening socket could not be bound
    #[error("Failed to bind to {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    /// Invalid startup configuration (e.g. unknown device profile)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Logging dispatcher could not be installed
    #[error("Logging setup failed: {0}")]
    Logging(String),

    /// Server loop failed after startup
    #[error("Server error: {0}")]
    Server(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
