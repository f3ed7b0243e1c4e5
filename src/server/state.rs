//! Server state and configuration.

use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use crate::printer::PrinterHandle;

/// Default HTTPS port
pub const DEFAULT_PORT: u16 = 8888;

/// Default certificate chain (PEM)
pub const DEFAULT_CERT_PATH: &str = "/home/pi/letsencrypt/live/sobr.co/fullchain.pem";

/// Default private key (PEM)
pub const DEFAULT_KEY_PATH: &str = "/home/pi/letsencrypt/live/sobr.co/privkey.pem";

/// How long a POST may take to deliver its declared body
pub const DEFAULT_BODY_TIMEOUT: Duration = Duration::from_secs(10);

/// How long shutdown waits for in-flight requests, then for the print worker
pub const DEFAULT_SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// TCP port, bound on all interfaces
    pub port: u16,
    /// Certificate chain presented to clients
    pub cert_path: PathBuf,
    /// Private key matching the certificate
    pub key_path: PathBuf,
    /// Deadline for reading a request body
    pub body_timeout: Duration,
    /// Requests handled at the same time (1 = strictly sequential)
    pub max_in_flight: usize,
    /// Shutdown deadline, applied to open connections and to the print worker
    pub shutdown_grace: Duration,
}

impl ServerConfig {
    /// Address the listener binds to.
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            cert_path: PathBuf::from(DEFAULT_CERT_PATH),
            key_path: PathBuf::from(DEFAULT_KEY_PATH),
            body_timeout: DEFAULT_BODY_TIMEOUT,
            max_in_flight: 1,
            shutdown_grace: DEFAULT_SHUTDOWN_GRACE,
        }
    }
}

/// Application state shared across handlers.
pub struct AppState {
    pub config: ServerConfig,
    pub printer: PrinterHandle,
}

impl AppState {
    pub fn new(config: ServerConfig, printer: PrinterHandle) -> Self {
        Self { config, printer }
    }
}
