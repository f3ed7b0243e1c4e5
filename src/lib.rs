//! # sobr-print - HTTPS to Receipt Printer Bridge
//!
//! sobr-print accepts text over HTTPS and prints it on a USB ESC/POS
//! receipt printer (POS-5890, `0416:5011`), logging every request to the
//! systemd journal.
//!
//! ## Quick Start
//!
//! ```no_run
//! use sobr_print::{
//!     printer::{DeviceProfile, Printer},
//!     server::{Server, ServerConfig, shutdown_signal},
//! };
//!
//! # async fn example() -> Result<(), sobr_print::SobrError> {
//! let printer = Printer::open_usb(DeviceProfile::POS_5890, None)?;
//! let server = Server::bind(ServerConfig::default()).await?;
//! server.run(printer, shutdown_signal()).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`protocol`] | ESC/POS command builders and CP437 encoding |
//! | [`transport`] | USB device node and in-memory byte sinks |
//! | [`printer`] | Device profiles, printer client, print worker |
//! | [`server`] | TLS listener, request handlers |
//! | [`logging`] | `[LEVEL] message` subscriber, journal-aware |
//! | [`error`] | Error types |

pub mod error;
pub mod logging;
pub mod printer;
pub mod protocol;
pub mod server;
pub mod transport;

// Re-exports for convenience
pub use error::SobrError;
pub use printer::{DeviceProfile, Printer};
pub use server::{Server, ServerConfig};
