//! # Printer Module
//!
//! - [`profile`]: hardware descriptions of supported printers
//! - [`client`]: the [`Printer`] that turns text into device writes
//! - [`worker`]: the thread that owns the printer while the server runs

pub mod client;
pub mod profile;
pub mod worker;

pub use client::Printer;
pub use profile::DeviceProfile;
pub use worker::{PrintJob, PrinterHandle};
