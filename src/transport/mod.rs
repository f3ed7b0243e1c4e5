//! # Printer Transport Layer
//!
//! Byte sinks a [`crate::printer::Printer`] writes to.
//!
//! ## Available Transports
//!
//! - [`usb`]: kernel `usblp` device node (`/dev/usb/lpN`)
//! - [`MemoryTransport`]: records writes in memory

pub mod usb;

pub use usb::UsbTransport;

use std::sync::{Arc, Mutex, PoisonError};

use crate::error::SobrError;

/// A destination for printer bytes.
pub trait Transport: Send {
    /// Write all of `data` to the device.
    fn write_all(&mut self, data: &[u8]) -> Result<(), SobrError>;
}

/// Transport that keeps every write in memory.
///
/// Clones share the same record, so a test can hand one clone to a printer
/// and inspect the writes through another.
#[derive(Debug, Clone, Default)]
pub struct MemoryTransport {
    writes: Arc<Mutex<Vec<Vec<u8>>>>,
    fail_after: Option<usize>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// A transport whose every write fails with `DeviceUnavailable`.
    pub fn failing() -> Self {
        Self::failing_after(0)
    }

    /// A transport that accepts `writes` writes, then fails every later one.
    pub fn failing_after(writes: usize) -> Self {
        Self {
            fail_after: Some(writes),
            ..Self::default()
        }
    }

    /// Writes received so far, one entry per `write_all` call.
    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Transport for MemoryTransport {
    fn write_all(&mut self, data: &[u8]) -> Result<(), SobrError> {
        let mut writes = self.writes.lock().unwrap_or_else(PoisonError::into_inner);
        if self.fail_after.is_some_and(|limit| writes.len() >= limit) {
            return Err(SobrError::DeviceUnavailable(
                "memory transport set to fail".to_string(),
            ));
        }
        writes.push(data.to_vec());
        Ok(())
    }
}
