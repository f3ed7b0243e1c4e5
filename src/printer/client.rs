//! # Printer Client
//!
//! Owns the connection to the receipt printer and prints lines of text.

use std::path::Path;

use tracing::info;

use super::DeviceProfile;
use crate::error::SobrError;
use crate::protocol::commands;
use crate::transport::{Transport, UsbTransport};

/// A receipt printer opened over some [`Transport`].
///
/// ## Example
///
/// ```
/// use sobr_print::printer::{DeviceProfile, Printer};
/// use sobr_print::transport::MemoryTransport;
///
/// let transport = MemoryTransport::new();
/// let mut printer = Printer::open(Box::new(transport.clone()), DeviceProfile::POS_5890)?;
/// printer.print_text("Hello")?;
///
/// assert_eq!(transport.writes().last().unwrap(), b"Hello\n");
/// # Ok::<(), sobr_print::error::SobrError>(())
/// ```
pub struct Printer {
    transport: Box<dyn Transport>,
    profile: DeviceProfile,
}

impl Printer {
    /// Take ownership of `transport` and initialize the printer.
    pub fn open(transport: Box<dyn Transport>, profile: DeviceProfile) -> Result<Self, SobrError> {
        let mut printer = Self { transport, profile };
        let init = printer.profile.init_sequence();
        printer.transport.write_all(&init)?;
        Ok(printer)
    }

    /// Open the USB printer described by `profile`.
    ///
    /// `device` overrides sysfs discovery with an explicit device node.
    pub fn open_usb(profile: DeviceProfile, device: Option<&Path>) -> Result<Self, SobrError> {
        let transport = match device {
            Some(path) => UsbTransport::open(path)?,
            None => UsbTransport::discover(&profile)?,
        };
        info!(
            profile = profile.name,
            usb_id = %profile.usb_id(),
            columns = profile.columns,
            width_dots = profile.width_dots,
            device = %transport.path().display(),
            "Connected to printer"
        );
        Self::open(Box::new(transport), profile)
    }

    /// Print `text` followed by a newline.
    pub fn print_text(&mut self, text: &str) -> Result<(), SobrError> {
        self.transport.write_all(&commands::text_line(text))
    }

    /// Profile the printer was opened with.
    pub fn profile(&self) -> &DeviceProfile {
        &self.profile
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MemoryTransport;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_open_sends_init_sequence() {
        let transport = MemoryTransport::new();
        let printer = Printer::open(Box::new(transport.clone()), DeviceProfile::POS_5890).unwrap();
        assert_eq!(transport.writes(), vec![vec![0x1B, 0x40, 0x1B, 0x74, 0x00]]);
        assert_eq!(printer.profile().name, "POS-5890");
        assert_eq!(printer.profile().columns, 32);
        assert_eq!(printer.profile().width_dots, 384);
    }

    #[test]
    fn test_print_text_appends_newline() {
        let transport = MemoryTransport::new();
        let mut printer =
            Printer::open(Box::new(transport.clone()), DeviceProfile::POS_5890).unwrap();
        printer.print_text("Hello").unwrap();
        printer.print_text("\n\n").unwrap();

        let writes = transport.writes();
        assert_eq!(writes[1], b"Hello\n".to_vec());
        assert_eq!(writes[2], b"\n\n\n".to_vec());
    }

    #[test]
    fn test_open_fails_when_device_unwritable() {
        let result = Printer::open(Box::new(MemoryTransport::failing()), DeviceProfile::POS_5890);
        assert!(matches!(result, Err(SobrError::DeviceUnavailable(_))));
    }

    #[test]
    fn test_open_usb_missing_node() {
        let result = Printer::open_usb(
            DeviceProfile::POS_5890,
            Some(Path::new("/nonexistent/usb/lp0")),
        );
        assert!(matches!(result, Err(SobrError::DeviceUnavailable(_))));
    }
}
