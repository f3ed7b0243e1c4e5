//! # USB Printer Transport
//!
//! Writes to a USB receipt printer through the kernel `usblp` driver, which
//! exposes each printer interface as a character device `/dev/usb/lpN`.
//!
//! ## Device Discovery
//!
//! The node for a given vendor/product pair is found through sysfs:
//!
//! ```text
//! /sys/class/usbmisc/lp0/device        -> .../1-1.3/1-1.3:1.0   (interface)
//! /sys/class/usbmisc/lp0/device/../idVendor   "0416"
//! /sys/class/usbmisc/lp0/device/../idProduct  "5011"
//! ```
//!
//! ## Permissions
//!
//! `/dev/usb/lp*` is usually owned by the `lp` group:
//!
//! ```bash
//! $ sudo usermod -aG lp pi
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::Transport;
use crate::error::SobrError;
use crate::printer::DeviceProfile;

/// sysfs class directory listing `usblp` devices
pub const SYSFS_USBMISC: &str = "/sys/class/usbmisc";

/// Directory holding the `lpN` device nodes
pub const DEV_USB: &str = "/dev/usb";

/// Default chunk size for writes (bytes)
const CHUNK_SIZE: usize = 4096;

/// # USB Printer Transport
///
/// ## Example
///
/// ```no_run
/// use sobr_print::printer::DeviceProfile;
/// use sobr_print::transport::{Transport, UsbTransport};
///
/// let mut transport = UsbTransport::discover(&DeviceProfile::POS_5890)?;
/// transport.write_all(b"Hello\n")?;
///
/// # Ok::<(), sobr_print::error::SobrError>(())
/// ```
pub struct UsbTransport {
    file: File,
    path: PathBuf,
    chunk_size: usize,
}

impl UsbTransport {
    /// Open a printer device node for writing.
    pub fn open<P: AsRef<Path>>(device: P) -> Result<Self, SobrError> {
        let path = device.as_ref();

        let file = OpenOptions::new().write(true).open(path).map_err(|e| {
            SobrError::DeviceUnavailable(format!("Failed to open {}: {}", path.display(), e))
        })?;

        Ok(Self {
            file,
            path: path.to_path_buf(),
            chunk_size: CHUNK_SIZE,
        })
    }

    /// Find the `usblp` node of the profile's USB device and open it.
    pub fn discover(profile: &DeviceProfile) -> Result<Self, SobrError> {
        let node = find_printer_node(profile.vendor_id, profile.product_id)?.ok_or_else(|| {
            SobrError::DeviceUnavailable(format!(
                "No {} printer ({}) found under {}",
                profile.name,
                profile.usb_id(),
                SYSFS_USBMISC
            ))
        })?;
        debug!(device = %node.display(), usb_id = %profile.usb_id(), "Found printer");
        Self::open(node)
    }

    /// Path of the opened device node
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Set the chunk size for large writes.
    pub fn set_chunk_size(&mut self, size: usize) {
        self.chunk_size = size.max(1);
    }
}

impl Transport for UsbTransport {
    fn write_all(&mut self, data: &[u8]) -> Result<(), SobrError> {
        for chunk in data.chunks(self.chunk_size) {
            self.file.write_all(chunk).map_err(|e| {
                SobrError::DeviceUnavailable(format!(
                    "Write to {} failed: {}",
                    self.path.display(),
                    e
                ))
            })?;
        }

        self.file.flush().map_err(|e| {
            SobrError::DeviceUnavailable(format!("Flush of {} failed: {}", self.path.display(), e))
        })
    }
}

// ============================================================================
// DISCOVERY
// ============================================================================

/// Find the device node of the USB printer with the given IDs.
///
/// Returns `Ok(None)` when no attached printer matches.
pub fn find_printer_node(vendor_id: u16, product_id: u16) -> Result<Option<PathBuf>, SobrError> {
    find_printer_node_in(
        Path::new(SYSFS_USBMISC),
        Path::new(DEV_USB),
        vendor_id,
        product_id,
    )
}

/// Same as [`find_printer_node`] with explicit sysfs and /dev roots.
pub fn find_printer_node_in(
    class_dir: &Path,
    dev_dir: &Path,
    vendor_id: u16,
    product_id: u16,
) -> Result<Option<PathBuf>, SobrError> {
    let entries = match fs::read_dir(class_dir) {
        Ok(entries) => entries,
        // usblp not loaded, or no printer ever attached
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(SobrError::DeviceUnavailable(format!(
                "Failed to read {}: {}",
                class_dir.display(),
                e
            )));
        }
    };

    let mut names: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with("lp"))
        .collect();
    names.sort();

    for name in names {
        let usb_device = class_dir.join(&name).join("device").join("..");
        let ids = (
            read_hex_id(&usb_device.join("idVendor")),
            read_hex_id(&usb_device.join("idProduct")),
        );
        if ids == (Some(vendor_id), Some(product_id)) {
            return Ok(Some(dev_dir.join(&name)));
        }
    }

    Ok(None)
}

/// Read a sysfs USB ID attribute ("0416\n").
fn read_hex_id(path: &Path) -> Option<u16> {
    let contents = fs::read_to_string(path).ok()?;
    u16::from_str_radix(contents.trim(), 16).ok()
}

// ============================================================================
// TESTS
// ============================================================================
