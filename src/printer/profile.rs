//! # Device Profiles
//!
//! Hardware descriptions of the receipt printers the bridge can drive.
//!
//! | Profile | USB ID | Paper | Columns | Width (dots) | Code table |
//! |---------|--------|-------|---------|--------------|------------|
//! | POS-5890 | 0416:5011 | 58mm | 32 | 384 | 0 (PC437) |
//!
//! ## Usage
//!
//! ```
//! use sobr_print::printer::DeviceProfile;
//!
//! let profile = DeviceProfile::by_name("pos-5890").unwrap();
//! assert_eq!(profile.usb_id(), "0416:5011");
//! ```

use crate::error::SobrError;
use crate::protocol::commands;

/// # Device Profile
///
/// Identifies a printer on the USB bus and describes what it can print.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceProfile {
    /// Profile name
    pub name: &'static str,

    /// USB vendor ID
    pub vendor_id: u16,

    /// USB product ID
    pub product_id: u16,

    /// Characters per line in the default font
    pub columns: u16,

    /// Printable width in dots
    pub width_dots: u16,

    /// ESC t code table matching the encoder output
    pub code_table: u8,
}

impl DeviceProfile {
    /// # POS-5890
    ///
    /// Generic 58mm thermal receipt printer (Zjiang / Xprinter clones)
    /// enumerating as Winbond `0416:5011`.
    ///
    /// ```text
    /// ├─ 5mm ─┼──── 48mm printable ────┼─ 5mm ─┤
    /// │       │  384 dots / 32 columns  │       │
    /// ```
    pub const POS_5890: Self = Self {
        name: "POS-5890",
        vendor_id: 0x0416,
        product_id: 0x5011,
        columns: 32,
        width_dots: 384,
        code_table: commands::CODE_TABLE_PC437,
    };

    /// All built-in profiles
    pub fn built_in() -> &'static [DeviceProfile] {
        &[Self::POS_5890]
    }

    /// Look up a built-in profile by name (case-insensitive).
    pub fn by_name(name: &str) -> Result<Self, SobrError> {
        Self::built_in()
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name.trim()))
            .copied()
            .ok_or_else(|| {
                let known: Vec<&str> = Self::built_in().iter().map(|p| p.name).collect();
                SobrError::Config(format!(
                    "Unknown device profile '{}' (available: {})",
                    name,
                    known.join(", ")
                ))
            })
    }

    /// `vvvv:pppp` form used by lsusb and in log lines
    pub fn usb_id(&self) -> String {
        format!("{:04x}:{:04x}", self.vendor_id, self.product_id)
    }

    /// Bytes sent once after the device is opened.
    pub fn init_sequence(&self) -> Vec<u8> {
        let mut data = commands::init();
        data.extend(commands::select_code_table(self.code_table));
        data
    }
}

impl Default for DeviceProfile {
    fn default() -> Self {
        Self::POS_5890
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pos_5890_ids() {
        let profile = DeviceProfile::POS_5890;
        assert_eq!(profile.vendor_id, 0x0416);
        assert_eq!(profile.product_id, 0x5011);
        assert_eq!(profile.usb_id(), "0416:5011");
    }

    #[test]
    fn test_by_name_is_case_insensitive() {
        assert_eq!(
            DeviceProfile::by_name("pos-5890").unwrap(),
            DeviceProfile::POS_5890
        );
        assert_eq!(
            DeviceProfile::by_name(" POS-5890 ").unwrap(),
            DeviceProfile::POS_5890
        );
    }

    #[test]
    fn test_unknown_profile() {
        let err = DeviceProfile::by_name("TSP650II").unwrap_err();
        assert!(matches!(err, SobrError::Config(_)));
        assert!(err.to_string().contains("POS-5890"));
    }

    #[test]
    fn test_init_sequence() {
        assert_eq!(
            DeviceProfile::POS_5890.init_sequence(),
            vec![0x1B, 0x40, 0x1B, 0x74, 0x00]
        );
    }
}
