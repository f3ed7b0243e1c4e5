//! # ESC/POS Commands
//!
//! The handful of ESC/POS commands the bridge sends to a POS-5890 class
//! printer. Text itself needs no command: printable bytes go straight into
//! the line buffer and `LF` prints it.
//!
//! ## Byte Layout
//!
//! | Command | ASCII | Hex |
//! |---------|-------|-----|
//! | Initialize | ESC @ | 1B 40 |
//! | Select character code table | ESC t n | 1B 74 n |
//! | Print and line feed | LF | 0A |

// ============================================================================
// CONTROL BYTES
// ============================================================================

/// ESC (Escape) - Command prefix byte
pub const ESC: u8 = 0x1B;

/// LF (Line Feed) - Print the line buffer and advance one line
pub const LF: u8 = 0x0A;

/// Code table `n` selecting PC437 (USA, Standard Europe)
pub const CODE_TABLE_PC437: u8 = 0;

// ============================================================================
// INITIALIZATION COMMANDS
// ============================================================================

/// # Initialize Printer (ESC @)
///
/// Clears the print buffer and resets text modes to their power-on
/// defaults. Sent once when the device is opened.
///
/// ## Example
///
/// ```
/// use sobr_print::protocol::commands;
///
/// assert_eq!(commands::init(), vec![0x1B, 0x40]);
/// ```
#[inline]
pub fn init() -> Vec<u8> {
    vec![ESC, b'@']
}

/// # Select Character Code Table (ESC t n)
///
/// Chooses how bytes 0x80-0xFF render. Table 0 is PC437, which is what
/// [`super::cp437::encode`] produces.
///
/// ```
/// use sobr_print::protocol::commands;
///
/// assert_eq!(commands::select_code_table(0), vec![0x1B, 0x74, 0x00]);
/// ```
#[inline]
pub fn select_code_table(n: u8) -> Vec<u8> {
    vec![ESC, b't', n]
}

// ============================================================================
// TEXT
// ============================================================================

/// # Text Line
///
/// Encodes `text` for the printer and terminates it with `LF`.
///
/// Newlines inside `text` are passed through, so a multi-line body prints
/// as multiple lines.
///
/// ```
/// use sobr_print::protocol::commands;
///
/// assert_eq!(commands::text_line("Hi"), b"Hi\n".to_vec());
/// ```
pub fn text_line(text: &str) -> Vec<u8> {
    let mut data = super::cp437::encode(text);
    data.push(LF);
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init() {
        assert_eq!(init(), vec![0x1B, 0x40]);
    }

    #[test]
    fn test_select_pc437() {
        assert_eq!(select_code_table(CODE_TABLE_PC437), vec![0x1B, 0x74, 0x00]);
    }

    #[test]
    fn test_text_line_appends_lf() {
        assert_eq!(text_line("Hello"), b"Hello\n".to_vec());
    }

    #[test]
    fn test_empty_text_line() {
        assert_eq!(text_line(""), vec![LF]);
    }

    #[test]
    fn test_separator_line() {
        // Two newlines plus the terminating LF: a blank-line gap on paper
        assert_eq!(text_line("\n\n"), b"\n\n\n".to_vec());
    }

    #[test]
    fn test_text_line_encodes_cp437() {
        assert_eq!(text_line("Café"), vec![0x43, 0x61, 0x66, 0x82, LF]);
    }
}
