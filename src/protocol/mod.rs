//! # ESC/POS Protocol
//!
//! Byte builders for the ESC/POS command set spoken by 58mm USB receipt
//! printers such as the POS-5890.
//!
//! - [`commands`]: initialization, code table selection, text lines
//! - [`cp437`]: Unicode to Code Page 437 encoding
//!
//! ```
//! use sobr_print::protocol::commands;
//!
//! let mut data = Vec::new();
//! data.extend(commands::init());
//! data.extend(commands::select_code_table(commands::CODE_TABLE_PC437));
//! data.extend(commands::text_line("Hello"));
//! assert_eq!(&data[5..], b"Hello\n");
//! ```

pub mod commands;
pub mod cp437;
