//! RAII guard for terminal raw mode.
//!
//! The interpreter's `i` instruction reads one byte per keypress, so
//! stdin must be non-canonical and non-echoing for the process
//! lifetime of the program. Raw mode is enabled on construction and
//! disabled on drop; we don't touch the alternate screen or mouse
//! capture since we don't own the whole terminal, just its input mode.

use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use std::io;

pub struct TerminalGuard {
    enabled: bool,
}

impl TerminalGuard {
    pub fn enable() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self { enabled: true })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if self.enabled {
            let _ = disable_raw_mode();
        }
    }
}
