//! # ANSI escape sequences
//!
//! VT100-compatible escape sequences used by the rendering pipeline. Kept as
//! plain string constants rather than built through a terminal-capability
//! crate, matching the editor's narrow, fixed interface to the terminal.

/// Clear the entire screen.
pub const CLEAR_SCREEN: &str = "\x1b[2J";

/// Reset all text attributes to their defaults.
pub(crate) const RESET_FMT: &str = "\x1b[m";

/// Invert foreground and background color.
pub(crate) const REVERSE_VIDEO: &str = "\x1b[7m";

/// Move the cursor to row 1, column 1.
pub const MOVE_CURSOR_TO_START: &str = "\x1b[H";

/// DECTCEM: hide the cursor.
pub(crate) const HIDE_CURSOR: &str = "\x1b[?25l";
/// DECTCEM: show the cursor.
pub(crate) const SHOW_CURSOR: &str = "\x1b[?25h";

/// Clear from the cursor to the end of the current line.
pub(crate) const CLEAR_LINE_RIGHT: &str = "\x1b[K";

/// Report the cursor position to the application, as `\x1b[{row};{col}R`.
pub(crate) const DEVICE_STATUS_REPORT: &str = "\x1b[6n";

/// Reposition the cursor far past the bottom-right corner; the terminal clamps it to the actual
/// last row/column, which is how the window-size fallback probes terminal dimensions.
pub(crate) const REPOSITION_CURSOR_END: &str = "\x1b[999C\x1b[999B";

/// Foreground color codes used for syntax highlighting, keyed by `HlTag` (see `row.rs`).
pub(crate) const FG_RED: &str = "\x1b[31m";
pub(crate) const FG_YELLOW: &str = "\x1b[33m";
pub(crate) const FG_CYAN: &str = "\x1b[36m";
pub(crate) const FG_MAGENTA: &str = "\x1b[35m";
pub(crate) const FG_BLUE: &str = "\x1b[34m";
pub(crate) const FG_DEFAULT: &str = "\x1b[39m";

/// Move the cursor to an absolute 1-based `(row, col)` position.
pub(crate) fn move_cursor_to(row: usize, col: usize) -> String { format!("\x1b[{row};{col}H") }
