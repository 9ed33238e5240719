use std::io::{self, BufRead, Read, Write};

use crate::{Error, ansi_escape::*, sys};

/// Obtain the window size using the cursor position.
///
/// This function moves the cursor to the bottom-right using the ANSI escape sequence
/// `\x1b[999C\x1b[999B`, then requests the cursor position using `\x1b[6n`. The terminal's reply
/// takes the form `\x1b[{row};{col}R`.
///
/// This is a fallback used only when `sys::get_window_size()` fails.
pub fn get_window_size_using_cursor() -> Result<(usize, usize), Error> {
    print!("{REPOSITION_CURSOR_END}{DEVICE_STATUS_REPORT}");
    io::stdout().flush()?;
    let mut prefix_buffer = [0_u8; 2];
    sys::stdin()?.read_exact(&mut prefix_buffer)?;
    if prefix_buffer != [b'\x1b', b'['] {
        return Err(Error::CursorPosition);
    }
    Ok((read_value_until(b';')?, read_value_until(b'R')?))
}

/// Read a value up to (and including) `stop_byte`, then parse the prefix.
fn read_value_until<T: std::str::FromStr>(stop_byte: u8) -> Result<T, Error> {
    let mut buf = Vec::new();
    sys::stdin()?.read_until(stop_byte, &mut buf)?;
    buf.pop().filter(|u| *u == stop_byte).ok_or(Error::CursorPosition)?;
    std::str::from_utf8(&buf).or(Err(Error::CursorPosition))?.parse().or(Err(Error::CursorPosition))
}

#[cfg_attr(windows, expect(clippy::trivially_copy_pass_by_ref))]
pub fn restore_terminal(orig_term_mode: &sys::TermMode) -> Result<(), Error> {
    sys::set_term_mode(orig_term_mode)?;
    io::stdout().flush()?;
    Ok(())
}
