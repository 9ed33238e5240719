#![allow(clippy::wildcard_imports)]

use std::fmt::Write as _;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::{fs::File, path::Path, thread, time::Instant};

use crate::ansi_escape::*;
use crate::row::Row;
use crate::syntax::{self, Syntax};
use crate::{Config, Error, sys, terminal};

const fn ctrl_key(key: u8) -> u8 { key & 0x1f }
const EXIT: u8 = ctrl_key(b'Q');
const DELETE_BIS: u8 = ctrl_key(b'H');
const REFRESH_SCREEN: u8 = ctrl_key(b'L');
const SAVE: u8 = ctrl_key(b'S');
const FIND: u8 = ctrl_key(b'F');
const BACKSPACE: u8 = 127;

const HELP_MESSAGE: &str = "^S save | ^Q quit | ^F find";

/// Sets a formatted status message for the editor, e.g. `set_status!(editor, "{} written", n)`.
macro_rules! set_status {
    ($editor:expr, $($arg:expr),*) => ($editor.status_msg = Some(StatusMessage::new(format!($($arg),*))))
}

/// A decoded logical key, after escape-sequence interpretation.
#[derive(Debug)]
enum Key {
    Arrow(AKey),
    Page(PageKey),
    Home,
    End,
    Delete,
    Escape,
    Char(u8),
}

/// An arrow key direction.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AKey {
    Left,
    Right,
    Up,
    Down,
}

/// A page-motion key.
#[derive(Debug)]
enum PageKey {
    Up,
    Down,
}

/// The cursor position (in `chars` byte offsets) together with the viewport offsets needed to
/// keep it visible. Combining both in one struct mirrors the single `scroll` reconciliation step
/// that is the only place permitted to change the viewport (see `scroll`).
#[derive(Default)]
struct CursorState {
    /// Byte offset into the current row's `chars`.
    cx: usize,
    /// Row index.
    cy: usize,
    /// First visible row.
    rowoff: usize,
    /// First visible rendered column.
    coloff: usize,
}

impl CursorState {
    fn move_to_next_line(&mut self) { (self.cx, self.cy) = (0, self.cy + 1); }

    /// Bring the cursor back into the viewport by adjusting `rowoff`/`coloff`, the only routine
    /// permitted to change them.
    fn scroll(&mut self, rx: usize, screen_rows: usize, screen_cols: usize) {
        self.rowoff = self.rowoff.clamp(self.cy.saturating_sub(screen_rows.saturating_sub(1)), self.cy);
        self.coloff = self.coloff.clamp(rx.saturating_sub(screen_cols.saturating_sub(1)), rx);
    }
}

/// The editor's state.
#[derive(Default)]
pub struct Editor {
    /// The active status-line prompt, if any. `None` means regular edit mode.
    prompt_mode: Option<PromptMode>,
    cursor: CursorState,
    /// Visible rows, excluding the status bar and message line.
    screen_rows: usize,
    /// Visible columns.
    screen_cols: usize,
    rows: Vec<Row>,
    /// Nonzero means unsaved changes.
    dirty: u64,
    config: Config,
    /// Confirmations remaining before quitting with unsaved changes.
    quit_times: usize,
    /// `None` until the first successful save, at which point the user is no longer prompted.
    file_name: Option<String>,
    status_msg: Option<StatusMessage>,
    /// The syntax descriptor matching the current file's extension, if any.
    syntax: Option<&'static Syntax>,
    /// The original terminal mode, restored when the `Editor` is dropped.
    orig_term_mode: Option<sys::TermMode>,
}

/// A message shown on the message line, with a timestamp used to expire it.
struct StatusMessage {
    msg: String,
    time: Instant,
}

impl StatusMessage {
    fn new(msg: String) -> Self { Self { msg, time: Instant::now() } }
}

/// Format a byte count for display, e.g. `1.50kB`.
fn format_size(n: u64) -> String {
    if n < 1024 {
        return format!("{n}B");
    }
    let i = (64 - n.leading_zeros() + 9) / 10 - 1;
    let q = 100 * n / (1024 << ((i - 1) * 10));
    format!("{}.{:02}{}B", q / 100, q % 100, b" kMGTPEZ"[i as usize] as char)
}

/// Return the index of `needle` in `s` as a subslice, if present.
fn slice_find<T: PartialEq>(s: &[T], needle: &[T]) -> Option<usize> {
    (0..(s.len() + 1).saturating_sub(needle.len())).find(|&i| s[i..].starts_with(needle))
}

impl Editor {
    /// Initialize the text editor: enable raw terminal mode and probe the window size.
    ///
    /// # Errors
    ///
    /// Returns `Err` if raw mode cannot be enabled, the resize signal handler cannot be
    /// registered, or the window size cannot be obtained.
    pub fn new(config: Config) -> Result<Self, Error> {
        sys::register_winsize_change_signal_handler()?;
        let mut editor = Self { quit_times: config.quit_times, config, ..Self::default() };
        editor.orig_term_mode = Some(sys::enable_raw_mode()?);
        editor.update_window_size()?;
        set_status!(editor, "{}", HELP_MESSAGE);
        Ok(editor)
    }

    fn current_row(&self) -> Option<&Row> { self.rows.get(self.cursor.cy) }

    /// The cursor's rendered column (as opposed to `cursor.cx`, a byte offset).
    fn rx(&self) -> usize {
        self.current_row().map_or(0, |row| row.cx_to_rx(self.cursor.cx, self.config.tab_stop))
    }

    /// Whether the document is a single, empty, as-yet-unnamed row.
    fn is_empty(&self) -> bool {
        self.rows.len() == 1 && self.rows[0].chars.is_empty() && self.file_name.is_none()
    }

    /// Move the cursor following an arrow key.
    fn move_cursor(&mut self, key: &AKey) {
        let mut cx = self.cursor.cx;
        match (key, self.current_row()) {
            (AKey::Left, Some(_)) if cx > 0 => cx -= 1,
            (AKey::Left, _) if self.cursor.cy > 0 =>
                (self.cursor.cy, cx) = (self.cursor.cy - 1, usize::MAX),
            (AKey::Right, Some(row)) if cx < row.chars.len() => cx += 1,
            (AKey::Right, Some(_)) => self.cursor.move_to_next_line(),
            (AKey::Up, _) if self.cursor.cy > 0 => self.cursor.cy -= 1,
            (AKey::Down, Some(_)) => self.cursor.cy += 1,
            _ => (),
        }
        self.cursor.cx = cx;
        self.clamp_cursor_x();
    }

    /// Clamp `cursor.cx` to the current row's length (in `chars` bytes, never `render` columns).
    fn clamp_cursor_x(&mut self) {
        self.cursor.cx = self.cursor.cx.min(self.current_row().map_or(0, |row| row.chars.len()));
    }

    /// Read and decode one logical key from standard input, following the escape-sequence
    /// grammar: `ESC [ A/B/C/D` for arrows, `ESC [ H/F` and `ESC O H/F` for Home/End, and
    /// `ESC [ <digit> ~` for Home/End/Delete/PageUp/PageDown. A partial or unrecognized escape
    /// sequence yields `Key::Escape`.
    fn loop_until_keypress(&mut self) -> Result<Key, Error> {
        loop {
            if sys::has_window_size_changed() {
                self.update_window_size()?;
                self.refresh_screen()?;
            }
            let mut bytes = sys::stdin()?.bytes();
            match bytes.next().transpose()? {
                Some(b'\x1b') => {
                    return Ok(match bytes.next().transpose()? {
                        Some(b @ (b'[' | b'O')) => match (b, bytes.next().transpose()?) {
                            (b'[', Some(b'A')) => Key::Arrow(AKey::Up),
                            (b'[', Some(b'B')) => Key::Arrow(AKey::Down),
                            (b'[', Some(b'C')) => Key::Arrow(AKey::Right),
                            (b'[', Some(b'D')) => Key::Arrow(AKey::Left),
                            (b'[' | b'O', Some(b'H')) => Key::Home,
                            (b'[' | b'O', Some(b'F')) => Key::End,
                            (b'[', Some(c @ b'1'..=b'8')) => match (c, bytes.next().transpose()?) {
                                (b'1' | b'7', Some(b'~')) => Key::Home,
                                (b'4' | b'8', Some(b'~')) => Key::End,
                                (b'3', Some(b'~')) => Key::Delete,
                                (b'5', Some(b'~')) => Key::Page(PageKey::Up),
                                (b'6', Some(b'~')) => Key::Page(PageKey::Down),
                                _ => Key::Escape,
                            },
                            _ => Key::Escape,
                        },
                        _ => Key::Escape,
                    });
                }
                Some(a) => return Ok(Key::Char(a)),
                None => continue,
            }
        }
    }

    /// Probe and store the terminal's current size.
    fn update_window_size(&mut self) -> Result<(), Error> {
        let (rows, cols) = sys::get_window_size().or_else(|_| terminal::get_window_size_using_cursor())?;
        // Two rows are reserved for the status bar and the message line.
        (self.screen_rows, self.screen_cols) = (rows.saturating_sub(2), cols);
        Ok(())
    }

    /// Select a syntax descriptor from the file's extension, if one matches.
    fn select_syntax_highlight(&mut self, path: &Path) {
        self.syntax = path.to_str().and_then(syntax::find);
    }

    /// Re-derive `render`/`hl` for the row at `y`, cascading to subsequent rows while the
    /// "ends in open comment" flag keeps changing. `ignore_following_rows` stops the cascade
    /// unconditionally, which is correct when a row is merged away (its neighbor's continuation
    /// state cannot have changed).
    fn update_row(&mut self, y: usize, ignore_following_rows: bool) {
        let mut continuing = if y > 0 { self.rows[y - 1].ends_in_open_comment } else { false };
        for row in self.rows.iter_mut().skip(y) {
            let was_open = row.ends_in_open_comment;
            continuing = row.update(self.syntax, continuing, self.config.tab_stop);
            if ignore_following_rows || continuing == was_open {
                return;
            }
        }
    }

    fn update_all_rows(&mut self) {
        let mut continuing = false;
        for row in &mut self.rows {
            continuing = row.update(self.syntax, continuing, self.config.tab_stop);
        }
    }

    /// Insert a byte at the cursor, appending a row first if the cursor is past the last row.
    fn insert_byte(&mut self, c: u8) {
        if let Some(row) = self.rows.get_mut(self.cursor.cy) {
            row.chars.insert(self.cursor.cx, c);
        } else {
            self.rows.push(Row::new(vec![c]));
        }
        self.update_row(self.cursor.cy, false);
        self.cursor.cx += 1;
        self.dirty += 1;
    }

    /// Split the current row at the cursor (or insert an empty row, if at column 0) and move the
    /// cursor to the start of the new row.
    fn insert_new_line(&mut self) {
        let (position, new_row_chars) = if self.cursor.cx == 0 {
            (self.cursor.cy, Vec::new())
        } else {
            let new_chars = self.rows[self.cursor.cy].chars.split_off(self.cursor.cx);
            self.update_row(self.cursor.cy, false);
            (self.cursor.cy + 1, new_chars)
        };
        self.rows.insert(position, Row::new(new_row_chars));
        self.update_row(position, false);
        self.cursor.move_to_next_line();
        self.dirty += 1;
    }

    /// Delete the byte before the cursor, merging with the previous row at column 0.
    fn delete_char(&mut self) {
        if self.cursor.cx > 0 {
            self.rows[self.cursor.cy].chars.remove(self.cursor.cx - 1);
            self.update_row(self.cursor.cy, false);
            self.cursor.cx -= 1;
            self.dirty += 1;
        } else if self.cursor.cy > 0 && self.cursor.cy < self.rows.len() {
            let row = self.rows.remove(self.cursor.cy);
            let previous_row = &mut self.rows[self.cursor.cy - 1];
            self.cursor.cx = previous_row.chars.len();
            previous_row.chars.extend(&row.chars);
            self.update_row(self.cursor.cy - 1, true);
            self.cursor.cy -= 1;
            self.dirty += 1;
        } else if self.cursor.cy == self.rows.len() {
            self.move_cursor(&AKey::Left);
        }
    }

    /// Load a file's rows. A missing file is not an error: it starts an empty unnamed-on-disk
    /// buffer that will be created on first save.
    fn load(&mut self, path: &Path) -> Result<(), Error> {
        match File::open(path) {
            Ok(file) => {
                for line in BufReader::new(file).split(b'\n') {
                    let mut chars = line?;
                    if chars.last() == Some(&b'\r') {
                        chars.pop();
                    }
                    self.rows.push(Row::new(chars));
                }
                if self.rows.is_empty() {
                    self.rows.push(Row::new(Vec::new()));
                }
                self.update_all_rows();
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => self.rows.push(Row::new(Vec::new())),
            Err(e) => return Err(e.into()),
        }
        Ok(())
    }

    /// Serialize the document to `file_name`: each row's `chars`, each followed by `\n`.
    fn save(&self, file_name: &str) -> Result<usize, io::Error> {
        let mut file = File::create(file_name)?;
        let mut written = 0;
        for row in &self.rows {
            file.write_all(&row.chars)?;
            file.write_all(b"\n")?;
            written += row.chars.len() + 1;
        }
        file.sync_all()?;
        Ok(written)
    }

    /// Save and report the outcome on the status line. Returns whether the save succeeded.
    fn save_and_handle_io_errors(&mut self, file_name: &str) -> bool {
        let saved = self.save(file_name);
        match saved.as_ref() {
            Ok(w) => set_status!(self, "{} written to {}", format_size(*w as u64), file_name),
            Err(err) => set_status!(self, "Can't save! I/O error: {}", err),
        }
        if saved.is_ok() {
            self.dirty = 0;
        }
        saved.is_ok()
    }

    /// Save to the file name obtained from the prompt, then adopt it as `file_name`.
    fn save_as(&mut self, file_name: String) {
        if self.save_and_handle_io_errors(&file_name) {
            self.select_syntax_highlight(Path::new(&file_name));
            self.file_name = Some(file_name);
            self.update_all_rows();
        }
    }

    /// Paint the visible document rows, one screen row per terminal row.
    fn draw_rows(&self, buffer: &mut String) -> Result<(), Error> {
        for y in 0..self.screen_rows {
            buffer.push_str(CLEAR_LINE_RIGHT);
            let row_idx = self.cursor.rowoff + y;
            if let Some(row) = self.rows.get(row_idx) {
                row.draw(self.cursor.coloff, self.screen_cols, buffer)?;
            } else {
                buffer.push('~');
                if self.is_empty() && y == self.screen_rows / 3 {
                    let welcome = concat!("vtedit ", env!("VTEDIT_VERSION"));
                    write!(buffer, "{welcome:^0$.0$}", self.screen_cols.saturating_sub(1))?;
                }
            }
            buffer.push_str("\r\n");
        }
        Ok(())
    }

    /// Paint the inverse-video status bar: file name and modification state on the left, syntax
    /// name and cursor position on the right.
    fn draw_status_bar(&self, buffer: &mut String) -> Result<(), Error> {
        let modified = if self.dirty > 0 { " *modified" } else { "" };
        let mut left = format!(
            "{} - {} lines{modified}",
            self.file_name.as_deref().unwrap_or("[Unsaved File]"),
            self.rows.len()
        );
        left.truncate(self.screen_cols);

        let right = format!(
            "{} | {}/{}",
            self.syntax.map_or("(unknown filetype)", |s| s.name),
            self.cursor.cy + 1,
            self.rows.len()
        );

        let rw = self.screen_cols.saturating_sub(left.len());
        write!(buffer, "{REVERSE_VIDEO}{left}{right:>rw$.rw$}{RESET_FMT}\r\n")?;
        Ok(())
    }

    /// Paint the message line, if the current status message has not yet expired.
    fn draw_message_bar(&self, buffer: &mut String) {
        buffer.push_str(CLEAR_LINE_RIGHT);
        let duration = self.config.message_duration;
        if let Some(sm) = self.status_msg.as_ref().filter(|sm| sm.time.elapsed() < duration) {
            buffer.push_str(&sm.msg[..sm.msg.len().min(self.screen_cols)]);
        }
    }

    /// Run one full render pass: scroll, paint rows/status/message, then position the cursor.
    fn refresh_screen(&mut self) -> Result<(), Error> {
        self.cursor.scroll(self.rx(), self.screen_rows, self.screen_cols);
        let mut buffer = format!("{HIDE_CURSOR}{MOVE_CURSOR_TO_START}");
        self.draw_rows(&mut buffer)?;
        self.draw_status_bar(&mut buffer)?;
        self.draw_message_bar(&mut buffer);
        let (cursor_col, cursor_row) = if self.prompt_mode.is_none() {
            (self.rx() - self.cursor.coloff + 1, self.cursor.cy - self.cursor.rowoff + 1)
        } else {
            (self.status_msg.as_ref().map_or(1, |s| s.msg.len() + 1), self.screen_rows + 2)
        };
        print!("{buffer}{}{SHOW_CURSOR}", move_cursor_to(cursor_row, cursor_col));
        io::stdout().flush().map_err(Error::from)
    }

    /// Dispatch a key in regular (non-prompt) edit mode. Returns whether the program should
    /// exit, and the prompt mode to switch to, if any.
    fn process_keypress(&mut self, key: &Key) -> (bool, Option<PromptMode>) {
        let mut quit_times = self.config.quit_times;
        let mut prompt_mode = None;

        match key {
            Key::Arrow(arrow) => self.move_cursor(arrow),
            Key::Page(PageKey::Up) => {
                self.cursor.cy = self.cursor.rowoff.saturating_sub(self.screen_rows);
                self.clamp_cursor_x();
            }
            Key::Page(PageKey::Down) => {
                let max_row = self.rows.len().saturating_sub(1);
                self.cursor.cy = (self.cursor.rowoff + self.screen_rows).min(max_row);
                self.clamp_cursor_x();
            }
            Key::Home => self.cursor.cx = 0,
            Key::End => self.cursor.cx = self.current_row().map_or(0, |row| row.chars.len()),
            Key::Char(b'\r' | b'\n') => self.insert_new_line(),
            Key::Char(BACKSPACE | DELETE_BIS) => self.delete_char(),
            Key::Delete => {
                self.move_cursor(&AKey::Right);
                self.delete_char();
            }
            Key::Escape | Key::Char(REFRESH_SCREEN) => (),
            Key::Char(EXIT) => {
                quit_times = self.quit_times - 1;
                if self.dirty == 0 || quit_times == 0 {
                    return (true, None);
                }
                let times = if quit_times > 1 { "times" } else { "time" };
                set_status!(self, "Press Ctrl+Q {} more {} to quit.", quit_times, times);
            }
            Key::Char(SAVE) => match self.file_name.take() {
                Some(file_name) => {
                    self.save_and_handle_io_errors(&file_name);
                    self.file_name = Some(file_name);
                }
                None => prompt_mode = Some(PromptMode::Save(Vec::new())),
            },
            Key::Char(FIND) => prompt_mode = Some(PromptMode::Find(Vec::new(), None)),
            Key::Char(c) => self.insert_byte(*c),
        }
        self.quit_times = quit_times;
        (false, prompt_mode)
    }

    /// Search for `query`, starting after `last_match` (or the last row, if `None`) and walking
    /// in `forward`/backward direction with wraparound. Updates the matched row's highlight
    /// segment and moves the cursor to the match. Returns the matched row index, if any.
    fn find(&mut self, query: &[u8], last_match: Option<usize>, forward: bool) -> Option<usize> {
        let num_rows = self.rows.len();
        if query.is_empty() || num_rows == 0 {
            return None;
        }
        let mut current = last_match.unwrap_or_else(|| num_rows.saturating_sub(1));
        for _ in 0..num_rows {
            current = (current + if forward { 1 } else { num_rows - 1 }) % num_rows;
            let row = &mut self.rows[current];
            if let Some(cx) = slice_find(&row.chars, query) {
                (self.cursor.cx, self.cursor.cy, self.cursor.coloff) = (cx, current, 0);
                let rx = row.cx_to_rx(cx, self.config.tab_stop);
                row.match_segment = Some(rx..rx + query.len());
                return Some(current);
            }
        }
        None
    }

    /// Load `file_name` if given, then run the event loop until the user quits.
    ///
    /// # Errors
    ///
    /// Returns `Err` on any I/O or terminal failure.
    pub fn run(&mut self, file_name: Option<String>) -> Result<(), Error> {
        if let Some(path) = file_name.as_ref().map(|p| sys::path(p)) {
            self.select_syntax_highlight(&path);
            self.load(&path)?;
            self.file_name = Some(path.to_string_lossy().into_owned());
        } else {
            self.rows.push(Row::new(Vec::new()));
        }
        loop {
            if let Some(mode) = self.prompt_mode.as_ref() {
                set_status!(self, "{}", mode.status_msg());
            }
            self.refresh_screen()?;
            let key = self.loop_until_keypress()?;
            self.prompt_mode = match self.prompt_mode.take() {
                None => match self.process_keypress(&key) {
                    (true, _) => return Ok(()),
                    (false, prompt_mode) => prompt_mode,
                },
                Some(prompt_mode) => prompt_mode.process_keypress(self, &key),
            }
        }
    }
}

impl Drop for Editor {
    /// Restore the original terminal mode and clear the screen on every exit path.
    fn drop(&mut self) {
        if let Some(orig_term_mode) = self.orig_term_mode.take() {
            let _ = terminal::restore_terminal(&orig_term_mode);
        }
        if !thread::panicking() {
            print!("{CLEAR_SCREEN}{MOVE_CURSOR_TO_START}");
            let _ = io::stdout().flush();
        }
    }
}

/// The active status-line prompt.
enum PromptMode {
    /// `Save(input buffer)`.
    Save(Vec<u8>),
    /// `Find(input buffer, last matched row)`.
    Find(Vec<u8>, Option<usize>),
}

impl PromptMode {
    fn status_msg(&self) -> String {
        match self {
            Self::Save(buffer) => format!("Save as : {}", String::from_utf8_lossy(buffer)),
            Self::Find(buffer, _) =>
                format!("Search: {} (ESC to cancel | Arrows or Enter to search)", String::from_utf8_lossy(buffer)),
        }
    }

    /// Process one keypress for the active prompt, returning the prompt mode to continue with
    /// (`None` once the prompt has closed, whether by completion or cancellation).
    fn process_keypress(self, ed: &mut Editor, key: &Key) -> Option<Self> {
        ed.status_msg = None;
        let prompt_key = PromptKey::from(key);
        match self {
            Self::Save(mut buffer) => match advance_prompt(&mut buffer, &prompt_key) {
                PromptOutcome::Active => return Some(Self::Save(buffer)),
                PromptOutcome::Cancelled => set_status!(ed, "Save aborted."),
                PromptOutcome::Completed =>
                    ed.save_as(String::from_utf8_lossy(&buffer).into_owned()),
            },
            Self::Find(mut buffer, last_match) => {
                if let Some(row_idx) = last_match {
                    ed.rows[row_idx].match_segment = None;
                }
                match advance_prompt(&mut buffer, &prompt_key) {
                    PromptOutcome::Active => {
                        let (last_match, forward) = match prompt_key {
                            PromptKey::Arrow(AKey::Right | AKey::Down) => (last_match, true),
                            PromptKey::Arrow(AKey::Left | AKey::Up) => (last_match, false),
                            PromptKey::Enter => (last_match, true),
                            PromptKey::Printable(_)
                            | PromptKey::Escape
                            | PromptKey::Backspace
                            | PromptKey::Other => (None, true),
                        };
                        let curr_match = ed.find(&buffer, last_match, forward);
                        return Some(Self::Find(buffer, curr_match));
                    }
                    PromptOutcome::Cancelled | PromptOutcome::Completed => (),
                }
            }
        }
        None
    }
}

/// A key as seen by a prompt callback: structured, so the callback can tell an arrow key apart
/// from ordinary input without any shared mutable "arrow intent" flag.
#[derive(Clone, Copy, Debug)]
enum PromptKey {
    Printable(u8),
    Arrow(AKey),
    Enter,
    Escape,
    Backspace,
    Other,
}

impl From<&Key> for PromptKey {
    fn from(key: &Key) -> Self {
        match key {
            Key::Char(b'\r' | b'\n') => Self::Enter,
            Key::Escape => Self::Escape,
            Key::Char(BACKSPACE | DELETE_BIS) => Self::Backspace,
            Key::Char(c) if !c.is_ascii_control() => Self::Printable(*c),
            Key::Arrow(a) => Self::Arrow(*a),
            Key::Char(_) | Key::Home | Key::End | Key::Delete | Key::Page(_) => Self::Other,
        }
    }
}

/// The result of feeding one key into a prompt's input buffer.
enum PromptOutcome {
    Active,
    Completed,
    Cancelled,
}

/// Apply `key` to the prompt's input `buffer` in place, per the prompt mini-buffer rules:
/// printable bytes append, Backspace pops, Enter commits (only if non-empty), Escape cancels.
fn advance_prompt(buffer: &mut Vec<u8>, key: &PromptKey) -> PromptOutcome {
    match key {
        PromptKey::Enter if !buffer.is_empty() => PromptOutcome::Completed,
        PromptKey::Enter => PromptOutcome::Active,
        PromptKey::Escape => PromptOutcome::Cancelled,
        PromptKey::Backspace => {
            buffer.pop();
            PromptOutcome::Active
        }
        PromptKey::Printable(c) => {
            buffer.push(*c);
            PromptOutcome::Active
        }
        PromptKey::Arrow(_) | PromptKey::Other => PromptOutcome::Active,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_size_output() {
        assert_eq!(format_size(0), "0B");
        assert_eq!(format_size(1023), "1023B");
        assert_eq!(format_size(1024), "1.00kB");
        assert_eq!(format_size(1536), "1.50kB");
        assert_eq!(format_size(1024 * 1024), "1.00MB");
    }

    #[test]
    fn editor_insert_byte() {
        let mut editor = Editor::default();
        editor.insert_byte(b'X');
        editor.insert_byte(b'Y');
        editor.insert_byte(b'Z');
        assert_eq!(editor.cursor.cx, 3);
        assert_eq!(editor.rows.len(), 1);
        assert_eq!(editor.dirty, 3);
        assert_eq!(editor.rows[0].chars, [b'X', b'Y', b'Z']);
    }

    #[test]
    fn editor_insert_new_line() {
        let mut editor = Editor::default();
        for _ in 0..3 {
            editor.insert_new_line();
        }
        assert_eq!(editor.cursor.cy, 3);
        assert_eq!(editor.rows.len(), 3);
        for row in &editor.rows {
            assert_eq!(row.chars, []);
        }
    }

    #[test]
    fn editor_delete_char() {
        let mut editor = Editor::default();
        for b in b"Hello world!" {
            editor.insert_byte(*b);
        }
        editor.delete_char();
        assert_eq!(editor.rows[0].chars, "Hello world".as_bytes());
        editor.move_cursor(&AKey::Left);
        editor.move_cursor(&AKey::Left);
        editor.move_cursor(&AKey::Left);
        editor.delete_char();
        assert_eq!(editor.rows[0].chars, "Hello wrld".as_bytes());
    }

    #[test]
    fn delete_char_merges_previous_row() {
        let mut editor = Editor::default();
        for b in b"ab\ncd" {
            if *b == b'\n' {
                editor.insert_new_line();
            } else {
                editor.insert_byte(*b);
            }
        }
        editor.cursor.cx = 0;
        editor.delete_char();
        assert_eq!(editor.rows.len(), 1);
        assert_eq!(editor.rows[0].chars, b"abcd");
        assert_eq!(editor.cursor.cy, 0);
        assert_eq!(editor.cursor.cx, 2);
    }

    #[test]
    fn editor_move_cursor_left_right() {
        let mut editor = Editor::default();
        for b in b"Hello world\nHappy New Year" {
            if *b == b'\n' {
                editor.insert_new_line();
            } else {
                editor.insert_byte(*b);
            }
        }
        assert_eq!(editor.cursor.cx, 14);
        assert_eq!(editor.cursor.cy, 1);

        for _ in 0..14 {
            editor.move_cursor(&AKey::Left);
        }
        assert_eq!(editor.cursor.cy, 1);
        assert_eq!(editor.cursor.cx, 0);

        editor.move_cursor(&AKey::Left);
        assert_eq!(editor.cursor.cy, 0);
        assert_eq!(editor.cursor.cx, 11);
    }

    #[test]
    fn editor_move_cursor_up_down() {
        let mut editor = Editor::default();
        for b in b"abcdefgh\nij\nklmnopqrstuvwxyz" {
            if *b == b'\n' {
                editor.insert_new_line();
            } else {
                editor.insert_byte(*b);
            }
        }
        assert_eq!(editor.cursor.cy, 2);
        assert_eq!(editor.cursor.cx, 16);

        editor.move_cursor(&AKey::Up);
        assert_eq!(editor.cursor.cy, 1);
        assert_eq!(editor.cursor.cx, 2); // clamped to "ij".len()

        editor.move_cursor(&AKey::Down);
        assert_eq!(editor.cursor.cy, 2);
        assert_eq!(editor.cursor.cx, 2);
    }

    #[test]
    fn dirty_counter_resets_on_save() {
        let mut editor = Editor::default();
        editor.insert_byte(b'x');
        assert!(editor.dirty > 0);
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("saved.txt");
        let path_str = path.to_str().expect("path is valid UTF-8");
        assert!(editor.save_and_handle_io_errors(path_str));
        assert_eq!(editor.dirty, 0);
    }

    #[test]
    fn find_wraps_around_and_marks_match() {
        let mut editor = Editor::default();
        for b in b"foo\nbar\nbaz" {
            if *b == b'\n' {
                editor.insert_new_line();
            } else {
                editor.insert_byte(*b);
            }
        }
        let found = editor.find(b"ba", None, true);
        assert_eq!(found, Some(1));
        assert_eq!(editor.rows[1].match_segment, Some(0..2));
    }
}
