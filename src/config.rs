//! # Configuration
//!
//! The editor's tunable constants, gathered in one place so the core never hardcodes them inline.
//! There is no configuration-file format and no environment-variable override: the values below
//! are the only ones the editor ever uses.

use std::time::Duration;

/// The editor's configuration.
pub struct Config {
    /// The size of a tab stop. Must be > 0.
    pub(crate) tab_stop: usize,
    /// The number of confirmations needed before quitting with unsaved changes.
    pub(crate) quit_times: usize,
    /// How long a status message remains visible.
    pub(crate) message_duration: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self { tab_stop: 8, quit_times: 2, message_duration: Duration::from_secs(7) }
    }
}
