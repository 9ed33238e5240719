//! # vtedit
//!
//! A small terminal text editor with syntax highlighting, incremental search, and a modal
//! status-line prompt.
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub use crate::{config::Config, editor::Editor, error::Error};

pub mod ansi_escape;
mod config;
mod editor;
mod error;
mod row;
mod syntax;
mod terminal;

#[cfg(windows)] mod windows;
#[cfg(windows)] use windows as sys;

#[cfg(unix)] mod unix;
#[cfg(unix)] use unix as sys;
