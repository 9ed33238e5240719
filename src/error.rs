//! # Errors

/// The editor's error type.
///
/// Only `Debug` is derived: `main` returns `Result<(), Error>`, and the runtime's default error
/// reporting (the `Debug` representation on stderr, exit code 1) is the only diagnostic surface a
/// startup failure needs.
#[derive(Debug)]
pub enum Error {
    /// Wrapper around `std::io::Error`, covering most terminal and file-system failures.
    Io(std::io::Error),
    /// Formatting the in-memory render buffer failed. `String`'s `Write` impl never actually
    /// fails; this variant only exists so the rendering pipeline can use `?` instead of
    /// `unwrap_used`-denied panics.
    Fmt(std::fmt::Error),
    /// The window size obtained through a system call, or through the cursor-position fallback,
    /// was invalid (zero rows or columns).
    InvalidWindowSize,
    /// The terminal did not reply to a cursor-position query in the expected format.
    CursorPosition,
    /// An unrecognized command-line option was given. The attribute is the offending argument.
    UnrecognizedOption(String),
    /// Too many command-line arguments were given. The attribute is the total argument count.
    TooManyArguments(usize),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self { Self::Io(err) }
}

impl From<std::fmt::Error> for Error {
    fn from(err: std::fmt::Error) -> Self { Self::Fmt(err) }
}
