//! # vtedit

use vtedit::{Config, Editor, Error};

/// Parse the command line, initialize the editor and run the program, optionally opening a file
/// if a path argument was given.
///
/// # Errors
///
/// Any error occurring during the execution of the program is returned by this function.
fn main() -> Result<(), Error> {
    let mut args = std::env::args();
    match (args.nth(1), /* remaining_args = */ args.len()) {
        (Some(arg), 0) if arg == "--version" => println!("vtedit, v{}", env!("VTEDIT_VERSION")),
        (Some(arg), 0) if arg.starts_with('-') => return Err(Error::UnrecognizedOption(arg)),
        (file_name, 0) => Editor::new(Config::default())?.run(file_name)?,
        (_, n_remaining_args) => return Err(Error::TooManyArguments(n_remaining_args + 1)),
    }
    Ok(())
}
