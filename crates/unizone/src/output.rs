//! Output sink: stdout by default, or a file with `--output`.

use std::io::{self, Write};
use std::path::Path;

/// Write `text` plus a trailing newline to `path`, or stdout when `None`.
pub fn emit(text: &str, path: Option<&Path>) -> io::Result<()> {
    match path {
        Some(path) => std::fs::write(path, format!("{text}\n")),
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{text}")?;
            stdout.flush()
        }
    }
}
