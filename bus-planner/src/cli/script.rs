//! Comma-separated command files.
//!
//! Each non-empty row is `command, arg, arg, ...`. Fields are trimmed and
//! joined with single spaces, giving a line the shell parses as if typed.

use std::io;
use std::path::Path;

/// Error reading a command file.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("{0}")]
    Csv(#[from] csv::Error),
}

/// Read a command file into shell lines.
pub fn read_script(path: impl AsRef<Path>) -> Result<Vec<String>, ScriptError> {
    let file = std::fs::File::open(path.as_ref()).map_err(csv::Error::from)?;
    parse_script(file)
}

/// Convert comma-separated rows from any reader into shell lines.
pub fn parse_script<R: io::Read>(reader: R) -> Result<Vec<String>, ScriptError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut lines = Vec::new();
    let mut record = csv::StringRecord::new();
    while reader.read_record(&mut record)? {
        let fields: Vec<&str> = record.iter().filter(|f| !f.is_empty()).collect();
        if fields.is_empty() {
            continue;
        }
        lines.push(fields.join(" "));
    }
    Ok(lines)
}
