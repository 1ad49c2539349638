use std::fs;
use std::io::{self, Read};

use crate::error::{Error, Result};

const STDIN_PATH: &str = "-";

/// Read input from a file or stdin
///
/// If `file` is `Some` path other than `-`, reads from the specified file.
/// If `file` is `None` or `-`, reads from stdin until EOF.
pub(crate) fn read_input(file: Option<&str>) -> Result<Vec<u8>> {
    match file {
        Some(path) if path != STDIN_PATH => {
            if path.is_empty() {
                return Err(Error::InvalidInput("empty file path".to_string()));
            }
            tracing::debug!(path, "reading dump from file");
            Ok(fs::read(path)?)
        }
        _ => {
            tracing::debug!("reading dump from stdin");
            let mut buffer = Vec::new();
            io::stdin().lock().read_to_end(&mut buffer)?;
            Ok(buffer)
        }
    }
}
