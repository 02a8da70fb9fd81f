// file: src/input/reader.rs
// description: reading text to scan from files and stdin

use crate::error::{ExtractError, Result};
use std::fs;
use std::io::Read;
use std::path::Path;
use tracing::debug;

pub fn read_text(path: &Path) -> Result<String> {
    let content =
        fs::read_to_string(path).map_err(|e| ExtractError::file_operation(path, e))?;
    debug!("Read {} bytes from {}", content.len(), path.display());
    Ok(content)
}

pub fn read_stdin() -> Result<String> {
    let mut content = String::new();
    std::io::stdin().read_to_string(&mut content)?;
    debug!("Read {} bytes from stdin", content.len());
    Ok(content)
}
