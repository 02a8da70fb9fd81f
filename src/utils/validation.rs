// file: src/utils/validation.rs
// description: input validation utilities and helpers
// reference: input validation patterns

use crate::error::{ExtractError, Result};
use std::path::Path;

pub const MAX_CONTEXT_WINDOW: usize = 1000;

pub struct Validator;

impl Validator {
    pub fn validate_input_path(path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(ExtractError::Validation(format!(
                "Input path does not exist: {}",
                path.display()
            )));
        }

        if !path.is_file() && !path.is_dir() {
            return Err(ExtractError::Validation(format!(
                "Input path is neither a file nor a directory: {}",
                path.display()
            )));
        }

        Ok(())
    }

    pub fn validate_output_dir(path: &Path) -> Result<()> {
        if path.exists() && !path.is_dir() {
            return Err(ExtractError::Validation(format!(
                "Output path is not a directory: {}",
                path.display()
            )));
        }
        Ok(())
    }

    pub fn validate_context_window(window: usize) -> Result<()> {
        if window > MAX_CONTEXT_WINDOW {
            return Err(ExtractError::Validation(format!(
                "Context window too large (max {})",
                MAX_CONTEXT_WINDOW
            )));
        }
        Ok(())
    }

    /// Flattens a relative path into a single file name.
    pub fn sanitize_file_name(path: &str) -> String {
        let flattened: String = path
            .replace('\\', "/")
            .trim()
            .trim_start_matches("./")
            .trim_matches('/')
            .split('/')
            .filter(|part| !part.is_empty() && *part != "..")
            .collect::<Vec<_>>()
            .join("__")
            .chars()
            .map(|c| {
                if c.is_alphanumeric() || matches!(c, '.' | '_' | '-') {
                    c
                } else {
                    '_'
                }
            })
            .collect();

        if flattened.is_empty() {
            "input".to_string()
        } else {
            flattened
        }
    }

    pub fn truncate_text(text: &str, max_chars: usize) -> String {
        match text.char_indices().nth(max_chars) {
            Some((idx, _)) => format!("{}...", &text[..idx]),
            None => text.to_string(),
        }
    }
}
