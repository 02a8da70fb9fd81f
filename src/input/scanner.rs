// file: src/input/scanner.rs
// description: Directory walking and text file discovery with filtering
// reference: https://docs.rs/walkdir

use crate::config::InputConfig;
use crate::error::{ExtractError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

pub struct InputScanner {
    config: InputConfig,
}

#[derive(Debug, Clone)]
pub struct ScannedFile {
    pub path: PathBuf,
    pub relative_path: String,
    pub size: u64,
}

impl InputScanner {
    pub fn new(config: InputConfig) -> Self {
        Self { config }
    }

    /// Returns `root` itself when it is a file, otherwise every matching file
    /// below it, sorted by path.
    pub fn scan(&self, root: &Path) -> Result<Vec<ScannedFile>> {
        if root.is_file() {
            let size = root
                .metadata()
                .map_err(|e| ExtractError::file_operation(root, e))?
                .len();
            return Ok(vec![ScannedFile {
                path: root.to_path_buf(),
                relative_path: root.display().to_string(),
                size,
            }]);
        }

        if !root.is_dir() {
            return Err(ExtractError::Validation(format!(
                "Input path does not exist: {}",
                root.display()
            )));
        }

        info!("Scanning directory: {}", root.display());
        let max_size = (self.config.max_file_size_mb * 1024 * 1024) as u64;
        let mut files = Vec::new();

        for entry in WalkDir::new(root)
            .follow_links(self.config.follow_links)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();

            if !self.has_allowed_extension(path) {
                debug!("Skipping file: {}", path.display());
                continue;
            }

            let Ok(metadata) = entry.metadata() else {
                continue;
            };

            let size = metadata.len();
            if size > max_size {
                debug!(
                    "Skipping large file ({} MB): {}",
                    size / 1024 / 1024,
                    path.display()
                );
                continue;
            }

            let relative_path = path
                .strip_prefix(root)
                .unwrap_or(path)
                .to_string_lossy()
                .to_string();

            files.push(ScannedFile {
                path: path.to_path_buf(),
                relative_path,
                size,
            });
        }

        info!("Found {} text files", files.len());
        Ok(files)
    }

    fn has_allowed_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| {
                self.config
                    .extensions
                    .iter()
                    .any(|allowed| allowed.trim_start_matches('.').eq_ignore_ascii_case(ext))
            })
    }
}
