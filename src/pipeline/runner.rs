// file: src/pipeline/runner.rs
// description: runs the extractor over every file an input scan yields
// reference: pipeline orchestration

use crate::config::InputConfig;
use crate::error::Result;
use crate::extractor::EntityExtractor;
use crate::input::{InputScanner, read_text};
use crate::models::ExtractionResult;
use crate::pipeline::progress::{BatchStats, ProgressTracker};
use crate::utils::OperationTimer;
use serde::Serialize;
use std::path::Path;
use tracing::{debug, error};

#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub source: String,
    pub bytes: u64,
    pub result: ExtractionResult,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileFailure {
    pub source: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub files: Vec<FileReport>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<FileFailure>,
    pub stats: BatchStats,
}

impl BatchReport {
    pub fn total_entities(&self) -> usize {
        self.files.iter().map(|f| f.result.total()).sum()
    }
}

pub struct BatchRunner<'a> {
    extractor: &'a EntityExtractor,
    scanner: InputScanner,
    show_progress: bool,
}

impl<'a> BatchRunner<'a> {
    pub fn new(extractor: &'a EntityExtractor, input: InputConfig, show_progress: bool) -> Self {
        Self {
            extractor,
            scanner: InputScanner::new(input),
            show_progress,
        }
    }

    /// Extracts from a single in-memory text.
    pub fn run_text(&self, source: &str, text: &str) -> FileReport {
        FileReport {
            source: source.to_string(),
            bytes: text.len() as u64,
            result: self.extractor.extract(text),
        }
    }

    /// Extracts from a file or every text file below a directory. Files that
    /// cannot be read are recorded as failures and do not stop the run.
    pub fn run(&self, root: &Path) -> Result<BatchReport> {
        let timer = OperationTimer::new("extract");
        let files = self.scanner.scan(root)?;
        let tracker = ProgressTracker::with_visibility(files.len(), self.show_progress);

        let mut report = BatchReport::default();

        for file in files {
            tracker.set_message(file.relative_path.clone());

            match read_text(&file.path) {
                Ok(text) => {
                    let file_report = self.run_text(&file.relative_path, &text);
                    debug!(
                        "Extracted {} entities from {}",
                        file_report.result.total(),
                        file.relative_path
                    );
                    tracker.add_bytes_processed(file_report.bytes);
                    tracker.add_entities(file_report.result.total());
                    tracker.inc_files_processed();
                    report.files.push(file_report);
                }
                Err(e) => {
                    error!("Failed to process {}: {}", file.relative_path, e);
                    tracker.inc_files_failed();
                    report.failures.push(FileFailure {
                        source: file.relative_path,
                        error: e.to_string(),
                    });
                }
            }
        }

        tracker.finish();
        report.stats = tracker.get_stats();
        report.stats.duration_ms = timer.finish_with_count(report.files.len()).duration_ms;

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EntityKind;
    use std::fs;
    use tempfile::TempDir;

    fn input_config() -> InputConfig {
        InputConfig {
            extensions: vec!["txt".to_string()],
            max_file_size_mb: 1,
            follow_links: false,
        }
    }

    #[test]
    fn test_run_directory() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.txt"), "Contact: a@b.com").unwrap();
        fs::write(temp.path().join("b.txt"), "Meeting on 2024-01-15").unwrap();
        fs::write(temp.path().join("c.txt"), "hello world").unwrap();

        let extractor = EntityExtractor::default();
        let runner = BatchRunner::new(&extractor, input_config(), false);
        let report = runner.run(temp.path()).unwrap();

        assert_eq!(report.files.len(), 3);
        assert!(report.failures.is_empty());
        assert_eq!(report.stats.files_processed, 3);
        assert_eq!(report.total_entities(), 2);
        assert_eq!(report.stats.entities_found, 2);
        assert_eq!(
            report.files[0].result.raw_texts(EntityKind::Email),
            vec!["a@b.com"]
        );
    }

    #[test]
    fn test_unreadable_file_is_recorded() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("good.txt"), "Call 555-123-4567 today").unwrap();
        fs::write(temp.path().join("bad.txt"), [0xff, 0xfe, 0xfd]).unwrap();

        let extractor = EntityExtractor::default();
        let runner = BatchRunner::new(&extractor, input_config(), false);
        let report = runner.run(temp.path()).unwrap();

        assert_eq!(report.files.len(), 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].source, "bad.txt");
        assert_eq!(report.stats.files_failed, 1);
        assert_eq!(report.stats.success_rate(), 50.0);
    }

    #[test]
    fn test_run_text() {
        let extractor = EntityExtractor::with_kinds(&[EntityKind::Email]);
        let runner = BatchRunner::new(&extractor, input_config(), false);
        let report = runner.run_text("<inline>", "Contact: a@b.com");

        assert_eq!(report.bytes, 16);
        assert_eq!(report.result.total(), 1);
    }
}
