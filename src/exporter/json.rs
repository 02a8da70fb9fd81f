// file: src/exporter/json.rs
// description: json export of extraction results

use crate::error::{ExtractError, Result};
use crate::pipeline::{BatchReport, FileReport};
use crate::utils::Validator;
use chrono::Utc;
use serde::Serialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

const MANIFEST_FILE: &str = "manifest.json";

#[derive(Debug, Clone)]
pub struct JsonExporter {
    output_dir: PathBuf,
}

#[derive(Debug, Serialize)]
pub struct ExportManifest {
    pub exported_at: String,
    pub total_files: usize,
    pub total_entities: usize,
    pub files: Vec<String>,
}

pub fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

impl JsonExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        Validator::validate_output_dir(&output_dir)?;
        fs::create_dir_all(&output_dir)
            .map_err(|e| ExtractError::file_operation(&output_dir, e))?;
        Ok(Self { output_dir })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Writes one file's result as `<sanitized source>.json`.
    pub fn export_single(&self, report: &FileReport, pretty: bool) -> Result<PathBuf> {
        let file_name = format!("{}.json", Validator::sanitize_file_name(&report.source));
        self.export_as(report, &file_name, pretty)
    }

    fn export_as(&self, report: &FileReport, file_name: &str, pretty: bool) -> Result<PathBuf> {
        let path = self.output_dir.join(file_name);
        self.write(&path, &report.result, pretty)?;
        Ok(path)
    }

    /// Writes every file's result plus a `manifest.json` describing the export.
    pub fn export_all(&self, report: &BatchReport, pretty: bool) -> Result<ExportManifest> {
        info!("Starting JSON export to {:?}", self.output_dir);

        let mut taken: HashSet<String> = HashSet::new();
        taken.insert(MANIFEST_FILE.to_string());

        let mut files = Vec::with_capacity(report.files.len());
        for file in &report.files {
            let file_name = unique_file_name(&file.source, &mut taken);
            self.export_as(file, &file_name, pretty)?;
            files.push(file_name);
        }

        let manifest = ExportManifest {
            exported_at: Utc::now().to_rfc3339(),
            total_files: files.len(),
            total_entities: report.total_entities(),
            files,
        };
        self.write(&self.output_dir.join(MANIFEST_FILE), &manifest, true)?;

        info!(
            "Export complete: {} files exported",
            manifest.total_files
        );
        Ok(manifest)
    }

    fn write<T: Serialize>(&self, path: &Path, value: &T, pretty: bool) -> Result<()> {
        let json = to_json(value, pretty)?;
        fs::write(path, json).map_err(|e| ExtractError::file_operation(path, e))
    }
}

/// Distinct sources can sanitize to the same name; later ones get `-2`, `-3`, ...
fn unique_file_name(source: &str, taken: &mut HashSet<String>) -> String {
    let stem = Validator::sanitize_file_name(source);
    let mut file_name = format!("{}.json", stem);
    let mut n = 2;
    while !taken.insert(file_name.clone()) {
        file_name = format!("{}-{}.json", stem, n);
        n += 1;
    }
    file_name
}
