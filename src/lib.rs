// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod error;
pub mod exporter;
pub mod extractor;
pub mod input;
pub mod models;
pub mod pipeline;
pub mod utils;

pub use config::{Config, ExtractionConfig, InputConfig, OutputConfig, OutputFormat, OverlapPolicy};
pub use error::{ExtractError, Result};
pub use exporter::{ExportManifest, JsonExporter, TextPrinter};
pub use extractor::{EntityExtractor, SAMPLE_TEXT, extract};
pub use input::{InputScanner, ScannedFile};
pub use models::{EntityCategory, EntityKind, EntityMatch, ExtractionResult, Overlap};
pub use pipeline::{BatchReport, BatchRunner, BatchStats, FileReport, ProgressTracker};
pub use utils::{OperationTimer, PerformanceMetrics, Validator};
