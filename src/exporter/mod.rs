// file: src/exporter/mod.rs
// description: result rendering module exports
// reference: internal module structure

pub mod json;
pub mod text;

pub use json::{ExportManifest, JsonExporter, to_json};
pub use text::TextPrinter;
