// file: src/extractor/mod.rs
// description: entity extraction module exports
// reference: internal module structure

pub mod context;
pub mod entity;
pub mod patterns;
pub mod sample;

pub use entity::{EntityExtractor, extract};
pub use sample::SAMPLE_TEXT;
