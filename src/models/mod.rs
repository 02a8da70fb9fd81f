// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod entity;
pub mod result;

pub use entity::{EntityCategory, EntityKind, EntityMatch};
pub use result::{ExtractionResult, Overlap};
