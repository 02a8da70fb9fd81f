// file: src/input/mod.rs
// description: text input module exports
// reference: internal module structure

pub mod reader;
pub mod scanner;

pub use reader::{read_stdin, read_text};
pub use scanner::{InputScanner, ScannedFile};
