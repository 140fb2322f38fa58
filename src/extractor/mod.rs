// src/extractor/mod.rs

pub mod content;
pub mod structure;
mod utils;

pub use content::ContentResolver;
pub use structure::StructureExtractor;
