//! Structured profile construction: taxonomy matching, section segmentation,
//! and the analyzer that ties them together, plus the upload-facing handlers.

pub mod analyzer;
pub mod handlers;
pub mod sections;
pub mod taxonomy;
