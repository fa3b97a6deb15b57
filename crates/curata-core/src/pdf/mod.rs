//! Heuristic metadata extraction from PDF page text
//!
//! The input is plain text joined from extracted pages; a PDF-reading
//! collaborator owns the binary format. These are best-effort heuristics
//! over unstructured text, not a layout-aware parser, and carry no
//! correctness guarantee on arbitrary PDFs.

mod metadata;

pub use metadata::extract_metadata;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PdfError {
    /// No text could be extracted at all, so no heuristic can run.
    #[error("PDF contains no extractable text")]
    NoTextContent,
}
