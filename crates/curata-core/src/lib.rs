//! curata-core: Core library for the curata literature pipeline
//!
//! This library provides pure Rust implementations of:
//! - Stop-word tokenization for scientific text
//! - Research-field classification over a fixed catalog
//! - Keyword/title/abstract relevance scoring between papers
//! - arXiv search and Atom feed parsing
//! - Heuristic metadata extraction from PDF page text
//! - Newsletter assembly and HTML rendering
//!
//! The presentation layer consumes these types and functions; nothing here
//! renders UI, persists files, or retries failed requests on its own.

pub mod domain;
pub mod http;
pub mod newsletter;
pub mod pdf;
pub mod relevance;
pub mod search;
pub mod sources;
pub mod text;

// Re-export main types for convenience
pub use domain::{Newsletter, NewsletterStatus, Paper, ResearchField};
pub use http::{HttpClient, HttpError, HttpResponse};
pub use newsletter::{generate_newsletter, render_html};
pub use pdf::{extract_metadata, PdfError};
pub use relevance::{calculate_relevance, determine_field};
pub use search::{LiteratureSearch, SearchError};
pub use sources::{parse_atom_feed, ArxivSource, SourceError, SourceMetadata};
pub use text::extract_important_words;
