//! Literature source plugins

mod arxiv;
mod traits;

pub use arxiv::{parse_atom_feed, ArxivSource};
pub use traits::{SourceError, SourceMetadata};
