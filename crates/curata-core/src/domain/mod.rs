//! Domain models for curata
//!
//! Canonical representations of papers, research fields, and newsletters,
//! shared by the search pipeline and any consuming front end.

mod field;
mod newsletter;
mod paper;

pub use field::ResearchField;
pub use newsletter::{Newsletter, NewsletterStatus};
pub use paper::Paper;
