//! Relevance heuristics
//!
//! Pure computation: keyword-overlap field classification and the weighted
//! bag-of-words similarity score used to rank search results against a
//! reference paper.

mod classifier;
mod scorer;

pub use classifier::determine_field;
pub use scorer::calculate_relevance;
