//! Literature search orchestration
//!
//! Composes the arXiv source with the field classifier and relevance scorer:
//! query construction, feed parsing, and re-ranking of results against a
//! reference paper.

use crate::domain::{Paper, ResearchField};
use crate::http::HttpError;
use crate::relevance::{calculate_relevance, determine_field};
use crate::sources::{ArxivSource, SourceError};
use crate::text::extract_important_words;
use std::collections::{BTreeSet, HashSet};
use thiserror::Error;

/// Result cap used when the caller does not specify one.
const DEFAULT_MAX_RESULTS: u32 = 20;

/// How many abstract tokens join the query in a related-paper search.
const ABSTRACT_KEYWORD_LIMIT: usize = 5;

/// Errors surfaced by the search pipeline.
#[derive(Error, Debug)]
pub enum SearchError {
    /// The request URL could not be constructed.
    #[error("Invalid search URL")]
    InvalidUrl,
    /// Transport failure or a non-success HTTP status.
    #[error("Network request failed: {message}")]
    Network { message: String },
    /// The feed document was structurally unparseable.
    #[error("Failed to parse search results: {message}")]
    Parse { message: String },
    /// Search succeeded but returned nothing. Never raised by this crate;
    /// declared so callers can express that policy in the same taxonomy.
    #[error("No results found")]
    NoResults,
}

impl From<SourceError> for SearchError {
    fn from(e: SourceError) -> Self {
        match e {
            SourceError::Http(HttpError::InvalidUrl { .. }) => SearchError::InvalidUrl,
            SourceError::Http(err) => SearchError::Network {
                message: err.to_string(),
            },
            SourceError::RateLimit => SearchError::Network {
                message: "rate limited".to_string(),
            },
            SourceError::Parse(message) => SearchError::Parse { message },
            SourceError::NotFound => SearchError::NoResults,
        }
    }
}

/// Configured literature search pipeline.
///
/// Owns its source (and through it, the HTTP client); construct one and
/// pass it to callers explicitly rather than going through a process-wide
/// singleton. All methods borrow `&self` and keep working state in locals,
/// so concurrent searches do not interfere, and dropping a returned future
/// cancels the in-flight request without side effects.
pub struct LiteratureSearch {
    source: ArxivSource,
}

impl LiteratureSearch {
    pub fn new() -> Self {
        Self {
            source: ArxivSource::new(),
        }
    }

    pub fn with_source(source: ArxivSource) -> Self {
        Self { source }
    }

    /// Search for papers matching keywords within a research field.
    ///
    /// The field's own keywords are appended to widen the query; results
    /// come back in the feed's order, newest submission first.
    pub async fn search_by_keywords(
        &self,
        keywords: &[String],
        field: &ResearchField,
        max_results: u32,
    ) -> Result<Vec<Paper>, SearchError> {
        let mut terms: Vec<String> = keywords.to_vec();
        terms.extend(field.keywords.iter().cloned());

        tracing::debug!(field = %field.name, terms = terms.len(), "searching arXiv");
        let papers = self.source.search(&terms, max_results).await?;
        tracing::debug!(results = papers.len(), "arXiv search finished");

        Ok(papers)
    }

    /// Find papers related to a reference paper, ranked by relevance.
    ///
    /// Builds a query from the reference paper's keywords, its title tokens,
    /// and a few abstract tokens, classifies the field, searches, then
    /// scores every result against the reference. Results are sorted by
    /// descending relevance; the sort is stable, so equal scores keep the
    /// feed order.
    pub async fn search_related_to(
        &self,
        paper: &Paper,
        max_results: u32,
    ) -> Result<Vec<Paper>, SearchError> {
        let keywords = related_search_keywords(paper);
        let keyword_set: HashSet<String> = keywords.iter().cloned().collect();
        let field = determine_field(&keyword_set);

        let results = self
            .search_by_keywords(&keywords, field, max_results)
            .await?;

        Ok(rank_by_relevance(paper, results))
    }

    /// Free-text search entry point.
    ///
    /// Placeholder for an agent-driven search backend: today it tokenizes
    /// the query, classifies a field, and falls back to plain keyword
    /// search. The `context` parameter (for example an abstract) is part of
    /// the intended integration contract but is not consumed by the
    /// fallback.
    pub async fn search_with_free_text(
        &self,
        query: &str,
        context: Option<&str>,
    ) -> Result<Vec<Paper>, SearchError> {
        if let Some(context) = context {
            tracing::debug!(
                context_len = context.len(),
                "free-text context ignored by keyword fallback"
            );
        }

        let keyword_set = extract_important_words(query);
        let field = determine_field(&keyword_set);

        let mut keywords: Vec<String> = keyword_set.into_iter().collect();
        keywords.sort();

        self.search_by_keywords(&keywords, field, DEFAULT_MAX_RESULTS)
            .await
    }
}

impl Default for LiteratureSearch {
    fn default() -> Self {
        Self::new()
    }
}

/// Query keyword set for a related-paper search: the reference paper's own
/// keywords, its title tokens, and up to five abstract tokens
/// (lexicographically first, for reproducibility), deduplicated.
fn related_search_keywords(paper: &Paper) -> Vec<String> {
    let mut set: BTreeSet<String> = paper.keywords.iter().cloned().collect();
    set.extend(extract_important_words(&paper.title));

    if let Some(abstract_text) = &paper.abstract_text {
        let mut words: Vec<String> = extract_important_words(abstract_text).into_iter().collect();
        words.sort();
        set.extend(words.into_iter().take(ABSTRACT_KEYWORD_LIMIT));
    }

    set.into_iter().collect()
}

/// Score every result against the reference and sort by descending
/// relevance. Scoring copies each record via [`Paper::scored`]; the inputs
/// are never mutated.
fn rank_by_relevance(reference: &Paper, results: Vec<Paper>) -> Vec<Paper> {
    let mut scored: Vec<Paper> = results
        .iter()
        .map(|candidate| candidate.scored(calculate_relevance(reference, candidate)))
        .collect();

    // Vec::sort_by is stable: ties keep feed order
    scored.sort_by(|a, b| {
        b.relevance_score
            .partial_cmp(&a.relevance_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    scored
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paper(title: &str, keywords: &[&str], abstract_text: Option<&str>) -> Paper {
        Paper::new(title)
            .with_keywords(keywords.iter().map(|k| k.to_string()).collect())
            .with_abstract(abstract_text.map(str::to_string))
    }

    #[test]
    fn test_related_search_keywords_merges_sources() {
        let reference = paper(
            "Protein folding with transformers",
            &["deep learning"],
            Some("Attention mechanisms improve structure prediction accuracy."),
        );
        let keywords = related_search_keywords(&reference);

        assert!(keywords.contains(&"deep learning".to_string()));
        assert!(keywords.contains(&"protein".to_string()));
        assert!(keywords.contains(&"folding".to_string()));
        assert!(keywords.contains(&"transformers".to_string()));
        // from the abstract
        assert!(keywords.contains(&"attention".to_string()));

        // Deduplicated
        let unique: HashSet<&String> = keywords.iter().collect();
        assert_eq!(unique.len(), keywords.len());
    }

    #[test]
    fn test_related_search_keywords_caps_abstract_tokens() {
        let reference = paper(
            "Run",
            &[],
            Some("alpha bravo charlie delta echelon foxtrot golfing hotelier"),
        );
        let keywords = related_search_keywords(&reference);
        // Title token too short to contribute; only 5 abstract tokens survive
        assert_eq!(keywords.len(), 5);
    }

    #[test]
    fn test_rank_by_relevance_sorts_descending() {
        let reference = paper(
            "Neural rendering of scenes",
            &["rendering"],
            Some("Differentiable rendering for scene reconstruction."),
        );
        let weak = paper("Soil chemistry methods", &["soil"], None);
        let strong = paper(
            "Neural rendering advances",
            &["rendering"],
            Some("Differentiable rendering for scene reconstruction."),
        );

        let ranked = rank_by_relevance(&reference, vec![weak.clone(), strong.clone()]);
        assert_eq!(ranked[0].title, strong.title);
        assert_eq!(ranked[1].title, weak.title);

        let scores: Vec<f64> = ranked
            .iter()
            .map(|p| p.relevance_score.expect("ranked papers carry a score"))
            .collect();
        assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_rank_by_relevance_keeps_feed_order_on_ties() {
        let reference = paper("Unrelated reference title", &["reference"], None);
        let first = paper("Completely different one", &[], None);
        let second = paper("Another unrelated entry", &[], None);

        // Both score 0.0; stable sort must keep input order
        let ranked = rank_by_relevance(&reference, vec![first.clone(), second.clone()]);
        assert_eq!(ranked[0].title, first.title);
        assert_eq!(ranked[1].title, second.title);
    }

    #[test]
    fn test_source_error_maps_to_network_error() {
        let err: SearchError = SourceError::Http(HttpError::RequestFailed {
            message: "Status 404".to_string(),
        })
        .into();
        assert!(matches!(err, SearchError::Network { .. }));

        let err: SearchError = SourceError::Parse("bad feed".to_string()).into();
        assert!(matches!(err, SearchError::Parse { .. }));

        let err: SearchError = SourceError::Http(HttpError::InvalidUrl {
            url: "bogus".to_string(),
        })
        .into();
        assert!(matches!(err, SearchError::InvalidUrl));
    }
}
