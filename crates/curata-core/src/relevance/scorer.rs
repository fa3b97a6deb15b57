//! Weighted bag-of-words similarity between two papers

use crate::domain::Paper;
use crate::text::extract_important_words;
use std::collections::HashSet;

const KEYWORD_WEIGHT: f64 = 0.5;
const TITLE_WEIGHT: f64 = 0.3;
const ABSTRACT_WEIGHT: f64 = 0.2;

/// Score `candidate` against `reference`, in [0.0, 1.0].
///
/// Weighted sum of keyword, title-token, and abstract-token overlap. Each
/// term divides the intersection size by the reference-side set size, so the
/// score is deliberately asymmetric: swapping the arguments changes the
/// denominators and, in general, the ranking. A term whose reference-side
/// set is empty contributes nothing. The sum is clamped to 1.0.
///
/// This is an explainable lexical heuristic, not a semantic similarity; the
/// asymmetry is part of the contract and must not be replaced with a
/// symmetric Jaccard measure.
pub fn calculate_relevance(reference: &Paper, candidate: &Paper) -> f64 {
    let mut score = 0.0;

    let reference_keywords: HashSet<String> =
        reference.keywords.iter().map(|k| k.to_lowercase()).collect();
    let candidate_keywords: HashSet<String> =
        candidate.keywords.iter().map(|k| k.to_lowercase()).collect();
    score += overlap(&reference_keywords, &candidate_keywords) * KEYWORD_WEIGHT;

    let reference_title = extract_important_words(&reference.title);
    let candidate_title = extract_important_words(&candidate.title);
    score += overlap(&reference_title, &candidate_title) * TITLE_WEIGHT;

    if let (Some(reference_abstract), Some(candidate_abstract)) =
        (&reference.abstract_text, &candidate.abstract_text)
    {
        let reference_words = extract_important_words(reference_abstract);
        let candidate_words = extract_important_words(candidate_abstract);
        score += overlap(&reference_words, &candidate_words) * ABSTRACT_WEIGHT;
    }

    score.min(1.0)
}

/// `|reference ∩ candidate| / |reference|`, or 0.0 for an empty reference set.
fn overlap(reference: &HashSet<String>, candidate: &HashSet<String>) -> f64 {
    if reference.is_empty() {
        return 0.0;
    }
    reference.intersection(candidate).count() as f64 / reference.len() as f64
}
