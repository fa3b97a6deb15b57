//! Keyword-overlap research field classification

use crate::domain::ResearchField;
use std::collections::HashSet;

/// Classify a keyword set into a research field.
///
/// Scans the predefined catalog in order and returns the first field where
/// any field keyword contains one of the input keywords as a
/// case-insensitive substring. Ties are resolved by catalog order, which
/// callers must treat as the defined tie-break. Falls back to Computer
/// Science when nothing matches.
pub fn determine_field(keywords: &HashSet<String>) -> &'static ResearchField {
    for field in ResearchField::predefined() {
        let match_count = keywords
            .iter()
            .filter(|keyword| {
                let keyword = keyword.to_lowercase();
                field
                    .keywords
                    .iter()
                    .any(|field_keyword| field_keyword.to_lowercase().contains(&keyword))
            })
            .count();

        if match_count > 0 {
            return field;
        }
    }

    ResearchField::default_field()
}
