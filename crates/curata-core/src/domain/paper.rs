//! Scientific paper record, whether user-uploaded or search-sourced

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A scientific paper with metadata.
///
/// Records are immutable once constructed. Re-scoring a search result goes
/// through [`Paper::scored`], which produces a new record with the relevance
/// score set instead of mutating in place.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Paper {
    pub id: Uuid,
    pub title: String,
    pub authors: Vec<String>,
    pub abstract_text: Option<String>,
    pub publication_date: Option<DateTime<Utc>>,
    pub arxiv_id: Option<String>,
    pub pdf_url: Option<String>,
    pub local_pdf_path: Option<String>,
    pub keywords: Vec<String>,
    pub research_field: Option<String>,
    /// True when the paper was uploaded by the user rather than found by search.
    pub is_user_uploaded: bool,
    /// Relevance in [0.0, 1.0], only populated by a comparison against a
    /// reference paper. User-uploaded papers never carry one.
    pub relevance_score: Option<f64>,
}

impl Paper {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            authors: Vec::new(),
            abstract_text: None,
            publication_date: None,
            arxiv_id: None,
            pdf_url: None,
            local_pdf_path: None,
            keywords: Vec::new(),
            research_field: None,
            is_user_uploaded: false,
            relevance_score: None,
        }
    }

    pub fn with_authors(mut self, authors: Vec<String>) -> Self {
        self.authors = authors;
        self
    }

    pub fn with_abstract(mut self, abstract_text: Option<String>) -> Self {
        self.abstract_text = abstract_text;
        self
    }

    pub fn with_keywords(mut self, keywords: Vec<String>) -> Self {
        self.keywords = keywords;
        self
    }

    /// Mark this paper as uploaded by the user.
    pub fn uploaded(mut self) -> Self {
        self.is_user_uploaded = true;
        self
    }

    /// Copy of this record carrying a relevance score from a comparison.
    pub fn scored(&self, relevance: f64) -> Self {
        Self {
            relevance_score: Some(relevance),
            ..self.clone()
        }
    }

    /// Formatted author list (e.g., "Smith et al." or "Smith and Jones").
    pub fn formatted_authors(&self) -> String {
        match self.authors.as_slice() {
            [] => "Unknown authors".to_string(),
            [single] => single.clone(),
            [first, second] => format!("{} and {}", first, second),
            [first, ..] => format!("{} et al.", first),
        }
    }

    /// Short abstract preview (first 150 characters).
    pub fn abstract_preview(&self) -> String {
        let Some(abstract_text) = &self.abstract_text else {
            return "No abstract available".to_string();
        };

        if abstract_text.chars().count() <= 150 {
            abstract_text.clone()
        } else {
            let preview: String = abstract_text.chars().take(150).collect();
            format!("{}...", preview)
        }
    }
}
