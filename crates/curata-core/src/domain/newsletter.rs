//! Generated newsletter aggregating a reference paper and curated results

use super::{Paper, ResearchField};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Status of the newsletter generation process.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NewsletterStatus {
    Draft,
    Generating,
    Completed,
    Failed,
}

/// A generated newsletter containing curated research papers.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Newsletter {
    pub id: Uuid,
    pub title: String,
    pub generated_date: DateTime<Utc>,
    pub research_field: ResearchField,
    pub user_paper: Option<Paper>,
    pub related_papers: Vec<Paper>,
    pub summary: String,
    pub html_content: Option<String>,
    pub status: NewsletterStatus,
}

impl Newsletter {
    /// Total number of papers in the newsletter.
    pub fn total_papers(&self) -> usize {
        self.related_papers.len() + usize::from(self.user_paper.is_some())
    }

    /// Summary preview (first 200 characters).
    pub fn preview_text(&self) -> String {
        if self.summary.chars().count() <= 200 {
            self.summary.clone()
        } else {
            let preview: String = self.summary.chars().take(200).collect();
            format!("{}...", preview)
        }
    }
}
