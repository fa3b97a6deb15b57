//! Newsletter assembly and HTML rendering
//!
//! Builds a newsletter document from a research field, an optional
//! reference paper, and a ranked list of related papers. The app renders
//! the HTML directly; there is no PDF generation step.

use crate::domain::{Newsletter, NewsletterStatus, Paper, ResearchField};
use chrono::Utc;
use std::collections::HashMap;
use uuid::Uuid;

/// How many of the most common keywords the summary mentions.
const SUMMARY_KEYWORD_LIMIT: usize = 5;

/// Build a completed newsletter from a field, an optional reference paper,
/// and its related papers.
///
/// The summary is a deterministic digest (field blurb, paper count, most
/// common keywords). An agent-generated summary is the intended richer
/// backend; until one is integrated the digest is the documented fallback,
/// mirroring [`crate::search::LiteratureSearch::search_with_free_text`].
pub fn generate_newsletter(
    user_paper: Option<Paper>,
    related_papers: Vec<Paper>,
    field: &ResearchField,
) -> Newsletter {
    let generated_date = Utc::now();
    let title = generate_title(field, user_paper.as_ref());
    let summary = generate_basic_summary(user_paper.as_ref(), &related_papers, field);

    let mut newsletter = Newsletter {
        id: Uuid::new_v4(),
        title,
        generated_date,
        research_field: field.clone(),
        user_paper,
        related_papers,
        summary,
        html_content: None,
        status: NewsletterStatus::Generating,
    };

    newsletter.html_content = Some(render_html(&newsletter));
    newsletter.status = NewsletterStatus::Completed;
    newsletter
}

fn generate_title(field: &ResearchField, user_paper: Option<&Paper>) -> String {
    let date = Utc::now().format("%B %Y");
    match user_paper {
        Some(paper) => format!(
            "{} Newsletter - {} - Related to '{}'",
            field.name, date, paper.title
        ),
        None => format!("{} Newsletter - {}", field.name, date),
    }
}

fn generate_basic_summary(
    user_paper: Option<&Paper>,
    related_papers: &[Paper],
    field: &ResearchField,
) -> String {
    let mut summary = format!("This newsletter curates recent research in {}. ", field.name);

    match user_paper {
        Some(paper) => summary.push_str(&format!(
            "Based on your paper '{}', we've identified {} related publications. ",
            paper.title,
            related_papers.len()
        )),
        None => summary.push_str(&format!(
            "We've identified {} recent publications in this field. ",
            related_papers.len()
        )),
    }

    let top_keywords = most_common_keywords(related_papers, SUMMARY_KEYWORD_LIMIT);
    if !top_keywords.is_empty() {
        summary.push_str("The papers cover topics including: ");
        summary.push_str(&top_keywords.join(", "));
        summary.push_str(". ");
    }

    summary.push_str(
        "These papers represent cutting-edge research and may provide valuable insights for your work.",
    );
    summary
}

/// The `limit` most frequent keywords across the papers, most frequent
/// first; ties broken alphabetically for reproducible output.
fn most_common_keywords(papers: &[Paper], limit: usize) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for paper in papers {
        for keyword in &paper.keywords {
            *counts.entry(keyword.as_str()).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    ranked
        .into_iter()
        .take(limit)
        .map(|(keyword, _)| keyword.to_string())
        .collect()
}

/// Render the newsletter as a standalone HTML document.
pub fn render_html(newsletter: &Newsletter) -> String {
    let mut html = format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <style>
        body {{ font-family: sans-serif; line-height: 1.6; padding: 20px; max-width: 800px; margin: 0 auto; }}
        h1 {{ color: #2c3e50; border-bottom: 3px solid #3498db; padding-bottom: 10px; }}
        h2 {{ color: #34495e; margin-top: 30px; }}
        .paper {{ background: #f8f9fa; padding: 15px; margin: 15px 0; border-radius: 8px; border-left: 4px solid #3498db; }}
        .paper-title {{ font-size: 1.2em; font-weight: bold; color: #2c3e50; }}
        .paper-authors {{ color: #7f8c8d; font-style: italic; margin: 5px 0; }}
        .paper-abstract {{ margin-top: 10px; }}
        .summary {{ background: #e8f4f8; padding: 15px; border-radius: 8px; margin: 20px 0; }}
        .meta {{ color: #95a5a6; font-size: 0.9em; }}
    </style>
</head>
<body>
    <h1>{title}</h1>
    <p class="meta">Generated on {date} &bull; Field: {field}</p>

    <div class="summary">
        <h2>Summary</h2>
        <p>{summary}</p>
    </div>
"#,
        title = newsletter.title,
        date = newsletter.generated_date.format("%B %e, %Y"),
        field = newsletter.research_field.name,
        summary = newsletter.summary,
    );

    if let Some(user_paper) = &newsletter.user_paper {
        html.push_str(&format!(
            r#"
    <h2>Your Paper</h2>
    <div class="paper">
        <div class="paper-title">{}</div>
        <div class="paper-authors">{}</div>
        <div class="paper-abstract">{}</div>
    </div>
"#,
            user_paper.title,
            user_paper.formatted_authors(),
            user_paper
                .abstract_text
                .as_deref()
                .unwrap_or("No abstract available"),
        ));
    }

    if !newsletter.related_papers.is_empty() {
        html.push_str(&format!(
            "    <h2>Related Research ({} papers)</h2>\n",
            newsletter.related_papers.len()
        ));

        for paper in &newsletter.related_papers {
            let date = paper
                .publication_date
                .map(|d| d.format("%B %e, %Y").to_string())
                .unwrap_or_else(|| "Date unknown".to_string());
            html.push_str(&format!(
                r#"
    <div class="paper">
        <div class="paper-title">{}</div>
        <div class="paper-authors">{} &bull; {}</div>
        <div class="paper-abstract">{}</div>
    </div>
"#,
                paper.title,
                paper.formatted_authors(),
                date,
                paper.abstract_preview(),
            ));
        }
    }

    html.push_str("\n</body>\n</html>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paper(title: &str, keywords: &[&str]) -> Paper {
        Paper::new(title).with_keywords(keywords.iter().map(|k| k.to_string()).collect())
    }

    #[test]
    fn test_title_mentions_field_and_reference_paper() {
        let field = &ResearchField::predefined()[0];
        let reference = paper("My Reference Paper", &[]);

        let with_reference = generate_newsletter(Some(reference), vec![], field);
        assert!(with_reference.title.contains("Artificial Intelligence Newsletter"));
        assert!(with_reference.title.contains("Related to 'My Reference Paper'"));

        let without = generate_newsletter(None, vec![], field);
        assert!(without.title.contains("Artificial Intelligence Newsletter"));
        assert!(!without.title.contains("Related to"));
    }

    #[test]
    fn test_summary_counts_and_top_keywords() {
        let field = ResearchField::default_field();
        let related = vec![
            paper("One", &["graphs", "search"]),
            paper("Two", &["graphs"]),
        ];

        let newsletter = generate_newsletter(None, related, field);
        assert!(newsletter
            .summary
            .contains("We've identified 2 recent publications"));
        // "graphs" appears twice, so it leads the topic list
        assert!(newsletter
            .summary
            .contains("topics including: graphs, search"));
    }

    #[test]
    fn test_summary_skips_topics_without_keywords() {
        let field = ResearchField::default_field();
        let newsletter = generate_newsletter(None, vec![paper("One", &[])], field);
        assert!(!newsletter.summary.contains("topics including"));
    }

    #[test]
    fn test_html_rendering_includes_papers() {
        let field = ResearchField::default_field();
        let reference = paper("Reference Title Here", &[]);
        let related = vec![paper("A Related Paper", &[])];

        let newsletter = generate_newsletter(Some(reference), related, field);
        assert_eq!(newsletter.status, NewsletterStatus::Completed);

        let html = newsletter.html_content.as_deref().unwrap();
        assert!(html.contains("<h2>Your Paper</h2>"));
        assert!(html.contains("Reference Title Here"));
        assert!(html.contains("Related Research (1 papers)"));
        assert!(html.contains("A Related Paper"));
        assert!(html.contains(&newsletter.summary));
    }

    #[test]
    fn test_most_common_keywords_orders_by_frequency_then_name() {
        let papers = vec![
            paper("One", &["beta", "alpha"]),
            paper("Two", &["beta", "gamma"]),
        ];
        let top = most_common_keywords(&papers, 5);
        assert_eq!(top, vec!["beta", "alpha", "gamma"]);
    }
}
