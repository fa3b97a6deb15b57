//! arXiv source with XML Atom feed parsing
//!
//! API docs: https://arxiv.org/help/api/user-manual
//! Rate limit: 1 request per 3 seconds

use super::traits::{SourceError, SourceMetadata};
use crate::domain::Paper;
use crate::http::{HttpClient, HttpError, HttpResponse};
use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use quick_xml::events::Event;
use quick_xml::Reader;
use regex::Regex;

lazy_static! {
    static ref ARXIV_NEW_ID: Regex = Regex::new(r"(\d{4}\.\d{4,5})(v\d+)?").unwrap();
    static ref ARXIV_OLD_ID: Regex = Regex::new(r"([a-z-]+/\d{7})").unwrap();
}

pub struct ArxivSource {
    client: HttpClient,
    base_url: String,
}

impl ArxivSource {
    pub fn new() -> Self {
        Self::with_client(HttpClient::new("curata/0.1 (https://github.com/curata-app/curata)"))
    }

    pub fn with_client(client: HttpClient) -> Self {
        Self {
            client,
            base_url: "https://export.arxiv.org/api/query".to_string(),
        }
    }

    pub fn metadata() -> SourceMetadata {
        SourceMetadata {
            id: "arxiv",
            name: "arXiv",
            description: "Open-access preprint server for physics, math, CS, and more",
            base_url: "https://arxiv.org",
            rate_limit_per_second: 0.33, // 1 per 3 seconds
            requires_api_key: false,
        }
    }

    /// Search arXiv, sorted by submission date with the newest first.
    ///
    /// Terms are percent-encoded individually and OR-combined. Dropping the
    /// returned future aborts the request.
    pub async fn search(
        &self,
        terms: &[String],
        max_results: u32,
    ) -> Result<Vec<Paper>, SourceError> {
        let url = format!(
            "{}?search_query=all:{}&start=0&max_results={}&sortBy=submittedDate&sortOrder=descending",
            self.base_url,
            build_search_query(terms),
            max_results
        );

        let response = self.client.get(&url).await?;
        Self::handle_response(response)
    }

    /// Turn a raw search response into parsed papers.
    pub(crate) fn handle_response(response: HttpResponse) -> Result<Vec<Paper>, SourceError> {
        if response.status != 200 {
            return Err(SourceError::Http(HttpError::RequestFailed {
                message: format!("Status {}", response.status),
            }));
        }

        parse_atom_feed(&response.body)
    }
}

impl Default for ArxivSource {
    fn default() -> Self {
        Self::new()
    }
}

/// Join percent-encoded search terms with arXiv's `+OR+` separator.
fn build_search_query(terms: &[String]) -> String {
    terms
        .iter()
        .map(|t| urlencoding::encode(t).into_owned())
        .collect::<Vec<_>>()
        .join("+OR+")
}

/// Per-entry parser state, reset on every `<entry>` open and consumed on
/// close. Each parse call owns its accumulator, so concurrent parses never
/// share partially-built records.
#[derive(Default)]
struct EntryAccumulator {
    id: String,
    title: String,
    summary: String,
    published: String,
    authors: Vec<String>,
    pdf_url: Option<String>,
    in_author: bool,
}

impl EntryAccumulator {
    fn into_paper(self) -> Paper {
        let arxiv_id = extract_arxiv_id(&self.id);
        let publication_date = parse_published_date(&self.published);

        let mut paper = Paper::new(self.title).with_authors(self.authors);
        paper.abstract_text = if self.summary.is_empty() {
            None
        } else {
            Some(self.summary)
        };
        paper.publication_date = publication_date;
        paper.arxiv_id = arxiv_id;
        paper.pdf_url = self.pdf_url;
        paper
    }
}

/// Parse an arXiv Atom XML feed into papers.
///
/// Missing sub-fields of an entry degrade to `None` or empty collections;
/// only a structurally broken document fails the whole parse.
pub fn parse_atom_feed(xml: &str) -> Result<Vec<Paper>, SourceError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    // arXiv emits links as self-closing elements
    reader.expand_empty_elements(true);

    let mut papers = Vec::new();
    let mut buf = Vec::new();
    let mut current_element = String::new();
    let mut entry: Option<EntryAccumulator> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                current_element = name.clone();

                match name.as_str() {
                    "entry" => entry = Some(EntryAccumulator::default()),
                    "author" => {
                        if let Some(acc) = entry.as_mut() {
                            acc.in_author = true;
                        }
                    }
                    "link" => {
                        if let Some(acc) = entry.as_mut() {
                            let mut href = None;
                            let mut link_type = None;

                            for attr in e.attributes().flatten() {
                                match attr.key.as_ref() {
                                    b"href" => {
                                        href =
                                            Some(String::from_utf8_lossy(&attr.value).to_string())
                                    }
                                    b"type" => {
                                        link_type =
                                            Some(String::from_utf8_lossy(&attr.value).to_string())
                                    }
                                    _ => {}
                                }
                            }

                            if link_type.as_deref() == Some("application/pdf") {
                                acc.pdf_url = href;
                            }
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::End(ref e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();

                if name == "entry" {
                    if let Some(acc) = entry.take() {
                        papers.push(acc.into_paper());
                    }
                } else if name == "author" {
                    if let Some(acc) = entry.as_mut() {
                        acc.in_author = false;
                    }
                }
                current_element.clear();
            }
            Ok(Event::Text(e)) => {
                if let Some(acc) = entry.as_mut() {
                    let text = e.unescape().unwrap_or_default();
                    let trimmed = text.trim();
                    if !trimmed.is_empty() {
                        match current_element.as_str() {
                            "id" => acc.id.push_str(trimmed),
                            "title" => acc.title.push_str(trimmed),
                            "summary" => acc.summary.push_str(trimmed),
                            "published" => acc.published.push_str(trimmed),
                            "name" if acc.in_author => acc.authors.push(trimmed.to_string()),
                            _ => {}
                        }
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(SourceError::Parse(format!("XML parse error: {}", e))),
            _ => {}
        }
        buf.clear();
    }

    Ok(papers)
}

/// Extract the arXiv identifier from an entry id URL.
///
/// Matches the canonical new (`2301.12345`) and old (`hep-th/9901001`)
/// forms, falling back to the final path segment.
fn extract_arxiv_id(id: &str) -> Option<String> {
    if id.is_empty() {
        return None;
    }
    if let Some(cap) = ARXIV_NEW_ID.captures(id) {
        return cap.get(1).map(|m| m.as_str().to_string());
    }
    if let Some(cap) = ARXIV_OLD_ID.captures(id) {
        return cap.get(1).map(|m| m.as_str().to_string());
    }
    id.rsplit('/').next().map(str::to_string)
}

fn parse_published_date(published: &str) -> Option<DateTime<Utc>> {
    if published.is_empty() {
        return None;
    }
    match DateTime::parse_from_rfc3339(published) {
        Ok(date) => Some(date.with_timezone(&Utc)),
        Err(_) => {
            tracing::debug!(published, "unparseable published date, dropping");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_ATOM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom" xmlns:arxiv="http://arxiv.org/schemas/atom">
  <entry>
    <id>http://arxiv.org/abs/2301.12345v1</id>
    <title>T</title>
    <summary>S</summary>
    <published>2023-01-15T00:00:00Z</published>
    <author><name>A</name></author>
    <link href="http://arxiv.org/abs/2301.12345v1" rel="alternate" type="text/html"/>
    <link href="http://arxiv.org/pdf/2301.12345v1" rel="related" type="application/pdf"/>
  </entry>
</feed>"#;

    #[test]
    fn test_build_search_query() {
        let terms = vec!["machine learning".to_string(), "neural".to_string()];
        assert_eq!(build_search_query(&terms), "machine%20learning+OR+neural");
    }

    #[test]
    fn test_parse_atom_feed_round_trip() {
        let papers = parse_atom_feed(SAMPLE_ATOM).unwrap();
        assert_eq!(papers.len(), 1);

        let paper = &papers[0];
        assert_eq!(paper.title, "T");
        assert_eq!(paper.authors, vec!["A".to_string()]);
        assert_eq!(paper.abstract_text.as_deref(), Some("S"));
        assert_eq!(paper.pdf_url.as_deref(), Some("http://arxiv.org/pdf/2301.12345v1"));
        assert!(paper.publication_date.is_some());
        assert_eq!(paper.arxiv_id.as_deref(), Some("2301.12345"));
        assert!(!paper.is_user_uploaded);
        assert!(paper.keywords.is_empty());
        assert!(paper.relevance_score.is_none());
    }

    #[test]
    fn test_missing_fields_degrade_gracefully() {
        let xml = r#"<feed><entry><title>Only a title here</title></entry></feed>"#;
        let papers = parse_atom_feed(xml).unwrap();
        assert_eq!(papers.len(), 1);
        assert!(papers[0].publication_date.is_none());
        assert!(papers[0].pdf_url.is_none());
        assert!(papers[0].abstract_text.is_none());
        assert!(papers[0].arxiv_id.is_none());
        assert!(papers[0].authors.is_empty());
    }

    #[test]
    fn test_unparseable_date_becomes_none() {
        let xml = r#"<feed><entry><title>X marks the spot</title><published>yesterday-ish</published></entry></feed>"#;
        let papers = parse_atom_feed(xml).unwrap();
        assert_eq!(papers.len(), 1);
        assert!(papers[0].publication_date.is_none());
    }

    #[test]
    fn test_broken_document_fails_whole_parse() {
        let xml = "<feed><entry><title>Broken</wrong></feed>";
        let result = parse_atom_feed(xml);
        assert!(matches!(result, Err(SourceError::Parse(_))));
    }

    #[test]
    fn test_multiple_entries_use_isolated_accumulators() {
        let xml = r#"<feed>
  <entry><title>First entry title</title><author><name>A One</name></author></entry>
  <entry><title>Second entry title</title></entry>
</feed>"#;
        let papers = parse_atom_feed(xml).unwrap();
        assert_eq!(papers.len(), 2);
        assert_eq!(papers[0].authors, vec!["A One".to_string()]);
        assert!(papers[1].authors.is_empty());
    }

    #[test]
    fn test_extract_arxiv_id() {
        assert_eq!(
            extract_arxiv_id("http://arxiv.org/abs/2301.12345v1"),
            Some("2301.12345".to_string())
        );
        assert_eq!(
            extract_arxiv_id("http://arxiv.org/abs/hep-th/9901001"),
            Some("hep-th/9901001".to_string())
        );
        assert_eq!(extract_arxiv_id(""), None);
        // Unrecognized forms fall back to the final path segment
        assert_eq!(
            extract_arxiv_id("http://example.org/abs/oddball"),
            Some("oddball".to_string())
        );
    }

    #[test]
    fn test_handle_response_rejects_non_success_status() {
        let response = HttpResponse {
            status: 404,
            body: String::new(),
            headers: Default::default(),
        };
        let result = ArxivSource::handle_response(response);
        assert!(matches!(
            result,
            Err(SourceError::Http(HttpError::RequestFailed { .. }))
        ));
    }

    #[test]
    fn test_handle_response_parses_success_body() {
        let response = HttpResponse {
            status: 200,
            body: SAMPLE_ATOM.to_string(),
            headers: Default::default(),
        };
        let papers = ArxivSource::handle_response(response).unwrap();
        assert_eq!(papers.len(), 1);
    }
}
