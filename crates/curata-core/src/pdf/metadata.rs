//! Title, author, abstract, and keyword heuristics over extracted page text

use super::PdfError;
use crate::domain::Paper;

/// A title line must be strictly longer than this many characters.
const TITLE_MIN_CHARS: usize = 10;
const FALLBACK_TITLE: &str = "Untitled Paper";

/// Author lines are looked for among the first few non-empty lines.
const AUTHOR_SCAN_LINES: usize = 6;
/// Author fragments must have strictly more than 3 and fewer than 50 chars.
const AUTHOR_MIN_CHARS: usize = 3;
const AUTHOR_MAX_CHARS: usize = 50;
const MAX_AUTHORS: usize = 5;
const FALLBACK_AUTHOR: &str = "Unknown Author";

const ABSTRACT_MARKER: &str = "abstract";
const ABSTRACT_END_MARKERS: [&str; 3] = ["introduction", "1. introduction", "keywords"];
const ABSTRACT_MAX_CHARS: usize = 2000;

const KEYWORDS_MARKER: &str = "keywords:";

/// Extract paper metadata from the text of a PDF.
///
/// Returns a user-uploaded [`Paper`] whose fields are filled in as well as
/// the heuristics allow; fields the heuristics cannot locate are left
/// empty or `None`. Fails only when the input contains no text at all.
pub fn extract_metadata(page_text: &str) -> Result<Paper, PdfError> {
    if page_text.trim().is_empty() {
        return Err(PdfError::NoTextContent);
    }

    let title = extract_title(page_text);
    let authors = extract_authors(page_text);
    let abstract_text = extract_abstract(page_text);
    let keywords = extract_keywords(page_text);

    Ok(Paper::new(title)
        .with_authors(authors)
        .with_abstract(abstract_text)
        .with_keywords(keywords)
        .uploaded())
}

/// First non-empty line longer than [`TITLE_MIN_CHARS`] characters.
fn extract_title(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .find(|line| line.chars().count() > TITLE_MIN_CHARS)
        .unwrap_or(FALLBACK_TITLE)
        .to_string()
}

/// Scan the first few non-empty lines for comma- or "and"-joined names.
fn extract_authors(text: &str) -> Vec<String> {
    let mut authors: Vec<String> = Vec::new();

    for line in text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(AUTHOR_SCAN_LINES)
    {
        if !line.contains(',') && !line.contains(" and ") {
            continue;
        }

        authors.extend(
            line.split([',', ';'])
                .map(str::trim)
                .filter(|fragment| {
                    let chars = fragment.chars().count();
                    chars > AUTHOR_MIN_CHARS && chars < AUTHOR_MAX_CHARS
                })
                .map(str::to_string),
        );
    }

    authors.truncate(MAX_AUTHORS);

    if authors.is_empty() {
        vec![FALLBACK_AUTHOR.to_string()]
    } else {
        authors
    }
}

/// Text between the "abstract" marker and the earliest end marker (or end
/// of text), trimmed and truncated to [`ABSTRACT_MAX_CHARS`] characters.
fn extract_abstract(text: &str) -> Option<String> {
    let marker = find_case_insensitive(text, ABSTRACT_MARKER)?;
    let body = &text[marker + ABSTRACT_MARKER.len()..];

    let end = ABSTRACT_END_MARKERS
        .iter()
        .filter_map(|m| find_case_insensitive(body, m))
        .min()
        .unwrap_or(body.len());

    Some(truncate_chars(body[..end].trim(), ABSTRACT_MAX_CHARS))
}

/// Comma/semicolon-separated fragments of the "keywords:" line.
fn extract_keywords(text: &str) -> Vec<String> {
    let Some(marker) = find_case_insensitive(text, KEYWORDS_MARKER) else {
        return Vec::new();
    };
    let rest = &text[marker + KEYWORDS_MARKER.len()..];

    // The keyword list must be newline-terminated
    let Some(line_end) = rest.find('\n') else {
        return Vec::new();
    };

    rest[..line_end]
        .split([',', ';'])
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .map(str::to_string)
        .collect()
}

/// Byte offset of the first case-insensitive occurrence of `needle`.
///
/// Markers are ASCII, so ASCII case folding suffices; `get` guards against
/// slicing inside a multi-byte character in the haystack.
fn find_case_insensitive(haystack: &str, needle: &str) -> Option<usize> {
    haystack.char_indices().find_map(|(i, _)| {
        match haystack[i..].get(..needle.len()) {
            Some(window) if window.eq_ignore_ascii_case(needle) => Some(i),
            _ => None,
        }
    })
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((i, _)) => text[..i].to_string(),
        None => text.to_string(),
    }
}
