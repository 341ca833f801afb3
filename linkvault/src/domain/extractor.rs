// src/domain/extractor.rs
//! Turns pasted text or file content into import candidates, one per non-blank line.
use crate::domain::bookmark::ExistingBookmark;
use crate::domain::candidate::ParsedCandidate;
use crate::domain::duplicate::DuplicateIndex;
use crate::domain::url::{is_valid_http_url, placeholder_title};
use itertools::Itertools;
use regex::Regex;
use select::document::Document;
use select::predicate::Name;
use serde::Deserialize;
use std::sync::OnceLock;
use tracing::{debug, instrument, trace};

static HTML_ANCHOR: OnceLock<Regex> = OnceLock::new();
static MARKDOWN_LINK: OnceLock<Regex> = OnceLock::new();
static NETSCAPE_ENTRY: OnceLock<Regex> = OnceLock::new();

fn html_anchor() -> &'static Regex {
    HTML_ANCHOR.get_or_init(|| {
        Regex::new(r#"(?is)<a\s+(?:[^>]*?\s)?href\s*=\s*["'][^"']+["'][^>]*>.*?</a\s*>"#)
            .expect("compile html anchor regex")
    })
}

/// The target may contain one level of balanced parentheses
fn markdown_link() -> &'static Regex {
    MARKDOWN_LINK.get_or_init(|| {
        Regex::new(r"\[([^\]]*)\]\(((?:[^()\s]|\([^()\s]*\))+)\)")
            .expect("compile markdown link regex")
    })
}

fn netscape_entry() -> &'static Regex {
    NETSCAPE_ENTRY.get_or_init(|| {
        Regex::new(
            r#"(?is)<dt>\s*<a\s+(?:[^>]*?\s)?href\s*=\s*["'][^"']+["'][^>]*>.*?</a\s*>"#,
        )
        .expect("compile bookmark export regex")
    })
}

/// Line formats in the order they are tried. The last one always matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineFormat {
    HtmlAnchor,
    Markdown,
    NetscapeBookmark,
    JsonObject,
    RawUrl,
}

impl LineFormat {
    pub const ORDERED: [LineFormat; 5] = [
        LineFormat::HtmlAnchor,
        LineFormat::Markdown,
        LineFormat::NetscapeBookmark,
        LineFormat::JsonObject,
        LineFormat::RawUrl,
    ];

    /// Cheap pre-check before running the extractor
    fn applies(self, line: &str) -> bool {
        match self {
            LineFormat::HtmlAnchor => {
                let lower = line.to_ascii_lowercase();
                lower.contains("<a") && !lower.contains("<dt>")
            }
            LineFormat::Markdown => line.contains("]("),
            LineFormat::NetscapeBookmark => line.to_ascii_lowercase().contains("<dt>"),
            LineFormat::JsonObject => line.starts_with('{'),
            LineFormat::RawUrl => true,
        }
    }

    fn extract(self, line: &str) -> Option<ParsedLine> {
        match self {
            LineFormat::HtmlAnchor => anchor_entry(self, html_anchor(), line),
            LineFormat::Markdown => {
                let caps = markdown_link().captures(line)?;
                Some(ParsedLine {
                    format: self,
                    url: caps[2].trim().to_string(),
                    title: non_empty(&caps[1]),
                    description: None,
                })
            }
            LineFormat::NetscapeBookmark => anchor_entry(self, netscape_entry(), line),
            LineFormat::JsonObject => {
                let record: JsonLine = serde_json::from_str(line).ok()?;
                Some(ParsedLine {
                    format: self,
                    url: record.url.trim().to_string(),
                    title: record.title.as_deref().and_then(non_empty),
                    description: record.description.as_deref().and_then(non_empty),
                })
            }
            LineFormat::RawUrl => Some(ParsedLine {
                format: self,
                url: line.to_string(),
                title: None,
                description: None,
            }),
        }
    }
}

#[derive(Deserialize)]
struct JsonLine {
    url: String,
    title: Option<String>,
    description: Option<String>,
}

/// What one heuristic pulled out of a line, before URL validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub format: LineFormat,
    pub url: String,
    pub title: Option<String>,
    pub description: Option<String>,
}

/// The regex only locates the anchor; href and text come from the parsed HTML
/// so entities and nested markup are handled.
fn anchor_entry(format: LineFormat, regex: &Regex, line: &str) -> Option<ParsedLine> {
    let anchor = regex.find(line)?;
    let document = Document::from(anchor.as_str());
    let node = document.find(Name("a")).next()?;
    let url = node.attr("href")?.trim().to_string();
    Some(ParsedLine {
        format,
        url,
        title: non_empty(&node.text().split_whitespace().join(" ")),
        description: None,
    })
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Run the heuristics on a single trimmed line, most specific first.
pub fn parse_line(line: &str) -> ParsedLine {
    LineFormat::ORDERED
        .iter()
        .filter(|format| format.applies(line))
        .find_map(|format| format.extract(line))
        .unwrap_or_else(|| ParsedLine {
            format: LineFormat::RawUrl,
            url: line.to_string(),
            title: None,
            description: None,
        })
}

/// Extracts candidates and annotates them against a snapshot of existing bookmarks.
///
/// The snapshot is taken at construction; later changes to the collection are
/// not seen by this extractor.
#[derive(Debug, Clone, Default)]
pub struct UrlExtractor {
    index: DuplicateIndex,
}

impl UrlExtractor {
    pub fn new(existing: &[ExistingBookmark]) -> Self {
        Self {
            index: DuplicateIndex::build(existing),
        }
    }

    /// One candidate per non-blank line, in input order.
    #[instrument(skip_all, level = "debug", fields(bytes = text.len()))]
    pub fn extract(&self, text: &str) -> Vec<ParsedCandidate> {
        let candidates: Vec<ParsedCandidate> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| self.extract_line(line))
            .collect();
        debug!("Extracted {} candidates", candidates.len());
        candidates
    }

    fn extract_line(&self, line: &str) -> ParsedCandidate {
        let parsed = parse_line(line);
        trace!("Line matched {:?}: {}", parsed.format, parsed.url);

        if !is_valid_http_url(&parsed.url) {
            debug!("Rejecting invalid URL: {}", parsed.url);
            return ParsedCandidate::invalid(line, &parsed.url, parsed.title);
        }

        let duplicate = self.index.check(&parsed.url);
        let title = parsed
            .title
            .unwrap_or_else(|| placeholder_title(&parsed.url));
        ParsedCandidate::valid(line, &parsed.url, title, parsed.description, duplicate)
    }
}

/// Extract without any existing bookmarks to compare against
pub fn extract(text: &str) -> Vec<ParsedCandidate> {
    UrlExtractor::default().extract(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::candidate::{CandidateStatus, INVALID_URL_FORMAT};
    use rstest::rstest;

    #[rstest]
    #[case(r#"<a href="https://a.com/x">Alpha</a>"#, LineFormat::HtmlAnchor, "https://a.com/x", Some("Alpha"))]
    #[case(r#"<A HREF="https://a.com">  <b>Bold</b> text </A>"#, LineFormat::HtmlAnchor, "https://a.com", Some("Bold text"))]
    #[case(r#"<a class="link" href="https://a.com/page">Alpha</a>"#, LineFormat::HtmlAnchor, "https://a.com/page", Some("Alpha"))]
    #[case(r#"<a data-href="https://wrong.com" href='https://a.com/?p=1&amp;q=2'>Q</a>"#, LineFormat::HtmlAnchor, "https://a.com/?p=1&q=2", Some("Q"))]
    #[case("[GitHub](https://github.com)", LineFormat::Markdown, "https://github.com", Some("GitHub"))]
    #[case("[Rust](https://en.wikipedia.org/wiki/Rust_(programming_language))", LineFormat::Markdown, "https://en.wikipedia.org/wiki/Rust_(programming_language)", Some("Rust"))]
    #[case("- see [](https://b.com) here", LineFormat::Markdown, "https://b.com", None)]
    #[case(r#"<DT><A ADD_DATE="1700000000" HREF="https://c.com/">Cee &amp; Co</A>"#, LineFormat::NetscapeBookmark, "https://c.com/", Some("Cee & Co"))]
    #[case(r#"{"url": "https://a.com", "title": "A"}"#, LineFormat::JsonObject, "https://a.com", Some("A"))]
    #[case("https://plain.example.org/path", LineFormat::RawUrl, "https://plain.example.org/path", None)]
    #[case("{not json", LineFormat::RawUrl, "{not json", None)]
    fn given_line_when_parsing_then_expected_format_wins(
        #[case] line: &str,
        #[case] format: LineFormat,
        #[case] url: &str,
        #[case] title: Option<&str>,
    ) {
        let parsed = parse_line(line);
        assert_eq!(parsed.format, format);
        assert_eq!(parsed.url, url);
        assert_eq!(parsed.title.as_deref(), title);
    }

    #[test]
    fn given_anchor_with_entities_when_parsing_then_title_is_decoded() {
        let parsed = parse_line(r#"<a href="https://a.com">It&#8217;s&nbsp;here &mdash; now</a>"#);
        assert_eq!(parsed.title.as_deref(), Some("It\u{2019}s here \u{2014} now"));
    }

    #[test]
    fn given_parenthesized_markdown_target_when_extracting_then_url_is_complete() {
        let candidates = extract("see [Rust](https://en.wikipedia.org/wiki/Rust_(programming_language)).");
        assert!(candidates[0].is_valid);
        assert_eq!(
            candidates[0].url,
            "https://en.wikipedia.org/wiki/Rust_(programming_language)"
        );
    }

    #[test]
    fn given_json_with_markdown_inside_when_parsing_then_markdown_wins() {
        let parsed = parse_line(r#"{"url": "[x](https://md.com)"}"#);
        assert_eq!(parsed.format, LineFormat::Markdown);
        assert_eq!(parsed.url, "https://md.com");
    }

    #[test]
    fn given_json_with_description_when_parsing_then_description_is_kept() {
        let parsed =
            parse_line(r#"{"url":"https://a.com","description":"about a","extra":1}"#);
        assert_eq!(parsed.description.as_deref(), Some("about a"));
        assert_eq!(parsed.title, None);
    }

    #[test]
    fn given_text_with_blank_lines_when_extracting_then_one_candidate_per_line() {
        let text = "https://a.com\n\n   \n[B](https://b.com)\r\nrubbish line\n";
        let candidates = extract(text);
        assert_eq!(candidates.len(), 3);
        assert_eq!(candidates[0].url, "https://a.com");
        assert_eq!(candidates[1].title.as_deref(), Some("B"));
        assert!(!candidates[2].is_valid);
    }

    #[test]
    fn given_unmatched_garbage_when_extracting_then_single_invalid_candidate() {
        let candidates = extract("just some words");
        assert_eq!(candidates.len(), 1);
        let c = &candidates[0];
        assert!(!c.is_valid);
        assert!(!c.selected());
        assert!(!c.is_duplicate);
        assert_eq!(c.error.as_deref(), Some(INVALID_URL_FORMAT));
        assert_eq!(c.status, CandidateStatus::Failed);
        assert_eq!(c.original_url, "just some words");
    }

    #[test]
    fn given_existing_bookmark_when_extracting_then_trailing_slash_variant_is_duplicate() {
        let existing = vec![ExistingBookmark::new("42", "https://example.com", "Example")];
        let extractor = UrlExtractor::new(&existing);
        let candidates = extractor.extract("https://example.com\nhttps://example.com/\nnotaurl");

        assert_eq!(candidates.len(), 3);
        for c in &candidates[..2] {
            assert!(c.is_valid);
            assert!(c.is_duplicate);
            assert_eq!(c.existing_bookmark_id.as_deref(), Some("42"));
            assert!(!c.selected());
        }
        assert!(!candidates[2].is_valid);
        assert!(!candidates[2].is_duplicate);
    }

    #[test]
    fn given_untitled_url_when_extracting_then_title_is_domain_without_www() {
        let candidates = extract("https://www.rust-lang.org/learn");
        assert_eq!(candidates[0].title.as_deref(), Some("rust-lang.org"));
        assert!(candidates[0].selected());
    }

    #[test]
    fn given_json_line_when_extracting_then_candidate_carries_title() {
        let candidates = extract(r#"{"url":"https://a.com","title":"A"}"#);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].url, "https://a.com");
        assert_eq!(candidates[0].title.as_deref(), Some("A"));
        assert!(candidates[0].is_valid);
    }

    #[test]
    fn given_invalid_href_in_anchor_when_extracting_then_invalid_keeps_title() {
        let candidates = extract(r#"<a href="javascript:void(0)">Click</a>"#);
        assert!(!candidates[0].is_valid);
        assert_eq!(candidates[0].url, "javascript:void(0)");
        assert_eq!(candidates[0].title.as_deref(), Some("Click"));
    }

    #[test]
    fn given_candidates_when_extracting_then_ids_are_unique() {
        let candidates = extract("https://a.com\nhttps://a.com");
        assert_ne!(candidates[0].id, candidates[1].id);
    }
}
