// src/domain/url.rs
//! URL grammar check, canonical form for duplicate comparison, host helpers.
use regex::Regex;
use std::sync::OnceLock;
use url::Url;

static HTTP_URL: OnceLock<Regex> = OnceLock::new();

fn http_url_regex() -> &'static Regex {
    HTTP_URL.get_or_init(|| {
        Regex::new(
            r"^https?://(www\.)?[-a-zA-Z0-9@:%._+~#=]{1,256}\.[a-zA-Z0-9()]{1,6}\b([-a-zA-Z0-9()@:%_+.~#?&/=]*)$",
        )
        .expect("compile http url regex")
    })
}

/// Strict absolute http(s) URL check.
///
/// Requires a dotted host, rejects whitespace and characters outside the
/// accepted grammar, and the string must also parse as a URL.
pub fn is_valid_http_url(candidate: &str) -> bool {
    http_url_regex().is_match(candidate) && Url::parse(candidate).is_ok()
}

/// Canonical form used only for equality comparison.
///
/// A root path `/` is cleared so `https://x.com/` and `https://x.com` compare
/// equal. Anything that does not parse is returned trimmed and otherwise
/// unchanged; this never fails.
pub fn normalize(url: &str) -> String {
    let trimmed = url.trim();
    match Url::parse(trimmed) {
        Ok(mut parsed) => {
            if parsed.path() == "/" {
                // special schemes keep serializing the root slash
                parsed.set_path("");
            }
            parsed.to_string()
        }
        Err(_) => trimmed.to_string(),
    }
}

/// Host of the URL without a leading `www.`
pub fn domain_of(url: &str) -> Option<String> {
    let parsed = Url::parse(url.trim()).ok()?;
    let host = parsed.host_str()?;
    Some(host.strip_prefix("www.").unwrap_or(host).to_string())
}

/// Title used when a line carried none: the bare domain, or the URL itself.
pub fn placeholder_title(url: &str) -> String {
    domain_of(url).unwrap_or_else(|| url.trim().to_string())
}

pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("https://example.com", true)]
    #[case("http://www.example.com/path?q=1#frag", true)]
    #[case("https://sub.example.co.uk:8080/a/b", true)]
    #[case("https://github.com/rust-lang/rust/issues?q=is%3Aopen", true)]
    #[case("notaurl", false)]
    #[case("ftp://example.com", false)]
    #[case("https://localhost", false)]
    #[case("https://exa mple.com", false)]
    #[case("https://example.com/<script>", false)]
    #[case("example.com", false)]
    fn given_candidate_when_checking_grammar_then_matches_expectation(
        #[case] input: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(is_valid_http_url(input), expected, "input: {}", input);
    }

    #[test]
    fn given_root_slash_variants_when_normalizing_then_equal() {
        assert_eq!(normalize("https://x.com/"), normalize("https://x.com"));
        assert_eq!(normalize("  https://x.com/ "), normalize("https://x.com"));
    }

    #[test]
    fn given_non_root_path_when_normalizing_then_path_is_kept() {
        assert_ne!(normalize("https://x.com/a"), normalize("https://x.com"));
    }

    #[rstest]
    #[case("https://x.com/")]
    #[case("https://X.com/Path/?q=1")]
    #[case("notaurl")]
    #[case("  padded text  ")]
    #[case("")]
    #[case("mailto:someone@example.com")]
    #[case("custom://host/")]
    fn given_any_string_when_normalizing_twice_then_idempotent(#[case] input: &str) {
        let once = normalize(input);
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn given_unparseable_input_when_normalizing_then_returns_trimmed_original() {
        assert_eq!(normalize("  notaurl  "), "notaurl");
    }

    #[test]
    fn given_www_host_when_extracting_domain_then_prefix_is_stripped() {
        assert_eq!(domain_of("https://www.example.com/x"), Some("example.com".to_string()));
        assert_eq!(domain_of("https://docs.rs"), Some("docs.rs".to_string()));
        assert_eq!(domain_of("notaurl"), None);
    }

    #[test]
    fn given_domain_when_capitalizing_then_first_letter_is_upper() {
        assert_eq!(capitalize("example.com"), "Example.com");
        assert_eq!(capitalize(""), "");
    }
}
