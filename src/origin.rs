/// Origin matching for the side panel gate
use url::Url;

/// Extract the origin (scheme + host + non-default port) of a URL
///
/// Algorithm:
/// 1. Parse the URL; unparseable input yields None
/// 2. Serialize its origin the way browsers do (`Origin.ascii_serialization`)
/// 3. Opaque origins (data:, about:blank, ...) serialize to "null"; those are
///    returned as-is so they simply never match a configured origin
///
/// Examples:
/// - https://www.oxfordlearnersdictionaries.com/definition/english/cat_1
///   → https://www.oxfordlearnersdictionaries.com
/// - https://example.com:443/a → https://example.com
/// - http://localhost:8080/x → http://localhost:8080
pub fn origin_of(url: &str) -> Option<String> {
    let url = url.trim();
    if url.is_empty() {
        return None;
    }

    Url::parse(url).ok().map(|parsed| parsed.origin().ascii_serialization())
}

/// Whether the URL belongs to the configured origin (exact string match)
///
/// None means the question can't be answered: the URL is missing or
/// unparseable, and the caller should leave any state alone.
pub fn matches_origin(url: Option<&str>, site_origin: &str) -> Option<bool> {
    url.and_then(origin_of).map(|origin| origin == site_origin)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SITE: &str = "https://www.oxfordlearnersdictionaries.com";

    #[test]
    fn test_origin_of_basic() {
        assert_eq!(
            origin_of("https://www.oxfordlearnersdictionaries.com/definition/english/cat_1"),
            Some(SITE.to_string())
        );
        assert_eq!(origin_of("https://www.google.com/search?q=rust"), Some("https://www.google.com".to_string()));
    }

    #[test]
    fn test_origin_of_ports() {
        assert_eq!(origin_of("https://example.com:443/a"), Some("https://example.com".to_string()));
        assert_eq!(origin_of("http://localhost:8080/x"), Some("http://localhost:8080".to_string()));
    }

    #[test]
    fn test_origin_of_opaque() {
        assert_eq!(origin_of("data:text/html,hi"), Some("null".to_string()));
    }

    #[test]
    fn test_origin_of_edge_cases() {
        assert_eq!(origin_of(""), None);
        assert_eq!(origin_of("   "), None);
        assert_eq!(origin_of("not a url"), None);
        assert_eq!(origin_of("/definition/english/cat_1"), None);
    }

    #[test]
    fn test_matches_origin() {
        assert_eq!(matches_origin(Some("https://www.oxfordlearnersdictionaries.com/"), SITE), Some(true));
        assert_eq!(
            matches_origin(Some("https://www.oxfordlearnersdictionaries.com/definition/american_english/run_1"), SITE),
            Some(true)
        );
    }

    #[test]
    fn test_matches_origin_rejects_lookalikes() {
        // Scheme and subdomain are part of the origin
        assert_eq!(matches_origin(Some("http://www.oxfordlearnersdictionaries.com/"), SITE), Some(false));
        assert_eq!(matches_origin(Some("https://oxfordlearnersdictionaries.com/"), SITE), Some(false));
        assert_eq!(matches_origin(Some("https://www.oxfordlearnersdictionaries.com.evil.io/"), SITE), Some(false));
        assert_eq!(matches_origin(Some("chrome://extensions/"), SITE), Some(false));
    }

    #[test]
    fn test_matches_origin_unknown() {
        assert_eq!(matches_origin(None, SITE), None);
        assert_eq!(matches_origin(Some(""), SITE), None);
        assert_eq!(matches_origin(Some("::::"), SITE), None);
    }
}
