//! `Link` header parsing.

use reqwest::header::{HeaderMap, LINK};

/// Returns the URL of the `rel="next"` link, if the response has one.
pub fn next_page_url(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(LINK)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(find_next)
}

fn find_next(header: &str) -> Option<String> {
    header.split(',').find_map(|entry| {
        let mut parts = entry.split(';');
        let target = parts.next()?.trim();
        let url = target.strip_prefix('<')?.strip_suffix('>')?;
        let is_next = parts.any(|param| {
            let Some((key, value)) = param.split_once('=') else {
                return false;
            };
            key.trim().eq_ignore_ascii_case("rel")
                && value
                    .trim()
                    .trim_matches('"')
                    .split_whitespace()
                    .any(|rel| rel.eq_ignore_ascii_case("next"))
        });
        is_next.then(|| url.to_string())
    })
}

#[cfg(test)]
mod tests {
    use reqwest::header::HeaderValue;

    use super::*;

    fn headers(link: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(LINK, HeaderValue::from_str(link).unwrap());
        headers
    }

    #[test]
    fn finds_next_among_other_relations() {
        let link = r#"<https://api.github.com/repositories/1/issues?page=1>; rel="prev", <https://api.github.com/repositories/1/issues?page=3>; rel="next", <https://api.github.com/repositories/1/issues?page=9>; rel="last""#;
        assert_eq!(
            next_page_url(&headers(link)).as_deref(),
            Some("https://api.github.com/repositories/1/issues?page=3")
        );
    }

    #[test]
    fn last_page_has_no_next() {
        let link = r#"<https://api.github.com/repositories/1/issues?page=1>; rel="first", <https://api.github.com/repositories/1/issues?page=8>; rel="prev""#;
        assert_eq!(next_page_url(&headers(link)), None);
        assert_eq!(next_page_url(&HeaderMap::new()), None);
    }

    #[test]
    fn ignores_malformed_entries() {
        assert_eq!(next_page_url(&headers(r#"https://x/?page=2; rel="next""#)), None);
        assert_eq!(
            next_page_url(&headers(r#"<https://x/?page=2>; REL=next"#)).as_deref(),
            Some("https://x/?page=2")
        );
    }
}
