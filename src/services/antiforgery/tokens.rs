//! Pulls the anti-forgery token pair out of a request.
//!
//! One half lives in a cookie, the other in the `X-RequestVerificationToken`
//! header. A missing half is an empty string and an unreadable header is
//! passed on lossily; deciding whether either is acceptable is the
//! validator's job.

use axum::http::HeaderMap;
use axum_extra::extract::CookieJar;

/// Header expected to carry the request verification token.
pub const REQUEST_VERIFICATION_TOKEN_HEADER: &str = "X-RequestVerificationToken";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenPair {
    pub cookie_token: String,
    pub header_token: String,
}

pub trait TokenExtractor: Send + Sync {
    fn extract(&self, headers: &HeaderMap) -> TokenPair;
}

/// Named cookie + `X-RequestVerificationToken` header.
#[derive(Debug, Clone)]
pub struct CookieHeaderExtractor {
    cookie_name: String,
}

impl CookieHeaderExtractor {
    pub fn new(cookie_name: impl Into<String>) -> Self {
        Self {
            cookie_name: cookie_name.into(),
        }
    }
}

impl TokenExtractor for CookieHeaderExtractor {
    fn extract(&self, headers: &HeaderMap) -> TokenPair {
        let cookie_token = CookieJar::from_headers(headers)
            .get(&self.cookie_name)
            .map(|c| c.value().to_string())
            .unwrap_or_default();

        // Non-ASCII bytes survive as U+FFFD, which the validator rejects as malformed.
        let header_token = headers
            .get(REQUEST_VERIFICATION_TOKEN_HEADER)
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
            .unwrap_or_default();

        TokenPair {
            cookie_token,
            header_token,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, header};

    fn extractor() -> CookieHeaderExtractor {
        CookieHeaderExtractor::new("__RequestVerificationToken")
    }

    #[test]
    fn extracts_both_halves() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("session_id=s-1; __RequestVerificationToken=c-token"),
        );
        headers.insert(
            REQUEST_VERIFICATION_TOKEN_HEADER,
            HeaderValue::from_static("h-token"),
        );

        let pair = extractor().extract(&headers);
        assert_eq!(
            pair,
            TokenPair {
                cookie_token: "c-token".into(),
                header_token: "h-token".into(),
            }
        );
    }

    #[test]
    fn missing_halves_are_empty() {
        let pair = extractor().extract(&HeaderMap::new());
        assert_eq!(pair, TokenPair::default());
    }

    #[test]
    fn cookie_found_across_multiple_cookie_headers() {
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, HeaderValue::from_static("a=1"));
        headers.append(
            header::COOKIE,
            HeaderValue::from_static("__RequestVerificationToken=c-token"),
        );

        let pair = extractor().extract(&headers);
        assert_eq!(pair.cookie_token, "c-token");
    }

    #[test]
    fn first_header_value_wins() {
        let mut headers = HeaderMap::new();
        headers.append(
            REQUEST_VERIFICATION_TOKEN_HEADER,
            HeaderValue::from_static("first"),
        );
        headers.append(
            REQUEST_VERIFICATION_TOKEN_HEADER,
            HeaderValue::from_static("second"),
        );

        let pair = extractor().extract(&headers);
        assert_eq!(pair.header_token, "first");
    }

    #[test]
    fn non_ascii_header_is_passed_on_lossily() {
        let mut headers = HeaderMap::new();
        headers.insert(
            REQUEST_VERIFICATION_TOKEN_HEADER,
            HeaderValue::from_bytes(b"tok\xffen").unwrap(),
        );

        let pair = extractor().extract(&headers);
        assert_eq!(pair.header_token, "tok\u{FFFD}en");
    }

    #[test]
    fn other_cookie_names_are_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("RequestVerificationToken=nope"),
        );

        let pair = extractor().extract(&headers);
        assert_eq!(pair.cookie_token, "");
    }
}
