//! Caller identity headers set by the upstream auth proxy.

use axum::http::HeaderMap;

pub const CALLER_ID_HEADER: &str = "x-caller-id";
pub const CALLER_AUTHENTICATED_HEADER: &str = "x-caller-authenticated";

const ANONYMOUS: &str = "anonymous";
const MAX_CALLER_ID_LEN: usize = 128;

/// Who is calling, as asserted by the proxy in front of this service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    pub id: String,
    pub authenticated: bool,
}

impl CallerIdentity {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let id = headers
            .get(CALLER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty() && v.len() <= MAX_CALLER_ID_LEN)
            .unwrap_or(ANONYMOUS)
            .to_string();

        let authenticated = headers
            .get(CALLER_AUTHENTICATED_HEADER)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.trim().eq_ignore_ascii_case("true"));

        Self { id, authenticated }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_missing_headers_mean_anonymous() {
        let identity = CallerIdentity::from_headers(&HeaderMap::new());
        assert_eq!(identity.id, "anonymous");
        assert!(!identity.authenticated);
    }

    #[test]
    fn test_reads_caller_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(CALLER_ID_HEADER, HeaderValue::from_static("user-42"));
        headers.insert(CALLER_AUTHENTICATED_HEADER, HeaderValue::from_static("TRUE"));
        let identity = CallerIdentity::from_headers(&headers);
        assert_eq!(identity.id, "user-42");
        assert!(identity.authenticated);
    }

    #[test]
    fn test_only_true_authenticates() {
        let mut headers = HeaderMap::new();
        headers.insert(CALLER_AUTHENTICATED_HEADER, HeaderValue::from_static("yes"));
        assert!(!CallerIdentity::from_headers(&headers).authenticated);
    }
}
