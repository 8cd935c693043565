//! Request a task was created for.

use bytes::Bytes;

use super::response::Headers;

/// An outgoing request as handed to the session by the code under test.
///
/// Nothing is ever sent; the request is kept so tests and delegates can
/// inspect what the code under test asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// HTTP method (GET, POST, ...)
    pub method: String,
    /// Target URL
    pub url: String,
    /// Request headers
    pub headers: Headers,
    /// Request body, if any
    pub body: Option<Bytes>,
}

impl Request {
    /// Create a request with an explicit method.
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            headers: Headers::new(),
            body: None,
        }
    }

    /// Create a GET request.
    pub fn get(url: impl Into<String>) -> Self {
        Self::new("GET", url)
    }

    /// Create a POST request with a body.
    pub fn post(url: impl Into<String>, body: impl Into<Bytes>) -> Self {
        Self::new("POST", url).with_body(body)
    }

    /// Add a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Set the body.
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_get() {
        let request = Request::get("https://example.com/items");
        assert_eq!(request.method, "GET");
        assert_eq!(request.url, "https://example.com/items");
        assert!(request.headers.is_empty());
        assert!(request.body.is_none());
    }

    #[test]
    fn test_request_post_with_body() {
        let request = Request::post("https://example.com/items", r#"{"name":"a"}"#);
        assert_eq!(request.method, "POST");
        assert_eq!(request.body, Some(Bytes::from(r#"{"name":"a"}"#)));
    }

    #[test]
    fn test_request_header_lookup_ignores_case() {
        let request =
            Request::get("https://example.com").with_header("Authorization", "Bearer abc");
        assert_eq!(request.header("authorization"), Some("Bearer abc"));
        assert_eq!(request.header("X-Missing"), None);
    }
}
