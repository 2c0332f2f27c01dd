//! Incoming HTTP request type.

use std::collections::HashMap;

use bytes::Bytes;

/// An incoming HTTP request with its body fully collected.
pub struct Request {
    pub(crate) method: String,
    pub(crate) path: String,
    pub(crate) query: Option<String>,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) body: Bytes,
    pub(crate) params: HashMap<String, String>,
}

impl Request {
    /// Builds a request from hyper's head and the collected body.
    ///
    /// Header values that are not visible ASCII are dropped; nothing this
    /// service reads can carry them.
    pub(crate) fn from_parts(parts: http::request::Parts, body: Bytes) -> Self {
        let headers = parts.headers.iter()
            .filter_map(|(k, v)| Some((k.as_str().to_owned(), v.to_str().ok()?.to_owned())))
            .collect();
        Self {
            method: parts.method.as_str().to_owned(),
            path: parts.uri.path().to_owned(),
            query: parts.uri.query().map(str::to_owned),
            headers,
            body,
            params: HashMap::new(),
        }
    }

    pub fn method(&self) -> &str { &self.method }
    pub fn path(&self) -> &str { &self.path }
    pub fn body(&self) -> &[u8] { &self.body }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/customers/{id}`, `req.param("id")` on `/customers/42` returns `Some("42")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Returns the first percent-decoded value of a query-string parameter.
    pub fn query(&self, key: &str) -> Option<String> {
        let query = self.query.as_deref()?;
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    /// Absolute URL of the service as the client addressed it.
    ///
    /// Behind a reverse proxy the forwarded headers win over `Host`.
    pub fn base_url(&self) -> String {
        let scheme = self.header("x-forwarded-proto").unwrap_or("http");
        let host = self.header("x-forwarded-host")
            .or_else(|| self.header("host"))
            .unwrap_or("localhost");
        format!("{scheme}://{host}")
    }

    pub(crate) fn set_params(&mut self, params: HashMap<String, String>) {
        self.params = params;
    }
}

#[cfg(test)]
impl Request {
    /// Test constructor: `uri` is a path with an optional query string.
    pub(crate) fn new(method: &str, uri: &str) -> Self {
        let (path, query) = match uri.split_once('?') {
            Some((path, query)) => (path, Some(query.to_owned())),
            None => (uri, None),
        };
        Self {
            method: method.to_owned(),
            path: path.to_owned(),
            query,
            headers: Vec::new(),
            body: Bytes::new(),
            params: HashMap::new(),
        }
    }

    pub(crate) fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_owned(), value.to_owned()));
        self
    }

    pub(crate) fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// JSON body with the matching `Content-Type`.
    pub(crate) fn with_json(self, value: &serde_json::Value) -> Self {
        self.with_header("Content-Type", "application/json")
            .with_body(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lookup_ignores_case() {
        let req = Request::new("GET", "/").with_header("Content-Type", "application/json");
        assert_eq!(req.header("content-type"), Some("application/json"));
        assert_eq!(req.content_type(), Some("application/json"));
        assert_eq!(req.header("accept"), None);
    }

    #[test]
    fn query_is_decoded_and_first_value_wins() {
        let req = Request::new("GET", "/customers?email=a%40b.co&email=other&last_name=Doe+Jr");
        assert_eq!(req.query("email").as_deref(), Some("a@b.co"));
        assert_eq!(req.query("last_name").as_deref(), Some("Doe Jr"));
        assert_eq!(req.query("domain"), None);
    }

    #[test]
    fn base_url_prefers_forwarded_headers() {
        let req = Request::new("GET", "/").with_header("Host", "internal:8080");
        assert_eq!(req.base_url(), "http://internal:8080");

        let req = req
            .with_header("X-Forwarded-Host", "api.example.com")
            .with_header("X-Forwarded-Proto", "https");
        assert_eq!(req.base_url(), "https://api.example.com");

        assert_eq!(Request::new("GET", "/").base_url(), "http://localhost");
    }
}
