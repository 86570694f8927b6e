//! Lambda request conversion.

use std::collections::HashMap;

use bytes::Bytes;
use lambda_http::Request;
use serde::de::DeserializeOwned;

/// Wrapper for Lambda HTTP requests.
///
/// Public fields so handler tests can build requests directly.
#[derive(Debug, Clone)]
pub struct LambdaRequest {
    /// HTTP method.
    pub method: http::Method,
    /// Request path.
    pub path: String,
    /// Decoded query-string parameters.
    pub query: HashMap<String, String>,
    /// Headers (lowercased names).
    pub headers: HashMap<String, String>,
    /// Request body.
    pub body: Bytes,
}

impl LambdaRequest {
    /// Create a bare request; used mostly by tests.
    pub fn new(method: http::Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: HashMap::new(),
            headers: HashMap::new(),
            body: Bytes::new(),
        }
    }

    /// Attach a body.
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Attach a query-string parameter.
    pub fn with_query_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }

    /// Convert from a `lambda_http::Request`.
    pub fn from_lambda_request(request: Request) -> Self {
        let (parts, body) = request.into_parts();

        let mut headers = HashMap::new();
        for (name, value) in parts.headers.iter() {
            if let Ok(v) = value.to_str() {
                headers.insert(name.as_str().to_lowercase(), v.to_string());
            }
        }

        let query = parts
            .uri
            .query()
            .map(|raw| {
                url::form_urlencoded::parse(raw.as_bytes())
                    .into_owned()
                    .collect()
            })
            .unwrap_or_default();

        let body = match body {
            lambda_http::Body::Empty => Bytes::new(),
            lambda_http::Body::Text(s) => Bytes::from(s),
            lambda_http::Body::Binary(b) => Bytes::from(b),
        };

        Self {
            method: parts.method,
            path: parts.uri.path().to_string(),
            query,
            headers,
            body,
        }
    }

    /// Get a header value.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(|s| s.as_str())
    }

    /// Get a query-string parameter.
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(|s| s.as_str())
    }

    /// Deserialize the body as JSON.
    pub fn json_body<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[test]
    fn converts_method_query_and_body() {
        let request = lambda_http::http::Request::builder()
            .method("POST")
            .uri("/submit?user=alice%40example.com&verbose=1")
            .header("Content-Type", "application/json")
            .body(lambda_http::Body::Text(r#"{"n":7}"#.to_string()))
            .unwrap();

        let converted = LambdaRequest::from_lambda_request(request);
        assert_eq!(converted.method, http::Method::POST);
        assert_eq!(converted.path, "/submit");
        assert_eq!(converted.query_param("user"), Some("alice@example.com"));
        assert_eq!(converted.query_param("verbose"), Some("1"));
        assert_eq!(converted.header("content-type"), Some("application/json"));

        #[derive(Deserialize)]
        struct Payload {
            n: u32,
        }
        let payload: Payload = converted.json_body().unwrap();
        assert_eq!(payload.n, 7);
    }

    #[test]
    fn empty_body_and_absent_query() {
        let request = lambda_http::http::Request::builder()
            .method("GET")
            .uri("/")
            .body(lambda_http::Body::Empty)
            .unwrap();
        let converted = LambdaRequest::from_lambda_request(request);
        assert!(converted.body.is_empty());
        assert!(converted.query_param("user").is_none());
    }
}
