//! Lambda response conversion.

use std::collections::HashMap;

use bytes::Bytes;
use lambda_http::{Body, Response};

/// Lambda HTTP response.
#[derive(Debug)]
pub struct LambdaResponse {
    /// Status code.
    pub status: u16,
    /// Response headers.
    pub headers: HashMap<String, String>,
    /// Response body.
    pub body: Bytes,
}

impl LambdaResponse {
    /// Create a new response.
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: body.into(),
        }
    }

    /// Create a JSON response.
    pub fn json<T: serde::Serialize>(data: &T) -> Result<Self, serde_json::Error> {
        let body = serde_json::to_vec(data)?;
        Ok(Self::new(200, body).header("content-type", "application/json"))
    }

    /// Create an error response with an `{"error": ...}` body.
    pub fn error(status: u16, message: impl Into<String>) -> Self {
        let body = serde_json::json!({
            "error": message.into()
        });
        Self::new(status, serde_json::to_vec(&body).unwrap_or_default())
            .header("content-type", "application/json")
    }

    /// Create an internal server error response.
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::error(500, message)
    }

    /// Add a header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Convert to a `lambda_http::Response`.
    pub fn into_lambda_response(self) -> Response<Body> {
        let mut builder = Response::builder().status(self.status);

        for (name, value) in &self.headers {
            builder = builder.header(name, value);
        }

        let body = if let Ok(s) = String::from_utf8(self.body.to_vec()) {
            Body::Text(s)
        } else {
            Body::Binary(self.body.to_vec())
        };

        builder.body(body).unwrap_or_else(|_| {
            Response::builder()
                .status(500)
                .body(Body::Text("Internal Server Error".to_string()))
                .unwrap()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_response_carries_error_body() {
        let response = LambdaResponse::error(405, "method not allowed");
        assert_eq!(response.status, 405);
        let body: serde_json::Value = serde_json::from_slice(&response.body).unwrap();
        assert_eq!(body["error"], "method not allowed");
    }

    #[test]
    fn json_response_sets_content_type() {
        let response = LambdaResponse::json(&serde_json::json!({"ok": true})).unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(
            response.headers.get("content-type").map(String::as_str),
            Some("application/json")
        );
    }

    #[test]
    fn converts_to_lambda_http_response() {
        let response = LambdaResponse::new(200, "hello").into_lambda_response();
        assert_eq!(response.status(), 200);
        match response.body() {
            Body::Text(text) => assert_eq!(text, "hello"),
            other => panic!("unexpected body: {other:?}"),
        }
    }
}
