//! HTTP-shaped endpoints and the transport boundary.
//!
//! The transport that actually performs requests lives outside this crate.
//! It receives a fully assembled [`Request`] and calls the success callback
//! at most once with the parsed JSON body. A failed request never calls it.

use serde::Serialize;
use serde_json::Value;

use crate::error::Error;
use crate::filter::UrlArgument;

/// Asks the server to echo written rows back in the response body.
pub const PREFER_REPRESENTATION: &str = "Prefer: return=representation";

/// Declares that `Range` headers count items.
pub const RANGE_UNIT_ITEMS: &str = "Range-Unit: items";

/// HTTP method of an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

/// A JSON endpoint with a fixed method and fixed extra headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    method: Method,
    url: Option<String>,
    headers: Vec<String>,
}

impl Endpoint {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            url: None,
            headers: Vec::new(),
        }
    }

    /// Adds a header sent with every request.
    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.headers.push(header.into());
        self
    }

    /// Sets an explicit URL.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub(crate) fn set_url(&mut self, url: String) {
        self.url = Some(url);
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn get_url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn has_explicit_url(&self) -> bool {
        self.url.is_some()
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Assembles a request: endpoint headers first, then `extra_headers`.
    pub fn request(
        &self,
        extra_headers: Vec<String>,
        arguments: Vec<UrlArgument>,
        data: Option<Value>,
    ) -> Request {
        let mut headers = Vec::with_capacity(self.headers.len() + extra_headers.len());
        headers.extend(self.headers.iter().cloned());
        headers.extend(extra_headers);
        Request {
            method: self.method,
            url: self.url.clone().unwrap_or_default(),
            headers,
            arguments,
            data,
        }
    }
}

/// A request handed to the [`Transport`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Request {
    pub method: Method,
    pub url: String,
    pub headers: Vec<String>,
    pub arguments: Vec<UrlArgument>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Called once with the parsed response body of a successful request.
pub type Success<'a> = Box<dyn FnOnce(Value) -> Result<(), Error> + 'a>;

/// Performs requests on behalf of CRUD actions.
pub trait Transport {
    /// Executes `request` and calls `on_success` if it succeeds.
    ///
    /// Implementations return whatever `on_success` returned, or `Ok(())`
    /// when it was never called.
    fn execute<'a>(&self, request: Request, on_success: Success<'a>) -> Result<(), Error>;
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_request_header_order() {
        let endpoint = Endpoint::new(Method::Get)
            .url("http://api/todos")
            .header(RANGE_UNIT_ITEMS);
        let request = endpoint.request(vec!["Range: 0-10".to_string()], Vec::new(), None);

        assert_eq!(request.method, Method::Get);
        assert_eq!(request.url, "http://api/todos");
        assert_eq!(request.headers, vec![RANGE_UNIT_ITEMS, "Range: 0-10"]);
    }

    #[test]
    fn test_request_json_shape() {
        let request = Endpoint::new(Method::Post)
            .url("http://api/todos")
            .header(PREFER_REPRESENTATION)
            .request(Vec::new(), Vec::new(), Some(json!([{"id": 1}])));
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["method"], "POST");
        assert_eq!(json["headers"], json!([PREFER_REPRESENTATION]));
        assert_eq!(json["data"], json!([{"id": 1}]));
    }

    #[test]
    fn test_explicit_url() {
        assert!(!Endpoint::new(Method::Put).has_explicit_url());
        assert!(Endpoint::new(Method::Put).url("x").has_explicit_url());
        assert_eq!(Method::Delete.as_str(), "DELETE");
    }
}
