//! Request snapshot used for routing and negotiation.
//!
//! # Responsibilities
//! - Capture URL, query, posted form fields, headers and method of a request
//! - Convert HTTP-layer requests into routing requests
//!
//! # Design Decisions
//! - Values are immutable once built; builder methods consume and return `Self`
//! - The query map is authoritative for routing, not the URL's query string
//! - Header names are case-insensitive (`HeaderMap`)

use std::collections::BTreeMap;
use std::str::FromStr;

use axum::http::header::{CONTENT_TYPE, HOST};
use axum::http::request::Parts;
use axum::http::uri::Authority;
use axum::http::{HeaderMap, HeaderName, HeaderValue};
use url::Url;

/// Errors raised while building a [`Request`].
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("invalid header name: {0}")]
    InvalidHeaderName(String),

    #[error("invalid value for header {0}")]
    InvalidHeaderValue(String),

    #[error("invalid Host header: {0}")]
    InvalidHost(String),
}

/// Parse a `Host` header as a bare `host[:port]` authority.
fn host_authority(value: &HeaderValue) -> Result<Authority, RequestError> {
    let raw = String::from_utf8_lossy(value.as_bytes()).into_owned();
    match value.to_str().ok().map(Authority::from_str) {
        Some(Ok(authority)) if !authority.as_str().contains('@') => Ok(authority),
        _ => Err(RequestError::InvalidHost(raw)),
    }
}

/// An immutable request snapshot.
#[derive(Debug, Clone)]
pub struct Request {
    url: Url,
    query: BTreeMap<String, String>,
    post: BTreeMap<String, String>,
    headers: HeaderMap,
    method: String,
}

impl Request {
    /// Parse `url` and derive the query map from its query string.
    pub fn new(method: impl Into<String>, url: &str) -> Result<Self, RequestError> {
        let url = Url::parse(url)?;
        let query = url.query_pairs().into_owned().collect();
        Ok(Self {
            url,
            query,
            post: BTreeMap::new(),
            headers: HeaderMap::new(),
            method: method.into(),
        })
    }

    /// Assemble a request from already separated parts.
    pub fn from_components(
        url: Url,
        query: BTreeMap<String, String>,
        post: BTreeMap<String, String>,
        headers: HeaderMap,
        method: impl Into<String>,
    ) -> Self {
        Self {
            url,
            query,
            post,
            headers,
            method: method.into(),
        }
    }

    /// Convert an HTTP-layer request head and its buffered body.
    ///
    /// Form-encoded bodies populate the posted parameters; other bodies are ignored.
    pub fn from_parts(parts: &Parts, body: &[u8]) -> Result<Self, RequestError> {
        let authority = match parts.uri.authority() {
            Some(authority) => authority.clone(),
            None => match parts.headers.get(HOST) {
                Some(host) => host_authority(host)?,
                None => Authority::from_static("localhost"),
            },
        };
        let scheme = parts.uri.scheme_str().unwrap_or("http");

        // Path and query always come from the request target, never from Host.
        let mut url = Url::parse(&format!("{}://{}/", scheme, authority))?;
        url.set_path(parts.uri.path());
        url.set_query(parts.uri.query());
        url.set_fragment(None);

        let mut request = Self::new(parts.method.as_str(), url.as_str())?;
        request.headers = parts.headers.clone();

        let is_form = parts
            .headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.starts_with("application/x-www-form-urlencoded"))
            .unwrap_or(false);
        if is_form {
            request.post = url::form_urlencoded::parse(body).into_owned().collect();
        }

        Ok(request)
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self, RequestError> {
        let header = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| RequestError::InvalidHeaderName(name.to_string()))?;
        let value = HeaderValue::from_str(value)
            .map_err(|_| RequestError::InvalidHeaderValue(name.to_string()))?;
        self.headers.insert(header, value);
        Ok(self)
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    pub fn with_post(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.post.insert(key.into(), value.into());
        self
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn path(&self) -> &str {
        self.url.path()
    }

    pub fn query(&self) -> &BTreeMap<String, String> {
        &self.query
    }

    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }

    pub fn post(&self) -> &BTreeMap<String, String> {
        &self.post
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Header value as text; non-UTF-8 values are treated as absent.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Transport-level method as received.
    pub fn method(&self) -> &str {
        &self.method
    }
}
