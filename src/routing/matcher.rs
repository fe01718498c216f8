//! Route matching logic.
//!
//! # Responsibilities
//! - Match the request path against a route mask (`/items/<id>`)
//! - Match host header (exact match, case-insensitive)
//! - Combine conditions with AND semantics
//!
//! # Design Decisions
//! - Matching is structural only; the request method is never inspected
//! - Host matching is case-insensitive (RFC 9110)
//! - Path matching is case-sensitive
//! - No regex to guarantee O(n) matching

use std::collections::BTreeMap;
use std::fmt;

use crate::http::request::Request;

/// Parameters captured from a matched path.
pub type Params = BTreeMap<String, String>;

/// Trait for matching requests against conditions.
pub trait Matcher: Send + Sync + fmt::Debug {
    /// Returns captured parameters if the request matches this condition.
    fn captures(&self, req: &Request) -> Option<Params>;

    /// Returns true if the request matches this condition.
    fn matches(&self, req: &Request) -> bool {
        self.captures(req).is_some()
    }
}

/// Errors raised while parsing a route mask.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    #[error("mask must start with '/': {0}")]
    MissingLeadingSlash(String),

    #[error("malformed placeholder '{segment}' in mask {mask}")]
    MalformedPlaceholder { mask: String, segment: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// Matches the request path against a mask of literal and `<name>` segments.
#[derive(Debug, Clone)]
pub struct PathPattern {
    mask: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Parse a mask such as `/users/<id>/posts`.
    pub fn parse(mask: &str) -> Result<Self, PatternError> {
        if !mask.starts_with('/') {
            return Err(PatternError::MissingLeadingSlash(mask.to_string()));
        }

        let mut segments = Vec::new();
        for segment in mask.split('/').filter(|s| !s.is_empty()) {
            if segment.contains(['<', '>']) {
                let name = segment
                    .strip_prefix('<')
                    .and_then(|s| s.strip_suffix('>'))
                    .filter(|name| {
                        !name.is_empty()
                            && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
                    })
                    .ok_or_else(|| PatternError::MalformedPlaceholder {
                        mask: mask.to_string(),
                        segment: segment.to_string(),
                    })?;
                segments.push(Segment::Param(name.to_string()));
            } else {
                segments.push(Segment::Literal(segment.to_string()));
            }
        }

        Ok(Self {
            mask: mask.to_string(),
            segments,
        })
    }

    pub fn mask(&self) -> &str {
        &self.mask
    }
}

impl Matcher for PathPattern {
    fn captures(&self, req: &Request) -> Option<Params> {
        let parts: Vec<&str> = req.path().split('/').filter(|s| !s.is_empty()).collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = Params::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(literal) if literal == part => {}
                Segment::Literal(_) => return None,
                Segment::Param(name) => {
                    params.insert(name.clone(), part.to_string());
                }
            }
        }
        Some(params)
    }
}

/// Matches the Host header.
#[derive(Debug, Clone)]
pub struct HostMatcher {
    expected_host: String,
}

impl HostMatcher {
    /// Create a new host matcher.
    /// The host is normalized to lowercase for case-insensitive matching.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            expected_host: host.into().to_lowercase(),
        }
    }
}

impl Matcher for HostMatcher {
    fn captures(&self, req: &Request) -> Option<Params> {
        let host = req
            .header("host")
            .map(str::to_string)
            .or_else(|| req.url().host_str().map(str::to_string))?;
        (strip_port(&host).to_lowercase() == self.expected_host).then(Params::new)
    }
}

/// Drop a trailing `:port`, keeping bracketed IPv6 literals intact.
fn strip_port(host: &str) -> &str {
    if host.starts_with('[') {
        return host.find(']').map_or(host, |end| &host[..=end]);
    }
    match host.rsplit_once(':') {
        Some((name, port)) if port.bytes().all(|b| b.is_ascii_digit()) => name,
        _ => host,
    }
}

/// Combines multiple matchers with AND semantics.
#[derive(Debug)]
pub struct AndMatcher {
    matchers: Vec<Box<dyn Matcher>>,
}

impl AndMatcher {
    pub fn new(matchers: Vec<Box<dyn Matcher>>) -> Self {
        Self { matchers }
    }
}

impl Matcher for AndMatcher {
    fn captures(&self, req: &Request) -> Option<Params> {
        // All matchers must pass (AND)
        let mut params = Params::new();
        for matcher in &self.matchers {
            params.extend(matcher.captures(req)?);
        }
        Some(params)
    }
}
