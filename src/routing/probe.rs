//! Probe requests for method negotiation.
//!
//! A probe is a copy of the original request carrying a candidate verb as its
//! transport method. The override header and override query parameter are
//! removed so that resolving the probe's method yields the candidate verb.

use crate::http::request::Request;
use crate::routing::route::MethodOverride;

/// Build a probe of `original` that uses `method` as its transport verb.
pub fn build_probe(original: &Request, method: &str, overrides: &MethodOverride) -> Request {
    let mut query = original.query().clone();
    query.remove(&overrides.query_param);

    let mut headers = original.headers().clone();
    headers.remove(&overrides.header);

    Request::from_components(
        original.url().clone(),
        query,
        original.post().clone(),
        headers,
        method,
    )
}
