//! Routing failures and their HTTP rendering.

use axum::http::header::ALLOW;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// The request path is served by a route that does not accept the request's verb.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Method not supported. Available methods: {}", .allowed_methods.join(", "))]
pub struct MethodNotAllowed {
    allowed_methods: Vec<String>,
}

impl MethodNotAllowed {
    pub fn new(allowed_methods: Vec<String>) -> Self {
        Self { allowed_methods }
    }

    /// Verb names the matching route accepts, in flag order.
    pub fn allowed_methods(&self) -> &[String] {
        &self.allowed_methods
    }

    /// Value for the `Allow` response header.
    pub fn allow_header_value(&self) -> String {
        self.allowed_methods.join(", ")
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::METHOD_NOT_ALLOWED
    }
}

/// Outcome of a request no route would serve.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutingError {
    #[error("No matching route found for {path}")]
    NotFound { path: String },

    #[error(transparent)]
    MethodNotAllowed(#[from] MethodNotAllowed),
}

impl RoutingError {
    pub fn status(&self) -> StatusCode {
        match self {
            RoutingError::NotFound { .. } => StatusCode::NOT_FOUND,
            RoutingError::MethodNotAllowed(e) => e.status(),
        }
    }
}

impl IntoResponse for RoutingError {
    fn into_response(self) -> Response {
        match self {
            RoutingError::NotFound { .. } => {
                (StatusCode::NOT_FOUND, "No matching route found").into_response()
            }
            RoutingError::MethodNotAllowed(e) => {
                let mut response = (e.status(), e.to_string()).into_response();
                if let Ok(allow) = HeaderValue::from_str(&e.allow_header_value()) {
                    response.headers_mut().insert(ALLOW, allow);
                }
                response
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_format() {
        let err = MethodNotAllowed::new(vec!["GET".into(), "POST".into()]);
        assert_eq!(
            err.to_string(),
            "Method not supported. Available methods: GET, POST"
        );
        assert_eq!(err.allow_header_value(), "GET, POST");
        assert_eq!(err.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[test]
    fn test_method_not_allowed_response() {
        let err: RoutingError = MethodNotAllowed::new(vec!["PUT".into()]).into();
        assert_eq!(err.status(), StatusCode::METHOD_NOT_ALLOWED);

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers().get(ALLOW).unwrap(), "PUT");
    }

    #[test]
    fn test_not_found_response() {
        let err = RoutingError::NotFound { path: "/nope".into() };
        assert_eq!(err.to_string(), "No matching route found for /nope");

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().get(ALLOW).is_none());
    }
}
