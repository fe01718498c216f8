//! Resource router with HTTP method negotiation.
//!
//! Requests that fail primary routing are re-examined to tell a wrong verb
//! (405 with the accepted verbs) apart from an unknown path (404).

pub mod config;
pub mod error;
pub mod http;
pub mod observability;
pub mod routing;

pub use config::schema::RouterConfig;
pub use error::{MethodNotAllowed, RoutingError};
pub use http::{HttpServer, Request};
pub use routing::{Dispatcher, MethodNegotiator, RouteList};
