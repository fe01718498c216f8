//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, fallback handler)
//!     → request.rs (snapshot url, query, form body, headers, method)
//!     → [routing layer: match or negotiate]
//!     → response.rs / RoutingError (render outcome)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{Request, RequestError};
pub use response::{MatchSummary, NullResponse};
pub use server::HttpServer;
