//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RouterConfig (validated, immutable)
//!     → RouteList::from_config (route tree, shared via Arc)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the route tree is never rebuilt at runtime
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{ListenerConfig, ObservabilityConfig, OverrideConfig, RouteConfig, RouterConfig};
pub use validation::{validate_config, ValidationError};
