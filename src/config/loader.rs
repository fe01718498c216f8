//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::RouterConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<RouterConfig, ConfigError> {
    let config: RouterConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<RouterConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        [listener]
        bind_address = "127.0.0.1:8080"

        [overrides]
        header = "X-Verb"

        [[routes]]
        name = "api"

        [[routes.routes]]
        name = "items"
        mask = "/items"
        actions = { GET = "Items:list", POST = "Items:create" }

        [[routes.routes]]
        name = "item"
        mask = "/items/<id>"
        actions = { GET = "Items:read", DELETE = "Items:delete" }
    "#;

    #[test]
    fn test_parse_nested_routes() {
        let config = parse_config(SAMPLE).unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:8080");
        assert_eq!(config.overrides.header, "X-Verb");
        assert_eq!(config.overrides.query_param, "__method");
        assert_eq!(config.routes.len(), 1);

        let api = &config.routes[0];
        assert!(api.is_group());
        assert_eq!(api.routes[1].mask.as_deref(), Some("/items/<id>"));
        assert_eq!(
            api.routes[0].actions.get("POST").map(String::as_str),
            Some("Items:create")
        );
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            parse_config("routes = 5"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_validation_error() {
        let err = parse_config(
            r#"
            [[routes]]
            name = "broken"
            mask = "items"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref errors) if errors.len() == 1));
        assert!(err.to_string().starts_with("Validation failed: route 'broken'"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_config(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_load_from_disk() {
        let path = std::env::temp_dir().join(format!(
            "resource-router-config-{}.toml",
            std::process::id()
        ));
        fs::write(&path, SAMPLE).unwrap();
        let config = load_config(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(config.routes[0].routes.len(), 2);
    }
}
