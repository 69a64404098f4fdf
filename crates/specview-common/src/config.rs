//! Configuration for specview

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit configuration file
pub const CONFIG_ENV_VAR: &str = "SPECVIEW_CONFIG";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Documentation configuration
    pub docs: DocsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// Socket address in `host:port` form
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// How the served spec's `servers` list is rewritten per request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerUrlMode {
    /// Serve the list as written
    #[default]
    None,
    /// Prepend the request host (http and https)
    Add,
    /// Drop existing entries, then behave like `Add`
    Replace,
}

/// OpenID Connect URL override for one security scheme
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OidcConfig {
    /// Name of the entry under `components.securitySchemes`
    pub scheme: String,

    /// Discovery document URL
    pub url: String,
}

/// Documentation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocsConfig {
    /// Path to the OpenAPI YAML document
    pub spec_path: PathBuf,

    /// Path prefix the docs router is nested under
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// Explicit base path of `openapi.yml`. Disables URL derivation from the page.
    #[serde(default)]
    pub base_path: Option<String>,

    /// Server URL rewriting
    #[serde(default)]
    pub server_urls: ServerUrlMode,

    /// OpenID Connect overrides
    #[serde(default)]
    pub oidc: Vec<OidcConfig>,
}

fn default_prefix() -> String {
    "/".to_string()
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: "json" or "text"
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

impl Config {
    /// Load configuration from file
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| crate::Error::Config(format!("Failed to read config file: {}", e)))?;

        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content)
            .map_err(|e| crate::Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Load configuration from `$SPECVIEW_CONFIG` or the default locations
    pub fn load() -> crate::Result<Self> {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            return Self::from_file(Path::new(&path));
        }

        let paths = [
            PathBuf::from("./specview.toml"),
            PathBuf::from("/etc/specview/specview.toml"),
        ];

        for path in paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Err(crate::Error::Config(
            "No configuration file found".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let server = ServerConfig::default();
        assert_eq!(server.listen_addr(), "0.0.0.0:8080");

        let logging = LoggingConfig::default();
        assert_eq!(logging.level, "info");
        assert_eq!(logging.format, "text");
    }

    #[test]
    fn test_parse_minimal_config() {
        let config = Config::from_toml(
            r#"
[docs]
spec_path = "openapi.yml"
"#,
        )
        .unwrap();

        assert_eq!(config.docs.spec_path, PathBuf::from("openapi.yml"));
        assert_eq!(config.docs.prefix, "/");
        assert_eq!(config.docs.base_path, None);
        assert_eq!(config.docs.server_urls, ServerUrlMode::None);
        assert!(config.docs.oidc.is_empty());
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[server]
bind_address = "127.0.0.1"
port = 9000

[docs]
spec_path = "/srv/api/openapi.yml"
prefix = "/api"
base_path = "/api/"
server_urls = "replace"

[[docs.oidc]]
scheme = "OAuth"
url = "https://idp.example.com/.well-known/openid-configuration"

[logging]
format = "json"
"#;

        let config = Config::from_toml(toml).unwrap();
        assert_eq!(config.server.listen_addr(), "127.0.0.1:9000");
        assert_eq!(config.docs.prefix, "/api");
        assert_eq!(config.docs.base_path.as_deref(), Some("/api/"));
        assert_eq!(config.docs.server_urls, ServerUrlMode::Replace);
        assert_eq!(
            config.docs.oidc,
            vec![OidcConfig {
                scheme: "OAuth".to_string(),
                url: "https://idp.example.com/.well-known/openid-configuration".to_string(),
            }]
        );
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_missing_docs_section_is_rejected() {
        let err = Config::from_toml("[server]\nport = 1\n").unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }
}
