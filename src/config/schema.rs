//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! application. All types derive Serde traits for deserialization from
//! config files.

use serde::{Deserialize, Serialize};

use crate::routing::discovery::{DiscoveryPolicy, DEFAULT_EXTENSION};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP serving boundary.
    pub server: ServerConfig,

    /// Controller discovery.
    pub discovery: DiscoveryConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:8080").
    pub bind_address: String,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,

    /// Build every controller singleton before accepting traffic.
    pub preload_controllers: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
            request_timeout_secs: 30,
            preload_controllers: true,
        }
    }
}

/// Controller discovery configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Source tree to scan. When unset, every registry controller is mounted.
    pub controller_dir: Option<String>,

    /// Extension of source units.
    pub extension: String,

    /// Behavior for units that name an unknown controller.
    pub policy: DiscoveryPolicy,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            controller_dir: None,
            extension: DEFAULT_EXTENSION.to_string(),
            policy: DiscoveryPolicy::Strict,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.bind_address, "127.0.0.1:8080");
        assert_eq!(config.discovery.extension, "rs");
        assert_eq!(config.discovery.policy, DiscoveryPolicy::Strict);
        assert!(config.discovery.controller_dir.is_none());
    }

    #[test]
    fn test_partial_document() {
        let config: AppConfig = toml::from_str(
            r#"
            [discovery]
            controller_dir = "src/app/controllers"
            policy = "lenient"

            [observability]
            log_level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.discovery.controller_dir.as_deref(), Some("src/app/controllers"));
        assert_eq!(config.discovery.policy, DiscoveryPolicy::Lenient);
        assert_eq!(config.observability.log_level, "debug");
        assert_eq!(config.server.request_timeout_secs, 30);
    }
}
