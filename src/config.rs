//! Application configuration module
//!
//! Loaded from config.json next to the binary; a default file is written on
//! first run. Environment variables override the file for the settings that
//! differ between deployments.

use serde::{Deserialize, Serialize};
use std::path::Path;

const CONFIG_FILE: &str = "config.json";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Elasticsearch configuration
    #[serde(default)]
    pub elasticsearch: ElasticsearchConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server listen address
    pub host: String,
    /// Server port
    pub port: u16,
    /// Allowed CORS origin (the frontend)
    pub frontend_url: String,
}

/// Elasticsearch configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElasticsearchConfig {
    /// Node URL
    pub url: String,
    /// Index holding the street-name records
    pub index: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            elasticsearch: ElasticsearchConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            frontend_url: "http://localhost:5173".to_string(),
        }
    }
}

impl Default for ElasticsearchConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:9200".to_string(),
            index: "street-names".to_string(),
        }
    }
}

impl AppConfig {
    pub fn get_bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Load configuration from config.json, writing the defaults on first run,
/// then apply environment overrides.
pub fn load_config() -> anyhow::Result<AppConfig> {
    let path = Path::new(CONFIG_FILE);

    let mut config = if path.exists() {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)?
    } else {
        let config = AppConfig::default();
        std::fs::write(path, serde_json::to_string_pretty(&config)?)?;
        tracing::info!("Created default config file: {}", CONFIG_FILE);
        config
    };

    apply_env_overrides(&mut config);

    Ok(config)
}

fn apply_env_overrides(config: &mut AppConfig) {
    if let Ok(url) = std::env::var("ELASTICSEARCH_URL") {
        config.elasticsearch.url = url;
    }
    if let Ok(index) = std::env::var("INDEX_NAME") {
        config.elasticsearch.index = index;
    }
    if let Ok(port) = std::env::var("PORT") {
        match port.parse() {
            Ok(port) => config.server.port = port,
            Err(_) => tracing::warn!("Ignoring non-numeric PORT value: {}", port),
        }
    }
    if let Ok(url) = std::env::var("FRONTEND_URL") {
        config.server.frontend_url = url;
    }
}
