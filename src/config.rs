//! Configuration module for imgdrop.

use serde::Deserialize;
use std::path::Path;

use crate::{ImgdropError, Result};

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Public base address used to compose the URLs returned to clients.
    #[serde(default = "default_public_url")]
    pub public_url: String,
    /// CORS allowed origins.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_public_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            public_url: default_public_url(),
            cors_origins: vec![],
        }
    }
}

impl ServerConfig {
    /// Public base URL without trailing slashes.
    pub fn public_base(&self) -> &str {
        self.public_url.trim_end_matches('/')
    }
}

/// Metadata store configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// MongoDB connection string.
    #[serde(default = "default_db_uri")]
    pub uri: String,
    /// Database name.
    #[serde(default = "default_db_name")]
    pub name: String,
    /// Collection holding image records.
    #[serde(default = "default_collection")]
    pub collection: String,
}

fn default_db_uri() -> String {
    "mongodb://localhost:27017/".to_string()
}

fn default_db_name() -> String {
    "image_db".to_string()
}

fn default_collection() -> String {
    "images".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            uri: default_db_uri(),
            name: default_db_name(),
            collection: default_collection(),
        }
    }
}

/// File storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct FilesConfig {
    /// Path to the upload directory.
    #[serde(default = "default_storage_path")]
    pub storage_path: String,
    /// Maximum upload size in megabytes.
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size_mb: u64,
}

fn default_storage_path() -> String {
    "uploads".to_string()
}

fn default_max_upload_size() -> u64 {
    5
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            storage_path: default_storage_path(),
            max_upload_size_mb: default_max_upload_size(),
        }
    }
}

impl FilesConfig {
    /// Maximum upload size in bytes.
    pub fn max_upload_bytes(&self) -> u64 {
        self.max_upload_size_mb * 1024 * 1024
    }
}

/// Templates configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TemplatesConfig {
    /// Path to the index page served at `/`.
    #[serde(default = "default_index_template")]
    pub index: String,
}

fn default_index_template() -> String {
    "templates/index.html".to_string()
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            index: default_index_template(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/imgdrop.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Metadata store configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// File storage configuration.
    #[serde(default)]
    pub files: FilesConfig,
    /// Templates configuration.
    #[serde(default)]
    pub templates: TemplatesConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ImgdropError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| ImgdropError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `IMGDROP_MONGODB_URI`: MongoDB connection string
    /// - `IMGDROP_DATABASE_NAME`: database name
    /// - `IMGDROP_UPLOAD_DIR`: upload directory
    /// - `IMGDROP_PUBLIC_URL`: public base URL for returned links
    /// - `IMGDROP_PORT`: listen port
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary key lookup. Empty values are ignored.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(uri) = get("IMGDROP_MONGODB_URI") {
            self.database.uri = uri;
        }
        if let Some(name) = get("IMGDROP_DATABASE_NAME") {
            self.database.name = name;
        }
        if let Some(dir) = get("IMGDROP_UPLOAD_DIR") {
            self.files.storage_path = dir;
        }
        if let Some(url) = get("IMGDROP_PUBLIC_URL") {
            self.server.public_url = url;
        }
        if let Some(port) = get("IMGDROP_PORT") {
            match port.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => tracing::warn!("Ignoring invalid IMGDROP_PORT value: {}", port),
            }
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.files.storage_path.trim().is_empty() {
            return Err(ImgdropError::Config(
                "files.storage_path must not be empty".to_string(),
            ));
        }
        if self.files.max_upload_size_mb == 0 {
            return Err(ImgdropError::Config(
                "files.max_upload_size_mb must be greater than zero".to_string(),
            ));
        }
        if self.database.name.trim().is_empty() || self.database.collection.trim().is_empty() {
            return Err(ImgdropError::Config(
                "database.name and database.collection must not be empty".to_string(),
            ));
        }
        let url = &self.server.public_url;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ImgdropError::Config(format!(
                "server.public_url must start with http:// or https:// (got \"{url}\")"
            )));
        }
        Ok(())
    }
}
