use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::utils::file::expand_path;

use super::cli::CliConfig;
use super::constants::{
    APP_DOT_FOLDER, CONFIG_FILE_NAME, DEFAULT_ACTIVITY_TIMEOUT_SECS, DEFAULT_ENVIRONMENT,
    DEFAULT_HOST, DEFAULT_NAMESPACE, DEFAULT_PORT, DEFAULT_TASK_QUEUE,
};

// =============================================================================
// File Config Structs (deserialized from JSON)
// =============================================================================

/// Server configuration section (from JSON config file)
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ServerFileConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Database configuration section (from JSON config file)
#[derive(Debug, Default, Clone, Deserialize)]
pub struct DatabaseFileConfig {
    pub url: Option<String>,
}

/// Workflow worker configuration section (from JSON config file)
#[derive(Debug, Default, Clone, Deserialize)]
pub struct WorkerFileConfig {
    pub enabled: Option<bool>,
    pub task_queue: Option<String>,
    pub namespace: Option<String>,
    pub activity_timeout_secs: Option<u64>,
}

/// File-based configuration (JSON)
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub server: Option<ServerFileConfig>,
    pub database: Option<DatabaseFileConfig>,
    pub worker: Option<WorkerFileConfig>,
    pub environment: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Value,
}

impl FileConfig {
    /// Load configuration from a JSON file
    fn load_from_file(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "Loading config file");
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        tracing::trace!(config = ?config, "Parsed config file");
        Ok(config)
    }

    /// Warn about unknown fields in the config
    fn warn_unknown_fields(&self) {
        if let serde_json::Value::Object(map) = &self.extra
            && !map.is_empty()
        {
            let keys_str: String = map
                .keys()
                .map(|k| k.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            tracing::warn!(
                fields = %keys_str,
                "Unknown fields in config file (possible typos)"
            );
        }
    }

    /// Merge another FileConfig into this one (other takes precedence)
    fn merge(&mut self, other: FileConfig) {
        if let Some(server) = other.server {
            let current = self.server.get_or_insert_with(ServerFileConfig::default);
            if server.host.is_some() {
                tracing::trace!(host = ?server.host, "Merging server.host");
                current.host = server.host;
            }
            if server.port.is_some() {
                tracing::trace!(port = ?server.port, "Merging server.port");
                current.port = server.port;
            }
        }

        if let Some(database) = other.database {
            let current = self.database.get_or_insert_with(DatabaseFileConfig::default);
            if database.url.is_some() {
                tracing::trace!("Merging database.url");
                current.url = database.url;
            }
        }

        if let Some(worker) = other.worker {
            let current = self.worker.get_or_insert_with(WorkerFileConfig::default);
            if worker.enabled.is_some() {
                current.enabled = worker.enabled;
            }
            if worker.task_queue.is_some() {
                current.task_queue = worker.task_queue;
            }
            if worker.namespace.is_some() {
                current.namespace = worker.namespace;
            }
            if worker.activity_timeout_secs.is_some() {
                current.activity_timeout_secs = worker.activity_timeout_secs;
            }
        }

        if other.environment.is_some() {
            self.environment = other.environment;
        }
    }
}

// =============================================================================
// Runtime Config Structs (final merged configuration)
// =============================================================================

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Where the SQLite database lives
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DatabaseLocation {
    /// `aipm.db` inside the platform data directory
    #[default]
    DataDir,
    /// Explicit database file
    File(PathBuf),
    /// Private in-memory database (lost on exit)
    Memory,
}

impl DatabaseLocation {
    /// Parse a `DATABASE_URL` style connection string.
    ///
    /// `sqlite:///rel.db` and `sqlite://rel.db` are relative to the working
    /// directory, `sqlite:////abs.db` is absolute, and `sqlite::memory:`
    /// selects an in-memory database.
    pub fn parse_url(url: &str) -> Result<Self> {
        let url = url.trim();
        let rest = url
            .strip_prefix("sqlite:///")
            .or_else(|| url.strip_prefix("sqlite://"))
            .or_else(|| url.strip_prefix("sqlite:"))
            .ok_or_else(|| anyhow::anyhow!("Unsupported database URL: {}", url))?;

        let path = rest.split('?').next().unwrap_or_default();
        match path {
            "" => anyhow::bail!("Database URL has no path: {}", url),
            ":memory:" => Ok(Self::Memory),
            p => Ok(Self::File(expand_path(p))),
        }
    }
}

/// Workflow worker configuration
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    pub enabled: bool,
    pub task_queue: String,
    pub namespace: String,
    pub activity_timeout_secs: u64,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            task_queue: DEFAULT_TASK_QUEUE.to_string(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            activity_timeout_secs: DEFAULT_ACTIVITY_TIMEOUT_SECS,
        }
    }
}

/// Final merged application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseLocation,
    pub worker: WorkerConfig,
    pub environment: String,
}

impl AppConfig {
    /// Load configuration from all sources
    ///
    /// Priority (lowest to highest):
    /// 1. Defaults
    /// 2. Profile directory config (~/.aipm/aipm.json)
    /// 3. Local directory config OR CLI-specified config path
    /// 4. CLI arguments (which include env var fallbacks via clap)
    pub fn load(cli: &CliConfig) -> Result<Self> {
        tracing::debug!("Loading application configuration");
        tracing::trace!(cli = ?cli, "CLI config");

        let mut file_config = FileConfig::default();
        let mut found_configs: Vec<String> = Vec::new();

        if let Some(profile_path) = get_profile_config_path()
            && profile_path.exists()
        {
            let profile_config = FileConfig::load_from_file(&profile_path)?;
            profile_config.warn_unknown_fields();
            file_config.merge(profile_config);
            found_configs.push(profile_path.display().to_string());
        }

        let overlay_path = if let Some(ref path) = cli.config {
            let expanded = expand_path(&path.to_string_lossy());
            if !expanded.exists() {
                anyhow::bail!("Config file not found: {}", expanded.display());
            }
            Some(expanded)
        } else {
            let local = PathBuf::from(CONFIG_FILE_NAME);
            if local.exists() { Some(local) } else { None }
        };

        if let Some(path) = overlay_path {
            let overlay_config = FileConfig::load_from_file(&path)?;
            overlay_config.warn_unknown_fields();
            file_config.merge(overlay_config);
            found_configs.push(path.display().to_string());
        }

        tracing::debug!(configs = ?found_configs, "Config files loaded");

        let config = Self::layer(cli, file_config)?;
        config.validate()?;

        tracing::debug!(config = ?config, "Configuration loaded");
        Ok(config)
    }

    /// Layer configs: defaults -> file config -> CLI/env overrides
    fn layer(cli: &CliConfig, file_config: FileConfig) -> Result<Self> {
        let file_server = file_config.server.unwrap_or_default();
        let file_database = file_config.database.unwrap_or_default();
        let file_worker = file_config.worker.unwrap_or_default();

        let host = cli
            .host
            .clone()
            .or(file_server.host)
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = cli.port.or(file_server.port).unwrap_or(DEFAULT_PORT);

        let database = match cli.database_url.clone().or(file_database.url) {
            Some(url) => DatabaseLocation::parse_url(&url)?,
            None => DatabaseLocation::DataDir,
        };

        let defaults = WorkerConfig::default();
        let worker = WorkerConfig {
            enabled: !cli.no_worker && file_worker.enabled.unwrap_or(defaults.enabled),
            task_queue: file_worker.task_queue.unwrap_or(defaults.task_queue),
            namespace: file_worker.namespace.unwrap_or(defaults.namespace),
            activity_timeout_secs: file_worker
                .activity_timeout_secs
                .unwrap_or(defaults.activity_timeout_secs),
        };

        let environment = cli
            .environment
            .clone()
            .or(file_config.environment)
            .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string());

        Ok(Self {
            server: ServerConfig { host, port },
            database,
            worker,
            environment,
        })
    }

    /// Validate the configuration for consistency and correctness
    fn validate(&self) -> Result<()> {
        if self.server.host.is_empty() {
            anyhow::bail!("Configuration error: server.host must not be empty");
        }

        // Port 0 would bind a random port
        if self.server.port == 0 {
            anyhow::bail!("Configuration error: server.port must be greater than 0");
        }

        if self.worker.task_queue.trim().is_empty() {
            anyhow::bail!("Configuration error: worker.task_queue must not be empty");
        }

        if self.worker.activity_timeout_secs == 0 {
            anyhow::bail!(
                "Configuration error: worker.activity_timeout_secs must be greater than 0"
            );
        }

        Ok(())
    }
}

/// Get the profile config path (~/.aipm/aipm.json)
fn get_profile_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(APP_DOT_FOLDER).join(CONFIG_FILE_NAME))
}

/// Check if host binds to all network interfaces
pub(crate) fn is_all_interfaces(host: &str) -> bool {
    matches!(host, "0.0.0.0" | "::" | "[::]")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_config_parse_full() {
        let json = r#"{
            "server": { "host": "0.0.0.0", "port": 8080 },
            "database": { "url": "sqlite::memory:" },
            "worker": { "enabled": false, "task_queue": "custom" },
            "environment": "staging"
        }"#;
        let config: FileConfig = serde_json::from_str(json).unwrap();

        assert_eq!(
            config.server.as_ref().unwrap().host,
            Some("0.0.0.0".to_string())
        );
        assert_eq!(config.server.as_ref().unwrap().port, Some(8080));
        assert_eq!(
            config.database.as_ref().unwrap().url.as_deref(),
            Some("sqlite::memory:")
        );
        assert_eq!(config.worker.as_ref().unwrap().enabled, Some(false));
        assert_eq!(config.environment.as_deref(), Some("staging"));
    }

    #[test]
    fn test_file_config_parse_empty() {
        let config: FileConfig = serde_json::from_str("{}").unwrap();
        assert!(config.server.is_none());
        assert!(config.database.is_none());
    }

    #[test]
    fn test_file_config_parse_extra_fields() {
        let json = r#"{ "server": { "host": "localhost" }, "unknown_field": 123 }"#;
        let config: FileConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.extra.get("unknown_field").unwrap(), 123);
    }

    #[test]
    fn test_file_config_merge() {
        let mut base: FileConfig =
            serde_json::from_str(r#"{ "server": { "host": "a", "port": 1 } }"#).unwrap();
        let overlay: FileConfig =
            serde_json::from_str(r#"{ "server": { "port": 2 }, "environment": "prod" }"#).unwrap();
        base.merge(overlay);

        let server = base.server.unwrap();
        assert_eq!(server.host.as_deref(), Some("a"));
        assert_eq!(server.port, Some(2));
        assert_eq!(base.environment.as_deref(), Some("prod"));
    }

    #[test]
    fn test_layer_defaults() {
        let config = AppConfig::layer(&CliConfig::default(), FileConfig::default()).unwrap();
        assert_eq!(config.server.host, DEFAULT_HOST);
        assert_eq!(config.server.port, DEFAULT_PORT);
        assert_eq!(config.database, DatabaseLocation::DataDir);
        assert!(config.worker.enabled);
        assert_eq!(config.worker.task_queue, "ai-pm-default");
        assert_eq!(config.worker.activity_timeout_secs, 10);
        assert_eq!(config.environment, "development");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_layer_cli_overrides_file() {
        let file: FileConfig =
            serde_json::from_str(r#"{ "server": { "port": 7000 }, "worker": { "enabled": true } }"#)
                .unwrap();
        let cli = CliConfig {
            port: Some(7001),
            no_worker: true,
            database_url: Some("sqlite::memory:".to_string()),
            ..Default::default()
        };
        let config = AppConfig::layer(&cli, file).unwrap();
        assert_eq!(config.server.port, 7001);
        assert!(!config.worker.enabled);
        assert_eq!(config.database, DatabaseLocation::Memory);
    }

    #[test]
    fn test_validate_rejects_zero_port() {
        let cli = CliConfig {
            port: Some(0),
            ..Default::default()
        };
        let config = AppConfig::layer(&cli, FileConfig::default()).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_activity_timeout() {
        let file: FileConfig =
            serde_json::from_str(r#"{ "worker": { "activity_timeout_secs": 0 } }"#).unwrap();
        let config = AppConfig::layer(&CliConfig::default(), file).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_database_url_forms() {
        assert_eq!(
            DatabaseLocation::parse_url("sqlite::memory:").unwrap(),
            DatabaseLocation::Memory
        );
        assert_eq!(
            DatabaseLocation::parse_url("sqlite:////tmp/aipm.db").unwrap(),
            DatabaseLocation::File(PathBuf::from("/tmp/aipm.db"))
        );
        match DatabaseLocation::parse_url("sqlite:///./app.db").unwrap() {
            DatabaseLocation::File(path) => {
                assert!(path.is_absolute());
                assert!(path.ends_with("app.db"));
            }
            other => panic!("unexpected location: {:?}", other),
        }
        assert!(DatabaseLocation::parse_url("postgres://localhost/db").is_err());
        assert!(DatabaseLocation::parse_url("sqlite://").is_err());
    }

    #[test]
    fn test_is_all_interfaces() {
        assert!(is_all_interfaces("0.0.0.0"));
        assert!(is_all_interfaces("::"));
        assert!(!is_all_interfaces("127.0.0.1"));
    }
}
