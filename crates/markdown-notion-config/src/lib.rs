use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub use markdown_notion_engine::notion::{DEFAULT_API_BASE, DEFAULT_NOTION_VERSION};

pub const DEFAULT_TIMEOUT_SECS: u64 = markdown_notion_engine::notion::DEFAULT_TIMEOUT.as_secs();

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("No Notion token in config file at {config_path}: {reason}")]
    MissingToken { config_path: PathBuf, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub notion: NotionConfig,
    #[serde(default)]
    pub databases: DatabaseConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotionConfig {
    /// Integration token. `$VAR` and `~` are expanded on load.
    pub token: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_notion_version")]
    pub notion_version: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_notion_version() -> String {
    DEFAULT_NOTION_VERSION.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl NotionConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            api_base: default_api_base(),
            notion_version: default_notion_version(),
            timeout_secs: default_timeout_secs(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Target databases, one per knowledge domain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Used for domains without an entry of their own.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(default)]
    pub domains: BTreeMap<String, String>,
}

impl Config {
    pub fn new(notion: NotionConfig) -> Self {
        Self {
            notion,
            databases: DatabaseConfig::default(),
        }
    }

    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        config.notion.token = Self::expand_token(&config.notion.token).map_err(|reason| {
            ConfigError::MissingToken {
                config_path: config_path.to_path_buf(),
                reason,
            }
        })?;

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/markdown-notion");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Database for `domain`, falling back to the default database.
    pub fn database_for(&self, domain: &str) -> Option<&str> {
        self.databases
            .domains
            .get(domain)
            .or(self.databases.default.as_ref())
            .map(String::as_str)
    }

    fn expand_token(token: &str) -> Result<String, String> {
        let expanded = shellexpand::full(token).map_err(|e| e.to_string())?;
        let expanded = expanded.trim();
        if expanded.is_empty() {
            return Err("token is empty".to_string());
        }
        Ok(expanded.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use markdown_notion_engine::notion::NotionSettings;
    use std::env;
    use tempfile::TempDir;

    fn sample() -> Config {
        let mut config = Config::new(NotionConfig::new("secret_abc"));
        config.databases.default = Some("db-humanities".into());
        config
            .databases
            .domains
            .insert("Tech".into(), "db-tech".into());
        config
    }

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/markdown-notion/config.toml"));
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let original = sample();

        let toml_str = toml::to_string(&original).unwrap();
        let deserialized: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(original, deserialized);
    }

    #[test]
    fn test_defaults_fill_optional_fields() {
        let config: Config = toml::from_str(
            r#"
[notion]
token = "secret_abc"
"#,
        )
        .unwrap();

        assert_eq!(config.notion.api_base, DEFAULT_API_BASE);
        assert_eq!(config.notion.notion_version, DEFAULT_NOTION_VERSION);
        assert_eq!(config.notion.timeout(), Duration::from_secs(120));
        assert_eq!(config.databases, DatabaseConfig::default());
    }

    #[test]
    fn test_defaults_match_client_settings() {
        let config = NotionConfig::new("t");
        let settings = NotionSettings::new("t");

        assert_eq!(config.api_base, settings.api_base);
        assert_eq!(config.notion_version, settings.notion_version);
        assert_eq!(config.timeout(), settings.timeout);
    }

    #[test]
    fn test_database_for_domain_and_fallback() {
        let config = sample();

        assert_eq!(config.database_for("Tech"), Some("db-tech"));
        assert_eq!(config.database_for("Spanish"), Some("db-humanities"));

        let bare = Config::new(NotionConfig::new("t"));
        assert_eq!(bare.database_for("Tech"), None);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested").join("config.toml");
        let test_config = sample();

        test_config.save_to_path(&config_file).unwrap();
        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded_config, test_config);
    }

    #[test]
    fn test_token_from_env_var() {
        unsafe {
            env::set_var("MARKDOWN_NOTION_TEST_TOKEN", "secret_from_env");
        }
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(
            &config_file,
            "[notion]\ntoken = \"$MARKDOWN_NOTION_TEST_TOKEN\"\n",
        )
        .unwrap();

        let config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(config.notion.token, "secret_from_env");
        unsafe {
            env::remove_var("MARKDOWN_NOTION_TEST_TOKEN");
        }
    }

    #[test]
    fn test_unset_token_var_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(
            &config_file,
            "[notion]\ntoken = \"$MARKDOWN_NOTION_UNSET_VAR_FOR_TEST\"\n",
        )
        .unwrap();

        let err = Config::load_from_path(&config_file).unwrap_err();

        assert!(matches!(err, ConfigError::MissingToken { .. }));
    }

    #[test]
    fn test_empty_token_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "[notion]\ntoken = \"  \"\n").unwrap();

        assert!(matches!(
            Config::load_from_path(&config_file),
            Err(ConfigError::MissingToken { .. })
        ));
    }

    #[test]
    fn test_invalid_toml_is_a_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "[notion\n").unwrap();

        assert!(matches!(
            Config::load_from_path(&config_file),
            Err(ConfigError::ConfigParseError { .. })
        ));
    }
}
