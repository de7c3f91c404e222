use notestack_engine::ToolConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

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
}

/// Settings for the hosts that run block tasks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Timeout applied to link-preview requests
    pub fetch_timeout_secs: u64,
    /// Base URL for code editor workers; the built-in CDN is used when unset
    pub code_worker_base: Option<String>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_secs: 10,
            code_worker_base: None,
        }
    }
}

impl HostConfig {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub notes_path: PathBuf,
    #[serde(default)]
    pub host: HostConfig,
    #[serde(default)]
    pub editor: ToolConfig,
}

impl Config {
    pub fn new(notes_path: impl Into<PathBuf>) -> Self {
        Self {
            notes_path: notes_path.into(),
            host: HostConfig::default(),
            editor: ToolConfig::default(),
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

        // Expand shell variables and tilde in the loaded config path
        config.notes_path = Self::expand_path(&config.notes_path).unwrap_or(config.notes_path);

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
        let config_dir = shellexpand::tilde("~/.config/notestack");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Notes directory from the first CLI argument, falling back to the config file
    pub fn resolve_notes_path(cli_arg: Option<String>) -> Result<Option<PathBuf>, ConfigError> {
        if let Some(arg) = cli_arg {
            let path = PathBuf::from(&arg);
            return Ok(Some(Self::expand_path(&path).unwrap_or(path)));
        }
        Ok(Self::load()?.map(|config| config.notes_path))
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notestack_engine::blocks::Language;
    use pretty_assertions::assert_eq;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/notestack/config.toml"));
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let mut original = Config::new("/tmp/test-notes");
        original.editor.header.default_level = 3;
        original.host.code_worker_base = Some("http://localhost:8080/vs".to_string());

        let toml_str = toml::to_string(&original).unwrap();
        let deserialized: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(original, deserialized);
    }

    #[test]
    fn test_minimal_file_uses_defaults() {
        let config: Config = toml::from_str(r#"notes_path = "/notes""#).unwrap();

        assert_eq!(config.editor, ToolConfig::default());
        assert_eq!(config.host.fetch_timeout(), Duration::from_secs(10));
        assert_eq!(config.host.code_worker_base, None);
    }

    #[test]
    fn test_editor_section_overrides_tool_settings() {
        let content = r#"
notes_path = "/notes"

[editor.code]
default_language = "python"

[editor.table]
rows = 4

[host]
fetch_timeout_secs = 3
"#;
        let config: Config = toml::from_str(content).unwrap();

        assert_eq!(config.editor.code.default_language, Language::Python);
        assert_eq!(config.editor.table.rows, 4);
        assert_eq!(config.editor.table.cols, 3);
        assert_eq!(config.host.fetch_timeout_secs, 3);
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let path = PathBuf::from("~/test/path");
        let expanded = Config::expand_path(&path).unwrap();

        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.to_string_lossy().contains("test/path"));
    }

    #[test]
    fn test_expand_path_with_env_var() {
        unsafe {
            env::set_var("NOTESTACK_TEST_VAR", "/test/env/path");
        }

        let path = PathBuf::from("$NOTESTACK_TEST_VAR/subdir");
        let expanded = Config::expand_path(&path);

        assert_eq!(expanded, Some(PathBuf::from("/test/env/path/subdir")));

        unsafe {
            env::remove_var("NOTESTACK_TEST_VAR");
        }
    }

    #[test]
    fn test_expand_path_with_relative_path() {
        let path = PathBuf::from("relative/path");
        assert_eq!(Config::expand_path(&path), Some(path));
    }

    #[test]
    fn test_resolve_notes_path_prefers_cli_argument() {
        let resolved = Config::resolve_notes_path(Some("/from/cli".to_string())).unwrap();
        assert_eq!(resolved, Some(PathBuf::from("/from/cli")));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_load_config_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "notes_path = [").unwrap();

        let result = Config::load_from_path(&config_file);
        assert!(matches!(result, Err(ConfigError::ConfigParseError { .. })));
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested").join("config.toml");
        let test_config = Config::new("/tmp/test-notes");

        test_config.save_to_path(&config_file).unwrap();
        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded_config, test_config);
    }

    #[test]
    fn test_config_with_tilde_in_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "notes_path = \"~/test/notes\"\n").unwrap();

        let config = Config::load_from_path(&config_file).unwrap().unwrap();

        let expanded_path = config.notes_path.to_string_lossy();
        assert!(!expanded_path.starts_with('~'));
        assert!(expanded_path.contains("test/notes"));
    }
}
