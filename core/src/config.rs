use crate::errors::{GeminiError, GeminiResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{warn, Level};

pub const APP_NAME: &str = "mood-palette";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TEMPERATURE: f32 = 0.8;
pub const DEFAULT_TOP_P: f32 = 0.95;

/// Environment variables checked for the API credential, in order
pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Configuration for the palette generator
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct PaletteConfig {
    pub api_key: Option<String>,
    pub model_name: Option<String>,
    pub api_base_url: Option<String>,
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    pub request_timeout_secs: Option<u64>,
    pub log_level: Option<String>,
}

impl PaletteConfig {
    /// Built-in defaults. Holds no credential.
    pub fn defaults() -> Self {
        Self {
            api_key: None,
            model_name: Some(DEFAULT_MODEL.to_string()),
            api_base_url: Some(DEFAULT_API_BASE_URL.to_string()),
            temperature: Some(DEFAULT_TEMPERATURE),
            top_p: Some(DEFAULT_TOP_P),
            request_timeout_secs: None,
            log_level: None,
        }
    }

    /// Loads configuration from a file if it exists, otherwise returns an empty config
    pub fn load_from_file(path: &Path) -> GeminiResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            GeminiError::ConfigError(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        toml::from_str(&content).map_err(|e| {
            GeminiError::ConfigError(format!(
                "Failed to parse config file {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Reads overrides from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads overrides through `lookup`, which maps a variable name to its value
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        Self {
            api_key: API_KEY_ENV_VARS.into_iter().find_map(|name| non_empty(name)),
            model_name: non_empty("GEMINI_MODEL"),
            api_base_url: non_empty("GEMINI_API_BASE_URL"),
            log_level: non_empty("PALETTE_LOG_LEVEL"),
            ..Self::default()
        }
    }

    /// Defaults, then the config file (explicit path or the default location),
    /// then the environment.
    pub fn load(path: Option<&Path>) -> GeminiResult<Self> {
        let path = match path {
            Some(path) => Some(path.to_path_buf()),
            None => match get_default_config_file() {
                Ok(path) => Some(path),
                Err(e) => {
                    warn!(error = %e, "No default config location, skipping config file");
                    None
                }
            },
        };

        Self::layered(path.as_deref(), &Self::from_env())
    }

    fn layered(path: Option<&Path>, env: &Self) -> GeminiResult<Self> {
        let file_config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => Self::default(),
        };

        Ok(Self::defaults().merge(&file_config).merge(env))
    }

    /// Merges this config with another config, preferring values from the other config if present
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            api_key: other.api_key.clone().or_else(|| self.api_key.clone()),
            model_name: other.model_name.clone().or_else(|| self.model_name.clone()),
            api_base_url: other
                .api_base_url
                .clone()
                .or_else(|| self.api_base_url.clone()),
            temperature: other.temperature.or(self.temperature),
            top_p: other.top_p.or(self.top_p),
            request_timeout_secs: other.request_timeout_secs.or(self.request_timeout_secs),
            log_level: other.log_level.clone().or_else(|| self.log_level.clone()),
        }
    }

    /// The API credential; its absence is a startup failure
    pub fn require_api_key(&self) -> GeminiResult<&str> {
        self.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                GeminiError::ConfigError(format!(
                    "API key is required: set {} or api_key in the config file",
                    API_KEY_ENV_VARS[0]
                ))
            })
    }
}

/// Maps a configured level name to a tracing level; unset or unknown names get `default`
pub fn parse_log_level(level: Option<&str>, default: Level) -> Level {
    match level.map(|l| l.to_lowercase()).as_deref() {
        Some("trace") => Level::TRACE,
        Some("debug") => Level::DEBUG,
        Some("info") => Level::INFO,
        Some("warn") => Level::WARN,
        Some("error") => Level::ERROR,
        _ => default,
    }
}

/// Helper function to get default config directory
pub fn get_default_config_dir() -> GeminiResult<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        GeminiError::ConfigError("Could not determine home directory".to_string())
    })?;

    Ok(home_dir.join(".config").join(APP_NAME))
}

/// Helper function to get default config file path
pub fn get_default_config_file() -> GeminiResult<PathBuf> {
    Ok(get_default_config_dir()?.join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_missing_file_yields_empty_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = PaletteConfig::load_from_file(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, PaletteConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "api_key = \"file-key\"\nmodel_name = \"gemini-2.0-flash\"\ntemperature = 0.5"
        )
        .unwrap();

        let config = PaletteConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("file-key"));
        assert_eq!(config.model_name.as_deref(), Some("gemini-2.0-flash"));
        assert_eq!(config.temperature, Some(0.5));
        assert_eq!(config.top_p, None);
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_key = ").unwrap();

        let result = PaletteConfig::load_from_file(file.path());
        assert!(matches!(result, Err(GeminiError::ConfigError(_))));
    }

    #[test]
    fn test_merge_prefers_other() {
        let base = PaletteConfig::defaults();
        let overrides = PaletteConfig {
            api_key: Some("k".to_string()),
            temperature: Some(0.1),
            ..PaletteConfig::default()
        };

        let merged = base.merge(&overrides);
        assert_eq!(merged.api_key.as_deref(), Some("k"));
        assert_eq!(merged.temperature, Some(0.1));
        assert_eq!(merged.top_p, Some(0.95));
        assert_eq!(merged.model_name.as_deref(), Some(DEFAULT_MODEL));
    }

    #[test]
    fn test_env_lookup_order() {
        let vars: HashMap<&str, &str> = [("API_KEY", "fallback"), ("GEMINI_MODEL", "m")]
            .into_iter()
            .collect();
        let config = PaletteConfig::from_lookup(|name| vars.get(name).map(|v| v.to_string()));
        assert_eq!(config.api_key.as_deref(), Some("fallback"));
        assert_eq!(config.model_name.as_deref(), Some("m"));

        let vars: HashMap<&str, &str> = [("API_KEY", "fallback"), ("GEMINI_API_KEY", "primary")]
            .into_iter()
            .collect();
        let config = PaletteConfig::from_lookup(|name| vars.get(name).map(|v| v.to_string()));
        assert_eq!(config.api_key.as_deref(), Some("primary"));
    }

    #[test]
    fn test_env_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_key = \"file-key\"\nmodel_name = \"file-model\"\ntop_p = 0.5").unwrap();

        let env = PaletteConfig::from_lookup(|name| {
            (name == "GEMINI_API_KEY").then(|| "env-key".to_string())
        });
        let config = PaletteConfig::layered(Some(file.path()), &env).unwrap();

        assert_eq!(config.api_key.as_deref(), Some("env-key"));
        assert_eq!(config.model_name.as_deref(), Some("file-model"));
        assert_eq!(config.top_p, Some(0.5));
        assert_eq!(config.temperature, Some(DEFAULT_TEMPERATURE));
    }

    #[test]
    fn test_env_alone_supplies_credential() {
        let env = PaletteConfig::from_lookup(|name| {
            (name == "API_KEY").then(|| "env-key".to_string())
        });
        let config = PaletteConfig::layered(None, &env).unwrap();

        assert_eq!(config.require_api_key().unwrap(), "env-key");
        assert_eq!(config.model_name.as_deref(), Some(DEFAULT_MODEL));
    }

    #[test]
    fn test_parse_log_level() {
        assert_eq!(parse_log_level(Some("DEBUG"), Level::INFO), Level::DEBUG);
        assert_eq!(parse_log_level(Some("warn"), Level::INFO), Level::WARN);
        assert_eq!(parse_log_level(Some("nonsense"), Level::WARN), Level::WARN);
        assert_eq!(parse_log_level(None, Level::INFO), Level::INFO);
    }

    #[test]
    fn test_blank_api_key_is_rejected() {
        let config = PaletteConfig {
            api_key: Some("   ".to_string()),
            ..PaletteConfig::defaults()
        };
        assert!(matches!(
            config.require_api_key(),
            Err(GeminiError::ConfigError(_))
        ));
        assert!(PaletteConfig::defaults().require_api_key().is_err());
    }
}
