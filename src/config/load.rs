//! Configuration file loading and validation
//!
//! Reads a JSON or TOML configuration into a typed [`StyleConfig`]. Shape
//! errors are reported here, before any theme resolution happens.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use stylescope_tokens::{json_type_name, MergeError, TokenTable, TokenValue};

use crate::content::ContentError;

/// Top-level keys this crate interprets. Everything else is passed through.
const KNOWN_KEYS: &[&str] = &["content", "theme", "plugins"];

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    IoError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse TOML: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Unsupported config format '{0}' (expected .json or .toml)")]
    UnsupportedFormat(String),

    #[error("Validation error at '{path}': {message}")]
    ValidationError { path: String, message: String },

    #[error("Content error: {0}")]
    ContentError(#[from] ContentError),

    #[error("Theme error: {0}")]
    MergeError(#[from] MergeError),
}

impl ConfigError {
    fn validation(path: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::ValidationError {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Where a configuration was loaded from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigSource {
    /// File path as given
    pub path: String,

    /// SHA-256 digest of the raw file bytes
    pub digest: String,
}

/// The `theme` section
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThemeConfig {
    /// Categories that replace the base category wholesale
    pub overrides: TokenTable,

    /// Partial table deep-merged over the base (`theme.extend`)
    pub extend: TokenTable,
}

/// A validated configuration object
#[derive(Debug, Clone, PartialEq)]
pub struct StyleConfig {
    /// Content globs, in configuration order
    pub content: Vec<String>,

    pub theme: ThemeConfig,

    /// Plugin references, untouched
    pub plugins: Vec<Value>,

    /// Unrecognised top-level keys, untouched
    pub passthrough: Map<String, Value>,
}

impl StyleConfig {
    /// Load a configuration file, choosing the parser by extension.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::load_with_source(path).map(|(config, _)| config)
    }

    /// Load a configuration file and record its provenance.
    pub fn load_with_source(path: &Path) -> Result<(Self, ConfigSource), ConfigError> {
        let bytes = fs::read(path).map_err(|source| ConfigError::IoError {
            path: path.to_path_buf(),
            source,
        })?;

        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        let digest = hex::encode(hasher.finalize());

        let contents = String::from_utf8(bytes)
            .map_err(|e| ConfigError::validation("", format!("Invalid UTF-8: {}", e)))?;

        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        let config = match extension.as_str() {
            "json" => Self::from_json_str(&contents)?,
            "toml" => Self::from_toml_str(&contents)?,
            "" => return Err(ConfigError::UnsupportedFormat("<none>".to_string())),
            other => return Err(ConfigError::UnsupportedFormat(other.to_string())),
        };

        tracing::debug!(path = %path.display(), %digest, "loaded configuration");

        let source = ConfigSource {
            path: path.to_string_lossy().to_string(),
            digest,
        };
        Ok((config, source))
    }

    pub fn from_json_str(contents: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(contents)?;
        Self::from_value(value)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let value: toml::Value = toml::from_str(contents)?;
        Self::from_value(toml_to_json(value))
    }

    /// Validate a parsed configuration object.
    pub fn from_value(value: Value) -> Result<Self, ConfigError> {
        let root = match value {
            Value::Object(map) => map,
            other => {
                return Err(ConfigError::validation(
                    "",
                    format!("expected an object, found {}", json_type_name(&other)),
                ))
            }
        };

        let content = match root.get("content") {
            Some(value) => parse_content(value)?,
            None => return Err(ConfigError::validation("content", "content is required")),
        };

        let theme = match root.get("theme") {
            None | Some(Value::Null) => ThemeConfig::default(),
            Some(value) => parse_theme(value)?,
        };

        let plugins = match root.get("plugins") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items.clone(),
            Some(other) => {
                return Err(ConfigError::validation(
                    "plugins",
                    format!("expected an array, found {}", json_type_name(other)),
                ))
            }
        };

        let passthrough: Map<String, Value> = root
            .into_iter()
            .filter(|(key, _)| !KNOWN_KEYS.contains(&key.as_str()))
            .collect();
        for key in passthrough.keys() {
            tracing::debug!(key = %key, "passing through unrecognised config key");
        }

        Ok(Self {
            content,
            theme,
            plugins,
            passthrough,
        })
    }
}

fn parse_content(value: &Value) -> Result<Vec<String>, ConfigError> {
    let items = value.as_array().ok_or_else(|| {
        ConfigError::validation(
            "content",
            format!("expected an array of strings, found {}", json_type_name(value)),
        )
    })?;

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            item.as_str().map(str::to_string).ok_or_else(|| {
                ConfigError::validation(
                    format!("content[{}]", i),
                    format!("expected a string, found {}", json_type_name(item)),
                )
            })
        })
        .collect()
}

fn parse_theme(value: &Value) -> Result<ThemeConfig, ConfigError> {
    let section = value.as_object().ok_or_else(|| {
        ConfigError::validation(
            "theme",
            format!("expected an object, found {}", json_type_name(value)),
        )
    })?;

    let mut theme = ThemeConfig::default();
    for (key, entry) in section {
        if entry.is_null() {
            continue;
        }
        if !entry.is_object() {
            return Err(ConfigError::validation(
                format!("theme.{}", key),
                format!("expected an object, found {}", json_type_name(entry)),
            ));
        }
        match TokenValue::from_json(entry.clone()) {
            TokenValue::Group(table) if key == "extend" => theme.extend = table,
            group => {
                theme.overrides.insert(key.clone(), group);
            }
        }
    }
    Ok(theme)
}

/// Convert TOML Value to JSON Value
fn toml_to_json(toml: toml::Value) -> Value {
    match toml {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(arr) => Value::Array(arr.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_minimal_config() {
        let config = StyleConfig::from_value(json!({
            "content": ["./**/*.html"],
            "theme": {"extend": {"colors": {"customBlue": "#1e40af"}}},
            "plugins": []
        }))
        .unwrap();

        assert_eq!(config.content, vec!["./**/*.html"]);
        assert_eq!(
            config.theme.extend.get_path("colors.customBlue").unwrap().as_str(),
            Some("#1e40af")
        );
        assert!(config.theme.overrides.is_empty());
        assert!(config.plugins.is_empty());
    }

    #[test]
    fn test_content_required() {
        let err = StyleConfig::from_value(json!({"theme": {}})).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { ref path, .. } if path == "content"));
    }

    #[test]
    fn test_content_must_be_array() {
        let err = StyleConfig::from_value(json!({"content": "src/**/*.html"})).unwrap_err();
        assert!(err.to_string().contains("expected an array of strings, found string"));
    }

    #[test]
    fn test_content_entries_must_be_strings() {
        let err = StyleConfig::from_value(json!({"content": ["a/**", 3]})).unwrap_err();
        match err {
            ConfigError::ValidationError { path, message } => {
                assert_eq!(path, "content[1]");
                assert!(message.contains("number"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_root_must_be_object() {
        let err = StyleConfig::from_value(json!([1, 2])).unwrap_err();
        assert!(err.to_string().contains("found array"));
    }

    #[test]
    fn test_theme_overrides_and_extend() {
        let config = StyleConfig::from_value(json!({
            "content": [],
            "theme": {
                "screens": {"tablet": "640px"},
                "extend": {"spacing": {"128": "32rem"}}
            }
        }))
        .unwrap();

        assert!(config.theme.overrides.get_path("screens.tablet").is_some());
        assert!(!config.theme.overrides.contains_key("extend"));
        assert!(config.theme.extend.get_path("spacing.128").is_some());
    }

    #[test]
    fn test_theme_category_must_be_object() {
        let err = StyleConfig::from_value(json!({
            "content": [],
            "theme": {"colors": "red"}
        }))
        .unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { ref path, .. } if path == "theme.colors"));
    }

    #[test]
    fn test_extend_must_be_object() {
        let err = StyleConfig::from_value(json!({
            "content": [],
            "theme": {"extend": ["colors"]}
        }))
        .unwrap_err();
        assert!(err.to_string().contains("theme.extend"));
    }

    #[test]
    fn test_null_theme_entries_treated_as_absent() {
        let config = StyleConfig::from_value(json!({
            "content": [],
            "theme": {"extend": null, "colors": null},
            "plugins": null
        }))
        .unwrap();

        assert!(config.theme.extend.is_empty());
        assert!(config.theme.overrides.is_empty());
        assert!(config.plugins.is_empty());
    }

    #[test]
    fn test_plugins_must_be_array() {
        let err = StyleConfig::from_value(json!({"content": [], "plugins": "forms"})).unwrap_err();
        assert!(err.to_string().contains("plugins"));
    }

    #[test]
    fn test_passthrough_keys_kept_in_order() {
        let config = StyleConfig::from_value(json!({
            "content": [],
            "prefix": "tw-",
            "darkMode": "class",
            "plugins": [{"name": "forms"}]
        }))
        .unwrap();

        let keys: Vec<&String> = config.passthrough.keys().collect();
        assert_eq!(keys, vec!["prefix", "darkMode"]);
        assert_eq!(config.plugins, vec![json!({"name": "forms"})]);
    }

    #[test]
    fn test_from_toml_str() {
        let config = StyleConfig::from_toml_str(
            r##"
content = ["src/**/*.html"]

[theme.extend.colors]
customBlue = "#1e40af"
"##,
        )
        .unwrap();

        assert_eq!(config.content, vec!["src/**/*.html"]);
        assert_eq!(
            config.theme.extend.get_path("colors.customBlue").unwrap().as_str(),
            Some("#1e40af")
        );
    }

    #[test]
    fn test_load_json_file_with_digest() {
        let mut temp = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(temp, r#"{{"content": ["./**/*.html"]}}"#).unwrap();

        let (config, source) = StyleConfig::load_with_source(temp.path()).unwrap();

        assert_eq!(config.content, vec!["./**/*.html"]);
        assert_eq!(source.digest.len(), 64);
        assert_eq!(source.path, temp.path().to_string_lossy());
    }

    #[test]
    fn test_load_unsupported_extension() {
        let mut temp = tempfile::Builder::new().suffix(".js").tempfile().unwrap();
        writeln!(temp, "module.exports = {{}}").unwrap();

        let err = StyleConfig::load(temp.path()).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(ref ext) if ext == "js"));
    }

    #[test]
    fn test_load_missing_file() {
        let temp = NamedTempFile::new().unwrap();
        let path = temp.path().with_extension("json");

        let err = StyleConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::IoError { .. }));
    }

    #[test]
    fn test_invalid_json() {
        let err = StyleConfig::from_json_str("{ content: ").unwrap_err();
        assert!(matches!(err, ConfigError::JsonError(_)));
    }
}
