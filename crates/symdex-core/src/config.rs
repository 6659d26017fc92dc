//! Configuration for symdex.
//!
//! Loads/saves a TOML config at `~/.symdex/config.toml`.

use crate::SymdexError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level symdex configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SymdexConfig {
    pub index: IndexConfig,
    pub search: SearchConfig,
    pub refactor: RefactorConfig,
}

impl SymdexConfig {
    /// Load configuration from the given path.
    pub fn load(path: &Path) -> Result<Self, SymdexError> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| SymdexError::Config(e.to_string()))
    }

    /// Save configuration to the given path.
    pub fn save(&self, path: &Path) -> Result<(), SymdexError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| SymdexError::Config(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load from the default path, or return defaults if the file doesn't exist.
    pub fn load_or_default() -> Self {
        let path = Self::default_path();
        if path.exists() {
            Self::load(&path).unwrap_or_default()
        } else {
            Self::default()
        }
    }

    /// Default config path: `~/.symdex/config.toml`.
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".symdex")
            .join("config.toml")
    }
}

/// Indexing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Length of the most-recently-indexed list used for ranking.
    pub max_recent_files: usize,
    /// File extensions picked up by directory indexing.
    pub extensions: Vec<String>,
    /// Honour `.gitignore` and skip hidden files when walking a directory.
    pub respect_gitignore: bool,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            max_recent_files: 1000,
            extensions: ["ts", "tsx", "js", "jsx", "py", "rs"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            respect_gitignore: true,
        }
    }
}

/// Search configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Result limit when a search does not specify one.
    pub max_results: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { max_results: 50 }
    }
}

/// Refactoring configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RefactorConfig {
    /// Indentation added to the body of an extracted function.
    pub indent_unit: String,
    /// Argument placeholder written at extract call sites.
    pub placeholder: String,
}

impl Default for RefactorConfig {
    fn default() -> Self {
        Self {
            indent_unit: "  ".to_string(),
            placeholder: "_".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrips_through_toml() {
        let config = SymdexConfig::default();
        let toml_str =
            toml::to_string_pretty(&config).expect("default config should serialize to TOML");
        let parsed: SymdexConfig =
            toml::from_str(&toml_str).expect("serialized TOML should parse back");
        assert_eq!(parsed.index.max_recent_files, 1000);
        assert_eq!(parsed.search.max_results, 50);
        assert_eq!(parsed.refactor.placeholder, "_");
    }

    #[test]
    fn load_nonexistent_returns_error() {
        let result = SymdexConfig::load(Path::new("/tmp/nonexistent_symdex_config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = std::env::temp_dir().join("symdex_config_test");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("config.toml");

        let mut config = SymdexConfig::default();
        config.index.max_recent_files = 2;
        config.refactor.indent_unit = "    ".to_string();

        config.save(&path).expect("save should succeed");
        let loaded = SymdexConfig::load(&path).expect("load should succeed");

        assert_eq!(loaded.index.max_recent_files, 2);
        assert_eq!(loaded.refactor.indent_unit, "    ");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn default_path_ends_with_config_toml() {
        let path = SymdexConfig::default_path();
        assert!(path.ends_with("config.toml"));
    }

    #[test]
    fn partial_toml_uses_defaults_for_missing_fields() {
        let partial = r#"
[search]
max_results = 10
"#;
        let config: SymdexConfig = toml::from_str(partial).expect("partial TOML should parse");
        assert_eq!(config.search.max_results, 10);
        assert_eq!(config.index.max_recent_files, 1000);
        assert!(config.index.extensions.iter().any(|e| e == "rs"));
    }

    #[test]
    fn malformed_toml_is_config_error() {
        let dir = std::env::temp_dir().join("symdex_config_bad_test");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "[index\nmax_recent_files = ").unwrap();

        let err = SymdexConfig::load(&path).unwrap_err();
        assert!(matches!(err, SymdexError::Config(_)));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
