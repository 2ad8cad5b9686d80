//! Start-up configuration for the scheme checker.
//!
//! Defines the YAML file that seeds the registry with custom schemes and
//! sets the initial relative-reference flag.
//!
//! # Example YAML
//!
//! ```yaml
//! version: "1.0"
//! relative: false
//! custom_schemes:
//!   - git
//!   - ssh
//! ```

use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use uri_scheme_core::{SchemeError, SchemeRegistry};

/// Errors raised while loading or applying a [`SchemeConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A configured scheme could not be registered.
    #[error("scheme error: {0}")]
    Scheme(#[from] SchemeError),
}

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemeConfig {
    /// Configuration format version (e.g., `"1.0"`).
    #[serde(default)]
    pub version: String,
    /// Initial relative-reference flag.
    #[serde(default)]
    pub relative: bool,
    /// Schemes appended to the registry after the built-ins.
    #[serde(default)]
    pub custom_schemes: Vec<String>,
}

impl SchemeConfig {
    /// Loads configuration from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config = serde_yaml::from_reader(reader)?;
        Ok(config)
    }

    /// Builds a registry holding the built-ins plus every custom scheme.
    ///
    /// Fails on the first scheme that duplicates an existing record.
    pub fn build_registry(&self) -> Result<SchemeRegistry, ConfigError> {
        let mut registry = SchemeRegistry::new();
        for scheme in &self.custom_schemes {
            let record = registry.add(scheme)?;
            debug!(id = record.id(), value = record.value(), "registered configured scheme");
        }
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_yaml() -> &'static str {
        r#"
version: "1.0"
relative: true
custom_schemes:
  - git
  - ssh
"#
    }

    #[test]
    fn test_deserialize_complete() {
        let config: SchemeConfig = serde_yaml::from_str(sample_yaml()).unwrap();
        assert_eq!(config.version, "1.0");
        assert!(config.relative);
        assert_eq!(config.custom_schemes, vec!["git", "ssh"]);
    }

    #[test]
    fn test_deserialize_minimal() {
        let config: SchemeConfig = serde_yaml::from_str("version: \"1.0\"\n").unwrap();
        assert!(!config.relative);
        assert!(config.custom_schemes.is_empty());
    }

    #[test]
    fn test_build_registry_appends_custom_schemes() {
        let config: SchemeConfig = serde_yaml::from_str(sample_yaml()).unwrap();
        let registry = config.build_registry().unwrap();
        assert_eq!(registry.len(), 12);
        assert_eq!(registry.find_by_value("SSH").map(|r| r.id()), Some(11));
    }

    #[test]
    fn test_build_registry_rejects_builtin_duplicate() {
        let config = SchemeConfig {
            custom_schemes: vec!["Mailto".to_string()],
            ..SchemeConfig::default()
        };
        assert!(matches!(
            config.build_registry(),
            Err(ConfigError::Scheme(SchemeError::DuplicateScheme(_)))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = std::env::temp_dir().join(format!("uri_scheme_config_load_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("schemes.yml");
        std::fs::write(&path, sample_yaml()).unwrap();

        let loaded = SchemeConfig::load(&path).unwrap();
        assert_eq!(loaded.custom_schemes, vec!["git", "ssh"]);
        assert!(loaded.relative);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_missing_file() {
        let err = SchemeConfig::load("/nonexistent/uri-scheme/config.yml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
