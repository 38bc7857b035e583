//! Generator configuration

use builder_types::BuilderSettings;
use serde_derive::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Looked up in the working directory when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "staged-builder.yaml";

#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid config format
    #[error("Invalid config format: {0}")]
    InvalidFormat(#[from] serde_yml::Error),

    /// Indent width outside of 1..=16
    #[error("Invalid indent width {0}, expected a value between 1 and 16")]
    InvalidIndent(usize),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", default)]
pub struct GeneratorConfig {
    /// Builder options applied under every type's own `builder` section
    pub defaults: BuilderSettings,
    /// Spaces per nesting level in emitted Java source
    pub indent: usize,
    pub output_dir: PathBuf,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            defaults: BuilderSettings::default(),
            indent: 4,
            output_dir: PathBuf::from(crate::codegen::OUTPUT_DIR),
        }
    }
}

impl GeneratorConfig {
    /// Load from `path`, or from `staged-builder.yaml` if it exists, or fall back to defaults
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default_path.exists() {
                    debug!("no config file found, using defaults");
                    return Ok(Self::default());
                }
                default_path
            }
        };

        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let config = Self::from_yaml(&content)?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: GeneratorConfig = serde_yml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=16).contains(&self.indent) {
            return Err(ConfigError::InvalidIndent(self.indent));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use builder_types::AccessLevel;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let config = GeneratorConfig::from_yaml("indent: 2\n").unwrap();
        assert_eq!(config.indent, 2);
        assert_eq!(config.output_dir, PathBuf::from("generated"));
        assert!(config.defaults.convenient_methods);
    }

    #[test]
    fn parses_builder_defaults() {
        let yaml = r#"
defaults:
  access: package
  prefix: with
  call-methods: [toString]
output-dir: out/java
"#;
        let config = GeneratorConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.defaults.access, AccessLevel::Package);
        assert_eq!(config.defaults.prefix, "with");
        assert_eq!(config.defaults.call_methods, vec!["toString".to_string()]);
        assert_eq!(config.output_dir, PathBuf::from("out/java"));
    }

    #[test]
    fn rejects_zero_indent() {
        assert_matches!(
            GeneratorConfig::from_yaml("indent: 0\n"),
            Err(ConfigError::InvalidIndent(0))
        );
    }

    #[test]
    fn explicit_path_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.yaml");
        assert_matches!(
            GeneratorConfig::load(Some(&missing)),
            Err(ConfigError::Read { .. })
        );
    }
}
