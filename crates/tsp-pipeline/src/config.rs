//! Deploy configuration structures

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tsp_org::OrgConfig;
use tsp_policy::PolicyConfig;

/// Config file name, looked up in the project root.
pub const CONFIG_FILE: &str = "tsp.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

/// Top-level configuration from tsp.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeployConfig {
    /// Platform CLI configuration
    #[serde(default)]
    pub org: OrgConfig,

    /// Policy layout configuration
    #[serde(default)]
    pub policy: PolicyConfig,

    /// Display / output configuration
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Display / output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Enable ANSI color output. Still off when stdout is not a terminal
    /// or NO_COLOR is set.
    #[serde(default = "default_color")]
    pub color: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: default_color(),
        }
    }
}

fn default_color() -> bool {
    true
}

impl DeployConfig {
    /// Load config from a tsp.toml file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Load `<project_root>/tsp.toml`, falling back to defaults when the file
    /// is absent or unusable
    pub fn load_or_default(project_root: &Path) -> Self {
        let path = project_root.join(CONFIG_FILE);
        if !path.exists() {
            return Self::default();
        }
        match Self::load(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(error = %e, "ignoring config file, using defaults");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = DeployConfig::load_or_default(dir.path());
        assert_eq!(config.org.cli, "sf");
        assert_eq!(config.policy.placeholder_element, "user");
        assert!(config.display.color);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "[org]\ntarget_org = \"acme-prod\"\nwait_minutes = 30\n\n[display]\ncolor = false\n",
        )
        .unwrap();

        let config = DeployConfig::load_or_default(dir.path());
        assert_eq!(config.org.target_org, "acme-prod");
        assert_eq!(config.org.wait_minutes, 30);
        assert_eq!(config.org.cli, "sf");
        assert!(!config.display.color);
        assert_eq!(
            config.policy.recipient_elements,
            vec!["user".to_string(), "executionUser".to_string()]
        );
    }

    #[test]
    fn invalid_file_is_an_error_but_load_or_default_recovers() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[org\ncli = ").unwrap();

        assert!(matches!(
            DeployConfig::load(&path),
            Err(ConfigError::Parse { .. })
        ));
        assert_eq!(DeployConfig::load_or_default(dir.path()).org.cli, "sf");
    }
}
