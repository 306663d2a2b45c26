//! Policy layout configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// `[policy]` section of tsp.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Policy definitions, relative to the project root
    #[serde(default = "default_policy_dir")]
    pub policy_dir: PathBuf,

    /// Condition-logic (Apex) classes, relative to the project root
    #[serde(default = "default_class_dir")]
    pub class_dir: PathBuf,

    #[serde(default = "default_policy_suffix")]
    pub policy_suffix: String,

    #[serde(default = "default_class_suffix")]
    pub class_suffix: String,

    /// Substring a file must contain to be treated as a policy document
    #[serde(default = "default_marker")]
    pub marker: String,

    /// Element whose first text value is the recipient currently in the file
    #[serde(default = "default_placeholder_element")]
    pub placeholder_element: String,

    /// Elements rewritten when their text equals the current recipient
    #[serde(default = "default_recipient_elements")]
    pub recipient_elements: Vec<String>,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            policy_dir: default_policy_dir(),
            class_dir: default_class_dir(),
            policy_suffix: default_policy_suffix(),
            class_suffix: default_class_suffix(),
            marker: default_marker(),
            placeholder_element: default_placeholder_element(),
            recipient_elements: default_recipient_elements(),
        }
    }
}

impl PolicyConfig {
    pub fn policy_root(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.policy_dir)
    }

    pub fn class_root(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.class_dir)
    }

    /// Every element name that may be rewritten, placeholder first, no duplicates.
    pub fn rewrite_elements(&self) -> Vec<&str> {
        let mut names = vec![self.placeholder_element.as_str()];
        for name in &self.recipient_elements {
            if !names.contains(&name.as_str()) {
                names.push(name);
            }
        }
        names
    }
}

fn default_policy_dir() -> PathBuf {
    PathBuf::from("force-app/main/default/transactionSecurityPolicies")
}

fn default_class_dir() -> PathBuf {
    PathBuf::from("force-app/main/default/classes")
}

fn default_policy_suffix() -> String {
    ".transactionSecurityPolicy-meta.xml".to_string()
}

fn default_class_suffix() -> String {
    ".cls".to_string()
}

fn default_marker() -> String {
    "<TransactionSecurityPolicy".to_string()
}

fn default_placeholder_element() -> String {
    "user".to_string()
}

fn default_recipient_elements() -> Vec<String> {
    vec!["user".to_string(), "executionUser".to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewrite_elements_dedupes_placeholder() {
        let config = PolicyConfig::default();
        assert_eq!(config.rewrite_elements(), vec!["user", "executionUser"]);
    }

    #[test]
    fn rewrite_elements_always_include_placeholder() {
        let config = PolicyConfig {
            recipient_elements: vec!["executionUser".into()],
            ..PolicyConfig::default()
        };
        assert_eq!(config.rewrite_elements(), vec!["user", "executionUser"]);
    }
}
