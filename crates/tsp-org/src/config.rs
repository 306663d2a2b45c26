//! Platform CLI configuration

use serde::{Deserialize, Serialize};

/// API version assumed when the platform CLI does not report one.
pub const DEFAULT_API_VERSION: &str = "62.0";

/// `[org]` section of tsp.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrgConfig {
    /// Platform CLI binary name or path
    #[serde(default = "default_cli")]
    pub cli: String,

    /// Target alias/username passed as `--target-org`; empty uses the CLI default
    #[serde(default)]
    pub target_org: String,

    /// Upper bound for the deploy wait, in minutes
    #[serde(default = "default_wait_minutes")]
    pub wait_minutes: u64,

    /// Fallback when `apiVersion` is missing from the describe output
    #[serde(default = "default_api_version")]
    pub default_api_version: String,
}

impl Default for OrgConfig {
    fn default() -> Self {
        Self {
            cli: default_cli(),
            target_org: String::new(),
            wait_minutes: default_wait_minutes(),
            default_api_version: default_api_version(),
        }
    }
}

impl OrgConfig {
    pub fn deploy_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.wait_minutes.max(1).saturating_mul(60))
    }
}

// Serde default functions
fn default_cli() -> String {
    "sf".to_string()
}

fn default_wait_minutes() -> u64 {
    10
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}
