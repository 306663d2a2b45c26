//! Core OrgAdapter trait and result types

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while talking to the deployment platform
#[derive(Debug, Error)]
pub enum OrgError {
    #[error("required tool '{tool}' not found on PATH. Install it with: {install_hint}")]
    PrerequisiteMissing { tool: String, install_hint: String },

    #[error("`{command}` exited with status {status}: {cause}\n  fix: {remediation}")]
    ExternalTool {
        command: String,
        status: i32,
        cause: String,
        remediation: String,
    },

    #[error("malformed response from platform CLI: {reason}")]
    MalformedResponse { reason: String },

    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, OrgError>;

/// Identity of the authenticated deployment target. Immutable once resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentContext {
    pub instance_url: String,
    pub username: String,
    pub api_version: String,
    /// Local alias for the target; empty when none is set.
    #[serde(default)]
    pub alias: String,
}

impl EnvironmentContext {
    /// Alias when present, otherwise the username.
    pub fn display_name(&self) -> &str {
        if self.alias.is_empty() {
            &self.username
        } else {
            &self.alias
        }
    }
}

/// Result of a deploy operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeployResult {
    /// Source directories handed to the platform
    pub deployed: Vec<PathBuf>,

    /// Human-readable message
    pub message: String,

    /// Adapter-specific metadata
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

/// Pluggable adapter over the deployment platform's CLI
///
/// The patch pipeline only needs two things from the platform: who is the
/// current default target, and "push these directories". Keeping that
/// surface this narrow lets tests swap in [`crate::StaticOrgAdapter`].
pub trait OrgAdapter: Send + Sync {
    /// Verify that everything the adapter shells out to is installed
    fn check_prerequisites(&self) -> Result<()>;

    /// Describe the caller's currently-authenticated default target
    fn describe_default_target(&self) -> Result<EnvironmentContext>;

    /// Deploy the given source directories, waiting at most `timeout`
    ///
    /// All-or-nothing from the caller's point of view: any failure reported
    /// by the platform is an error. Partial platform state is not managed.
    fn deploy_sources(&self, paths: &[PathBuf], timeout: Duration) -> Result<DeployResult>;

    /// Adapter display name (for CLI output)
    fn name(&self) -> &str;
}
