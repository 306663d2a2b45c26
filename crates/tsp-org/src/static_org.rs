//! In-process adapter with a fixed target and recorded deploys

use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use crate::adapter::{DeployResult, EnvironmentContext, OrgAdapter, OrgError, Result};

/// A single recorded `deploy_sources` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployCall {
    pub paths: Vec<PathBuf>,
    pub timeout: Duration,
}

/// Adapter that never leaves the process
///
/// Returns a fixed EnvironmentContext and records every deploy request.
/// Prerequisite, describe and deploy failures can be scripted, which is what the pipeline
/// tests use to exercise the fail-fast paths.
pub struct StaticOrgAdapter {
    context: EnvironmentContext,
    missing_tool: Option<String>,
    describe_status: Option<i32>,
    deploy_status: Option<i32>,
    calls: Mutex<Vec<DeployCall>>,
}

impl StaticOrgAdapter {
    pub fn new(context: EnvironmentContext) -> Self {
        Self {
            context,
            missing_tool: None,
            describe_status: None,
            deploy_status: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Make `check_prerequisites` report `tool` as not installed
    pub fn failing_prerequisites(mut self, tool: impl Into<String>) -> Self {
        self.missing_tool = Some(tool.into());
        self
    }

    /// Make `describe_default_target` fail as if the CLI exited with `status`
    pub fn failing_describe(mut self, status: i32) -> Self {
        self.describe_status = Some(status);
        self
    }

    /// Make `deploy_sources` fail as if the CLI exited with `status`
    pub fn failing_deploy(mut self, status: i32) -> Self {
        self.deploy_status = Some(status);
        self
    }

    /// Deploy calls seen so far
    pub fn deploy_calls(&self) -> Vec<DeployCall> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

impl OrgAdapter for StaticOrgAdapter {
    fn check_prerequisites(&self) -> Result<()> {
        match &self.missing_tool {
            Some(tool) => Err(OrgError::PrerequisiteMissing {
                tool: tool.clone(),
                install_hint: format!("install {} and retry", tool),
            }),
            None => Ok(()),
        }
    }

    fn describe_default_target(&self) -> Result<EnvironmentContext> {
        if let Some(status) = self.describe_status {
            return Err(OrgError::ExternalTool {
                command: "static org display".to_string(),
                status,
                cause: "no default target org".to_string(),
                remediation: "configure a target".to_string(),
            });
        }
        Ok(self.context.clone())
    }

    fn deploy_sources(&self, paths: &[PathBuf], timeout: Duration) -> Result<DeployResult> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(DeployCall {
                paths: paths.to_vec(),
                timeout,
            });
        }

        if let Some(status) = self.deploy_status {
            tracing::debug!("StaticOrgAdapter: scripted deploy failure");
            return Err(OrgError::ExternalTool {
                command: "static deploy".to_string(),
                status,
                cause: "deploy rejected".to_string(),
                remediation: "none".to_string(),
            });
        }

        tracing::debug!("StaticOrgAdapter: deploy_sources() - recorded");
        Ok(DeployResult {
            deployed: paths.to_vec(),
            message: format!("Recorded deploy of {} source dir(s)", paths.len()),
            metadata: Default::default(),
        })
    }

    fn name(&self) -> &str {
        "static"
    }
}
