// pipeline.rs — One deploy run: resolve, discover, confirm, patch, deploy, summarize.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tsp_org::{resolve_recipient, EnvironmentContext, OrgAdapter};
use tsp_policy::{count_files, discover, patch_all, PatchOutcome, PatchReport};

use crate::config::DeployConfig;
use crate::console::Console;
use crate::error::PipelineError;

const STEPS: usize = 5;

/// How a run ended without error.
#[derive(Debug)]
pub enum RunOutcome {
    /// The operator declined at the confirmation prompt. No file was touched.
    Aborted,
    Completed(RunSummary),
}

/// Everything the final report shows.
#[derive(Debug)]
pub struct RunSummary {
    pub target: EnvironmentContext,
    pub recipient: String,
    pub report: PatchReport,
    pub deploy_message: String,
    /// Policy documents present after the deploy
    pub policies_deployed: usize,
    /// Condition-logic classes present after the deploy
    pub classes_deployed: usize,
    pub finished_at: DateTime<Utc>,
}

pub struct Pipeline<'a> {
    project_root: PathBuf,
    config: DeployConfig,
    adapter: &'a dyn OrgAdapter,
    console: Console,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        project_root: impl Into<PathBuf>,
        config: DeployConfig,
        adapter: &'a dyn OrgAdapter,
        console: Console,
    ) -> Self {
        Self {
            project_root: project_root.into(),
            config,
            adapter,
            console,
        }
    }

    /// Run every step in order. Fatal conditions return `Err` immediately;
    /// declining the prompt returns `Ok(RunOutcome::Aborted)`.
    pub fn run(&self, recipient_override: Option<&str>) -> Result<RunOutcome, PipelineError> {
        self.console.header("Transaction Security Policy deploy");

        let (target, recipient) = self.resolve(recipient_override)?;

        self.console.step(1, STEPS, "Discovering policy files");
        let policies = self.discover()?;

        self.console.step(2, STEPS, "Confirming target");
        if !self.confirm(&target, &recipient, policies.len())? {
            tracing::info!("run aborted at confirmation");
            self.console.warn("Aborted. No files were changed.");
            return Ok(RunOutcome::Aborted);
        }

        self.console.step(3, STEPS, "Patching notification recipient");
        let report = self.patch(&policies, &recipient);

        self.console.step(4, STEPS, "Deploying to target");
        let deploy_message = self.deploy()?;

        self.console.step(5, STEPS, "Summary");
        let summary = self.summarize(target, recipient, report, deploy_message);
        Ok(RunOutcome::Completed(summary))
    }

    fn resolve(
        &self,
        recipient_override: Option<&str>,
    ) -> Result<(EnvironmentContext, String), PipelineError> {
        self.console.info("Checking prerequisites");
        if let Err(e) = self.adapter.check_prerequisites() {
            self.console.error(&e.to_string());
            return Err(e.into());
        }

        self.console.info("Resolving default target");
        let target = match self.adapter.describe_default_target() {
            Ok(target) => target,
            Err(e) => {
                self.console.error(&e.to_string());
                return Err(e.into());
            }
        };
        tracing::info!(
            adapter = self.adapter.name(),
            username = %target.username,
            instance_url = %target.instance_url,
            "target resolved"
        );

        let recipient = resolve_recipient(recipient_override, &target);
        self.console
            .success(&format!("Connected to {}", target.display_name()));
        Ok((target, recipient))
    }

    fn discover(&self) -> Result<Vec<PathBuf>, PipelineError> {
        let policy = &self.config.policy;
        let found = match discover(&self.project_root, policy) {
            Ok(found) => found,
            Err(e) => {
                self.console.error(&e.to_string());
                return Err(e.into());
            }
        };

        for path in found.unmarked() {
            self.console.warn(&format!(
                "{}: not a policy document, deployed but not patched",
                self.relative(path)
            ));
        }

        if found.policies.is_empty() {
            self.console.warn(&format!(
                "No policy files found in {}; continuing with deploy",
                policy.policy_dir.display()
            ));
        } else {
            self.console
                .info(&format!("Found {} policy file(s)", found.policies.len()));
        }
        Ok(found.policies)
    }

    fn confirm(
        &self,
        target: &EnvironmentContext,
        recipient: &str,
        policy_count: usize,
    ) -> Result<bool, PipelineError> {
        self.console.field("Instance URL", &target.instance_url);
        self.console.field("Username", &target.username);
        if !target.alias.is_empty() {
            self.console.field("Alias", &target.alias);
        }
        self.console.field("API version", &target.api_version);
        self.console.field("Recipient", recipient);
        self.console.field("Policies", &policy_count.to_string());
        Ok(self
            .console
            .confirm("Patch and deploy to this target?")?)
    }

    fn patch(&self, policies: &[PathBuf], recipient: &str) -> PatchReport {
        let report = patch_all(policies, recipient, &self.config.policy);

        for outcome in &report.outcomes {
            let name = self.relative(outcome.path());
            match outcome {
                PatchOutcome::Patched {
                    previous,
                    replacements,
                    changed: true,
                    ..
                } => self.console.success(&format!(
                    "{}: {} -> {} ({} replacement(s))",
                    name, previous, recipient, replacements
                )),
                PatchOutcome::Patched { replacements, .. } => self.console.success(&format!(
                    "{}: already set to {} ({} occurrence(s))",
                    name, recipient, replacements
                )),
                PatchOutcome::Skipped { .. } => self.console.warn(&format!(
                    "{}: no <{}> element found, skipped",
                    name, self.config.policy.placeholder_element
                )),
                PatchOutcome::Failed { error, .. } => {
                    tracing::warn!(error = %error, "policy not patched");
                    self.console.error(&format!("{}: {}", name, error));
                }
            }
        }
        report
    }

    fn deploy(&self) -> Result<String, PipelineError> {
        let policy_root = self.config.policy.policy_root(&self.project_root);
        let class_root = self.config.policy.class_root(&self.project_root);

        let mut sources = vec![policy_root];
        if class_root.is_dir() {
            sources.push(class_root);
        } else {
            self.console.warn(&format!(
                "{} not found; deploying policies only",
                self.config.policy.class_dir.display()
            ));
        }

        let timeout = self.config.org.deploy_timeout();
        self.console.info(&format!(
            "Deploying {} source dir(s) via {} (wait up to {} min)",
            sources.len(),
            self.adapter.name(),
            timeout.as_secs() / 60
        ));

        match self.adapter.deploy_sources(&sources, timeout) {
            Ok(result) => {
                self.console.success(&result.message);
                Ok(result.message)
            }
            Err(e) => {
                self.console.error(&format!("Deployment failed: {}", e));
                self.console
                    .warn("Patched policy files were left in place.");
                Err(PipelineError::Deploy(e))
            }
        }
    }

    fn summarize(
        &self,
        target: EnvironmentContext,
        recipient: String,
        report: PatchReport,
        deploy_message: String,
    ) -> RunSummary {
        let policy = &self.config.policy;
        let summary = RunSummary {
            policies_deployed: count_files(
                &policy.policy_root(&self.project_root),
                &policy.policy_suffix,
            ),
            classes_deployed: count_files(
                &policy.class_root(&self.project_root),
                &policy.class_suffix,
            ),
            target,
            recipient,
            report,
            deploy_message,
            finished_at: Utc::now(),
        };

        self.console
            .success(&format!("{} policy file(s) updated.", summary.report.patched()));
        if summary.report.skipped() > 0 {
            self.console.warn(&format!(
                "{} policy file(s) skipped (no placeholder).",
                summary.report.skipped()
            ));
        }
        if summary.report.failed() > 0 {
            self.console.warn(&format!(
                "{} policy file(s) could not be patched.",
                summary.report.failed()
            ));
        }
        self.console.field("Target", &summary.target.instance_url);
        self.console.field("Recipient", &summary.recipient);
        self.console
            .field("Policies", &summary.policies_deployed.to_string());
        self.console
            .field("Classes", &summary.classes_deployed.to_string());
        self.console.field(
            "Finished",
            &summary.finished_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        );
        self.console.info(
            "Review the policies in Setup > Transaction Security Policies and activate as needed.",
        );

        tracing::info!(
            patched = summary.report.patched(),
            skipped = summary.report.skipped(),
            failed = summary.report.failed(),
            replacements = summary.report.replacements(),
            "run complete"
        );
        summary
    }

    fn relative(&self, path: &Path) -> String {
        path.strip_prefix(&self.project_root)
            .unwrap_or(path)
            .display()
            .to_string()
    }
}
