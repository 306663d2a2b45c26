// error.rs — Fatal errors of a deploy run.

use thiserror::Error;
use tsp_org::OrgError;
use tsp_policy::PolicyError;

/// Conditions that end a run with a non-zero exit. Operator aborts are not
/// errors and never show up here.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Prerequisite check or target resolution failed; nothing was touched.
    #[error(transparent)]
    Target(#[from] OrgError),

    /// The policy directory is missing or cannot be scanned.
    #[error(transparent)]
    Discovery(#[from] PolicyError),

    /// The platform rejected the deploy. Patched files stay patched.
    #[error("deployment failed: {0}")]
    Deploy(#[source] OrgError),

    /// Reading the operator's answer failed.
    #[error("cannot read confirmation: {0}")]
    Prompt(#[from] std::io::Error),
}

impl PipelineError {
    /// Whether the run already showed this error to the operator on the console.
    pub fn is_reported(&self) -> bool {
        !matches!(self, PipelineError::Prompt(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn only_prompt_failures_are_unreported() {
        let target = PipelineError::Target(OrgError::MalformedResponse {
            reason: "no result".into(),
        });
        let discovery = PipelineError::Discovery(PolicyError::DirectoryMissing {
            path: PathBuf::from("policies"),
        });
        let prompt = PipelineError::Prompt(std::io::Error::from(std::io::ErrorKind::UnexpectedEof));

        assert!(target.is_reported());
        assert!(discovery.is_reported());
        assert!(!prompt.is_reported());
    }
}
