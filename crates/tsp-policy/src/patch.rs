// patch.rs — Applying a recipient to policy files on disk.

use std::path::{Path, PathBuf};

use crate::config::PolicyConfig;
use crate::error::PolicyError;
use crate::placeholder::patch_content;

/// What happened to one policy file.
#[derive(Debug)]
pub enum PatchOutcome {
    /// The placeholder was found and every matching recipient element now
    /// names the new recipient. `changed` is false when it already did.
    Patched {
        path: PathBuf,
        previous: String,
        replacements: usize,
        changed: bool,
    },
    /// The file has no placeholder value; content untouched.
    Skipped { path: PathBuf },
    /// The file could not be read, parsed, or written.
    Failed {
        path: PathBuf,
        error: PolicyError,
    },
}

impl PatchOutcome {
    pub fn path(&self) -> &Path {
        match self {
            PatchOutcome::Patched { path, .. }
            | PatchOutcome::Skipped { path }
            | PatchOutcome::Failed { path, .. } => path,
        }
    }
}

/// Per-run totals, returned by value.
#[derive(Debug, Default)]
pub struct PatchReport {
    pub outcomes: Vec<PatchOutcome>,
}

impl PatchReport {
    pub fn patched(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, PatchOutcome::Patched { .. }))
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, PatchOutcome::Skipped { .. }))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, PatchOutcome::Failed { .. }))
            .count()
    }

    pub fn replacements(&self) -> usize {
        self.outcomes
            .iter()
            .map(|o| match o {
                PatchOutcome::Patched { replacements, .. } => *replacements,
                _ => 0,
            })
            .sum()
    }
}

/// Rewrite the recipient in one file. Never panics and never aborts a batch:
/// every failure is folded into [`PatchOutcome::Failed`].
pub fn patch_file(path: &Path, recipient: &str, config: &PolicyConfig) -> PatchOutcome {
    match try_patch_file(path, recipient, config) {
        Ok(outcome) => outcome,
        Err(error) => PatchOutcome::Failed {
            path: path.to_path_buf(),
            error,
        },
    }
}

fn try_patch_file(
    path: &Path,
    recipient: &str,
    config: &PolicyConfig,
) -> Result<PatchOutcome, PolicyError> {
    let io_err = |source| PolicyError::Io {
        path: path.to_path_buf(),
        source,
    };

    let content = std::fs::read_to_string(path).map_err(io_err)?;
    let patch = patch_content(
        &content,
        recipient,
        &config.placeholder_element,
        &config.rewrite_elements(),
    )
    .map_err(|e| PolicyError::Xml {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let Some(patch) = patch else {
        tracing::warn!(
            path = %path.display(),
            element = %config.placeholder_element,
            "placeholder not found, skipping"
        );
        return Ok(PatchOutcome::Skipped {
            path: path.to_path_buf(),
        });
    };

    // Unchanged files keep their mtime.
    if patch.changed {
        std::fs::write(path, &patch.content).map_err(io_err)?;
    }

    tracing::info!(
        path = %path.display(),
        previous = %patch.previous,
        replacements = patch.replacements,
        changed = patch.changed,
        "policy patched"
    );

    Ok(PatchOutcome::Patched {
        path: path.to_path_buf(),
        previous: patch.previous,
        replacements: patch.replacements,
        changed: patch.changed,
    })
}

/// Patch every file in order. One file's failure does not stop the rest.
pub fn patch_all(paths: &[PathBuf], recipient: &str, config: &PolicyConfig) -> PatchReport {
    PatchReport {
        outcomes: paths
            .iter()
            .map(|p| patch_file(p, recipient, config))
            .collect(),
    }
}
