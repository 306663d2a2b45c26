// discovery.rs — Finding policy documents under the policy directory.

use std::path::{Path, PathBuf};

use crate::config::PolicyConfig;
use crate::error::PolicyError;

/// Files found by a discovery scan, sorted by path.
#[derive(Debug, Clone, Default)]
pub struct Discovery {
    /// Every file with the policy suffix.
    pub candidates: Vec<PathBuf>,
    /// Candidates whose content carries the policy marker.
    pub policies: Vec<PathBuf>,
}

impl Discovery {
    /// Candidates that were excluded from the patch set.
    pub fn unmarked(&self) -> impl Iterator<Item = &PathBuf> {
        self.candidates
            .iter()
            .filter(move |p| !self.policies.contains(*p))
    }
}

/// List files under `dir` (recursively) whose name ends with `suffix`.
fn files_with_suffix(dir: &Path, suffix: &str) -> Result<Vec<PathBuf>, PolicyError> {
    let pattern = format!(
        "{}/**/*{}",
        glob::Pattern::escape(&dir.to_string_lossy()),
        glob::Pattern::escape(suffix)
    );
    let paths = glob::glob(&pattern).map_err(|e| PolicyError::InvalidPattern {
        pattern: pattern.clone(),
        reason: e.to_string(),
    })?;

    let mut files: Vec<PathBuf> = paths
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable path during discovery");
                None
            }
        })
        .filter(|path| path.is_file())
        .collect();
    files.sort();
    Ok(files)
}

/// Scan the policy directory for policy documents.
///
/// A missing directory is an error. An empty result is not: the caller decides
/// whether zero policies is worth a warning. Files that cannot be read are
/// logged and left out of the patch set.
pub fn discover(project_root: &Path, config: &PolicyConfig) -> Result<Discovery, PolicyError> {
    let dir = config.policy_root(project_root);
    if !dir.is_dir() {
        return Err(PolicyError::DirectoryMissing { path: dir });
    }

    let candidates = files_with_suffix(&dir, &config.policy_suffix)?;
    let mut policies = Vec::new();

    for path in &candidates {
        match std::fs::read_to_string(path) {
            Ok(content) if content.contains(&config.marker) => policies.push(path.clone()),
            Ok(_) => {
                tracing::debug!(path = %path.display(), "no policy marker, excluded from patching");
            }
            Err(source) => {
                let err = PolicyError::Io {
                    path: path.clone(),
                    source,
                };
                tracing::warn!(error = %err, "excluded from patching");
            }
        }
    }

    tracing::info!(
        candidates = candidates.len(),
        policies = policies.len(),
        dir = %dir.display(),
        "policy discovery finished"
    );

    Ok(Discovery {
        candidates,
        policies,
    })
}

/// Count files with `suffix` under `dir`. Any scan failure counts as zero.
pub fn count_files(dir: &Path, suffix: &str) -> usize {
    if !dir.is_dir() {
        return 0;
    }
    files_with_suffix(dir, suffix).map(|f| f.len()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const SUFFIX: &str = ".transactionSecurityPolicy-meta.xml";

    fn project() -> (TempDir, PolicyConfig) {
        let dir = TempDir::new().unwrap();
        let config = PolicyConfig::default();
        fs::create_dir_all(config.policy_root(dir.path())).unwrap();
        (dir, config)
    }

    fn write_policy(root: &Path, config: &PolicyConfig, name: &str, body: &str) -> PathBuf {
        let path = config.policy_root(root).join(format!("{}{}", name, SUFFIX));
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn finds_marked_policies_sorted() {
        let (dir, config) = project();
        let b = write_policy(dir.path(), &config, "b", "<TransactionSecurityPolicy/>");
        let a = write_policy(dir.path(), &config, "a", "<TransactionSecurityPolicy/>");
        fs::write(config.policy_root(dir.path()).join("README.md"), "<TransactionSecurityPolicy").unwrap();

        let found = discover(dir.path(), &config).unwrap();
        assert_eq!(found.policies, vec![a, b]);
        assert_eq!(found.candidates.len(), 2);
    }

    #[test]
    fn unmarked_files_are_candidates_only() {
        let (dir, config) = project();
        write_policy(dir.path(), &config, "real", "<TransactionSecurityPolicy/>");
        let other = write_policy(dir.path(), &config, "other", "<SomethingElse/>");

        let found = discover(dir.path(), &config).unwrap();
        assert_eq!(found.policies.len(), 1);
        assert_eq!(found.unmarked().collect::<Vec<_>>(), vec![&other]);
    }

    #[test]
    fn nested_directories_are_scanned() {
        let (dir, config) = project();
        let nested = config.policy_root(dir.path()).join("team");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join(format!("x{}", SUFFIX)), "<TransactionSecurityPolicy/>").unwrap();

        assert_eq!(discover(dir.path(), &config).unwrap().policies.len(), 1);
    }

    #[test]
    fn empty_directory_is_not_an_error() {
        let (dir, config) = project();
        let found = discover(dir.path(), &config).unwrap();
        assert!(found.policies.is_empty());
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = discover(dir.path(), &PolicyConfig::default()).unwrap_err();
        assert!(matches!(err, PolicyError::DirectoryMissing { .. }));
    }

    #[test]
    fn count_files_tolerates_missing_dir() {
        let dir = TempDir::new().unwrap();
        assert_eq!(count_files(&dir.path().join("nope"), ".cls"), 0);

        fs::write(dir.path().join("A.cls"), "").unwrap();
        fs::write(dir.path().join("A.cls-meta.xml"), "").unwrap();
        assert_eq!(count_files(dir.path(), ".cls"), 1);
    }
}
