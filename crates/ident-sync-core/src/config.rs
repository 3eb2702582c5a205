use crate::error::{Result, SyncError};
use crate::paths;
use std::path::{Path, PathBuf};

pub const DEFAULT_REVISION: &str = "HEAD";

/// Inputs for one synchronization run.
///
/// Built once by the caller and passed down explicitly; nothing here is read
/// from the process environment.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub repo_root: PathBuf,
    /// Revision that expanded files are restored from.
    pub revision: String,
    /// Explicit git executable. `None` resolves `git` on PATH.
    pub git_bin: Option<PathBuf>,
}

impl SyncConfig {
    /// Canonicalize `root` and check it is a git working tree.
    pub fn new(root: &Path) -> Result<Self> {
        let repo_root = root
            .canonicalize()
            .map_err(|_| SyncError::NotARepository(root.to_path_buf()))?;
        if !paths::git_dir(&repo_root).is_dir() {
            return Err(SyncError::NotARepository(repo_root));
        }
        Ok(Self {
            repo_root,
            revision: DEFAULT_REVISION.to_string(),
            git_bin: None,
        })
    }

    /// Like [`SyncConfig::new`], but a missing root is an error.
    pub fn from_optional_root(root: Option<&Path>) -> Result<Self> {
        match root {
            Some(r) if !r.as_os_str().is_empty() => Self::new(r),
            _ => Err(SyncError::RootNotSet),
        }
    }

    pub fn with_revision(mut self, revision: impl Into<String>) -> Self {
        self.revision = revision.into();
        self
    }

    pub fn with_git_bin(mut self, git_bin: Option<PathBuf>) -> Self {
        self.git_bin = git_bin;
        self
    }

    pub fn info_attributes_path(&self) -> PathBuf {
        paths::info_attributes_path(&self.repo_root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn new_accepts_directory_with_git_dir() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join(".git")).unwrap();
        let config = SyncConfig::new(dir.path()).unwrap();
        assert_eq!(config.repo_root, dir.path().canonicalize().unwrap());
        assert_eq!(config.revision, "HEAD");
        assert!(config.git_bin.is_none());
    }

    #[test]
    fn new_rejects_plain_directory() {
        let dir = TempDir::new().unwrap();
        let err = SyncConfig::new(dir.path()).unwrap_err();
        assert!(matches!(err, SyncError::NotARepository(_)));
        assert!(err.to_string().contains("does not look like a git repo"));
    }

    #[test]
    fn new_rejects_git_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(".git"), "gitdir: elsewhere\n").unwrap();
        assert!(matches!(
            SyncConfig::new(dir.path()),
            Err(SyncError::NotARepository(_))
        ));
    }

    #[test]
    fn new_rejects_missing_path() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            SyncConfig::new(&dir.path().join("missing")),
            Err(SyncError::NotARepository(_))
        ));
    }

    #[test]
    fn missing_root_is_root_not_set() {
        assert!(matches!(
            SyncConfig::from_optional_root(None),
            Err(SyncError::RootNotSet)
        ));
        assert!(matches!(
            SyncConfig::from_optional_root(Some(Path::new(""))),
            Err(SyncError::RootNotSet)
        ));
    }

    #[test]
    fn builder_setters() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join(".git")).unwrap();
        let config = SyncConfig::new(dir.path())
            .unwrap()
            .with_revision("main")
            .with_git_bin(Some(PathBuf::from("/usr/bin/git")));
        assert_eq!(config.revision, "main");
        assert_eq!(config.git_bin.as_deref(), Some(Path::new("/usr/bin/git")));
        assert!(config
            .info_attributes_path()
            .ends_with(".git/info/attributes"));
    }
}
