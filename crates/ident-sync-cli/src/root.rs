use anyhow::Context;
use ident_sync_core::SyncConfig;
use std::path::{Path, PathBuf};

/// Build the run configuration from `--root` / `GITTOP` and `--git`.
///
/// Unlike most git tools this does not search upward from the current
/// directory: the checkout to patch must be named explicitly.
pub fn load_config(root: Option<&Path>, git: Option<PathBuf>) -> anyhow::Result<SyncConfig> {
    let config = SyncConfig::from_optional_root(root).context("cannot resolve repository")?;
    Ok(config.with_git_bin(git))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn explicit_root_is_canonicalized() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join(".git")).unwrap();
        let config = load_config(Some(dir.path()), None).unwrap();
        assert_eq!(config.repo_root, dir.path().canonicalize().unwrap());
    }

    #[test]
    fn missing_root_fails() {
        let err = load_config(None, None).unwrap_err();
        assert!(format!("{err:#}").contains("GITTOP"));
    }

    #[test]
    fn git_override_is_kept() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join(".git")).unwrap();
        let config = load_config(Some(dir.path()), Some(PathBuf::from("/opt/git"))).unwrap();
        assert_eq!(config.git_bin, Some(PathBuf::from("/opt/git")));
    }
}
