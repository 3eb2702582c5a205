use crate::error::Result;
use crate::vcs::Vcs;
use std::path::Path;

/// Replace each working-tree copy in `files` with its content at `revision`.
///
/// Regular files and symlinks are deleted first so git rewrites them with
/// ident expansion off. Paths occupied by anything else are skipped. The
/// first failed restore aborts and names the path.
pub fn refresh(
    repo_root: &Path,
    vcs: &dyn Vcs,
    revision: &str,
    files: &[String],
) -> Result<Vec<String>> {
    let mut refreshed = Vec::with_capacity(files.len());
    for rel in files {
        let target = repo_root.join(rel);
        match std::fs::symlink_metadata(&target) {
            Ok(meta) if meta.is_file() || meta.file_type().is_symlink() => {
                std::fs::remove_file(&target)?;
            }
            Ok(_) => {
                tracing::warn!(path = %rel, "not a file on disk; skipping refresh");
                continue;
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        vcs.restore_from_revision(revision, rel)?;
        tracing::debug!(path = %rel, "refreshed");
        refreshed.push(rel.clone());
    }
    Ok(refreshed)
}
