use std::path::{Component, Path, PathBuf};

// ---------------------------------------------------------------------------
// Repository layout constants
// ---------------------------------------------------------------------------

pub const GIT_DIR: &str = ".git";
pub const GITATTRIBUTES: &str = ".gitattributes";
pub const INFO_ATTRIBUTES: &str = ".git/info/attributes";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn git_dir(root: &Path) -> PathBuf {
    root.join(GIT_DIR)
}

pub fn info_attributes_path(root: &Path) -> PathBuf {
    root.join(INFO_ATTRIBUTES)
}

/// Render a relative path with forward slashes. Empty for the root itself.
pub fn to_posix(rel: &Path) -> String {
    rel.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Display `path` relative to `root` when possible.
pub fn display_relative(root: &Path, path: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(rel) => to_posix(rel),
        Err(_) => path.display().to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
