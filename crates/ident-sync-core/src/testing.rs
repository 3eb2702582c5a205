//! In-memory [`Vcs`] used by unit tests.

use crate::error::{Result, SyncError};
use crate::vcs::{AttributeRow, Vcs};
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

#[derive(Default)]
pub struct FakeVcs {
    pub root: PathBuf,
    /// Tracked path -> content stored at HEAD.
    pub head: BTreeMap<String, String>,
    /// Paths whose ident attribute reports `set`.
    pub ident_set: BTreeSet<String>,
    pub fail_list: bool,
    pub fail_restore: BTreeSet<String>,
    pub queries: RefCell<usize>,
    pub restores: RefCell<Vec<String>>,
}

impl FakeVcs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    pub fn track(mut self, path: &str, content: &str, ident: bool) -> Self {
        self.head.insert(path.to_string(), content.to_string());
        if ident {
            self.ident_set.insert(path.to_string());
        }
        self
    }
}

impl Vcs for FakeVcs {
    fn list_tracked_files(&self) -> Result<Vec<String>> {
        if self.fail_list {
            return Err(SyncError::Git {
                op: "ls-files".into(),
                detail: "fatal: not a git repository".into(),
            });
        }
        Ok(self.head.keys().cloned().collect())
    }

    fn query_attribute(&self, paths: &[String], attribute: &str) -> Result<Vec<AttributeRow>> {
        *self.queries.borrow_mut() += 1;
        Ok(paths
            .iter()
            .map(|p| AttributeRow {
                path: p.clone(),
                attribute: attribute.to_string(),
                value: if self.ident_set.contains(p) {
                    "set".into()
                } else {
                    "unspecified".into()
                },
            })
            .collect())
    }

    fn restore_from_revision(&self, revision: &str, path: &str) -> Result<()> {
        let content = self.head.get(path).filter(|_| !self.fail_restore.contains(path));
        let Some(content) = content else {
            return Err(SyncError::Restore {
                path: path.to_string(),
                revision: revision.to_string(),
                detail: format!("pathspec '{path}' did not match any file(s) known to git"),
            });
        };
        let target = self.root.join(path);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&target, content)?;
        self.restores.borrow_mut().push(path.to_string());
        Ok(())
    }
}
