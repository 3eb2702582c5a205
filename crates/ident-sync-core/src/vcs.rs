//! The version-control collaborator.
//!
//! The engine only needs three operations from git. They sit behind [`Vcs`]
//! so tests can substitute an in-memory repository.

use std::io::{Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use crate::error::{Result, SyncError};

/// One `path: attribute: value` result from an attribute query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeRow {
    pub path: String,
    pub attribute: String,
    pub value: String,
}

pub trait Vcs {
    /// Every tracked path, repository-relative.
    fn list_tracked_files(&self) -> Result<Vec<String>>;

    /// Value of `attribute` for each of `paths`, in one bulk query.
    fn query_attribute(&self, paths: &[String], attribute: &str) -> Result<Vec<AttributeRow>>;

    /// Overwrite the working-tree copy of `path` with its content at `revision`.
    fn restore_from_revision(&self, revision: &str, path: &str) -> Result<()>;
}

/// [`Vcs`] backed by the `git` executable.
#[derive(Debug, Clone)]
pub struct Git {
    bin: PathBuf,
    repo_root: PathBuf,
}

impl Git {
    /// Use `bin` if given, otherwise resolve `git` on PATH.
    pub fn new(repo_root: &Path, bin: Option<&Path>) -> Result<Self> {
        let bin = match bin {
            Some(b) => b.to_path_buf(),
            None => which::which("git").map_err(|_| SyncError::GitNotFound)?,
        };
        Ok(Self {
            bin,
            repo_root: repo_root.to_path_buf(),
        })
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(&self.bin);
        // Paths are exact names, never globs: `f[1].txt` must not match `f1.txt`.
        cmd.args(args)
            .current_dir(&self.repo_root)
            .env("GIT_LITERAL_PATHSPECS", "1");
        cmd
    }

    fn run(&self, op: &str, mut cmd: Command, stdin: Option<&[u8]>) -> Result<Output> {
        tracing::debug!(op, "running git");
        // Stdin comes from a file, not a pipe: git may fill stdout before it
        // has consumed all of a large query.
        match stdin {
            Some(data) => {
                let staged = stage_stdin(data).map_err(|e| git_error(op, e.to_string()))?;
                cmd.stdin(Stdio::from(staged));
            }
            None => {
                cmd.stdin(Stdio::null());
            }
        }
        let output = cmd.output().map_err(|e| git_error(op, e.to_string()))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(git_error(op, failure_detail(&output, stderr.trim())));
        }
        Ok(output)
    }
}

fn stage_stdin(data: &[u8]) -> std::io::Result<std::fs::File> {
    let mut file = tempfile::tempfile()?;
    file.write_all(data)?;
    file.seek(SeekFrom::Start(0))?;
    Ok(file)
}

impl Vcs for Git {
    fn list_tracked_files(&self) -> Result<Vec<String>> {
        let output = self.run("ls-files", self.command(&["ls-files", "-z"]), None)?;
        Ok(split_nul(&output.stdout))
    }

    fn query_attribute(&self, paths: &[String], attribute: &str) -> Result<Vec<AttributeRow>> {
        let mut input = Vec::new();
        for path in paths {
            input.extend_from_slice(path.as_bytes());
            input.push(0);
        }
        let cmd = self.command(&["check-attr", "-z", "--stdin", attribute]);
        let output = self.run("check-attr", cmd, Some(&input))?;
        Ok(parse_check_attr_z(&output.stdout))
    }

    fn restore_from_revision(&self, revision: &str, path: &str) -> Result<()> {
        let cmd = self.command(&["checkout", revision, "--", path]);
        match self.run("checkout", cmd, None) {
            Ok(_) => Ok(()),
            Err(SyncError::Git { detail, .. }) => Err(SyncError::Restore {
                path: path.to_string(),
                revision: revision.to_string(),
                detail,
            }),
            Err(e) => Err(e),
        }
    }
}

fn git_error(op: &str, detail: String) -> SyncError {
    SyncError::Git {
        op: op.to_string(),
        detail,
    }
}

fn failure_detail(output: &Output, stderr: &str) -> String {
    if stderr.is_empty() {
        format!("exited with {}", output.status)
    } else {
        stderr.to_string()
    }
}

fn split_nul(bytes: &[u8]) -> Vec<String> {
    bytes
        .split(|b| *b == 0)
        .filter(|entry| !entry.is_empty())
        .map(|entry| String::from_utf8_lossy(entry).into_owned())
        .collect()
}

/// Parse `git check-attr -z` output: repeated `path NUL attribute NUL value NUL`.
/// A trailing incomplete record is dropped.
pub fn parse_check_attr_z(bytes: &[u8]) -> Vec<AttributeRow> {
    let fields: Vec<String> = bytes
        .split(|b| *b == 0)
        .map(|f| String::from_utf8_lossy(f).into_owned())
        .collect();
    fields
        .chunks_exact(3)
        .map(|chunk| AttributeRow {
            path: chunk[0].clone(),
            attribute: chunk[1].clone(),
            value: chunk[2].clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_nul_drops_empty_entries() {
        assert_eq!(split_nul(b"a.txt\0sub/b.txt\0"), vec!["a.txt", "sub/b.txt"]);
        assert!(split_nul(b"").is_empty());
    }

    #[test]
    fn parse_check_attr_records() {
        let out = b"a.txt\0ident\0set\0b: c.txt\0ident\0unspecified\0";
        let rows = parse_check_attr_z(out);
        assert_eq!(
            rows,
            vec![
                AttributeRow {
                    path: "a.txt".into(),
                    attribute: "ident".into(),
                    value: "set".into(),
                },
                AttributeRow {
                    path: "b: c.txt".into(),
                    attribute: "ident".into(),
                    value: "unspecified".into(),
                },
            ]
        );
    }

    #[test]
    fn parse_check_attr_ignores_truncated_tail() {
        let rows = parse_check_attr_z(b"a.txt\0ident\0set\0b.txt\0ident");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].path, "a.txt");
    }

    #[test]
    fn explicit_binary_skips_lookup() {
        let git = Git::new(Path::new("/tmp"), Some(Path::new("/opt/git/bin/git"))).unwrap();
        assert_eq!(git.bin, PathBuf::from("/opt/git/bin/git"));
    }

    #[test]
    fn commands_use_literal_pathspecs() {
        let git = Git::new(Path::new("/tmp"), Some(Path::new("git"))).unwrap();
        let cmd = git.command(&["checkout", "HEAD", "--", "f[1].txt"]);
        let literal = cmd
            .get_envs()
            .find(|(k, _)| *k == "GIT_LITERAL_PATHSPECS")
            .and_then(|(_, v)| v);
        assert_eq!(literal, Some(std::ffi::OsStr::new("1")));
    }

    #[test]
    fn missing_binary_surfaces_as_git_error() {
        let git = Git::new(
            Path::new("."),
            Some(Path::new("/definitely/not/a/git/binary")),
        )
        .unwrap();
        let err = git.list_tracked_files().unwrap_err();
        assert!(matches!(err, SyncError::Git { ref op, .. } if op == "ls-files"));
    }
}
