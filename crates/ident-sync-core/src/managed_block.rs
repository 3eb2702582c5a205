//! The machine-owned `-ident` block inside `.git/info/attributes`.
//!
//! The file is never patched in place. Existing content is split into the
//! lines outside any managed region, and the whole file is reassembled with
//! a fresh block at the end.

use crate::error::Result;
use crate::io;
use crate::paths;
use crate::pattern::PatternSet;
use serde::Serialize;
use std::path::{Path, PathBuf};

pub const BEGIN_MARKER: &str = "# >>> jj-ident-disable >>>";
pub const END_MARKER: &str = "# <<< jj-ident-disable <<<";
pub const MANAGED_COMMENT: &str = "# Managed by ident-sync to keep git/jj in sync.";

/// Begin marker, comment, one `<pattern> -ident` rule per pattern, end marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagedBlock {
    pub rules: Vec<String>,
}

impl ManagedBlock {
    pub fn from_patterns(patterns: &PatternSet) -> Self {
        Self {
            rules: patterns.iter().map(|p| format!("{p} -ident")).collect(),
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        [BEGIN_MARKER, MANAGED_COMMENT]
            .into_iter()
            .chain(self.rules.iter().map(String::as_str))
            .chain(std::iter::once(END_MARKER))
    }
}

/// Existing override file content with every managed region cut out.
///
/// Lines are split on `\n` only, so a CRLF line keeps its `\r` and is
/// written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preserved<'a> {
    pub lines: Vec<&'a str>,
    pub had_block: bool,
}

impl<'a> Preserved<'a> {
    /// Drop every region from a begin marker through its end marker (both
    /// inclusive). An unterminated region runs to end of file.
    pub fn parse(content: &'a str) -> Self {
        let mut lines = Vec::new();
        let mut had_block = false;
        let mut skipping = false;
        for line in content.split_terminator('\n') {
            let trimmed = line.trim();
            if !skipping && trimmed == BEGIN_MARKER {
                skipping = true;
                had_block = true;
                continue;
            }
            if skipping {
                if trimmed == END_MARKER {
                    skipping = false;
                }
                continue;
            }
            lines.push(line);
        }
        Self { lines, had_block }
    }
}

/// Full file content: preserved lines, one blank separator, then the block.
pub fn render_overrides(existing: &str, patterns: &PatternSet) -> String {
    let mut lines = Preserved::parse(existing).lines;
    if lines.last().is_some_and(|l| !l.trim().is_empty()) {
        lines.push("");
    }
    let block = ManagedBlock::from_patterns(patterns);
    lines.extend(block.lines());
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Where the override file lives and whether the last operation changed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverrideWrite {
    pub path: PathBuf,
    pub changed: bool,
}

/// Install `patterns` as the managed block of `.git/info/attributes`.
///
/// The file is only written when its bytes would change.
pub fn write_overrides(repo_root: &Path, patterns: &PatternSet) -> Result<OverrideWrite> {
    let path = paths::info_attributes_path(repo_root);
    let existing = io::read_optional(&path)?;
    let rendered = render_overrides(existing.as_deref().unwrap_or(""), patterns);
    let changed = existing.as_deref() != Some(rendered.as_str());
    if changed {
        io::atomic_write(&path, rendered.as_bytes())?;
        tracing::info!(path = %path.display(), rules = patterns.len(), "wrote ident overrides");
    } else {
        tracing::debug!(path = %path.display(), "ident overrides already current");
    }
    Ok(OverrideWrite { path, changed })
}

/// Whether the override file already holds exactly this block. Never writes.
pub fn overrides_current(repo_root: &Path, patterns: &PatternSet) -> Result<bool> {
    let existing = io::read_optional(&paths::info_attributes_path(repo_root))?;
    Ok(match existing {
        Some(content) => render_overrides(&content, patterns) == content,
        None => false,
    })
}

/// Remove the managed block and the blank line that separated it from user
/// content. The file is deleted when nothing else remains.
pub fn clear_overrides(repo_root: &Path) -> Result<OverrideWrite> {
    let path = paths::info_attributes_path(repo_root);
    let Some(existing) = io::read_optional(&path)? else {
        return Ok(OverrideWrite {
            path,
            changed: false,
        });
    };
    let Preserved {
        mut lines,
        had_block,
    } = Preserved::parse(&existing);
    if !had_block {
        return Ok(OverrideWrite {
            path,
            changed: false,
        });
    }
    if lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }
    if lines.is_empty() {
        io::remove_file_if_exists(&path)?;
    } else {
        let mut out = lines.join("\n");
        out.push('\n');
        io::atomic_write(&path, out.as_bytes())?;
    }
    tracing::info!(path = %path.display(), "removed ident overrides");
    Ok(OverrideWrite {
        path,
        changed: true,
    })
}
