//! Discovery of ident-enabling patterns across every `.gitattributes` in a tree.
//!
//! Each line is classified on its own (see [`AttrLine`]); nothing carries over
//! between lines.

use crate::paths;
use crate::pattern::{AttributePattern, PatternSet};
use std::path::Path;
use walkdir::WalkDir;

pub const IDENT_ATTR: &str = "ident";

/// One classified `.gitattributes` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrLine<'a> {
    Blank,
    Comment,
    /// `[attr]name ...` macro definition; names no paths.
    Macro,
    Rule {
        pattern: &'a str,
        attrs: Vec<&'a str>,
    },
    Malformed,
}

impl<'a> AttrLine<'a> {
    pub fn parse(raw: &'a str) -> Self {
        let (content, had_comment) = match raw.split_once('#') {
            Some((before, _)) => (before.trim(), true),
            None => (raw.trim(), false),
        };
        if content.is_empty() {
            return if had_comment {
                AttrLine::Comment
            } else {
                AttrLine::Blank
            };
        }
        if content.starts_with("[attr]") {
            return AttrLine::Macro;
        }
        let mut tokens = content.split_whitespace();
        let Some(pattern) = tokens.next() else {
            return AttrLine::Blank;
        };
        let attrs: Vec<&str> = tokens.collect();
        if attrs.is_empty() {
            return AttrLine::Malformed;
        }
        AttrLine::Rule { pattern, attrs }
    }

    /// The rule's pattern, if this line turns ident expansion on.
    pub fn ident_pattern(&self) -> Option<&'a str> {
        match self {
            AttrLine::Rule { pattern, attrs } if attrs.iter().any(|a| enables_ident(a)) => {
                Some(*pattern)
            }
            _ => None,
        }
    }
}

/// `ident` and `ident=<value>` enable; `-ident`, `!ident` and `ident=false` do not.
fn enables_ident(token: &str) -> bool {
    match token.split_once('=') {
        Some((name, value)) => name == IDENT_ATTR && value != "false",
        None => token == IDENT_ATTR,
    }
}

fn is_git_metadata_dir(entry: &walkdir::DirEntry) -> bool {
    entry.depth() > 0 && entry.file_type().is_dir() && entry.file_name() == paths::GIT_DIR
}

/// Extract ident-enabling patterns from one file's content.
pub fn parse_ident_patterns(source_dir: &str, content: &str) -> Vec<AttributePattern> {
    content
        .lines()
        .filter_map(|line| AttrLine::parse(line).ident_pattern())
        .map(|pattern| AttributePattern::new(source_dir, pattern))
        .collect()
}

/// Every ident-enabling pattern under `repo_root`, in walk order, with its source.
///
/// Unreadable files are logged and skipped.
pub fn scan_detailed(repo_root: &Path) -> Vec<AttributePattern> {
    let mut found = Vec::new();
    let walker = WalkDir::new(repo_root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_git_metadata_dir(e));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("skipping unreadable path during scan: {e}");
                continue;
            }
        };
        if !entry.file_type().is_file() || entry.file_name() != paths::GITATTRIBUTES {
            continue;
        }
        let path = entry.path();
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!("skipping {}: {e}", path.display());
                continue;
            }
        };
        let content = String::from_utf8_lossy(&bytes);
        let source_dir = path
            .parent()
            .and_then(|dir| dir.strip_prefix(repo_root).ok())
            .map(paths::to_posix)
            .unwrap_or_default();
        let patterns = parse_ident_patterns(&source_dir, &content);
        tracing::debug!(
            file = %path.display(),
            count = patterns.len(),
            "scanned attributes file"
        );
        found.extend(patterns);
    }
    found
}

/// Deduplicated, sorted set of normalized ident-enabling patterns.
pub fn scan(repo_root: &Path) -> PatternSet {
    scan_detailed(repo_root)
        .into_iter()
        .map(|p| p.normalized)
        .collect()
}
