//! Rewriting directory-scoped `.gitattributes` patterns as root-relative ones.

use serde::Serialize;
use std::collections::BTreeSet;

/// A pattern as declared in some `.gitattributes`, plus its root-relative form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributePattern {
    /// Directory holding the declaring file, posix-style, empty for the root.
    pub source_dir: String,
    pub raw_pattern: String,
    pub normalized: String,
}

impl AttributePattern {
    pub fn new(source_dir: &str, raw_pattern: &str) -> Self {
        Self {
            source_dir: source_dir.to_string(),
            raw_pattern: raw_pattern.to_string(),
            normalized: normalize(source_dir, raw_pattern),
        }
    }
}

/// Unique normalized patterns, iterated in sorted order.
pub type PatternSet = BTreeSet<String>;

/// Convert a pattern declared in `source_dir` into repository-root-relative form.
///
/// `source_dir` is posix-style relative to the root; `""` and `"."` both mean
/// the root itself.
pub fn normalize(source_dir: &str, raw_pattern: &str) -> String {
    let pattern = raw_pattern.trim();
    if let Some(anchored) = pattern.strip_prefix('/') {
        return anchored.trim_start_matches('/').to_string();
    }

    let dir = source_dir.trim_matches('/');
    if dir.is_empty() || dir == "." {
        return pattern.to_string();
    }

    let joined = if pattern.contains('/') {
        format!("{dir}/{pattern}")
    } else {
        // Bare filename globs match at any depth below the declaring directory.
        format!("{dir}/**/{pattern}")
    };
    collapse_separators(&joined)
}

fn collapse_separators(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut prev_slash = false;
    for ch in path.chars() {
        if ch == '/' && prev_slash {
            continue;
        }
        prev_slash = ch == '/';
        out.push(ch);
    }
    out
}
