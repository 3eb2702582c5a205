//! Run sequencing: scan, detect, write overrides, refresh.
//!
//! Stages only move forward. Every path ends in [`Outcome`]; any collaborator
//! error aborts the run where it happens.

use crate::attributes;
use crate::config::SyncConfig;
use crate::detect::{self, IdentFile};
use crate::error::Result;
use crate::managed_block;
use crate::pattern::AttributePattern;
use crate::refresh;
use crate::vcs::Vcs;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Scanning,
    Detecting,
    Writing,
    Refreshing,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Scanning => "scanning",
            Stage::Detecting => "detecting",
            Stage::Writing => "writing",
            Stage::Refreshing => "refreshing",
            Stage::Done => "done",
        };
        f.write_str(s)
    }
}

/// How a successful run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// No `.gitattributes` enables ident; nothing was touched.
    NothingToDo,
    /// Overrides written; no tracked file was expanded.
    NoIdentFiles,
    /// Overrides written and expanded files refreshed.
    Refreshed,
}

#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    pub outcome: Outcome,
    pub patterns: Vec<String>,
    pub override_path: Option<PathBuf>,
    pub override_changed: bool,
    pub ident_files: Vec<String>,
    pub refreshed: Vec<String>,
}

impl SyncReport {
    fn nothing_to_do() -> Self {
        Self {
            outcome: Outcome::NothingToDo,
            patterns: Vec::new(),
            override_path: None,
            override_changed: false,
            ident_files: Vec::new(),
            refreshed: Vec::new(),
        }
    }
}

fn enter(stage: Stage) {
    tracing::info!(%stage, "ident sync");
}

/// Disable ident expansion for every pattern that enables it and refresh
/// the tracked files git has already expanded.
pub fn run(config: &SyncConfig, vcs: &dyn Vcs) -> Result<SyncReport> {
    let root = &config.repo_root;

    enter(Stage::Scanning);
    let patterns = attributes::scan(root);
    if patterns.is_empty() {
        enter(Stage::Done);
        return Ok(SyncReport::nothing_to_do());
    }

    // Detection has to precede the write: once the overrides exist git
    // reports ident as unset everywhere.
    enter(Stage::Detecting);
    let ident_files: Vec<String> = detect::detect(vcs)?.into_iter().map(|f| f.path).collect();

    enter(Stage::Writing);
    let written = managed_block::write_overrides(root, &patterns)?;

    let mut report = SyncReport {
        outcome: Outcome::NoIdentFiles,
        patterns: patterns.into_iter().collect(),
        override_path: Some(written.path),
        override_changed: written.changed,
        ident_files,
        refreshed: Vec::new(),
    };
    if report.ident_files.is_empty() {
        enter(Stage::Done);
        return Ok(report);
    }

    enter(Stage::Refreshing);
    report.refreshed = refresh::refresh(root, vcs, &config.revision, &report.ident_files)?;
    report.outcome = Outcome::Refreshed;

    enter(Stage::Done);
    Ok(report)
}

/// Read-only preview of what [`run`] would do.
#[derive(Debug, Clone, Serialize)]
pub struct SyncStatus {
    pub patterns: Vec<AttributePattern>,
    pub ident_files: Vec<IdentFile>,
    pub override_path: PathBuf,
    pub overrides_current: bool,
}

impl SyncStatus {
    /// True when a run would neither write nor refresh anything.
    pub fn in_sync(&self) -> bool {
        self.patterns.is_empty() || (self.overrides_current && self.ident_files.is_empty())
    }
}

pub fn status(config: &SyncConfig, vcs: &dyn Vcs) -> Result<SyncStatus> {
    let root = &config.repo_root;
    let patterns = attributes::scan_detailed(root);
    let normalized = patterns.iter().map(|p| p.normalized.clone()).collect();
    let (ident_files, overrides_current) = if patterns.is_empty() {
        (Vec::new(), false)
    } else {
        (
            detect::detect(vcs)?,
            managed_block::overrides_current(root, &normalized)?,
        )
    };
    Ok(SyncStatus {
        patterns,
        ident_files,
        override_path: config.info_attributes_path(),
        overrides_current,
    })
}
