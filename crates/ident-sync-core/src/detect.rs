use crate::attributes::IDENT_ATTR;
use crate::error::Result;
use crate::vcs::{AttributeRow, Vcs};
use serde::Serialize;

/// A tracked file and whether git currently expands ident in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentFile {
    pub path: String,
    pub currently_expanded: bool,
}

/// Value git reports when an attribute is switched on.
pub const ATTR_SET: &str = "set";

impl IdentFile {
    fn from_row(row: AttributeRow) -> Self {
        let currently_expanded = row.attribute == IDENT_ATTR && row.value == ATTR_SET;
        Self {
            path: row.path,
            currently_expanded,
        }
    }
}

/// Tracked files that have ident expansion active right now.
///
/// No attribute query is issued when nothing is tracked.
pub fn detect(vcs: &dyn Vcs) -> Result<Vec<IdentFile>> {
    let tracked = vcs.list_tracked_files()?;
    if tracked.is_empty() {
        tracing::debug!("no tracked files; skipping attribute query");
        return Ok(Vec::new());
    }
    let rows = vcs.query_attribute(&tracked, IDENT_ATTR)?;
    let files: Vec<IdentFile> = rows
        .into_iter()
        .map(IdentFile::from_row)
        .filter(|f| f.currently_expanded)
        .collect();
    tracing::info!(
        tracked = tracked.len(),
        expanded = files.len(),
        "detected ident files"
    );
    Ok(files)
}
