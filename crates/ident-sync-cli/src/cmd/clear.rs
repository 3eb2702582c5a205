use crate::output::print_json;
use ident_sync_core::{managed_block, paths, SyncConfig};

/// `ident-sync clear` — drop the managed block, keep everything else.
///
/// Files refreshed earlier are left as they are; git expands them again on
/// the next checkout that touches them.
pub fn run(config: &SyncConfig, json: bool) -> anyhow::Result<()> {
    let result = managed_block::clear_overrides(&config.repo_root)?;

    if json {
        return print_json(&result);
    }

    let rel = paths::display_relative(&config.repo_root, &result.path);
    if result.changed {
        println!("Removed ident overrides from {rel}.");
    } else {
        println!("{rel} has no ident overrides.");
    }
    Ok(())
}
