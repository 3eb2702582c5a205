use crate::output::print_json;
use anyhow::Context;
use ident_sync_core::{paths, sync, SyncConfig};

/// `ident-sync apply` — install overrides and refresh expanded files.
pub fn run(config: &SyncConfig, json: bool) -> anyhow::Result<()> {
    let git = super::git(config)?;
    let report = sync::run(config, &git).context("ident sync failed")?;

    if json {
        return print_json(&report);
    }

    let Some(override_path) = &report.override_path else {
        println!("No ident patterns detected; nothing to do.");
        return Ok(());
    };

    let rel = paths::display_relative(&config.repo_root, override_path);
    if report.override_changed {
        println!("Updated {rel} with -ident overrides.");
    } else {
        println!("{rel} already contains ident overrides.");
    }

    if report.ident_files.is_empty() {
        println!("No ident-enabled files detected.");
    } else if report.refreshed.is_empty() {
        println!("Tracked ident files required no refresh.");
    } else {
        println!(
            "Refreshed {} files with ident expansion.",
            report.refreshed.len()
        );
    }

    println!("Ident overrides installed. git/jj status should now match.");
    Ok(())
}
