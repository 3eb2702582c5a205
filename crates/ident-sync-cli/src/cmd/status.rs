use crate::output::{pattern_table, print_json};
use anyhow::Context;
use ident_sync_core::{paths, sync, SyncConfig};

pub fn run(config: &SyncConfig, json: bool) -> anyhow::Result<()> {
    let git = super::git(config)?;
    let status = sync::status(config, &git).context("failed to inspect repository")?;

    if json {
        #[derive(serde::Serialize)]
        struct StatusOutput<'a> {
            #[serde(flatten)]
            status: &'a sync::SyncStatus,
            in_sync: bool,
        }
        return print_json(&StatusOutput {
            status: &status,
            in_sync: status.in_sync(),
        });
    }

    if status.patterns.is_empty() {
        println!("No ident patterns detected.");
        return Ok(());
    }

    for line in pattern_table(&status.patterns) {
        println!("{line}");
    }

    println!();
    if status.ident_files.is_empty() {
        println!("No tracked files currently expanded.");
    } else {
        println!("Expanded tracked files ({}):", status.ident_files.len());
        for file in &status.ident_files {
            println!("  {}", file.path);
        }
    }

    let rel = paths::display_relative(&config.repo_root, &status.override_path);
    if status.overrides_current {
        println!("{rel} is up to date.");
    } else {
        println!("{rel} needs updating.");
    }

    if !status.in_sync() {
        println!("Run `ident-sync apply` to fix.");
    }
    Ok(())
}
