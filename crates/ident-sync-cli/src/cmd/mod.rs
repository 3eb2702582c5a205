pub mod apply;
pub mod clear;
pub mod status;

use anyhow::Context;
use ident_sync_core::{vcs::Git, SyncConfig};

fn git(config: &SyncConfig) -> anyhow::Result<Git> {
    Git::new(&config.repo_root, config.git_bin.as_deref()).context("cannot run git")
}
