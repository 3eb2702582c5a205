pub mod attributes;
pub mod config;
pub mod detect;
pub mod error;
pub mod io;
pub mod managed_block;
pub mod paths;
pub mod pattern;
pub mod refresh;
pub mod sync;
pub mod vcs;

#[cfg(test)]
mod testing;

pub use config::SyncConfig;
pub use error::{Result, SyncError};
