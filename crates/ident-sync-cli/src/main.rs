mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "ident-sync",
    about = "Disable git ident expansion locally so `jj status` matches `git status`",
    version,
    propagate_version = true
)]
struct Cli {
    /// Git checkout to patch
    #[arg(long, global = true, env = "GITTOP")]
    root: Option<PathBuf>,

    /// Git executable (default: `git` on PATH)
    #[arg(long, global = true, env = "IDENT_SYNC_GIT")]
    git: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    /// Log each stage to stderr
    #[arg(long, global = true, short = 'v')]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Install -ident overrides and refresh expanded files (default)
    Apply {
        /// Revision expanded files are restored from
        #[arg(long, default_value = ident_sync_core::config::DEFAULT_REVISION)]
        revision: String,
    },

    /// Show ident patterns, expanded files and override state without writing
    Status,

    /// Remove the managed -ident block from .git/info/attributes
    Clear,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = root::load_config(cli.root.as_deref(), cli.git).and_then(|config| {
        match cli.command {
            None => cmd::apply::run(&config, cli.json),
            Some(Commands::Apply { revision }) => {
                cmd::apply::run(&config.with_revision(revision), cli.json)
            }
            Some(Commands::Status) => cmd::status::run(&config, cli.json),
            Some(Commands::Clear) => cmd::clear::run(&config, cli.json),
        }
    });

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
