use crate::commands::Commands;

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(name = "pg-admin")]
#[command(about = "PG Admin account and session client")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config directory (defaults to $PG_CONFIG_DIR, then ./.pg)
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,
}
