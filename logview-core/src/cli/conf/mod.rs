mod check;
mod dump;

pub use check::*;
use clap::Subcommand;
pub use dump::*;
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum ConfigCmd {
    /// Validate configuration and exit
    Check {
        /// Path to config file
        #[arg(default_value = crate::conf::DEFAULT_CONFIG_PATH)]
        path: PathBuf,
    },

    /// Print resolved configuration
    Dump {
        #[arg(default_value = crate::conf::DEFAULT_CONFIG_PATH)]
        path: PathBuf,

        /// Output as JSON
        #[arg(long, conflicts_with = "yaml")]
        json: bool,

        /// Output as YAML
        #[arg(long)]
        yaml: bool,
    },
}

pub fn run(cmd: ConfigCmd) -> anyhow::Result<()> {
    match cmd {
        ConfigCmd::Check { path } => check(path),
        ConfigCmd::Dump { path, json, yaml } => dump(path, json, yaml),
    }
}
