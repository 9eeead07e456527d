use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use logview_core::cli;
use logview_core::logging::{init_logging, init_stderr_logging};
use logview_core::server::{self, ConfigOverrides};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "logview",
    version,
    about = "logview: severity-aware log file server"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve logs over HTTP
    Serve {
        /// Path to the config file (defaults to config/logview.hcl when present)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Directory logs are served from
        #[arg(long)]
        root: Option<PathBuf>,

        /// Address to listen on, e.g. 127.0.0.1:8000
        #[arg(long)]
        listen: Option<String>,
    },

    /// Render a log file (or stdin) as HTML on stdout
    Htmlify { file: Option<PathBuf> },

    /// Configuration tooling
    Config {
        #[command(subcommand)]
        cmd: cli::conf::ConfigCmd,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            config,
            root,
            listen,
        } => {
            init_logging();

            if let Some(root) = &root {
                if !root.is_dir() {
                    bail!("--root {} is not a directory", root.display());
                }
            }

            let overrides = ConfigOverrides {
                root_path: root,
                listen,
            };
            let cfg = server::load_or_default(config.as_deref(), &overrides)
                .context("failed to load logview config")?;

            server::run(config, overrides, cfg).context("failed to start logview server")
        }

        Command::Htmlify { file } => {
            init_stderr_logging();
            cli::htmlify(file.as_deref())
        }

        Command::Config { cmd } => {
            init_logging();
            cli::conf::run(cmd)
        }
    }
}
