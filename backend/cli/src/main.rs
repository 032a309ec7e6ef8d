mod check_cmd;
mod run_cmd;
mod settings;
mod stats_cmd;
mod terminal_output;

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tracing::{error, warn};

use linkgrab_config::{config_dir, config_file_path, load_and_prepare, resolve_path, LinkgrabConfig};
use linkgrab_logging::init_logger;

use settings::Settings;

#[derive(Parser)]
#[command(name = "linkgrab")]
#[command(about = "linkgrab: Telegram bot that downloads TikTok, Instagram and YouTube links")]
#[command(version)]
struct Cli {
    /// Config file (default: $LINKGRAB_CONFIG_DIR/config.yaml or ~/.linkgrab/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Clone, Copy)]
enum Commands {
    /// Run the bot (default)
    Run,
    /// Validate the config and string catalog, print the effective config
    Check,
    /// Print the local usage statistics
    Stats,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let (dir, path) = locate_config(cli.config.as_deref());

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            let (config, report) = load_and_prepare(&path).await?;
            let settings = Settings::from_config(&config, &dir)?;
            init_logger(settings.log_dir.as_deref(), &settings.log_level);

            // findings were produced before the subscriber existed
            for warning in &report.warnings {
                warn!(path = %warning.path, "{}", warning.message);
            }
            if !report.is_valid() {
                for e in &report.errors {
                    error!(path = %e.path, "{}", e.message);
                }
                bail!("invalid configuration in {}", path.display());
            }
            run_cmd::run(settings).await
        }
        Commands::Check => {
            init_logger(None, "error");
            check_cmd::run(&path).await
        }
        Commands::Stats => {
            init_logger(None, "error");
            let (config, _) = load_and_prepare(&path).await?;
            stats_cmd::run(&stats_file(&config, &dir)).await
        }
    }
}

/// Config directory and file, from `--config` or the default location.
fn locate_config(explicit: Option<&Path>) -> (PathBuf, PathBuf) {
    match explicit {
        Some(file) => {
            let dir = file
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
            (dir, file.to_path_buf())
        }
        None => {
            let dir = config_dir();
            let file = config_file_path(&dir);
            (dir, file)
        }
    }
}

fn stats_file(config: &LinkgrabConfig, dir: &Path) -> PathBuf {
    let name = config
        .storage
        .as_ref()
        .and_then(|s| s.stats_file.as_deref())
        .unwrap_or(linkgrab_config::defaults::DEFAULT_STATS_FILE);
    resolve_path(dir, name)
}
