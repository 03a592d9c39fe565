mod play;
mod report;

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use reflex_core::config::GameConfig;
use reflex_core::store::{self, FileStore};
use reflex_core::Difficulty;

const CONFIG_PATH_ENV: &str = "REFLEX_CONFIG";

#[derive(Debug, Parser)]
#[command(name = "reflex")]
#[command(about = "Reaction-time trainer", long_about = None)]
struct Cli {
    /// Log transitions and timer activity
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Store file (defaults to $REFLEX_STORE_PATH or the user data dir)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Game config JSON (defaults to $REFLEX_CONFIG, then built-in values)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Play rounds interactively: Enter taps, `q` quits
    Play {
        #[arg(short, long, default_value = "normal")]
        difficulty: Difficulty,
        #[arg(short, long, default_value_t = 1)]
        rounds: u32,
    },
    /// Show aggregate statistics
    Stats,
    /// List results, newest first
    History {
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Delete every stored result
    Reset {
        /// Confirm the irreversible reset
        #[arg(long)]
        yes: bool,
    },
    /// Print the effective configuration
    Config,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(cli.config.as_deref())?;
    let mut file_store = match &cli.store {
        Some(path) => FileStore::new(path),
        None => FileStore::from_env(),
    };
    log::debug!("using store {}", file_store.path().display());

    match cli.command {
        Command::Play { difficulty, rounds } => {
            play::run(config, file_store, difficulty, rounds)?;
        }
        Command::Stats => {
            let record = store::load_record(&mut file_store);
            print!("{}", report::stats(&record, config.recent_window));
        }
        Command::History { limit } => {
            let record = store::load_record(&mut file_store);
            print!("{}", report::history(&record, limit));
        }
        Command::Reset { yes } => {
            if !yes {
                bail!("refusing to reset without --yes (this deletes all results)");
            }
            store::clear_record(&mut file_store).with_context(|| {
                format!("failed to clear store: {}", file_store.path().display())
            })?;
            log::info!("game record reset");
            println!("All results deleted.");
        }
        Command::Config => {
            let json =
                serde_json::to_string_pretty(&config).context("failed to serialize config")?;
            println!("{json}");
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp_millis()
        .init();
}

fn load_config(explicit: Option<&std::path::Path>) -> anyhow::Result<GameConfig> {
    let path = explicit
        .map(PathBuf::from)
        .or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from));

    match path {
        Some(path) => GameConfig::load(&path)
            .with_context(|| format!("config load failed: {}", path.display())),
        None => Ok(GameConfig::default()),
    }
}
