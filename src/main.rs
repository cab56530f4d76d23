//! twd CLI application entry point
//!
//! # Usage
//!
//! ```bash
//! # Install the shell function once (bash, zsh or fish)
//! eval "$(twd init bash)"
//!
//! # Bookmark the current directory, or another one under an alias
//! twd save
//! twd save ~/src/proj -a proj
//!
//! # Jump by alias or id prefix
//! twd go pro
//!
//! # Pick interactively (default command)
//! twd
//!
//! # Without the shell function
//! cd "$(twd --print go proj)"
//! ```
//!
//! # Configuration
//!
//! Settings live in `~/.config/twd/config.toml` (or `$TWD_CONFIG`), created
//! with defaults on first run. Logs go to the configured log directory,
//! filtered by `$TWD_LOG`.

use colored::Colorize;
use std::process::ExitCode;
use twd::{
    TwdError,
    cli::{Cli, Commands},
    commands,
    config::TwdConfig,
    logging,
    shell::{Navigator, SignalFile, StdoutNavigator},
    store::BookmarkStore,
};

type Result<T> = std::result::Result<T, TwdError>;

fn signal_file() -> Result<SignalFile> {
    SignalFile::default_path()
        .map(SignalFile::new)
        .ok_or_else(|| TwdError::InvalidInput("Could not determine data directory for the signal file".into()))
}

fn run(cli: &Cli) -> Result<()> {
    let config_path = TwdConfig::config_path()?;
    let mut config = TwdConfig::load_from(&config_path)?;

    match config.log_dir_path() {
        Ok(dir) => {
            if let Err(e) = logging::init(&dir, &config.log_level) {
                eprintln!("{} logging disabled: {e}", "⚠️".yellow());
            }
        }
        Err(e) => eprintln!("{} logging disabled: {e}", "⚠️".yellow()),
    }

    let store = BookmarkStore::new(config.data_file_path()?);
    let quiet = cli.quiet;

    let navigator: Box<dyn Navigator> = if cli.print {
        Box::new(StdoutNavigator)
    } else {
        Box::new(signal_file()?)
    };

    match cli.get_command() {
        Commands::List => commands::list(&store, &mut config, &config_path, navigator.as_ref(), quiet),
        Commands::Go { query } => commands::go(
            &store,
            query.as_deref(),
            &mut config,
            &config_path,
            navigator.as_ref(),
            quiet,
        ),
        Commands::Save { path, alias } => {
            commands::save(&store, path.as_deref(), alias.as_deref(), quiet).map(|_| ())
        }
        Commands::Rm { query } => commands::remove(&store, &query, quiet).map(|_| ()),
        Commands::Init { shell } => commands::init(shell, signal_file()?.path()),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("{} {e}", "❌".red());
            ExitCode::FAILURE
        }
    }
}
