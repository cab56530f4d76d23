//! Command-line interface definitions and parsing
//!
//! # Commands
//!
//! - **list**: Open the interactive picker (default)
//! - **save**: Bookmark a directory under an optional alias
//! - **go**: Jump to a bookmark by alias or id prefix
//! - **rm**: Delete a bookmark by alias or id prefix
//! - **init**: Print the shell function that performs the `cd`
//!
//! # Examples
//!
//! ```
//! use clap::Parser;
//! use twd::cli::{Cli, Commands};
//!
//! let cli = Cli::parse_from(["twd", "go", "proj"]);
//! assert!(matches!(cli.get_command(), Commands::Go { query: Some(_) }));
//! ```

use crate::shell::Shell;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "twd")]
#[command(about = "Bookmark directories and jump back to them", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Suppress informational output
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Print the target directory on stdout instead of handing it to the shell function
    #[arg(long = "print", global = true)]
    pub print: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Open the interactive picker (default)
    #[command(visible_alias = "ls")]
    List,

    /// Bookmark a directory
    #[command(visible_alias = "s")]
    Save {
        /// Directory to bookmark (defaults to the current directory)
        #[arg(value_name = "PATH")]
        path: Option<PathBuf>,

        /// Alias for the bookmark (letters, digits, '_' and '-'; defaults to the id)
        #[arg(short = 'a', long = "alias", value_name = "ALIAS")]
        alias: Option<String>,
    },

    /// Jump to a bookmark by alias or id prefix; opens the picker without a query
    #[command(visible_alias = "g")]
    Go {
        #[arg(value_name = "QUERY")]
        query: Option<String>,
    },

    /// Delete a bookmark by alias or id prefix
    #[command(visible_alias = "remove")]
    Rm {
        #[arg(value_name = "QUERY")]
        query: String,
    },

    /// Print the shell integration function
    Init {
        #[arg(value_enum, value_name = "SHELL")]
        shell: Shell,
    },
}

impl Cli {
    /// Parse command-line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the command, defaulting to List if none specified
    #[must_use]
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::List)
    }
}
