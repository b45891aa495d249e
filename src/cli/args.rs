//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::config::RenderStyle;

/// AVL tree playground: insert, delete and draw integers
#[derive(Parser, Debug)]
#[command(name = "avltree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file layered over the global config
    #[arg(short, long, global = true, env = "AVLTREE_CONFIG", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive insert/delete/print menu (default)
    Menu,

    /// Build a tree from values and print it
    Render {
        /// Values to insert, left to right
        #[arg(allow_negative_numbers = true)]
        values: Vec<i64>,

        /// Values to remove afterwards (comma separated)
        #[arg(short, long, value_delimiter = ',', allow_negative_numbers = true)]
        remove: Vec<i64>,

        /// Drawing style (default from config)
        #[arg(short, long, value_enum)]
        style: Option<RenderStyle>,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print effective settings as TOML
    Show,
    /// Print a commented template config
    Template,
    /// Print the global config file location
    Path,
}
