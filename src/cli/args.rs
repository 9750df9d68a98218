//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

/// Self-balancing AVL tree: insert, remove and inspect values
#[derive(Parser, Debug)]
#[command(name = "avl")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Directory holding the local .avl.toml (default: cwd)
    #[arg(short = 'C', long, global = true)]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Insert the demo values and print traversal and height
    Demo,

    /// Apply operations to an empty tree: +N/N inserts, -N removes
    #[command(after_help = "Example: avl run 10 20 30 -20 +25\nUse `--` before a token like `--3` (remove -3): avl run -- 1 --3")]
    Run {
        /// Operation tokens, applied left to right
        #[arg(required = true, allow_negative_numbers = true)]
        ops: Vec<String>,

        /// Also print the tree drawing
        #[arg(short, long)]
        tree: bool,

        /// Validate invariants after every operation
        #[arg(long)]
        check: bool,
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
    /// Show merged config
    Show,

    /// Print config template
    Init,

    /// Show config paths
    Path,
}
