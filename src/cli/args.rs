//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};

/// Family tree viewer: descendant trees, generation lists and diagram layout
#[derive(Parser, Debug)]
#[command(name = "famtree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Config file layered over the global config
    #[arg(short, long, global = true, env = "FAMTREE_CONFIG", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Family file and root person shared by the tree commands.
#[derive(Args, Debug, Clone)]
pub struct TreeSource {
    /// Family file (TOML)
    #[arg(value_hint = ValueHint::FilePath)]
    pub file: PathBuf,

    /// Id of the person at the top of the tree (default: first person without parents)
    #[arg(short, long)]
    pub root: Option<u64>,

    /// Deepest generation shown below the root
    #[arg(short = 'd', long, allow_negative_numbers = true)]
    pub max_depth: Option<i64>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show descendants as a tree
    Tree {
        #[command(flatten)]
        source: TreeSource,
    },

    /// List descendants in pre-order with their generation
    List {
        #[command(flatten)]
        source: TreeSource,

        /// Generation number given to the root
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        start_depth: i64,
    },

    /// Show size figures of the tree
    Stats {
        #[command(flatten)]
        source: TreeSource,
    },

    /// Compute diagram geometry for the tree
    Layout {
        #[command(flatten)]
        source: TreeSource,

        /// Also print connector lines
        #[arg(long)]
        connectors: bool,
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
    /// Show effective settings
    Show,
    /// Show global config file location
    Path,
}
