//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// ID3 decision tree induction for categorical datasets
#[derive(Parser, Debug)]
#[command(name = "oaktree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub debug: u8,

    /// Project directory for local config (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub project_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train every dataset in a directory and write JSON exports
    Build {
        /// Directory to search for dataset files (default: project dir)
        #[arg(value_hint = ValueHint::DirPath)]
        dir: Option<PathBuf>,
        /// Output directory (default: settings output_dir)
        #[arg(short, long, value_hint = ValueHint::DirPath)]
        out: Option<PathBuf>,
    },

    /// Show the decision tree of a dataset
    Tree {
        /// Dataset file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Show entropy and information gain of every attribute
    Stats {
        /// Dataset file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Classify one example
    Predict {
        /// Dataset file to train on
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Attribute values, in declaration order
        #[arg(required = true, num_args = 1..)]
        values: Vec<String>,
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
    /// Print global config file location
    Path,
}
