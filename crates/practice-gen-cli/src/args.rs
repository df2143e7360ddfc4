use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "practice-gen")]
#[command(about = "Build a practice problem set from a categorized problem library")]
#[command(version)]
pub struct Cli {
    /// Verbose output (lists every copied file, debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet output (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Library root holding categories/ and templates/ (default: current directory)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a problem set (interactive unless --select is given)
    Generate {
        /// Selection request, e.g. "intro-to-arrays: 2, basic-loops: all"
        #[arg(short, long, value_name = "REQUEST")]
        select: Option<String>,

        /// Output directory (default: next practice-problem-set-NN beside the library)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List available categories
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g., output.prefix)
        key: String,
    },

    /// Set a config value
    Set {
        /// Config key (e.g., library.ignore)
        key: String,

        /// Value to set (e.g., ".DS_Store,*.swp" or "[.DS_Store, *.swp]")
        value: String,
    },

    /// List all config values
    List,

    /// Show config file path
    Path,

    /// Initialize config file with defaults
    Init,
}
