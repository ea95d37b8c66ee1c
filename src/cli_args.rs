use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// CLI options
#[derive(Parser, Debug)]
#[command(
    name = "kommit",
    version,
    about = "LLM-assisted Conventional Commit message generator"
)]
pub struct Cli {
    /// Config file (defaults to ./.kommitrc.toml, then ~/.config/kommit.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Model name to use (e.g. gpt-4o-mini)
    #[arg(long, env = "KOMMIT_MODEL", global = true)]
    pub model: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands, e.g. `git diff --cached | kommit message`
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a commit message for a unified diff
    Message {
        /// Read the diff from this file instead of stdin
        #[arg(long)]
        diff_file: Option<PathBuf>,
    },

    /// Suggest commit scopes from a list of project files
    Scopes {
        /// Project file paths
        #[arg(required = true)]
        files: Vec<String>,

        /// Scopes already in use (repeatable)
        #[arg(long = "existing")]
        existing: Vec<String>,
    },
}
