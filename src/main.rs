mod cli_args;

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

use cli_args::{Cli, Command};
use kommit::llm::OpenAiClient;
use kommit::{Config, LlmClient, logging};

fn read_diff(diff_file: Option<&Path>) -> Result<String> {
    match diff_file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read diff from {}", path.display())),
        None => {
            let mut diff = String::new();
            io::stdin()
                .read_to_string(&mut diff)
                .context("failed to read diff from stdin")?;
            Ok(diff)
        }
    }
}

fn run_message(cfg: &Config, llm: &dyn LlmClient, diff_file: Option<&Path>) -> Result<()> {
    let diff = read_diff(diff_file)?;

    if diff.trim().is_empty() {
        bail!("no diff provided");
    }

    let message = llm
        .generate_commit_message(cfg, &diff)
        .context("failed to generate commit message")?;

    println!("{message}");
    Ok(())
}

fn run_scopes(cfg: &Config, llm: &dyn LlmClient, files: &[String], existing: &[String]) -> Result<()> {
    let scopes = llm
        .generate_scopes_from_filenames(&cfg.llm.model, files, existing)
        .context("failed to suggest scopes")?;

    for scope in scopes {
        println!("{scope}");
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose);

    let cfg = Config::from_sources(cli.config.as_deref(), cli.model.clone())?;
    log::debug!("Using OpenAiClient with model: {}", cfg.llm.model);

    let llm = OpenAiClient::from_config(&cfg);

    match &cli.command {
        Command::Message { diff_file } => run_message(&cfg, &llm, diff_file.as_deref()),
        Command::Scopes { files, existing } => run_scopes(&cfg, &llm, files, existing),
    }
}
