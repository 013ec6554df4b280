//! CLI argument definitions and command dispatch.
//!
//! ## Commands
//!
//! - `resolve`: enrich a recorded hook log with original-source variable
//!   names, fetching bundles and source maps over HTTP
//! - `init`: create a default `.hookscoperc.json`

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;
use std::{fs, io};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;

use crate::config::{CONFIG_FILE_NAME, default_config_json, load_config};
use crate::fetch::HttpScriptSource;
use crate::hooks::HookNode;
use crate::report::{SUCCESS_MARK, report};
use crate::resolve::resolve_hook_names;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Resolve(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve hook variable names for a recorded hook log
    Resolve(ResolveCommand),

    /// Initialize the hookscope configuration file
    Init,
}

#[derive(Debug, Args)]
pub struct ResolveCommand {
    /// Path to the hook log JSON (reads stdin when omitted)
    pub input: Option<PathBuf>,

    /// Print the enriched tree as JSON instead of a report
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Directory to search for the config file
    #[arg(long, default_value = ".")]
    pub config_root: PathBuf,

    /// HTTP timeout in seconds (overrides config file)
    #[arg(long)]
    pub request_timeout_secs: Option<u64>,

    /// Largest translated line considered safe to parse (overrides config file)
    #[arg(long)]
    pub max_source_lines: Option<u32>,

    /// Log resolution warnings to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy)]
pub enum ExitStatus {
    Success,
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::SUCCESS,
            ExitStatus::Error => ExitCode::from(1),
        }
    }
}

/// Main entry point for the hookscope CLI.
///
/// Dispatches to the appropriate command handler based on the parsed
/// arguments.
pub async fn run_cli(args: Arguments) -> Result<ExitStatus> {
    match args.command {
        Some(Command::Resolve(cmd)) => resolve_command(cmd).await,
        Some(Command::Init) => {
            init()?;
            Ok(ExitStatus::Success)
        }
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}

async fn resolve_command(cmd: ResolveCommand) -> Result<ExitStatus> {
    let config_result = load_config(&cmd.common.config_root)?;
    if cmd.common.verbose && !config_result.from_file {
        eprintln!("Note: No {} found, using default configuration", CONFIG_FILE_NAME);
    }
    let mut config = config_result.config;

    // Apply CLI overrides (CLI > config file > defaults)
    if let Some(request_timeout_secs) = cmd.common.request_timeout_secs {
        config.request_timeout_secs = request_timeout_secs;
    }
    if let Some(max_source_lines) = cmd.common.max_source_lines {
        config.max_source_lines = max_source_lines;
    }

    let text = match &cmd.input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read hook log from stdin")?;
            buffer
        }
    };
    let hooks: Vec<HookNode> =
        serde_json::from_str(&text).context("Hook log is not a valid JSON hook tree")?;

    let source = HttpScriptSource::new(Duration::from_secs(config.request_timeout_secs))?;
    let resolved = resolve_hook_names(&source, &config, &hooks).await;

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&resolved)?);
    } else {
        report(&resolved);
    }

    Ok(ExitStatus::Success)
}

fn init() -> Result<()> {
    let config_path = Path::new(CONFIG_FILE_NAME);
    if config_path.exists() {
        anyhow::bail!("{} already exists", CONFIG_FILE_NAME);
    }

    fs::write(config_path, default_config_json()?)?;
    println!(
        "{} {}",
        SUCCESS_MARK.green(),
        format!("Created {}", CONFIG_FILE_NAME).green()
    );

    Ok(())
}
