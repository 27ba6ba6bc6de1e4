mod commands;
mod config;
mod error;
mod logging;
mod pipeline;
mod terminal;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use raynaui_core::Style;

use crate::config::GenerationFlags;
use crate::error::CliResult;

#[derive(Parser, Debug)]
#[command(
    name = "raynaui-ai",
    version,
    about = "AI-powered component generator for RaynaUI"
)]
struct Cli {
    /// Append JSON logs to this file instead of logging to stderr.
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,
    /// Log debug details.
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,
    /// Config file (defaults to ./raynaui.toml when present).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a RaynaUI component using AI.
    Generate(GenerateArgs),
    /// Generate multiple RaynaUI components using AI.
    GenerateMultiple(GenerateMultipleArgs),
    /// Initialize the RaynaUI project structure.
    Init(OutputArgs),
    /// Validate a registry JSON document.
    ValidateRegistry(ValidateRegistryArgs),
    /// Remove backup copies left by --backup.
    CleanBackups(OutputArgs),
}

#[derive(Args, Debug, Clone)]
pub(crate) struct GenerationArgs {
    /// Component style (new-york, default).
    #[arg(short, long, value_name = "STYLE")]
    pub style: Option<Style>,
    /// Output directory.
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub output: PathBuf,
    /// Skip generating the example page.
    #[arg(long, default_value_t = false)]
    pub no_example: bool,
    /// Skip generating documentation.
    #[arg(long, default_value_t = false)]
    pub no_docs: bool,
    /// Include a test file.
    #[arg(long, default_value_t = false)]
    pub test: bool,
    /// Overwrite existing files.
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,
    /// Copy existing files aside before overwriting them.
    #[arg(long, default_value_t = false, requires = "overwrite")]
    pub backup: bool,
    /// Anthropic API key (defaults to $ANTHROPIC_API_KEY).
    #[arg(long, value_name = "KEY")]
    pub api_key: Option<String>,
    /// Model to use.
    #[arg(long, value_name = "MODEL")]
    pub model: Option<String>,
}

impl GenerationArgs {
    pub fn flags(&self) -> GenerationFlags {
        GenerationFlags {
            style: self.style,
            no_example: self.no_example,
            no_docs: self.no_docs,
            test: self.test,
            overwrite: self.overwrite,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct GenerateArgs {
    /// Description of the component to generate.
    #[arg(value_name = "PROMPT")]
    pub prompt: Option<String>,
    #[command(flatten)]
    pub generation: GenerationArgs,
    /// Write the registry item JSON for the component to this file.
    #[arg(long, value_name = "FILE")]
    pub manifest: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct GenerateMultipleArgs {
    /// File containing component descriptions, one per line.
    #[arg(short, long, value_name = "FILE")]
    pub file: Option<PathBuf>,
    #[command(flatten)]
    pub generation: GenerationArgs,
}

#[derive(Args, Debug)]
pub(crate) struct OutputArgs {
    /// Output directory.
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub output: PathBuf,
}

#[derive(Args, Debug)]
pub(crate) struct ValidateRegistryArgs {
    /// Registry JSON file.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = logging::init_logging(cli.log_file.as_deref(), cli.verbose) {
        terminal::failure(&err.to_string());
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            tracing::error!(event = "command_failed", error = %err);
            terminal::failure(&err.to_string());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> CliResult<ExitCode> {
    let terminal = terminal::Terminal::detect();
    let config_path = cli.config;

    match cli.command {
        Command::Generate(args) => {
            let config = commands::load_file_config(config_path.as_deref())?;
            commands::run_generate(args, &config, &terminal).await
        }
        Command::GenerateMultiple(args) => {
            let config = commands::load_file_config(config_path.as_deref())?;
            commands::run_generate_multiple(args, &config, &terminal).await
        }
        Command::Init(args) => commands::run_init(args, &terminal).await,
        Command::ValidateRegistry(args) => commands::run_validate_registry(args).await,
        Command::CleanBackups(args) => commands::run_clean_backups(args).await,
    }
}
