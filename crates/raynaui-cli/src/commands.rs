use std::path::Path;
use std::process::ExitCode;

use raynaui_core::{
    GenerationOptions, GenerationResult, RegistryComponent, ValidationReport,
    validate_registry_item_json, validate_registry_json,
};
use raynaui_generate::GenerationEngine;
use raynaui_materialize::{
    FileMaterializer, ProjectLayout, SCAFFOLD_DIRS, UTILS_FILE, write_bytes_atomic,
};

use crate::config::{API_KEY_ENV, FileConfig, load_config, resolve_api_key};
use crate::error::{CliError, CliResult};
use crate::pipeline::ComponentGenerator;
use crate::terminal::{Terminal, bullet, error_bullet, failure, info, success, warning};
use crate::{GenerateArgs, GenerateMultipleArgs, GenerationArgs, OutputArgs, ValidateRegistryArgs};

pub fn load_file_config(explicit: Option<&Path>) -> CliResult<FileConfig> {
    let cwd = std::env::current_dir()?;
    load_config(explicit, &cwd)
}

pub async fn run_generate(
    args: GenerateArgs,
    config: &FileConfig,
    terminal: &Terminal,
) -> CliResult<ExitCode> {
    let api_key = require_api_key(&args.generation, terminal)?;
    let prompt = match args.prompt.filter(|prompt| !prompt.trim().is_empty()) {
        Some(prompt) => prompt,
        None => terminal
            .ask_line("Describe the component you want to generate:")?
            .ok_or_else(|| CliError::Missing("Component description is required".to_string()))?,
    };

    let options = resolve_options(config, &args.generation)?;
    let generator = build_generator(config, &args.generation, api_key)?;
    ensure_layout(&generator, terminal).await?;

    let spinner = terminal.spinner("Generating component...");
    let result = generator.generate_component(&prompt, &options).await;
    spinner.finish_and_clear();

    let component = match &result {
        GenerationResult::Generated { component } => component,
        GenerationResult::Failed { error } => {
            failure("Failed to generate component");
            error_bullet(error);
            return Ok(ExitCode::FAILURE);
        }
    };
    success("Component generated successfully");

    if args.generation.backup {
        report_backups(&generator.backup_existing(&result, &options).await);
    }

    let report = generator
        .materializer()
        .write_bundle(&result, &options.write_options())
        .await;
    if !report.is_success() {
        failure("Failed to write some files:");
        for error in &report.errors {
            error_bullet(&error.to_string());
        }
        return Ok(ExitCode::FAILURE);
    }

    println!();
    success(&format!("Generated {} files:", report.written.len()));
    for path in &report.written {
        bullet(path);
    }

    if let Some(path) = args.manifest.as_deref() {
        write_manifest(path, component).await?;
        success(&format!("Registry item written to {}", path.display()));
    }

    println!();
    info("Next steps:");
    bullet("Review the generated component");
    bullet("Install any missing dependencies");
    bullet("Test the component in your app");
    bullet("Customize as needed");
    Ok(ExitCode::SUCCESS)
}

pub async fn run_generate_multiple(
    args: GenerateMultipleArgs,
    config: &FileConfig,
    terminal: &Terminal,
) -> CliResult<ExitCode> {
    let api_key = require_api_key(&args.generation, terminal)?;
    let prompts = match &args.file {
        Some(path) => read_descriptions(&tokio::fs::read_to_string(path).await?),
        None => terminal
            .ask_line("Enter component descriptions (separated by semicolons):")?
            .map(|line| split_descriptions(&line))
            .unwrap_or_default(),
    };
    if prompts.is_empty() {
        return Err(CliError::Missing(
            "No component descriptions provided".to_string(),
        ));
    }

    let options = resolve_options(config, &args.generation)?;
    let generator = build_generator(config, &args.generation, api_key)?;
    ensure_layout(&generator, terminal).await?;

    let spinner = terminal.spinner(format!("Generating {} components...", prompts.len()));
    let results = generator
        .generate_multiple_components(&prompts, &options)
        .await;
    spinner.finish_and_clear();

    let failed: Vec<(&str, &str)> = prompts
        .iter()
        .zip(&results)
        .filter_map(|(prompt, result)| result.error().map(|error| (prompt.as_str(), error)))
        .collect();
    let generated = results.len() - failed.len();
    if failed.is_empty() {
        success(&format!("Generated {generated} components successfully"));
    } else {
        warning(&format!("Generated {generated}/{} components", prompts.len()));
        failure(&format!("Failed to generate {} components:", failed.len()));
        for (prompt, error) in &failed {
            error_bullet(&format!("{prompt}: {error}"));
        }
    }

    let successes: Vec<GenerationResult> = results
        .into_iter()
        .filter(GenerationResult::is_success)
        .collect();

    if args.generation.backup {
        for result in &successes {
            report_backups(&generator.backup_existing(result, &options).await);
        }
    }

    let batch = generator
        .materializer()
        .write_multiple_bundles(&successes, &options.write_options())
        .await;
    if !batch.is_success() {
        failure("Failed to write some files:");
        for error in &batch.errors {
            error_bullet(&error.to_string());
        }
        return Ok(ExitCode::FAILURE);
    }

    println!();
    success(&format!("Generated {} files total", batch.total_files));
    Ok(ExitCode::SUCCESS)
}

pub async fn run_init(args: OutputArgs, terminal: &Terminal) -> CliResult<ExitCode> {
    let layout = ProjectLayout::new(&args.output);
    let spinner = terminal.spinner("Creating project structure...");
    let report = layout.scaffold().await;
    spinner.finish_and_clear();
    let report = report?;

    success("RaynaUI project structure initialized!");
    info("Project layout:");
    for dir in SCAFFOLD_DIRS {
        let state = if report.created_dirs.iter().any(|created| created == dir) {
            "created"
        } else {
            "already present"
        };
        bullet(&format!("{dir} ({state})"));
    }
    let state = if report.wrote_utils {
        "created"
    } else {
        "already present"
    };
    bullet(&format!("{UTILS_FILE} ({state})"));
    Ok(ExitCode::SUCCESS)
}

pub async fn run_validate_registry(args: ValidateRegistryArgs) -> CliResult<ExitCode> {
    let content = tokio::fs::read_to_string(&args.file).await?;
    let document: serde_json::Value = serde_json::from_str(&content)?;
    let report = validate_registry_json(&document)?;
    print_issues(&report);

    if report.is_ok() {
        success(&format!(
            "{} is a valid registry ({} warning(s))",
            args.file.display(),
            report.warnings.len()
        ));
        Ok(ExitCode::SUCCESS)
    } else {
        failure(&format!(
            "{} has {} error(s)",
            args.file.display(),
            report.errors.len()
        ));
        Ok(ExitCode::FAILURE)
    }
}

pub async fn run_clean_backups(args: OutputArgs) -> CliResult<ExitCode> {
    let removed = FileMaterializer::new(&args.output).cleanup_backups().await;
    for path in &removed {
        bullet(&path.display().to_string());
    }
    success(&format!("Removed {} backup(s)", removed.len()));
    Ok(ExitCode::SUCCESS)
}

fn require_api_key(args: &GenerationArgs, terminal: &Terminal) -> CliResult<String> {
    let env_value = std::env::var(API_KEY_ENV).ok();
    if let Some(key) = resolve_api_key(args.api_key.clone(), env_value) {
        return Ok(key);
    }
    terminal
        .ask_secret("Enter your Anthropic API key:")?
        .ok_or_else(|| CliError::Missing("API key is required".to_string()))
}

fn resolve_options(config: &FileConfig, args: &GenerationArgs) -> CliResult<GenerationOptions> {
    let options = config.generation_options(&args.flags())?;
    tracing::debug!(event = "options_resolved", options = ?options);
    Ok(options)
}

fn build_generator(
    config: &FileConfig,
    args: &GenerationArgs,
    api_key: String,
) -> CliResult<ComponentGenerator> {
    let engine_config = config.engine_config(args.model.clone(), Some(api_key));
    tracing::debug!(event = "engine_configured", config = ?engine_config);
    let engine = GenerationEngine::new(engine_config)?;
    Ok(ComponentGenerator::new(engine, &args.output))
}

/// Validate the output layout, offering to scaffold it when incomplete.
async fn ensure_layout(generator: &ComponentGenerator, terminal: &Terminal) -> CliResult<()> {
    let root = Path::new(".");
    let report = generator.validate_project(root).await;
    if report.is_valid() {
        return Ok(());
    }

    warning("Missing project structure:");
    for missing in &report.missing {
        error_bullet(missing);
    }
    if !terminal.confirm("Create missing project structure?", true)? {
        return Err(CliError::Missing(
            "Cannot proceed without proper project structure (run `raynaui-ai init`)".to_string(),
        ));
    }
    generator.initialize_project(root).await?;
    success("Project structure created");
    Ok(())
}

async fn write_manifest(path: &Path, component: &RegistryComponent) -> CliResult<()> {
    let document = serde_json::to_value(component.to_registry_item())?;
    let report = validate_registry_item_json(&document)?;
    print_issues(&report);
    if !report.is_ok() {
        return Err(CliError::InvalidManifest(report.errors.len()));
    }

    let mut data = serde_json::to_vec_pretty(&document)?;
    data.push(b'\n');
    write_bytes_atomic(path, &data).await?;
    tracing::info!(event = "manifest_written", path = %path.display());
    Ok(())
}

fn report_backups(backups: &[std::path::PathBuf]) {
    for backup in backups {
        info(&format!("Backed up to {}", backup.display()));
    }
}

fn print_issues(report: &ValidationReport) {
    for issue in &report.errors {
        failure(&format!("[{}] {}: {}", issue.code, display_pointer(&issue.path), issue.message));
        if let Some(hint) = &issue.hint {
            error_bullet(&format!("hint: {hint}"));
        }
    }
    for issue in &report.warnings {
        warning(&format!("[{}] {}: {}", issue.code, display_pointer(&issue.path), issue.message));
        if let Some(hint) = &issue.hint {
            error_bullet(&format!("hint: {hint}"));
        }
    }
}

fn display_pointer(pointer: &str) -> &str {
    if pointer.is_empty() { "/" } else { pointer }
}

/// One description per non-blank line.
pub fn read_descriptions(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Semicolon-separated descriptions, blanks dropped.
pub fn split_descriptions(line: &str) -> Vec<String> {
    line.split(';')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}
