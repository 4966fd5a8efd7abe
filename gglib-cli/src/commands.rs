//! CLI subcommand handlers.
//!
//! All user-facing presentation lives here; the core library only returns
//! structured outcomes.

use crate::{Commands, ConfigAction};
use anyhow::Context;
use dialoguer::Input;
use gglib_core::error::RegistryError;
use gglib_core::launcher::{LaunchOutcome, Launcher};
use gglib_core::model::NewModel;
use gglib_core::registry::Registry;
use gglib_core::validate::is_model_file;
use gglib_core::{GglibConfig, load_config};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};

/// Handle a CLI subcommand.
pub async fn handle_command(command: Commands) -> anyhow::Result<ExitCode> {
    let config = load_config().map_err(|e| anyhow::anyhow!("configuration error: {e}"))?;

    match command {
        Commands::Add {
            path,
            name,
            parameters,
            max_context,
        } => handle_add(&config, path, name, parameters, max_context),
        Commands::List => handle_list(&config),
        Commands::Show { id } => handle_show(&config, id),
        Commands::Serve { id, ctx } => handle_launch(&config, id, ctx, Mode::Serve).await,
        Commands::Run { id, ctx } => handle_launch(&config, id, ctx, Mode::Run).await,
        Commands::Config { action } => handle_config(&config, action),
    }
}

fn open_registry(config: &GglibConfig) -> anyhow::Result<Registry> {
    let db_path = config.database_path();
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("cannot create {}", parent.display()))?;
    }
    debug!(path = %db_path.display(), "opening catalog");
    Registry::open(&db_path).map_err(|e| anyhow::anyhow!("cannot open catalog: {e}"))
}

fn handle_add(
    config: &GglibConfig,
    path: PathBuf,
    name: Option<String>,
    parameters: Option<f64>,
    max_context: Option<i64>,
) -> anyhow::Result<ExitCode> {
    if !is_model_file(&path) {
        eprintln!(
            "'{}' is not a GGUF model file (missing, not a regular file, or wrong extension).",
            path.display()
        );
        return Ok(ExitCode::FAILURE);
    }

    let file_size = std::fs::metadata(&path)
        .with_context(|| format!("cannot stat {}", path.display()))?
        .len() as i64;

    // Prompt for whatever the flags didn't supply. dialoguer re-prompts on
    // values that fail to parse, so malformed numbers never reach the
    // registry.
    let name = match name {
        Some(name) => name,
        None => {
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            Input::new()
                .with_prompt("Model name")
                .default(stem)
                .interact_text()?
        }
    };
    let parameters = match parameters {
        Some(p) => p,
        None => Input::new()
            .with_prompt("Parameters (billions, e.g. 7.0)")
            .interact_text()?,
    };
    let max_context = match max_context {
        Some(c) => c,
        None => Input::new()
            .with_prompt("Max context length")
            .interact_text()?,
    };

    let model = NewModel {
        name,
        parameters,
        max_context,
        file_path: path,
        file_size,
    };

    let mut registry = open_registry(config)?;
    match registry.add(&model) {
        Ok(record) => {
            info!(id = record.id, "model registered");
            println!("Registered model #{}: {}", record.id, record.name);
            Ok(ExitCode::SUCCESS)
        }
        Err(RegistryError::DuplicatePath { path }) => {
            eprintln!("'{}' is already registered.", path.display());
            Ok(ExitCode::FAILURE)
        }
        Err(RegistryError::InvalidRecord { reason }) => {
            eprintln!("Invalid model metadata: {reason}.");
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(anyhow::anyhow!("failed to register model: {e}")),
    }
}

fn handle_list(config: &GglibConfig) -> anyhow::Result<ExitCode> {
    let registry = open_registry(config)?;
    let models = registry
        .list()
        .map_err(|e| anyhow::anyhow!("failed to list catalog: {e}"))?;

    if models.is_empty() {
        println!("No models registered. Add one with `gglib add <file.gguf>`.");
        return Ok(ExitCode::SUCCESS);
    }

    println!(
        "{:>4}  {:<28} {:>8} {:>9} {:>10}  {:<12} PATH",
        "ID", "NAME", "PARAMS", "CONTEXT", "SIZE", "ADDED"
    );
    for m in &models {
        println!(
            "{:>4}  {:<28} {:>7}B {:>9} {:>10}  {:<12} {}",
            m.id,
            m.name,
            m.parameters,
            m.max_context,
            format_size(m.file_size),
            m.created_on.format("%Y-%m-%d").to_string(),
            m.file_path.display(),
        );
    }
    println!("\n{} model(s)", models.len());
    Ok(ExitCode::SUCCESS)
}

fn handle_show(config: &GglibConfig, id: i64) -> anyhow::Result<ExitCode> {
    let registry = open_registry(config)?;
    match registry
        .get_by_id(id)
        .map_err(|e| anyhow::anyhow!("failed to read catalog: {e}"))?
    {
        Some(m) => {
            println!("Model #{}", m.id);
            println!("  name:        {}", m.name);
            println!("  parameters:  {}B", m.parameters);
            println!("  max context: {}", m.max_context);
            println!("  file:        {}", m.file_path.display());
            println!("  size:        {}", format_size(m.file_size));
            println!("  added:       {}", m.created_on.to_rfc3339());
            Ok(ExitCode::SUCCESS)
        }
        None => {
            eprintln!("No model with id {id}.");
            Ok(ExitCode::FAILURE)
        }
    }
}

#[derive(Clone, Copy)]
enum Mode {
    Serve,
    Run,
}

async fn handle_launch(
    config: &GglibConfig,
    id: i64,
    ctx: Option<i64>,
    mode: Mode,
) -> anyhow::Result<ExitCode> {
    let registry = open_registry(config)?;
    let Some(model) = registry
        .get_by_id(id)
        .map_err(|e| anyhow::anyhow!("failed to read catalog: {e}"))?
    else {
        eprintln!("No model with id {id}.");
        return Ok(ExitCode::FAILURE);
    };

    if !is_model_file(&model.file_path) {
        eprintln!(
            "Model file '{}' is gone or no longer a GGUF file. Re-check the catalog entry.",
            model.file_path.display()
        );
        return Ok(ExitCode::FAILURE);
    }

    let launcher = Launcher::new(
        config.server.server_command.clone(),
        config.server.cli_command.clone(),
    );
    let (command, outcome) = match mode {
        Mode::Serve => (
            config.server.server_command.as_str(),
            launcher.serve(&model.file_path, ctx).await,
        ),
        Mode::Run => (
            config.server.cli_command.as_str(),
            launcher.run_cli(&model.file_path, ctx).await,
        ),
    };

    match outcome {
        Ok(LaunchOutcome::Exited(code)) => {
            if code != Some(0) {
                debug!(id = model.id, command, ?code, "child exited non-zero");
            }
            Ok(ExitCode::from(child_exit_code(code)))
        }
        Ok(LaunchOutcome::Interrupted) => {
            println!("Interrupted.");
            Ok(ExitCode::from(130))
        }
        Err(e) => Err(anyhow::anyhow!(
            "{e}. Is llama.cpp installed and '{command}' on your PATH?"
        )),
    }
}

/// Pass the child's exit status through unchanged; it is the server's own
/// termination status, not ours to reinterpret. `None` means the child was
/// killed by a signal we didn't send.
fn child_exit_code(code: Option<i32>) -> u8 {
    match code {
        Some(code) => code.clamp(0, 255) as u8,
        None => 1,
    }
}

fn handle_config(config: &GglibConfig, action: ConfigAction) -> anyhow::Result<ExitCode> {
    match action {
        ConfigAction::Init => {
            let Some(config_path) = gglib_core::config::config_path() else {
                anyhow::bail!("cannot determine a config directory on this platform");
            };
            if config_path.exists() {
                println!(
                    "Configuration file already exists at: {}",
                    config_path.display()
                );
                return Ok(ExitCode::SUCCESS);
            }
            if let Some(parent) = config_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let toml_str = toml::to_string_pretty(&GglibConfig::default())?;
            std::fs::write(&config_path, &toml_str)?;
            println!("Created default configuration at: {}", config_path.display());
            Ok(ExitCode::SUCCESS)
        }
        ConfigAction::Show => {
            let toml_str = toml::to_string_pretty(config)?;
            println!("{toml_str}");
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Human-readable byte size, binary units.
fn format_size(bytes: i64) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];
    let mut value = bytes.max(0) as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KiB");
        assert_eq!(format_size(13_481_000_000), "12.6 GiB");
    }

    #[test]
    fn test_exit_code_passthrough() {
        assert_eq!(child_exit_code(Some(0)), 0);
        assert_eq!(child_exit_code(Some(7)), 7);
        assert_eq!(child_exit_code(Some(300)), 255);
        assert_eq!(child_exit_code(None), 1);
    }
}
