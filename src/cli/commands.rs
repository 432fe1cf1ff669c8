//! Command dispatch

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let project_dir = match &cli.project_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()
            .map_err(|e| InfraError::io("resolve current directory", e))?,
    };

    match &cli.command {
        Some(Commands::Build { dir, out }) => {
            let container = load_container(&project_dir)?;
            _build(&container, dir.as_deref().unwrap_or(&project_dir), out.as_deref())
        }
        Some(Commands::Tree { file }) => _tree(&load_container(&project_dir)?, file),
        Some(Commands::Stats { file }) => _stats(&load_container(&project_dir)?, file),
        Some(Commands::Predict { file, values }) => {
            _predict(&load_container(&project_dir)?, file, values)
        }
        Some(Commands::Config { command }) => _config(command, &project_dir),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Err(CliError::Usage(
            "no command given, run with --help for usage".to_string(),
        )),
    }
}

fn load_container(project_dir: &Path) -> CliResult<ServiceContainer> {
    let settings = Settings::load(Some(project_dir))?;
    debug!("settings: {:?}", settings);
    Ok(ServiceContainer::new(settings))
}

#[instrument(skip(container))]
fn _build(container: &ServiceContainer, dir: &Path, out: Option<&Path>) -> CliResult<()> {
    let out_dir: PathBuf = out
        .map(Path::to_path_buf)
        .unwrap_or_else(|| container.settings.output_dir.clone());
    let written = container.training.train_all(dir, &out_dir)?;
    output::summary("Built", &format!("{} trees into {}", written.len(), out_dir.display()));
    for path in &written {
        output::written(path);
    }
    Ok(())
}

#[instrument(skip(container))]
fn _tree(container: &ServiceContainer, file: &Path) -> CliResult<()> {
    let trained = container.training.train(file)?;
    output::header(&format!(
        "{} ({} nodes, depth {})",
        file.display(),
        trained.tree.count_nodes(),
        trained.tree.depth()
    ));
    output::plain(&trained.tree.to_tree_string());
    Ok(())
}

#[instrument(skip(container))]
fn _stats(container: &ServiceContainer, file: &Path) -> CliResult<()> {
    let stats = container.training.root_stats(file)?;
    output::header(&format!("{}: target entropy {:.3}", file.display(), stats.entropy));
    let best = stats.best_attribute().map(|a| a.name.clone());
    for attribute in &stats.attributes {
        let is_best = best.as_deref() == Some(attribute.name.as_str());
        output::attribute_gain(&attribute.name, attribute.gain, is_best);
        for value in &attribute.values {
            output::detail(&format!(
                "{}: entropy {:.3}, {} occurrences [{}]",
                value.value,
                value.entropy,
                value.occurrences,
                value.target_counts.iter().join(", ")
            ));
        }
    }
    Ok(())
}

#[instrument(skip(container))]
fn _predict(container: &ServiceContainer, file: &Path, values: &[String]) -> CliResult<()> {
    // a single argument may carry the whole comma separated example
    let values: Vec<String> = match values {
        [single] if single.contains(',') => single.split(',').map(str::to_string).collect(),
        _ => values.to_vec(),
    };
    let class = container.training.predict(file, &values)?;
    output::plain(&class);
    Ok(())
}

fn _config(command: &ConfigCommands, project_dir: &Path) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load(Some(project_dir))?;
            output::plain(&settings.to_toml()?);
        }
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::plain(&path.display()),
            None => {
                return Err(CliError::Usage(
                    "no config directory available on this platform".to_string(),
                ))
            }
        },
    }
    Ok(())
}
