//! Command dispatch

use std::io;
use std::path::PathBuf;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::application::services::{insert_all, Report, TreeService};
use crate::application::parse_operations;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::TreeRender;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Demo) => _demo(&load_settings(cli)?),
        Some(Commands::Run { ops, tree, check }) => _run(&load_settings(cli)?, ops, *tree, *check),
        Some(Commands::Config { command }) => _config(cli, command),
        Some(Commands::Completion { shell }) => _completion(*shell),
        None => Err(CliError::Usage(
            "no command given, see `avl --help`".to_string(),
        )),
    }
}

fn config_dir(cli: &Cli) -> PathBuf {
    cli.config_dir
        .clone()
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}

fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let dir = config_dir(cli);
    let settings = Settings::load(Some(&dir))?;
    debug!(?settings, "settings loaded");
    Ok(settings)
}

#[instrument(skip(settings))]
fn _demo(settings: &Settings) -> CliResult<()> {
    let mut service = TreeService::new(settings.check_invariants);
    let report = service.run(&insert_all(&settings.demo.values))?;

    output::header("Inorder traversal of the constructed AVL tree is");
    print_report(&report, settings);
    Ok(())
}

#[instrument(skip(settings))]
fn _run(settings: &Settings, ops: &[String], tree: bool, check: bool) -> CliResult<()> {
    let operations = parse_operations(ops)?;
    let mut service = TreeService::new(check || settings.check_invariants);
    let report = service.run(&operations)?;

    print_report(&report, settings);
    if tree || settings.show_tree {
        output::info(&service.tree().to_tree_string());
    }
    Ok(())
}

fn print_report(report: &Report, settings: &Settings) {
    output::info(&report.joined(&settings.separator));
    output::action("Tree Height", &report.height);
}

#[instrument(skip(cli))]
fn _config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = load_settings(cli)?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Init => output::info(&Settings::template()),
        ConfigCommands::Path => {
            let global = global_config_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(no home directory)".to_string());
            output::action("global", &global);
            output::action("local", &local_config_path(&config_dir(cli)).display());
        }
    }
    Ok(())
}

fn _completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
