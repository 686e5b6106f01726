//! Command dispatch: built-in commands and wrapped operations.

use std::fs;
use std::io::{self, Write};

use clap::{ArgMatches, FromArgMatches, Subcommand};
use clap_complete::generate;
use itertools::Itertools;
use tracing::{debug, instrument, warn};

use crate::application::services::Outcome;
use crate::catalog;
use crate::cli::args::{bind_parameters, build_cli, run_options, BuiltinCommand, ConfigCommands, GlobalArgs};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::domain::{kebab_case, ConfirmImpact, Operation};
use crate::infrastructure::aws::ConnectionOptions;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::interrupt::stop_on_interrupt;
use crate::infrastructure::InfraError;

/// Entry point after argument parsing.
pub fn execute_command(globals: &GlobalArgs, matches: &ArgMatches) -> CliResult<()> {
    let Some((name, sub_matches)) = matches.subcommand() else {
        return Err(CliError::Usage("no command given".into()));
    };

    let mut settings = Settings::load(globals.config.as_deref())?;
    if let Some(format) = globals.output {
        settings.output = format;
    }

    if BuiltinCommand::has_subcommand(name) {
        let builtin =
            BuiltinCommand::from_arg_matches(matches).map_err(|e| CliError::InvalidArgs(e.to_string()))?;
        return execute_builtin(builtin, globals, &settings);
    }

    let op = catalog::find(name).ok_or_else(|| CliError::Usage(format!("unknown command: {name}")))?;
    let options = ConnectionOptions {
        region: globals.region.clone(),
        profile: globals.profile.clone(),
        endpoint_url: globals.endpoint_url.clone(),
    };
    let container = ServiceContainer::new(settings, options)?;
    if op.paging.is_some() {
        if let Err(e) = stop_on_interrupt(container.stop.clone()) {
            warn!("Ctrl+C will abort instead of returning collected items: {}", e);
        }
    }
    run_operation(&container, op, sub_matches, &mut io::stdout().lock())
}

/// Run one wrapped operation and write its result to `out`.
#[instrument(skip_all, fields(command = op.command))]
pub fn run_operation(
    container: &ServiceContainer,
    op: &'static Operation,
    matches: &ArgMatches,
    out: &mut dyn Write,
) -> CliResult<()> {
    let params = bind_parameters(op, matches);
    let options = run_options(op, matches, &container.settings);
    debug!("params: {:?}, options: {:?}", params, options);

    match container.runner().run(op, &params, &options)? {
        Outcome::Declined => {
            output::warning(&format!("{}: cancelled, nothing was sent", op.command));
        }
        Outcome::Completed { output: value, next_token } => {
            output::emit(out, &value, container.settings.output)
                .map_err(|e| InfraError::io("write output", e))?;
            if let (Some(token), Some(paging)) = (next_token, op.paging) {
                output::hint(&format!(
                    "more results available: rerun with --{} {}",
                    kebab_case(paging.input_token),
                    token
                ));
            }
        }
    }
    Ok(())
}

fn execute_builtin(command: BuiltinCommand, globals: &GlobalArgs, settings: &Settings) -> CliResult<()> {
    match command {
        BuiltinCommand::Operations { service } => list_operations(service.as_deref()),
        BuiltinCommand::Config { command } => handle_config(command, globals, settings),
        BuiltinCommand::Completion { shell } => {
            let mut cmd = build_cli();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
    }
}

fn list_operations(service: Option<&str>) -> CliResult<()> {
    let filter = match service {
        Some(id) => Some(catalog::service(id).ok_or_else(|| {
            CliError::InvalidArgs(format!(
                "unknown service '{id}', expected one of: {}",
                catalog::services().iter().map(|s| s.id).join(", ")
            ))
        })?),
        None => None,
    };

    let ops = catalog::all().filter(|op| filter.map_or(true, |s| s.id == op.service.id));
    for (id, group) in &ops.chunk_by(|op| op.service.id) {
        let group: Vec<_> = group.collect();
        output::header(&format!("{} ({} operations)", id, group.len()));
        for op in group {
            output::detail(&format!("{:<48} {}{}", op.command, op.target(), markers(op)));
        }
    }
    Ok(())
}

fn markers(op: &Operation) -> String {
    let mut marks = Vec::new();
    if op.paging.is_some() {
        marks.push("paged");
    }
    if op.is_mutating() {
        marks.push(match op.impact {
            ConfirmImpact::High => "impact: high",
            ConfirmImpact::Medium => "impact: medium",
            _ => "impact: low",
        });
    }
    if marks.is_empty() {
        String::new()
    } else {
        format!("  [{}]", marks.join(", "))
    }
}

fn handle_config(command: ConfigCommands, globals: &GlobalArgs, settings: &Settings) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            print!("{}", settings.to_toml()?);
            Ok(())
        }
        ConfigCommands::Init { force } => {
            let path = global_config_path()
                .ok_or_else(|| CliError::Usage("cannot determine config directory".into()))?;
            if path.exists() && !force {
                return Err(CliError::Usage(format!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                )));
            }
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .map_err(|e| InfraError::io(format!("create {}", parent.display()), e))?;
            }
            fs::write(&path, Settings::template())
                .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
            output::action("Created", &path.display());
            Ok(())
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => {
                    let state = if path.exists() { "" } else { " (not found)" };
                    output::detail(&format!("global:   {}{}", path.display(), state));
                }
                None => output::detail("global:   (no config directory)"),
            }
            if let Some(path) = &globals.config {
                output::detail(&format!("explicit: {}", path.display()));
            }
            Ok(())
        }
    }
}
