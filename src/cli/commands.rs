//! Command dispatch

use std::io;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::session::printable_lines;
use crate::application::Session;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, RenderStyle, Settings};
use crate::domain::AvlTree;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    debug!("settings: {:?}", settings);

    match &cli.command {
        None | Some(Commands::Menu) => menu(&settings),
        Some(Commands::Render {
            values,
            remove,
            style,
        }) => render(&settings, values, remove, *style),
        Some(Commands::Config { command }) => config(&settings, command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            generate(*shell, &mut cmd, "avltree", &mut io::stdout());
            Ok(())
        }
    }
}

#[instrument(skip_all)]
fn menu(settings: &Settings) -> CliResult<()> {
    let mut session = Session::new(settings);
    let stdin = io::stdin();
    session.run(stdin.lock(), io::stdout().lock())?;
    Ok(())
}

#[instrument(skip(settings))]
fn render(
    settings: &Settings,
    values: &[i64],
    remove: &[i64],
    style: Option<RenderStyle>,
) -> CliResult<()> {
    if values.is_empty() {
        return Err(CliError::InvalidArgs("no values to insert".into()));
    }

    let mut tree: AvlTree<i64> = values.iter().copied().collect();
    for value in remove {
        if !tree.contains(value) {
            output::warning(&format!("{} is not in the tree", value));
        }
        tree.remove(value);
    }

    for row in printable_lines(&tree, style.unwrap_or(settings.style), &settings.row_prefix) {
        output::info(&row);
    }
    Ok(())
}

fn config(settings: &Settings, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::info(&settings.to_toml()?),
        ConfigCommands::Template => output::info(&Settings::template()),
        ConfigCommands::Path => match global_config_path() {
            Some(path) => {
                output::header("Global config");
                output::info(&path.display());
            }
            None => output::warning("no home directory, global config disabled"),
        },
    }
    Ok(())
}
