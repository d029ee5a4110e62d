use anyhow::{Result, anyhow};
use clap::CommandFactory;

use crate::cli::{Cli, handlers};

/// A command, its aliases and its handler.
struct CommandDefinition {
    name: &'static str,
    aliases: &'static [&'static str],
    handler: fn(Vec<String>) -> Result<()>,
}

/// Every command the binary understands.
static COMMAND_REGISTRY: &[CommandDefinition] = &[
    CommandDefinition {
        name: "bash",
        aliases: &["zsh", "sh"],
        handler: handlers::activate::handle_bash,
    },
    CommandDefinition {
        name: "fish",
        aliases: &[],
        handler: handlers::activate::handle_fish,
    },
    CommandDefinition {
        name: "info",
        aliases: &[],
        handler: handlers::info::handle,
    },
    CommandDefinition {
        name: "recreate",
        aliases: &[],
        handler: handlers::recreate::handle,
    },
    CommandDefinition {
        name: "choose",
        aliases: &[],
        handler: handlers::choose::handle,
    },
    CommandDefinition {
        name: "pyversionspath",
        aliases: &[],
        handler: handlers::roots::handle_pythons,
    },
    CommandDefinition {
        name: "pyversionspath_framework",
        aliases: &[],
        handler: handlers::roots::handle_pythons_framework,
    },
    CommandDefinition {
        name: "venvspath",
        aliases: &[],
        handler: handlers::roots::handle_venvs,
    },
    CommandDefinition {
        name: "override",
        aliases: &["overrides"],
        handler: handlers::overrides::handle,
    },
    CommandDefinition {
        name: "markers",
        aliases: &[],
        handler: handlers::markers::handle,
    },
];

/// Finds a command definition in the registry by its name or alias.
fn find_command(name: &str) -> Option<&'static CommandDefinition> {
    COMMAND_REGISTRY
        .iter()
        .find(|cmd| cmd.name == name || cmd.aliases.contains(&name))
}

/// Routes the parsed command line to its handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    log::debug!("CLI args parsed: {:?}", cli);

    let Some(name) = cli.command else {
        Cli::command().print_long_help()?;
        return Ok(());
    };

    let command = find_command(&name).ok_or_else(|| {
        let known: Vec<&str> = COMMAND_REGISTRY.iter().map(|cmd| cmd.name).collect();
        anyhow!("Unknown command '{}'. Expected one of: {}.", name, known.join(", "))
    })?;
    (command.handler)(cli.args)
}
