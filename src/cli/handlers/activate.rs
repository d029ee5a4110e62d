// src/cli/handlers/activate.rs

use anyhow::Result;
use clap::Parser;

use crate::{cli::handlers::commons::Session, core::synthesizer, models::Shell};

#[derive(Parser, Debug, Default)]
#[command(
    no_binary_name = true,
    about = "Prints a command that activates the right environment for this directory."
)]
struct ActivateArgs {}

pub fn handle_bash(args: Vec<String>) -> Result<()> {
    handle(args, Shell::Bash)
}

pub fn handle_fish(args: Vec<String>) -> Result<()> {
    handle(args, Shell::Fish)
}

/// Prints the suggested command on stdout. Nothing is printed when the shell
/// is already in the right state.
fn handle(args: Vec<String>, dialect: Shell) -> Result<()> {
    let _args = ActivateArgs::try_parse_from(&args)?;
    let session = Session::load()?;

    let command = synthesizer::suggested_command(&session.resolver(), dialect)?;
    if !command.is_empty() {
        println!("{}", command);
    }
    Ok(())
}
