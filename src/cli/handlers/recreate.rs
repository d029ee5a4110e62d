// src/cli/handlers/recreate.rs

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;

use crate::{
    cli::handlers::commons::Session,
    core::resolver::ResolveError,
    system::venvs,
};

#[derive(Parser, Debug, Default)]
#[command(
    no_binary_name = true,
    about = "Wipes the project's virtual environment and creates it again from scratch."
)]
struct RecreateArgs {}

pub fn handle(args: Vec<String>) -> Result<()> {
    let _args = RecreateArgs::try_parse_from(&args)?;
    let session = Session::load()?;
    let resolver = session.resolver();
    let resolution = resolver.resolve()?;

    let environment = &resolution.environment;
    if !environment.applies() {
        return Err(ResolveError::NotInProject.into());
    }

    let command = resolver.creation_command(&resolution.interpreter)?;
    eprintln!(
        "Recreating virtual environment '{}' at {}",
        environment.name.cyan(),
        environment.path.display()
    );
    venvs::recreate(&command, &environment.path).with_context(|| {
        format!(
            "Could not recreate the virtual environment at '{}'",
            environment.path.display()
        )
    })?;
    eprintln!("{}", "Done.".green());
    Ok(())
}
