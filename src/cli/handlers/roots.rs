// src/cli/handlers/roots.rs

// Prints one of the configured roots, for use from shell scripts.

use anyhow::Result;
use clap::Parser;

use crate::cli::handlers::commons::Session;

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true)]
struct RootArgs {}

pub fn handle_pythons(args: Vec<String>) -> Result<()> {
    let _args = RootArgs::try_parse_from(&args)?;
    let session = Session::load()?;
    println!("{}", session.ctx.pythons_root.display());
    Ok(())
}

pub fn handle_pythons_framework(args: Vec<String>) -> Result<()> {
    let _args = RootArgs::try_parse_from(&args)?;
    let session = Session::load()?;
    println!("{}", session.ctx.pythons_framework_root.display());
    Ok(())
}

pub fn handle_venvs(args: Vec<String>) -> Result<()> {
    let _args = RootArgs::try_parse_from(&args)?;
    let session = Session::load()?;
    println!("{}", session.ctx.venvs_root.display());
    Ok(())
}
