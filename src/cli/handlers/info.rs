// src/cli/handlers/info.rs

use crate::{
    cli::handlers::commons::Session,
    core::{paths, probe::FilesystemProbe},
    models::{InterpreterSource, Resolution},
    system::pythons,
};
use anyhow::Result;
use clap::Parser;
use colored::*;

#[derive(Parser, Debug, Default)]
#[command(
    no_binary_name = true,
    about = "Shows the active environment, the python in use and what this directory resolves to."
)]
struct InfoArgs {}

pub fn handle(args: Vec<String>) -> Result<()> {
    let _info_args = InfoArgs::try_parse_from(&args)?;
    let session = Session::load()?;
    let resolution = session.resolver().resolve()?;

    print_active(&session);
    print_resolution(&session, &resolution);
    print_available_versions(&session, &resolution)?;
    Ok(())
}

/// What the shell is using right now.
fn print_active(session: &Session) {
    match &session.ctx.virtual_env {
        Some(venv) => println!("Using this virtualenv: {}", venv.display()),
        None => println!("Using system environment"),
    }

    match &session.ctx.virtual_env {
        Some(venv) => {
            let python = venv.join("bin").join("python");
            println!("Using this python: {}", python.display());
            let real = session
                .probe
                .canonicalize(&python)
                .unwrap_or_else(|_| python.clone());
            println!("...which is really at: {}", real.display());
        }
        None => println!("Using system python"),
    }
}

/// What this directory should be using.
fn print_resolution(session: &Session, resolution: &Resolution) {
    let home = &session.ctx.home;
    println!("\n--- {} ---", "Resolution".yellow());

    let root = match &resolution.project_root {
        Some(root) => paths::unresolve(root, home),
        None => "(not within a python project)".dimmed().to_string(),
    };
    println!("  {:<14} {}", "Project root:".blue(), root);

    let environment = &resolution.environment;
    if environment.applies() {
        let state = match (environment.exists, environment.is_active) {
            (true, true) => "active".green(),
            (true, false) => "inactive".yellow(),
            (false, _) => "missing".red(),
        };
        println!(
            "  {:<14} {} ({})",
            "Environment:".blue(),
            environment.name.cyan(),
            state
        );
        println!(
            "  {:<14} {}",
            "Location:".blue(),
            paths::unresolve(&environment.path, home)
        );
    }

    let interpreter = &resolution.interpreter;
    let version = interpreter
        .version
        .clone()
        .unwrap_or_else(|| "system".to_string());
    let source = match &interpreter.source {
        InterpreterSource::PinnedFile(file) => format!("pinned by {}", paths::unresolve(file, home)),
        InterpreterSource::Override(key) => format!("override for {}", paths::unresolve(key, home)),
        InterpreterSource::GlobalCurrent(link) => format!("chosen via {}", paths::unresolve(link, home)),
        InterpreterSource::System => "found on PATH".to_string(),
    };
    println!(
        "  {:<14} {} {}",
        "Python:".blue(),
        version.cyan(),
        format!("({})", source).dimmed()
    );
    if interpreter.framework {
        println!("  {:<14} {}", "Builds:".blue(), "framework".cyan());
    }
}

fn print_available_versions(session: &Session, resolution: &Resolution) -> Result<()> {
    let root = session.ctx.builds_root(resolution.interpreter.framework);
    let versions = pythons::list_versions(&session.probe, root)?;
    let current = pythons::current_version(&session.probe, root);

    println!(
        "\n--- {} ({}) ---",
        "Available pythons".yellow(),
        paths::unresolve(root, &session.ctx.home)
    );
    if versions.is_empty() {
        println!("  {}", "No python builds installed.".dimmed());
        return Ok(());
    }
    for version in versions {
        if current.as_deref() == Some(version.as_str()) {
            println!("  * {}", version.green());
        } else {
            println!("    {}", version);
        }
    }
    Ok(())
}
