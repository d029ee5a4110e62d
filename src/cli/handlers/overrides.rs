// src/cli/handlers/overrides.rs

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use colored::*;
use std::path::Path;

use crate::{
    cli::handlers::commons::Session,
    core::{config, paths},
};

#[derive(Parser, Debug)]
#[command(
    no_binary_name = true,
    about = "Forces an interpreter version and/or environment name below a path."
)]
struct OverrideArgs {
    #[command(subcommand)]
    action: OverrideAction,
}

#[derive(Subcommand, Debug)]
enum OverrideAction {
    /// Lists every override.
    List,
    /// Adds or updates the override for a path.
    Set {
        /// The directory the override applies to (and everything below it).
        path: String,
        /// The interpreter version to use.
        #[arg(long)]
        version: Option<String>,
        /// The environment name to use.
        #[arg(long)]
        name: Option<String>,
    },
    /// Removes the override for a path.
    Unset { path: String },
}

pub fn handle(args: Vec<String>) -> Result<()> {
    let override_args = OverrideArgs::try_parse_from(&args)?;
    let mut session = Session::load()?;

    match override_args.action {
        OverrideAction::List => list(&session),
        OverrideAction::Set {
            path,
            version,
            name,
        } => {
            if version.is_none() && name.is_none() {
                bail!("Nothing to set: pass --version and/or --name.");
            }
            for value in version.iter().chain(name.iter()) {
                validate_half(value)?;
            }
            let key = session.ctx.canonicalize(&session.probe, Path::new(&path))?;
            let entry = session.config.set_override(key.clone(), version, name);
            println!(
                "{} {} = {}",
                "Override set:".green(),
                paths::unresolve(&key, &session.ctx.home),
                config::encode_override(entry)
            );
            session.save_config()
        }
        OverrideAction::Unset { path } => {
            let key = session.ctx.canonicalize(&session.probe, Path::new(&path))?;
            if !session.config.unset_override(&key) {
                bail!(
                    "No override is set for '{}'.",
                    paths::unresolve(&key, &session.ctx.home)
                );
            }
            println!(
                "{} {}",
                "Override removed:".green(),
                paths::unresolve(&key, &session.ctx.home)
            );
            session.save_config()
        }
    }
}

fn list(session: &Session) -> Result<()> {
    if session.config.overrides.is_empty() {
        println!("{}", "No overrides configured.".dimmed());
        return Ok(());
    }
    for (key, entry) in &session.config.overrides {
        let version = entry.interpreter_version.as_deref().unwrap_or("-");
        let name = entry.environment_name.as_deref().unwrap_or("-");
        println!(
            "{}  {} {}  {} {}",
            paths::unresolve(key, &session.ctx.home).cyan(),
            "version:".blue(),
            version,
            "name:".blue(),
            name
        );
    }
    Ok(())
}

/// Values are stored as `<version>/<envname>`, so neither half may contain `/`.
fn validate_half(value: &str) -> Result<()> {
    if value.trim().is_empty() || value.contains('/') {
        bail!("Invalid override value '{}': must be non-empty and contain no '/'.", value);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_half() {
        assert!(validate_half("3.12.1").is_ok());
        assert!(validate_half("mono").is_ok());
        assert!(validate_half("a/b").is_err());
        assert!(validate_half("  ").is_err());
    }

    #[test]
    fn test_set_arguments_parse() {
        let args = OverrideArgs::try_parse_from(["set", "~/work", "--version", "3.12.1"]).unwrap();
        match args.action {
            OverrideAction::Set {
                path,
                version,
                name,
            } => {
                assert_eq!(path, "~/work");
                assert_eq!(version.as_deref(), Some("3.12.1"));
                assert!(name.is_none());
            }
            other => panic!("unexpected action: {:?}", other),
        }
    }
}
