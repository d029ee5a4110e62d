// src/cli/handlers/markers.rs

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use colored::*;

use crate::cli::handlers::commons::Session;

#[derive(Parser, Debug)]
#[command(
    no_binary_name = true,
    about = "Manages the file names that mark a directory as a python project."
)]
struct MarkersArgs {
    #[command(subcommand)]
    action: MarkersAction,
}

#[derive(Subcommand, Debug)]
enum MarkersAction {
    /// Lists the marker file names.
    List,
    /// Adds a marker file name.
    Add { name: String },
    /// Removes a marker file name.
    Remove { name: String },
}

pub fn handle(args: Vec<String>) -> Result<()> {
    let markers_args = MarkersArgs::try_parse_from(&args)?;
    let mut session = Session::load()?;

    match markers_args.action {
        MarkersAction::List => {
            if session.config.marker_file_names.is_empty() {
                println!("{}", "No marker files configured.".dimmed());
            }
            for name in &session.config.marker_file_names {
                println!("{}", name);
            }
            Ok(())
        }
        MarkersAction::Add { name } => {
            if name.is_empty() || name.contains(['/', '\\']) {
                bail!("Invalid marker '{}': expected a plain file name.", name);
            }
            if !session.config.add_marker(&name) {
                println!("'{}' is already a marker.", name);
                return Ok(());
            }
            println!("{} {}", "Marker added:".green(), name);
            session.save_config()
        }
        MarkersAction::Remove { name } => {
            if !session.config.remove_marker(&name) {
                bail!("'{}' is not a marker.", name);
            }
            println!("{} {}", "Marker removed:".green(), name);
            session.save_config()
        }
    }
}
