// src/bin/autovenv.rs

use autovenv::{
    cli::{Cli, dispatcher},
    core::resolver::ResolveError,
};
use clap::Parser;
use colored::*;

/// The main entry point of the `autovenv` application.
/// It sets up logging, parses arguments, dispatches to the correct handler,
/// and performs centralized error handling.
fn main() {
    // Logs go to stderr; stdout carries the command the shell evaluates.
    env_logger::init();

    if let Err(e) = dispatcher::dispatch(Cli::parse()) {
        // `recreate` outside a project prints its fixed message as-is, on stdout.
        if let Some(ResolveError::NotInProject) = e.downcast_ref::<ResolveError>() {
            println!("{}", e);
            std::process::exit(1);
        }

        // Argument errors from the per-command parsers render their own help.
        if let Some(clap_err) = e.downcast_ref::<clap::Error>() {
            clap_err.exit();
        }

        eprintln!("\n{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}
