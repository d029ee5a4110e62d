// src/cli/handlers/choose.rs

use anyhow::Result;
use clap::Parser;

use crate::{cli::handlers::commons::Session, system::pythons};

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true, about = "Sets your preferred python version.")]
struct ChooseArgs {
    /// The version to use when no project or override pins one.
    python_version: String,

    /// Choose from the framework builds instead of the standard ones.
    #[arg(long)]
    framework: bool,
}

pub fn handle(args: Vec<String>) -> Result<()> {
    let choose_args = ChooseArgs::try_parse_from(&args)?;
    let session = Session::load()?;

    let root = session.ctx.builds_root(choose_args.framework);
    let python = pythons::choose(root, &choose_args.python_version)?;
    println!("Now using the python at: {}", python.display());
    Ok(())
}
