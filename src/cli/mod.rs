use clap::Parser;

pub mod dispatcher;
pub mod handlers;

/// autovenv: activates the right python virtual environment for the current directory.
///
/// `autovenv bash` (or `autovenv fish`) prints a command for the calling shell
/// to evaluate, typically from a prompt hook: `eval "$(autovenv bash)"`.
///
/// Commands:
///   bash, fish                  Print the activation command for the shell.
///   info                        Show the resolved project, environment and interpreter.
///   recreate                    Delete and re-create the project's environment.
///   choose <version>            Point the global `current` interpreter at <version>.
///   pyversionspath              Print the interpreter builds root.
///   pyversionspath_framework    Print the framework builds root.
///   venvspath                   Print the environments root.
///   override list|set|unset     Manage per-path overrides.
///   markers list|add|remove     Manage project marker file names.
#[derive(Parser, Debug)]
#[command(author, version, about, verbatim_doc_comment)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// The command to run. Without one, this help is shown.
    pub command: Option<String>,

    /// Arguments passed on to the command.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}
