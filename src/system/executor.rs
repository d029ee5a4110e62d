// src/system/executor.rs

use crate::models::{CreationCommand, Shell};
use crate::system::shell;
use std::path::Path;
use std::process::{Command as StdCommand, Stdio};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("Command '{0}' could not be executed: {1}")]
    CommandFailed(String, std::io::Error),
    #[error("Command '{0}' exited with a non-zero error code.")]
    NonZeroExitStatus(String),
}

/// Runs the creation command for `target` and waits for it to finish.
///
/// Output is passed straight through to the terminal, except that the child's
/// stdout is redirected to stderr: stdout belongs to the command the calling
/// shell evaluates.
pub fn run_creation(command: &CreationCommand, target: &Path) -> Result<(), ExecutionError> {
    let display = format!(
        "{} {}",
        shell::render_command(command, Shell::Bash),
        shell::quote_path(target)
    );
    log::debug!("Running: {}", display);

    let status = StdCommand::new(&command.program)
        .args(&command.args)
        .arg(target)
        .stdin(Stdio::null())
        .stdout(std::io::stderr())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| ExecutionError::CommandFailed(display.clone(), e))?;

    if !status.success() {
        return Err(ExecutionError::NonZeroExitStatus(display));
    }
    Ok(())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_successful_command_creates_target() {
        let tmp = TempDir::new().unwrap();
        let target = tmp.path().join("env");
        let command = CreationCommand {
            program: PathBuf::from("mkdir"),
            args: vec!["-p".to_string()],
        };
        run_creation(&command, &target).unwrap();
        assert!(target.is_dir());
    }

    #[test]
    fn test_failing_command_reports_exit_status() {
        let tmp = TempDir::new().unwrap();
        let command = CreationCommand {
            program: PathBuf::from("false"),
            args: Vec::new(),
        };
        let err = run_creation(&command, tmp.path()).unwrap_err();
        assert!(matches!(err, ExecutionError::NonZeroExitStatus(_)));
    }

    #[test]
    fn test_missing_program_is_reported() {
        let tmp = TempDir::new().unwrap();
        let command = CreationCommand {
            program: PathBuf::from("/definitely/not/a/python"),
            args: Vec::new(),
        };
        let err = run_creation(&command, tmp.path()).unwrap_err();
        assert!(matches!(err, ExecutionError::CommandFailed(_, _)));
    }
}
