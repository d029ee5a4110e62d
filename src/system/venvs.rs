// src/system/venvs.rs

use crate::models::CreationCommand;
use crate::system::executor::{self, ExecutionError};
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VenvError {
    #[error("Virtual environment '{0}' already exists.")]
    AlreadyExists(String),
    #[error("Could not prepare '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Execution(#[from] ExecutionError),
}

/// Creates the environment at `target` with `command`.
///
/// An existing target is left untouched and reported as
/// [`VenvError::AlreadyExists`]; callers treat that as a warning.
pub fn create(command: &CreationCommand, target: &Path) -> Result<(), VenvError> {
    if target.exists() {
        return Err(VenvError::AlreadyExists(target.display().to_string()));
    }
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|source| VenvError::Io {
            path: parent.display().to_string(),
            source,
        })?;
    }
    executor::run_creation(command, target)?;
    Ok(())
}

/// Removes the environment at `target`. A missing target is not an error.
pub fn delete(target: &Path) -> Result<(), VenvError> {
    match fs::remove_dir_all(target) {
        Ok(()) => {
            log::debug!("Removed '{}'.", target.display());
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(VenvError::Io {
            path: target.display().to_string(),
            source,
        }),
    }
}

/// Deletes the environment at `target` and creates it again.
pub fn recreate(command: &CreationCommand, target: &Path) -> Result<(), VenvError> {
    delete(target)?;
    match create(command, target) {
        Err(VenvError::AlreadyExists(path)) => {
            // Something recreated it between the delete and the create.
            log::warn!("Virtual environment '{}' already exists; leaving it as is.", path);
            Ok(())
        }
        other => other,
    }
}
