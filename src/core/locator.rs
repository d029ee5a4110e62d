use crate::core::paths;
use crate::core::probe::FilesystemProbe;
use crate::models::Configuration;
use std::path::{Path, PathBuf};

/// Finds the project root for `start`.
///
/// Resolution order:
/// 1. An override that forces an environment name and whose key is a prefix of
///    `start` wins outright: its key is the project location.
/// 2. If `start` is not below `boundary`, there is no project.
/// 3. Otherwise the walk goes upward one directory at a time. Every directory
///    strictly below `boundary` that contains a marker file replaces the match
///    recorded so far, so the outermost qualifying ancestor wins. The boundary
///    itself is never a project root.
pub fn locate(
    probe: &dyn FilesystemProbe,
    start: &Path,
    boundary: &Path,
    config: &Configuration,
) -> Option<PathBuf> {
    if let Some((key, name)) = config.named_override_for(start) {
        log::debug!(
            "Override '{}' forces environment '{}' for '{}'.",
            key.display(),
            name,
            start.display()
        );
        return Some(key.to_path_buf());
    }

    if !start.starts_with(boundary) {
        log::debug!(
            "'{}' is outside of '{}'; not searching for a project.",
            start.display(),
            boundary.display()
        );
        return None;
    }

    let mut likely = None;
    let mut current = start;
    while current != boundary && current.starts_with(boundary) {
        if paths::is_project_root(probe, current, &config.marker_file_names) {
            log::trace!("Project marker found in '{}'.", current.display());
            likely = Some(current.to_path_buf());
        }
        match current.parent() {
            Some(parent) if parent != current => current = parent,
            _ => break,
        }
    }
    likely
}
