// src/core/paths.rs

use crate::constants::{APP_NAME, CONFIG_FILENAME};
use crate::core::probe::FilesystemProbe;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PathError {
    #[error("Could not find the home directory.")]
    HomeDirNotFound,
    #[error("Could not find the system data directory.")]
    DataDirNotFound,
    #[error("Could not determine the current directory: {0}")]
    CurrentDir(#[source] std::io::Error),
    #[error("Could not canonicalize '{path}': {source}")]
    Canonicalize {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Expands a leading `~` against the given home directory.
///
/// The home directory is passed in rather than looked up so the expansion
/// follows the invocation context, not the real process environment.
pub fn expand_home(path: &Path, home: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    if !raw.starts_with('~') {
        return path.to_path_buf();
    }
    let home_str = home.to_string_lossy();
    let expanded = shellexpand::tilde_with_context(&raw, || Some(home_str.as_ref()));
    PathBuf::from(expanded.into_owned())
}

/// Rewrites a path under `home` into `~/...` shorthand. Inverse of [`expand_home`].
pub fn unresolve(path: &Path, home: &Path) -> String {
    match path.strip_prefix(home) {
        Ok(rest) if rest.as_os_str().is_empty() => "~".to_string(),
        Ok(rest) => format!("~/{}", rest.to_string_lossy()),
        Err(_) => path.to_string_lossy().into_owned(),
    }
}

/// Canonicalizes a user-supplied path: expands `~`, anchors relative paths at
/// `base`, and resolves symlinks through the probe.
///
/// Nonexistent paths are still canonicalized structurally; only genuine I/O
/// failures (permissions and the like) produce an error.
pub fn canonicalize(
    probe: &dyn FilesystemProbe,
    path: &Path,
    home: &Path,
    base: &Path,
) -> Result<PathBuf, PathError> {
    let expanded = expand_home(path, home);
    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        base.join(expanded)
    };
    probe
        .canonicalize(&absolute)
        .map_err(|source| PathError::Canonicalize {
            path: absolute.display().to_string(),
            source,
        })
}

/// Tests whether `path` looks like the root of a project: any of the marker
/// names exists as a regular file directly inside it.
pub fn is_project_root(probe: &dyn FilesystemProbe, path: &Path, markers: &[String]) -> bool {
    markers
        .iter()
        .any(|marker| probe.is_file(&path.join(marker)))
}

/// Returns the user's home directory.
pub fn home_dir() -> Result<PathBuf, PathError> {
    dirs::home_dir().ok_or(PathError::HomeDirNotFound)
}

/// Returns the default path of the persisted configuration file
/// (`<data_dir>/autovenv/config.toml`).
pub fn default_config_path() -> Result<PathBuf, PathError> {
    dirs::data_dir()
        .ok_or(PathError::DataDirNotFound)
        .map(|dir| dir.join(APP_NAME).join(CONFIG_FILENAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::probe::memory::MemoryProbe;

    #[test]
    fn test_expand_home_uses_given_home() {
        let expanded = expand_home(Path::new("~/projects/foo"), Path::new("/h"));
        assert_eq!(expanded, PathBuf::from("/h/projects/foo"));
    }

    #[test]
    fn test_expand_home_leaves_absolute_paths_alone() {
        let expanded = expand_home(Path::new("/srv/app"), Path::new("/h"));
        assert_eq!(expanded, PathBuf::from("/srv/app"));
    }

    #[test]
    fn test_unresolve_inverts_expand() {
        assert_eq!(unresolve(Path::new("/h/projects/foo"), Path::new("/h")), "~/projects/foo");
        assert_eq!(unresolve(Path::new("/h"), Path::new("/h")), "~");
        assert_eq!(unresolve(Path::new("/srv/app"), Path::new("/h")), "/srv/app");
        // Only whole components count as the home prefix.
        assert_eq!(unresolve(Path::new("/home2/x"), Path::new("/home")), "/home2/x");
    }

    #[test]
    fn test_canonicalize_resolves_symlinks_and_relative_paths() {
        let probe = MemoryProbe::new()
            .with_dir("/data/real")
            .with_symlink("/h/link", "/data/real");

        let resolved =
            canonicalize(&probe, Path::new("~/link/sub"), Path::new("/h"), Path::new("/")).unwrap();
        assert_eq!(resolved, PathBuf::from("/data/real/sub"));

        let relative =
            canonicalize(&probe, Path::new("../link"), Path::new("/h"), Path::new("/h/x")).unwrap();
        assert_eq!(relative, PathBuf::from("/data/real"));
    }

    #[test]
    fn test_is_project_root_requires_regular_file() {
        let probe = MemoryProbe::new()
            .with_file("/h/proj/requirements.txt", "")
            .with_dir("/h/other/requirements.txt");
        let markers = vec!["requirements.txt".to_string()];

        assert!(is_project_root(&probe, Path::new("/h/proj"), &markers));
        assert!(!is_project_root(&probe, Path::new("/h/other"), &markers));
        assert!(!is_project_root(&probe, Path::new("/h/proj"), &[]));
    }
}
