//! # Interpreter Builds
//!
//! Helpers for the per-version builds tree (`~/.python-versions/<version>`)
//! and its global `current` symlink.

use crate::constants::CURRENT_LINK_NAME;
use crate::core::probe::FilesystemProbe;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PythonsError {
    #[error("Python version '{version}' is not installed under '{root}'.")]
    VersionNotInstalled { version: String, root: String },
    #[error("Could not list python versions in '{path}': {source}")]
    List {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("Could not update '{path}': {source}")]
    Link {
        path: String,
        #[source]
        source: io::Error,
    },
}

type PythonsResult<T> = Result<T, PythonsError>;

/// The version identifiers installed under `root`, sorted, excluding `current`.
pub fn list_versions(probe: &dyn FilesystemProbe, root: &Path) -> PythonsResult<Vec<String>> {
    let entries = match probe.list_dir(root) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(PythonsError::List {
                path: root.display().to_string(),
                source,
            });
        }
    };

    let mut versions: Vec<String> = entries
        .iter()
        .filter(|entry| probe.is_dir(entry))
        .filter_map(|entry| entry.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| name != CURRENT_LINK_NAME && !name.starts_with('.'))
        .collect();
    versions.sort();
    Ok(versions)
}

/// The build the `current` symlink points at, if any.
pub fn current_version(probe: &dyn FilesystemProbe, root: &Path) -> Option<String> {
    let link = root.join(CURRENT_LINK_NAME);
    if !probe.exists(&link) {
        return None;
    }
    probe
        .canonicalize(&link)
        .ok()
        .and_then(|target| target.file_name().map(|n| n.to_string_lossy().into_owned()))
}

/// Points `<root>/current` at `<root>/<version>` and returns the build's python.
///
/// The link target is relative, and the old link is replaced by renaming a
/// freshly created one over it.
pub fn choose(root: &Path, version: &str) -> PythonsResult<PathBuf> {
    let build = root.join(version);
    let single_segment = matches!(
        Path::new(version).components().collect::<Vec<_>>().as_slice(),
        [Component::Normal(_)]
    );
    if !single_segment || !build.is_dir() {
        return Err(PythonsError::VersionNotInstalled {
            version: version.to_string(),
            root: root.display().to_string(),
        });
    }

    let link = root.join(CURRENT_LINK_NAME);
    let staging = root.join(format!(".{}.{}", CURRENT_LINK_NAME, std::process::id()));
    let link_err = |source: io::Error| PythonsError::Link {
        path: link.display().to_string(),
        source,
    };

    // A stale staging link from an interrupted run would make symlink() fail.
    if fs::symlink_metadata(&staging).is_ok() {
        fs::remove_file(&staging).map_err(link_err)?;
    }
    make_symlink(Path::new(version), &staging).map_err(link_err)?;
    if let Err(e) = fs::rename(&staging, &link) {
        let _ = fs::remove_file(&staging);
        return Err(link_err(e));
    }

    log::debug!("'{}' now points at '{}'.", link.display(), version);
    Ok(build.join("bin").join("python"))
}

#[cfg(unix)]
fn make_symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn make_symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_dir(target, link)
}
