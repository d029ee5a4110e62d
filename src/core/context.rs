//! # Invocation Context
//!
//! Process-global state (home directory, working directory, environment
//! variables) is read exactly once, here, and frozen into an
//! [`InvocationContext`]. Resolution code never consults the process
//! environment directly, so tests build contexts by hand.

use crate::constants::{
    DEFAULT_PYTHONS_DIR, DEFAULT_PYTHONS_FRAMEWORK_DIR, DEFAULT_VENVS_DIR, ENV_CONFIG_PATH,
    ENV_PYTHONS_FRAMEWORK_ROOT, ENV_PYTHONS_ROOT, ENV_VENVS_ROOT, ENV_VIRTUAL_ENV,
    SYSTEM_PYTHON_CANDIDATES,
};
use crate::core::paths::{self, PathError};
use crate::core::probe::FilesystemProbe;
use std::env;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationContext {
    /// The home boundary. Project roots are only searched strictly below it.
    pub home: PathBuf,
    pub cwd: PathBuf,
    /// The environment reported active by `VIRTUAL_ENV`, canonicalized.
    pub virtual_env: Option<PathBuf>,
    /// Where environments are created (`~/.virtualenvs`).
    pub venvs_root: PathBuf,
    /// Where standard interpreter builds live (`~/.python-versions`).
    pub pythons_root: PathBuf,
    /// Where framework interpreter builds live.
    pub pythons_framework_root: PathBuf,
    /// The interpreter used when no version is pinned anywhere.
    pub system_python: Option<PathBuf>,
    pub config_path: PathBuf,
}

impl InvocationContext {
    /// Snapshots the real process state.
    pub fn capture(probe: &dyn FilesystemProbe) -> Result<Self, PathError> {
        let raw_home = paths::home_dir()?;
        let home = paths::canonicalize(probe, &raw_home, &raw_home, &raw_home)?;
        let raw_cwd = env::current_dir().map_err(PathError::CurrentDir)?;
        let cwd = paths::canonicalize(probe, &raw_cwd, &home, &home)?;

        let root_from_env = |var: &str, default: &str| -> Result<PathBuf, PathError> {
            let raw = env::var_os(var)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(default));
            paths::canonicalize(probe, &raw, &home, &cwd)
        };

        let virtual_env = match env::var_os(ENV_VIRTUAL_ENV).filter(|v| !v.is_empty()) {
            Some(raw) => Some(paths::canonicalize(probe, Path::new(&raw), &home, &cwd)?),
            None => None,
        };

        let config_path = match env::var_os(ENV_CONFIG_PATH).filter(|v| !v.is_empty()) {
            Some(raw) => paths::expand_home(Path::new(&raw), &home),
            None => paths::default_config_path()?,
        };

        let context = Self {
            venvs_root: root_from_env(ENV_VENVS_ROOT, DEFAULT_VENVS_DIR)?,
            pythons_root: root_from_env(ENV_PYTHONS_ROOT, DEFAULT_PYTHONS_DIR)?,
            pythons_framework_root: root_from_env(
                ENV_PYTHONS_FRAMEWORK_ROOT,
                DEFAULT_PYTHONS_FRAMEWORK_DIR,
            )?,
            system_python: find_system_python(probe),
            virtual_env,
            config_path,
            home,
            cwd,
        };
        log::debug!("Captured invocation context: {:?}", context);
        Ok(context)
    }

    /// Builds a context rooted at `home` with the conventional default roots.
    pub fn with_home(home: impl Into<PathBuf>, cwd: impl Into<PathBuf>) -> Self {
        let home = home.into();
        Self {
            cwd: cwd.into(),
            virtual_env: None,
            venvs_root: paths::expand_home(Path::new(DEFAULT_VENVS_DIR), &home),
            pythons_root: paths::expand_home(Path::new(DEFAULT_PYTHONS_DIR), &home),
            pythons_framework_root: paths::expand_home(
                Path::new(DEFAULT_PYTHONS_FRAMEWORK_DIR),
                &home,
            ),
            system_python: None,
            config_path: home.join(".autovenv.toml"),
            home,
        }
    }

    /// The builds root for the standard or framework tree.
    pub fn builds_root(&self, framework: bool) -> &Path {
        if framework {
            &self.pythons_framework_root
        } else {
            &self.pythons_root
        }
    }

    /// Canonicalizes a user-supplied path relative to this invocation.
    pub fn canonicalize(
        &self,
        probe: &dyn FilesystemProbe,
        path: &Path,
    ) -> Result<PathBuf, PathError> {
        paths::canonicalize(probe, path, &self.home, &self.cwd)
    }
}

/// Finds the first python interpreter on `PATH`.
fn find_system_python(probe: &dyn FilesystemProbe) -> Option<PathBuf> {
    let path_var = env::var_os("PATH")?;
    let found = env::split_paths(&path_var).find_map(|dir| {
        SYSTEM_PYTHON_CANDIDATES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| probe.is_file(candidate))
    });
    log::debug!("System python on PATH: {:?}", found);
    found
}
