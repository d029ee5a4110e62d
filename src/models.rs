// src/models.rs

use crate::constants::DEFAULT_MARKER_FILENAME;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// A path-prefix rule forcing an interpreter version and/or an environment name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathOverride {
    pub interpreter_version: Option<String>,
    pub environment_name: Option<String>,
}

impl PathOverride {
    /// True when neither half is set. Such entries are dropped on save.
    pub fn is_empty(&self) -> bool {
        self.interpreter_version.is_none() && self.environment_name.is_none()
    }
}

/// The loaded configuration snapshot. Immutable for the duration of a command.
///
/// Override keys are always absolute, canonical paths so they can be compared
/// against the canonical working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    pub marker_file_names: Vec<String>,
    pub overrides: BTreeMap<PathBuf, PathOverride>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            marker_file_names: vec![DEFAULT_MARKER_FILENAME.to_string()],
            overrides: BTreeMap::new(),
        }
    }
}

impl Configuration {
    /// Returns every override whose key is a prefix of `path`, most specific first.
    fn matching_overrides<'a>(
        &'a self,
        path: &'a Path,
    ) -> impl Iterator<Item = (&'a Path, &'a PathOverride)> + 'a {
        let mut candidates: Vec<(&Path, &PathOverride)> = self
            .overrides
            .iter()
            .filter(|(key, _)| path.starts_with(key))
            .map(|(key, entry)| (key.as_path(), entry))
            .collect();

        // Sort by path length, from longest to shortest.
        candidates.sort_by_key(|(key, _)| std::cmp::Reverse(key.as_os_str().len()));
        candidates.into_iter()
    }

    /// The most specific override for `path` that forces an environment name.
    pub fn named_override_for<'a>(&'a self, path: &'a Path) -> Option<(&'a Path, &'a str)> {
        self.matching_overrides(path).find_map(|(key, entry)| {
            entry
                .environment_name
                .as_deref()
                .map(|name| (key, name))
        })
    }

    /// Merges the given halves into the override for `key`. Halves left as
    /// `None` keep their previous value.
    pub fn set_override(
        &mut self,
        key: PathBuf,
        interpreter_version: Option<String>,
        environment_name: Option<String>,
    ) -> &PathOverride {
        let entry = self.overrides.entry(key).or_default();
        if interpreter_version.is_some() {
            entry.interpreter_version = interpreter_version;
        }
        if environment_name.is_some() {
            entry.environment_name = environment_name;
        }
        entry
    }

    /// Removes the override for exactly `key`. Returns whether one existed.
    pub fn unset_override(&mut self, key: &Path) -> bool {
        self.overrides.remove(key).is_some()
    }

    /// Appends a marker name unless it is already present.
    pub fn add_marker(&mut self, name: &str) -> bool {
        if self.marker_file_names.iter().any(|m| m == name) {
            return false;
        }
        self.marker_file_names.push(name.to_string());
        true
    }

    pub fn remove_marker(&mut self, name: &str) -> bool {
        let before = self.marker_file_names.len();
        self.marker_file_names.retain(|m| m != name);
        self.marker_file_names.len() != before
    }

    /// The most specific override for `path` that pins an interpreter version.
    pub fn version_override_for<'a>(&'a self, path: &'a Path) -> Option<(&'a Path, &'a str)> {
        self.matching_overrides(path).find_map(|(key, entry)| {
            entry
                .interpreter_version
                .as_deref()
                .map(|version| (key, version))
        })
    }
}

/// Where the selected interpreter version came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterpreterSource {
    /// A `.python-version` file inside the project root.
    PinnedFile(PathBuf),
    /// An override whose key is a prefix of the working directory.
    Override(PathBuf),
    /// The `current` symlink in the builds root.
    GlobalCurrent(PathBuf),
    /// The interpreter found on `PATH`.
    System,
}

/// The interpreter chosen for the target environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpreterSelection {
    /// The non-system version identifier, `None` for the system interpreter.
    pub version: Option<String>,
    pub source: InterpreterSource,
    /// Whether versions are searched in the framework builds tree.
    pub framework: bool,
    /// `<builds_root>/<version>` for non-system interpreters.
    pub build_dir: Option<PathBuf>,
    /// The interpreter executable, if one could be determined at all.
    pub python: Option<PathBuf>,
}

impl InterpreterSelection {
    pub fn is_system(&self) -> bool {
        self.version.is_none()
    }

    /// The dedicated environment-creation tool shipped with some builds.
    pub fn venv_tool(&self) -> Option<PathBuf> {
        self.build_dir
            .as_ref()
            .map(|dir| dir.join("bin").join("pyvenv"))
    }
}

/// The environment that should be active for the working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentIdentity {
    /// Empty exactly when no project applies.
    pub name: String,
    pub path: PathBuf,
    pub exists: bool,
    pub is_active: bool,
}

impl EnvironmentIdentity {
    pub fn applies(&self) -> bool {
        !self.name.is_empty()
    }
}

/// Everything the command synthesizer needs, resolved once.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub project_root: Option<PathBuf>,
    pub interpreter: InterpreterSelection,
    pub environment: EnvironmentIdentity,
    /// Whether any environment (not necessarily the target) is active.
    pub any_active: bool,
}

/// The shell dialect a command is rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shell {
    Bash,
    Fish,
}

/// An environment-creation invocation, minus the target path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreationCommand {
    pub program: PathBuf,
    pub args: Vec<String>,
}

/// One step of a synthesized shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// A human-readable line, echoed with the `AUTOVENV:` prefix.
    Notice(String),
    /// Create the environment at `target`.
    Create {
        command: CreationCommand,
        target: PathBuf,
    },
    /// Source the activation script of the environment at `environment`.
    Activate { environment: PathBuf },
    /// Leave the active environment.
    Deactivate,
}
