//! # Environment Resolver
//!
//! Combines the project locator, the override configuration and the
//! interpreter precedence rules into a single [`Resolution`]: which
//! environment should be active, where it lives, whether it exists, and how
//! to create it.

use crate::constants::{CURRENT_LINK_NAME, FRAMEWORK_FLAG, PYTHON_VERSION_FILENAME};
use crate::core::context::InvocationContext;
use crate::core::locator;
use crate::core::paths::PathError;
use crate::core::probe::FilesystemProbe;
use crate::models::{
    Configuration, CreationCommand, EnvironmentIdentity, InterpreterSelection,
    InterpreterSource, Resolution, Shell,
};
use crate::system::shell;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error(transparent)]
    Path(#[from] PathError),
    #[error("Could not read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Could not find a usable python interpreter (wanted: {wanted}).")]
    InterpreterNotFound { wanted: String },
    #[error("{}", crate::constants::RECREATE_ERROR)]
    NotInProject,
}

type ResolveResult<T> = Result<T, ResolveError>;

/// The contents of a `.python-version` file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct PinnedVersion {
    version: Option<String>,
    framework: bool,
}

/// The first non-empty line is the version; any later line equal to
/// `framework` selects the framework builds tree.
fn parse_pinned_version(content: &str) -> PinnedVersion {
    let mut lines = content.lines().map(str::trim).filter(|l| !l.is_empty());
    PinnedVersion {
        version: lines.next().map(str::to_string),
        framework: lines.any(|line| line.eq_ignore_ascii_case(FRAMEWORK_FLAG)),
    }
}

#[derive(Debug)]
pub struct EnvironmentResolver<'a> {
    ctx: &'a InvocationContext,
    config: &'a Configuration,
    probe: &'a dyn FilesystemProbe,
}

impl<'a> EnvironmentResolver<'a> {
    pub fn new(
        ctx: &'a InvocationContext,
        config: &'a Configuration,
        probe: &'a dyn FilesystemProbe,
    ) -> Self {
        Self { ctx, config, probe }
    }

    /// The project root for the working directory, if any.
    pub fn project_location(&self) -> Option<PathBuf> {
        locator::locate(self.probe, &self.ctx.cwd, &self.ctx.home, self.config)
    }

    /// The name of the environment that should be active. Empty when the
    /// working directory is not inside a project.
    pub fn correct_environment_name(&self) -> String {
        if let Some((_, name)) = self.config.named_override_for(&self.ctx.cwd) {
            return name.to_string();
        }
        self.project_location()
            .and_then(|root| root.file_name().map(|n| n.to_string_lossy().into_owned()))
            .unwrap_or_default()
    }

    /// Picks the interpreter, in order of precedence:
    /// 1. `.python-version` in the project root,
    /// 2. an override pinning a version for a prefix of the working directory,
    /// 3. the global `current` symlink,
    /// 4. the system interpreter.
    pub fn interpreter_selection(
        &self,
        project_root: Option<&Path>,
    ) -> ResolveResult<InterpreterSelection> {
        let (pinned, pin_file) = match project_root {
            Some(root) => {
                let pin_file = root.join(PYTHON_VERSION_FILENAME);
                (self.read_pinned_version(&pin_file)?, Some(pin_file))
            }
            None => (PinnedVersion::default(), None),
        };
        let framework = pinned.framework;

        if let (Some(version), Some(pin_file)) = (pinned.version, pin_file) {
            log::debug!("Version '{}' pinned by '{}'.", version, pin_file.display());
            return Ok(self.versioned(version, InterpreterSource::PinnedFile(pin_file), framework));
        }

        if let Some((key, version)) = self.config.version_override_for(&self.ctx.cwd) {
            log::debug!("Version '{}' set by override '{}'.", version, key.display());
            return Ok(self.versioned(
                version.to_string(),
                InterpreterSource::Override(key.to_path_buf()),
                framework,
            ));
        }

        let current = self.ctx.builds_root(framework).join(CURRENT_LINK_NAME);
        if self.probe.exists(&current) {
            let target = self
                .probe
                .canonicalize(&current)
                .map_err(|source| ResolveError::Read {
                    path: current.display().to_string(),
                    source,
                })?;
            if let Some(version) = target.file_name().map(|n| n.to_string_lossy().into_owned()) {
                log::debug!("Version '{}' chosen globally via '{}'.", version, current.display());
                return Ok(self.versioned(version, InterpreterSource::GlobalCurrent(current), framework));
            }
        }

        log::debug!("No version pinned; using the system interpreter.");
        Ok(InterpreterSelection {
            version: None,
            source: InterpreterSource::System,
            framework,
            build_dir: None,
            python: self.ctx.system_python.clone(),
        })
    }

    fn read_pinned_version(&self, pin_file: &Path) -> ResolveResult<PinnedVersion> {
        match self.probe.read_to_string(pin_file) {
            Ok(content) => Ok(parse_pinned_version(&content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(PinnedVersion::default()),
            Err(source) => Err(ResolveError::Read {
                path: pin_file.display().to_string(),
                source,
            }),
        }
    }

    fn versioned(
        &self,
        version: String,
        source: InterpreterSource,
        framework: bool,
    ) -> InterpreterSelection {
        let build_dir = self.ctx.builds_root(framework).join(&version);
        InterpreterSelection {
            python: Some(build_dir.join("bin").join("python")),
            build_dir: Some(build_dir),
            version: Some(version),
            source,
            framework,
        }
    }

    /// `<venvs_root>/<version>/<name>`, the version segment only for non-system interpreters.
    pub fn environment_path(&self, name: &str, selection: &InterpreterSelection) -> PathBuf {
        let mut path = self.ctx.venvs_root.clone();
        if let Some(version) = &selection.version {
            path.push(version);
        }
        path.push(name);
        path
    }

    /// Whether `path` is the environment `VIRTUAL_ENV` reports as active.
    pub fn is_environment_active(&self, path: &Path) -> bool {
        match &self.ctx.virtual_env {
            Some(active) => {
                let canonical = self
                    .probe
                    .canonicalize(path)
                    .unwrap_or_else(|_| path.to_path_buf());
                *active == canonical
            }
            None => false,
        }
    }

    /// The invocation that creates an environment with the selected interpreter.
    ///
    /// A build's dedicated `bin/pyvenv` is preferred; otherwise the interpreter
    /// runs its `venv` module.
    pub fn creation_command(
        &self,
        selection: &InterpreterSelection,
    ) -> ResolveResult<CreationCommand> {
        if let Some(tool) = selection.venv_tool() {
            if self.probe.is_file(&tool) {
                return Ok(CreationCommand {
                    program: tool,
                    args: Vec::new(),
                });
            }
        }

        if let Some(python) = &selection.python {
            if self.probe.is_file(python) {
                return Ok(CreationCommand {
                    program: python.clone(),
                    args: vec!["-m".to_string(), "venv".to_string()],
                });
            }
        }

        Err(ResolveError::InterpreterNotFound {
            wanted: match (&selection.version, &selection.python) {
                (Some(version), Some(python)) => format!("{} at {}", version, python.display()),
                (None, Some(python)) => python.display().to_string(),
                _ => "a python on PATH".to_string(),
            },
        })
    }

    /// The shell-quoted creation prefix (e.g. `/usr/bin/python3 -m venv`); the
    /// target path is appended by the caller.
    pub fn creation_command_prefix(
        &self,
        selection: &InterpreterSelection,
    ) -> ResolveResult<String> {
        self.creation_command(selection)
            .map(|cmd| shell::render_command(&cmd, Shell::Bash))
    }

    /// Resolves everything the command synthesizer needs.
    pub fn resolve(&self) -> ResolveResult<Resolution> {
        let project_root = self.project_location();
        let name = self.correct_environment_name();
        let interpreter = self.interpreter_selection(project_root.as_deref())?;

        let environment = if name.is_empty() {
            EnvironmentIdentity {
                name,
                path: PathBuf::new(),
                exists: false,
                is_active: false,
            }
        } else {
            let path = self.environment_path(&name, &interpreter);
            EnvironmentIdentity {
                exists: self.probe.exists(&path),
                is_active: self.is_environment_active(&path),
                name,
                path,
            }
        };
        log::debug!("Resolved environment: {:?}", environment);

        Ok(Resolution {
            project_root,
            interpreter,
            environment,
            any_active: self.ctx.virtual_env.is_some(),
        })
    }
}
