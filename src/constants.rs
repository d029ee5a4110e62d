// src/constants.rs

/// The application name, used for the per-user data directory.
pub const APP_NAME: &str = "autovenv";

/// The name of the persisted configuration file (inside the data directory).
pub const CONFIG_FILENAME: &str = "config.toml";

/// The marker file used when no configuration says otherwise.
pub const DEFAULT_MARKER_FILENAME: &str = "requirements.txt";

/// The per-project file that pins an interpreter version.
pub const PYTHON_VERSION_FILENAME: &str = ".python-version";

/// A line in `.python-version` that selects the framework builds tree.
pub const FRAMEWORK_FLAG: &str = "framework";

/// The symlink (inside the builds root) naming the globally chosen version.
pub const CURRENT_LINK_NAME: &str = "current";

/// Default roots, expanded against the user's home directory.
pub const DEFAULT_VENVS_DIR: &str = "~/.virtualenvs";
pub const DEFAULT_PYTHONS_DIR: &str = "~/.python-versions";
pub const DEFAULT_PYTHONS_FRAMEWORK_DIR: &str = "~/.python-versions-framework";

// Environment variables read once when the invocation context is captured.
pub const ENV_VIRTUAL_ENV: &str = "VIRTUAL_ENV";
pub const ENV_VENVS_ROOT: &str = "AUTOVENV_VENVS";
pub const ENV_PYTHONS_ROOT: &str = "AUTOVENV_PYTHONS";
pub const ENV_PYTHONS_FRAMEWORK_ROOT: &str = "AUTOVENV_PYTHONS_FRAMEWORK";
pub const ENV_CONFIG_PATH: &str = "AUTOVENV_CONFIG";

/// Prefix for every human-readable line embedded in generated shell commands.
pub const MESSAGE_PREFIX: &str = "AUTOVENV";

/// Printed by `recreate` when the working directory is not inside a project.
pub const RECREATE_ERROR: &str = "AUTOVENV: ERROR (not within a python project)";

/// Interpreter names searched on `PATH` when falling back to the system python.
pub const SYSTEM_PYTHON_CANDIDATES: &[&str] = &["python3", "python"];
