//! # System Interaction Layer
//!
//! The boundary between resolution logic and the operating system.
//!
//! ## Modules
//!
//! - **`executor`**: runs environment-creation commands as blocking child processes.
//! - **`shell`**: quoting and rendering of synthesized steps for bash and fish.
//! - **`pythons`**: the interpreter builds tree and its `current` symlink.
//! - **`venvs`**: creating, deleting and recreating environments on disk.

pub mod executor;
pub mod pythons;
pub mod shell;
pub mod venvs;
