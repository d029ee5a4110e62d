// src/cli/handlers/mod.rs

// One module per CLI command.

pub mod activate;
pub mod choose;
pub mod commons;
pub mod info;
pub mod markers;
pub mod overrides;
pub mod recreate;
pub mod roots;
