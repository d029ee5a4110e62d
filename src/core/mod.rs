// src/core/mod.rs

pub mod config;
pub mod context;
pub mod locator;
pub mod paths;
pub mod probe;
pub mod resolver;
pub mod synthesizer;
