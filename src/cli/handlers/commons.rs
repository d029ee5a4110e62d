// src/cli/handlers/commons.rs

// Shared setup for the handlers: the invocation snapshot and its configuration.

use anyhow::{Context, Result};

use crate::{
    core::{
        config,
        context::InvocationContext,
        probe::OsProbe,
        resolver::EnvironmentResolver,
    },
    models::Configuration,
};

/// Everything a handler needs, captured once per invocation.
#[derive(Debug)]
pub struct Session {
    pub probe: OsProbe,
    pub ctx: InvocationContext,
    pub config: Configuration,
}

impl Session {
    /// Captures the process state and loads the configuration file.
    pub fn load() -> Result<Self> {
        let probe = OsProbe;
        let ctx = InvocationContext::capture(&probe)
            .context("Could not capture the invocation context")?;
        let config = config::load(&ctx.config_path, &ctx.home, &probe)?;
        log::debug!("Loaded configuration from '{}'.", ctx.config_path.display());
        Ok(Self { probe, ctx, config })
    }

    pub fn resolver(&self) -> EnvironmentResolver<'_> {
        EnvironmentResolver::new(&self.ctx, &self.config, &self.probe)
    }

    /// Persists the (modified) configuration back to its file.
    pub fn save_config(&self) -> Result<()> {
        config::save(&self.ctx.config_path, &self.config, &self.ctx.home).with_context(|| {
            format!(
                "Could not save the configuration to '{}'",
                self.ctx.config_path.display()
            )
        })
    }
}
