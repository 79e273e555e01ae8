// src/io/config.rs

use crate::error::{Result, SimError};
use crate::simulation::config::ScenarioFile;
use std::path::Path;

/// Reads a TOML scenario. Missing sections and keys fall back to defaults.
pub fn load_scenario<P: AsRef<Path>>(path: P) -> Result<ScenarioFile> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let scenario = parse_scenario(&content)
        .map_err(|e| SimError::Config(format!("{}: {e}", path.display())))?;
    tracing::debug!(path = %path.display(), "loaded scenario");
    Ok(scenario)
}

pub fn parse_scenario(content: &str) -> Result<ScenarioFile> {
    let scenario: ScenarioFile =
        toml::from_str(content).map_err(|e| SimError::Config(e.to_string()))?;
    scenario.inventory.validate()?;
    scenario.ctmc.validate()?;
    Ok(scenario)
}
