//! Driver configuration, loaded from an optional YAML file.

use std::path::Path;

use anyhow::{Context, Result};
use decider_core::EngineConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub engine: EngineConfig,
    pub demo: DemoConfig,
}

/// Parameters of the built-in guard scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Number of ticks to run
    pub ticks: u64,

    /// Simulated seconds per tick
    pub dt_seconds: f32,

    /// How long the guard looks around at each patrol point
    pub look_seconds: f32,

    /// Health below which the guard retreats
    pub flee_below: f32,

    /// The enemy is visible for this many ticks out of every `enemy_period` ticks
    pub enemy_visible_ticks: u64,
    pub enemy_period: u64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            ticks: 40,
            dt_seconds: 0.1,
            look_seconds: 0.3,
            flee_below: 30.0,
            enemy_visible_ticks: 12,
            enemy_period: 20,
        }
    }
}

impl CliConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let config: CliConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            self.engine.max_task_levels > 0,
            "engine.max_task_levels must be at least 1"
        );
        anyhow::ensure!(self.demo.enemy_period > 0, "demo.enemy_period must be at least 1");
        anyhow::ensure!(
            self.demo.dt_seconds.is_finite() && self.demo.dt_seconds >= 0.0,
            "demo.dt_seconds must be a non-negative number"
        );
        Ok(())
    }
}
