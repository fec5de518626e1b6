use std::path::PathBuf;

use anyhow::Context;
use rand::{rngs::StdRng, SeedableRng};
use serde::Deserialize;

use crate::runtime::{LauncherEnv, Runtime, SingleProcess};

const CONFIG_FILE: &str = ".sleeper.toml";

/// Tunables the original worker copies hardcoded per variant. Every field has
/// a default so the worker also runs bare, straight under a launcher.
#[derive(Deserialize, Debug, Default)]
pub struct Config {
    /// Deterministic seed for the random delays
    pub seed: Option<u64>,
    #[serde(default)]
    pub fixed: FixedConfig,
    #[serde(default)]
    pub cores: CoresConfig,
    #[serde(default)]
    pub runtime: RuntimeConfig,
}

#[derive(Deserialize, Debug)]
pub struct FixedConfig {
    /// Upper bound on the requested sleep in fixed mode
    #[serde(default = "default_cap")]
    pub cap: u64,
}

#[derive(Deserialize, Debug)]
pub struct CoresConfig {
    /// Random sleep range for cores mode
    #[serde(default = "default_cores_tmin")]
    pub tmin: u64,
    #[serde(default = "default_cores_tmax")]
    pub tmax: u64,
    #[serde(default)]
    pub source: UnitSource,
}

/// Which unit count the cores mode reports
#[derive(Deserialize, Clone, Copy, Debug, Default, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum UnitSource {
    /// Logical processing units visible to the process
    #[default]
    Detected,
    /// Active members of a fork-join thread team
    Team,
}

#[derive(Deserialize, Debug, Default)]
pub struct RuntimeConfig {
    #[serde(default)]
    pub kind: RuntimeKind,
    /// Simulated unit count for the single-participant runtime
    pub units: Option<usize>,
}

#[derive(Deserialize, Clone, Copy, Debug, Default, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeKind {
    #[default]
    Launcher,
    Single,
}

fn default_cap() -> u64 {
    10
}

fn default_cores_tmin() -> u64 {
    20
}

fn default_cores_tmax() -> u64 {
    30
}

impl Default for FixedConfig {
    fn default() -> Self {
        Self { cap: default_cap() }
    }
}

impl Default for CoresConfig {
    fn default() -> Self {
        Self {
            tmin: default_cores_tmin(),
            tmax: default_cores_tmax(),
            source: UnitSource::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, anyhow::Error> {
        let Some(dir) = find_config_dir()? else {
            return Ok(Config::default());
        };
        let config_string = std::fs::read_to_string(dir.join(CONFIG_FILE))?;

        // Deserialize the TOML string into the Config struct
        toml::from_str(&config_string).context("Couldn't parse config file")
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }

    pub fn runtime(&self) -> Box<dyn Runtime> {
        match self.runtime.kind {
            RuntimeKind::Launcher => Box::new(LauncherEnv),
            RuntimeKind::Single => Box::new(SingleProcess {
                units: self.runtime.units.unwrap_or(1),
            }),
        }
    }
}

// Scan root directories until we hopefully find the config file
fn find_config_dir() -> Result<Option<PathBuf>, anyhow::Error> {
    let mut dir = std::env::current_dir()?;
    loop {
        if dir.join(CONFIG_FILE).exists() {
            return Ok(Some(dir));
        }
        if let Some(parent) = dir.parent() {
            dir = parent.to_path_buf();
        } else {
            return Ok(None);
        }
    }
}
