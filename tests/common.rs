#![allow(dead_code)]
use assert_cmd::Command;
use tempfile::TempDir;
use uuid::Uuid;

// Launcher variables the tests must not inherit from the environment
const LAUNCHER_VARS: [&str; 7] = [
    "OMPI_COMM_WORLD_RANK",
    "OMPI_COMM_WORLD_SIZE",
    "PMI_RANK",
    "PMI_SIZE",
    "PMIX_RANK",
    "SLURM_PROCID",
    "SLURM_NTASKS",
];

pub const SLEEP_LINES: &str = "I am going to sleep for 0 seconds\nThere. I did it.\n";

pub struct SleeperTestConfig {
    path: TempDir,
}

impl Default for SleeperTestConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SleeperTestConfig {
    /// Isolated working dir with an empty `.sleeper.toml`, so every tunable
    /// is at its default
    pub fn new() -> Self {
        Self::with_config("")
    }

    /// Isolated working dir holding the given `.sleeper.toml`
    pub fn with_config(config: &str) -> Self {
        let sleeper = Self::bare();
        std::fs::write(sleeper.path.path().join(".sleeper.toml"), config).unwrap();
        sleeper
    }

    /// Isolated working dir without any config file
    pub fn bare() -> Self {
        let path = TempDir::with_prefix(Uuid::new_v4().to_string()).unwrap();
        SleeperTestConfig { path }
    }

    pub fn cmd(&self, args: &[&str]) -> Command {
        let mut cmd = Command::cargo_bin("sleeper").unwrap();
        cmd.current_dir(&self.path).args(args);

        for var in LAUNCHER_VARS {
            cmd.env_remove(var);
        }

        cmd
    }
}
