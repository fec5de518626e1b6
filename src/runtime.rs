use std::{
    env,
    sync::atomic::{AtomicUsize, Ordering},
    thread,
};

use anyhow::anyhow;
use sysinfo::System;

use crate::libc::gethostname;

/// Narrow view of the parallel runtime this worker runs under. The launcher
/// owns the actual group of cooperating processes; the worker only reads its
/// own identity from it and joins the collective points it exposes.
pub trait Runtime {
    fn rank(&self) -> u32;
    fn world_size(&self) -> u32;
    fn processor_name(&self) -> Result<String, anyhow::Error>;
    /// Collective synchronization point for the whole group
    fn barrier(&self);
    /// Number of logical processing units visible to this process
    fn detected_units(&self) -> usize;
    /// Size of the thread team in a fork-join region, as seen by the master
    fn team_size(&self) -> usize;
}

/// Identity of this process within the group, read once at startup
#[derive(Debug)]
pub struct RankInfo {
    pub rank: u32,
    pub size: u32,
    // Queried once together with rank and size; no output line includes it
    #[allow(dead_code)]
    pub host: String,
}

impl RankInfo {
    pub fn query(runtime: &dyn Runtime) -> Result<Self, anyhow::Error> {
        Ok(RankInfo {
            rank: runtime.rank(),
            size: runtime.world_size(),
            host: runtime.processor_name()?,
        })
    }
}

const RANK_VARS: [&str; 4] = [
    "OMPI_COMM_WORLD_RANK",
    "PMI_RANK",
    "PMIX_RANK",
    "SLURM_PROCID",
];

const SIZE_VARS: [&str; 3] = ["OMPI_COMM_WORLD_SIZE", "PMI_SIZE", "SLURM_NTASKS"];

fn first_env_var(keys: &[&str]) -> Option<u32> {
    keys.iter().find_map(|key| env::var(key).ok()?.parse().ok())
}

/// Adapter to the launcher that started this worker. Rank and world size come
/// from the environment variables real launchers export; a worker started
/// without one is rank 0 in a group of 1.
pub struct LauncherEnv;

impl Runtime for LauncherEnv {
    fn rank(&self) -> u32 {
        first_env_var(&RANK_VARS).unwrap_or(0)
    }

    fn world_size(&self) -> u32 {
        first_env_var(&SIZE_VARS).unwrap_or(1)
    }

    fn processor_name(&self) -> Result<String, anyhow::Error> {
        gethostname().map_err(|e| anyhow!("Error {} getting hostname", e))
    }

    // The launcher owns the group; from inside a single process there is no
    // transport to synchronize against, so the barrier spans only this process
    fn barrier(&self) {}

    fn detected_units(&self) -> usize {
        System::new_all().cpus().len()
    }

    fn team_size(&self) -> usize {
        let team = thread::available_parallelism().map_or(1, |n| n.get());
        fork_join_team(team)
    }
}

// Spawn a team of `size` members with the caller as master, have every member
// report in, and read the count on the master after the join
fn fork_join_team(size: usize) -> usize {
    let active = AtomicUsize::new(1);
    thread::scope(|s| {
        for _ in 1..size {
            s.spawn(|| {
                active.fetch_add(1, Ordering::SeqCst);
            });
        }
    });
    active.load(Ordering::SeqCst)
}

/// Single-participant runtime with a configurable unit count. Stands in for
/// the launcher in tests and on machines without one.
pub struct SingleProcess {
    pub units: usize,
}

impl Runtime for SingleProcess {
    fn rank(&self) -> u32 {
        0
    }

    fn world_size(&self) -> u32 {
        1
    }

    fn processor_name(&self) -> Result<String, anyhow::Error> {
        Ok("localhost".to_string())
    }

    fn barrier(&self) {}

    fn detected_units(&self) -> usize {
        self.units
    }

    fn team_size(&self) -> usize {
        self.units
    }
}
