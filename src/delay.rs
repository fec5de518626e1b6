use anyhow::{bail, Context};
use itertools::Itertools;
use rand::Rng;

/// How a single invocation resolves its sleep duration, in whole seconds.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DelaySpec {
    /// Sleep for exactly `seconds`, but never longer than `cap`
    Fixed { seconds: u64, cap: u64 },
    /// Sleep a uniform random duration in `[0, bound)`
    UpTo { bound: u64 },
    /// Sleep a uniform random duration in `[min, max)`, or exactly `min`
    /// when the bounds are equal
    Between { min: u64, max: u64 },
}

impl DelaySpec {
    pub fn between(min: u64, max: u64) -> Result<Self, anyhow::Error> {
        if max < min {
            bail!("tmax ({}) must be at least tmin ({})", max, min);
        }
        Ok(DelaySpec::Between { min, max })
    }

    /// Resolve the spec to a concrete number of seconds. Equal bounds never
    /// touch the random source, so an empty range cannot panic a draw.
    pub fn resolve<R: Rng>(&self, rng: &mut R) -> u64 {
        match *self {
            DelaySpec::Fixed { seconds, cap } => seconds.min(cap),
            DelaySpec::UpTo { bound: 0 } => 0,
            DelaySpec::UpTo { bound } => rng.random_range(0..bound),
            DelaySpec::Between { min, max } if min == max => min,
            DelaySpec::Between { min, max } => rng.random_range(min..max),
        }
    }
}

/// Parse a `tmin,tmax` pair as passed to the comma mode
pub fn parse_seconds_range(s: &str) -> Result<(u64, u64), anyhow::Error> {
    let (tmin, tmax) = s
        .split(',')
        .collect_tuple()
        .with_context(|| format!("Expected tmin,tmax but got: {}", s))?;

    let tmin = tmin
        .trim()
        .parse()
        .with_context(|| format!("Couldn't parse tmin: {}", tmin))?;
    let tmax = tmax
        .trim()
        .parse()
        .with_context(|| format!("Couldn't parse tmax: {}", tmax))?;

    Ok((tmin, tmax))
}
