use std::{thread::sleep, time::Duration};

use clap::Parser;
use rand::rngs::StdRng;

use crate::{
    config::{Config, UnitSource},
    delay::{parse_seconds_range, DelaySpec},
    runtime::{RankInfo, Runtime},
};

pub mod config;
pub mod delay;
pub mod libc;
pub mod runtime;

fn announce_and_sleep(seconds: u64) {
    println!("I am going to sleep for {} seconds", seconds);
    sleep(Duration::from_secs(seconds));
    println!("There. I did it.");
}

fn fixed(args: FixedArgs, config: &Config, rng: &mut StdRng) -> Result<(), anyhow::Error> {
    let cap = args.cap.unwrap_or(config.fixed.cap);
    let seconds = DelaySpec::Fixed {
        seconds: args.seconds,
        cap,
    }
    .resolve(rng);

    announce_and_sleep(seconds);
    Ok(())
}

fn random(args: RandomArgs, rng: &mut StdRng) -> Result<(), anyhow::Error> {
    let spec = match args.tmax {
        Some(tmax) => DelaySpec::between(args.t, tmax)?,
        None => DelaySpec::UpTo { bound: args.t },
    };

    announce_and_sleep(spec.resolve(rng));
    Ok(())
}

fn comma(args: CommaArgs, rng: &mut StdRng) -> Result<(), anyhow::Error> {
    let (tmin, tmax) = parse_seconds_range(&args.range)?;
    println!("Found tmin={} tmax={}", tmin, tmax);

    let seconds = DelaySpec::between(tmin, tmax)?.resolve(rng);
    announce_and_sleep(seconds);
    Ok(())
}

fn rank(args: RankArgs, runtime: &dyn Runtime) -> Result<(), anyhow::Error> {
    let info = RankInfo::query(runtime)?;

    // Everyone arrives before anyone reports or starts sleeping
    runtime.barrier();

    if info.rank == 0 {
        println!("Job {} on {} processors", args.job, info.size);
    }

    announce_and_sleep(args.seconds);
    Ok(())
}

fn cores(config: &Config, rng: &mut StdRng, runtime: &dyn Runtime) -> Result<(), anyhow::Error> {
    let units = match config.cores.source {
        UnitSource::Detected => runtime.detected_units(),
        UnitSource::Team => runtime.team_size(),
    };
    println!("Detected core count: {}", units);

    let seconds = DelaySpec::between(config.cores.tmin, config.cores.tmax)?.resolve(rng);
    announce_and_sleep(seconds);
    Ok(())
}

#[derive(Debug, Parser)]
struct FixedArgs {
    /// Requested sleep in seconds
    seconds: u64,
    /// Upper bound on the sleep, overriding the configured cap
    #[arg(long)]
    cap: Option<u64>,
}

#[derive(Debug, Parser)]
struct RandomArgs {
    /// Exclusive upper bound on the sleep, or its lower bound if tmax is given
    t: u64,
    /// Exclusive upper bound on the sleep
    tmax: Option<u64>,
}

#[derive(Debug, Parser)]
struct CommaArgs {
    /// Sleep range as a tmin,tmax pair. E.g. `5,9`
    range: String,
}

#[derive(Debug, Parser)]
struct RankArgs {
    /// Job id to announce from the leader
    job: u64,
    /// Sleep in seconds for every participant
    seconds: u64,
}

#[derive(Parser, Debug)]
enum SubCommands {
    /// Sleeps for the given number of seconds, capped. E.g. `sleeper fixed 5`
    Fixed(FixedArgs),
    /// Sleeps a random number of seconds below t, or between t and tmax if
    /// tmax is given. E.g. `sleeper random 5 10`
    Random(RandomArgs),
    /// Sleeps a random number of seconds in a comma separated range.
    /// E.g. `sleeper comma 5,9`
    Comma(CommaArgs),
    /// Announces the job from the rank 0 participant, then sleeps.
    /// E.g. `sleeper rank 42 5`
    Rank(RankArgs),
    /// Reports the core count, then sleeps a random number of seconds
    Cores,
}

#[derive(Parser, Debug)]
struct Cli {
    #[command(subcommand)]
    subcommand: SubCommands,
}

fn main() -> Result<(), anyhow::Error> {
    let args = Cli::parse();
    let config = Config::load()?;

    let mut rng = config.rng();
    let runtime = config.runtime();

    match args.subcommand {
        SubCommands::Fixed(args) => fixed(args, &config, &mut rng)?,
        SubCommands::Random(args) => random(args, &mut rng)?,
        SubCommands::Comma(args) => comma(args, &mut rng)?,
        SubCommands::Rank(args) => rank(args, runtime.as_ref())?,
        SubCommands::Cores => cores(&config, &mut rng, runtime.as_ref())?,
    }

    Ok(())
}
