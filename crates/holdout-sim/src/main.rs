//! Simulation entry point for Holdout.
//!
//! Wires configuration, the seed world, the decision arbiter, and the
//! tick scheduler together, then runs until a terminal state or the
//! requested tick count. Memory summarization runs between scheduler
//! chunks so it never interleaves with a tick.
//!
//! Usage:
//!
//! ```text
//! holdout-sim [--config holdout-config.yaml] [--ticks N]
//!             [--load snapshot.json] [--save snapshot.json]
//! ```
//!
//! Oracle credentials come from the environment; see
//! `holdout_runner::OracleConfig::from_env`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use holdout_agents::AgentSeed;
use holdout_engine::{
    SimulationConfig, TickScheduler, WorldClock, WorldState, snapshot,
};
use holdout_runner::{DecisionArbiter, OracleConfig};
use holdout_types::{AgentId, Job, Location, LocationKind, Position};
use holdout_world::{LocationExt, LocationSet, MapBounds, catalog};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Ticks between memory-summarization passes.
const SUMMARY_INTERVAL: u64 = 25;

/// Parsed command-line options.
struct CliArgs {
    config: PathBuf,
    ticks: Option<u64>,
    load: Option<PathBuf>,
    save: Option<PathBuf>,
}

impl CliArgs {
    fn parse(mut args: impl Iterator<Item = String>) -> anyhow::Result<Self> {
        let mut parsed = Self {
            config: PathBuf::from("holdout-config.yaml"),
            ticks: None,
            load: None,
            save: None,
        };
        while let Some(flag) = args.next() {
            let mut value = || {
                args.next()
                    .with_context(|| format!("{flag} requires a value"))
            };
            match flag.as_str() {
                "--config" => parsed.config = PathBuf::from(value()?),
                "--ticks" => parsed.ticks = Some(value()?.parse().context("--ticks must be a number")?),
                "--load" => parsed.load = Some(PathBuf::from(value()?)),
                "--save" => parsed.save = Some(PathBuf::from(value()?)),
                other => anyhow::bail!("unknown flag: {other}"),
            }
        }
        Ok(parsed)
    }
}

/// Seed the settlement's locations, matching the reference layout:
/// homes, stores, public spaces, and the fortified base.
fn seed_locations() -> anyhow::Result<LocationSet> {
    let mut locations = LocationSet::new();
    let seeds = [
        Location::new("alice's house", LocationKind::Home, Position::new(80.0, 80.0), 40.0, 40.0)
            .with_owner(AgentId::new(1)),
        Location::new("bob's house", LocationKind::Home, Position::new(420.0, 80.0), 40.0, 40.0)
            .with_owner(AgentId::new(2)),
        Location::new(
            "supermarket",
            LocationKind::Supermarket,
            Position::new(200.0, 60.0),
            60.0,
            40.0,
        )
        .with_resource("bread", 0.6, 3)
        .with_resource("rice ball", 0.4, 2)
        .with_resource("water", 0.8, 5),
        Location::new(
            "general store",
            LocationKind::GeneralStore,
            Position::new(340.0, 150.0),
            50.0,
            40.0,
        )
        .with_resource("first aid kit", 0.3, 1)
        .with_resource("energy drink", 0.5, 2),
        Location::new("park", LocationKind::Park, Position::new(120.0, 300.0), 80.0, 60.0)
            .with_resource("water", 0.4, 2),
        Location::new("library", LocationKind::Library, Position::new(400.0, 320.0), 50.0, 40.0),
        Location::new("cafe", LocationKind::Cafe, Position::new(260.0, 260.0), 40.0, 30.0)
            .with_resource("fruit juice", 0.5, 2),
        Location::new("base", LocationKind::Base, Position::new(250.0, 180.0), 80.0, 80.0)
            .with_health(500.0),
    ];
    for location in seeds {
        locations
            .insert(location)
            .map_err(|e| anyhow::anyhow!("seed location failed: {e}"))?;
    }
    Ok(locations)
}

/// Build the starting world: the seed locations and two survivors.
fn seed_world(config: &SimulationConfig) -> anyhow::Result<WorldState> {
    let clock = WorldClock::new(config.night)?;
    let bounds = MapBounds::new(config.world.width, config.world.height);
    let mut world = WorldState::new(clock, seed_locations()?, bounds);

    let mut alice = AgentSeed::new("Alice", "curious and sociable");
    alice.goals = vec!["make friends".to_owned(), "visit the library".to_owned()];
    alice.location_name = "alice's house".to_owned();
    alice.job = Some(Job {
        name: "researcher".to_owned(),
        salary: 100,
    });
    alice.plan = "Look for a new book at the library".to_owned();
    alice.weapon = catalog::weapon_by_name("knife");

    let mut bob = AgentSeed::new("Bob", "cautious and practical");
    bob.goals = vec!["find somewhere safe".to_owned(), "stockpile food".to_owned()];
    bob.location_name = "park".to_owned();
    bob.money = 800;
    bob.plan = "Search for food".to_owned();
    bob.weapon = catalog::weapon_by_name("pistol");

    for seed in [alice, bob] {
        let location_name = seed.location_name.clone();
        let id = world
            .roster
            .spawn(seed)
            .map_err(|e| anyhow::anyhow!("seed agent failed: {e}"))?;
        if let Some(position) = world.locations.get(&location_name).map(|l| l.position)
            && let Some(agent) = world.roster.get_mut(id)
        {
            agent.position = position;
        }
    }
    Ok(world)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = CliArgs::parse(std::env::args().skip(1))?;

    let config = if Path::new(&args.config).exists() {
        SimulationConfig::from_file(&args.config)?
    } else {
        info!(path = %args.config.display(), "config file not found; using defaults");
        SimulationConfig::default()
    };
    let oracle_config = OracleConfig::from_env()?;

    let mut world = match &args.load {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading snapshot {}", path.display()))?;
            let bounds = MapBounds::new(config.world.width, config.world.height);
            let world = snapshot::from_json(&json, seed_locations()?, bounds, config.night)?;
            info!(tick = world.clock.tick(), agents = world.roster.len(), "snapshot loaded");
            world
        }
        None => seed_world(&config)?,
    };
    world.provider = oracle_config.provider.as_str().to_owned();

    let mut arbiter = DecisionArbiter::new(&oracle_config)?;
    let scheduler = TickScheduler::new(Duration::from_millis(config.world.tick_delay_ms));
    let mut rng = StdRng::from_os_rng();

    info!(
        agents = world.roster.len(),
        locations = world.locations.len(),
        provider = %world.provider,
        "simulation starting"
    );

    // Run in summarization-interval chunks so memory compression happens
    // between ticks, never inside one.
    let mut remaining = args.ticks;
    loop {
        let chunk = remaining.map_or(SUMMARY_INTERVAL, |r| r.min(SUMMARY_INTERVAL));
        if chunk == 0 {
            break;
        }
        let halt = scheduler
            .run(&mut world, &config, &mut arbiter, &mut rng, Some(chunk))
            .await?;
        if let Some(reason) = halt {
            info!(?reason, tick = world.clock.tick(), "simulation reached a terminal state");
            break;
        }
        remaining = remaining.map(|r| r.saturating_sub(chunk));
        arbiter.summarize_memories(&mut world).await;
    }

    if let Some(path) = &args.save {
        std::fs::write(path, snapshot::to_json(&world)?)
            .with_context(|| format!("writing snapshot {}", path.display()))?;
        info!(path = %path.display(), "snapshot saved");
    }

    Ok(())
}
