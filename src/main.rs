//! Survivor Sim headless runner
//!
//! Drives the simulation with a scripted pilot at a fixed frame rate and logs
//! how the run goes. Useful for balancing and for reproducing a seed.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use survivor_sim::SimConfig;
use survivor_sim::sim::{GameEvent, GameState, MonsterKind, TickInput, tick};

#[derive(Debug, Parser)]
#[command(name = "survivor-sim", about = "Run the survival simulation headless")]
struct Args {
    /// JSON tuning file (missing fields use defaults)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// RNG seed
    #[arg(short, long, default_value_t = 1)]
    seed: u64,
    /// Simulated seconds to run
    #[arg(long, default_value_t = 120.0)]
    seconds: f32,
    /// Steps per simulated second
    #[arg(long, default_value_t = 60)]
    fps: u32,
    /// Print the final snapshot as JSON
    #[arg(long)]
    dump: bool,
}

/// Eight compass directions the pilot cycles through
const PATROL: [(i8, i8); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

/// Seconds spent walking each patrol leg
const PATROL_LEG_SECONDS: f32 = 1.5;

/// Walk a slow circle and aim at the closest monster
fn pilot(state: &GameState) -> TickInput {
    let leg = (state.time / PATROL_LEG_SECONDS) as usize % PATROL.len();
    let (x, y) = PATROL[leg];
    let input = TickInput::from_axes(x, y);

    let nearest = state
        .monsters
        .iter()
        .map(|m| m.pos)
        .min_by(|a, b| {
            a.distance_squared(state.player.pos)
                .partial_cmp(&b.distance_squared(state.player.pos))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    match nearest {
        Some(target) => input.with_aim(target),
        None => input,
    }
}

#[derive(Debug, Default)]
struct RunStats {
    spawned: u32,
    bosses: u32,
    killed: u32,
    pickups: u32,
}

impl RunStats {
    fn record(&mut self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::MonsterSpawned { kind } => {
                    self.spawned += 1;
                    if *kind == MonsterKind::Boss {
                        self.bosses += 1;
                    }
                }
                GameEvent::MonsterKilled { .. } => self.killed += 1,
                GameEvent::ItemPickedUp { .. } => self.pickups += 1,
                GameEvent::LevelUp { .. } => {}
            }
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &args.config {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };

    let fps = args.fps.max(1);
    let dt = 1.0 / fps as f32;
    let total_steps = (args.seconds.max(0.0) * fps as f32).round() as u64;

    let mut state = GameState::new(config, args.seed);
    let mut stats = RunStats::default();
    log::info!(
        "Starting run: seed={} seconds={} fps={}",
        args.seed,
        args.seconds,
        fps
    );

    for step in 1..=total_steps {
        let input = pilot(&state);
        tick(&mut state, &input, dt);
        stats.record(&state.events);

        if step % fps as u64 == 0 {
            log::info!(
                "t={:>6.1}s hp={:>5.1}/{} lvl={} xp={:.0}/{:.0} monsters={} bullets={}",
                state.time,
                state.player.health,
                state.player.max_health,
                state.player.level,
                state.player.xp,
                state.player.xp_to_next,
                state.monsters.len(),
                state.bullets.len(),
            );
        }
    }

    log::info!(
        "Run finished: level {} | spawned {} ({} bosses) | killed {} | pickups {} | hp {:.1}",
        state.player.level,
        stats.spawned,
        stats.bosses,
        stats.killed,
        stats.pickups,
        state.player.health,
    );

    if args.dump {
        println!("{}", serde_json::to_string_pretty(&state.snapshot())?);
    }

    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
