//! Monster spawning
//!
//! Ordinary monsters arrive on a timer that tightens as the run goes on.
//! Bosses arrive when the player's level crosses a milestone.

use glam::Vec2;
use rand::Rng;

use super::state::{GameEvent, GameState, Monster, MonsterKind};
use crate::config::{SpawnConfig, WindowConfig};

/// Spawn interval at elapsed time `t`, stepping down every scaling period to a floor
pub fn spawn_interval(config: &SpawnConfig, t: f32) -> f32 {
    let periods = (t / config.scaling_period).floor();
    (config.base_interval - periods * config.interval_step).max(config.min_interval)
}

/// Boss size/health multiplier for a player at `level`
pub fn boss_scale(level: u32, level_step: u32) -> f32 {
    (level / level_step.max(1)).max(1) as f32
}

/// Pick a spawn point for a body of `radius`.
///
/// Tries uniformly random points inside the inset bounds and takes the first
/// one far enough from the player. If every attempt lands too close, falls
/// back to the corner diagonally opposite the player.
pub fn pick_spawn_position<R: Rng>(
    rng: &mut R,
    window: &WindowConfig,
    spawn: &SpawnConfig,
    player_pos: Vec2,
    radius: f32,
) -> Vec2 {
    let min = window.min_corner(radius);
    let max = window.max_corner(radius);

    for _ in 0..spawn.placement_attempts {
        let candidate = Vec2::new(rng.random_range(min.x..=max.x), rng.random_range(min.y..=max.y));
        if candidate.distance(player_pos) >= spawn.min_distance_from_player {
            return candidate;
        }
    }

    let center = window.center();
    Vec2::new(
        if player_pos.x <= center.x { max.x } else { min.x },
        if player_pos.y <= center.y { max.y } else { min.y },
    )
}

/// Spawn every ordinary monster that is due by the current simulation time.
///
/// A long step can owe several spawns; each one re-reads the interval at the
/// current time.
pub fn spawn_due_monsters(state: &mut GameState) {
    while state.time >= state.next_spawn_time {
        let pos = pick_spawn_position(
            &mut state.rng,
            &state.config.window,
            &state.config.spawn,
            state.player.pos,
            state.config.monster.radius,
        );
        let id = state.next_entity_id();
        state.monsters.push(Monster::normal(id, pos, &state.config));
        state.events.push(GameEvent::MonsterSpawned {
            kind: MonsterKind::Normal,
        });
        log::debug!("Spawned monster {} at ({:.0}, {:.0})", id, pos.x, pos.y);

        state.next_spawn_time += spawn_interval(&state.config.spawn, state.time);
    }
}

/// Spawn one boss per level milestone the player has reached
pub fn spawn_due_bosses(state: &mut GameState) {
    let step = state.config.boss.level_step.max(1);
    while state.player.level >= state.next_boss_level {
        let scale = boss_scale(state.player.level, step);
        let radius = state.config.boss.base_radius * scale;
        let pos = pick_spawn_position(
            &mut state.rng,
            &state.config.window,
            &state.config.spawn,
            state.player.pos,
            radius,
        );
        let id = state.next_entity_id();
        state.monsters.push(Monster::boss(id, pos, scale, &state.config));
        state.events.push(GameEvent::MonsterSpawned {
            kind: MonsterKind::Boss,
        });
        log::info!(
            "Boss {} spawned at level {} (scale x{})",
            id,
            state.player.level,
            scale
        );

        state.next_boss_level += step;
    }
}
