//! Per-frame simulation step
//!
//! Advances the world by one variable time delta. Phases run in a fixed order:
//! player movement and aim, spawning, monster seek, overlap resolution,
//! firing, bullet flight, then combat.

use glam::Vec2;

use super::collision::resolve_overlaps;
use super::combat::resolve_combat;
use super::spawner::{spawn_due_bosses, spawn_due_monsters};
use super::state::GameState;
use super::steering::{advance_bullet, seek, steer_player, update_facing_towards};
use super::weapons::fire_weapons;

/// Input for a single step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Raw movement axes, each component in {-1, 0, 1}
    pub move_axis: Vec2,
    /// Point to face (mouse cursor); overrides the movement direction
    pub aim_target: Option<Vec2>,
}

impl TickInput {
    /// Input from key-style axes
    pub fn from_axes(x: i8, y: i8) -> Self {
        Self {
            move_axis: Vec2::new(x.signum() as f32, y.signum() as f32),
            aim_target: None,
        }
    }

    pub fn with_aim(mut self, target: Vec2) -> Self {
        self.aim_target = Some(target);
        self
    }
}

/// Advance the world by `dt` seconds. `dt` must be non-negative.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    debug_assert!(dt >= 0.0, "negative time delta {dt}");

    state.events.clear();
    state.frame += 1;
    state.time += dt;

    // Player
    let window = state.config.window;
    steer_player(&mut state.player, input.move_axis, dt, &window);
    if let Some(target) = input.aim_target {
        update_facing_towards(&mut state.player, target, state.config.epsilon);
    }

    // Spawning
    spawn_due_monsters(state);
    spawn_due_bosses(state);

    // Monsters
    let target = state.player.pos;
    let epsilon = state.config.epsilon;
    for monster in state.monsters.iter_mut() {
        seek(monster, target, dt, &window, epsilon);
    }
    resolve_overlaps(
        &state.player,
        &mut state.monsters,
        &state.config.separation,
        &window,
    );

    // Bullets
    fire_weapons(state);
    for bullet in state.bullets.iter_mut() {
        advance_bullet(bullet, dt);
    }

    resolve_combat(state, dt);
}
