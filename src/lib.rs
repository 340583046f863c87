//! Survivor Sim - simulation core of a top-down horde survival game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (steering, spawning, separation, combat, leveling)
//! - `config`: Data-driven game balance, loadable from JSON
//!
//! Windowing, drawing and input polling live outside this crate. The core takes
//! a movement intent, an optional aim point and a time delta per step, and hands
//! back a [`sim::Snapshot`] for drawing.

pub mod config;
pub mod sim;

pub use config::{ConfigError, SimConfig};

use glam::Vec2;

/// Default tuning values
pub mod consts {
    /// Window dimensions (pixels)
    pub const WINDOW_WIDTH: f32 = 1920.0;
    pub const WINDOW_HEIGHT: f32 = 1020.0;
    /// Inset from the window edge that nothing may cross
    pub const SCREEN_MARGIN: f32 = 16.0;

    /// Player defaults
    pub const PLAYER_BASE_SPEED: f32 = 280.0; // pixels per second
    pub const PLAYER_RADIUS: f32 = 12.0;
    pub const PLAYER_MAX_HP: f32 = 100.0;

    /// Monster defaults
    pub const MONSTER_SPEED: f32 = 110.0;
    pub const MONSTER_RADIUS: f32 = 12.0;
    pub const MONSTER_MAX_HP: f32 = 30.0;
    pub const MONSTER_XP_REWARD: f32 = 20.0;
    pub const MONSTER_COLOR: [u8; 3] = [220, 80, 80];

    /// Boss defaults (before level scaling)
    pub const BOSS_SPEED: f32 = 80.0;
    pub const BOSS_RADIUS: f32 = 28.0;
    pub const BOSS_MAX_HP: f32 = 300.0;
    pub const BOSS_XP_REWARD: f32 = 150.0;
    pub const BOSS_COLOR: [u8; 3] = [170, 70, 210];
    /// A boss appears every this many player levels
    pub const BOSS_LEVEL_STEP: u32 = 5;

    /// Spawn cadence
    pub const MONSTER_SPAWN_INTERVAL_SECONDS: f32 = 5.0;
    pub const MONSTER_SPAWN_INTERVAL_STEP: f32 = 0.5;
    pub const MONSTER_SPAWN_SCALING_PERIOD: f32 = 60.0;
    pub const MONSTER_SPAWN_MIN_INTERVAL: f32 = 1.5;
    pub const MONSTER_MIN_DISTANCE_FROM_PLAYER: f32 = 220.0;
    pub const SPAWN_PLACEMENT_ATTEMPTS: u32 = 32;

    /// Weapons
    pub const BULLET_SPEED: f32 = 620.0;
    pub const BULLET_RADIUS: f32 = 4.0;
    pub const BULLET_BASE_DAMAGE: f32 = 10.0;
    pub const BULLET_DAMAGE_PER_LEVEL: f32 = 2.0;
    pub const PRIMARY_COOLDOWN: f32 = 0.45;
    pub const VOLLEY_COOLDOWN: f32 = 2.5;
    pub const VOLLEY_COUNT: u32 = 5;
    pub const VOLLEY_SPREAD_DEGREES: f32 = 40.0;
    pub const MUZZLE_OFFSET: f32 = 4.0;

    /// Experience curve
    pub const XP_BASE: f32 = 100.0;
    pub const XP_MULTIPLIER: f32 = 1.5;
    pub const MAX_LEVEL: u32 = 50;
    pub const LEVEL_UP_HEAL: f32 = 20.0;

    /// Contact damage while a monster touches the player
    pub const CONTACT_DAMAGE_PER_SECOND: f32 = 18.0;
    pub const CONTACT_PADDING: f32 = 2.0;

    /// Overlap resolution
    pub const SEPARATION_PADDING: f32 = 1.0;
    pub const SEPARATION_PASSES: u32 = 4;

    /// Health pickups
    pub const ITEM_DROP_CHANCE: f32 = 0.12;
    pub const ITEM_SIZE: f32 = 14.0;
    pub const ITEM_HEAL_AMOUNT: f32 = 15.0;
    pub const MAX_ITEMS: usize = 64;

    /// Below this distance a direction is treated as undefined
    pub const DIRECTION_EPSILON: f32 = 1e-4;
}

/// Fallback axis used wherever a direction collapses to zero length
pub const FALLBACK_AXIS: Vec2 = Vec2::X;

/// Unit vector from `from` toward `to`, or `None` if they are closer than `epsilon`
#[inline]
pub fn direction_to(from: Vec2, to: Vec2, epsilon: f32) -> Option<Vec2> {
    let delta = to - from;
    let dist = delta.length();
    if dist > epsilon {
        Some(delta / dist)
    } else {
        None
    }
}

/// Rotate a vector by `angle` radians
#[inline]
pub fn rotate(v: Vec2, angle: f32) -> Vec2 {
    Vec2::from_angle(angle).rotate(v)
}
