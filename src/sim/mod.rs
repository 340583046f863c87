//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (collection order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod combat;
pub mod progression;
pub mod snapshot;
pub mod spawner;
pub mod state;
pub mod steering;
pub mod tick;
pub mod weapons;

pub use collision::{Overlap, circle_overlap, resolve_overlaps};
pub use progression::{bullet_damage, gain_xp};
pub use snapshot::{BulletView, ItemView, MonsterView, PlayerView, Snapshot};
pub use spawner::{boss_scale, spawn_interval};
pub use state::{Bullet, GameEvent, GameState, Item, Monster, MonsterKind, Player};
pub use tick::{TickInput, tick};
