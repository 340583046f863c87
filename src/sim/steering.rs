//! Movement integration for the player, monsters and bullets

use glam::Vec2;

use super::state::{Bullet, Monster, Player};
use crate::config::WindowConfig;
use crate::direction_to;

/// Turn raw axis input (each component in {-1, 0, 1}) into a unit direction, or zero
#[inline]
pub fn movement_intent(axes: Vec2) -> Vec2 {
    axes.normalize_or_zero()
}

/// Move the player along `intent` and clamp to the margin.
///
/// The player's clamp ignores its radius while monsters subtract theirs. Both
/// are kept as-is since the difference is visible in play.
pub fn steer_player(player: &mut Player, intent: Vec2, dt: f32, window: &WindowConfig) {
    let dir = movement_intent(intent);
    player.pos += dir * player.speed * dt;
    player.pos = window.clamp(player.pos, 0.0);

    if dir != Vec2::ZERO {
        player.facing = dir;
    }
}

/// Point the player at `target`; no-op when the target sits on the player
pub fn update_facing_towards(player: &mut Player, target: Vec2, epsilon: f32) {
    if let Some(dir) = direction_to(player.pos, target, epsilon) {
        player.facing = dir;
    }
}

/// Seek straight at `target`, then clamp inside the margin minus own radius
pub fn seek(monster: &mut Monster, target: Vec2, dt: f32, window: &WindowConfig, epsilon: f32) {
    if let Some(dir) = direction_to(monster.pos, target, epsilon) {
        monster.pos += dir * monster.speed * dt;
    }
    monster.pos = window.clamp(monster.pos, monster.radius);
}

/// Ballistic integration
#[inline]
pub fn advance_bullet(bullet: &mut Bullet, dt: f32) {
    bullet.pos += bullet.vel * dt;
}
