//! Automatic weapons
//!
//! Two independent timers: a single aimed shot and a fanned volley. Both catch
//! up after a long step by firing every shot they owe.

use glam::Vec2;

use super::state::{Bullet, GameState, Player};
use crate::config::WeaponConfig;
use crate::rotate;

/// Angular offsets (radians) of each bullet in a volley, centered on zero
pub fn volley_offsets(count: u32, spread_degrees: f32) -> Vec<f32> {
    match count {
        0 => Vec::new(),
        1 => vec![0.0],
        n => {
            let spread = spread_degrees.to_radians();
            let step = spread / (n - 1) as f32;
            (0..n).map(|i| -spread / 2.0 + step * i as f32).collect()
        }
    }
}

/// Launch point just outside the player along its facing
#[inline]
pub fn muzzle_position(player: &Player, config: &WeaponConfig) -> Vec2 {
    player.pos + player.facing * (player.radius + config.muzzle_offset)
}

/// Build a bullet leaving the muzzle at `angle_offset` from facing
pub fn make_bullet(player: &Player, config: &WeaponConfig, angle_offset: f32, damage: f32) -> Bullet {
    let dir = rotate(player.facing, angle_offset);
    Bullet {
        pos: muzzle_position(player, config),
        vel: dir * config.bullet_speed,
        radius: config.bullet_radius,
        damage,
    }
}

/// Fire every primary shot and volley that is due by the current time
pub fn fire_weapons(state: &mut GameState) {
    let weapon = state.config.weapon;

    while state.time >= state.next_primary_time {
        let damage = state.current_bullet_damage();
        state.bullets.push(make_bullet(&state.player, &weapon, 0.0, damage));
        state.next_primary_time += weapon.primary_cooldown;
        log::trace!("Primary shot at t={:.2}", state.time);
    }

    while state.time >= state.next_volley_time {
        let damage = state.current_bullet_damage();
        for offset in volley_offsets(weapon.volley_count, weapon.volley_spread_degrees) {
            state.bullets.push(make_bullet(&state.player, &weapon, offset, damage));
        }
        state.next_volley_time += weapon.volley_cooldown;
        log::trace!("Volley of {} at t={:.2}", weapon.volley_count, state.time);
    }
}
