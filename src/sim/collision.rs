//! Circle overlap tests and overlap resolution
//!
//! The crowd can get dense, so monsters are relaxed apart with a fixed number
//! of pairwise passes each step. There is no convergence check: after
//! `passes` sweeps whatever overlap is left stays until next step.

use glam::Vec2;

use super::state::{Monster, Player};
use crate::FALLBACK_AXIS;
use crate::config::{SeparationConfig, WindowConfig};

/// Result of an overlap check between two circles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overlap {
    /// Unit axis pointing from the first body toward the second
    pub axis: Vec2,
    /// How far the bodies must move apart to just touch
    pub penetration: f32,
}

/// Overlap between circles at `a` and `b` that must stay `min_dist` apart.
///
/// Coincident centers get [`FALLBACK_AXIS`] instead of a NaN direction.
pub fn circle_overlap(a: Vec2, b: Vec2, min_dist: f32, epsilon: f32) -> Option<Overlap> {
    let delta = b - a;
    let dist = delta.length();
    if dist >= min_dist {
        return None;
    }

    let axis = if dist < epsilon {
        FALLBACK_AXIS
    } else {
        delta / dist
    };
    Some(Overlap {
        axis,
        penetration: min_dist - dist,
    })
}

/// Whether two circles touch, with `padding` of slack
#[inline]
pub fn circles_touch(a: Vec2, ra: f32, b: Vec2, rb: f32, padding: f32) -> bool {
    let reach = ra + rb + padding;
    a.distance_squared(b) <= reach * reach
}

/// One sweep over every unordered monster pair, splitting each correction evenly
pub fn separate_monsters_pass(monsters: &mut [Monster], config: &SeparationConfig, window: &WindowConfig) {
    for i in 0..monsters.len() {
        let (head, tail) = monsters.split_at_mut(i + 1);
        let a = &mut head[i];
        for b in tail.iter_mut() {
            let min_dist = a.radius + b.radius + config.padding;
            if let Some(overlap) = circle_overlap(a.pos, b.pos, min_dist, config.epsilon) {
                let push = overlap.axis * (overlap.penetration * 0.5);
                a.pos = window.clamp(a.pos - push, a.radius);
                b.pos = window.clamp(b.pos + push, b.radius);
            }
        }
    }
}

/// Push monsters off the player. The player does not move, so each monster
/// takes the whole correction.
pub fn push_monsters_from_player(
    player: &Player,
    monsters: &mut [Monster],
    config: &SeparationConfig,
    window: &WindowConfig,
) {
    for monster in monsters.iter_mut() {
        let min_dist = player.radius + monster.radius + config.padding;
        if let Some(overlap) = circle_overlap(player.pos, monster.pos, min_dist, config.epsilon) {
            monster.pos = window.clamp(monster.pos + overlap.axis * overlap.penetration, monster.radius);
        }
    }
}

/// Run the configured number of monster-monster passes, then one player pass
pub fn resolve_overlaps(
    player: &Player,
    monsters: &mut [Monster],
    config: &SeparationConfig,
    window: &WindowConfig,
) {
    if monsters.len() > 1 {
        for _ in 0..config.passes {
            separate_monsters_pass(monsters, config, window);
        }
    }
    push_monsters_from_player(player, monsters, config, window);
}
