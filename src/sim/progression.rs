//! Experience and leveling
//!
//! Each level costs `floor(previous * multiplier)` XP. A single award can
//! carry the player through several levels; each one heals a fixed amount.

use super::state::Player;
use crate::config::{ProgressionConfig, WeaponConfig};

/// Add XP and resolve any level-ups. Returns the number of levels gained.
///
/// At the level cap XP is held just under the current threshold so the loop
/// never re-enters.
pub fn gain_xp(player: &mut Player, amount: f32, config: &ProgressionConfig) -> u32 {
    if amount <= 0.0 {
        return 0;
    }
    player.xp += amount;

    let mut gained = 0;
    while player.xp >= player.xp_to_next && player.level < config.max_level {
        player.xp -= player.xp_to_next;
        player.level += 1;
        player.xp_to_next = (player.xp_to_next * config.xp_multiplier).floor();
        player.heal(config.level_up_heal);
        gained += 1;
    }

    if player.level >= config.max_level && player.xp >= player.xp_to_next {
        player.xp = (player.xp_to_next - 1.0).max(0.0);
    }

    gained
}

/// Damage of a bullet fired by a player at `level`
#[inline]
pub fn bullet_damage(config: &WeaponConfig, level: u32) -> f32 {
    config.base_damage + config.damage_per_level * level.saturating_sub(1) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PlayerConfig, SimConfig};
    use glam::Vec2;

    fn fresh_player(progression: &ProgressionConfig) -> Player {
        Player::new(Vec2::ZERO, &PlayerConfig::default(), progression)
    }

    #[test]
    fn test_multi_level_up_in_one_award() {
        let config = ProgressionConfig {
            base_xp: 100.0,
            xp_multiplier: 1.5,
            ..Default::default()
        };
        let mut player = fresh_player(&config);

        let gained = gain_xp(&mut player, 250.0, &config);
        assert_eq!(gained, 2);
        assert_eq!(player.level, 3);
        assert_eq!(player.xp, 0.0);
        assert_eq!(player.xp_to_next, 225.0);
    }

    #[test]
    fn test_threshold_is_floored() {
        let config = ProgressionConfig {
            base_xp: 15.0,
            xp_multiplier: 1.5,
            ..Default::default()
        };
        let mut player = fresh_player(&config);
        gain_xp(&mut player, 15.0, &config);
        assert_eq!(player.xp_to_next, 22.0);
        gain_xp(&mut player, 22.0, &config);
        assert_eq!(player.xp_to_next, 33.0);
    }

    #[test]
    fn test_partial_award_keeps_level() {
        let config = ProgressionConfig::default();
        let mut player = fresh_player(&config);
        assert_eq!(gain_xp(&mut player, 40.0, &config), 0);
        assert_eq!(player.level, 1);
        assert_eq!(player.xp, 40.0);
    }

    #[test]
    fn test_non_positive_award_is_noop() {
        let config = ProgressionConfig::default();
        let mut player = fresh_player(&config);
        assert_eq!(gain_xp(&mut player, 0.0, &config), 0);
        assert_eq!(gain_xp(&mut player, -50.0, &config), 0);
        assert_eq!(player.xp, 0.0);
    }

    #[test]
    fn test_level_up_heals_capped() {
        let config = ProgressionConfig {
            level_up_heal: 20.0,
            ..Default::default()
        };
        let mut player = fresh_player(&config);
        player.take_damage(30.0);

        let xp = player.xp_to_next;
        gain_xp(&mut player, xp, &config);
        assert_eq!(player.health, 90.0);

        let xp = player.xp_to_next;
        gain_xp(&mut player, xp, &config);
        assert_eq!(player.health, player.max_health);
    }

    #[test]
    fn test_level_cap_clamps_xp() {
        let config = ProgressionConfig {
            base_xp: 10.0,
            xp_multiplier: 2.0,
            max_level: 3,
            ..Default::default()
        };
        let mut player = fresh_player(&config);

        let gained = gain_xp(&mut player, 10_000.0, &config);
        assert_eq!(gained, 2);
        assert_eq!(player.level, 3);
        assert_eq!(player.xp_to_next, 40.0);
        assert!(player.xp < player.xp_to_next);

        assert_eq!(gain_xp(&mut player, 500.0, &config), 0);
        assert_eq!(player.level, 3);
        assert!(player.xp < player.xp_to_next);
    }

    #[test]
    fn test_bullet_damage_scales_with_level() {
        let weapon = SimConfig::default().weapon;
        assert_eq!(bullet_damage(&weapon, 1), weapon.base_damage);
        assert_eq!(
            bullet_damage(&weapon, 4),
            weapon.base_damage + 3.0 * weapon.damage_per_level
        );
    }
}
