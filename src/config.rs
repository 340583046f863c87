//! Simulation tuning
//!
//! One immutable [`SimConfig`] is handed to the world at construction. Each
//! section falls back to the defaults in [`crate::consts`], so a JSON file only
//! needs to name the values it overrides.
//!
//! Values are not validated. Negative speeds, a window smaller than twice the
//! margin, or a zero XP multiplier are caller errors.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Failure to read or parse a config file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Playfield bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    /// Inset from each edge
    pub margin: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: WINDOW_WIDTH,
            height: WINDOW_HEIGHT,
            margin: SCREEN_MARGIN,
        }
    }
}

impl WindowConfig {
    /// Allowed center range for a body inset by `margin + inset`.
    ///
    /// An axis too narrow for the body collapses to the window center, so the
    /// range is never empty.
    fn inset_bounds(&self, inset: f32) -> (Vec2, Vec2) {
        let lo = Vec2::splat(self.margin + inset);
        let hi = Vec2::new(
            self.width - self.margin - inset,
            self.height - self.margin - inset,
        );
        let collapsed = lo.cmpgt(hi);
        let center = self.center();
        (
            Vec2::select(collapsed, center, lo),
            Vec2::select(collapsed, center, hi),
        )
    }

    /// Smallest allowed center for a body inset by `margin + inset`
    #[inline]
    pub fn min_corner(&self, inset: f32) -> Vec2 {
        self.inset_bounds(inset).0
    }

    /// Largest allowed center for a body inset by `margin + inset`
    #[inline]
    pub fn max_corner(&self, inset: f32) -> Vec2 {
        self.inset_bounds(inset).1
    }

    /// Clamp a position into the margin, shrunk further by `inset` on each side
    #[inline]
    pub fn clamp(&self, pos: Vec2, inset: f32) -> Vec2 {
        pos.clamp(self.min_corner(inset), self.max_corner(inset))
    }

    /// Whether a circle of `radius` still touches the window
    #[inline]
    pub fn touches(&self, pos: Vec2, radius: f32) -> bool {
        pos.x >= -radius
            && pos.x <= self.width + radius
            && pos.y >= -radius
            && pos.y <= self.height + radius
    }

    /// Window center
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub speed: f32,
    pub radius: f32,
    pub max_health: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            speed: PLAYER_BASE_SPEED,
            radius: PLAYER_RADIUS,
            max_health: PLAYER_MAX_HP,
        }
    }
}

/// Ordinary monster stats
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonsterConfig {
    pub speed: f32,
    pub radius: f32,
    pub max_health: f32,
    pub xp_reward: f32,
    pub color: [u8; 3],
}

impl Default for MonsterConfig {
    fn default() -> Self {
        Self {
            speed: MONSTER_SPEED,
            radius: MONSTER_RADIUS,
            max_health: MONSTER_MAX_HP,
            xp_reward: MONSTER_XP_REWARD,
            color: MONSTER_COLOR,
        }
    }
}

/// Boss stats before level scaling
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BossConfig {
    pub speed: f32,
    pub base_radius: f32,
    pub base_max_health: f32,
    pub xp_reward: f32,
    pub color: [u8; 3],
    /// Player levels between bosses; also the divisor of the scale factor
    pub level_step: u32,
}

impl Default for BossConfig {
    fn default() -> Self {
        Self {
            speed: BOSS_SPEED,
            base_radius: BOSS_RADIUS,
            base_max_health: BOSS_MAX_HP,
            xp_reward: BOSS_XP_REWARD,
            color: BOSS_COLOR,
            level_step: BOSS_LEVEL_STEP,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// Interval at t = 0
    pub base_interval: f32,
    /// Amount shaved off per elapsed scaling period
    pub interval_step: f32,
    pub scaling_period: f32,
    /// Floor for the interval
    pub min_interval: f32,
    pub min_distance_from_player: f32,
    pub placement_attempts: u32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            base_interval: MONSTER_SPAWN_INTERVAL_SECONDS,
            interval_step: MONSTER_SPAWN_INTERVAL_STEP,
            scaling_period: MONSTER_SPAWN_SCALING_PERIOD,
            min_interval: MONSTER_SPAWN_MIN_INTERVAL,
            min_distance_from_player: MONSTER_MIN_DISTANCE_FROM_PLAYER,
            placement_attempts: SPAWN_PLACEMENT_ATTEMPTS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponConfig {
    pub bullet_speed: f32,
    pub bullet_radius: f32,
    pub base_damage: f32,
    /// Extra damage per player level above 1
    pub damage_per_level: f32,
    pub primary_cooldown: f32,
    pub volley_cooldown: f32,
    pub volley_count: u32,
    /// Total fan angle of a volley
    pub volley_spread_degrees: f32,
    /// Gap between the player's edge and the launch point
    pub muzzle_offset: f32,
}

impl Default for WeaponConfig {
    fn default() -> Self {
        Self {
            bullet_speed: BULLET_SPEED,
            bullet_radius: BULLET_RADIUS,
            base_damage: BULLET_BASE_DAMAGE,
            damage_per_level: BULLET_DAMAGE_PER_LEVEL,
            primary_cooldown: PRIMARY_COOLDOWN,
            volley_cooldown: VOLLEY_COOLDOWN,
            volley_count: VOLLEY_COUNT,
            volley_spread_degrees: VOLLEY_SPREAD_DEGREES,
            muzzle_offset: MUZZLE_OFFSET,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionConfig {
    /// XP needed to go from level 1 to 2
    pub base_xp: f32,
    pub xp_multiplier: f32,
    pub max_level: u32,
    pub level_up_heal: f32,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            base_xp: XP_BASE,
            xp_multiplier: XP_MULTIPLIER,
            max_level: MAX_LEVEL,
            level_up_heal: LEVEL_UP_HEAL,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    pub contact_damage_per_second: f32,
    pub contact_padding: f32,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            contact_damage_per_second: CONTACT_DAMAGE_PER_SECOND,
            contact_padding: CONTACT_PADDING,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeparationConfig {
    pub padding: f32,
    /// Fixed number of relaxation passes per step
    pub passes: u32,
    pub epsilon: f32,
}

impl Default for SeparationConfig {
    fn default() -> Self {
        Self {
            padding: SEPARATION_PADDING,
            passes: SEPARATION_PASSES,
            epsilon: DIRECTION_EPSILON,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemConfig {
    /// Probability in [0, 1] that a killed monster drops a health item
    pub drop_chance: f32,
    /// Edge length of the (square) item
    pub size: f32,
    pub heal_amount: f32,
    pub max_items: usize,
}

impl Default for ItemConfig {
    fn default() -> Self {
        Self {
            drop_chance: ITEM_DROP_CHANCE,
            size: ITEM_SIZE,
            heal_amount: ITEM_HEAL_AMOUNT,
            max_items: MAX_ITEMS,
        }
    }
}

/// Complete simulation tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub window: WindowConfig,
    pub player: PlayerConfig,
    pub monster: MonsterConfig,
    pub boss: BossConfig,
    pub spawn: SpawnConfig,
    pub weapon: WeaponConfig,
    pub progression: ProgressionConfig,
    pub combat: CombatConfig,
    pub separation: SeparationConfig,
    pub items: ItemConfig,
    /// Generic near-zero guard for steering and aiming
    pub epsilon: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            player: PlayerConfig::default(),
            monster: MonsterConfig::default(),
            boss: BossConfig::default(),
            spawn: SpawnConfig::default(),
            weapon: WeaponConfig::default(),
            progression: ProgressionConfig::default(),
            combat: CombatConfig::default(),
            separation: SeparationConfig::default(),
            items: ItemConfig::default(),
            epsilon: DIRECTION_EPSILON,
        }
    }
}

impl SimConfig {
    /// Parse a (possibly partial) JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            SimConfig::from_json(r#"{ "window": { "width": 800.0 }, "spawn": { "min_interval": 0.5 } }"#)
                .unwrap();
        assert_eq!(config.window.width, 800.0);
        assert_eq!(config.window.height, WINDOW_HEIGHT);
        assert_eq!(config.spawn.min_interval, 0.5);
        assert_eq!(config.spawn.base_interval, MONSTER_SPAWN_INTERVAL_SECONDS);
        assert_eq!(config.player, PlayerConfig::default());
    }

    #[test]
    fn test_json_roundtrip() {
        let config = SimConfig::default();
        let json = config.to_json().unwrap();
        assert_eq!(SimConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        let err = SimConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = SimConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_window_clamp_insets() {
        let window = WindowConfig::default();
        let clamped = window.clamp(Vec2::new(-50.0, 5000.0), 12.0);
        assert_eq!(clamped.x, SCREEN_MARGIN + 12.0);
        assert_eq!(clamped.y, WINDOW_HEIGHT - SCREEN_MARGIN - 12.0);

        let clamped = window.clamp(Vec2::new(-50.0, 5000.0), 0.0);
        assert_eq!(clamped.x, SCREEN_MARGIN);
        assert_eq!(clamped.y, WINDOW_HEIGHT - SCREEN_MARGIN);
    }

    #[test]
    fn test_window_oversized_inset_collapses_to_center() {
        let window = WindowConfig::default();
        // Too tall for the window, still fits across
        let inset = 560.0;
        let min = window.min_corner(inset);
        let max = window.max_corner(inset);
        assert_eq!(min.y, WINDOW_HEIGHT / 2.0);
        assert_eq!(max.y, WINDOW_HEIGHT / 2.0);
        assert_eq!(min.x, SCREEN_MARGIN + inset);
        assert_eq!(max.x, WINDOW_WIDTH - SCREEN_MARGIN - inset);

        let clamped = window.clamp(Vec2::new(0.0, 0.0), inset);
        assert_eq!(clamped, Vec2::new(SCREEN_MARGIN + inset, WINDOW_HEIGHT / 2.0));
    }

    #[test]
    fn test_window_touches() {
        let window = WindowConfig::default();
        assert!(window.touches(Vec2::new(-3.0, 10.0), 4.0));
        assert!(!window.touches(Vec2::new(-5.0, 10.0), 4.0));
        assert!(!window.touches(Vec2::new(10.0, WINDOW_HEIGHT + 4.5), 4.0));
    }
}
