//! Game state and core simulation types
//!
//! The world owns every entity collection. Systems borrow them for the duration
//! of a step and never hold on to an entity between steps.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::{PlayerConfig, ProgressionConfig, SimConfig};

/// The player-driven actor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub speed: f32,
    pub radius: f32,
    /// Always within [0, max_health]
    pub health: f32,
    pub max_health: f32,
    /// Unit vector; keeps its last valid value when input goes idle
    pub facing: Vec2,
    /// Starts at 1
    pub level: u32,
    pub xp: f32,
    /// XP needed for the next level
    pub xp_to_next: f32,
}

impl Player {
    pub fn new(pos: Vec2, config: &PlayerConfig, progression: &ProgressionConfig) -> Self {
        Self {
            pos,
            speed: config.speed,
            radius: config.radius,
            health: config.max_health,
            max_health: config.max_health,
            facing: Vec2::NEG_Y,
            level: 1,
            xp: 0.0,
            xp_to_next: progression.base_xp,
        }
    }

    /// Subtract health, flooring at zero. Non-positive amounts are ignored.
    pub fn take_damage(&mut self, amount: f32) {
        if amount <= 0.0 {
            return;
        }
        self.health = (self.health - amount).max(0.0);
    }

    /// Restore health, capped at max. Non-positive amounts are ignored.
    pub fn heal(&mut self, amount: f32) {
        if amount <= 0.0 {
            return;
        }
        self.health = (self.health + amount).min(self.max_health);
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }
}

/// Monster variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MonsterKind {
    #[default]
    Normal,
    /// Level-milestone spawn with scaled radius and health
    Boss,
}

/// A hostile entity that seeks the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Monster {
    pub id: u32,
    pub kind: MonsterKind,
    pub pos: Vec2,
    pub speed: f32,
    pub radius: f32,
    pub color: [u8; 3],
    pub health: f32,
    pub max_health: f32,
    /// XP granted to the player on death
    pub xp_reward: f32,
}

impl Monster {
    /// Ordinary monster at `pos` with stats from `config`
    pub fn normal(id: u32, pos: Vec2, config: &SimConfig) -> Self {
        let stats = &config.monster;
        Self {
            id,
            kind: MonsterKind::Normal,
            pos,
            speed: stats.speed,
            radius: stats.radius,
            color: stats.color,
            health: stats.max_health,
            max_health: stats.max_health,
            xp_reward: stats.xp_reward,
        }
    }

    /// Boss at `pos`; `scale` multiplies both radius and max health
    pub fn boss(id: u32, pos: Vec2, scale: f32, config: &SimConfig) -> Self {
        let stats = &config.boss;
        let max_health = stats.base_max_health * scale;
        Self {
            id,
            kind: MonsterKind::Boss,
            pos,
            speed: stats.speed,
            radius: stats.base_radius * scale,
            color: stats.color,
            health: max_health,
            max_health,
            xp_reward: stats.xp_reward,
        }
    }

    /// Subtract health, flooring at zero. Non-positive amounts are ignored.
    pub fn take_damage(&mut self, amount: f32) {
        if amount <= 0.0 {
            return;
        }
        self.health = (self.health - amount).max(0.0);
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }
}

/// A fired projectile; velocity and damage are fixed at creation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub damage: f32,
}

/// A health pickup left behind by a killed monster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub pos: Vec2,
    /// Edge length of the square
    pub size: f32,
    pub heal: f32,
}

/// Something noteworthy that happened during the last step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    MonsterSpawned { kind: MonsterKind },
    MonsterKilled { kind: MonsterKind, xp: f32 },
    LevelUp { level: u32 },
    ItemPickedUp { heal: f32 },
}

/// Complete world state. Same config, seed and input sequence give the same run.
#[derive(Debug, Clone)]
pub struct GameState {
    pub(crate) config: SimConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    /// Seconds of simulated time
    pub time: f32,
    /// Step counter
    pub frame: u64,
    pub player: Player,
    pub monsters: Vec<Monster>,
    pub bullets: Vec<Bullet>,
    pub items: Vec<Item>,
    /// Events from the most recent step
    pub events: Vec<GameEvent>,
    /// Simulation time at which the next ordinary monster appears
    pub next_spawn_time: f32,
    /// Player level that triggers the next boss
    pub next_boss_level: u32,
    pub next_primary_time: f32,
    pub next_volley_time: f32,
    next_id: u32,
}

impl GameState {
    /// Create a world with the player centered in the window
    pub fn new(config: SimConfig, seed: u64) -> Self {
        let player = Player::new(config.window.center(), &config.player, &config.progression);
        let next_spawn_time = super::spawner::spawn_interval(&config.spawn, 0.0);
        let next_boss_level = config.boss.level_step.max(1);
        let next_primary_time = config.weapon.primary_cooldown;
        let next_volley_time = config.weapon.volley_cooldown;

        Self {
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time: 0.0,
            frame: 0,
            player,
            monsters: Vec::new(),
            bullets: Vec::new(),
            items: Vec::new(),
            events: Vec::new(),
            next_spawn_time,
            next_boss_level,
            next_primary_time,
            next_volley_time,
            next_id: 1,
        }
    }

    /// Tuning this world was built with
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Damage a projectile fired right now would carry
    pub fn current_bullet_damage(&self) -> f32 {
        super::progression::bullet_damage(&self.config.weapon, self.player.level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_centers_player() {
        let state = GameState::new(SimConfig::default(), 1);
        assert_eq!(state.player.pos, state.config().window.center());
        assert_eq!(state.player.level, 1);
        assert_eq!(state.player.health, state.player.max_health);
        assert!((state.player.facing.length() - 1.0).abs() < 1e-6);
        assert!(state.monsters.is_empty());
        assert_eq!(state.next_boss_level, state.config().boss.level_step);
    }

    #[test]
    fn test_player_health_floors_and_caps() {
        let config = SimConfig::default();
        let mut player = Player::new(Vec2::ZERO, &config.player, &config.progression);

        player.take_damage(30.0);
        assert_eq!(player.health, 70.0);
        player.take_damage(500.0);
        assert_eq!(player.health, 0.0);
        assert!(!player.is_alive());

        player.heal(250.0);
        assert_eq!(player.health, player.max_health);
    }

    #[test]
    fn test_non_positive_amounts_are_noops() {
        let config = SimConfig::default();
        let mut player = Player::new(Vec2::ZERO, &config.player, &config.progression);
        player.take_damage(20.0);

        player.take_damage(-5.0);
        player.take_damage(0.0);
        player.heal(-5.0);
        assert_eq!(player.health, 80.0);

        let mut monster = Monster::normal(1, Vec2::ZERO, &config);
        monster.take_damage(-10.0);
        assert_eq!(monster.health, monster.max_health);
    }

    #[test]
    fn test_boss_scales_radius_and_health() {
        let config = SimConfig::default();
        let boss = Monster::boss(1, Vec2::ZERO, 2.0, &config);
        assert_eq!(boss.kind, MonsterKind::Boss);
        assert_eq!(boss.radius, config.boss.base_radius * 2.0);
        assert_eq!(boss.max_health, config.boss.base_max_health * 2.0);
        assert_eq!(boss.health, boss.max_health);
    }

    #[test]
    fn test_entity_ids_are_unique() {
        let mut state = GameState::new(SimConfig::default(), 7);
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        assert_ne!(a, b);
    }
}
