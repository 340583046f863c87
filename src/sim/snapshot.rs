//! Read-only view of the world for drawing

use glam::Vec2;
use serde::Serialize;

use super::state::{GameState, MonsterKind};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub radius: f32,
    pub health: f32,
    pub max_health: f32,
    pub level: u32,
    pub xp: f32,
    pub xp_to_next: f32,
    pub facing: Vec2,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonsterView {
    pub pos: Vec2,
    pub radius: f32,
    pub kind: MonsterKind,
    pub color: [u8; 3],
    pub health: f32,
    pub max_health: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BulletView {
    pub pos: Vec2,
    pub radius: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemView {
    pub pos: Vec2,
    pub size: f32,
}

/// Everything a renderer needs for one frame, in collection order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub time: f32,
    pub frame: u64,
    pub player: PlayerView,
    pub monsters: Vec<MonsterView>,
    pub bullets: Vec<BulletView>,
    pub items: Vec<ItemView>,
}

impl GameState {
    /// Copy out the drawable state
    pub fn snapshot(&self) -> Snapshot {
        let p = &self.player;
        Snapshot {
            time: self.time,
            frame: self.frame,
            player: PlayerView {
                pos: p.pos,
                radius: p.radius,
                health: p.health,
                max_health: p.max_health,
                level: p.level,
                xp: p.xp,
                xp_to_next: p.xp_to_next,
                facing: p.facing,
            },
            monsters: self
                .monsters
                .iter()
                .map(|m| MonsterView {
                    pos: m.pos,
                    radius: m.radius,
                    kind: m.kind,
                    color: m.color,
                    health: m.health,
                    max_health: m.max_health,
                })
                .collect(),
            bullets: self
                .bullets
                .iter()
                .map(|b| BulletView {
                    pos: b.pos,
                    radius: b.radius,
                })
                .collect(),
            items: self
                .items
                .iter()
                .map(|i| ItemView {
                    pos: i.pos,
                    size: i.size,
                })
                .collect(),
        }
    }
}
