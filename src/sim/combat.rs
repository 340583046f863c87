//! Damage resolution
//!
//! Runs after movement and separation. Contact damage and bullet damage are
//! applied as two separate subtractions, each floored at zero.
//!
//! Hit tests use current positions only. A bullet fast enough to cross a
//! monster within one step can pass through it.

use glam::Vec2;
use rand::Rng;

use super::collision::circles_touch;
use super::progression::gain_xp;
use super::state::{Bullet, GameEvent, GameState, Item, Monster, Player};
use crate::config::{CombatConfig, WindowConfig};

/// Total contact damage this step from every monster touching the player
pub fn contact_damage(player: &Player, monsters: &[Monster], config: &CombatConfig, dt: f32) -> f32 {
    monsters
        .iter()
        .filter(|m| circles_touch(player.pos, player.radius, m.pos, m.radius, config.contact_padding))
        .map(|_| config.contact_damage_per_second * dt)
        .sum()
}

/// Drop bullets that have left the window by more than their radius
pub fn cull_offscreen_bullets(bullets: &mut Vec<Bullet>, window: &WindowConfig) {
    bullets.retain(|b| window.touches(b.pos, b.radius));
}

/// Match bullets to monsters and apply damage.
///
/// Each monster takes at most one bullet per step (the first one in range),
/// and a bullet is spent on the first monster it hits. Spent bullets are
/// filtered out afterwards. Returns indices of monsters that died.
pub fn resolve_bullet_hits(monsters: &mut [Monster], bullets: &mut Vec<Bullet>) -> Vec<usize> {
    let mut spent = vec![false; bullets.len()];
    let mut killed = Vec::new();

    for (mi, monster) in monsters.iter_mut().enumerate() {
        let hit = bullets.iter().enumerate().find(|(bi, bullet)| {
            !spent[*bi] && circles_touch(monster.pos, monster.radius, bullet.pos, bullet.radius, 0.0)
        });
        if let Some((bi, bullet)) = hit {
            spent[bi] = true;
            monster.take_damage(bullet.damage);
            if monster.is_dead() {
                killed.push(mi);
            }
        }
    }

    let mut spent = spent.into_iter();
    bullets.retain(|_| !spent.next().unwrap_or(false));
    killed
}

/// Items the player is standing on, by index
pub fn items_in_reach(player: &Player, items: &[Item]) -> Vec<usize> {
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| player.pos.distance(item.pos) <= player.radius + item.size / 2.0)
        .map(|(i, _)| i)
        .collect()
}

/// Full combat phase for one step
pub fn resolve_combat(state: &mut GameState, dt: f32) {
    let contact = contact_damage(&state.player, &state.monsters, &state.config.combat, dt);
    state.player.take_damage(contact);

    cull_offscreen_bullets(&mut state.bullets, &state.config.window);

    let killed = resolve_bullet_hits(&mut state.monsters, &mut state.bullets);
    for &index in &killed {
        let (kind, xp, pos) = {
            let monster = &state.monsters[index];
            (monster.kind, monster.xp_reward, monster.pos)
        };
        state.events.push(GameEvent::MonsterKilled { kind, xp });
        log::debug!("{:?} monster killed, +{} xp", kind, xp);

        award_xp(state, xp);
        maybe_drop_item(state, pos);
    }
    if !killed.is_empty() {
        state.monsters.retain(|m| !m.is_dead());
    }

    collect_items(state);
}

fn award_xp(state: &mut GameState, xp: f32) {
    let before = state.player.level;
    let gained = gain_xp(&mut state.player, xp, &state.config.progression);
    for level in (before + 1)..=(before + gained) {
        state.events.push(GameEvent::LevelUp { level });
        log::info!("Level up! Now level {}", level);
    }
}

fn maybe_drop_item(state: &mut GameState, pos: Vec2) {
    let items = state.config.items;
    if state.items.len() >= items.max_items || items.drop_chance <= 0.0 {
        return;
    }
    if state.rng.random::<f32>() < items.drop_chance {
        state.items.push(Item {
            pos,
            size: items.size,
            heal: items.heal_amount,
        });
    }
}

fn collect_items(state: &mut GameState) {
    let reached = items_in_reach(&state.player, &state.items);
    if reached.is_empty() {
        return;
    }

    let mut taken = vec![false; state.items.len()];
    for &index in &reached {
        let heal = state.items[index].heal;
        state.player.heal(heal);
        state.events.push(GameEvent::ItemPickedUp { heal });
        log::debug!("Picked up item, healed {}", heal);
        taken[index] = true;
    }

    let mut taken = taken.into_iter();
    state.items.retain(|_| !taken.next().unwrap_or(false));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::sim::state::MonsterKind;

    fn add_monster(state: &mut GameState, pos: Vec2) {
        let id = state.next_entity_id();
        let monster = Monster::normal(id, pos, state.config());
        state.monsters.push(monster);
    }

    fn bullet_at(pos: Vec2, damage: f32) -> Bullet {
        Bullet {
            pos,
            vel: Vec2::ZERO,
            radius: 4.0,
            damage,
        }
    }

    #[test]
    fn test_contact_damage_sums_touching_monsters() {
        let config = SimConfig::default();
        let player = Player::new(Vec2::new(500.0, 500.0), &config.player, &config.progression);
        let monsters = vec![
            Monster::normal(1, Vec2::new(520.0, 500.0), &config),
            Monster::normal(2, Vec2::new(500.0, 480.0), &config),
            Monster::normal(3, Vec2::new(900.0, 900.0), &config),
        ];

        let damage = contact_damage(&player, &monsters, &config.combat, 0.5);
        assert!((damage - 2.0 * config.combat.contact_damage_per_second * 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_contact_damage_at_exact_reach() {
        let config = SimConfig::default();
        let player = Player::new(Vec2::new(500.0, 500.0), &config.player, &config.progression);
        let reach = config.player.radius + config.monster.radius + config.combat.contact_padding;
        let touching = [Monster::normal(1, Vec2::new(500.0 + reach, 500.0), &config)];
        let apart = [Monster::normal(2, Vec2::new(500.0 + reach + 0.01, 500.0), &config)];

        let damage = contact_damage(&player, &touching, &config.combat, 1.0);
        assert_eq!(damage, config.combat.contact_damage_per_second);
        assert_eq!(contact_damage(&player, &apart, &config.combat, 1.0), 0.0);
    }

    #[test]
    fn test_pickup_removes_only_reached_items() {
        let mut state = GameState::new(SimConfig::default(), 1);
        state.player.take_damage(60.0);
        let here = state.player.pos;
        let heal = state.config().items.heal_amount;
        let size = state.config().items.size;
        for pos in [here, here + Vec2::new(300.0, 0.0), here + Vec2::new(2.0, 0.0)] {
            state.items.push(Item { pos, size, heal });
        }

        collect_items(&mut state);
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.items[0].pos, here + Vec2::new(300.0, 0.0));
        assert_eq!(state.player.health, 40.0 + 2.0 * heal);
        assert_eq!(
            state
                .events
                .iter()
                .filter(|e| matches!(e, GameEvent::ItemPickedUp { .. }))
                .count(),
            2
        );
    }

    #[test]
    fn test_contact_damage_floors_health_once() {
        let mut state = GameState::new(SimConfig::default(), 1);
        let pos = state.player.pos;
        for i in 0..5 {
            add_monster(&mut state, pos + Vec2::new(i as f32, 0.0));
        }
        resolve_combat(&mut state, 10.0);
        assert_eq!(state.player.health, 0.0);
    }

    #[test]
    fn test_offscreen_bullets_are_culled() {
        let window = WindowConfig::default();
        let mut bullets = vec![
            bullet_at(Vec2::new(100.0, 100.0), 1.0),
            bullet_at(Vec2::new(-10.0, 100.0), 1.0),
            bullet_at(Vec2::new(-3.0, 100.0), 1.0),
            bullet_at(Vec2::new(100.0, window.height + 50.0), 1.0),
        ];
        cull_offscreen_bullets(&mut bullets, &window);
        assert_eq!(bullets.len(), 2);
    }

    #[test]
    fn test_one_hit_per_monster_per_step() {
        let config = SimConfig::default();
        let mut monsters = vec![Monster::normal(1, Vec2::new(300.0, 300.0), &config)];
        let mut bullets = vec![
            bullet_at(Vec2::new(300.0, 300.0), 5.0),
            bullet_at(Vec2::new(302.0, 300.0), 5.0),
        ];

        let killed = resolve_bullet_hits(&mut monsters, &mut bullets);
        assert!(killed.is_empty());
        assert_eq!(monsters[0].health, monsters[0].max_health - 5.0);
        assert_eq!(bullets.len(), 1);
        assert_eq!(bullets[0].pos, Vec2::new(302.0, 300.0));
    }

    #[test]
    fn test_bullet_hits_only_one_monster() {
        let config = SimConfig::default();
        let mut monsters = vec![
            Monster::normal(1, Vec2::new(300.0, 300.0), &config),
            Monster::normal(2, Vec2::new(310.0, 300.0), &config),
        ];
        let mut bullets = vec![bullet_at(Vec2::new(305.0, 300.0), 5.0)];

        resolve_bullet_hits(&mut monsters, &mut bullets);
        assert!(bullets.is_empty());
        assert_eq!(monsters[0].health, monsters[0].max_health - 5.0);
        assert_eq!(monsters[1].health, monsters[1].max_health);
    }

    #[test]
    fn test_kill_awards_xp_and_removes_monster() {
        let mut config = SimConfig::default();
        config.items.drop_chance = 0.0;
        let mut state = GameState::new(config, 1);
        let pos = Vec2::new(300.0, 300.0);
        add_monster(&mut state, pos);
        let lethal = state.monsters[0].max_health + 1.0;
        state.bullets.push(bullet_at(pos, lethal));

        resolve_combat(&mut state, 0.016);

        assert!(state.monsters.is_empty());
        assert!(state.bullets.is_empty());
        assert_eq!(state.player.xp, state.config().monster.xp_reward);
        assert!(state.events.contains(&GameEvent::MonsterKilled {
            kind: MonsterKind::Normal,
            xp: state.config().monster.xp_reward,
        }));
    }

    #[test]
    fn test_kill_can_level_up() {
        let mut config = SimConfig::default();
        config.items.drop_chance = 0.0;
        config.monster.xp_reward = 250.0;
        let mut state = GameState::new(config, 1);
        let pos = Vec2::new(300.0, 300.0);
        add_monster(&mut state, pos);
        state.bullets.push(bullet_at(pos, 1000.0));

        resolve_combat(&mut state, 0.016);

        assert_eq!(state.player.level, 3);
        assert!(state.events.contains(&GameEvent::LevelUp { level: 2 }));
        assert!(state.events.contains(&GameEvent::LevelUp { level: 3 }));
    }

    #[test]
    fn test_guaranteed_drop_and_pickup() {
        let mut config = SimConfig::default();
        config.items.drop_chance = 1.0;
        let mut state = GameState::new(config, 1);
        let pos = Vec2::new(300.0, 300.0);
        add_monster(&mut state, pos);
        state.bullets.push(bullet_at(pos, 1000.0));

        resolve_combat(&mut state, 0.016);
        assert_eq!(state.items.len(), 1);

        state.player.take_damage(50.0);
        state.player.pos = pos;
        state.events.clear();
        resolve_combat(&mut state, 0.016);
        assert!(state.items.is_empty());
        assert_eq!(state.player.health, 50.0 + state.config().items.heal_amount);
    }
}
