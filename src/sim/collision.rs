//! Collision detection and response
//!
//! Enemies and the player collide as boxes; projectiles are points tested for
//! containment in enemy boxes. All removal goes through `retain` so nothing is
//! mutated while it is being iterated.

use glam::Vec2;

use super::geom::Rect;
use super::state::{Enemy, GameEvent, Player, Projectile};

/// Whether an enemy's box overlaps the player's box
#[inline]
pub fn enemy_touches_player(enemy: &Enemy, player: &Player) -> bool {
    enemy.bounds().overlaps(&player.bounds())
}

/// Apply projectile hits to enemies.
///
/// Each projectile inside an enemy's box deals its power and is consumed. Once
/// an enemy's health drops to zero it is removed and consumes no further
/// projectiles. Returns the number of enemies killed.
pub fn resolve_projectile_hits(
    enemies: &mut Vec<Enemy>,
    projectiles: &mut Vec<Projectile>,
    events: &mut Vec<GameEvent>,
) -> u32 {
    let mut kills = 0;

    enemies.retain_mut(|enemy| {
        let bounds = enemy.bounds();
        projectiles.retain(|projectile| {
            if !enemy.is_alive() || !bounds.contains_point(projectile.pos) {
                return true;
            }
            enemy.take_damage(projectile.power);
            events.push(GameEvent::EnemyHit {
                enemy_id: enemy.id,
                damage: projectile.power,
            });
            false
        });

        if enemy.is_alive() {
            true
        } else {
            kills += 1;
            events.push(GameEvent::EnemyKilled {
                id: enemy.id,
                kind: enemy.kind,
            });
            false
        }
    });

    kills
}

/// Remove projectiles beyond `max_range` of `anchor` or outside `world`
pub fn cull_projectiles(
    projectiles: &mut Vec<Projectile>,
    anchor: Vec2,
    max_range: f32,
    world: Option<Rect>,
) {
    projectiles.retain(|p| {
        let in_range = p.pos.distance(anchor) <= max_range;
        let in_world = world.is_none_or(|w| w.contains_point(p.pos));
        in_range && in_world
    });
}
