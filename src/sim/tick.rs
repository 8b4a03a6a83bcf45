//! Per-frame simulation tick
//!
//! Core game loop that advances the match by one host frame. The stage order
//! below is part of the contract: later stages observe earlier ones.

use glam::Vec2;
use rand::Rng;

use super::collision::{cull_projectiles, enemy_touches_player, resolve_projectile_hits};
use super::state::{EnemyKind, GameEvent, GamePhase, GameState};
use crate::{polar_to_cartesian, sanitize_direction};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Movement stick (unit or zero; anything else is sanitized)
    pub move_dir: Vec2,
    /// Aim stick (zero keeps the previous aim)
    pub aim_dir: Vec2,
    /// Aim stick held: gates auto-fire
    pub aiming: bool,
    /// Pause toggle
    pub pause: bool,
}

/// Advance the game state by `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                log::info!("Paused at {}ms", state.elapsed_millis());
                return;
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Playing;
                log::info!("Resumed");
            }
            _ => {}
        }
    }

    // Don't tick if paused or finished
    if state.phase != GamePhase::Playing {
        return;
    }

    if !dt.is_finite() || dt <= 0.0 {
        log::warn!("Ignoring tick with invalid dt {}", dt);
        return;
    }

    // 1. Win check
    state.elapsed += f64::from(dt);
    if state.elapsed >= f64::from(state.tuning.win_time_secs) {
        state.phase = GamePhase::Won;
        state.events.push(GameEvent::Won);
        log::info!(
            "Match won: score {}, {} enemies defeated",
            state.score,
            state.enemies_defeated
        );
        return;
    }

    // 2. Player movement
    let move_dir = sanitize_direction(input.move_dir);
    state.player.step(move_dir, dt);
    if let Some(world) = state.world.bounds() {
        state.player.pos = world.clamp_point(state.player.pos);
    }

    // 3. Aim
    state.player.set_aim(sanitize_direction(input.aim_dir));

    // 4. Enemy spawn + difficulty ramp
    state.spawn_timer += dt;
    if state.spawn_timer * 1000.0 >= state.spawn_interval_ms as f32 {
        spawn_enemy(state);
        state.spawn_timer = 0.0;
        state.spawn_interval_ms = state.tuning.next_spawn_interval(state.spawn_interval_ms);
    }

    // 5. Enemy movement + player contact
    if resolve_enemy_contacts(state, dt) {
        return;
    }

    // 6. Projectile hits
    let kills = resolve_projectile_hits(
        &mut state.enemies,
        &mut state.projectiles,
        &mut state.events,
    );
    if kills > 0 {
        state.enemies_defeated += kills;
        state.score += kills * state.tuning.kill_score;
    }

    // 7. Auto-fire
    state.shot_timer += dt;
    if input.aiming && state.shot_timer >= state.tuning.fire_interval_secs {
        state.fire_projectile();
        state.shot_timer = 0.0;
    }

    // 8. Projectile movement + culling
    for projectile in &mut state.projectiles {
        projectile.advance(dt);
    }
    cull_projectiles(
        &mut state.projectiles,
        state.player.pos,
        state.tuning.max_projectile_range,
        state.world.bounds(),
    );
}

/// Move every enemy toward the player and consume those that touch it.
///
/// Returns true if the player died, in which case the rest of the tick is skipped
/// and enemies after the fatal one are left untouched.
fn resolve_enemy_contacts(state: &mut GameState, dt: f32) -> bool {
    let target = state.player.pos;
    let damage = state.tuning.contact_damage;
    let mut i = 0;

    while i < state.enemies.len() {
        state.enemies[i].move_toward(target, dt);

        if !enemy_touches_player(&state.enemies[i], &state.player) {
            i += 1;
            continue;
        }

        let enemy = state.enemies.remove(i);
        state.player.take_damage(damage);
        state.events.push(GameEvent::PlayerHit {
            enemy_id: enemy.id,
            damage,
        });
        log::debug!(
            "{} enemy {} hit the player, health {}/{}",
            enemy.kind.as_str(),
            enemy.id,
            state.player.health,
            state.player.max_health
        );

        if !state.player.is_alive() {
            state.phase = GamePhase::Lost;
            state.events.push(GameEvent::Lost);
            log::info!(
                "Match lost at {}ms: score {}, {} enemies defeated",
                state.elapsed_millis(),
                state.score,
                state.enemies_defeated
            );
            return true;
        }
    }

    false
}

/// Spawn one random enemy on the ring around the player
pub fn spawn_enemy(state: &mut GameState) {
    let angle = state.rng.random_range(0.0..std::f32::consts::TAU);
    let distance = state
        .rng
        .random_range(state.tuning.min_spawn_distance..=state.tuning.max_spawn_distance);
    let kind = EnemyKind::ALL[state.rng.random_range(0..EnemyKind::ALL.len())];

    let mut pos = state.player.pos + polar_to_cartesian(distance, angle);
    if let Some(world) = state.world.bounds() {
        pos = world.clamp_point(pos);
    }

    let id = state.add_enemy(kind, pos);
    log::debug!(
        "Spawned {} enemy {} at ({:.0}, {:.0}), next interval {}ms",
        kind.as_str(),
        id,
        pos.x,
        pos.y,
        state.tuning.next_spawn_interval(state.spawn_interval_ms)
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{Settings, ShipClass, WorldMode};
    use crate::tuning::Tuning;

    /// Tuning with spawning pushed far out so scenarios control every enemy
    fn quiet_tuning() -> Tuning {
        Tuning {
            spawn_interval_start_ms: 1_000_000,
            spawn_interval_floor_ms: 1_000_000,
            ..Default::default()
        }
    }

    fn quiet_state() -> GameState {
        GameState::with_config(7, &Settings::default(), quiet_tuning())
    }

    #[test]
    fn test_normal_enemy_reaches_idle_player() {
        let mut state = quiet_state();
        state.add_enemy(EnemyKind::Normal, Vec2::new(500.0, 0.0));

        let input = TickInput::default();
        for _ in 0..600 {
            tick(&mut state, &input, 1.0 / 60.0);
        }

        assert_eq!(state.player.health, 80);
        assert!(state.enemies.is_empty());
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(
            state
                .take_events()
                .iter()
                .any(|e| matches!(e, GameEvent::PlayerHit { damage: 20, .. }))
        );
    }

    #[test]
    fn test_basic_shots_kill_strong_enemy_in_eight_hits() {
        let mut state = quiet_state();
        let id = state.add_enemy(EnemyKind::Strong, Vec2::new(200.0, 0.0));
        state.enemies[0].speed = 0.0;

        let input = TickInput {
            aim_dir: Vec2::X,
            aiming: true,
            ..Default::default()
        };

        let mut hits = 0;
        for _ in 0..400 {
            tick(&mut state, &input, 0.05);
            for event in state.take_events() {
                if let GameEvent::EnemyHit { enemy_id, damage } = event {
                    assert_eq!(enemy_id, id);
                    assert_eq!(damage, 25);
                    hits += 1;
                }
            }
            if state.enemies.is_empty() {
                break;
            }
        }

        assert_eq!(hits, 8);
        assert!(state.enemies.is_empty());
        assert_eq!(state.score, 100);
        assert_eq!(state.enemies_defeated, 1);
    }

    #[test]
    fn test_win_at_exact_time_then_frozen() {
        let mut state = quiet_state();
        state.add_enemy(EnemyKind::Strong, Vec2::new(5000.0, 0.0));
        state.enemies[0].speed = 0.0;

        let input = TickInput {
            move_dir: Vec2::Y,
            ..Default::default()
        };
        for _ in 0..239 {
            tick(&mut state, &input, 0.5);
        }
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.elapsed_millis(), 119_500);

        tick(&mut state, &input, 0.5);
        assert_eq!(state.elapsed_millis(), 120_000);
        assert!(state.is_ended());
        assert!(state.is_won());

        let player_pos = state.player.pos;
        let enemy_count = state.enemies.len();
        for _ in 0..10 {
            tick(&mut state, &input, 0.5);
        }
        assert_eq!(state.player.pos, player_pos);
        assert_eq!(state.enemies.len(), enemy_count);
        assert_eq!(state.elapsed_millis(), 120_000);
    }

    #[test]
    fn test_loss_stops_the_tick() {
        let mut state = quiet_state();
        state.player.health = 20;
        // Two enemies already overlapping the player: the first one kills it
        state.add_enemy(EnemyKind::Normal, Vec2::new(10.0, 0.0));
        state.add_enemy(EnemyKind::Fast, Vec2::new(-10.0, 0.0));

        tick(&mut state, &TickInput::default(), 0.01);

        assert_eq!(state.phase, GamePhase::Lost);
        assert_eq!(state.player.health, 0);
        assert!(!state.is_won());
        assert_eq!(state.enemies.len(), 1);
        // Second enemy was not processed this tick
        assert_eq!(state.enemies[0].pos, Vec2::new(-10.0, 0.0));

        tick(&mut state, &TickInput::default(), 0.01);
        assert_eq!(state.enemies.len(), 1);
    }

    #[test]
    fn test_contact_resolves_before_projectile_hits() {
        let mut state = quiet_state();
        // Enemy overlapping the player with a projectile inside it
        let id = state.add_enemy(EnemyKind::Fast, Vec2::new(30.0, 0.0));
        state.fire_projectile();
        state.projectiles[0].pos = Vec2::new(30.0, 0.0);

        tick(&mut state, &TickInput::default(), 0.001);

        assert_eq!(state.player.health, 80);
        assert_eq!(state.enemies_defeated, 0);
        assert_eq!(state.score, 0);
        let events = state.take_events();
        assert!(events.contains(&GameEvent::PlayerHit {
            enemy_id: id,
            damage: 20
        }));
        assert!(
            !events
                .iter()
                .any(|e| matches!(e, GameEvent::EnemyHit { .. }))
        );
    }

    #[test]
    fn test_pause_freezes_everything() {
        let mut state = quiet_state();
        state.add_enemy(EnemyKind::Normal, Vec2::new(300.0, 0.0));

        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause, 0.1);
        assert!(state.is_paused());

        let before = state.enemies[0].pos;
        for _ in 0..50 {
            tick(
                &mut state,
                &TickInput {
                    move_dir: Vec2::X,
                    ..Default::default()
                },
                0.1,
            );
        }
        assert_eq!(state.enemies[0].pos, before);
        assert_eq!(state.player.pos, Vec2::ZERO);
        assert_eq!(state.elapsed_millis(), 0);

        tick(&mut state, &pause, 0.1);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.elapsed_millis(), 100);
    }

    #[test]
    fn test_player_moves_with_input_and_ignores_nan() {
        let mut state = quiet_state();
        let input = TickInput {
            move_dir: Vec2::new(0.0, 1.0),
            ..Default::default()
        };
        tick(&mut state, &input, 0.5);
        assert!((state.player.pos - Vec2::new(0.0, 100.0)).length() < 1e-3);

        let bad = TickInput {
            move_dir: Vec2::new(f32::NAN, 1.0),
            aim_dir: Vec2::new(f32::INFINITY, 0.0),
            aiming: false,
            pause: false,
        };
        tick(&mut state, &bad, 0.5);
        assert!((state.player.pos - Vec2::new(0.0, 100.0)).length() < 1e-3);
        assert_eq!(state.player.aim, Vec2::X);
    }

    #[test]
    fn test_invalid_dt_is_ignored() {
        let mut state = quiet_state();
        tick(&mut state, &TickInput::default(), f32::NAN);
        tick(&mut state, &TickInput::default(), -1.0);
        tick(&mut state, &TickInput::default(), 0.0);
        assert_eq!(state.elapsed_millis(), 0);
    }

    #[test]
    fn test_auto_fire_cadence() {
        let mut state = quiet_state();
        let aim = TickInput {
            aim_dir: Vec2::new(0.0, -1.0),
            aiming: true,
            ..Default::default()
        };

        // Fires immediately, then every 0.5s
        tick(&mut state, &aim, 0.125);
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.projectiles[0].dir, Vec2::new(0.0, -1.0));
        for _ in 0..3 {
            tick(&mut state, &aim, 0.125);
        }
        assert_eq!(state.projectiles.len(), 1);
        tick(&mut state, &aim, 0.125);
        assert_eq!(state.projectiles.len(), 2);

        // Not aiming: no shots, but the stored aim survives for the next shot
        let idle = TickInput::default();
        for _ in 0..10 {
            tick(&mut state, &idle, 0.125);
        }
        assert_eq!(state.projectiles.len(), 2);
        assert_eq!(state.player.aim, Vec2::new(0.0, -1.0));
    }

    #[test]
    fn test_projectiles_culled_beyond_range() {
        let mut state = quiet_state();
        let aim = TickInput {
            aim_dir: Vec2::X,
            aiming: true,
            ..Default::default()
        };
        tick(&mut state, &aim, 0.01);
        let id = state.projectiles[0].id;

        // Basic projectile covers 300 units/s: gone after ~3.4s
        let idle = TickInput::default();
        for _ in 0..340 {
            tick(&mut state, &idle, 0.01);
            for p in &state.projectiles {
                assert!(p.pos.distance(state.player.pos) <= 1000.0);
            }
        }
        assert!(state.projectiles.iter().all(|p| p.id != id));
    }

    #[test]
    fn test_spawn_ramp() {
        let mut state = GameState::new(42);
        let input = TickInput::default();

        // First spawn lands after the initial 5s interval
        for _ in 0..49 {
            tick(&mut state, &input, 0.1);
        }
        assert!(state.enemies.is_empty());
        tick(&mut state, &input, 0.1);
        tick(&mut state, &input, 0.001);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.spawn_interval_ms, 4900);

        // Spawn ring is 500-1000; the enemy may already have closed in by one step
        let enemy = &state.enemies[0];
        let distance = enemy.pos.distance(state.player.pos);
        assert!(
            (480.0..=1000.5).contains(&distance),
            "spawned at {distance}"
        );
    }

    #[test]
    fn test_bounded_world_clamps_player() {
        let settings = Settings {
            ship: ShipClass::Fast,
            world: WorldMode::Bounded {
                half_width: 100.0,
                half_height: 100.0,
            },
        };
        let mut state = GameState::with_config(3, &settings, quiet_tuning());
        let input = TickInput {
            move_dir: Vec2::new(1.0, 1.0),
            aim_dir: Vec2::X,
            aiming: true,
            ..Default::default()
        };
        for _ in 0..100 {
            tick(&mut state, &input, 0.1);
        }
        assert_eq!(state.player.pos, Vec2::new(100.0, 100.0));
        // Fast projectiles leave a 200-wide world long before 1000 units
        assert!(state.projectiles.iter().all(|p| p.pos.x <= 100.0));
        assert_eq!(state.player.projectile_kind, crate::sim::ProjectileKind::Fast);
    }

    #[test]
    fn test_spawns_stay_inside_bounded_world() {
        let settings = Settings {
            world: WorldMode::Bounded {
                half_width: 200.0,
                half_height: 150.0,
            },
            ..Default::default()
        };
        let mut state = GameState::with_config(11, &settings, quiet_tuning());
        let world = state.world.bounds().unwrap();
        for _ in 0..50 {
            spawn_enemy(&mut state);
        }
        assert_eq!(state.enemies.len(), 50);
        for enemy in &state.enemies {
            assert!(world.contains_point(enemy.pos), "spawned at {}", enemy.pos);
        }
    }

    #[test]
    fn test_spawn_draws_every_enemy_kind() {
        let mut state = GameState::new(5);
        for _ in 0..200 {
            spawn_enemy(&mut state);
        }
        for kind in EnemyKind::ALL {
            assert!(
                state.enemies.iter().any(|e| e.kind == kind),
                "no {} enemy in 200 spawns",
                kind.as_str()
            );
        }
    }

    #[test]
    fn test_inverted_world_plays_open() {
        let settings = Settings {
            world: WorldMode::Bounded {
                half_width: -100.0,
                half_height: -100.0,
            },
            ..Default::default()
        };
        let mut state = GameState::with_config(3, &settings, quiet_tuning());
        assert_eq!(state.world, WorldMode::Open);

        let input = TickInput {
            aim_dir: Vec2::X,
            aiming: true,
            ..Default::default()
        };
        for _ in 0..3 {
            tick(&mut state, &input, 0.1);
        }
        assert_eq!(state.player.pos, Vec2::ZERO);
        assert_eq!(state.projectiles.len(), 1);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);

        let inputs = [
            TickInput {
                move_dir: Vec2::X,
                ..Default::default()
            },
            TickInput {
                aim_dir: Vec2::Y,
                aiming: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for step in 0..3000 {
            let input = &inputs[step % inputs.len()];
            tick(&mut state1, input, 1.0 / 60.0);
            tick(&mut state2, input, 1.0 / 60.0);
        }

        assert_eq!(state1.phase, state2.phase);
        assert_eq!(state1.enemies.len(), state2.enemies.len());
        assert_eq!(state1.score, state2.score);
        for (a, b) in state1.enemies.iter().zip(&state2.enemies) {
            assert_eq!(a.kind, b.kind);
            assert_eq!(a.pos, b.pos);
        }
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn arb_input() -> impl Strategy<Value = TickInput> {
            (
                -1.5f32..1.5,
                -1.5f32..1.5,
                -1.5f32..1.5,
                -1.5f32..1.5,
                any::<bool>(),
            )
                .prop_map(|(mx, my, ax, ay, aiming)| TickInput {
                    move_dir: Vec2::new(mx, my),
                    aim_dir: Vec2::new(ax, ay),
                    aiming,
                    pause: false,
                })
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(32))]

            #[test]
            fn invariants_hold_every_tick(
                seed in any::<u64>(),
                inputs in prop::collection::vec(arb_input(), 1..400),
                dt in 0.005f32..0.1,
            ) {
                let mut state = GameState::new(seed);
                let mut last_interval = state.spawn_interval_ms;

                for input in &inputs {
                    tick(&mut state, input, dt);

                    let player = &state.player;
                    prop_assert!(player.health >= 0 && player.health <= player.max_health);
                    prop_assert_eq!(player.is_alive(), player.health > 0);
                    prop_assert!(state.enemies.iter().all(|e| e.health > 0));
                    if state.phase == GamePhase::Playing {
                        prop_assert!(state
                            .projectiles
                            .iter()
                            .all(|p| p.pos.distance(player.pos) <= state.tuning.max_projectile_range));
                    }
                    prop_assert!(state.spawn_interval_ms <= last_interval);
                    prop_assert!(state.spawn_interval_ms >= state.tuning.spawn_interval_floor_ms);
                    prop_assert!(state.player.pos.is_finite());
                    last_interval = state.spawn_interval_ms;
                }
            }
        }
    }
}
