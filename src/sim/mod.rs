//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Time only advances through `tick(dt)`
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, storage or platform dependencies

pub mod collision;
pub mod factory;
pub mod geom;
pub mod state;
pub mod tick;

pub use collision::{cull_projectiles, enemy_touches_player, resolve_projectile_hits};
pub use factory::{EnemyStats, ProjectileStats};
pub use geom::Rect;
pub use state::{
    Enemy, EnemyKind, GameEvent, GamePhase, GameState, Player, Projectile, ProjectileKind,
};
pub use tick::{TickInput, spawn_enemy, tick};
