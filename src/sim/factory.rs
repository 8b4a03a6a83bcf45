//! Entity factories
//!
//! Variant behaviour is data: each closed kind enum maps to a fixed stat row,
//! and the constructors below build fully initialized entities from a tag.

use glam::Vec2;

use super::state::{Enemy, EnemyKind, Projectile, ProjectileKind};

/// Fixed per-variant enemy stats
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyStats {
    pub health: i32,
    pub speed: f32,
    /// Square hitbox edge length
    pub size: f32,
}

/// Fixed per-variant projectile stats
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileStats {
    pub speed: f32,
    pub power: i32,
    /// Render radius
    pub radius: f32,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 3] = [EnemyKind::Normal, EnemyKind::Fast, EnemyKind::Strong];

    pub fn stats(&self) -> EnemyStats {
        match self {
            EnemyKind::Normal => EnemyStats {
                health: 100,
                speed: 100.0,
                size: 48.0,
            },
            EnemyKind::Fast => EnemyStats {
                health: 50,
                speed: 150.0,
                size: 32.0,
            },
            EnemyKind::Strong => EnemyStats {
                health: 200,
                speed: 80.0,
                size: 64.0,
            },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EnemyKind::Normal => "Normal",
            EnemyKind::Fast => "Fast",
            EnemyKind::Strong => "Strong",
        }
    }
}

impl ProjectileKind {
    pub const ALL: [ProjectileKind; 3] = [
        ProjectileKind::Basic,
        ProjectileKind::Fast,
        ProjectileKind::Powerful,
    ];

    pub fn stats(&self) -> ProjectileStats {
        match self {
            ProjectileKind::Basic => ProjectileStats {
                speed: 300.0,
                power: 25,
                radius: 5.0,
            },
            ProjectileKind::Fast => ProjectileStats {
                speed: 400.0,
                power: 20,
                radius: 4.0,
            },
            ProjectileKind::Powerful => ProjectileStats {
                speed: 250.0,
                power: 50,
                radius: 6.0,
            },
        }
    }
}

impl Enemy {
    /// Build an enemy of the given kind at `pos`
    pub fn spawn(id: u32, kind: EnemyKind, pos: Vec2) -> Self {
        let stats = kind.stats();
        Self {
            id,
            kind,
            pos,
            health: stats.health,
            speed: stats.speed,
            size: Vec2::splat(stats.size),
        }
    }
}

impl Projectile {
    /// Build a projectile of the given kind travelling along `dir`
    ///
    /// `dir` is normalized here; a zero direction yields a projectile that stays put
    /// and is culled by range like any other.
    pub fn spawn(id: u32, kind: ProjectileKind, pos: Vec2, dir: Vec2) -> Self {
        let stats = kind.stats();
        Self {
            id,
            kind,
            pos,
            dir: crate::sanitize_direction(dir),
            speed: stats.speed,
            power: stats.power,
            radius: stats.radius,
        }
    }
}
