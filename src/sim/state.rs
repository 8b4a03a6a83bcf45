//! Game state and core simulation types
//!
//! Everything the tick pipeline mutates lives here; the renderer only reads it.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geom::Rect;
use crate::heading_degrees;
use crate::settings::{Settings, ShipClass, WorldMode};
use crate::tuning::Tuning;

/// Current phase of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Frozen by the host; only a pause toggle is processed
    Paused,
    /// Survived until the win time
    Won,
    /// Player health reached zero
    Lost,
}

impl GamePhase {
    /// Won or Lost
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::Won | GamePhase::Lost)
    }
}

/// Things that happened during a tick (for audio/FX, drained by the host)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    EnemySpawned { id: u32, kind: EnemyKind },
    /// An enemy touched the player and was consumed
    PlayerHit { enemy_id: u32, damage: i32 },
    EnemyHit { enemy_id: u32, damage: i32 },
    EnemyKilled { id: u32, kind: EnemyKind },
    ProjectileFired { id: u32, kind: ProjectileKind },
    Won,
    Lost,
}

/// Enemy variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Normal,
    Fast,
    Strong,
}

/// Projectile variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProjectileKind {
    #[default]
    Basic,
    Fast,
    Powerful,
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// Sprite rotation in degrees, derived from `aim`
    pub rotation: f32,
    /// Last nonzero aim direction (unit length)
    pub aim: Vec2,
    pub health: i32,
    pub max_health: i32,
    /// World units per second
    pub speed: f32,
    pub projectile_kind: ProjectileKind,
    /// Hitbox size
    pub size: Vec2,
}

impl Player {
    pub fn new(class: ShipClass, size: Vec2) -> Self {
        let stats = class.stats();
        Self {
            pos: Vec2::ZERO,
            rotation: heading_degrees(Vec2::X),
            aim: Vec2::X,
            health: stats.max_health,
            max_health: stats.max_health,
            speed: stats.speed,
            projectile_kind: stats.projectile,
            size,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.pos, self.size)
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Apply damage, clamping health at zero
    pub fn take_damage(&mut self, damage: i32) {
        self.health = (self.health - damage.max(0)).clamp(0, self.max_health);
    }

    /// Health as a 0-1 fraction (for the health bar)
    pub fn health_fraction(&self) -> f32 {
        if self.max_health <= 0 {
            return 0.0;
        }
        self.health as f32 / self.max_health as f32
    }

    /// Move along an already-sanitized direction
    pub fn step(&mut self, dir: Vec2, dt: f32) {
        self.pos += dir * self.speed * dt;
    }

    /// Remember a nonzero aim direction; zero keeps the previous one
    pub fn set_aim(&mut self, dir: Vec2) {
        if dir != Vec2::ZERO {
            self.aim = dir;
            self.rotation = heading_degrees(dir);
        }
    }
}

/// A hostile chasing the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub health: i32,
    pub speed: f32,
    /// Hitbox size
    pub size: Vec2,
}

impl Enemy {
    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.pos, self.size)
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn take_damage(&mut self, damage: i32) {
        self.health -= damage;
        log::trace!(
            "{} enemy {} took {} damage, health is now {}",
            self.kind.as_str(),
            self.id,
            damage,
            self.health
        );
    }

    /// Seek toward a target at this enemy's speed
    pub fn move_toward(&mut self, target: Vec2, dt: f32) {
        let dir = (target - self.pos).normalize_or_zero();
        self.pos += dir * self.speed * dt;
    }
}

/// A shot fired by the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub kind: ProjectileKind,
    pub pos: Vec2,
    /// Unit direction, fixed at creation
    pub dir: Vec2,
    pub speed: f32,
    /// Damage dealt on hit
    pub power: i32,
    /// Render radius
    pub radius: f32,
}

impl Projectile {
    pub fn advance(&mut self, dt: f32) {
        self.pos += self.dir * self.speed * dt;
    }
}

/// Complete match state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub world: WorldMode,
    pub phase: GamePhase,
    /// Seconds of unpaused play
    pub elapsed: f64,
    pub score: u32,
    pub enemies_defeated: u32,
    pub player: Player,
    /// Live enemies (spawn order)
    pub enemies: Vec<Enemy>,
    /// Live projectiles (spawn order)
    pub projectiles: Vec<Projectile>,
    /// Seconds since the last enemy spawn
    pub spawn_timer: f32,
    /// Current spawn interval (difficulty ramp)
    pub spawn_interval_ms: u32,
    /// Seconds since the last shot
    pub shot_timer: f32,
    /// Events raised since the last `take_events`
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// New match with default settings and tuning
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, &Settings::default(), Tuning::default())
    }

    pub fn with_config(seed: u64, settings: &Settings, tuning: Tuning) -> Self {
        let tuning = tuning.sanitized();
        let player = Player::new(
            settings.ship,
            Vec2::new(tuning.player_width, tuning.player_height),
        );
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            spawn_interval_ms: tuning.spawn_interval_start_ms,
            // First shot goes out as soon as the player aims
            shot_timer: tuning.fire_interval_secs,
            tuning,
            world: settings.world.sanitized(),
            phase: GamePhase::Playing,
            elapsed: 0.0,
            score: 0,
            enemies_defeated: 0,
            player,
            enemies: Vec::new(),
            projectiles: Vec::new(),
            spawn_timer: 0.0,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Place an enemy directly (host scripting, tests)
    pub fn add_enemy(&mut self, kind: EnemyKind, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.enemies.push(Enemy::spawn(id, kind, pos));
        self.events.push(GameEvent::EnemySpawned { id, kind });
        id
    }

    /// Fire a projectile of the player's kind along the current aim
    pub fn fire_projectile(&mut self) -> u32 {
        let id = self.next_entity_id();
        let kind = self.player.projectile_kind;
        self.projectiles
            .push(Projectile::spawn(id, kind, self.player.pos, self.player.aim));
        self.events.push(GameEvent::ProjectileFired { id, kind });
        id
    }

    pub fn is_ended(&self) -> bool {
        self.phase.is_terminal()
    }

    pub fn is_won(&self) -> bool {
        self.phase == GamePhase::Won
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    pub fn elapsed_millis(&self) -> u64 {
        (self.elapsed * 1000.0).round() as u64
    }

    /// Drain events raised since the previous call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
