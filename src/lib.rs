//! Simple Survivor - top-down survival shooter core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, factories, collisions, tick pipeline)
//! - `session`: Frame driving, pause, match results
//! - `highscores`: Top-10 leaderboard
//! - `persistence`: Versioned JSON envelope, file/LocalStorage backends
//! - `tuning`: Data-driven game balance
//! - `settings`: Ship class and world mode
//! - `platform`: Browser/native logging setup

pub mod error;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::PersistenceError;
pub use highscores::HighScores;
pub use session::{MatchSummary, Session};
pub use settings::{Settings, ShipClass, WorldMode};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Survive this long (seconds) to win
    pub const WIN_TIME_SECS: f32 = 120.0;

    /// Largest frame delta the session will feed into one tick
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Player hitbox (world units)
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;

    /// Damage dealt to the player when an enemy touches it
    pub const CONTACT_DAMAGE: i32 = 20;
    /// Score awarded per enemy killed
    pub const KILL_SCORE: u32 = 100;

    /// Enemy spawn ring around the player
    pub const MIN_SPAWN_DISTANCE: f32 = 500.0;
    pub const MAX_SPAWN_DISTANCE: f32 = 1000.0;

    /// Difficulty ramp: spawn interval starts here and shrinks by a step per spawn
    pub const SPAWN_INTERVAL_START_MS: u32 = 5000;
    pub const SPAWN_INTERVAL_STEP_MS: u32 = 100;
    pub const SPAWN_INTERVAL_FLOOR_MS: u32 = 1000;

    /// Auto-fire cadence (seconds)
    pub const FIRE_INTERVAL_SECS: f32 = 0.5;
    /// Projectiles farther than this from the player are culled
    pub const MAX_PROJECTILE_RANGE: f32 = 1000.0;
}

/// Clean up a host-supplied direction.
///
/// Non-finite vectors become zero; anything else is normalized (or zero if degenerate).
#[inline]
pub fn sanitize_direction(dir: Vec2) -> Vec2 {
    if !dir.is_finite() {
        return Vec2::ZERO;
    }
    dir.normalize_or_zero()
}

/// Sprite heading in degrees for a facing direction (0 = pointing up)
#[inline]
pub fn heading_degrees(dir: Vec2) -> f32 {
    dir.y.atan2(dir.x).to_degrees() - 90.0
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
