//! Data-driven game balance
//!
//! Every gameplay constant the tick pipeline reads lives in [`Tuning`]. Defaults
//! come from [`crate::consts`]; a JSON document can override any subset of them.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::PersistenceError;

/// Runtime-tunable gameplay balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Match ===
    /// Seconds the player must survive to win
    pub win_time_secs: f32,
    /// Score per enemy killed
    pub kill_score: u32,

    // === Player ===
    pub player_width: f32,
    pub player_height: f32,
    /// Damage taken when an enemy makes contact
    pub contact_damage: i32,

    // === Spawning ===
    pub min_spawn_distance: f32,
    pub max_spawn_distance: f32,
    pub spawn_interval_start_ms: u32,
    pub spawn_interval_step_ms: u32,
    pub spawn_interval_floor_ms: u32,

    // === Weapons ===
    pub fire_interval_secs: f32,
    pub max_projectile_range: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            win_time_secs: WIN_TIME_SECS,
            kill_score: KILL_SCORE,

            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            contact_damage: CONTACT_DAMAGE,

            min_spawn_distance: MIN_SPAWN_DISTANCE,
            max_spawn_distance: MAX_SPAWN_DISTANCE,
            spawn_interval_start_ms: SPAWN_INTERVAL_START_MS,
            spawn_interval_step_ms: SPAWN_INTERVAL_STEP_MS,
            spawn_interval_floor_ms: SPAWN_INTERVAL_FLOOR_MS,

            fire_interval_secs: FIRE_INTERVAL_SECS,
            max_projectile_range: MAX_PROJECTILE_RANGE,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) tuning document; missing keys keep their defaults
    pub fn from_json(json: &str) -> Result<Self, PersistenceError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        Ok(tuning.sanitized())
    }

    /// Repair values that would break the spawn ramp or the spawn ring
    pub fn sanitized(mut self) -> Self {
        if self.spawn_interval_floor_ms > self.spawn_interval_start_ms {
            log::warn!(
                "spawn floor {}ms above start {}ms, clamping",
                self.spawn_interval_floor_ms,
                self.spawn_interval_start_ms
            );
            self.spawn_interval_floor_ms = self.spawn_interval_start_ms;
        }
        if self.max_spawn_distance < self.min_spawn_distance {
            std::mem::swap(&mut self.min_spawn_distance, &mut self.max_spawn_distance);
        }
        self
    }

    /// Next spawn interval after one spawn (never below the floor, never increasing)
    pub fn next_spawn_interval(&self, current_ms: u32) -> u32 {
        if current_ms <= self.spawn_interval_floor_ms {
            return current_ms;
        }
        current_ms
            .saturating_sub(self.spawn_interval_step_ms)
            .max(self.spawn_interval_floor_ms)
    }
}
