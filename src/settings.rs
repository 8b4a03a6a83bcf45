//! Match settings and preferences
//!
//! Persisted separately from the leaderboard.

use serde::{Deserialize, Serialize};

use crate::error::PersistenceError;
use crate::persistence::Slot;
use crate::sim::ProjectileKind;
use crate::sim::geom::Rect;

/// Selectable player ship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ShipClass {
    #[default]
    Standard,
    Fast,
    Strong,
}

/// Fixed stats for a ship class
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShipStats {
    pub speed: f32,
    pub max_health: i32,
    pub projectile: ProjectileKind,
}

impl ShipClass {
    pub const ALL: [ShipClass; 3] = [ShipClass::Standard, ShipClass::Fast, ShipClass::Strong];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShipClass::Standard => "Standard",
            ShipClass::Fast => "Fast",
            ShipClass::Strong => "Strong",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "standard" | "basic" => Some(ShipClass::Standard),
            "fast" => Some(ShipClass::Fast),
            "strong" => Some(ShipClass::Strong),
            _ => None,
        }
    }

    pub fn stats(&self) -> ShipStats {
        match self {
            ShipClass::Standard => ShipStats {
                speed: 200.0,
                max_health: 100,
                projectile: ProjectileKind::Basic,
            },
            ShipClass::Fast => ShipStats {
                speed: 300.0,
                max_health: 80,
                projectile: ProjectileKind::Fast,
            },
            ShipClass::Strong => ShipStats {
                speed: 150.0,
                max_health: 150,
                projectile: ProjectileKind::Powerful,
            },
        }
    }
}

/// Whether the playfield has edges
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum WorldMode {
    /// Unbounded scrolling world
    #[default]
    Open,
    /// Rectangle centred on the origin; the player is clamped inside and
    /// projectiles leaving it are culled
    Bounded { half_width: f32, half_height: f32 },
}

impl WorldMode {
    /// World rectangle, if any
    pub fn bounds(&self) -> Option<Rect> {
        match *self {
            WorldMode::Open => None,
            WorldMode::Bounded {
                half_width,
                half_height,
            } => Some(Rect::new(
                -half_width,
                -half_height,
                half_width * 2.0,
                half_height * 2.0,
            )),
        }
    }

    /// Bounded worlds need positive, finite extents; anything else plays open
    pub fn sanitized(self) -> Self {
        match self {
            WorldMode::Bounded {
                half_width,
                half_height,
            } if !(half_width.is_finite()
                && half_height.is_finite()
                && half_width > 0.0
                && half_height > 0.0) =>
            {
                log::warn!(
                    "Invalid world extents {}x{}, using an open world",
                    half_width,
                    half_height
                );
                WorldMode::Open
            }
            mode => mode,
        }
    }
}

/// Match settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Player ship
    pub ship: ShipClass,
    /// Open or bounded playfield
    pub world: WorldMode,
}

impl Settings {
    /// Storage key
    const STORAGE_KEY: &'static str = "survivor_settings";

    pub fn slot() -> Slot {
        Slot::new(Self::STORAGE_KEY)
    }

    /// Settings with any unplayable values replaced
    pub fn sanitized(self) -> Self {
        Self {
            world: self.world.sanitized(),
            ..self
        }
    }

    /// Load settings, falling back to defaults when missing or unreadable
    pub fn load(slot: &Slot) -> Self {
        match slot.read::<Settings>() {
            Ok(Some(settings)) => {
                log::info!("Loaded settings from {}", slot.key());
                settings.sanitized()
            }
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(err) => {
                log::warn!("Settings unreadable ({}), using defaults", err);
                Self::default()
            }
        }
    }

    pub fn save(&self, slot: &Slot) -> Result<(), PersistenceError> {
        slot.write(self)?;
        log::info!("Settings saved");
        Ok(())
    }
}
