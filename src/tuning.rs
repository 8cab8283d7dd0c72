//! Data-driven game balance
//!
//! Every gameplay constant the simulation reads lives here so a host can load
//! alternate balance from JSON. Missing fields fall back to the defaults in
//! [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::DroneVariant;

/// Errors from loading or validating a [`Tuning`]
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Per-variant drone stats
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DroneStats {
    /// Movement speed (pixels/s)
    pub speed: f32,
    /// Seconds between shots (0 = never fires)
    pub fire_rate: f32,
}

/// Game balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Arena ===
    pub world_width: f32,
    pub world_height: f32,

    // === Player ===
    pub player_radius: f32,
    pub player_speed: f32,
    pub player_max_health: f32,
    /// Health lost per tick of overlap with a drone
    pub drone_contact_damage: f32,

    // === Drones ===
    pub drone_radius: f32,
    pub chaser: DroneStats,
    pub patroller: DroneStats,
    pub shooter: DroneStats,
    pub patrol_flip_period: f32,

    // === Spawning ===
    pub spawn_interval: f32,
    pub initial_drones: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,

            player_radius: PLAYER_RADIUS,
            player_speed: PLAYER_SPEED,
            player_max_health: PLAYER_MAX_HEALTH,
            drone_contact_damage: DRONE_CONTACT_DAMAGE,

            drone_radius: DRONE_RADIUS,
            chaser: DroneStats {
                speed: CHASER_SPEED,
                fire_rate: 0.0,
            },
            patroller: DroneStats {
                speed: PATROLLER_SPEED,
                fire_rate: PATROLLER_FIRE_RATE,
            },
            shooter: DroneStats {
                speed: SHOOTER_SPEED,
                fire_rate: SHOOTER_FIRE_RATE,
            },
            patrol_flip_period: PATROL_FLIP_PERIOD,

            spawn_interval: SPAWN_INTERVAL,
            initial_drones: INITIAL_DRONES,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from a JSON document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read, parse and validate a tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Serialize to pretty JSON (for dumping the defaults to a file)
    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Stats for a drone variant
    pub fn drone_stats(&self, variant: DroneVariant) -> DroneStats {
        match variant {
            DroneVariant::Chaser => self.chaser,
            DroneVariant::Patroller => self.patroller,
            DroneVariant::Shooter => self.shooter,
        }
    }

    /// Check every value the simulation depends on
    pub fn validate(&self) -> Result<(), TuningError> {
        positive("world_width", self.world_width)?;
        positive("world_height", self.world_height)?;
        positive("player_radius", self.player_radius)?;
        positive("drone_radius", self.drone_radius)?;
        positive("player_max_health", self.player_max_health)?;
        positive("spawn_interval", self.spawn_interval)?;
        positive("patrol_flip_period", self.patrol_flip_period)?;
        non_negative("player_speed", self.player_speed)?;
        non_negative("drone_contact_damage", self.drone_contact_damage)?;
        for (field, stats) in [
            ("chaser", self.chaser),
            ("patroller", self.patroller),
            ("shooter", self.shooter),
        ] {
            non_negative(field, stats.speed)?;
            non_negative(field, stats.fire_rate)?;
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(TuningError::Invalid {
            field,
            reason: "must be a positive finite number",
        })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(TuningError::Invalid {
            field,
            reason: "must be a non-negative finite number",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.drone_stats(DroneVariant::Chaser).fire_rate, 0.0);
        assert_eq!(tuning.drone_stats(DroneVariant::Patroller).speed, 100.0);
        assert_eq!(tuning.drone_stats(DroneVariant::Shooter).fire_rate, 1.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning = Tuning::from_json(r#"{ "initial_drones": 2, "world_width": 1024.0 }"#)
            .expect("valid tuning");
        assert_eq!(tuning.initial_drones, 2);
        assert_eq!(tuning.world_width, 1024.0);
        assert_eq!(tuning.world_height, WORLD_HEIGHT);
        assert_eq!(tuning.player_speed, PLAYER_SPEED);
    }

    #[test]
    fn test_rejects_bad_radius() {
        let err = Tuning::from_json(r#"{ "player_radius": 0.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "player_radius",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Tuning::load("/nonexistent/dodgeball/tuning.json").unwrap_err();
        assert!(matches!(err, TuningError::Io(_)));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("dodgeball_tuning_{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "spawn_interval": 3.0 }"#).expect("write temp file");
        let tuning = Tuning::load(&path);
        let _ = std::fs::remove_file(&path);
        assert_eq!(tuning.expect("valid tuning").spawn_interval, 3.0);
    }

    #[test]
    fn test_json_roundtrip_defaults() {
        let json = Tuning::default().to_json().expect("serializes");
        assert_eq!(Tuning::from_json(&json).expect("parses"), Tuning::default());
    }
}
