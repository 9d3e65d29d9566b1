// World-init parameters.
// Loaded once at startup (JSON, every field optional) and treated as
// immutable for the rest of the session.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

// ============================================================================
// SECTIONS
// ============================================================================

/// Coherent-noise terrain parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    pub seed: u32,
    /// Noise input divisor. Larger values give wider, gentler hills.
    pub scale: f32,
    /// Noise output multiplier. Heights stay within [-amplitude, amplitude].
    pub amplitude: f32,
    /// Number of fractal octaves summed per sample (1 = plain value noise).
    pub octaves: u32,
    /// Amplitude falloff between successive octaves.
    pub persistence: f32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            seed: 1337,
            scale: 12.0,
            amplitude: 1.5,
            octaves: 3,
            persistence: 0.5,
        }
    }
}

/// Map extent and placement policy for scenery and agents.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// The playable square runs from -half_extent to +half_extent on X and Z.
    pub half_extent: f32,
    pub tree_count: usize,
    pub agent_count: usize,
    /// Nothing is placed closer than this to the avatar spawn point.
    pub spawn_clearing: f32,
    pub placement_seed: u64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            half_extent: 25.0,
            tree_count: 24,
            agent_count: 8,
            spawn_clearing: 6.0,
            placement_seed: 7,
        }
    }
}

/// Player locomotion and melee parameters. Speeds are per tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AvatarConfig {
    pub max_health: u32,
    pub move_speed: f32,
    pub rotate_speed: f32,
    pub attack_range: f32,
    /// Full opening angle of the attack cone in degrees.
    pub attack_angle_deg: f32,
    pub attack_damage: u32,
    /// Seconds between accepted attack requests.
    pub attack_cooldown: f32,
    /// Seconds the avatar is flagged as attacking after a strike.
    pub attack_action_duration: f32,
    /// Seconds the damage flash stays visible after an agent hit.
    pub damage_flash_duration: f32,
}

impl Default for AvatarConfig {
    fn default() -> Self {
        Self {
            max_health: 100,
            move_speed: 0.1,
            rotate_speed: 0.05,
            attack_range: 3.0,
            attack_angle_deg: 60.0,
            attack_damage: 25,
            attack_cooldown: 0.5,
            attack_action_duration: 0.2,
            damage_flash_duration: 0.15,
        }
    }
}

impl AvatarConfig {
    pub fn attack_angle_rad(&self) -> f32 {
        self.attack_angle_deg.to_radians()
    }
}

/// Hostile agent parameters. Speed is per tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub max_health: u32,
    pub speed: f32,
    pub detection_radius: f32,
    pub attack_radius: f32,
    pub attack_damage: u32,
    /// Seconds between an agent's own attacks.
    pub attack_cooldown: f32,
    /// Seconds the hit flinch stays visible.
    pub flinch_duration: f32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_health: 30,
            speed: 0.04,
            detection_radius: 10.0,
            attack_radius: 1.5,
            attack_damage: 10,
            attack_cooldown: 1.0,
            flinch_duration: 0.2,
        }
    }
}

// ============================================================================
// ROOT
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub terrain: TerrainConfig,
    pub map: MapConfig,
    pub avatar: AvatarConfig,
    pub agent: AgentConfig,
}

impl GameConfig {
    /// Read a JSON config file. Missing fields fall back to their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would feed NaN or degenerate geometry into the
    /// distance and angle math.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.terrain;
        positive("terrain.scale", t.scale)?;
        non_negative("terrain.amplitude", t.amplitude)?;
        non_negative("terrain.persistence", t.persistence)?;
        if t.octaves == 0 {
            return Err(ConfigError::ZeroCount { field: "terrain.octaves" });
        }

        let m = &self.map;
        positive("map.half_extent", m.half_extent)?;
        non_negative("map.spawn_clearing", m.spawn_clearing)?;

        let a = &self.avatar;
        if a.max_health == 0 {
            return Err(ConfigError::ZeroCount { field: "avatar.max_health" });
        }
        non_negative("avatar.move_speed", a.move_speed)?;
        non_negative("avatar.rotate_speed", a.rotate_speed)?;
        positive("avatar.attack_range", a.attack_range)?;
        positive("avatar.attack_angle_deg", a.attack_angle_deg)?;
        non_negative("avatar.attack_cooldown", a.attack_cooldown)?;
        non_negative("avatar.attack_action_duration", a.attack_action_duration)?;
        non_negative("avatar.damage_flash_duration", a.damage_flash_duration)?;

        let g = &self.agent;
        if g.max_health == 0 {
            return Err(ConfigError::ZeroCount { field: "agent.max_health" });
        }
        non_negative("agent.speed", g.speed)?;
        positive("agent.detection_radius", g.detection_radius)?;
        non_negative("agent.attack_radius", g.attack_radius)?;
        non_negative("agent.attack_cooldown", g.attack_cooldown)?;
        non_negative("agent.flinch_duration", g.flinch_duration)?;

        Ok(())
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { field, value })
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn defaults_are_valid() {
        GameConfig::default().validate().expect("default config should validate");
    }

    #[rstest]
    fn partial_json_keeps_defaults() {
        let config = GameConfig::from_json(r#"{ "agent": { "speed": 0.08 } }"#)
            .expect("partial config should parse");
        assert_eq!(config.agent.speed, 0.08);
        assert_eq!(config.agent.max_health, 30);
        assert_eq!(config.avatar.attack_damage, 25);
    }

    #[rstest]
    #[case::nan_scale(f32::NAN)]
    #[case::zero_scale(0.0)]
    #[case::negative_scale(-4.0)]
    fn bad_terrain_scale_is_rejected(#[case] scale: f32) {
        let mut config = GameConfig::default();
        config.terrain.scale = scale;
        assert!(config.validate().is_err());
    }

    #[rstest]
    fn infinite_radius_is_rejected() {
        let mut config = GameConfig::default();
        config.agent.detection_radius = f32::INFINITY;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFinite { field: "agent.detection_radius", .. })
        ));
    }

    #[rstest]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            GameConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
