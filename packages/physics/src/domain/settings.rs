//! Global tunables.
//!
//! Loadable from JSON the same way content bundles are; every field is
//! optional in the document and falls back to the defaults below.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsSettings {
    /// Legacy constant downward acceleration (used when no laws exist)
    pub gravity_accel: f32,
    /// Legacy linear drag coefficient
    pub air_drag: f32,
    /// Height of the ground plane
    pub ground_y: f32,
    pub physics_enabled: bool,
    /// `G` for the pairwise gravity field
    pub gravity_constant: f32,
    /// `ε` softening for the gravity field
    pub softening: f32,
    /// Mass given to bodies created without a `mass` attribute
    pub default_mass: f32,
    /// Largest sub-step the driver will integrate at once (seconds)
    pub max_substep: f32,
    /// Emit gravity / collision relation records
    pub record_relations: bool,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            gravity_accel: 9.81,
            air_drag: 0.1,
            ground_y: 0.0,
            physics_enabled: true,
            gravity_constant: 1.0,
            softening: 0.1,
            default_mass: 1.0,
            max_substep: 0.02,
            record_relations: false,
        }
    }
}

impl PhysicsSettings {
    pub fn from_json(json: &str) -> Result<Self, String> {
        let settings: PhysicsSettings = serde_json::from_str(json).map_err(|e| e.to_string())?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn validate(&self) -> Result<(), String> {
        let finite = [
            ("gravity_accel", self.gravity_accel),
            ("air_drag", self.air_drag),
            ("ground_y", self.ground_y),
            ("gravity_constant", self.gravity_constant),
            ("softening", self.softening),
        ];
        for (name, v) in finite {
            if !v.is_finite() {
                return Err(format!("{} must be finite, got {}", name, v));
            }
        }
        if !(self.default_mass.is_finite() && self.default_mass > 0.0) {
            return Err(format!("default_mass must be positive, got {}", self.default_mass));
        }
        if !(self.max_substep.is_finite() && self.max_substep > 0.0) {
            return Err(format!("max_substep must be positive, got {}", self.max_substep));
        }
        if self.softening < 0.0 {
            return Err(format!("softening must not be negative, got {}", self.softening));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let s = PhysicsSettings::from_json(r#"{ "gravity_accel": 3.7, "record_relations": true }"#);
        let s = s.unwrap_or_default();
        assert_eq!(s.gravity_accel, 3.7);
        assert!(s.record_relations);
        assert_eq!(s.max_substep, 0.02);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(PhysicsSettings::from_json(r#"{ "default_mass": 0 }"#).is_err());
        assert!(PhysicsSettings::from_json(r#"{ "max_substep": -1 }"#).is_err());
        assert!(PhysicsSettings::from_json(r#"{ "softening": -0.5 }"#).is_err());
        assert!(PhysicsSettings::from_json("not json").is_err());
    }
}
