use serde::{Deserialize, Serialize};

use crate::core::math::Vec3;
use crate::domain::object::WorldObject;
use crate::systems::rigid_body::RigidBody;

use super::target::LawTarget;

/// Escape hatch for arbitrary per-object behaviour
pub type CustomForceFn = Box<dyn Fn(&WorldObject, &mut RigidBody, f32)>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LawKind {
    Gravity,
    AirResistance,
    Collision,
    CustomForce,
    GravityField,
    CenterGravity,
}

impl LawKind {
    pub fn default_strength(&self) -> f32 {
        match self {
            LawKind::Gravity => 9.81,
            LawKind::AirResistance => 0.1,
            LawKind::Collision => 0.0,
            LawKind::CustomForce | LawKind::GravityField | LawKind::CenterGravity => 1.0,
        }
    }
}

/// A targetable rule contributing force to matching objects each step.
///
/// JSON fields left out take the same values as `PhysicsLaw::new`: the
/// kind's default strength, enabled, pointing down, targeting every object.
#[derive(Serialize, Deserialize)]
#[serde(from = "LawDocument")]
pub struct PhysicsLaw {
    pub id: u32,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: LawKind,
    pub enabled: bool,
    pub strength: f32,
    pub damping: f32,
    pub direction: Vec3,
    #[serde(skip)]
    pub custom_apply: Option<CustomForceFn>,
    pub target: LawTarget,
}

/// Wire form of a law; strength stays optional until the kind is known
#[derive(Deserialize)]
struct LawDocument {
    #[serde(default)]
    id: u32,
    #[serde(default)]
    name: String,
    #[serde(rename = "type")]
    kind: LawKind,
    #[serde(default = "default_enabled")]
    enabled: bool,
    strength: Option<f32>,
    #[serde(default)]
    damping: f32,
    #[serde(default = "default_direction")]
    direction: Vec3,
    #[serde(default = "LawTarget::all")]
    target: LawTarget,
}

fn default_enabled() -> bool {
    true
}

fn default_direction() -> Vec3 {
    Vec3::DOWN
}

impl From<LawDocument> for PhysicsLaw {
    fn from(doc: LawDocument) -> Self {
        Self {
            id: doc.id,
            name: doc.name,
            kind: doc.kind,
            enabled: doc.enabled,
            strength: doc.strength.unwrap_or_else(|| doc.kind.default_strength()),
            damping: doc.damping,
            direction: doc.direction,
            custom_apply: None,
            target: doc.target,
        }
    }
}

impl PhysicsLaw {
    /// Enabled law targeting every object, with the kind's default strength
    pub fn new(name: impl Into<String>, kind: LawKind) -> Self {
        Self {
            id: 0,
            name: name.into(),
            kind,
            enabled: true,
            strength: kind.default_strength(),
            damping: 0.0,
            direction: Vec3::DOWN,
            custom_apply: None,
            target: LawTarget::all(),
        }
    }

    pub fn with_strength(mut self, strength: f32) -> Self {
        self.strength = strength;
        self
    }

    pub fn with_damping(mut self, damping: f32) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_direction(mut self, direction: Vec3) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_target(mut self, target: LawTarget) -> Self {
        self.target = target;
        self
    }

    pub fn with_custom<F>(mut self, apply: F) -> Self
    where
        F: Fn(&WorldObject, &mut RigidBody, f32) + 'static,
    {
        self.custom_apply = Some(Box::new(apply));
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Normalized direction, straight down when degenerate
    pub fn unit_direction(&self) -> Vec3 {
        self.direction.normalize_or(Vec3::DOWN)
    }
}

impl std::fmt::Debug for PhysicsLaw {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhysicsLaw")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("enabled", &self.enabled)
            .field("strength", &self.strength)
            .field("damping", &self.damping)
            .field("direction", &self.direction)
            .field("custom_apply", &self.custom_apply.is_some())
            .field("target", &self.target)
            .finish()
    }
}
