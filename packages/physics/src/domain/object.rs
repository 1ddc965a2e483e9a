//! World objects as seen by the physics core.
//!
//! The scene owns these; the physics world only reads their descriptive
//! fields and writes the position channel of the transform.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::core::math::{Quat, Vec3};

use super::handle::ObjectHandle;

/// Attribute key holding a string-encoded mass override
pub const MASS_ATTRIBUTE: &str = "mass";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GeometryType {
    Cube,
    Sphere,
    Cylinder,
    Cone,
    Plane,
    Torus,
    Capsule,
    Custom,
}

impl GeometryType {
    pub const ALL: [GeometryType; 8] = [
        GeometryType::Cube,
        GeometryType::Sphere,
        GeometryType::Cylinder,
        GeometryType::Cone,
        GeometryType::Plane,
        GeometryType::Torus,
        GeometryType::Capsule,
        GeometryType::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GeometryType::Cube => "Cube",
            GeometryType::Sphere => "Sphere",
            GeometryType::Cylinder => "Cylinder",
            GeometryType::Cone => "Cone",
            GeometryType::Plane => "Plane",
            GeometryType::Torus => "Torus",
            GeometryType::Capsule => "Capsule",
            GeometryType::Custom => "Custom",
        }
    }

    pub fn parse(s: &str) -> Option<GeometryType> {
        Self::ALL.iter().copied().find(|g| g.as_str().eq_ignore_ascii_case(s))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    pub fn from_position(position: Vec3) -> Self {
        Self { position, ..Self::default() }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self { position: Vec3::ZERO, rotation: Quat::IDENTITY, scale: Vec3::ONE }
    }
}

/// A positioned scene object
#[derive(Clone, Debug)]
pub struct WorldObject {
    pub handle: ObjectHandle,
    /// Persistent identifier (survives save/load, unlike the handle)
    pub identifier: String,
    pub transform: Transform,
    pub geometry: GeometryType,
    pub object_type: String,
    pub attributes: HashMap<String, String>,
    pub tags: BTreeSet<String>,
}

impl WorldObject {
    pub fn new(handle: ObjectHandle, identifier: impl Into<String>, geometry: GeometryType) -> Self {
        Self {
            handle,
            identifier: identifier.into(),
            transform: Transform::default(),
            geometry,
            object_type: String::new(),
            attributes: HashMap::new(),
            tags: BTreeSet::new(),
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.transform.position = position;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.transform.scale = scale;
        self
    }

    pub fn with_object_type(mut self, object_type: impl Into<String>) -> Self {
        self.object_type = object_type.into();
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    #[inline]
    pub fn set_position(&mut self, position: Vec3) {
        self.transform.position = position;
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Mass override from the `mass` attribute, if present and valid
    pub fn mass_override(&self) -> Option<f32> {
        let raw = self.attribute(MASS_ATTRIBUTE)?;
        let mass = raw.trim().parse::<f32>().ok()?;
        (mass.is_finite() && mass > 0.0).then_some(mass)
    }

    /// Persist a mass value back onto the object
    pub fn set_mass_attribute(&mut self, mass: f32) {
        self.attributes.insert(MASS_ATTRIBUTE.to_string(), mass.to_string());
    }
}
