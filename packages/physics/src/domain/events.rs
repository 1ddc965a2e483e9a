//! Outbound notifications.
//!
//! Collision events go to the scene's publish/subscribe layer; relation records
//! feed the semantic graph. Neither is retained by the physics world.

use serde::{Deserialize, Serialize};

use crate::core::math::Vec3;

use super::handle::ObjectHandle;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CollisionEvent {
    pub object_a: ObjectHandle,
    pub object_b: ObjectHandle,
    pub collision_point: Vec3,
    pub collision_normal: Vec3,
    /// Sum of both speeds before the resolved axis was zeroed
    pub impact_force: f32,
    /// Simulation time in seconds
    pub timestamp: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelationKind {
    Gravity,
    Collision,
}

impl RelationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationKind::Gravity => "gravity",
            RelationKind::Collision => "collision",
        }
    }
}

/// Typed edge for downstream graph consumers
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RelationRecord {
    pub from: ObjectHandle,
    pub to: ObjectHandle,
    pub kind: RelationKind,
    pub strength: f32,
}

/// Receiver for everything a step announces
pub trait PhysicsEventSink {
    fn on_collision(&mut self, event: &CollisionEvent);

    fn on_relation(&mut self, _relation: &RelationRecord) {}
}

/// Sink that drops everything
pub struct NullSink;

impl PhysicsEventSink for NullSink {
    fn on_collision(&mut self, _event: &CollisionEvent) {}
}

/// Sink that keeps everything, mostly for tests and the wasm facade
#[derive(Debug, Default)]
pub struct EventLog {
    pub collisions: Vec<CollisionEvent>,
    pub relations: Vec<RelationRecord>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.collisions.clear();
        self.relations.clear();
    }
}

impl PhysicsEventSink for EventLog {
    fn on_collision(&mut self, event: &CollisionEvent) {
        self.collisions.push(*event);
    }

    fn on_relation(&mut self, relation: &RelationRecord) {
        self.relations.push(*relation);
    }
}
