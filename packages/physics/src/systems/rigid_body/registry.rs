use std::collections::HashMap;

use crate::domain::handle::ObjectHandle;
use crate::domain::object::WorldObject;

use super::body::RigidBody;

struct BodySlot {
    generation: u32,
    body: RigidBody,
}

/// Bodies keyed by handle index.
///
/// Each index holds at most one slot; a newer generation evicts the stale
/// entry so an identity never maps to two bodies. Sparse indices cost nothing.
#[derive(Default)]
pub struct BodyRegistry {
    slots: HashMap<u32, BodySlot>,
}

impl BodyRegistry {
    pub fn new() -> Self {
        Self { slots: HashMap::new() }
    }

    /// Body for `object`, created with `default_mass` if absent.
    ///
    /// The mass is re-read from the object's `mass` attribute on every call.
    pub fn get_or_create(&mut self, object: &WorldObject, default_mass: f32) -> &mut RigidBody {
        let body = self.get_or_create_handle(object.handle, default_mass);
        if let Some(mass) = object.mass_override() {
            body.set_mass(mass);
        }
        body
    }

    pub fn get_or_create_handle(&mut self, handle: ObjectHandle, default_mass: f32) -> &mut RigidBody {
        let slot = self
            .slots
            .entry(handle.index)
            .or_insert_with(|| BodySlot { generation: handle.generation, body: RigidBody::new(default_mass) });
        if slot.generation != handle.generation {
            log::debug!("replacing stale body in slot {} with {}", handle.index, handle);
            *slot = BodySlot { generation: handle.generation, body: RigidBody::new(default_mass) };
        }
        &mut slot.body
    }

    pub fn get(&self, handle: ObjectHandle) -> Option<&RigidBody> {
        self.slots
            .get(&handle.index)
            .filter(|s| s.generation == handle.generation)
            .map(|s| &s.body)
    }

    pub fn get_mut(&mut self, handle: ObjectHandle) -> Option<&mut RigidBody> {
        self.slots
            .get_mut(&handle.index)
            .filter(|s| s.generation == handle.generation)
            .map(|s| &mut s.body)
    }

    pub fn contains(&self, handle: ObjectHandle) -> bool {
        self.get(handle).is_some()
    }

    /// Explicit deregistration, e.g. when the scene destroys the object
    pub fn remove(&mut self, handle: ObjectHandle) -> bool {
        if !self.contains(handle) {
            return false;
        }
        self.slots.remove(&handle.index).is_some()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ObjectHandle, &RigidBody)> {
        self.slots
            .iter()
            .map(|(&i, s)| (ObjectHandle::new(i, s.generation), &s.body))
    }
}
