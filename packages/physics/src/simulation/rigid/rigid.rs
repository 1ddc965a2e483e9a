use crate::core::math::Vec3;
use crate::domain::handle::ObjectHandle;
use crate::domain::object::WorldObject;
use crate::rigid_body::RigidBody;

use super::PhysicsWorld;

pub(super) fn get_or_create_body<'a>(world: &'a mut PhysicsWorld, object: &WorldObject) -> &'a mut RigidBody {
    world.bodies.get_or_create(object, world.settings.default_mass)
}

pub(super) fn apply_impulse(world: &mut PhysicsWorld, handle: ObjectHandle, impulse: Vec3) -> bool {
    match world.bodies.get_mut(handle) {
        Some(body) => {
            body.apply_impulse(impulse);
            true
        }
        None => false,
    }
}

pub(super) fn remove_body(world: &mut PhysicsWorld, handle: ObjectHandle) -> bool {
    let removed = world.bodies.remove(handle);
    let bonds = world.bonds.remove_bonds_of(handle);
    if bonds > 0 {
        log::debug!("removed {} bond(s) with {}", bonds, handle);
    }
    if world.ground == Some(handle) {
        world.ground = None;
    }
    removed
}

pub(super) fn clear_bodies(world: &mut PhysicsWorld) {
    world.bodies.clear();
}
