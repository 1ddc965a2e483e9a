use crate::bonds::Bond;
use crate::domain::handle::ObjectHandle;
use crate::domain::object::GeometryType;
use crate::laws::PhysicsLaw;

use super::PhysicsWorld;

pub(super) fn add_law(world: &mut PhysicsWorld, law: PhysicsLaw) -> u32 {
    world.laws.add_law(law)
}

pub(super) fn remove_law(world: &mut PhysicsWorld, id: u32) -> bool {
    world.laws.remove_law(id)
}

pub(super) fn set_law_enabled(world: &mut PhysicsWorld, id: u32, enabled: bool) -> bool {
    world.laws.set_law_enabled(id, enabled)
}

pub(super) fn clear_laws(world: &mut PhysicsWorld) {
    world.laws.clear();
}

pub(super) fn add_bond(world: &mut PhysicsWorld, bond: Bond) -> bool {
    world.bonds.add_bond(bond)
}

pub(super) fn remove_bond(world: &mut PhysicsWorld, a: ObjectHandle, b: ObjectHandle) -> bool {
    world.bonds.remove_bond(a, b)
}

pub(super) fn clear_bonds(world: &mut PhysicsWorld) {
    world.bonds.clear();
}

pub(super) fn set_auto_bond(world: &mut PhysicsWorld, a: GeometryType, b: GeometryType, enabled: bool) {
    log::debug!("auto-bond {} / {} -> {}", a.as_str(), b.as_str(), enabled);
    world.auto_bonds.set(a, b, enabled);
}

pub(super) fn clear(world: &mut PhysicsWorld) {
    world.bodies.clear();
    world.laws.clear();
    world.bonds.clear();
    world.auto_bonds.clear();
    world.boxes.clear();
    world.index.clear();
    world.ground = None;
    log::info!("physics world cleared");
}
