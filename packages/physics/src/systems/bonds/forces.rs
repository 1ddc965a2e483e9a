//! Spring forces and the opportunistic auto-bond pass.

use std::collections::HashMap;

use crate::domain::handle::ObjectHandle;
use crate::domain::object::WorldObject;
use crate::systems::rigid_body::BodyRegistry;

use super::auto_bond::{AutoBondRules, AUTO_BOND_REST_LENGTH, AUTO_BOND_STRENGTH};
use super::bond::{Bond, BondRegistry};

/// Below this separation the spring direction is undefined
pub const MIN_BOND_SEPARATION: f32 = 1.0e-4;

/// Apply `strength * (d - rest)` along the separation to both ends.
///
/// Bonds whose objects are missing from `index` are skipped. Returns the
/// number of bonds that produced a force.
pub fn apply_bond_forces(
    bonds: &BondRegistry,
    objects: &[WorldObject],
    index: &HashMap<ObjectHandle, usize>,
    bodies: &mut BodyRegistry,
) -> usize {
    let mut applied = 0;
    for bond in bonds.bonds() {
        let (Some(&ia), Some(&ib)) = (index.get(&bond.a), index.get(&bond.b)) else {
            continue;
        };
        let delta = objects[ib].position() - objects[ia].position();
        let d = delta.length();
        if !(d > MIN_BOND_SEPARATION) || !d.is_finite() {
            continue;
        }
        let dir = delta * (1.0 / d);
        let force = dir * (bond.strength * (d - bond.rest_length));

        if let Some(body) = bodies.get_mut(bond.a) {
            body.apply_force(force);
        }
        if let Some(body) = bodies.get_mut(bond.b) {
            body.apply_force(-force);
        }
        applied += 1;
    }
    applied
}

/// Bond every unbonded pair whose geometry pair is enabled in `rules`
pub fn create_auto_bonds(
    rules: &AutoBondRules,
    bonds: &mut BondRegistry,
    objects: &[WorldObject],
    skip: impl Fn(&WorldObject) -> bool,
) -> usize {
    if !rules.any_enabled() {
        return 0;
    }
    let mut created = 0;
    for i in 0..objects.len() {
        if skip(&objects[i]) {
            continue;
        }
        for j in (i + 1)..objects.len() {
            if skip(&objects[j]) {
                continue;
            }
            let (a, b) = (&objects[i], &objects[j]);
            if !rules.get(a.geometry, b.geometry) || bonds.contains(a.handle, b.handle) {
                continue;
            }
            if bonds.add_bond(Bond::new(a.handle, b.handle, AUTO_BOND_REST_LENGTH, AUTO_BOND_STRENGTH)) {
                log::debug!("auto-bonded {} and {}", a.identifier, b.identifier);
                created += 1;
            }
        }
    }
    created
}
