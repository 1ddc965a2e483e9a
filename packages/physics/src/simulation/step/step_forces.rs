use crate::core::math::Vec3;
use crate::domain::events::{PhysicsEventSink, RelationKind, RelationRecord};
use crate::domain::object::WorldObject;
use crate::gravity_field::{apply_gravity_field, field_participants};
use crate::bonds::{apply_bond_forces, create_auto_bonds};
use crate::laws::{apply_laws, center_gravity_centroids, LawKind};

use super::field::field_params;
use super::PhysicsWorld;

/// Index every object and make sure each dynamic one has a body.
/// Returns the number of dynamic objects.
pub(super) fn sync_bodies(world: &mut PhysicsWorld, objects: &[WorldObject]) -> u32 {
    world.index.clear();
    let default_mass = world.settings.default_mass;
    let mut dynamic = 0u32;
    for (i, obj) in objects.iter().enumerate() {
        world.index.insert(obj.handle, i);
        if world.ground == Some(obj.handle) {
            continue;
        }
        world.bodies.get_or_create(obj, default_mass);
        dynamic += 1;
    }
    dynamic
}

/// Clear last step's forces and accumulate every per-object law
pub(super) fn accumulate_law_forces(world: &mut PhysicsWorld, objects: &[WorldObject], dt: f32) {
    let ground = world.ground;
    let legacy = world.laws.is_empty();
    let centroids = if legacy {
        Vec::new()
    } else {
        center_gravity_centroids(&world.laws, objects, &world.bodies, |o| ground == Some(o.handle))
    };
    let g = world.settings.gravity_accel;

    for obj in objects {
        if ground == Some(obj.handle) {
            continue;
        }
        let Some(body) = world.bodies.get_mut(obj.handle) else {
            continue;
        };
        body.clear_forces();
        if legacy {
            let mass = body.effective_mass();
            body.apply_force(Vec3::new(0.0, -g * mass, 0.0));
        } else {
            apply_laws(&world.laws, &centroids, obj, body, dt);
        }
    }
}

/// Pairwise attraction among the first enabled GravityField law's targets.
/// Returns the number of pairs that produced a force.
pub(super) fn apply_field_forces(
    world: &mut PhysicsWorld,
    objects: &[WorldObject],
    events: &mut dyn PhysicsEventSink,
) -> u32 {
    let ground = world.ground;
    let participants = match world.laws.first_enabled(LawKind::GravityField) {
        Some(law) => field_participants(&law.target, objects, |o| ground == Some(o.handle)),
        None => return 0,
    };
    if participants.len() < 2 {
        return 0;
    }

    let params = field_params(world);
    let record = world.settings.record_relations;
    let pairs = apply_gravity_field(&participants, objects, &mut world.bodies, params, |a, b, strength| {
        if record {
            events.on_relation(&RelationRecord { from: a, to: b, kind: RelationKind::Gravity, strength });
        }
    });
    pairs as u32
}

/// Auto-bond new pairs, then apply every spring.
/// Returns (bonds created, bonds that produced a force).
pub(super) fn apply_bond_step(world: &mut PhysicsWorld, objects: &[WorldObject]) -> (u32, u32) {
    let ground = world.ground;
    let created = create_auto_bonds(&world.auto_bonds, &mut world.bonds, objects, |o| ground == Some(o.handle));
    if world.bonds.is_empty() {
        return (created as u32, 0);
    }
    let applied = apply_bond_forces(&world.bonds, objects, &world.index, &mut world.bodies);
    (created as u32, applied as u32)
}
