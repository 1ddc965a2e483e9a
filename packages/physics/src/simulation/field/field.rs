use crate::core::math::Vec3;
use crate::domain::object::WorldObject;
use crate::gravity_field::{field_participants, sample_acceleration, sample_grid, FieldParams, FieldSample};
use crate::laws::LawKind;

use super::PhysicsWorld;

pub(super) fn field_params(world: &PhysicsWorld) -> FieldParams {
    FieldParams {
        gravity_constant: world.settings.gravity_constant,
        softening: world.settings.softening,
    }
}

pub(super) fn set_gravity_constant(world: &mut PhysicsWorld, g: f32) {
    if g.is_finite() {
        world.settings.gravity_constant = g;
    }
}

pub(super) fn set_softening(world: &mut PhysicsWorld, epsilon: f32) {
    if epsilon.is_finite() && epsilon >= 0.0 {
        world.settings.softening = epsilon;
    }
}

/// (position, mass) of every participant of the active field law.
///
/// Masses come from registered bodies, then the mass attribute, then the
/// default mass. Nothing is created or mutated.
fn field_sources(world: &PhysicsWorld, objects: &[WorldObject]) -> Vec<(Vec3, f32)> {
    let Some(law) = world.laws.first_enabled(LawKind::GravityField) else {
        return Vec::new();
    };
    let ground = world.ground;
    field_participants(&law.target, objects, |o| ground == Some(o.handle))
        .into_iter()
        .map(|i| {
            let obj = &objects[i];
            let mass = world
                .bodies
                .get(obj.handle)
                .map(|b| b.effective_mass())
                .or_else(|| obj.mass_override())
                .unwrap_or(world.settings.default_mass);
            (obj.position(), mass)
        })
        .collect()
}

pub(super) fn sample_gravity_field(world: &PhysicsWorld, objects: &[WorldObject], point: Vec3) -> Vec3 {
    let sources = field_sources(world, objects);
    sample_acceleration(point, &sources, field_params(world))
}

pub(super) fn sample_gravity_field_grid(
    world: &PhysicsWorld,
    objects: &[WorldObject],
    min: Vec3,
    max: Vec3,
    resolution: [u32; 3],
) -> Vec<FieldSample> {
    let sources = field_sources(world, objects);
    sample_grid(min, max, resolution, &sources, field_params(world))
}
