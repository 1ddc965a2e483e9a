//! Per-object law evaluation.

use crate::core::math::Vec3;
use crate::domain::object::WorldObject;
use crate::systems::rigid_body::{BodyRegistry, RigidBody};

use super::law::{LawKind, PhysicsLaw};
use super::registry::LawRegistry;
use super::target::object_matches_target;

/// Mass-weighted centroid of every object selected by each CenterGravity law.
///
/// Indexed like `laws.laws()`; `None` for other kinds or empty selections.
pub fn center_gravity_centroids(
    laws: &LawRegistry,
    objects: &[WorldObject],
    bodies: &BodyRegistry,
    skip: impl Fn(&WorldObject) -> bool,
) -> Vec<Option<Vec3>> {
    laws.laws()
        .iter()
        .map(|law| {
            if !law.enabled || law.kind != LawKind::CenterGravity {
                return None;
            }
            let mut weighted = Vec3::ZERO;
            let mut total = 0.0f32;
            for obj in objects.iter().filter(|o| !skip(o)) {
                if !object_matches_target(obj, &law.target) {
                    continue;
                }
                let Some(body) = bodies.get(obj.handle) else {
                    continue;
                };
                let m = body.effective_mass();
                weighted += obj.position() * m;
                total += m;
            }
            (total > 0.0).then(|| weighted * (1.0 / total))
        })
        .collect()
}

/// Force from the kinds shared with the viewer path (Gravity / AirResistance)
pub fn basic_law_force(law: &PhysicsLaw, body: &RigidBody) -> Option<Vec3> {
    match law.kind {
        LawKind::Gravity => Some(law.unit_direction() * (law.strength * body.effective_mass())),
        LawKind::AirResistance => Some(body.velocity * -law.strength),
        _ => None,
    }
}

/// Accumulate every enabled, matching, non-field law onto `body`
pub fn apply_laws(
    laws: &LawRegistry,
    centroids: &[Option<Vec3>],
    object: &WorldObject,
    body: &mut RigidBody,
    dt: f32,
) {
    for (idx, law) in laws.laws().iter().enumerate() {
        if !law.enabled || law.kind == LawKind::GravityField {
            continue;
        }
        if !object_matches_target(object, &law.target) {
            continue;
        }

        match law.kind {
            LawKind::Gravity | LawKind::AirResistance => {
                if let Some(force) = basic_law_force(law, body) {
                    body.apply_force(force);
                }
            }
            // Handled by the collision pass
            LawKind::Collision => {}
            LawKind::CenterGravity => {
                let Some(center) = centroids.get(idx).copied().flatten() else {
                    continue;
                };
                let mass = body.effective_mass();
                if let Some(dir) = (center - object.position()).try_normalize() {
                    body.apply_force(dir * (law.strength * mass));
                }
                if law.damping != 0.0 {
                    body.apply_force(body.velocity * (-law.damping * mass));
                }
            }
            LawKind::CustomForce => match &law.custom_apply {
                Some(apply) => apply(object, body, dt),
                None => {
                    body.apply_force(law.unit_direction() * law.strength);
                }
            },
            LawKind::GravityField => {}
        }
    }
}
