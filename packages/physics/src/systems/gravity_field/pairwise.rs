use crate::domain::handle::ObjectHandle;
use crate::domain::object::WorldObject;
use crate::systems::laws::{object_matches_target, LawTarget};
use crate::systems::rigid_body::BodyRegistry;

use super::FieldParams;

/// Pairs closer than this have no defined direction and are skipped
pub const MIN_FIELD_SEPARATION: f32 = 1.0e-6;

/// Indices of objects selected by the field law's target
pub fn field_participants(
    target: &LawTarget,
    objects: &[WorldObject],
    skip: impl Fn(&WorldObject) -> bool,
) -> Vec<usize> {
    objects
        .iter()
        .enumerate()
        .filter(|(_, o)| !skip(o) && object_matches_target(o, target))
        .map(|(i, _)| i)
        .collect()
}

/// Mutual attraction over every unordered pair of `participants`.
///
/// `on_pair` sees each pair that produced a force with its magnitude.
/// Returns the number of such pairs.
pub fn apply_gravity_field(
    participants: &[usize],
    objects: &[WorldObject],
    bodies: &mut BodyRegistry,
    params: FieldParams,
    mut on_pair: impl FnMut(ObjectHandle, ObjectHandle, f32),
) -> usize {
    let mut pairs = 0;
    for (n, &i) in participants.iter().enumerate() {
        for &j in &participants[n + 1..] {
            let (a, b) = (&objects[i], &objects[j]);
            let (Some(ma), Some(mb)) = (
                bodies.get(a.handle).map(|body| body.effective_mass()),
                bodies.get(b.handle).map(|body| body.effective_mass()),
            ) else {
                continue;
            };

            let delta = b.position() - a.position();
            let dist_sq = delta.length_squared();
            let dist = dist_sq.sqrt();
            if !(dist > MIN_FIELD_SEPARATION) || !dist.is_finite() {
                log::debug!("gravity field: skipping coincident pair {} / {}", a.identifier, b.identifier);
                continue;
            }

            let magnitude = params.pair_magnitude(ma, mb, dist_sq);
            if !magnitude.is_finite() {
                continue;
            }
            let force = delta * (magnitude / dist);

            if let Some(body) = bodies.get_mut(a.handle) {
                body.apply_force(force);
            }
            if let Some(body) = bodies.get_mut(b.handle) {
                body.apply_force(-force);
            }
            on_pair(a.handle, b.handle, magnitude);
            pairs += 1;
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::Vec3;
    use crate::domain::object::GeometryType;
    use approx::assert_relative_eq;

    fn obj(i: u32, pos: Vec3) -> WorldObject {
        WorldObject::new(ObjectHandle::new(i, 0), format!("o{i}"), GeometryType::Sphere).with_position(pos)
    }

    #[test]
    fn pair_attracts_with_softened_inverse_square() {
        let objects = vec![obj(0, Vec3::ZERO), obj(1, Vec3::new(2.0, 0.0, 0.0))];
        let mut bodies = BodyRegistry::new();
        bodies.get_or_create(&objects[0], 2.0);
        bodies.get_or_create(&objects[1], 3.0);
        let params = FieldParams { gravity_constant: 1.5, softening: 1.0 };

        let mut seen = Vec::new();
        let pairs = apply_gravity_field(&[0, 1], &objects, &mut bodies, params, |a, b, f| seen.push((a, b, f)));
        assert_eq!(pairs, 1);

        let expected = 1.5 * 2.0 * 3.0 / (4.0 + 1.0);
        let fa = bodies.get(objects[0].handle).map(|b| b.accumulated_force).unwrap_or_default();
        let fb = bodies.get(objects[1].handle).map(|b| b.accumulated_force).unwrap_or_default();
        assert_relative_eq!(fa.x, expected, epsilon = 1e-5);
        assert_relative_eq!(fb.x, -expected, epsilon = 1e-5);
        assert_relative_eq!(seen[0].2, expected, epsilon = 1e-5);
    }

    #[test]
    fn coincident_pair_stays_finite() {
        let objects = vec![obj(0, Vec3::ZERO), obj(1, Vec3::ZERO)];
        let mut bodies = BodyRegistry::new();
        bodies.get_or_create(&objects[0], 1.0);
        bodies.get_or_create(&objects[1], 1.0);
        let params = FieldParams { gravity_constant: 1.0, softening: 0.0 };
        assert_eq!(apply_gravity_field(&[0, 1], &objects, &mut bodies, params, |_, _, _| {}), 0);
        assert!(bodies.iter().all(|(_, b)| b.accumulated_force.is_finite()));
    }

    #[test]
    fn participants_follow_target() {
        let objects = vec![
            obj(0, Vec3::ZERO).with_tag("planet"),
            obj(1, Vec3::ZERO),
            obj(2, Vec3::ZERO).with_tag("planet"),
        ];
        assert_eq!(field_participants(&LawTarget::tagged("planet"), &objects, |_| false), vec![0, 2]);
        assert_eq!(field_participants(&LawTarget::all(), &objects, |o| o.handle.index == 1), vec![0, 2]);
    }
}
