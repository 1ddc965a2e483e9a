//! O(n²) overlap scan with in-pass resolution.

use crate::core::math::Vec3;
use crate::domain::events::CollisionEvent;
use crate::domain::handle::ObjectHandle;
use crate::domain::object::WorldObject;
use crate::systems::laws::{object_matches_target, LawKind, LawRegistry};
use crate::systems::rigid_body::BodyRegistry;

use super::aabb::CollisionBox;
use super::resolve::resolve_pair;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CollisionStats {
    pub pair_checks: u32,
    pub resolved: u32,
}

/// Rebuild every box from the current transforms
pub fn refresh_boxes(objects: &[WorldObject], boxes: &mut Vec<CollisionBox>) {
    boxes.clear();
    boxes.extend(objects.iter().map(|o| CollisionBox::from_transform(&o.transform)));
}

/// Is this pair allowed to collide under the current Collision laws?
fn collision_allowed(laws: &LawRegistry, a: &WorldObject, b: &WorldObject) -> bool {
    if !laws.has_enabled(LawKind::Collision) {
        return true;
    }
    laws.enabled_of_kind(LawKind::Collision)
        .any(|law| object_matches_target(a, &law.target) || object_matches_target(b, &law.target))
}

/// Scan all pairs, resolve overlaps and report each resolved pair.
///
/// `boxes` must be parallel to `objects`. The ground object never takes part.
pub fn detect_and_resolve(
    objects: &mut [WorldObject],
    boxes: &mut [CollisionBox],
    bodies: &mut BodyRegistry,
    laws: &LawRegistry,
    ground: Option<ObjectHandle>,
    timestamp: f64,
    mut on_event: impl FnMut(CollisionEvent),
) -> CollisionStats {
    let mut stats = CollisionStats::default();
    let is_ground = |o: &WorldObject| ground == Some(o.handle);
    let n = objects.len().min(boxes.len());

    for i in 0..n {
        if is_ground(&objects[i]) {
            continue;
        }
        for j in (i + 1)..n {
            if is_ground(&objects[j]) {
                continue;
            }
            stats.pair_checks += 1;

            if !boxes[i].overlaps(&boxes[j]) {
                continue;
            }
            if !collision_allowed(laws, &objects[i], &objects[j]) {
                continue;
            }
            let Some(res) = resolve_pair(&boxes[i], &boxes[j]) else {
                continue;
            };

            let (ha, hb) = (objects[i].handle, objects[j].handle);
            let center_a = boxes[i].center();
            let center_b = boxes[j].center();
            let point = (center_a + center_b) * 0.5;
            let mut fallback = Vec3::ZERO;
            fallback.set_axis(res.axis, 1.0);
            let normal = (center_b - center_a).normalize_or(fallback);

            let speed_a = bodies.get(ha).map(|b| b.speed()).unwrap_or(0.0);
            let speed_b = bodies.get(hb).map(|b| b.speed()).unwrap_or(0.0);

            let pa = objects[i].position() + res.push_a;
            objects[i].set_position(pa);
            let pb = objects[j].position() - res.push_a;
            objects[j].set_position(pb);

            for h in [ha, hb] {
                if let Some(body) = bodies.get_mut(h) {
                    body.velocity.set_axis(res.axis, 0.0);
                }
            }

            boxes[i] = CollisionBox::from_transform(&objects[i].transform);
            boxes[j] = CollisionBox::from_transform(&objects[j].transform);

            stats.resolved += 1;
            on_event(CollisionEvent {
                object_a: ha,
                object_b: hb,
                collision_point: point,
                collision_normal: normal,
                impact_force: speed_a + speed_b,
                timestamp,
            });
        }
    }

    stats
}
