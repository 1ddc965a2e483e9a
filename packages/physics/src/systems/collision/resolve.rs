use crate::core::math::Vec3;

use super::aabb::CollisionBox;

/// Extra separation added on each side when pushing a pair apart
pub const SEPARATION_EPSILON: f32 = 1.0e-3;

/// Outcome of resolving one overlapping pair
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Resolution {
    pub axis: usize,
    pub depth: f32,
    /// Displacement to add to object A (B gets the negation)
    pub push_a: Vec3,
}

/// Axis with the smallest positive penetration, if any
pub fn min_penetration_axis(a: &CollisionBox, b: &CollisionBox) -> Option<(usize, f32)> {
    let pen = a.penetration(b);
    (0..3)
        .map(|axis| (axis, pen.axis(axis)))
        .filter(|&(_, depth)| depth > 0.0 && depth.is_finite())
        .min_by(|x, y| x.1.total_cmp(&y.1))
}

/// Split correction for a pair along its minimum-translation axis
pub fn resolve_pair(a: &CollisionBox, b: &CollisionBox) -> Option<Resolution> {
    let (axis, depth) = min_penetration_axis(a, b)?;
    let sign = if a.center().axis(axis) <= b.center().axis(axis) { -1.0 } else { 1.0 };
    let mut push_a = Vec3::ZERO;
    push_a.set_axis(axis, sign * (depth * 0.5 + SEPARATION_EPSILON));
    Some(Resolution { axis, depth, push_a })
}
