use crate::core::math::Vec3;
use crate::domain::object::Transform;

/// Local half-extent of every object's collision cube before scaling
pub const LOCAL_HALF_EXTENT: f32 = 0.5;

/// Axis-aligned collision box rebuilt from a transform
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CollisionBox {
    /// World-space corners of the oriented unit cube
    pub corners: [Vec3; 8],
    pub min: Vec3,
    pub max: Vec3,
}

impl CollisionBox {
    pub fn from_transform(t: &Transform) -> Self {
        let h = LOCAL_HALF_EXTENT;
        let mut corners = [Vec3::ZERO; 8];
        for (n, corner) in corners.iter_mut().enumerate() {
            let local = Vec3::new(
                if n & 1 == 0 { -h } else { h },
                if n & 2 == 0 { -h } else { h },
                if n & 4 == 0 { -h } else { h },
            );
            *corner = t.position + t.rotation.rotate(local * t.scale);
        }

        let mut min = corners[0];
        let mut max = corners[0];
        for c in &corners[1..] {
            min = min.min(*c);
            max = max.max(*c);
        }
        Self { corners, min, max }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Overlap requires all three axes to overlap
    pub fn overlaps(&self, other: &CollisionBox) -> bool {
        (0..3).all(|axis| {
            self.min.axis(axis) < other.max.axis(axis) && other.min.axis(axis) < self.max.axis(axis)
        })
    }

    /// Per-axis overlap depth (negative when separated on that axis)
    pub fn penetration(&self, other: &CollisionBox) -> Vec3 {
        let hi = self.max.min(other.max);
        let lo = self.min.max(other.min);
        hi - lo
    }
}
