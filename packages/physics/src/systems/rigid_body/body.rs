use crate::core::math::Vec3;

/// Floor applied to mass before any division
pub const MIN_MASS: f32 = 1.0e-3;

/// Point mass - moves as a single unit
#[derive(Clone, Debug, PartialEq)]
pub struct RigidBody {
    /// Total mass (always >= MIN_MASS once set through `set_mass`)
    pub mass: f32,
    /// Velocity (units per second)
    pub velocity: Vec3,
    /// Force accumulated this step, cleared after integration
    pub accumulated_force: Vec3,
}

impl RigidBody {
    pub fn new(mass: f32) -> Self {
        Self {
            mass: floor_mass(mass),
            velocity: Vec3::ZERO,
            accumulated_force: Vec3::ZERO,
        }
    }

    /// Mass clamped to the positive floor
    #[inline]
    pub fn effective_mass(&self) -> f32 {
        floor_mass(self.mass)
    }

    pub fn set_mass(&mut self, mass: f32) {
        self.mass = floor_mass(mass);
    }

    /// Add to the force accumulator. Non-finite forces are dropped.
    pub fn apply_force(&mut self, force: Vec3) -> bool {
        if !force.is_finite() {
            log::debug!("dropping non-finite force {:?}", force);
            return false;
        }
        let next = self.accumulated_force + force;
        if !next.is_finite() {
            log::debug!("force accumulator would overflow, keeping previous value");
            return false;
        }
        self.accumulated_force = next;
        true
    }

    pub fn clear_forces(&mut self) {
        self.accumulated_force = Vec3::ZERO;
    }

    /// Apply impulse at center of mass
    pub fn apply_impulse(&mut self, impulse: Vec3) {
        if !impulse.is_finite() {
            return;
        }
        let next = self.velocity + impulse * (1.0 / self.effective_mass());
        if next.is_finite() {
            self.velocity = next;
        }
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }
}

impl Default for RigidBody {
    fn default() -> Self {
        Self::new(1.0)
    }
}

#[inline]
fn floor_mass(mass: f32) -> f32 {
    if mass.is_finite() {
        mass.max(MIN_MASS)
    } else {
        MIN_MASS
    }
}
