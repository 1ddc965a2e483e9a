//! Semi-implicit Euler integration with a ground-plane clamp.

use crate::core::math::Vec3;

use super::body::RigidBody;

/// Distance above the ground plane treated as resting contact
pub const GROUND_EPSILON: f32 = 1.0e-3;

/// Advance one body by `dt`.
///
/// Velocity is updated from the accumulated force first and the new velocity
/// moves the position. The accumulator is empty on return.
pub fn integrate(body: &mut RigidBody, position: &mut Vec3, dt: f32, air_resistance: f32, ground_y: f32) {
    if !(dt.is_finite() && dt > 0.0) {
        body.clear_forces();
        return;
    }

    if air_resistance != 0.0 {
        body.apply_force(body.velocity * -air_resistance);
    }

    let inv_mass = 1.0 / body.effective_mass();
    let velocity = body.velocity + body.accumulated_force * (inv_mass * dt);
    if velocity.is_finite() {
        body.velocity = velocity;
    } else {
        log::warn!("integration produced a non-finite velocity, resetting body to rest");
        body.velocity = Vec3::ZERO;
    }

    let next = *position + body.velocity * dt;
    if next.is_finite() {
        *position = next;
    }

    // Ground clamp
    if position.y < ground_y {
        position.y = ground_y;
        if body.velocity.y < 0.0 {
            body.velocity.y = 0.0;
        }
    } else if position.y - ground_y < GROUND_EPSILON && body.velocity.y <= 0.0 {
        position.y = ground_y;
        body.velocity.y = 0.0;
    }

    body.clear_forces();
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn zero_force_keeps_velocity_and_drifts() {
        let mut body = RigidBody::new(3.0);
        body.velocity = Vec3::new(1.0, 2.0, -0.5);
        let mut pos = Vec3::new(0.0, 10.0, 0.0);
        integrate(&mut body, &mut pos, 0.1, 0.0, -100.0);
        assert_eq!(body.velocity, Vec3::new(1.0, 2.0, -0.5));
        assert_relative_eq!(pos.x, 0.1, epsilon = 1e-6);
        assert_relative_eq!(pos.y, 10.2, epsilon = 1e-5);
        assert_relative_eq!(pos.z, -0.05, epsilon = 1e-6);
    }

    #[test]
    fn velocity_updates_before_position() {
        let g = 9.81;
        let dt = 0.1;
        let mut body = RigidBody::new(1.0);
        body.apply_force(Vec3::new(0.0, -g, 0.0));
        let mut pos = Vec3::new(0.0, 5.0, 0.0);
        integrate(&mut body, &mut pos, dt, 0.0, -100.0);
        assert_relative_eq!(body.velocity.y, -g * dt, epsilon = 1e-6);
        assert_relative_eq!(pos.y, 5.0 - g * dt * dt, epsilon = 1e-5);
        assert_eq!(body.accumulated_force, Vec3::ZERO);
    }

    #[test]
    fn ground_clamp_snaps_and_stops_falling() {
        let mut body = RigidBody::new(1.0);
        body.velocity = Vec3::new(0.0, -10.0, 0.0);
        let mut pos = Vec3::new(0.0, 0.05, 0.0);
        integrate(&mut body, &mut pos, 0.1, 0.0, 0.0);
        assert_eq!(pos.y, 0.0);
        assert_eq!(body.velocity.y, 0.0);
    }

    #[test]
    fn rising_body_near_ground_is_not_snapped() {
        let mut body = RigidBody::new(1.0);
        body.velocity = Vec3::new(0.0, 0.001, 0.0);
        let mut pos = Vec3::new(0.0, 0.0, 0.0);
        integrate(&mut body, &mut pos, 0.1, 0.0, 0.0);
        assert!(pos.y > 0.0);
        assert!(body.velocity.y > 0.0);
    }

    #[test]
    fn drag_opposes_motion() {
        let mut body = RigidBody::new(1.0);
        body.velocity = Vec3::new(2.0, 0.0, 0.0);
        let mut pos = Vec3::new(0.0, 5.0, 0.0);
        integrate(&mut body, &mut pos, 0.5, 1.0, 0.0);
        assert_relative_eq!(body.velocity.x, 1.0, epsilon = 1e-6);
    }
}
