use crate::domain::handle::ObjectHandle;
use crate::domain::settings::PhysicsSettings;

use super::PhysicsWorld;

pub(super) fn load_settings_json(world: &mut PhysicsWorld, json: &str) -> Result<(), String> {
    world.settings = PhysicsSettings::from_json(json)?;
    log::info!("physics settings loaded");
    Ok(())
}

pub(super) fn enable_perf_metrics(world: &mut PhysicsWorld, enabled: bool) {
    world.perf_enabled = enabled;
    if !enabled {
        world.perf_stats.reset();
    }
}

pub(super) fn set_gravity_accel(world: &mut PhysicsWorld, g: f32) {
    if g.is_finite() {
        world.settings.gravity_accel = g;
    }
}

pub(super) fn set_air_drag(world: &mut PhysicsWorld, drag: f32) {
    if drag.is_finite() {
        world.settings.air_drag = drag;
    }
}

pub(super) fn set_ground_y(world: &mut PhysicsWorld, y: f32) {
    if y.is_finite() {
        world.settings.ground_y = y;
    }
}

pub(super) fn set_physics_enabled(world: &mut PhysicsWorld, enabled: bool) {
    world.settings.physics_enabled = enabled;
}

pub(super) fn set_default_mass(world: &mut PhysicsWorld, mass: f32) {
    if mass.is_finite() && mass > 0.0 {
        world.settings.default_mass = mass;
    } else {
        log::warn!("ignoring non-positive default mass {}", mass);
    }
}

pub(super) fn set_max_substep(world: &mut PhysicsWorld, seconds: f32) {
    if seconds.is_finite() && seconds > 0.0 {
        world.settings.max_substep = seconds;
    } else {
        log::warn!("ignoring invalid max sub-step {}", seconds);
    }
}

pub(super) fn set_record_relations(world: &mut PhysicsWorld, enabled: bool) {
    world.settings.record_relations = enabled;
}

pub(super) fn set_ground_object(world: &mut PhysicsWorld, ground: Option<ObjectHandle>) {
    world.ground = ground;
}
