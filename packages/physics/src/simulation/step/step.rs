use crate::domain::events::{CollisionEvent, PhysicsEventSink, RelationKind, RelationRecord};
use crate::domain::object::WorldObject;
use crate::collision::{detect_and_resolve, refresh_boxes};
use crate::player::{self, ViewerBody};
use crate::rigid_body::integrate;

use super::step_forces::{accumulate_law_forces, apply_bond_step, apply_field_forces, sync_bodies};
use super::{PhaseClock, PhysicsWorld, MAX_SUBSTEPS};

fn valid_dt(dt: f32) -> bool {
    dt.is_finite() && dt > 0.0
}

/// Sub-step count and length for `dt`.
///
/// No sub-step exceeds `max_substep`. When more than `MAX_SUBSTEPS` would be
/// needed the count is capped and the leftover time is dropped.
pub(super) fn substeps(dt: f32, max_substep: f32) -> (u32, f32) {
    if !(max_substep > 0.0) {
        return (1, dt);
    }
    // Float slack so e.g. 0.1 / 0.02 stays at 5
    let n = (dt / max_substep - 1.0e-4).ceil();
    if !n.is_finite() || n < 1.0 {
        return (1, dt);
    }
    if n > MAX_SUBSTEPS as f32 {
        let kept = MAX_SUBSTEPS as f32 * max_substep;
        log::warn!(
            "dt {} needs {} sub-steps, capping at {} and dropping {}s",
            dt,
            n,
            MAX_SUBSTEPS,
            dt - kept
        );
        return (MAX_SUBSTEPS, max_substep);
    }
    let n = n as u32;
    (n, dt / n as f32)
}

pub(super) fn update_bodies(
    world: &mut PhysicsWorld,
    objects: &mut [WorldObject],
    dt: f32,
    events: &mut dyn PhysicsEventSink,
) {
    let perf_on = world.perf_enabled;
    if perf_on {
        world.perf_stats.reset();
    }
    if !world.settings.physics_enabled || !valid_dt(dt) {
        return;
    }
    let mut clock = PhaseClock::arm(perf_on);
    run_pipeline(world, objects, dt, events);
    if perf_on {
        world.perf_stats.substeps = 1;
        world.perf_stats.step_ms = clock.split();
    }
}

pub(super) fn step(
    world: &mut PhysicsWorld,
    objects: &mut [WorldObject],
    dt: f32,
    events: &mut dyn PhysicsEventSink,
) -> u32 {
    let perf_on = world.perf_enabled;
    if perf_on {
        world.perf_stats.reset();
    }
    if !world.settings.physics_enabled || !valid_dt(dt) {
        return 0;
    }

    let mut clock = PhaseClock::arm(perf_on);
    let (n, h) = substeps(dt, world.settings.max_substep);
    for _ in 0..n {
        run_pipeline(world, objects, h, events);
    }

    if perf_on {
        world.perf_stats.substeps = n;
        world.perf_stats.step_ms = clock.split();
    }
    n
}

/// One full pass: laws -> field -> bonds -> integrate -> collide
fn run_pipeline(
    world: &mut PhysicsWorld,
    objects: &mut [WorldObject],
    dt: f32,
    events: &mut dyn PhysicsEventSink,
) {
    let perf_on = world.perf_enabled;

    let mut clock = PhaseClock::arm(perf_on);
    let bodies = sync_bodies(world, objects);
    accumulate_law_forces(world, objects, dt);
    let laws_ms = clock.split();

    let field_pairs = apply_field_forces(world, objects, events);
    let field_ms = clock.split();

    let (bonds_created, bond_forces) = apply_bond_step(world, objects);
    let bonds_ms = clock.split();

    integrate_objects(world, objects, dt);
    let integrate_ms = clock.split();

    let timestamp = world.time + dt as f64;
    let record = world.settings.record_relations;
    refresh_boxes(objects, &mut world.boxes);
    let collisions = detect_and_resolve(
        objects,
        &mut world.boxes,
        &mut world.bodies,
        &world.laws,
        world.ground,
        timestamp,
        |event: CollisionEvent| {
            events.on_collision(&event);
            if record {
                events.on_relation(&RelationRecord {
                    from: event.object_a,
                    to: event.object_b,
                    kind: RelationKind::Collision,
                    strength: event.impact_force,
                });
            }
        },
    );
    let collision_ms = clock.split();

    world.time = timestamp;
    world.frame += 1;

    if perf_on {
        let stats = &mut world.perf_stats;
        stats.laws_ms += laws_ms;
        stats.field_ms += field_ms;
        stats.bonds_ms += bonds_ms;
        stats.integrate_ms += integrate_ms;
        stats.collision_ms += collision_ms;
        stats.bodies = bodies;
        stats.field_pairs += field_pairs;
        stats.bond_forces += bond_forces;
        stats.bonds_created += bonds_created;
        stats.pair_checks += collisions.pair_checks;
        stats.collisions += collisions.resolved;
    }
}

fn integrate_objects(world: &mut PhysicsWorld, objects: &mut [WorldObject], dt: f32) {
    // Legacy mode carries its own linear drag; laws express drag explicitly
    let air = if world.laws.is_empty() { world.settings.air_drag } else { 0.0 };
    let ground_y = world.settings.ground_y;
    for obj in objects.iter_mut() {
        if world.ground == Some(obj.handle) {
            continue;
        }
        let Some(body) = world.bodies.get_mut(obj.handle) else {
            continue;
        };
        let mut position = obj.position();
        integrate(body, &mut position, dt, air, ground_y);
        obj.set_position(position);
    }
}

pub(super) fn update_viewer(world: &mut PhysicsWorld, viewer: &mut ViewerBody, dt: f32) -> bool {
    if !valid_dt(dt) {
        return false;
    }
    let (n, h) = substeps(dt, world.settings.max_substep);
    let mut simulated = false;
    for _ in 0..n {
        simulated = player::update_viewer(viewer, &world.laws, &world.settings, h);
        if !simulated {
            break;
        }
    }
    simulated
}
