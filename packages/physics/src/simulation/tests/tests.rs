use super::*;
use approx::assert_relative_eq;

use crate::domain::events::{EventLog, NullSink, RelationKind};
use crate::domain::object::GeometryType;
use crate::laws::{LawKind, LawTarget};
use crate::player::ViewerMode;

fn h(i: u32) -> ObjectHandle {
    ObjectHandle::new(i, 0)
}

fn cube(i: u32, x: f32, y: f32) -> WorldObject {
    WorldObject::new(h(i), format!("cube-{i}"), GeometryType::Cube).with_position(Vec3::new(x, y, 0.0))
}

fn sphere(i: u32, x: f32, y: f32) -> WorldObject {
    WorldObject::new(h(i), format!("sphere-{i}"), GeometryType::Sphere).with_position(Vec3::new(x, y, 0.0))
}

#[test]
fn legacy_gravity_matches_reference_velocity() {
    let mut world = PhysicsWorld::new();
    let mut objects = vec![cube(0, 0.0, 10.0)];

    world.update_bodies(&mut objects, 1.0 / 60.0, &mut NullSink);

    let body = world.body(h(0)).expect("body created lazily");
    assert_relative_eq!(body.velocity.y, -0.1635, epsilon = 1e-4);
    assert!(objects[0].position().y < 10.0);
}

#[test]
fn legacy_fall_clamps_at_ground() {
    let mut world = PhysicsWorld::new();
    let mut objects = vec![cube(0, 0.0, 0.05)];

    for _ in 0..30 {
        world.update_bodies(&mut objects, 1.0 / 60.0, &mut NullSink);
    }

    assert_eq!(objects[0].position().y, 0.0);
    assert_eq!(world.body(h(0)).map(|b| b.velocity.y), Some(0.0));
}

#[test]
fn single_gravity_law_is_semi_implicit() {
    let mut world = PhysicsWorld::new();
    world.add_law(PhysicsLaw::new("gravity", LawKind::Gravity).with_strength(9.81));
    let mut objects = vec![cube(0, 0.0, 10.0)];
    let dt = 0.01;

    world.update_bodies(&mut objects, dt, &mut NullSink);

    let body = world.body(h(0)).expect("body");
    assert_relative_eq!(body.velocity.y, -9.81 * dt, epsilon = 1e-6);
    assert_relative_eq!(objects[0].position().y, 10.0 - 9.81 * dt * dt, epsilon = 1e-5);
}

#[test]
fn overlapping_cubes_are_separated_with_one_event() {
    let mut world = PhysicsWorld::new();
    // Keep them above the ground and out of legacy gravity
    world.add_law(PhysicsLaw::new("noop", LawKind::CustomForce).with_strength(0.0));
    let mut objects = vec![cube(0, 0.0, 5.0), cube(1, 0.5, 5.0)];
    world.get_or_create_body(&objects[0]).velocity = Vec3::new(2.0, 0.0, 0.0);
    world.get_or_create_body(&objects[1]).velocity = Vec3::new(-1.0, 0.0, 0.0);

    let mut log = EventLog::new();
    world.update_bodies(&mut objects, 1.0 / 60.0, &mut log);

    let boxes = world.collision_boxes();
    assert!(!boxes[0].overlaps(&boxes[1]));
    assert!(boxes[0].max.x <= boxes[1].min.x);
    assert_eq!(world.body(h(0)).map(|b| b.velocity.x), Some(0.0));
    assert_eq!(world.body(h(1)).map(|b| b.velocity.x), Some(0.0));

    assert_eq!(log.collisions.len(), 1);
    let event = log.collisions[0];
    assert_eq!((event.object_a, event.object_b), (h(0), h(1)));
    assert_relative_eq!(event.impact_force, 3.0, epsilon = 1e-4);
    assert!(event.collision_normal.x > 0.99);
}

#[test]
fn collision_law_gates_resolution_by_target() {
    let mut world = PhysicsWorld::new();
    world.add_law(PhysicsLaw::new("collide", LawKind::Collision).with_target(LawTarget::tagged("solid")));
    let mut objects = vec![cube(0, 0.0, 5.0), cube(1, 0.5, 5.0)];

    let mut log = EventLog::new();
    world.update_bodies(&mut objects, 1.0 / 60.0, &mut log);
    assert!(log.collisions.is_empty());

    objects[1].tags.insert("solid".to_string());
    world.update_bodies(&mut objects, 1.0 / 60.0, &mut log);
    assert_eq!(log.collisions.len(), 1);
}

#[test]
fn ground_object_is_excluded() {
    let mut world = PhysicsWorld::new();
    let mut objects = vec![cube(0, 0.0, 0.0).with_scale(Vec3::new(100.0, 1.0, 100.0)), cube(1, 0.0, 0.2)];
    world.set_ground_object(Some(h(0)));

    let mut log = EventLog::new();
    world.update_bodies(&mut objects, 1.0 / 60.0, &mut log);

    assert!(log.collisions.is_empty());
    assert!(world.body(h(0)).is_none());
    assert_eq!(objects[0].position(), Vec3::ZERO);
}

#[test]
fn collision_relations_are_recorded_on_request() {
    let mut world = PhysicsWorld::new();
    world.set_record_relations(true);
    world.add_law(PhysicsLaw::new("noop", LawKind::CustomForce).with_strength(0.0));
    let mut objects = vec![cube(0, 0.0, 5.0), cube(1, 0.5, 5.0)];

    let mut log = EventLog::new();
    world.update_bodies(&mut objects, 1.0 / 60.0, &mut log);

    assert_eq!(log.relations.len(), 1);
    assert_eq!(log.relations[0].kind, RelationKind::Collision);
}

#[test]
fn bond_pulls_pair_toward_rest_length() {
    let mut world = PhysicsWorld::new();
    world.add_law(PhysicsLaw::new("noop", LawKind::CustomForce).with_strength(0.0));
    let mut objects = vec![sphere(0, 0.0, 5.0), sphere(1, 4.0, 5.0)];
    assert!(world.add_bond(h(0), h(1), 2.0, 3.0));
    assert!(!world.add_bond(h(1), h(0), 2.0, 3.0));

    world.update_bodies(&mut objects, 0.1, &mut NullSink);

    // k * delta = 3 * 2 = 6 N on unit masses over 0.1 s
    let va = world.body(h(0)).expect("a").velocity;
    let vb = world.body(h(1)).expect("b").velocity;
    assert_relative_eq!(va.x, 0.6, epsilon = 1e-5);
    assert_relative_eq!(vb.x, -0.6, epsilon = 1e-5);
}

#[test]
fn auto_bond_rule_is_symmetric_and_bonds_once() {
    let mut world = PhysicsWorld::new();
    world.add_law(PhysicsLaw::new("noop", LawKind::CustomForce).with_strength(0.0));
    world.set_auto_bond(GeometryType::Cube, GeometryType::Sphere, true);
    assert!(world.get_auto_bond(GeometryType::Sphere, GeometryType::Cube));

    let mut objects = vec![cube(0, 0.0, 5.0), sphere(1, 5.0, 5.0), sphere(2, 10.0, 5.0)];
    world.update_bodies(&mut objects, 1.0 / 60.0, &mut NullSink);
    world.update_bodies(&mut objects, 1.0 / 60.0, &mut NullSink);

    // sphere/sphere is not enabled
    assert_eq!(world.bonds().len(), 2);
    assert!(world.has_bond(h(1), h(0)));
    assert!(!world.has_bond(h(1), h(2)));
}

#[test]
fn gravity_field_attracts_matching_pair() {
    let mut world = PhysicsWorld::new();
    world.set_record_relations(true);
    world.add_law(PhysicsLaw::new("field", LawKind::GravityField).with_target(LawTarget::tagged("massive")));
    let mut objects = vec![
        sphere(0, 0.0, 5.0).with_tag("massive"),
        sphere(1, 2.0, 5.0).with_tag("massive"),
        sphere(2, 4.0, 5.0),
    ];

    let mut log = EventLog::new();
    world.update_bodies(&mut objects, 0.1, &mut log);

    let va = world.body(h(0)).expect("a").velocity;
    let vb = world.body(h(1)).expect("b").velocity;
    // G * 1 * 1 / (4 + 0.01) over 0.1 s
    let expected = 1.0 / 4.01 * 0.1;
    assert_relative_eq!(va.x, expected, epsilon = 1e-5);
    assert_relative_eq!(vb.x, -expected, epsilon = 1e-5);
    assert_eq!(world.body(h(2)).map(|b| b.velocity), Some(Vec3::ZERO));

    assert_eq!(log.relations.len(), 1);
    assert_eq!(log.relations[0].kind, RelationKind::Gravity);
}

#[test]
fn field_sampling_does_not_mutate() {
    let mut world = PhysicsWorld::new();
    world.add_law(PhysicsLaw::new("field", LawKind::GravityField));
    let objects = vec![sphere(0, 0.0, 0.0).with_attribute("mass", "4")];

    let acc = world.sample_gravity_field(&objects, Vec3::new(2.0, 0.0, 0.0));
    assert!(acc.x < 0.0);
    assert_relative_eq!(acc.x, -4.0 / 4.01, epsilon = 1e-5);
    assert_eq!(world.body_count(), 0);

    let grid = world.sample_gravity_field_grid(&objects, Vec3::splat(-1.0), Vec3::splat(1.0), [3, 3, 3]);
    assert_eq!(grid.len(), 27);
}

#[test]
fn center_gravity_pulls_toward_centroid() {
    let mut world = PhysicsWorld::new();
    world.add_law(PhysicsLaw::new("center", LawKind::CenterGravity).with_strength(2.0));
    let mut objects = vec![sphere(0, -3.0, 5.0), sphere(1, 3.0, 5.0)];

    // Bodies exist before centroids are taken
    world.update_bodies(&mut objects, 0.1, &mut NullSink);

    assert!(world.body(h(0)).expect("a").velocity.x > 0.0);
    assert!(world.body(h(1)).expect("b").velocity.x < 0.0);
}

#[test]
fn custom_law_closure_is_invoked() {
    let mut world = PhysicsWorld::new();
    world.add_law(
        PhysicsLaw::new("wind", LawKind::CustomForce)
            .with_custom(|_obj, body, _dt| {
                body.apply_force(Vec3::new(10.0, 0.0, 0.0));
            })
            .with_target(LawTarget::tagged("sail")),
    );
    let mut objects = vec![sphere(0, 0.0, 5.0).with_tag("sail"), sphere(1, 10.0, 5.0)];

    world.update_bodies(&mut objects, 0.1, &mut NullSink);

    assert_relative_eq!(world.body(h(0)).expect("sail").velocity.x, 1.0, epsilon = 1e-5);
    assert_eq!(world.body(h(1)).expect("other").velocity.x, 0.0);
}

#[test]
fn step_splits_large_dt_into_substeps() {
    let mut world = PhysicsWorld::new();
    world.enable_perf_metrics(true);
    let mut objects = vec![cube(0, 0.0, 100.0)];

    let n = world.step(&mut objects, 0.1, &mut NullSink);

    assert_eq!(n, 5);
    assert_eq!(world.frame(), 5);
    assert_relative_eq!(world.time(), 0.1, epsilon = 1e-6);
    assert_eq!(world.perf_stats().substeps(), 5);
    assert_eq!(world.perf_stats().bodies(), 1);
}

#[test]
fn step_caps_substeps_and_drops_excess_time() {
    let mut world = PhysicsWorld::new();
    let max_substep = world.settings().max_substep;
    let mut objects = vec![cube(0, 0.0, 1.0e6)];

    assert_eq!(world.step(&mut objects, 60.0, &mut NullSink), MAX_SUBSTEPS);

    // Every sub-step stays at max_substep; the rest of the 60 s is dropped
    assert_relative_eq!(world.time(), MAX_SUBSTEPS as f64 * max_substep as f64, epsilon = 1e-3);
    let v = world.body(h(0)).map(|b| b.velocity.y).unwrap_or(0.0);
    assert!(v > -10.0 * MAX_SUBSTEPS as f32 * max_substep);
}

#[test]
fn substeps_never_exceed_max_length() {
    for dt in [0.016, 0.1, 1.0, 5.12, 5.13, 60.0, 1.0e6] {
        let (n, len) = step::substeps(dt, 0.02);
        assert!(n >= 1 && n <= MAX_SUBSTEPS, "dt {dt}: {n} sub-steps");
        assert!(len <= 0.02 + 1e-6, "dt {dt}: sub-step {len}");
    }
    assert_eq!(step::substeps(0.1, 0.02), (5, 0.1 / 5.0));
}

#[test]
fn sparse_handle_index_steps_without_dense_allocation() {
    let mut world = PhysicsWorld::new();
    let far = ObjectHandle::new(200_000_000, 0);
    let mut objects = vec![WorldObject::new(far, "far", GeometryType::Cube).with_position(Vec3::new(0.0, 10.0, 0.0))];

    world.step(&mut objects, 0.05, &mut NullSink);

    assert_eq!(world.body_count(), 1);
    assert!(world.body(far).is_some_and(|b| b.velocity.y < 0.0));
    assert!(objects[0].position().y < 10.0);
}

#[test]
fn disabled_physics_and_bad_dt_do_nothing() {
    let mut world = PhysicsWorld::new();
    let mut objects = vec![cube(0, 0.0, 10.0)];

    assert_eq!(world.step(&mut objects, f32::NAN, &mut NullSink), 0);
    assert_eq!(world.step(&mut objects, -1.0, &mut NullSink), 0);
    world.set_physics_enabled(false);
    assert_eq!(world.step(&mut objects, 0.016, &mut NullSink), 0);

    assert_eq!(objects[0].position().y, 10.0);
    assert_eq!(world.frame(), 0);
}

#[test]
fn mass_attribute_resyncs_every_step() {
    let mut world = PhysicsWorld::new();
    let mut objects = vec![cube(0, 0.0, 10.0).with_attribute("mass", "5")];
    world.update_bodies(&mut objects, 0.01, &mut NullSink);
    assert_eq!(world.body(h(0)).map(|b| b.mass), Some(5.0));

    objects[0].set_mass_attribute(2.0);
    world.update_bodies(&mut objects, 0.01, &mut NullSink);
    assert_eq!(world.body(h(0)).map(|b| b.mass), Some(2.0));

    objects[0].attributes.insert("mass".into(), "heavy".into());
    world.update_bodies(&mut objects, 0.01, &mut NullSink);
    assert_eq!(world.body(h(0)).map(|b| b.mass), Some(2.0));
}

#[test]
fn remove_body_drops_bonds_and_ground() {
    let mut world = PhysicsWorld::new();
    let objects = vec![cube(0, 0.0, 0.0), cube(1, 3.0, 0.0)];
    world.get_or_create_body(&objects[0]);
    world.get_or_create_body(&objects[1]);
    world.add_bond(h(0), h(1), 1.0, 1.0);
    world.set_ground_object(Some(h(0)));

    assert!(world.remove_body(h(0)));
    assert!(!world.remove_body(h(0)));
    assert!(world.bonds_of(h(1)).is_empty());
    assert_eq!(world.ground_object(), None);
    assert_eq!(world.body_count(), 1);
}

#[test]
fn law_lookups_report_missing_ids() {
    let mut world = PhysicsWorld::new();
    let id = world.add_law(PhysicsLaw::new("g", LawKind::Gravity));
    assert!(world.set_law_enabled(id, false));
    assert!(!world.get_law(id).map(|l| l.enabled).unwrap_or(true));
    assert!(world.update_law(id, |law| law.strength = 3.0));
    assert_eq!(world.get_law(id).map(|l| l.strength), Some(3.0));
    assert!(world.remove_law(id));
    assert!(!world.remove_law(id));
    assert!(!world.set_law_enabled(id, true));
    assert!(!world.update_law(id, |_| {}));
}

#[test]
fn laws_round_trip_through_json() {
    let mut world = PhysicsWorld::new();
    world.add_law(PhysicsLaw::new("g", LawKind::Gravity).with_strength(4.0));
    world.add_law(
        PhysicsLaw::new("drag", LawKind::AirResistance)
            .with_target(LawTarget::geometry([GeometryType::Sphere]))
            .disabled(),
    );
    let json = world.laws_to_json().expect("serialize");

    let mut restored = PhysicsWorld::new();
    assert_eq!(restored.load_laws_json(&json), Ok(2));
    assert_eq!(restored.laws().len(), 2);
    assert_eq!(restored.laws()[0].strength, 4.0);
    assert!(!restored.laws()[1].enabled);
    assert!(restored.laws()[1].target.limit_by_geometry);

    // Fresh ids continue past the restored ones
    let next = restored.add_law(PhysicsLaw::new("extra", LawKind::Gravity));
    assert!(restored.laws().iter().filter(|l| l.id == next).count() == 1);
    assert!(next > restored.laws()[1].id);

    assert!(restored.load_laws_json("{not json").is_err());
}

#[test]
fn bonds_persist_by_identifier() {
    let mut world = PhysicsWorld::new();
    let objects = vec![cube(0, 0.0, 0.0), cube(1, 3.0, 0.0)];
    world.add_bond(h(0), h(1), 1.5, 2.5);
    let json = world.bonds_to_json(&objects).expect("serialize");
    assert!(json.contains("restLength"));

    // Same identifiers, new handles after reload
    let reloaded = vec![
        WorldObject::new(h(7), "cube-0", GeometryType::Cube),
        WorldObject::new(h(8), "cube-1", GeometryType::Cube),
    ];
    let mut restored = PhysicsWorld::new();
    assert_eq!(restored.load_bonds_json(&json, &reloaded), Ok(1));
    assert!(restored.has_bond(h(7), h(8)));

    let missing = vec![WorldObject::new(h(7), "cube-0", GeometryType::Cube)];
    let mut partial = PhysicsWorld::new();
    assert_eq!(partial.load_bonds_json(&json, &missing), Ok(0));
}

#[test]
fn auto_bond_rules_round_trip() {
    let mut world = PhysicsWorld::new();
    world.set_auto_bond(GeometryType::Sphere, GeometryType::Cube, true);
    let json = world.auto_bonds_to_json().expect("serialize");

    let mut restored = PhysicsWorld::new();
    assert_eq!(restored.load_auto_bonds_json(&json), Ok(1));
    assert!(restored.get_auto_bond(GeometryType::Cube, GeometryType::Sphere));
}

#[test]
fn viewer_uses_laws_without_targeting() {
    let mut world = PhysicsWorld::new();
    world.add_law(PhysicsLaw::new("g", LawKind::Gravity).with_strength(10.0).with_target(LawTarget::none()));
    let mut viewer = ViewerBody::new(Vec3::new(0.0, 5.0, 0.0));

    assert!(world.update_viewer(&mut viewer, 0.01));
    assert_relative_eq!(viewer.body.velocity.y, -0.1, epsilon = 1e-5);

    viewer.mode = ViewerMode::Spectator;
    assert!(!world.update_viewer(&mut viewer, 0.01));
    assert_eq!(viewer.body.velocity, Vec3::ZERO);
}

#[test]
fn clear_resets_registries() {
    let mut world = PhysicsWorld::new();
    let objects = vec![cube(0, 0.0, 0.0), cube(1, 1.0, 0.0)];
    world.get_or_create_body(&objects[0]);
    world.add_law(PhysicsLaw::new("g", LawKind::Gravity));
    world.add_bond(h(0), h(1), 1.0, 1.0);
    world.set_auto_bond(GeometryType::Cube, GeometryType::Cube, true);
    world.set_ground_object(Some(h(1)));

    world.clear();

    assert_eq!(world.body_count(), 0);
    assert!(world.laws().is_empty());
    assert!(world.bonds().is_empty());
    assert!(world.auto_bond_rules().is_empty());
    assert_eq!(world.ground_object(), None);
}

#[test]
fn settings_load_and_reject() {
    let mut world = PhysicsWorld::new();
    assert!(world.load_settings_json(r#"{"gravity_accel": 3.7, "max_substep": 0.01}"#).is_ok());
    assert_eq!(world.settings().gravity_accel, 3.7);
    assert_eq!(world.settings().air_drag, 0.1);

    assert!(world.load_settings_json(r#"{"max_substep": 0.0}"#).is_err());
    assert_eq!(world.settings().max_substep, 0.01);
}

#[test]
fn scene_facade_spawns_steps_and_reads_back() {
    let mut scene = PhysicsScene::new();
    scene.try_spawn("a", "cube", Vec3::new(0.0, 5.0, 0.0)).expect("spawn a");
    scene.try_spawn("b", "cube", Vec3::new(0.5, 5.0, 0.0)).expect("spawn b");
    assert!(scene.try_spawn("a", "cube", Vec3::ZERO).is_err());
    assert!(scene.try_spawn("c", "blob", Vec3::ZERO).is_err());

    scene.try_add_law_json(r#"{"type":"CustomForce","strength":0.0}"#).expect("law");
    assert_eq!(scene.step(1.0 / 60.0), 1);
    assert_eq!(scene.events().collisions.len(), 1);

    let a = scene.position("a").expect("a");
    let b = scene.position("b").expect("b");
    assert!(b[0] - a[0] >= 1.0);
    assert_eq!(scene.positions().len(), 6);

    assert!(scene.add_bond("a", "b", 1.0, 1.0));
    assert!(scene.remove_object("a"));
    assert!(scene.world().bonds().is_empty());
    assert!(scene.position("a").is_none());
    assert!(scene.position("b").is_some());
}

#[test]
fn scene_minimal_gravity_law_json_pulls_objects_down() {
    let mut scene = PhysicsScene::new();
    scene.try_spawn("a", "sphere", Vec3::new(0.0, 10.0, 0.0)).expect("spawn");
    let id = scene.try_add_law_json(r#"{"type":"Gravity"}"#).expect("law");
    assert!(id > 0);

    scene.step(0.1);

    let handle = scene.object("a").map(|o| o.handle).expect("object");
    let vy = scene.world().body(handle).map(|b| b.velocity.y).expect("body");
    assert_relative_eq!(vy, -0.981, epsilon = 1e-4);
    assert!(scene.position("a").expect("a")[1] < 10.0);
}
