//! PhysicsWorld - explicit simulation context
//!
//! Owns every registry (bodies, laws, bonds, auto-bond rules) so several
//! isolated simulations can coexist. The scene keeps ownership of its objects
//! and lends them to each step as a slice.
//!
//! Step order (strict, synchronous):
//! laws -> gravity field -> bonds -> integration -> collision -> events

use std::collections::HashMap;

use crate::core::math::Vec3;
use crate::domain::events::PhysicsEventSink;
use crate::domain::handle::ObjectHandle;
use crate::domain::object::{GeometryType, WorldObject};
use crate::domain::settings::PhysicsSettings;
use crate::gravity_field::FieldSample;
use crate::bonds::{AutoBondRule, AutoBondRules, Bond, BondRecord, BondRegistry};
use crate::collision::CollisionBox;
use crate::laws::{LawRegistry, PhysicsLaw};
use crate::player::ViewerBody;
use crate::rigid_body::{BodyRegistry, RigidBody};

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "step/step_forces.rs"]
mod step_forces;
#[path = "step/step.rs"]
mod step;
#[path = "commands/commands.rs"]
mod commands;
#[path = "rigid/rigid.rs"]
mod rigid;
#[path = "field/field.rs"]
mod field;
#[path = "persist/persist.rs"]
mod persist;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
mod facade;

pub use facade::PhysicsScene;
pub use perf_stats::StepStats;

use perf_timer::PhaseClock;

/// Upper bound on sub-steps per `step` call
pub const MAX_SUBSTEPS: u32 = 256;

/// The simulation context
pub struct PhysicsWorld {
    settings: PhysicsSettings,
    bodies: BodyRegistry,
    laws: LawRegistry,
    bonds: BondRegistry,
    auto_bonds: AutoBondRules,
    ground: Option<ObjectHandle>,

    // Scratch reused between steps
    boxes: Vec<CollisionBox>,
    index: HashMap<ObjectHandle, usize>,

    // State
    time: f64,
    frame: u64,

    // Perf metrics
    perf_enabled: bool,
    perf_stats: StepStats,
}

impl PhysicsWorld {
    pub fn new() -> Self {
        init::create_physics_world(PhysicsSettings::default())
    }

    pub fn with_settings(settings: PhysicsSettings) -> Self {
        init::create_physics_world(settings)
    }

    /// Simulation time in seconds
    pub fn time(&self) -> f64 { self.time }

    /// Number of pipeline runs so far (one per sub-step)
    pub fn frame(&self) -> u64 { self.frame }

    // === SETTINGS ===

    pub fn settings(&self) -> &PhysicsSettings {
        &self.settings
    }

    pub fn load_settings_json(&mut self, json: &str) -> Result<(), String> {
        settings::load_settings_json(self, json)
    }

    pub fn set_gravity_accel(&mut self, g: f32) {
        settings::set_gravity_accel(self, g);
    }

    pub fn set_air_drag(&mut self, drag: f32) {
        settings::set_air_drag(self, drag);
    }

    pub fn set_ground_y(&mut self, y: f32) {
        settings::set_ground_y(self, y);
    }

    pub fn set_physics_enabled(&mut self, enabled: bool) {
        settings::set_physics_enabled(self, enabled);
    }

    pub fn set_default_mass(&mut self, mass: f32) {
        settings::set_default_mass(self, mass);
    }

    pub fn set_max_substep(&mut self, seconds: f32) {
        settings::set_max_substep(self, seconds);
    }

    pub fn set_record_relations(&mut self, enabled: bool) {
        settings::set_record_relations(self, enabled);
    }

    /// Designate the object treated as the ground (excluded from dynamics)
    pub fn set_ground_object(&mut self, ground: Option<ObjectHandle>) {
        settings::set_ground_object(self, ground);
    }

    pub fn ground_object(&self) -> Option<ObjectHandle> {
        self.ground
    }

    /// Enable or disable per-step perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    /// Last step perf snapshot (zeros when perf disabled)
    pub fn perf_stats(&self) -> StepStats {
        self.perf_stats.clone()
    }

    // === GRAVITY FIELD TUNABLES / DEBUG ===

    pub fn gravity_constant(&self) -> f32 {
        self.settings.gravity_constant
    }

    pub fn set_gravity_constant(&mut self, g: f32) {
        field::set_gravity_constant(self, g);
    }

    pub fn softening(&self) -> f32 {
        self.settings.softening
    }

    pub fn set_softening(&mut self, epsilon: f32) {
        field::set_softening(self, epsilon);
    }

    /// Field acceleration at `point` from the active GravityField participants
    pub fn sample_gravity_field(&self, objects: &[WorldObject], point: Vec3) -> Vec3 {
        field::sample_gravity_field(self, objects, point)
    }

    pub fn sample_gravity_field_grid(
        &self,
        objects: &[WorldObject],
        min: Vec3,
        max: Vec3,
        resolution: [u32; 3],
    ) -> Vec<FieldSample> {
        field::sample_gravity_field_grid(self, objects, min, max, resolution)
    }

    // === BODY API ===

    pub fn get_or_create_body(&mut self, object: &WorldObject) -> &mut RigidBody {
        rigid::get_or_create_body(self, object)
    }

    pub fn body(&self, handle: ObjectHandle) -> Option<&RigidBody> {
        self.bodies.get(handle)
    }

    pub fn body_mut(&mut self, handle: ObjectHandle) -> Option<&mut RigidBody> {
        self.bodies.get_mut(handle)
    }

    pub fn apply_impulse(&mut self, handle: ObjectHandle, impulse: Vec3) -> bool {
        rigid::apply_impulse(self, handle, impulse)
    }

    /// Deregister a destroyed object: its body and every bond touching it
    pub fn remove_body(&mut self, handle: ObjectHandle) -> bool {
        rigid::remove_body(self, handle)
    }

    pub fn clear_bodies(&mut self) {
        rigid::clear_bodies(self);
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    // === LAW API ===

    pub fn add_law(&mut self, law: PhysicsLaw) -> u32 {
        commands::add_law(self, law)
    }

    pub fn remove_law(&mut self, id: u32) -> bool {
        commands::remove_law(self, id)
    }

    pub fn set_law_enabled(&mut self, id: u32, enabled: bool) -> bool {
        commands::set_law_enabled(self, id, enabled)
    }

    pub fn update_law<F>(&mut self, id: u32, f: F) -> bool
    where
        F: FnOnce(&mut PhysicsLaw),
    {
        self.laws.update_law(id, f)
    }

    pub fn get_law(&self, id: u32) -> Option<&PhysicsLaw> {
        self.laws.get_law(id)
    }

    pub fn laws(&self) -> &[PhysicsLaw] {
        self.laws.laws()
    }

    pub fn clear_laws(&mut self) {
        commands::clear_laws(self);
    }

    // === BOND API ===

    pub fn add_bond(&mut self, a: ObjectHandle, b: ObjectHandle, rest_length: f32, strength: f32) -> bool {
        commands::add_bond(self, Bond::new(a, b, rest_length, strength))
    }

    pub fn remove_bond(&mut self, a: ObjectHandle, b: ObjectHandle) -> bool {
        commands::remove_bond(self, a, b)
    }

    pub fn has_bond(&self, a: ObjectHandle, b: ObjectHandle) -> bool {
        self.bonds.contains(a, b)
    }

    pub fn bonds(&self) -> &[Bond] {
        self.bonds.bonds()
    }

    pub fn bonds_of(&self, handle: ObjectHandle) -> Vec<Bond> {
        self.bonds.bonds_of(handle).copied().collect()
    }

    pub fn clear_bonds(&mut self) {
        commands::clear_bonds(self);
    }

    pub fn set_auto_bond(&mut self, a: GeometryType, b: GeometryType, enabled: bool) {
        commands::set_auto_bond(self, a, b, enabled);
    }

    pub fn get_auto_bond(&self, a: GeometryType, b: GeometryType) -> bool {
        self.auto_bonds.get(a, b)
    }

    pub fn auto_bond_rules(&self) -> Vec<AutoBondRule> {
        self.auto_bonds.to_rules()
    }

    /// Drop bodies, laws, bonds, auto-bond rules and the ground designation
    pub fn clear(&mut self) {
        commands::clear(self);
    }

    // === PERSISTENCE ===

    pub fn laws_to_json(&self) -> Result<String, String> {
        persist::laws_to_json(self)
    }

    /// Replace the law registry from JSON; returns the number of laws loaded
    pub fn load_laws_json(&mut self, json: &str) -> Result<usize, String> {
        persist::load_laws_json(self, json)
    }

    pub fn bonds_to_records(&self, objects: &[WorldObject]) -> Vec<BondRecord> {
        persist::bonds_to_records(self, objects)
    }

    /// Re-resolve persisted bonds against live objects; returns bonds restored
    pub fn restore_bonds(&mut self, records: &[BondRecord], objects: &[WorldObject]) -> usize {
        persist::restore_bonds(self, records, objects)
    }

    pub fn bonds_to_json(&self, objects: &[WorldObject]) -> Result<String, String> {
        persist::bonds_to_json(self, objects)
    }

    pub fn load_bonds_json(&mut self, json: &str, objects: &[WorldObject]) -> Result<usize, String> {
        persist::load_bonds_json(self, json, objects)
    }

    pub fn auto_bonds_to_json(&self) -> Result<String, String> {
        persist::auto_bonds_to_json(self)
    }

    pub fn load_auto_bonds_json(&mut self, json: &str) -> Result<usize, String> {
        persist::load_auto_bonds_json(self, json)
    }

    // === STEPPING ===

    /// Run the full pipeline once with `dt`
    pub fn update_bodies(&mut self, objects: &mut [WorldObject], dt: f32, events: &mut dyn PhysicsEventSink) {
        step::update_bodies(self, objects, dt, events);
    }

    /// Advance by `dt`, split into sub-steps no longer than `max_substep`.
    /// Past `MAX_SUBSTEPS` the remaining time is dropped, so simulated time
    /// may advance less than `dt`. Returns the number of sub-steps run.
    pub fn step(&mut self, objects: &mut [WorldObject], dt: f32, events: &mut dyn PhysicsEventSink) -> u32 {
        step::step(self, objects, dt, events)
    }

    /// Advance the viewer / avatar body by `dt` (sub-stepped and capped like `step`)
    pub fn update_viewer(&mut self, viewer: &mut ViewerBody, dt: f32) -> bool {
        step::update_viewer(self, viewer, dt)
    }

    /// Boxes computed by the last collision pass, parallel to that step's objects
    pub fn collision_boxes(&self) -> &[CollisionBox] {
        &self.boxes
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
