use std::collections::HashMap;

use wasm_bindgen::prelude::*;

use crate::core::math::Vec3;
use crate::domain::events::EventLog;
use crate::domain::handle::HandleAllocator;
use crate::domain::object::{GeometryType, WorldObject};
use crate::laws::PhysicsLaw;

use super::perf_stats::StepStats;
use super::PhysicsWorld;

/// JS-facing scene: owns the objects and the physics world.
///
/// Objects are addressed by their persistent identifier.
#[wasm_bindgen]
pub struct PhysicsScene {
    world: PhysicsWorld,
    objects: Vec<WorldObject>,
    by_identifier: HashMap<String, usize>,
    handles: HandleAllocator,
    events: EventLog,
}

impl PhysicsScene {
    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut PhysicsWorld {
        &mut self.world
    }

    pub fn objects(&self) -> &[WorldObject] {
        &self.objects
    }

    pub fn object(&self, identifier: &str) -> Option<&WorldObject> {
        self.by_identifier.get(identifier).map(|&i| &self.objects[i])
    }

    fn object_mut(&mut self, identifier: &str) -> Option<&mut WorldObject> {
        let i = *self.by_identifier.get(identifier)?;
        Some(&mut self.objects[i])
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    pub fn try_spawn(&mut self, identifier: &str, geometry: &str, position: Vec3) -> Result<(), String> {
        if self.by_identifier.contains_key(identifier) {
            return Err(format!("Object '{}' already exists", identifier));
        }
        let geometry = GeometryType::parse(geometry).ok_or_else(|| format!("Unknown geometry '{}'", geometry))?;
        let handle = self.handles.allocate();
        let object = WorldObject::new(handle, identifier, geometry).with_position(position);
        self.by_identifier.insert(identifier.to_string(), self.objects.len());
        self.objects.push(object);
        Ok(())
    }

    pub fn try_add_law_json(&mut self, json: &str) -> Result<u32, String> {
        let law: PhysicsLaw = serde_json::from_str(json).map_err(|e| format!("Invalid law JSON: {}", e))?;
        Ok(self.world.add_law(law))
    }

    pub fn try_set_auto_bond(&mut self, a: &str, b: &str, enabled: bool) -> Result<(), String> {
        let ga = GeometryType::parse(a).ok_or_else(|| format!("Unknown geometry '{}'", a))?;
        let gb = GeometryType::parse(b).ok_or_else(|| format!("Unknown geometry '{}'", b))?;
        self.world.set_auto_bond(ga, gb, enabled);
        Ok(())
    }

    pub fn collisions_json(&self) -> Result<String, String> {
        serde_json::to_string(&self.events.collisions).map_err(|e| format!("Failed to serialize events: {}", e))
    }
}

fn js_err(e: String) -> JsValue {
    JsValue::from_str(&e)
}

#[wasm_bindgen]
impl PhysicsScene {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            world: PhysicsWorld::new(),
            objects: Vec::new(),
            by_identifier: HashMap::new(),
            handles: HandleAllocator::new(),
            events: EventLog::new(),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> u64 { self.world.frame() }

    #[wasm_bindgen(getter)]
    pub fn time(&self) -> f64 { self.world.time() }

    #[wasm_bindgen(getter)]
    pub fn object_count(&self) -> usize { self.objects.len() }

    pub fn load_settings(&mut self, json: String) -> Result<(), JsValue> {
        self.world.load_settings_json(&json).map_err(js_err)
    }

    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.world.enable_perf_metrics(enabled);
    }

    /// Last step perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> StepStats {
        self.world.perf_stats()
    }

    pub fn set_gravity_accel(&mut self, g: f32) {
        self.world.set_gravity_accel(g);
    }

    pub fn set_air_drag(&mut self, drag: f32) {
        self.world.set_air_drag(drag);
    }

    pub fn set_ground_y(&mut self, y: f32) {
        self.world.set_ground_y(y);
    }

    pub fn set_physics_enabled(&mut self, enabled: bool) {
        self.world.set_physics_enabled(enabled);
    }

    pub fn set_gravity_constant(&mut self, g: f32) {
        self.world.set_gravity_constant(g);
    }

    pub fn set_softening(&mut self, epsilon: f32) {
        self.world.set_softening(epsilon);
    }

    // === OBJECTS ===

    pub fn spawn_object(&mut self, identifier: String, geometry: String, x: f32, y: f32, z: f32) -> Result<(), JsValue> {
        self.try_spawn(&identifier, &geometry, Vec3::new(x, y, z)).map_err(js_err)
    }

    /// Destroy an object and everything physics holds for it
    pub fn remove_object(&mut self, identifier: &str) -> bool {
        let Some(i) = self.by_identifier.remove(identifier) else {
            return false;
        };
        let removed = self.objects.swap_remove(i);
        if let Some(moved) = self.objects.get(i) {
            self.by_identifier.insert(moved.identifier.clone(), i);
        }
        self.world.remove_body(removed.handle);
        self.handles.release(removed.handle);
        true
    }

    pub fn set_position(&mut self, identifier: &str, x: f32, y: f32, z: f32) -> bool {
        match self.object_mut(identifier) {
            Some(obj) => {
                obj.set_position(Vec3::new(x, y, z));
                true
            }
            None => false,
        }
    }

    pub fn set_scale(&mut self, identifier: &str, x: f32, y: f32, z: f32) -> bool {
        match self.object_mut(identifier) {
            Some(obj) => {
                obj.transform.scale = Vec3::new(x, y, z);
                true
            }
            None => false,
        }
    }

    pub fn set_object_type(&mut self, identifier: &str, object_type: String) -> bool {
        match self.object_mut(identifier) {
            Some(obj) => {
                obj.object_type = object_type;
                true
            }
            None => false,
        }
    }

    pub fn set_attribute(&mut self, identifier: &str, key: String, value: String) -> bool {
        match self.object_mut(identifier) {
            Some(obj) => {
                obj.attributes.insert(key, value);
                true
            }
            None => false,
        }
    }

    pub fn add_tag(&mut self, identifier: &str, tag: String) -> bool {
        match self.object_mut(identifier) {
            Some(obj) => obj.tags.insert(tag),
            None => false,
        }
    }

    /// `[x, y, z]`, or undefined for unknown objects
    pub fn position(&self, identifier: &str) -> Option<Vec<f32>> {
        self.object(identifier).map(|o| o.position().to_array().to_vec())
    }

    /// Flat `[x, y, z, ...]` in spawn order (order shifts after removals)
    pub fn positions(&self) -> Vec<f32> {
        self.objects.iter().flat_map(|o| o.position().to_array()).collect()
    }

    pub fn set_ground(&mut self, identifier: Option<String>) -> bool {
        match identifier {
            None => {
                self.world.set_ground_object(None);
                true
            }
            Some(id) => match self.object(&id).map(|o| o.handle) {
                Some(handle) => {
                    self.world.set_ground_object(Some(handle));
                    true
                }
                None => false,
            },
        }
    }

    pub fn apply_impulse(&mut self, identifier: &str, x: f32, y: f32, z: f32) -> bool {
        let Some(i) = self.by_identifier.get(identifier).copied() else {
            return false;
        };
        self.world.get_or_create_body(&self.objects[i]);
        self.world.apply_impulse(self.objects[i].handle, Vec3::new(x, y, z))
    }

    // === STEPPING ===

    /// Advance by `dt` seconds. Events from earlier steps are dropped.
    pub fn step(&mut self, dt: f32) -> u32 {
        self.events.clear();
        self.world.step(&mut self.objects, dt, &mut self.events)
    }

    pub fn take_collisions_json(&mut self) -> Result<String, JsValue> {
        let json = self.collisions_json().map_err(js_err)?;
        self.events.collisions.clear();
        Ok(json)
    }

    // === LAWS ===

    pub fn add_law_json(&mut self, json: String) -> Result<u32, JsValue> {
        self.try_add_law_json(&json).map_err(js_err)
    }

    pub fn remove_law(&mut self, id: u32) -> bool {
        self.world.remove_law(id)
    }

    pub fn set_law_enabled(&mut self, id: u32, enabled: bool) -> bool {
        self.world.set_law_enabled(id, enabled)
    }

    pub fn laws_json(&self) -> Result<String, JsValue> {
        self.world.laws_to_json().map_err(js_err)
    }

    pub fn load_laws_json(&mut self, json: String) -> Result<usize, JsValue> {
        self.world.load_laws_json(&json).map_err(js_err)
    }

    // === BONDS ===

    pub fn add_bond(&mut self, a: &str, b: &str, rest_length: f32, strength: f32) -> bool {
        let (Some(ha), Some(hb)) = (self.object(a).map(|o| o.handle), self.object(b).map(|o| o.handle)) else {
            return false;
        };
        self.world.add_bond(ha, hb, rest_length, strength)
    }

    pub fn remove_bond(&mut self, a: &str, b: &str) -> bool {
        let (Some(ha), Some(hb)) = (self.object(a).map(|o| o.handle), self.object(b).map(|o| o.handle)) else {
            return false;
        };
        self.world.remove_bond(ha, hb)
    }

    pub fn bonds_json(&self) -> Result<String, JsValue> {
        self.world.bonds_to_json(&self.objects).map_err(js_err)
    }

    pub fn load_bonds_json(&mut self, json: String) -> Result<usize, JsValue> {
        self.world.load_bonds_json(&json, &self.objects).map_err(js_err)
    }

    pub fn set_auto_bond(&mut self, a: String, b: String, enabled: bool) -> Result<(), JsValue> {
        self.try_set_auto_bond(&a, &b, enabled).map_err(js_err)
    }

    pub fn auto_bonds_json(&self) -> Result<String, JsValue> {
        self.world.auto_bonds_to_json().map_err(js_err)
    }

    // === DEBUG ===

    /// Field acceleration `[x, y, z]` at a point
    pub fn sample_field(&self, x: f32, y: f32, z: f32) -> Vec<f32> {
        self.world
            .sample_gravity_field(&self.objects, Vec3::new(x, y, z))
            .to_array()
            .to_vec()
    }

    /// Drop every object, body, law and bond
    pub fn clear(&mut self) {
        self.objects.clear();
        self.by_identifier.clear();
        self.handles = HandleAllocator::new();
        self.events.clear();
        self.world.clear();
    }
}

impl Default for PhysicsScene {
    fn default() -> Self {
        Self::new()
    }
}
