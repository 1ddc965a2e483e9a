use wasm_bindgen::prelude::*;

/// Snapshot of the last `step` / `update_bodies` call.
///
/// Phase timings accumulate over every sub-step of the call.
#[wasm_bindgen]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepStats {
    pub(super) step_ms: f64,
    pub(super) laws_ms: f64,
    pub(super) field_ms: f64,
    pub(super) bonds_ms: f64,
    pub(super) integrate_ms: f64,
    pub(super) collision_ms: f64,
    pub(super) bodies: u32,
    pub(super) field_pairs: u32,
    pub(super) bond_forces: u32,
    pub(super) bonds_created: u32,
    pub(super) pair_checks: u32,
    pub(super) collisions: u32,
    pub(super) substeps: u32,
}

impl StepStats {
    pub(crate) fn reset(&mut self) {
        *self = StepStats::default();
    }
}

#[wasm_bindgen]
impl StepStats {
    #[wasm_bindgen(getter)]
    pub fn step_ms(&self) -> f64 { self.step_ms }
    #[wasm_bindgen(getter)]
    pub fn laws_ms(&self) -> f64 { self.laws_ms }
    #[wasm_bindgen(getter)]
    pub fn field_ms(&self) -> f64 { self.field_ms }
    #[wasm_bindgen(getter)]
    pub fn bonds_ms(&self) -> f64 { self.bonds_ms }
    #[wasm_bindgen(getter)]
    pub fn integrate_ms(&self) -> f64 { self.integrate_ms }
    #[wasm_bindgen(getter)]
    pub fn collision_ms(&self) -> f64 { self.collision_ms }
    #[wasm_bindgen(getter)]
    pub fn bodies(&self) -> u32 { self.bodies }
    #[wasm_bindgen(getter)]
    pub fn field_pairs(&self) -> u32 { self.field_pairs }
    #[wasm_bindgen(getter)]
    pub fn bond_forces(&self) -> u32 { self.bond_forces }
    #[wasm_bindgen(getter)]
    pub fn bonds_created(&self) -> u32 { self.bonds_created }
    #[wasm_bindgen(getter)]
    pub fn pair_checks(&self) -> u32 { self.pair_checks }
    #[wasm_bindgen(getter)]
    pub fn collisions(&self) -> u32 { self.collisions }
    #[wasm_bindgen(getter)]
    pub fn substeps(&self) -> u32 { self.substeps }
}
