//! Scene Physics - point-mass simulation core for 3D scenes, native and WASM
//!
//! Architecture:
//! - core/          - Math primitives
//! - domain/        - Objects, handles, settings, outbound events
//! - systems/       - Rigid bodies, laws, bonds, gravity field, collision, viewer
//! - simulation/    - PhysicsWorld orchestration + WASM facade

pub mod core;
pub mod domain;
pub mod systems;
pub mod simulation;

// Short paths for the systems
pub use systems::bonds;
pub use systems::collision;
pub use systems::gravity_field;
pub use systems::laws;
pub use systems::player;
pub use systems::rigid_body;

use wasm_bindgen::prelude::*;

// Re-export wasm-bindgen-rayon for thread pool initialization
#[cfg(all(feature = "parallel", target_arch = "wasm32"))]
pub use wasm_bindgen_rayon::init_thread_pool;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the module
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    web_sys::console::log_1(&"Scene physics WASM module initialized".into());
}

/// Get crate version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use crate::core::math::{Quat, Vec3};
pub use domain::events::{CollisionEvent, EventLog, NullSink, PhysicsEventSink, RelationKind, RelationRecord};
pub use domain::handle::{HandleAllocator, ObjectHandle};
pub use domain::object::{GeometryType, Transform, WorldObject};
pub use domain::settings::PhysicsSettings;
pub use simulation::{PhysicsScene, PhysicsWorld, StepStats, MAX_SUBSTEPS};
