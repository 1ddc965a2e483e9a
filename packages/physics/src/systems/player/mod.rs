//! Viewer / avatar point mass.
//!
//! A single persistent body that follows the same Gravity and AirResistance
//! laws as world objects, without targeting or collision.

use serde::{Deserialize, Serialize};

use crate::core::math::Vec3;
use crate::domain::settings::PhysicsSettings;
use crate::systems::laws::{basic_law_force, LawKind, LawRegistry};
use crate::systems::rigid_body::{integrate, RigidBody};

pub const VIEWER_DEFAULT_MASS: f32 = 70.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewerMode {
    #[default]
    Physical,
    Spectator,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ViewerBody {
    pub body: RigidBody,
    pub position: Vec3,
    pub mode: ViewerMode,
    pub flying: bool,
}

impl ViewerBody {
    pub fn new(position: Vec3) -> Self {
        Self {
            body: RigidBody::new(VIEWER_DEFAULT_MASS),
            position,
            mode: ViewerMode::Physical,
            flying: false,
        }
    }

    /// True when the viewer takes part in simulation this step
    pub fn is_simulated(&self, settings: &PhysicsSettings) -> bool {
        settings.physics_enabled && self.mode == ViewerMode::Physical && !self.flying
    }
}

impl Default for ViewerBody {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

/// Advance the viewer by `dt`. Returns false when the viewer was skipped.
pub fn update_viewer(viewer: &mut ViewerBody, laws: &LawRegistry, settings: &PhysicsSettings, dt: f32) -> bool {
    if !viewer.is_simulated(settings) {
        viewer.body.velocity = Vec3::ZERO;
        viewer.body.clear_forces();
        return false;
    }

    viewer.body.clear_forces();
    let air = if laws.is_empty() {
        let mass = viewer.body.effective_mass();
        viewer.body.apply_force(Vec3::new(0.0, -settings.gravity_accel * mass, 0.0));
        settings.air_drag
    } else {
        for law in laws.laws().iter().filter(|l| l.enabled) {
            if !matches!(law.kind, LawKind::Gravity | LawKind::AirResistance) {
                continue;
            }
            if let Some(force) = basic_law_force(law, &viewer.body) {
                viewer.body.apply_force(force);
            }
        }
        0.0
    };

    integrate(&mut viewer.body, &mut viewer.position, dt, air, settings.ground_y);
    true
}
