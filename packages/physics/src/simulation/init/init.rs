use std::collections::HashMap;

use crate::bonds::{AutoBondRules, BondRegistry};
use crate::domain::settings::PhysicsSettings;
use crate::laws::LawRegistry;
use crate::rigid_body::BodyRegistry;

use super::perf_stats::StepStats;
use super::PhysicsWorld;

pub(super) fn create_physics_world(settings: PhysicsSettings) -> PhysicsWorld {
    let settings = match settings.validate() {
        Ok(()) => settings,
        Err(e) => {
            log::warn!("invalid physics settings ({}), using defaults", e);
            PhysicsSettings::default()
        }
    };

    PhysicsWorld {
        settings,
        bodies: BodyRegistry::new(),
        laws: LawRegistry::new(),
        bonds: BondRegistry::new(),
        auto_bonds: AutoBondRules::new(),
        ground: None,
        boxes: Vec::with_capacity(64),
        index: HashMap::with_capacity(64),
        time: 0.0,
        frame: 0,
        perf_enabled: false,
        perf_stats: StepStats::default(),
    }
}
