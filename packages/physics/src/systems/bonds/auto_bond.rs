use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::object::GeometryType;

/// Default parameters for bonds created by the auto-bond pass
pub const AUTO_BOND_REST_LENGTH: f32 = 2.0;
pub const AUTO_BOND_STRENGTH: f32 = 5.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoBondRule {
    pub a: GeometryType,
    pub b: GeometryType,
    pub enabled: bool,
}

/// Symmetric geometry-pair flags
#[derive(Clone, Debug, Default)]
pub struct AutoBondRules {
    rules: BTreeMap<(GeometryType, GeometryType), bool>,
}

#[inline]
fn key(a: GeometryType, b: GeometryType) -> (GeometryType, GeometryType) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

impl AutoBondRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, a: GeometryType, b: GeometryType, enabled: bool) {
        self.rules.insert(key(a, b), enabled);
    }

    pub fn get(&self, a: GeometryType, b: GeometryType) -> bool {
        self.rules.get(&key(a, b)).copied().unwrap_or(false)
    }

    pub fn any_enabled(&self) -> bool {
        self.rules.values().any(|&on| on)
    }

    pub fn to_rules(&self) -> Vec<AutoBondRule> {
        self.rules
            .iter()
            .map(|(&(a, b), &enabled)| AutoBondRule { a, b, enabled })
            .collect()
    }

    pub fn load_rules(&mut self, rules: &[AutoBondRule]) {
        self.rules.clear();
        for r in rules {
            self.set(r.a, r.b, r.enabled);
        }
    }

    pub fn clear(&mut self) {
        self.rules.clear();
    }
}
