use serde::{Deserialize, Serialize};

use crate::domain::handle::ObjectHandle;

/// Spring constraint between two objects (unordered)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bond {
    pub a: ObjectHandle,
    pub b: ObjectHandle,
    pub rest_length: f32,
    pub strength: f32,
}

impl Bond {
    pub fn new(a: ObjectHandle, b: ObjectHandle, rest_length: f32, strength: f32) -> Self {
        Self { a, b, rest_length, strength }
    }

    pub fn connects(&self, x: ObjectHandle, y: ObjectHandle) -> bool {
        (self.a == x && self.b == y) || (self.a == y && self.b == x)
    }

    pub fn involves(&self, h: ObjectHandle) -> bool {
        self.a == h || self.b == h
    }
}

/// Persisted form: identifiers instead of live handles
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BondRecord {
    pub a: String,
    pub b: String,
    #[serde(rename = "restLength")]
    pub rest_length: f32,
    pub strength: f32,
}

#[derive(Default)]
pub struct BondRegistry {
    bonds: Vec<Bond>,
}

impl BondRegistry {
    pub fn new() -> Self {
        Self { bonds: Vec::new() }
    }

    /// Insert a bond. Self-bonds, non-finite parameters and duplicates (in
    /// either order) are rejected with `false`.
    pub fn add_bond(&mut self, bond: Bond) -> bool {
        if bond.a == bond.b {
            log::debug!("add_bond: refusing self-bond on {}", bond.a);
            return false;
        }
        if !(bond.rest_length.is_finite() && bond.strength.is_finite()) {
            log::warn!("add_bond: non-finite parameters for {} - {}", bond.a, bond.b);
            return false;
        }
        if self.contains(bond.a, bond.b) {
            log::debug!("add_bond: {} - {} already bonded", bond.a, bond.b);
            return false;
        }
        self.bonds.push(bond);
        true
    }

    pub fn remove_bond(&mut self, a: ObjectHandle, b: ObjectHandle) -> bool {
        if let Some(idx) = self.bonds.iter().position(|bond| bond.connects(a, b)) {
            self.bonds.remove(idx);
            return true;
        }
        false
    }

    /// Drop every bond touching `h`; returns how many were removed
    pub fn remove_bonds_of(&mut self, h: ObjectHandle) -> usize {
        let before = self.bonds.len();
        self.bonds.retain(|bond| !bond.involves(h));
        before - self.bonds.len()
    }

    pub fn contains(&self, a: ObjectHandle, b: ObjectHandle) -> bool {
        self.bonds.iter().any(|bond| bond.connects(a, b))
    }

    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    pub fn bonds_of(&self, h: ObjectHandle) -> impl Iterator<Item = &Bond> {
        self.bonds.iter().filter(move |bond| bond.involves(h))
    }

    pub fn len(&self) -> usize {
        self.bonds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bonds.is_empty()
    }

    pub fn clear(&mut self) {
        self.bonds.clear();
    }
}
