use std::collections::HashMap;

use crate::bonds::{AutoBondRule, Bond, BondRecord};
use crate::domain::handle::ObjectHandle;
use crate::domain::object::WorldObject;
use crate::laws::PhysicsLaw;

use super::PhysicsWorld;

pub(super) fn laws_to_json(world: &PhysicsWorld) -> Result<String, String> {
    serde_json::to_string(world.laws.laws()).map_err(|e| format!("Failed to serialize laws: {}", e))
}

pub(super) fn load_laws_json(world: &mut PhysicsWorld, json: &str) -> Result<usize, String> {
    let laws: Vec<PhysicsLaw> =
        serde_json::from_str(json).map_err(|e| format!("Invalid laws JSON: {}", e))?;
    let count = laws.len();
    world.laws.replace_all(laws);
    log::info!("loaded {} physics law(s)", count);
    Ok(count)
}

pub(super) fn bonds_to_records(world: &PhysicsWorld, objects: &[WorldObject]) -> Vec<BondRecord> {
    let identifiers: HashMap<ObjectHandle, &str> =
        objects.iter().map(|o| (o.handle, o.identifier.as_str())).collect();

    world
        .bonds
        .bonds()
        .iter()
        .filter_map(|bond| {
            let a = identifiers.get(&bond.a)?;
            let b = identifiers.get(&bond.b)?;
            Some(BondRecord {
                a: (*a).to_string(),
                b: (*b).to_string(),
                rest_length: bond.rest_length,
                strength: bond.strength,
            })
        })
        .collect()
}

pub(super) fn restore_bonds(world: &mut PhysicsWorld, records: &[BondRecord], objects: &[WorldObject]) -> usize {
    let handles: HashMap<&str, ObjectHandle> =
        objects.iter().map(|o| (o.identifier.as_str(), o.handle)).collect();

    let mut restored = 0;
    for record in records {
        let (Some(&a), Some(&b)) = (handles.get(record.a.as_str()), handles.get(record.b.as_str())) else {
            log::debug!("skipping bond {} <-> {}: object not found", record.a, record.b);
            continue;
        };
        if world.bonds.add_bond(Bond::new(a, b, record.rest_length, record.strength)) {
            restored += 1;
        }
    }
    restored
}

pub(super) fn bonds_to_json(world: &PhysicsWorld, objects: &[WorldObject]) -> Result<String, String> {
    serde_json::to_string(&bonds_to_records(world, objects))
        .map_err(|e| format!("Failed to serialize bonds: {}", e))
}

pub(super) fn load_bonds_json(world: &mut PhysicsWorld, json: &str, objects: &[WorldObject]) -> Result<usize, String> {
    let records: Vec<BondRecord> =
        serde_json::from_str(json).map_err(|e| format!("Invalid bonds JSON: {}", e))?;
    Ok(restore_bonds(world, &records, objects))
}

pub(super) fn auto_bonds_to_json(world: &PhysicsWorld) -> Result<String, String> {
    serde_json::to_string(&world.auto_bonds.to_rules())
        .map_err(|e| format!("Failed to serialize auto-bond rules: {}", e))
}

pub(super) fn load_auto_bonds_json(world: &mut PhysicsWorld, json: &str) -> Result<usize, String> {
    let rules: Vec<AutoBondRule> =
        serde_json::from_str(json).map_err(|e| format!("Invalid auto-bond JSON: {}", e))?;
    world.auto_bonds.load_rules(&rules);
    Ok(rules.len())
}
