use std::collections::HashSet;

use super::law::{LawKind, PhysicsLaw};

/// Ordered law list; evaluation order is insertion order
pub struct LawRegistry {
    laws: Vec<PhysicsLaw>,
    /// `None` once the counter has run past `u32::MAX`
    next_id: Option<u32>,
}

impl LawRegistry {
    pub fn new() -> Self {
        Self { laws: Vec::new(), next_id: Some(1) }
    }

    /// Next unused id. Ids count up; after the counter is exhausted the
    /// lowest id not held by a live law is handed out instead.
    fn fresh_id(&mut self) -> u32 {
        if let Some(id) = self.next_id {
            self.next_id = id.checked_add(1);
            if self.next_id.is_none() {
                log::warn!("law id counter exhausted, reusing free ids from now on");
            }
            return id;
        }
        let mut used: Vec<u32> = self.laws.iter().map(|l| l.id).filter(|&id| id != 0).collect();
        used.sort_unstable();
        let mut id = 1;
        for u in used {
            if u == id {
                id += 1;
            } else if u > id {
                break;
            }
        }
        id
    }

    /// Append a law, assigning a fresh id
    pub fn add_law(&mut self, mut law: PhysicsLaw) -> u32 {
        let id = self.fresh_id();
        law.id = id;
        log::debug!("law {} '{}' ({:?}) added", id, law.name, law.kind);
        self.laws.push(law);
        id
    }

    /// Returns false if no law has this id
    pub fn remove_law(&mut self, id: u32) -> bool {
        if let Some(idx) = self.laws.iter().position(|l| l.id == id) {
            self.laws.remove(idx);
            return true;
        }
        log::debug!("remove_law: no law with id {}", id);
        false
    }

    pub fn set_law_enabled(&mut self, id: u32, enabled: bool) -> bool {
        self.update_law(id, |law| law.enabled = enabled)
    }

    /// Mutate a law in place. The id is restored afterwards.
    pub fn update_law<F>(&mut self, id: u32, f: F) -> bool
    where
        F: FnOnce(&mut PhysicsLaw),
    {
        let Some(law) = self.laws.iter_mut().find(|l| l.id == id) else {
            log::debug!("update_law: no law with id {}", id);
            return false;
        };
        f(law);
        law.id = id;
        true
    }

    pub fn get_law(&self, id: u32) -> Option<&PhysicsLaw> {
        self.laws.iter().find(|l| l.id == id)
    }

    pub fn laws(&self) -> &[PhysicsLaw] {
        &self.laws
    }

    pub fn is_empty(&self) -> bool {
        self.laws.is_empty()
    }

    pub fn len(&self) -> usize {
        self.laws.len()
    }

    pub fn first_enabled(&self, kind: LawKind) -> Option<&PhysicsLaw> {
        self.laws.iter().find(|l| l.enabled && l.kind == kind)
    }

    pub fn has_enabled(&self, kind: LawKind) -> bool {
        self.first_enabled(kind).is_some()
    }

    pub fn enabled_of_kind(&self, kind: LawKind) -> impl Iterator<Item = &PhysicsLaw> {
        self.laws.iter().filter(move |l| l.enabled && l.kind == kind)
    }

    pub fn clear(&mut self) {
        self.laws.clear();
        self.next_id = Some(1);
    }

    /// Swap in a restored set, keeping stored ids.
    ///
    /// Zero or repeated ids get fresh ones; the counter continues past the
    /// highest kept id.
    pub fn replace_all(&mut self, laws: Vec<PhysicsLaw>) {
        let mut kept = HashSet::new();
        let mut pending = Vec::new();
        for (i, law) in laws.iter().enumerate() {
            if law.id == 0 || !kept.insert(law.id) {
                pending.push(i);
            }
        }
        let max_id = kept.iter().copied().max().unwrap_or(0);

        self.laws = laws;
        self.next_id = max_id.checked_add(1);
        for &i in &pending {
            self.laws[i].id = 0;
        }
        for i in pending {
            let id = self.fresh_id();
            self.laws[i].id = id;
        }
    }
}

impl Default for LawRegistry {
    fn default() -> Self {
        Self::new()
    }
}
