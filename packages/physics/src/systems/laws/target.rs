//! Law targeting.
//!
//! A `LawTarget` is a composite predicate over world objects. Every active
//! filter must pass. The runtime explicit-object list is a fast path: a hit
//! counts as a match on its own, but the other active filters are still
//! applied afterwards.

use serde::{Deserialize, Serialize};

use crate::domain::handle::ObjectHandle;
use crate::domain::object::{GeometryType, WorldObject};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LawTarget {
    pub all_objects: bool,

    pub limit_by_geometry: bool,
    pub geometry_types: Vec<GeometryType>,

    pub limit_by_object_type: bool,
    pub object_types: Vec<String>,

    pub limit_by_attribute: bool,
    pub attribute_key: String,
    /// Empty means "key present with any value"
    pub attribute_value: String,

    pub limit_by_tag: bool,
    pub tag: String,

    pub limit_by_explicit_list: bool,
    pub identifiers: Vec<String>,

    /// Live object references; not persisted
    #[serde(skip)]
    pub explicit_objects: Vec<ObjectHandle>,
}

impl LawTarget {
    pub fn all() -> Self {
        Self { all_objects: true, ..Self::default() }
    }

    /// Matches nothing until a filter is added
    pub fn none() -> Self {
        Self::default()
    }

    pub fn geometry(types: impl IntoIterator<Item = GeometryType>) -> Self {
        Self { limit_by_geometry: true, geometry_types: types.into_iter().collect(), ..Self::default() }
    }

    pub fn object_types<S: Into<String>>(types: impl IntoIterator<Item = S>) -> Self {
        Self {
            limit_by_object_type: true,
            object_types: types.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn attribute(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            limit_by_attribute: true,
            attribute_key: key.into(),
            attribute_value: value.into(),
            ..Self::default()
        }
    }

    pub fn tagged(tag: impl Into<String>) -> Self {
        Self { limit_by_tag: true, tag: tag.into(), ..Self::default() }
    }

    pub fn identifiers<S: Into<String>>(ids: impl IntoIterator<Item = S>) -> Self {
        Self {
            limit_by_explicit_list: true,
            identifiers: ids.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn objects(handles: impl IntoIterator<Item = ObjectHandle>) -> Self {
        Self { explicit_objects: handles.into_iter().collect(), ..Self::default() }
    }

    pub fn and_tag(mut self, tag: impl Into<String>) -> Self {
        self.limit_by_tag = true;
        self.tag = tag.into();
        self
    }

    pub fn and_geometry(mut self, types: impl IntoIterator<Item = GeometryType>) -> Self {
        self.limit_by_geometry = true;
        self.geometry_types = types.into_iter().collect();
        self
    }

    pub fn and_objects(mut self, handles: impl IntoIterator<Item = ObjectHandle>) -> Self {
        self.explicit_objects.extend(handles);
        self
    }

    fn has_active_filter(&self) -> bool {
        self.limit_by_geometry
            || self.limit_by_object_type
            || self.limit_by_attribute
            || self.limit_by_tag
            || self.limit_by_explicit_list
    }
}

/// Does `target` select `object`?
pub fn object_matches_target(object: &WorldObject, target: &LawTarget) -> bool {
    if target.all_objects {
        return true;
    }

    // Explicit hit counts as a match but still falls through to the filters.
    let explicit_hit = !target.explicit_objects.is_empty()
        && target.explicit_objects.contains(&object.handle);

    if !explicit_hit && !target.has_active_filter() {
        return false;
    }

    if target.limit_by_explicit_list && !target.identifiers.iter().any(|id| *id == object.identifier) {
        return false;
    }

    if target.limit_by_geometry && !target.geometry_types.contains(&object.geometry) {
        return false;
    }

    if target.limit_by_object_type && !target.object_types.iter().any(|t| *t == object.object_type) {
        return false;
    }

    if target.limit_by_attribute {
        match object.attribute(&target.attribute_key) {
            None => return false,
            Some(v) if !target.attribute_value.is_empty() && v != target.attribute_value => return false,
            Some(_) => {}
        }
    }

    if target.limit_by_tag && !object.has_tag(&target.tag) {
        return false;
    }

    true
}
