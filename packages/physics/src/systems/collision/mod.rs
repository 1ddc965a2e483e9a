//! Discrete AABB collision: box refresh, pairwise overlap scan and
//! minimum-penetration positional correction. No restitution.

mod aabb;
mod detect;
mod resolve;

pub use aabb::{CollisionBox, LOCAL_HALF_EXTENT};
pub use detect::{detect_and_resolve, refresh_boxes, CollisionStats};
pub use resolve::{min_penetration_axis, resolve_pair, Resolution, SEPARATION_EPSILON};
