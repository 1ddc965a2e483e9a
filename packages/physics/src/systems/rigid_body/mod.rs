//! RigidBody - point-mass state attached to a world object
//!
//! Bodies carry translation only: mass, velocity and the force accumulated
//! during the current step. Positions live on the object's transform.

mod body;
mod integrate;
mod registry;

pub use body::{RigidBody, MIN_MASS};
pub use integrate::{integrate, GROUND_EPSILON};
pub use registry::BodyRegistry;
