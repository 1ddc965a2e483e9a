//! Small fixed-size math types used by the physics core.

mod quat;
mod vec3;

pub use quat::Quat;
pub use vec3::Vec3;
