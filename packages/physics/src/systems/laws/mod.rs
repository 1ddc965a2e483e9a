//! Law registry and targeting evaluator.
//!
//! Laws are declarative force rules. External code registers them here and
//! the step loop evaluates them; the integrator never needs to know which
//! rules exist.

mod evaluate;
mod law;
mod registry;
mod target;

pub use evaluate::{apply_laws, basic_law_force, center_gravity_centroids};
pub use law::{CustomForceFn, LawKind, PhysicsLaw};
pub use registry::LawRegistry;
pub use target::{object_matches_target, LawTarget};
