//! Pairwise N-body attraction and the read-only field sampler.
//!
//! Force between two participants is `G * mA * mB / (d² + ε²)` along their
//! separation. The softening term `ε` keeps close encounters bounded.

mod pairwise;
mod sampling;

pub use pairwise::{apply_gravity_field, field_participants, MIN_FIELD_SEPARATION};
pub use sampling::{sample_acceleration, sample_grid, FieldSample};

/// Tunables shared by the simulation pass and the sampler
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldParams {
    pub gravity_constant: f32,
    pub softening: f32,
}

impl FieldParams {
    #[inline]
    pub(crate) fn pair_magnitude(&self, mass_a: f32, mass_b: f32, dist_sq: f32) -> f32 {
        let eps_sq = self.softening * self.softening;
        self.gravity_constant * mass_a * mass_b / (dist_sq + eps_sq)
    }
}
