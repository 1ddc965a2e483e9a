//! Field sampling for visualization. Never touches simulation state.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::core::math::Vec3;

use super::pairwise::MIN_FIELD_SEPARATION;
use super::FieldParams;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldSample {
    pub point: Vec3,
    pub acceleration: Vec3,
}

/// Acceleration a unit test mass would feel at `point`.
///
/// `sources` are (position, mass) pairs.
pub fn sample_acceleration(point: Vec3, sources: &[(Vec3, f32)], params: FieldParams) -> Vec3 {
    let mut acc = Vec3::ZERO;
    for &(pos, mass) in sources {
        let delta = pos - point;
        let dist_sq = delta.length_squared();
        let dist = dist_sq.sqrt();
        if !(dist > MIN_FIELD_SEPARATION) {
            continue;
        }
        let magnitude = params.pair_magnitude(1.0, mass, dist_sq);
        let contribution = delta * (magnitude / dist);
        if contribution.is_finite() {
            acc += contribution;
        }
    }
    acc
}

/// Sample a regular lattice spanning `min..=max` with `resolution` points per axis
pub fn sample_grid(
    min: Vec3,
    max: Vec3,
    resolution: [u32; 3],
    sources: &[(Vec3, f32)],
    params: FieldParams,
) -> Vec<FieldSample> {
    let [nx, ny, nz] = resolution.map(|n| n.max(1));
    let step = |lo: f32, hi: f32, n: u32, i: u32| {
        if n == 1 {
            (lo + hi) * 0.5
        } else {
            lo + (hi - lo) * (i as f32 / (n - 1) as f32)
        }
    };

    let points: Vec<Vec3> = (0..nz)
        .flat_map(|k| (0..ny).flat_map(move |j| (0..nx).map(move |i| (i, j, k))))
        .map(|(i, j, k)| {
            Vec3::new(step(min.x, max.x, nx, i), step(min.y, max.y, ny, j), step(min.z, max.z, nz, k))
        })
        .collect();

    #[cfg(feature = "parallel")]
    let iter = points.into_par_iter();
    #[cfg(not(feature = "parallel"))]
    let iter = points.into_iter();

    iter.map(|point| FieldSample { point, acceleration: sample_acceleration(point, sources, params) })
        .collect()
}
