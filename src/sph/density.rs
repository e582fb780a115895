use std::f64::consts::PI;

use rayon::prelude::*;

use crate::particles::ParticleStore;
use crate::sph::kernels::{cubic_spline, support_radius};

/// Floor applied to the neighbor-sphere volume in the kNN estimate so a
/// degenerate (zero) neighbor distance cannot divide by zero.
const VOLUME_FLOOR: f64 = 1.0e-12;

/// Density assigned to a particle with no usable neighbors.
const DENSITY_FLOOR: f64 = 1.0e-5;

/// SPH kernel-summation density estimate.
///
/// For every alive particle i, sums `mass[j] * W(|r_ij|, h)` over all alive
/// particles within the kernel support (2h). `include_self` controls whether
/// the particle's own mass contributes `m_i * W(0, h)`; standard SPH
/// includes it so an isolated particle still reports a positive density.
///
/// Every particle scans the full population, so each call is O(N²);
/// density has no neighbor acceleration structure.
pub fn compute_density_sph(store: &mut ParticleStore, h: f64, include_self: bool) {
    store.assert_coherent();
    let n = store.len();
    let support = support_radius(h);
    let support2 = support * support;

    let snapshot: &ParticleStore = store;
    let densities: Vec<f64> = (0..n)
        .into_par_iter()
        .map(|i| {
            if !snapshot.alive[i] {
                return 0.0;
            }
            let (xi, yi, zi) = snapshot.position(i);
            let mut rho = 0.0;
            for j in 0..n {
                if !snapshot.alive[j] {
                    continue;
                }
                if j == i {
                    if include_self {
                        rho += snapshot.mass[i] * cubic_spline(0.0, h);
                    }
                    continue;
                }
                let dx = snapshot.x[j] - xi;
                let dy = snapshot.y[j] - yi;
                let dz = snapshot.z[j] - zi;
                let r2 = dx * dx + dy * dy + dz * dz;
                if r2 > support2 {
                    continue;
                }
                rho += snapshot.mass[j] * cubic_spline(r2.sqrt(), h);
            }
            rho
        })
        .collect();

    store.density.copy_from_slice(&densities);
}

/// k-nearest-neighbor volumetric density estimate.
///
/// For every alive particle, finds the distance `r_k` to its k-th nearest
/// alive neighbor and estimates `rho = k / ((4/3) pi r_k^3)`. When fewer
/// than `k` neighbors exist, the estimate degrades gracefully to the
/// farthest available neighbor; a particle with no neighbors at all gets a
/// tiny floor density instead of zero.
pub fn compute_density_knn(store: &mut ParticleStore, k: usize) {
    store.assert_coherent();
    if k == 0 {
        return;
    }
    let n = store.len();

    let snapshot: &ParticleStore = store;
    let densities: Vec<f64> = (0..n)
        .into_par_iter()
        .map(|i| {
            if !snapshot.alive[i] {
                return 0.0;
            }
            let (xi, yi, zi) = snapshot.position(i);
            let mut dists: Vec<f64> = Vec::with_capacity(n.saturating_sub(1));
            for j in 0..n {
                if j == i || !snapshot.alive[j] {
                    continue;
                }
                let dx = snapshot.x[j] - xi;
                let dy = snapshot.y[j] - yi;
                let dz = snapshot.z[j] - zi;
                dists.push((dx * dx + dy * dy + dz * dz).sqrt());
            }
            if dists.is_empty() {
                return DENSITY_FLOOR;
            }
            let kk = k.min(dists.len()) - 1;
            dists.select_nth_unstable_by(kk, f64::total_cmp);
            let r_k = dists[kk];
            let volume = ((4.0 / 3.0) * PI * r_k * r_k * r_k).max(VOLUME_FLOOR);
            (kk + 1) as f64 / volume
        })
        .collect();

    store.density.copy_from_slice(&densities);
}
