use crate::particles::ParticleStore;

/// Floor added to the cubed pair distance so exactly coincident particles
/// cannot produce an infinite force even with zero softening.
const INV_R3_FLOOR: f64 = 1.0e-20;

/// Computes gravitational accelerations by direct pairwise summation.
///
/// For every alive pair (i, j) with i < j the softened Newtonian
/// interaction is accumulated symmetrically: `+G·m_j/d³ · r` on i and
/// `-G·m_i/d³ · r` on j, where `d = sqrt(|r|² + softening²)`. The result
/// overwrites the acceleration arrays of the store; dead particles keep
/// zero acceleration and contribute nothing.
///
/// The summation order is fixed (ascending pair indices), so repeated calls
/// on the same configuration are bitwise deterministic.
///
/// # Examples
///
/// ```
/// use rs_starform::gravity::compute_gravity;
/// use rs_starform::particles::ParticleStore;
///
/// let mut store = ParticleStore::new(2);
/// store.x[0] = -1.0;
/// store.x[1] = 1.0;
/// compute_gravity(&mut store, 1.0, 0.0);
/// // The two unit masses attract each other along x.
/// assert!(store.ax[0] > 0.0);
/// assert!(store.ax[1] < 0.0);
/// ```
pub fn compute_gravity(store: &mut ParticleStore, g: f64, softening: f64) {
    store.assert_coherent();
    store.clear_accelerations();

    let n = store.len();
    let eps2 = softening * softening;

    for i in 0..n {
        if !store.alive[i] {
            continue;
        }
        for j in (i + 1)..n {
            if !store.alive[j] {
                continue;
            }
            let dx = store.x[j] - store.x[i];
            let dy = store.y[j] - store.y[i];
            let dz = store.z[j] - store.z[i];
            let r2 = dx * dx + dy * dy + dz * dz;
            let denom = (r2 + eps2).sqrt();
            let inv_r3 = 1.0 / (denom * denom * denom + INV_R3_FLOOR);
            let s = g * inv_r3;

            // acceleration on i due to j, and the equal-and-opposite partner
            store.ax[i] += s * store.mass[j] * dx;
            store.ay[i] += s * store.mass[j] * dy;
            store.az[i] += s * store.mass[j] * dz;

            store.ax[j] -= s * store.mass[i] * dx;
            store.ay[j] -= s * store.mass[i] * dy;
            store.az[j] -= s * store.mass[i] * dz;
        }
    }
}
