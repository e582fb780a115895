//! Symplectic leapfrog (velocity Verlet) building blocks.
//!
//! A full step is: half kick with the current accelerations, full drift with
//! the updated velocities, force recomputation at the new positions, second
//! half kick. The driver owns the force recomputation between the two
//! kicks; splitting the integrator into `half_kick` and `drift` keeps that
//! ordering explicit at the call site. A plain Euler ordering drifts in
//! energy and momentum over long runs and is not an acceptable substitute.

use crate::particles::ParticleStore;

/// Advances every alive particle's velocity by half a kick:
/// `v += 0.5 * a * dt`.
pub fn half_kick(store: &mut ParticleStore, dt: f64) {
    store.assert_coherent();
    for i in 0..store.len() {
        if !store.alive[i] {
            continue;
        }
        store.vx[i] += 0.5 * store.ax[i] * dt;
        store.vy[i] += 0.5 * store.ay[i] * dt;
        store.vz[i] += 0.5 * store.az[i] * dt;
    }
}

/// Advances every alive particle's position by a full drift:
/// `x += v * dt`.
pub fn drift(store: &mut ParticleStore, dt: f64) {
    store.assert_coherent();
    for i in 0..store.len() {
        if !store.alive[i] {
            continue;
        }
        store.x[i] += store.vx[i] * dt;
        store.y[i] += store.vy[i] * dt;
        store.z[i] += store.vz[i] * dt;
    }
}
