use crate::particles::ParticleStore;

/// Applies one step of cooling to every alive particle.
///
/// Velocities are damped by `1 - velocity_damping` (a crude stand-in for
/// kinetic energy radiated away) and temperatures decay by
/// `1 - cooling_rate`, floored at zero. Both factors are per-step, not
/// per-unit-time; typical values are in the 1e-4 .. 1e-2 range.
pub fn apply_cooling(store: &mut ParticleStore, velocity_damping: f64, cooling_rate: f64) {
    store.assert_coherent();
    let damp = 1.0 - velocity_damping;
    let cool = 1.0 - cooling_rate;
    for i in 0..store.len() {
        if !store.alive[i] {
            continue;
        }
        store.vx[i] *= damp;
        store.vy[i] *= damp;
        store.vz[i] *= damp;

        store.temperature[i] = (store.temperature[i] * cool).max(0.0);
    }
}

/// Refreshes the pressure of every alive particle from the ideal-gas law
/// `p = rho * T`, after densities and temperatures have been updated.
pub fn refresh_ideal_gas_pressure(store: &mut ParticleStore) {
    store.assert_coherent();
    for i in 0..store.len() {
        if !store.alive[i] {
            continue;
        }
        store.pressure[i] = store.density[i] * store.temperature[i];
    }
}
