use crate::particles::ParticleStore;
use crate::starform::StarFormationParams;

/// Density reported for a candidate probe that finds nothing at all within
/// its search radius, so downstream ratios never divide by zero.
const LOCAL_DENSITY_FLOOR: f64 = 1.0e-5;

/// Counts the alive neighbors of particle `idx` strictly inside `radius`.
/// The particle itself is not counted; a dead probe has no neighbors.
pub fn count_neighbors(store: &ParticleStore, idx: usize, radius: f64) -> usize {
    if !store.alive[idx] {
        return 0;
    }
    let r2 = radius * radius;
    let mut count = 0;
    for j in 0..store.len() {
        if j == idx || !store.alive[j] {
            continue;
        }
        if store.distance2(idx, j) < r2 {
            count += 1;
        }
    }
    count
}

/// Local density around particle `idx`: the summed mass of every alive
/// particle (itself included) strictly inside `radius`.
///
/// Returns a tiny floor value when nothing is found so callers comparing
/// against thresholds never see an exact zero, and `0.0` for a dead probe.
pub fn local_mass_density(store: &ParticleStore, idx: usize, radius: f64) -> f64 {
    if !store.alive[idx] {
        return 0.0;
    }
    let r2 = radius * radius;
    let mut rho = 0.0;
    let mut found = 0;
    for j in 0..store.len() {
        if !store.alive[j] {
            continue;
        }
        if store.distance2(idx, j) < r2 {
            rho += store.mass[j];
            found += 1;
        }
    }
    if found == 0 {
        return LOCAL_DENSITY_FLOOR;
    }
    rho
}

/// Scans the alive population for collapse candidates.
///
/// A particle qualifies when it has at least `min_neighbors` neighbors
/// within `neighbor_radius` and the local mass density in the same sphere
/// reaches `min_density`. Returns candidate indices in ascending order.
pub fn detect_candidates(store: &ParticleStore, params: &StarFormationParams) -> Vec<usize> {
    store.assert_coherent();
    let mut candidates = Vec::new();
    for i in 0..store.len() {
        if !store.alive[i] {
            continue;
        }
        let neighbors = count_neighbors(store, i, params.neighbor_radius);
        if neighbors < params.min_neighbors {
            continue;
        }
        let rho = local_mass_density(store, i, params.neighbor_radius);
        if rho >= params.min_density {
            candidates.push(i);
        }
    }
    candidates
}
