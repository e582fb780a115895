use crate::particles::ParticleStore;
use crate::sph::{compute_density_knn, compute_density_sph, cubic_spline};

#[test]
fn test_isolated_particle_density_is_finite_and_non_negative() {
    let mut store = ParticleStore::new(1);
    compute_density_sph(&mut store, 0.5, true);
    assert!(store.density[0].is_finite());
    assert!(store.density[0] > 0.0);
    // self-contribution only
    assert!((store.density[0] - cubic_spline(0.0, 0.5)).abs() < 1.0e-12);

    compute_density_sph(&mut store, 0.5, false);
    assert_eq!(store.density[0], 0.0);
}

#[test]
fn test_density_grows_with_each_added_neighbor() {
    let h = 0.5;
    let mut previous = 0.0;
    // Add neighbors one at a time at fixed positions inside the support.
    for extra in 0..4 {
        let n = 1 + extra;
        let mut store = ParticleStore::new(n);
        for j in 1..n {
            store.x[j] = 0.2 * j as f64; // all within 2h = 1.0
        }
        compute_density_sph(&mut store, h, true);
        assert!(
            store.density[0] > previous,
            "density did not grow with {} neighbors",
            extra
        );
        previous = store.density[0];
    }
}

#[test]
fn test_particles_beyond_support_do_not_contribute() {
    let h = 0.5;
    let mut lone = ParticleStore::new(1);
    compute_density_sph(&mut lone, h, true);

    let mut pair = ParticleStore::new(2);
    pair.x[1] = 5.0; // way beyond 2h
    compute_density_sph(&mut pair, h, true);

    assert_eq!(pair.density[0], lone.density[0]);
}

#[test]
fn test_dead_neighbors_are_excluded() {
    let h = 0.5;
    let mut store = ParticleStore::new(2);
    store.x[1] = 0.2;
    compute_density_sph(&mut store, h, true);
    let with_neighbor = store.density[0];

    store.kill(1);
    compute_density_sph(&mut store, h, true);
    assert!(store.density[0] < with_neighbor);
}

#[test]
fn test_knn_density_positive_for_cloud() {
    let mut store = ParticleStore::new(27);
    let mut idx = 0;
    for a in 0..3 {
        for b in 0..3 {
            for c in 0..3 {
                store.x[idx] = a as f64 * 0.1;
                store.y[idx] = b as f64 * 0.1;
                store.z[idx] = c as f64 * 0.1;
                idx += 1;
            }
        }
    }
    compute_density_knn(&mut store, 8);
    for i in 0..27 {
        assert!(store.density[i] > 0.0);
        assert!(store.density[i].is_finite());
    }
}

#[test]
fn test_knn_clamps_k_to_available_neighbors() {
    let mut store = ParticleStore::new(3);
    store.x[1] = 0.5;
    store.x[2] = 1.0;
    // k far larger than the population
    compute_density_knn(&mut store, 32);
    for i in 0..3 {
        assert!(store.density[i] > 0.0);
        assert!(store.density[i].is_finite());
    }
}

#[test]
fn test_knn_lone_particle_gets_floor_density() {
    let mut store = ParticleStore::new(1);
    compute_density_knn(&mut store, 8);
    assert!(store.density[0] > 0.0);
}

#[test]
fn test_knn_denser_region_reports_higher_density() {
    // 5 tightly packed + 5 spread out
    let mut store = ParticleStore::new(10);
    for i in 0..5 {
        store.x[i] = i as f64 * 0.01;
    }
    for i in 5..10 {
        store.x[i] = 10.0 + (i - 5) as f64 * 2.0;
    }
    compute_density_knn(&mut store, 3);
    assert!(store.density[0] > store.density[7]);
}
