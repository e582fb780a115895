use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::gravity::{compute_gravity, compute_gravity_tree, Octree};
use crate::particles::ParticleStore;

fn random_cloud(n: usize, seed: u64) -> ParticleStore {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut store = ParticleStore::new(n);
    for i in 0..n {
        store.x[i] = rng.random_range(-1.0..1.0);
        store.y[i] = rng.random_range(-1.0..1.0);
        store.z[i] = rng.random_range(-1.0..1.0);
        store.mass[i] = rng.random_range(0.5..2.0);
    }
    store
}

#[test]
fn test_root_aggregates_total_mass() {
    let store = random_cloud(64, 7);
    let tree = Octree::build(&store);
    let expected: f64 = store.mass.iter().sum();
    assert!((tree.total_mass() - expected).abs() < 1.0e-9);
}

#[test]
fn test_dead_particles_are_not_inserted() {
    let mut store = random_cloud(10, 3);
    store.kill(0);
    store.kill(5);
    let tree = Octree::build(&store);
    let expected: f64 = (0..10).filter(|&i| store.alive[i]).map(|i| store.mass[i]).sum();
    assert!((tree.total_mass() - expected).abs() < 1.0e-9);
}

#[test]
fn test_empty_population_builds_unit_box() {
    let mut store = ParticleStore::new(4);
    for i in 0..4 {
        store.kill(i);
    }
    let tree = Octree::build(&store);
    assert_eq!(tree.total_mass(), 0.0);

    compute_gravity_tree(&mut store, 1.0, 0.01, 0.6);
    assert!(store.ax.iter().all(|&a| a == 0.0));
}

#[test]
fn test_all_coincident_particles_do_not_crash() {
    let mut store = ParticleStore::new(8);
    for i in 0..8 {
        store.x[i] = 0.25;
        store.y[i] = 0.25;
        store.z[i] = 0.25;
    }
    compute_gravity_tree(&mut store, 1.0, 0.01, 0.6);
    for i in 0..8 {
        assert!(store.ax[i].is_finite());
        assert!(store.ay[i].is_finite());
        assert!(store.az[i].is_finite());
    }
}

#[test]
fn test_theta_zero_matches_direct_sum() {
    let mut tree_store = random_cloud(50, 11);
    let mut direct_store = tree_store.clone();

    compute_gravity(&mut direct_store, 1.0, 0.01);
    compute_gravity_tree(&mut tree_store, 1.0, 0.01, 0.0);

    for i in 0..50 {
        assert!((tree_store.ax[i] - direct_store.ax[i]).abs() < 1.0e-9);
        assert!((tree_store.ay[i] - direct_store.ay[i]).abs() < 1.0e-9);
        assert!((tree_store.az[i] - direct_store.az[i]).abs() < 1.0e-9);
    }
}

/// Maximum acceleration error of the tree against the direct sum, scaled
/// by the mean direct acceleration magnitude (per-particle relative error
/// blows up for particles whose net force happens to cancel).
fn max_relative_error(reference: &ParticleStore, approximate: &ParticleStore) -> f64 {
    let n = reference.len();
    let mean_norm: f64 = (0..n)
        .map(|i| {
            let (ax, ay, az) = (reference.ax[i], reference.ay[i], reference.az[i]);
            (ax * ax + ay * ay + az * az).sqrt()
        })
        .sum::<f64>()
        / n as f64;

    let mut worst: f64 = 0.0;
    for i in 0..n {
        let dx = approximate.ax[i] - reference.ax[i];
        let dy = approximate.ay[i] - reference.ay[i];
        let dz = approximate.az[i] - reference.az[i];
        let err = (dx * dx + dy * dy + dz * dz).sqrt() / mean_norm;
        worst = worst.max(err);
    }
    worst
}

#[test]
fn test_error_does_not_shrink_as_theta_grows() {
    let base = random_cloud(200, 42);
    let mut reference = base.clone();
    compute_gravity(&mut reference, 1.0, 0.01);

    let thetas = [0.0, 0.3, 0.6, 1.0];
    let mut errors = Vec::new();
    for &theta in &thetas {
        let mut approx_store = base.clone();
        compute_gravity_tree(&mut approx_store, 1.0, 0.01, theta);
        errors.push(max_relative_error(&reference, &approx_store));
    }

    // theta = 0 is exact-equivalent
    assert!(errors[0] < 1.0e-9, "theta=0 error was {}", errors[0]);
    // errors stay bounded for sane opening angles
    for (theta, err) in thetas.iter().zip(&errors) {
        assert!(err.is_finite() && *err < 0.5, "theta={} error={}", theta, err);
    }
    // opening the tree wider must not improve on the exact traversal
    assert!(errors[thetas.len() - 1] >= errors[0]);
}

#[test]
fn test_distant_cluster_is_well_approximated() {
    // A tight far-away clump should act like a single point mass.
    let mut store = ParticleStore::new(5);
    store.x[0] = 0.0; // probe particle
    for i in 1..5 {
        store.x[i] = 100.0 + (i as f64) * 1.0e-3;
        store.y[i] = (i as f64) * 1.0e-3;
    }
    let mut reference = store.clone();
    compute_gravity(&mut reference, 1.0, 0.0);
    compute_gravity_tree(&mut store, 1.0, 0.0, 0.8);

    let rel = (store.ax[0] - reference.ax[0]).abs() / reference.ax[0].abs();
    assert!(rel < 1.0e-3, "relative error {}", rel);
}
