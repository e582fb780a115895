//! Initial-condition generators.
//!
//! Every generator takes the random generator as an argument instead of
//! seeding a hidden global, so a run is fully reproducible from a single
//! seed and the generators stay side-effect-free.

use rand::Rng;

use crate::particles::ParticleStore;

/// Places every particle uniformly inside a ball of the given radius
/// (rejection sampling), at rest, with unit mass and temperature.
///
/// # Examples
///
/// ```
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use rs_starform::init::init_spherical_cloud;
/// use rs_starform::particles::ParticleStore;
///
/// let mut store = ParticleStore::new(100);
/// let mut rng = StdRng::seed_from_u64(42);
/// init_spherical_cloud(&mut store, 1.0, &mut rng);
/// for i in 0..100 {
///     let r2 = store.x[i].powi(2) + store.y[i].powi(2) + store.z[i].powi(2);
///     assert!(r2 <= 1.0);
/// }
/// ```
pub fn init_spherical_cloud<R: Rng>(store: &mut ParticleStore, radius: f64, rng: &mut R) {
    store.assert_coherent();
    for i in 0..store.len() {
        let (x, y, z) = loop {
            let x = rng.random_range(-radius..radius);
            let y = rng.random_range(-radius..radius);
            let z = rng.random_range(-radius..radius);
            if x * x + y * y + z * z <= radius * radius {
                break (x, y, z);
            }
        };
        store.x[i] = x;
        store.y[i] = y;
        store.z[i] = z;
        reset_particle_state(store, i);
    }
}

/// Places every particle uniformly inside an axis-aligned cube of the
/// given half extent.
pub fn init_uniform_box<R: Rng>(store: &mut ParticleStore, half_extent: f64, rng: &mut R) {
    store.assert_coherent();
    for i in 0..store.len() {
        store.x[i] = rng.random_range(-half_extent..half_extent);
        store.y[i] = rng.random_range(-half_extent..half_extent);
        store.z[i] = rng.random_range(-half_extent..half_extent);
        reset_particle_state(store, i);
    }
}

/// Scatters particles around `num_clumps` randomly placed clump centers.
///
/// Centers are drawn uniformly inside a cube of half extent `spread`, and
/// each particle lands uniformly within `clump_radius` of the center it is
/// assigned to (round-robin), producing an artificially clustered cloud
/// that collapses quickly.
pub fn init_clustered<R: Rng>(
    store: &mut ParticleStore,
    num_clumps: usize,
    clump_radius: f64,
    spread: f64,
    rng: &mut R,
) {
    store.assert_coherent();
    if num_clumps == 0 || store.is_empty() {
        return;
    }
    let centers: Vec<(f64, f64, f64)> = (0..num_clumps)
        .map(|_| {
            (
                rng.random_range(-spread..spread),
                rng.random_range(-spread..spread),
                rng.random_range(-spread..spread),
            )
        })
        .collect();

    for i in 0..store.len() {
        let (cx, cy, cz) = centers[i % num_clumps];
        store.x[i] = cx + rng.random_range(-clump_radius..clump_radius);
        store.y[i] = cy + rng.random_range(-clump_radius..clump_radius);
        store.z[i] = cz + rng.random_range(-clump_radius..clump_radius);
        reset_particle_state(store, i);
    }
}

fn reset_particle_state(store: &mut ParticleStore, i: usize) {
    store.vx[i] = 0.0;
    store.vy[i] = 0.0;
    store.vz[i] = 0.0;
    store.mass[i] = 1.0;
    store.temperature[i] = 1.0;
}
