use log::info;

use crate::particles::{ParticleStore, Star, StarRegistry};
use crate::starform::{detect_candidates, find_clusters, StarFormationParams};

/// How a qualifying cluster is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarPolicy {
    /// Mark every cluster member `is_star = true` and leave it in the
    /// simulation (gas keeps evolving, the flag only labels it).
    Tag,
    /// Collapse each sufficiently massive cluster into one immutable sink
    /// object and retire its members from the dynamics.
    Merge,
}

/// Non-destructive resolution: tags every member of every cluster as a
/// star. Particles stay alive and keep participating in the dynamics.
pub fn tag_clusters(store: &mut ParticleStore, clusters: &[Vec<usize>]) {
    for cluster in clusters {
        for &i in cluster {
            if store.alive[i] {
                store.is_star[i] = true;
            }
        }
    }
}

/// Destructive resolution: merges each cluster whose total mass reaches
/// `mass_threshold` into a new [`Star`], conserving mass and momentum.
///
/// The star takes the exact mass sum, the mass-weighted center of mass, and
/// the mass-weighted mean velocity of its members; every member then
/// becomes `alive = false`. Clusters below the threshold are left
/// completely untouched; failing the mass cut is a normal outcome.
///
/// Returns the number of stars formed.
pub fn merge_clusters(
    store: &mut ParticleStore,
    registry: &mut StarRegistry,
    clusters: &[Vec<usize>],
    mass_threshold: f64,
    current_time: f64,
) -> usize {
    let mut formed = 0;

    for cluster in clusters {
        let mut total_mass = 0.0;
        for &i in cluster {
            if store.alive[i] {
                total_mass += store.mass[i];
            }
        }
        if total_mass < mass_threshold || total_mass <= 0.0 {
            continue;
        }

        let mut cx = 0.0;
        let mut cy = 0.0;
        let mut cz = 0.0;
        let mut px = 0.0;
        let mut py = 0.0;
        let mut pz = 0.0;
        for &i in cluster {
            if !store.alive[i] {
                continue;
            }
            let m = store.mass[i];
            cx += m * store.x[i];
            cy += m * store.y[i];
            cz += m * store.z[i];
            px += m * store.vx[i];
            py += m * store.vy[i];
            pz += m * store.vz[i];
        }

        let star = Star::new(
            total_mass,
            (cx / total_mass, cy / total_mass, cz / total_mass),
            (px / total_mass, py / total_mass, pz / total_mass),
            current_time,
        );
        registry.push(star);
        for &i in cluster {
            store.kill(i);
        }
        formed += 1;

        info!(
            "star formed at t={:.4}: mass {:.4} from {} particles",
            current_time,
            total_mass,
            cluster.len()
        );
    }

    formed
}

/// Runs one complete star-formation pass: candidate detection, clustering,
/// and cluster resolution under the chosen policy.
///
/// Returns the number of stars formed (always zero under [`StarPolicy::Tag`],
/// which labels particles instead of creating sink objects).
pub fn form_stars(
    store: &mut ParticleStore,
    registry: &mut StarRegistry,
    params: &StarFormationParams,
    policy: StarPolicy,
    current_time: f64,
) -> usize {
    let candidates = detect_candidates(store, params);
    if candidates.is_empty() {
        return 0;
    }
    let clusters = find_clusters(store, &candidates, params.linking_length);

    match policy {
        StarPolicy::Tag => {
            tag_clusters(store, &clusters);
            0
        }
        StarPolicy::Merge => merge_clusters(
            store,
            registry,
            &clusters,
            params.cluster_mass_threshold,
            current_time,
        ),
    }
}
