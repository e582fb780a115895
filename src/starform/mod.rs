mod detection;
mod clustering;
mod formation;

pub use detection::*;
pub use clustering::*;
pub use formation::*;

#[cfg(test)]
mod clustering_tests;

/// Tunables for the star-formation pass.
///
/// A particle becomes a collapse candidate when it has at least
/// `min_neighbors` alive neighbors within `neighbor_radius` and the mass
/// packed into that sphere reaches `min_density`. Candidates are then
/// chained into clusters with `linking_length`, and (under the merge
/// policy) a cluster only collapses into a star once its total mass reaches
/// `cluster_mass_threshold`.
#[derive(Debug, Clone, Copy)]
pub struct StarFormationParams {
    pub neighbor_radius: f64,
    pub min_neighbors: usize,
    pub min_density: f64,
    pub linking_length: f64,
    pub cluster_mass_threshold: f64,
}

impl Default for StarFormationParams {
    fn default() -> Self {
        StarFormationParams {
            neighbor_radius: 0.1,
            min_neighbors: 8,
            min_density: 5.0,
            linking_length: 0.1,
            cluster_mass_threshold: 10.0,
        }
    }
}
