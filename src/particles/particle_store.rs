//! Structure-of-arrays storage for the particle population.
//!
//! All per-particle attributes live in parallel vectors indexed by the same
//! particle id. The arrays never shrink or reorder: a particle that gets
//! merged into a star is marked `alive = false` and its slot is retired, so
//! an index stays a stable identifier for the whole run.

/// Structure-of-arrays storage for a fixed-size particle population.
///
/// The layout keeps each attribute in its own contiguous vector:
/// positions (`x`/`y`/`z`), velocities (`vx`/`vy`/`vz`), cached
/// accelerations (`ax`/`ay`/`az`), and the thermodynamic fields.
///
/// Invariant: every vector has the same length, equal to the population size
/// passed to [`ParticleStore::new`]. Dead particles keep their slots;
/// indices are never reused.
///
/// # Examples
///
/// ```
/// use rs_starform::particles::ParticleStore;
///
/// let store = ParticleStore::new(16);
/// assert_eq!(store.len(), 16);
/// assert_eq!(store.count_alive(), 16);
/// assert_eq!(store.count_stars(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct ParticleStore {
    pub mass: Vec<f64>,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
    pub vx: Vec<f64>,
    pub vy: Vec<f64>,
    pub vz: Vec<f64>,
    pub ax: Vec<f64>,
    pub ay: Vec<f64>,
    pub az: Vec<f64>,
    pub density: Vec<f64>,
    pub pressure: Vec<f64>,
    pub temperature: Vec<f64>,
    pub alive: Vec<bool>,
    pub is_star: Vec<bool>,
}

impl ParticleStore {
    /// Creates a store of `n` particles with unit mass, unit temperature,
    /// zero velocity, and all particles alive.
    pub fn new(n: usize) -> Self {
        ParticleStore {
            mass: vec![1.0; n],
            x: vec![0.0; n],
            y: vec![0.0; n],
            z: vec![0.0; n],
            vx: vec![0.0; n],
            vy: vec![0.0; n],
            vz: vec![0.0; n],
            ax: vec![0.0; n],
            ay: vec![0.0; n],
            az: vec![0.0; n],
            density: vec![0.0; n],
            pressure: vec![0.0; n],
            temperature: vec![1.0; n],
            alive: vec![true; n],
            is_star: vec![false; n],
        }
    }

    /// Number of particle slots, dead ones included.
    pub fn len(&self) -> usize {
        self.mass.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mass.is_empty()
    }

    /// Number of particles still participating in the dynamics.
    pub fn count_alive(&self) -> usize {
        self.alive.iter().filter(|&&a| a).count()
    }

    /// Number of particles tagged as stars (non-destructive policy).
    pub fn count_stars(&self) -> usize {
        self.is_star.iter().filter(|&&s| s).count()
    }

    /// Indices of all alive particles, in ascending order.
    pub fn alive_indices(&self) -> Vec<usize> {
        self.alive
            .iter()
            .enumerate()
            .filter_map(|(i, &a)| if a { Some(i) } else { None })
            .collect()
    }

    #[inline]
    pub fn position(&self, i: usize) -> (f64, f64, f64) {
        (self.x[i], self.y[i], self.z[i])
    }

    #[inline]
    pub fn velocity(&self, i: usize) -> (f64, f64, f64) {
        (self.vx[i], self.vy[i], self.vz[i])
    }

    /// Squared distance between particles `i` and `j`.
    #[inline]
    pub fn distance2(&self, i: usize, j: usize) -> f64 {
        let dx = self.x[j] - self.x[i];
        let dy = self.y[j] - self.y[i];
        let dz = self.z[j] - self.z[i];
        dx * dx + dy * dy + dz * dz
    }

    /// Retires particle `i` from the dynamics. The slot stays allocated.
    #[inline]
    pub fn kill(&mut self, i: usize) {
        self.alive[i] = false;
    }

    /// Zeroes the acceleration accumulators of every slot.
    pub fn clear_accelerations(&mut self) {
        self.ax.iter_mut().for_each(|a| *a = 0.0);
        self.ay.iter_mut().for_each(|a| *a = 0.0);
        self.az.iter_mut().for_each(|a| *a = 0.0);
    }

    /// Total mass of the alive population.
    pub fn total_alive_mass(&self) -> f64 {
        (0..self.len())
            .filter(|&i| self.alive[i])
            .map(|i| self.mass[i])
            .sum()
    }

    /// Total linear momentum of the alive population.
    pub fn total_momentum(&self) -> (f64, f64, f64) {
        let mut px = 0.0;
        let mut py = 0.0;
        let mut pz = 0.0;
        for i in 0..self.len() {
            if !self.alive[i] {
                continue;
            }
            px += self.mass[i] * self.vx[i];
            py += self.mass[i] * self.vy[i];
            pz += self.mass[i] * self.vz[i];
        }
        (px, py, pz)
    }

    /// Verifies that every attribute array has the same length.
    ///
    /// A mismatch means a caller mutated the arrays out of step (for example
    /// a stale cache sized for a previous population) and the process cannot
    /// safely continue, so this panics rather than truncating.
    pub fn assert_coherent(&self) {
        let n = self.mass.len();
        assert_eq!(self.x.len(), n, "position array length mismatch");
        assert_eq!(self.y.len(), n, "position array length mismatch");
        assert_eq!(self.z.len(), n, "position array length mismatch");
        assert_eq!(self.vx.len(), n, "velocity array length mismatch");
        assert_eq!(self.vy.len(), n, "velocity array length mismatch");
        assert_eq!(self.vz.len(), n, "velocity array length mismatch");
        assert_eq!(self.ax.len(), n, "acceleration array length mismatch");
        assert_eq!(self.ay.len(), n, "acceleration array length mismatch");
        assert_eq!(self.az.len(), n, "acceleration array length mismatch");
        assert_eq!(self.density.len(), n, "density array length mismatch");
        assert_eq!(self.pressure.len(), n, "pressure array length mismatch");
        assert_eq!(self.temperature.len(), n, "temperature array length mismatch");
        assert_eq!(self.alive.len(), n, "alive flag array length mismatch");
        assert_eq!(self.is_star.len(), n, "star flag array length mismatch");
    }
}
