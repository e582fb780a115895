//! Simulation driver tying the solvers together.
//!
//! Each step runs the components strictly in sequence: gravity, density,
//! pressure forces, leapfrog integration, cooling, star formation. Every
//! stage reads fields the previous one wrote, so nothing here overlaps;
//! parallelism only exists inside the individual solvers.

use std::path::Path;

use log::{debug, info};

use crate::gravity::{compute_gravity, compute_gravity_tree};
use crate::integrator::{drift, half_kick};
use crate::particles::{ParticleStore, StarRegistry};
use crate::snapshots::write_snapshot;
use crate::sph::{
    compute_density_knn, compute_density_sph, compute_pressure, compute_pressure_forces,
    EquationOfState,
};
use crate::starform::{form_stars, StarFormationParams, StarPolicy};
use crate::thermodynamics::apply_cooling;
use crate::utils::{SimConstants, SimError};

/// Which gravity solver a run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GravityMode {
    /// Exact O(N²) pairwise summation.
    Direct,
    /// Approximate O(N log N) octree summation using the configured
    /// opening angle.
    BarnesHut,
}

/// Which density estimator a run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DensityMode {
    /// SPH kernel summation with the configured smoothing length.
    Sph,
    /// k-nearest-neighbor volume estimate.
    NearestNeighbors { k: usize },
}

/// Per-run configuration of the simulation driver.
#[derive(Debug, Clone, Copy)]
pub struct SimulationSettings {
    pub gravity: GravityMode,
    pub density: DensityMode,
    pub eos: EquationOfState,
    /// SPH smoothing length, shared by the density and pressure solvers.
    pub smoothing_length: f64,
    /// Whether the SPH density sum includes the particle's own mass.
    pub include_self_density: bool,
    pub star_formation: StarFormationParams,
    pub star_policy: StarPolicy,
    /// Run the star-formation pass every this many steps (0 disables it).
    pub star_formation_interval: usize,
    /// Per-step velocity damping factor fed to the cooling stage.
    pub velocity_damping: f64,
    /// Per-step temperature decay factor fed to the cooling stage.
    pub cooling_rate: f64,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        SimulationSettings {
            gravity: GravityMode::BarnesHut,
            density: DensityMode::Sph,
            eos: EquationOfState::IdealGas,
            smoothing_length: 0.1,
            include_self_density: true,
            star_formation: StarFormationParams::default(),
            star_policy: StarPolicy::Merge,
            star_formation_interval: 10,
            velocity_damping: 0.001,
            cooling_rate: 0.0005,
        }
    }
}

/// Owns the particle population and advances it through time.
///
/// # Examples
///
/// ```
/// use rs_starform::particles::ParticleStore;
/// use rs_starform::simulation::{Simulation, SimulationSettings};
/// use rs_starform::utils::SimConstants;
///
/// let mut store = ParticleStore::new(8);
/// for i in 0..8 {
///     store.x[i] = i as f64 * 0.3;
/// }
/// let mut sim = Simulation::new(store, SimConstants::default(), SimulationSettings::default())
///     .expect("valid configuration");
/// sim.step();
/// assert_eq!(sim.steps_taken(), 1);
/// ```
pub struct Simulation {
    particles: ParticleStore,
    stars: StarRegistry,
    constants: SimConstants,
    settings: SimulationSettings,
    time: f64,
    steps_taken: usize,
}

impl Simulation {
    /// Creates a driver over an already-populated particle store.
    ///
    /// # Errors
    ///
    /// Rejects non-positive timesteps or smoothing lengths, negative
    /// opening angles, and a zero neighbor count for the kNN estimator.
    pub fn new(
        particles: ParticleStore,
        constants: SimConstants,
        settings: SimulationSettings,
    ) -> Result<Self, SimError> {
        constants.validate()?;
        if settings.smoothing_length <= 0.0 || !settings.smoothing_length.is_finite() {
            return Err(SimError::InvalidSmoothingLength);
        }
        if let DensityMode::NearestNeighbors { k } = settings.density {
            if k == 0 {
                return Err(SimError::InvalidNeighborCount);
            }
        }
        particles.assert_coherent();

        Ok(Simulation {
            particles,
            stars: StarRegistry::new(),
            constants,
            settings,
            time: 0.0,
            steps_taken: 0,
        })
    }

    pub fn particles(&self) -> &ParticleStore {
        &self.particles
    }

    pub fn stars(&self) -> &StarRegistry {
        &self.stars
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn steps_taken(&self) -> usize {
        self.steps_taken
    }

    pub fn constants(&self) -> &SimConstants {
        &self.constants
    }

    /// One full force evaluation: gravity overwrites the accelerations,
    /// then density and the pressure gradient accumulate on top.
    fn compute_forces(&mut self) {
        match self.settings.gravity {
            GravityMode::Direct => {
                compute_gravity(&mut self.particles, self.constants.g, self.constants.softening)
            }
            GravityMode::BarnesHut => compute_gravity_tree(
                &mut self.particles,
                self.constants.g,
                self.constants.softening,
                self.constants.theta,
            ),
        }
        match self.settings.density {
            DensityMode::Sph => compute_density_sph(
                &mut self.particles,
                self.settings.smoothing_length,
                self.settings.include_self_density,
            ),
            DensityMode::NearestNeighbors { k } => compute_density_knn(&mut self.particles, k),
        }
        compute_pressure(&mut self.particles, &self.settings.eos);
        compute_pressure_forces(&mut self.particles, self.settings.smoothing_length);
    }

    /// Advances the simulation by one timestep.
    ///
    /// The two velocity half-kicks bracket exactly one drift and one force
    /// recomputation, which is what keeps the integration symplectic.
    pub fn step(&mut self) {
        self.particles.assert_coherent();
        let dt = self.constants.dt;

        self.compute_forces();
        half_kick(&mut self.particles, dt);
        drift(&mut self.particles, dt);
        self.compute_forces();
        half_kick(&mut self.particles, dt);

        apply_cooling(
            &mut self.particles,
            self.settings.velocity_damping,
            self.settings.cooling_rate,
        );

        self.time += dt;
        self.steps_taken += 1;

        let interval = self.settings.star_formation_interval;
        if interval > 0 && self.steps_taken % interval == 0 {
            let formed = form_stars(
                &mut self.particles,
                &mut self.stars,
                &self.settings.star_formation,
                self.settings.star_policy,
                self.time,
            );
            if formed > 0 {
                info!(
                    "step {}: {} new star(s), {} alive particles remain",
                    self.steps_taken,
                    formed,
                    self.particles.count_alive()
                );
            }
        }

        debug!(
            "step {} done: t={:.6}, {} alive, {} stars",
            self.steps_taken,
            self.time,
            self.particles.count_alive(),
            self.stars.len()
        );
    }

    /// Runs `steps` timesteps back to back.
    pub fn run(&mut self, steps: usize) {
        for _ in 0..steps {
            self.step();
        }
    }

    /// Runs `steps` timesteps, writing a CSV snapshot of the alive
    /// particles into `output_dir` every `output_interval` steps.
    pub fn run_with_output(
        &mut self,
        steps: usize,
        output_interval: usize,
        output_dir: &Path,
    ) -> Result<(), SimError> {
        std::fs::create_dir_all(output_dir)?;
        for _ in 0..steps {
            self.step();
            if output_interval > 0 && self.steps_taken % output_interval == 0 {
                let path = output_dir.join(format!("snapshot_{:05}.csv", self.steps_taken));
                write_snapshot(&self.particles, &path)?;
            }
        }
        Ok(())
    }
}
