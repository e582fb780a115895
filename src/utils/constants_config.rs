// src/utils/constants_config.rs
use crate::utils::{errors::SimError, DEFAULT_SIM_CONSTANTS};

/// Global numerical constants shared by the force solvers and the integrator.
///
/// All values are in code units (G defaults to 1). The softening length and
/// the opening angle only affect the gravity solvers; `dt` is consumed by the
/// leapfrog integrator and the simulation driver.
#[derive(Debug, Clone, Copy)]
pub struct SimConstants {
    /// Gravitational constant.
    pub g: f64,
    /// Gravitational softening length (added in quadrature to pair distances).
    pub softening: f64,
    /// Barnes-Hut opening angle. Zero forces exact pairwise traversal.
    pub theta: f64,
    /// Integration timestep.
    pub dt: f64,
}

impl Default for SimConstants {
    fn default() -> Self {
        DEFAULT_SIM_CONSTANTS
    }
}

impl SimConstants {
    /// Creates a new set of constants, falling back to the defaults for any
    /// argument passed as `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_starform::utils::SimConstants;
    ///
    /// let constants = SimConstants::new(None, Some(0.05), None, Some(1.0e-4));
    /// assert_eq!(constants.g, 1.0);
    /// assert_eq!(constants.softening, 0.05);
    /// assert_eq!(constants.dt, 1.0e-4);
    /// ```
    pub fn new(
        g: Option<f64>,
        softening: Option<f64>,
        theta: Option<f64>,
        dt: Option<f64>,
    ) -> Self {
        let default = DEFAULT_SIM_CONSTANTS;
        Self {
            g: g.unwrap_or(default.g),
            softening: softening.unwrap_or(default.softening),
            theta: theta.unwrap_or(default.theta),
            dt: dt.unwrap_or(default.dt),
        }
    }

    /// Validates the constants for use by the simulation driver.
    ///
    /// The timestep must be strictly positive and the opening angle
    /// non-negative; the softening length may be zero (pure Newtonian pairs)
    /// but not negative.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.dt <= 0.0 || !self.dt.is_finite() {
            return Err(SimError::InvalidTimestep);
        }
        if self.theta < 0.0 || !self.theta.is_finite() {
            return Err(SimError::InvalidOpeningAngle);
        }
        if self.softening < 0.0 {
            return Err(SimError::CalculationError(
                "softening length cannot be negative".to_string(),
            ));
        }
        Ok(())
    }
}
