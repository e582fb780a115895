use crate::particles::ParticleStore;
use crate::sph::kernels::{cubic_spline_grad, support_radius};

/// Floor applied to densities before they are squared in the pressure
/// force, and to the density fed into the polytropic law.
const DENSITY_EPS: f64 = 1.0e-12;

/// Numerical floor below which a pair separation is treated as coincident
/// and the pair is skipped.
const SEPARATION_FLOOR: f64 = 1.0e-12;

/// Equation of state converting thermodynamic fields into pressure.
///
/// # Examples
///
/// ```
/// use rs_starform::sph::EquationOfState;
///
/// let ideal = EquationOfState::IdealGas;
/// assert_eq!(ideal.pressure(2.0, 3.0), 6.0);
///
/// let poly = EquationOfState::Polytropic { k: 1.0, gamma: 2.0 };
/// assert!((poly.pressure(3.0, 1.0) - 9.0).abs() < 1.0e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EquationOfState {
    /// `p = rho * T`.
    IdealGas,
    /// `p = k * rho^gamma`, with the density floored to a small positive
    /// epsilon so collapse configurations never feed a singular or negative
    /// base into the power law.
    Polytropic { k: f64, gamma: f64 },
}

impl EquationOfState {
    pub fn pressure(&self, density: f64, temperature: f64) -> f64 {
        match *self {
            EquationOfState::IdealGas => density * temperature,
            EquationOfState::Polytropic { k, gamma } => k * density.max(DENSITY_EPS).powf(gamma),
        }
    }
}

/// Updates the pressure field of every alive particle from its density and
/// temperature through the given equation of state.
pub fn compute_pressure(store: &mut ParticleStore, eos: &EquationOfState) {
    store.assert_coherent();
    for i in 0..store.len() {
        if !store.alive[i] {
            continue;
        }
        store.pressure[i] = eos.pressure(store.density[i], store.temperature[i]);
    }
}

/// Accumulates SPH pressure-gradient accelerations onto the store.
///
/// For every alive pair within kernel support the symmetric contribution
/// `-m_j (p_i/rho_i^2 + p_j/rho_j^2) * dW/dr * r_hat` is added to particle i
/// and subtracted from particle j, so a closed equal-mass pair exchanges
/// momentum exactly. Pairs separated beyond 2h, or closer than a numerical
/// floor, are skipped.
///
/// The accelerations are accumulated on top of whatever the gravity solver
/// already wrote; call the gravity solver first.
pub fn compute_pressure_forces(store: &mut ParticleStore, h: f64) {
    store.assert_coherent();
    let n = store.len();
    let support = support_radius(h);

    for i in 0..n {
        if !store.alive[i] {
            continue;
        }
        let rho_i = store.density[i].max(DENSITY_EPS);
        let p_i_rho2 = store.pressure[i] / (rho_i * rho_i);
        let (xi, yi, zi) = store.position(i);

        for j in (i + 1)..n {
            if !store.alive[j] {
                continue;
            }
            // displacement from j to i: the kernel gradient with respect to
            // particle i points along this direction
            let dx = xi - store.x[j];
            let dy = yi - store.y[j];
            let dz = zi - store.z[j];
            let r = (dx * dx + dy * dy + dz * dz).sqrt();
            if r > support || r < SEPARATION_FLOOR {
                continue;
            }
            let dw_dr = cubic_spline_grad(r, h);
            if dw_dr == 0.0 {
                continue;
            }

            let rho_j = store.density[j].max(DENSITY_EPS);
            let p_j_rho2 = store.pressure[j] / (rho_j * rho_j);
            let term = -store.mass[j] * (p_i_rho2 + p_j_rho2);
            let grad_scalar = dw_dr / r;

            let a_x = dx * grad_scalar * term;
            let a_y = dy * grad_scalar * term;
            let a_z = dz * grad_scalar * term;

            store.ax[i] += a_x;
            store.ay[i] += a_y;
            store.az[i] += a_z;

            store.ax[j] -= a_x;
            store.ay[j] -= a_y;
            store.az[j] -= a_z;
        }
    }
}
