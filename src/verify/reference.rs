//! Verification against a published radial density profile.
//!
//! Loads a two-column `(radius, density)` reference CSV, bins the alive
//! particles into a radial mass-density profile with matching bins, and
//! reports L1/L2/L-infinity errors. Failures here (missing or malformed
//! reference file) abort only the verification path; the simulation itself
//! never depends on this module.

use std::f64::consts::PI;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::info;

use crate::particles::ParticleStore;
use crate::utils::SimError;

/// Aggregate error between a simulated and a reference profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorMetrics {
    pub l1: f64,
    pub l2: f64,
    pub linf: f64,
}

/// Loads a two-column `radius,density` CSV.
///
/// Blank lines are skipped; rows that do not parse as two floats abort the
/// load. An optional non-numeric header line is tolerated.
pub fn load_reference_profile(path: &Path) -> Result<(Vec<f64>, Vec<f64>), SimError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut radius = Vec::new();
    let mut density = Vec::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() != 2 {
            return Err(SimError::MalformedRecord(line));
        }
        let parsed: Result<(f64, f64), _> = fields[0]
            .trim()
            .parse::<f64>()
            .and_then(|r| fields[1].trim().parse::<f64>().map(|d| (r, d)));
        match parsed {
            Ok((r, d)) => {
                radius.push(r);
                density.push(d);
            }
            Err(_) if line_no == 0 => continue, // header line
            Err(_) => return Err(SimError::MalformedRecord(line)),
        }
    }
    if radius.is_empty() {
        return Err(SimError::MalformedRecord(
            "reference profile contains no data rows".to_string(),
        ));
    }
    Ok((radius, density))
}

/// Bins the alive particles into a radial mass-density profile.
///
/// Shell `k` covers radii `[k, k+1) * max_r / bins`; the mass collected in
/// each shell is divided by the shell volume. Particles beyond `max_r` are
/// clamped into the outermost shell.
pub fn radial_density_profile(store: &ParticleStore, bins: usize, max_r: f64) -> Vec<f64> {
    let mut mass_in_bin = vec![0.0; bins];
    if bins == 0 || max_r <= 0.0 {
        return mass_in_bin;
    }

    for i in 0..store.len() {
        if !store.alive[i] {
            continue;
        }
        let r = (store.x[i] * store.x[i] + store.y[i] * store.y[i] + store.z[i] * store.z[i])
            .sqrt();
        let b = (((r / max_r) * bins as f64) as usize).min(bins - 1);
        mass_in_bin[b] += store.mass[i];
    }

    let mut profile = vec![0.0; bins];
    for k in 0..bins {
        let r_lo = k as f64 / bins as f64 * max_r;
        let r_hi = (k + 1) as f64 / bins as f64 * max_r;
        let volume = (4.0 * PI / 3.0) * (r_hi.powi(3) - r_lo.powi(3));
        if volume > 0.0 {
            profile[k] = mass_in_bin[k] / volume;
        }
    }
    profile
}

/// L1/L2/L-infinity distances between two profiles, compared over their
/// common prefix.
pub fn compare_profiles(simulated: &[f64], reference: &[f64]) -> ErrorMetrics {
    let n = simulated.len().min(reference.len());
    if n == 0 {
        return ErrorMetrics { l1: 0.0, l2: 0.0, linf: 0.0 };
    }
    let mut s1 = 0.0;
    let mut s2 = 0.0;
    let mut s_inf: f64 = 0.0;
    for i in 0..n {
        let diff = (simulated[i] - reference[i]).abs();
        s1 += diff;
        s2 += diff * diff;
        s_inf = s_inf.max(diff);
    }
    ErrorMetrics {
        l1: s1 / n as f64,
        l2: (s2 / n as f64).sqrt(),
        linf: s_inf,
    }
}

/// Compares the current particle distribution against a reference profile
/// file and returns the error metrics.
///
/// The number of bins and the outer radius are taken from the reference
/// file itself (one bin per row, outermost radius from the last row).
pub fn verify_against_reference(
    store: &ParticleStore,
    reference_csv: &Path,
) -> Result<ErrorMetrics, SimError> {
    let (radius, density) = load_reference_profile(reference_csv)?;
    let bins = radius.len();
    let max_r = radius.last().copied().unwrap_or(0.0);
    if max_r <= 0.0 {
        return Err(SimError::MalformedRecord(
            "reference profile outer radius must be positive".to_string(),
        ));
    }

    let simulated = radial_density_profile(store, bins, max_r);
    let metrics = compare_profiles(&simulated, &density);

    info!(
        "verification vs {}: bins={}, L1={:.6}, L2={:.6}, Linf={:.6}",
        reference_csv.display(),
        bins,
        metrics.l1,
        metrics.l2,
        metrics.linf
    );
    Ok(metrics)
}
