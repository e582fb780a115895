//! Simple per-particle thermodynamic bookkeeping.
//!
//! No spatial search happens here: cooling is a gentle exponential decay of
//! velocity and temperature, and pressure is refreshed from the ideal-gas
//! law after the temperature update. Anything involving neighbor sums lives
//! in the `sph` module.

mod thermodynamics;

pub use thermodynamics::*;
