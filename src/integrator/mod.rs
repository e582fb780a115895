mod leapfrog;

pub use leapfrog::*;
